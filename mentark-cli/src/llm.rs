use anyhow::{bail, Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::auth;
use crate::config::LlmSection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Anthropic,
    OpenAI,
}

impl Provider {
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "anthropic" => Ok(Provider::Anthropic),
            "openai" => Ok(Provider::OpenAI),
            other => bail!("unknown llm provider '{other}' (expected anthropic or openai)"),
        }
    }
}

/// Single-shot completion: one system prompt, one user message.
///
/// The CLI uses #[tokio::main], so we're often already inside a runtime.
/// Creating a nested runtime and calling block_on would panic, so:
/// - inside a runtime: block_in_place + Handle::block_on
/// - otherwise: create a runtime and block_on
pub fn complete(llm: &LlmSection, system: &str, prompt: &str, timeout: Duration) -> Result<String> {
    if let Ok(handle) = tokio::runtime::Handle::try_current() {
        tokio::task::block_in_place(|| {
            handle.block_on(async { complete_async(llm, system, prompt, timeout).await })
        })
    } else {
        let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
        rt.block_on(async { complete_async(llm, system, prompt, timeout).await })
    }
}

async fn complete_async(
    llm: &LlmSection,
    system: &str,
    prompt: &str,
    timeout: Duration,
) -> Result<String> {
    match Provider::from_name(&llm.provider)? {
        Provider::Anthropic => anthropic_complete(&llm.model, system, prompt, timeout).await,
        Provider::OpenAI => openai_complete(llm, system, prompt, timeout).await,
    }
}

async fn anthropic_complete(
    model: &str,
    system: &str,
    prompt: &str,
    timeout: Duration,
) -> Result<String> {
    let a = auth::load_auth()?;
    let token = a
        .anthropic_token
        .ok_or_else(|| anyhow::anyhow!("missing anthropic_token; run: mentark auth paste-anthropic-token"))?;

    #[derive(Serialize)]
    struct Msg {
        role: String,
        content: String,
    }

    #[derive(Serialize)]
    struct Req {
        model: String,
        max_tokens: i32,
        system: String,
        messages: Vec<Msg>,
    }

    #[derive(Deserialize)]
    struct Resp {
        content: Vec<ContentBlock>,
    }

    #[derive(Deserialize)]
    struct ContentBlock {
        #[serde(rename = "type")]
        t: String,
        text: Option<String>,
    }

    let body = Req {
        model: model.to_string(),
        max_tokens: 300,
        system: system.to_string(),
        messages: vec![Msg {
            role: "user".to_string(),
            content: prompt.to_string(),
        }],
    };

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {token}"))?);
    headers.insert("anthropic-version", HeaderValue::from_static("2023-06-01"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let client = reqwest::Client::builder().timeout(timeout).build()?;
    let resp = client
        .post("https://api.anthropic.com/v1/messages")
        .headers(headers)
        .json(&body)
        .send()
        .await
        .context("anthropic request")?;

    let status = resp.status();
    if !status.is_success() {
        let txt = resp.text().await.unwrap_or_default();
        bail!("anthropic error: {status} {txt}");
    }

    let out: Resp = resp.json().await.context("parse anthropic response")?;
    let mut s = String::new();
    for b in out.content {
        if b.t == "text" {
            if let Some(t) = b.text {
                s.push_str(&t);
            }
        }
    }
    Ok(s.trim().to_string())
}

async fn openai_complete(
    llm: &LlmSection,
    system: &str,
    prompt: &str,
    timeout: Duration,
) -> Result<String> {
    let a = auth::load_auth()?;
    let key = a
        .openai_api_key
        .ok_or_else(|| anyhow::anyhow!("missing openai_api_key; run: mentark auth paste-openai-api-key"))?;

    #[derive(Serialize)]
    struct Msg {
        role: String,
        content: String,
    }

    #[derive(Serialize)]
    struct Req {
        model: String,
        messages: Vec<Msg>,
        temperature: f32,
    }

    #[derive(Deserialize)]
    struct Resp {
        choices: Vec<Choice>,
    }

    #[derive(Deserialize)]
    struct Choice {
        message: MsgOut,
    }

    #[derive(Deserialize)]
    struct MsgOut {
        content: Option<String>,
    }

    let body = Req {
        model: llm.model.clone(),
        messages: vec![
            Msg {
                role: "system".to_string(),
                content: system.to_string(),
            },
            Msg {
                role: "user".to_string(),
                content: prompt.to_string(),
            },
        ],
        temperature: llm.temperature,
    };

    let client = reqwest::Client::builder().timeout(timeout).build()?;
    let resp = client
        .post("https://api.openai.com/v1/chat/completions")
        .header(AUTHORIZATION, format!("Bearer {key}"))
        .json(&body)
        .send()
        .await
        .context("openai request")?;

    let status = resp.status();
    if !status.is_success() {
        let txt = resp.text().await.unwrap_or_default();
        bail!("openai error: {status} {txt}");
    }

    let out: Resp = resp.json().await.context("parse openai response")?;
    let content = out
        .choices
        .first()
        .and_then(|c| c.message.content.clone())
        .unwrap_or_default();

    Ok(content.trim().to_string())
}
