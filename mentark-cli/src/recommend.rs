//! LLM-backed recommendation fallback for unplaceable tasks.
//!
//! Strictly best-effort: any failure is reported on stderr and becomes
//! "no recommendation". The scheduler never sees an error from here.

use mentark_core::{EnergyProfile, Recommender, Task};
use std::time::Duration;

use crate::config::Config;
use crate::llm;

const SYSTEM_PROMPT: &str = "You are a study mentor helping a student fit work into their day. \
Answer with one or two short, actionable sentences.";

pub struct LlmRecommender {
    config: Config,
    user_id: String,
}

impl LlmRecommender {
    pub fn new(config: Config, user_id: impl Into<String>) -> Self {
        Self {
            config,
            user_id: user_id.into(),
        }
    }
}

impl Recommender for LlmRecommender {
    fn recommend(&self, task: &Task, profile: &EnergyProfile) -> Option<String> {
        let prompt = build_prompt(task, profile, &self.user_id);
        let timeout = Duration::from_secs(self.config.recommend.timeout_secs);

        match llm::complete(&self.config.llm, SYSTEM_PROMPT, &prompt, timeout) {
            Ok(text) if !text.is_empty() => Some(text),
            Ok(_) => None,
            Err(e) => {
                eprintln!("recommendation for \"{}\" skipped: {e:#}", task.title);
                None
            }
        }
    }
}

fn build_prompt(task: &Task, profile: &EnergyProfile, user_id: &str) -> String {
    let mut p = String::new();
    p.push_str("A student needs to schedule a task but couldn't find a suitable time slot.\n\n");
    p.push_str(&format!("Student: {user_id}\n"));
    p.push_str(&format!("Task: {}\n", task.title));
    p.push_str(&format!(
        "Description: {}\n",
        task.description.as_deref().unwrap_or("No description")
    ));
    p.push_str(&format!("Estimated Time: {} minutes\n", task.estimated_minutes));
    p.push_str(&format!("Priority: {}/5\n", task.priority));
    p.push_str(&format!("Energy Required: {}\n", task.energy_required.label()));
    p.push_str(&format!("Category: {}\n", task.category));
    if let Some(deadline) = task.deadline {
        p.push_str(&format!("Deadline: {}\n", deadline.to_rfc3339()));
    }
    p.push_str(&format!(
        "\nStudent's Energy Profile:\n\
         - Morning (6am-12pm): {}/10\n\
         - Afternoon (12pm-5pm): {}/10\n\
         - Evening (5pm-10pm): {}/10\n\
         - Night (10pm-6am): {}/10\n",
        profile.morning, profile.afternoon, profile.evening, profile.night
    ));
    p.push_str(
        "\nProvide a brief, actionable recommendation (1-2 sentences) on how to schedule \
         this task or what adjustments could be made.",
    );
    p
}
