use anyhow::{bail, Context, Result};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use mentark_core::{
    build_schedule, optimize_schedule, time::parse_local_to_utc, Recommender, ScheduleResult,
    Task, TimeBlock, TimeWindow,
};
use mentark_ingest::{load_plan, parse_tasks_csv};
use std::path::PathBuf;

mod auth;
mod calendar;
mod config;
mod llm;
mod recommend;
mod setup;
mod state;

use recommend::LlmRecommender;

#[derive(Parser, Debug)]
#[command(name = "mentark", version, about = "Mentark energy-aware study scheduler")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// One-time interactive setup: capture your energy profile
    Setup,

    /// Place tasks into available windows for the day
    Schedule {
        /// Plan JSON (tasks, windows, events, optional inline profile)
        #[arg(long)]
        plan: Option<PathBuf>,

        /// Additional tasks from a CSV export
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Extra available window, local time:
        /// "2026-03-02 06:00..2026-03-02 10:00" (repeatable)
        #[arg(long = "window")]
        windows: Vec<String>,

        /// Skip AI recommendations even if configured
        #[arg(long)]
        no_recommend: bool,

        /// Print the full result as JSON instead of text
        #[arg(long)]
        json: bool,

        /// Write placed blocks to an ICS file
        #[arg(long)]
        export_ics: Option<PathBuf>,

        /// Push placed blocks to Google Calendar via gcalcli
        #[arg(long)]
        push: bool,

        /// Target calendar name for --push
        #[arg(long)]
        calendar: Option<String>,
    },

    /// Analyze the current schedule and re-derive a better one
    Optimize {
        /// Blocks JSON (defaults to the last `mentark schedule` output)
        #[arg(long)]
        schedule: Option<PathBuf>,

        /// Plan JSON providing the tasks to re-place
        #[arg(long)]
        plan: PathBuf,

        /// Skip AI recommendations even if configured
        #[arg(long)]
        no_recommend: bool,

        /// Print the result as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Manage API credentials for recommendations
    Auth {
        #[command(subcommand)]
        command: AuthCommand,
    },

    /// Manage ~/.mentark/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum AuthCommand {
    /// Store an Anthropic token
    PasteAnthropicToken,
    /// Store an OpenAI API key
    PasteOpenaiApiKey,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the active config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Setup => setup::run_setup()?,

        Command::Schedule {
            plan,
            csv,
            windows,
            no_recommend,
            json,
            export_ics,
            push,
            calendar,
        } => {
            run_schedule(ScheduleArgs {
                plan,
                csv,
                windows,
                no_recommend,
                json,
                export_ics,
                push,
                calendar,
            })?;
        }

        Command::Optimize {
            schedule,
            plan,
            no_recommend,
            json,
        } => {
            run_optimize(schedule, plan, no_recommend, json)?;
        }

        Command::Auth { command } => match command {
            AuthCommand::PasteAnthropicToken => auth::paste_anthropic_token()?,
            AuthCommand::PasteOpenaiApiKey => auth::paste_openai_api_key()?,
        },

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => config::show_config()?,
        },
    }

    Ok(())
}

struct ScheduleArgs {
    plan: Option<PathBuf>,
    csv: Option<PathBuf>,
    windows: Vec<String>,
    no_recommend: bool,
    json: bool,
    export_ics: Option<PathBuf>,
    push: bool,
    calendar: Option<String>,
}

fn run_schedule(args: ScheduleArgs) -> Result<()> {
    let stored = state::read_profile()?;
    let tz: Tz = stored
        .timezone
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone in profile: {}", stored.timezone))?;

    let mut tasks: Vec<Task> = Vec::new();
    let mut windows: Vec<TimeWindow> = Vec::new();
    let mut events: Vec<TimeWindow> = Vec::new();
    let mut profile = stored.energy;

    if let Some(path) = &args.plan {
        let plan = load_plan(path)?;
        tasks.extend(plan.tasks);
        windows.extend(plan.available_windows);
        events.extend(plan.existing_events);
        if let Some(inline) = plan.energy_profile {
            profile = inline;
        }
    }

    if let Some(path) = &args.csv {
        tasks.extend(parse_tasks_csv(path)?);
    }

    for spec in &args.windows {
        windows.push(parse_window_flag(spec, &stored.timezone)?);
    }

    if tasks.is_empty() {
        bail!("no tasks to schedule (pass --plan and/or --csv)");
    }
    if windows.is_empty() {
        bail!("no available windows (put them in the plan or pass --window)");
    }

    let cfg = config::load_config()?;
    let recommender = build_recommender(&cfg, &stored, args.no_recommend);
    let result = build_schedule(
        &tasks,
        &profile,
        &windows,
        &events,
        recommender.as_ref().map(|r| r as &dyn Recommender),
    );

    state::write_last_schedule(&result.time_blocks)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_schedule(&result, tz);
    }

    if let Some(path) = &args.export_ics {
        let ics = calendar::blocks_to_ics(&result.time_blocks);
        std::fs::write(path, ics).with_context(|| format!("write {}", path.display()))?;
        println!("\nWrote {}", path.display());
    }

    if args.push {
        let ics = calendar::blocks_to_ics(&result.time_blocks);
        calendar::push_ics_via_gcalcli(&ics, args.calendar.as_deref())?;
        println!("\nPushed {} blocks to Google Calendar", result.time_blocks.len());
    }

    Ok(())
}

fn run_optimize(
    schedule: Option<PathBuf>,
    plan: PathBuf,
    no_recommend: bool,
    json: bool,
) -> Result<()> {
    let stored = state::read_profile()?;
    let tz: Tz = stored
        .timezone
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone in profile: {}", stored.timezone))?;

    let current: Vec<TimeBlock> = match schedule {
        Some(path) => {
            let s = std::fs::read_to_string(&path)
                .with_context(|| format!("read {}", path.display()))?;
            serde_json::from_str(&s).context("parse schedule JSON")?
        }
        None => state::read_last_schedule()?,
    };

    let plan = load_plan(&plan)?;
    let profile = plan.energy_profile.unwrap_or(stored.energy);

    let cfg = config::load_config()?;
    let recommender = build_recommender(&cfg, &stored, no_recommend);
    let result = optimize_schedule(
        &current,
        &plan.tasks,
        &profile,
        recommender.as_ref().map(|r| r as &dyn Recommender),
    );

    if json {
        #[derive(serde::Serialize)]
        struct Out<'a> {
            optimized: &'a [TimeBlock],
            improvements: &'a [String],
        }
        let out = Out {
            optimized: &result.optimized,
            improvements: &result.improvements,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if result.improvements.is_empty() {
        println!("No issues found in the current schedule.");
    } else {
        println!("Improvements:");
        for line in &result.improvements {
            println!("  - {line}");
        }
    }

    println!("\nRe-derived schedule ({} blocks):", result.optimized.len());
    for b in &result.optimized {
        println!("  {}", format_block(b, tz));
    }

    Ok(())
}

fn build_recommender(
    cfg: &config::Config,
    stored: &state::Profile,
    no_recommend: bool,
) -> Option<LlmRecommender> {
    if no_recommend || !cfg.recommend.enabled {
        return None;
    }
    let user_id = stored.user_id.clone()?;
    Some(LlmRecommender::new(cfg.clone(), user_id))
}

/// Parse "--window 'YYYY-MM-DD HH:MM..YYYY-MM-DD HH:MM'" in the profile tz.
fn parse_window_flag(spec: &str, tz: &str) -> Result<TimeWindow> {
    let Some((start, end)) = spec.split_once("..") else {
        bail!("window must look like '2026-03-02 06:00..2026-03-02 10:00', got '{spec}'");
    };
    let start = parse_local_to_utc(start.trim(), tz)?;
    let end = parse_local_to_utc(end.trim(), tz)?;
    if end <= start {
        bail!("window ends before it starts: {spec}");
    }
    Ok(TimeWindow::new(start, end))
}

fn format_block(b: &TimeBlock, tz: Tz) -> String {
    format!(
        "{} - {}  {} [{} | {} energy | {} min]",
        b.start_time.with_timezone(&tz).format("%H:%M"),
        b.end_time.with_timezone(&tz).format("%H:%M"),
        b.task_title,
        b.category,
        b.energy_level.label(),
        b.estimated_minutes
    )
}

fn print_schedule(result: &ScheduleResult, tz: Tz) {
    println!(
        "Scheduled {} of {} available minutes ({} blocks)",
        result.total_scheduled_minutes,
        result.total_available_minutes,
        result.time_blocks.len()
    );

    for b in &result.time_blocks {
        println!("  {}", format_block(b, tz));
    }

    let eo = &result.energy_optimization;
    println!(
        "\nBy time of day: {} morning, {} afternoon, {} evening, {} night",
        eo.morning_tasks, eo.afternoon_tasks, eo.evening_tasks, eo.night_tasks
    );

    if !result.conflicts.is_empty() {
        println!("\nConflicts:");
        for c in &result.conflicts {
            println!("  - {c}");
        }
    }

    if !result.recommendations.is_empty() {
        println!("\nRecommendations:");
        for r in &result.recommendations {
            println!("  - {r}");
        }
    }
}
