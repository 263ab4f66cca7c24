//! Reprise Interaction Recorder, demo CLI.
//!
//! Records a scripted login session on the in-memory reference page, exports
//! it as JSON, and replays exported logs with a fixed per-step delay.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- record --out session.json
//!   cargo run -p demo -- replay session.json --without-submit
//!   cargo run -p demo -- --config config/recorder.toml run-all

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use reprise_contracts::{
    action::{Action, ActionKind},
    config::RecorderConfig,
    error::{RepriseError, RepriseResult},
};
use reprise_core::{PlaybackReport, StepOutcome};
use reprise_dom::{
    fixtures::{login_page, login_page_without_submit},
    scenarios::{self, missing_element, record_and_replay, ScenarioOutcome},
};

// ── CLI definition ────────────────────────────────────────────────────────────

/// Reprise: record browser-style interactions and replay them.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "Reprise interaction recorder demo",
    long_about = "Records a scripted login session on an in-memory page, exports it as JSON,\n\
                  and replays action logs step by step with a fixed delay."
)]
struct Cli {
    /// Recorder configuration file (TOML). Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run both scripted scenarios in sequence.
    RunAll,
    /// Record the login session and write the exported log.
    Record {
        /// Write the log here instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Replay an exported log onto a fresh login page.
    Replay {
        /// Path to an exported action log (envelope or bare array).
        input: PathBuf,
        /// Replay onto the page variant that has no submit button.
        #[arg(long)]
        without_submit: bool,
        /// Per-step delay in milliseconds; overrides the configuration.
        #[arg(long)]
        delay_ms: Option<u64>,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    // Set RUST_LOG=debug to see every captured event and playback step.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match load_config(cli.config.as_deref()) {
        Ok(config) => match cli.command {
            Command::RunAll => run_all(&config).await,
            Command::Record { out } => record(&config, out.as_deref()),
            Command::Replay {
                input,
                without_submit,
                delay_ms,
            } => replay(&config, &input, without_submit, delay_ms).await,
        },
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> RepriseResult<RecorderConfig> {
    match path {
        Some(path) => {
            let config = reprise_config::from_file(path)?;
            info!(path = %path.display(), "configuration loaded");
            Ok(config)
        }
        None => Ok(RecorderConfig::default()),
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

async fn run_all(config: &RecorderConfig) -> RepriseResult<()> {
    print_banner(config);
    let delay = Duration::from_millis(config.playback_delay_ms);

    print_outcome(&record_and_replay::run(config, delay).await?);
    print_outcome(&missing_element::run(config, delay).await?);

    println!("All scenarios completed.");
    Ok(())
}

fn record(config: &RecorderConfig, out: Option<&Path>) -> RepriseResult<()> {
    let page = Arc::new(login_page());
    let (actions, exported) = scenarios::record_login_session(&page, config)?;

    match out {
        Some(path) => {
            std::fs::write(path, &exported).map_err(|e| RepriseError::Serialization {
                reason: format!("cannot write {}: {}", path.display(), e),
            })?;
            print_actions(&actions);
            println!("Wrote {} actions to {}", actions.len(), path.display());
        }
        None => println!("{}", exported),
    }
    Ok(())
}

async fn replay(
    config: &RecorderConfig,
    input: &Path,
    without_submit: bool,
    delay_ms: Option<u64>,
) -> RepriseResult<()> {
    let serialized =
        std::fs::read_to_string(input).map_err(|e| RepriseError::Deserialization {
            reason: format!("cannot read {}: {}", input.display(), e),
        })?;
    let page = Arc::new(if without_submit {
        login_page_without_submit()
    } else {
        login_page()
    });
    let config = match delay_ms {
        Some(ms) => reprise_config::with_playback_delay(config, ms)?,
        None => config.clone(),
    };
    let delay = Duration::from_millis(config.playback_delay_ms);

    let report = scenarios::replay_log(&page, &serialized, &config, delay).await?;
    print_report(&report);
    Ok(())
}

// ── Output ────────────────────────────────────────────────────────────────────

fn print_banner(config: &RecorderConfig) {
    println!();
    println!("Reprise Interaction Recorder");
    println!("============================");
    println!();
    println!("  intent attribute : {}", config.intent_attribute);
    println!("  playback delay   : {} ms", config.playback_delay_ms);
    println!();
}

fn print_outcome(outcome: &ScenarioOutcome) {
    println!("── Scenario: {} ──", outcome.name);
    println!();
    println!("Recorded actions:");
    print_actions(&outcome.recorded);
    println!();
    println!("Exported log ({} bytes)", outcome.exported.len());
    println!();
    println!("Playback:");
    print_report(&outcome.report);
    println!();
}

fn print_actions(actions: &[Action]) {
    println!("  {:>3}  {:<6}  {:<24}  {}", "#", "type", "selector", "detail");
    for (index, action) in actions.iter().enumerate() {
        let detail = match action.kind() {
            Some(ActionKind::Click {
                coordinates,
                element,
            }) => format!("{} at ({}, {})", element, coordinates.x, coordinates.y),
            Some(ActionKind::Input { value, input_type }) => {
                format!("{:?} ({})", value, input_type)
            }
            None => String::from("-"),
        };
        println!(
            "  {:>3}  {:<6}  {:<24}  {}",
            index,
            action.action_type(),
            action.selector,
            detail
        );
    }
}

fn print_report(report: &PlaybackReport) {
    for step in &report.steps {
        let outcome = match &step.outcome {
            StepOutcome::Executed => String::from("executed"),
            StepOutcome::Skipped(e) => format!("skipped: {}", e),
            StepOutcome::Cancelled => String::from("cancelled"),
        };
        println!(
            "  [+{:>5} ms] {:<6} {:<24} {}",
            step.offset.as_millis(),
            step.action_type,
            step.selector,
            outcome
        );
    }
    println!(
        "  {} executed, {} skipped, {} cancelled",
        report.executed(),
        report.skipped(),
        report.cancelled()
    );
}
