mod action;
mod handlers;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use cchooks_core::config::HooksConfig;
use cchooks_core::{
    dispatch, supported_event_names, HookError, HookEventName, Payload, RawInput, RouteOutcome,
};
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "cchooks",
    about = "Run the handler for a Claude Code hook event read from stdin",
    version
)]
struct Cli {
    /// Hook event name (PreToolUse, PostToolUse, Notification, Stop, SubagentStop,
    /// UserPromptSubmit, PreCompact, SessionStart)
    event: Option<String>,
    /// List supported hook events and exit
    #[arg(long)]
    list: bool,
    /// Log level override (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,
    /// Directory holding the project's .cchooks/ config (defaults to the current directory)
    #[arg(long)]
    project_dir: Option<PathBuf>,
}

/// Entry point for the cchooks binary.
///
/// Reads one hook event from stdin, validates it against the event named on
/// the command line, and runs that event's handler. Any dispatch error is
/// printed to stderr and the process exits non-zero.
fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.list {
        for event in HookEventName::ALL {
            println!("{:<18}{}", event.as_str(), event.description());
        }
        return ExitCode::SUCCESS;
    }

    let Some(event) = cli.event.as_deref() else {
        eprintln!("Usage: cchooks <hook_event_name>");
        eprintln!("Supported events: {}", supported_event_names().join(", "));
        return ExitCode::FAILURE;
    };

    let project_dir = cli
        .project_dir
        .clone()
        .or_else(|| std::env::current_dir().ok());
    let (config, warnings) = HooksConfig::load(project_dir.as_deref()).unwrap_or_else(|e| {
        eprintln!("cchooks: {e}; using defaults");
        (HooksConfig::default_config(), Vec::new())
    });

    if let Err(e) = logging::init(&config.logging, cli.log_level.as_deref()) {
        eprintln!("cchooks: {e:#}");
    }
    for w in &warnings {
        tracing::warn!("config: {w}");
    }

    match run(event, &config) {
        Ok(RouteOutcome::Handled(handled)) => {
            tracing::debug!("handled {handled}");
            ExitCode::SUCCESS
        }
        Ok(RouteOutcome::Unhandled) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error processing hook '{event}': {}", e.full_message());
            ExitCode::FAILURE
        }
    }
}

fn run(event: &str, config: &HooksConfig) -> Result<RouteOutcome, HookError> {
    let router = handlers::build_router(config);
    let stdin = std::io::stdin().lock();
    dispatch(
        event,
        Some(RawInput::stream(stdin)),
        Some(|payload: Payload| router.route(&payload)),
    )
}
