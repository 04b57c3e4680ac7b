use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::sync::Mutex;

use anyhow::Context;
use cchooks_core::config::LoggingConfig;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// Output goes to stderr (hooks must not write to stdout) or, when
/// `logging.file` is set, is appended to that file. Level precedence:
/// `--log-level`, then `RUST_LOG`, then `logging.level`.
pub fn init(config: &LoggingConfig, level_override: Option<&str>) -> anyhow::Result<()> {
    let filter = match level_override {
        Some(level) => EnvFilter::try_new(level)
            .with_context(|| format!("invalid log level '{level}'"))?,
        None => EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.level))
            .with_context(|| format!("invalid log level '{}'", config.level))?,
    };

    let (writer, ansi) = match &config.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {path}"))?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None => (
            BoxMakeWriter::new(std::io::stderr),
            std::io::stderr().is_terminal(),
        ),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi);

    let installed = if config.format == "json" {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };

    installed.map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))
}
