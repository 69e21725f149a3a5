//! Logging bootstrap shared by the mdpress server and CLI.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Where and how loudly to log.
#[derive(Debug, Clone)]
pub struct LoggingOptions {
    /// Filter used when `RUST_LOG` is unset.
    pub default_filter: String,
    /// When set, a daily-rolling copy of the log is written here.
    pub log_dir: Option<PathBuf>,
    /// File name prefix for rolled log files.
    pub file_prefix: String,
}

impl LoggingOptions {
    /// Console-only logging at `info`.
    pub fn new(file_prefix: impl Into<String>) -> Self {
        Self {
            default_filter: "info".to_string(),
            log_dir: None,
            file_prefix: file_prefix.into(),
        }
    }

    /// Also write rolling log files under `dir`.
    pub fn with_log_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.log_dir = dir;
        self
    }
}

/// Install the global tracing subscriber.
///
/// The returned guard flushes the file writer on drop; keep it alive for the
/// lifetime of the process. It is `None` when file logging is disabled.
pub fn init_logging(options: &LoggingOptions) -> Result<Option<WorkerGuard>> {
    // Default to the configured level; override via RUST_LOG if needed.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&options.default_filter))
        .context("invalid log filter")?;

    let console = fmt::layer().with_target(true);

    match &options.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, &options.file_prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file = fmt::layer().with_ansi(false).with_writer(writer);
            tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .with(file)
                .try_init()
                .context("failed to install tracing subscriber")?;
            Ok(Some(guard))
        },
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .try_init()
                .context("failed to install tracing subscriber")?;
            Ok(None)
        },
    }
}
