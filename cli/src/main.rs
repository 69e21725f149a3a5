use anyhow::Result;
use clap::Parser;
use mdpress_cli::{cli::Cli, commands};
use mdpress_runtime::{init_logging, LoggingOptions};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Default to info-level logs; override via RUST_LOG if needed.
    let _log_guard =
        init_logging(&LoggingOptions::new("mdpress-cli").with_log_dir(cli.log_dir.clone()))?;

    commands::run(cli)
}
