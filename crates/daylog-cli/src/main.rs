//! daylog sample driver entry point.

use std::error::Error;

use clap::Parser;
use daylog_cli::SampleArgs;
use daylog_logger::{FileDestinationProvider, Logger, LoggerConfig, global_clock};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    // Diagnostics go to stderr; the log files only ever hold sample lines.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let args = SampleArgs::parse();
    let config = args.apply(LoggerConfig::from_env()?);
    tracing::info!(
        dir = %config.log_dir.display(),
        zone = ?config.zone,
        "starting daylog sample"
    );

    let logger = Logger::install(Logger::from_config(&config, global_clock().clone()))?;
    let report = daylog_cli::run(logger, global_clock(), &args)?;

    let files = FileDestinationProvider::from_config(&config);
    for day in &report.days {
        tracing::info!(path = %files.path_for(day).display(), "wrote log file");
    }
    println!(
        "{} lines across {} files in {}",
        report.lines,
        report.days.len(),
        config.log_dir.display()
    );

    Ok(())
}
