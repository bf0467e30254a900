use anyhow::{Context, Result};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::str::FromStr;

/// Sends `log` output to a file. The terminal belongs to the UI, so
/// nothing is written to stderr while it runs.
pub fn init_logging(log_file_path: &Path, level: &str) -> Result<()> {
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log dir {}", parent.display()))?;
    }

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)
        .with_context(|| format!("unable to open log file {}", log_file_path.display()))?;

    let config = ConfigBuilder::new()
        .set_max_level(LevelFilter::Off)
        .add_filter_allow_str("wavywalls")
        .build();

    WriteLogger::init(parse_level(level), config, log_file).context("failed to initialize logger")
}

fn parse_level(level: &str) -> LevelFilter {
    LevelFilter::from_str(level).unwrap_or(LevelFilter::Info)
}
