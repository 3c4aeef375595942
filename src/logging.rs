use crate::paths::AppPaths;
use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target, WriteStyle};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;

const ENV_LOG: &str = "SHOWBILL_LOG";

/// Sets up `log` to append to the log file. `level` (e.g. from `--log-level`)
/// wins over `SHOWBILL_LOG`, which defaults to `info`.
///
/// Returns the file being written to, or `None` when the platform has no data dir.
pub fn init(level: Option<&str>) -> Result<Option<PathBuf>> {
    let Some(path) = AppPaths::log_file() else {
        return Ok(None);
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let mut builder = Builder::from_env(Env::new().filter_or(ENV_LOG, "info"));
    if let Some(level) = level {
        builder.parse_filters(level);
    }
    builder
        .target(Target::Pipe(Box::new(file)))
        .write_style(WriteStyle::Never)
        .try_init()
        .context("Logger already initialised")?;

    Ok(Some(path))
}
