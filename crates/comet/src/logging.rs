//! Log file setup.
//!
//! The terminal belongs to the UI, so logs go to `comet.log` in the data
//! directory. The filter comes from `COMET_LOG` and defaults to `info`.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use color_eyre::{
    Result,
    eyre::{WrapErr, eyre},
};
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "comet.log";
const LOG_ENV: &str = "COMET_LOG";

/// Install the global subscriber. Returns the log file path.
pub fn init() -> Result<PathBuf> {
    let dir = comet_config::data_dir().ok_or_else(|| eyre!("no data directory available"))?;
    fs::create_dir_all(&dir).wrap_err_with(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .wrap_err_with(|| format!("failed to open {}", path.display()))?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| eyre!("failed to install log subscriber: {e}"))?;
    Ok(path)
}
