//! `env_logger` setup.
//!
//! The terminal is the display, so records go to a file unless the config
//! says otherwise. Each line is `file:line - message`.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;

use anyhow::{Context as _, Result};

use crate::config::EngineConfig;

/// Install the global logger. A second call leaves the first logger in place.
pub fn init_logging(config: &EngineConfig) -> Result<()> {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(&config.log_level);
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{}:{} - {}",
            record.file().unwrap_or("<unknown>"),
            record.line().unwrap_or(0),
            record.args()
        )
    });

    if let Some(path) = &config.log_file {
        let file = open_log_file(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    if builder.try_init().is_err() {
        log::debug!("logger already initialised, keeping it");
    }
    Ok(())
}

/// Open `path` for appending, creating parent directories as needed.
pub fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))
}
