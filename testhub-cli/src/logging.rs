//! Logger setup.
//!
//! Everything at debug and above goes to a rotated `latest.log` in the
//! platform cache directory. `-v` flags add a terminal logger on stderr.

use std::fs::{self, File};
use std::path::PathBuf;

use anyhow::Context;
use simplelog::{
    ColorChoice, CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

use crate::paths::{MAX_OLD_LOGS, log_dir, rotate_logs};

/// Terminal level for a count of `-v` flags.
pub fn terminal_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Off,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the global logger. Returns the log file path, if one was opened.
pub fn init_logging(verbosity: u8) -> anyhow::Result<Option<PathBuf>> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    let mut log_path = None;

    if let Some(dir) = log_dir() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("creating log directory {}", dir.display()))?;
        let path = rotate_logs(&dir, MAX_OLD_LOGS);
        let file = File::create(&path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        loggers.push(WriteLogger::new(LevelFilter::Debug, Config::default(), file));
        log_path = Some(path);
    }

    let level = terminal_level(verbosity);
    if level != LevelFilter::Off {
        loggers.push(TermLogger::new(
            level,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }

    if !loggers.is_empty() {
        CombinedLogger::init(loggers).context("installing logger")?;
    }
    Ok(log_path)
}
