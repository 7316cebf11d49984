//! Platform directories and log rotation.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "testhub";
const APPLICATION: &str = "testhub";

/// Name of the log file written by the running process.
pub const LATEST_LOG: &str = "latest.log";

/// Maximum number of archived log files to keep.
pub const MAX_OLD_LOGS: usize = 25;

/// Directory for log files, or `None` if no home directory is known.
///
/// - Linux: `$XDG_CACHE_HOME/testhub` or `~/.cache/testhub`
/// - macOS: `~/Library/Caches/dev.testhub.testhub`
/// - Windows: `C:\Users\<User>\AppData\Local\testhub\testhub\cache`
pub fn log_dir() -> Option<PathBuf> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Archive `latest.log` in `dir` under a timestamp, prune old archives down
/// to `keep`, and return the path for the new `latest.log`.
///
/// Call at startup, before the logger opens the file.
pub fn rotate_logs(dir: &Path, keep: usize) -> PathBuf {
    let latest = dir.join(LATEST_LOG);

    if latest.exists() {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let _ = fs::rename(&latest, dir.join(format!("{}.log", timestamp)));
    }

    prune_logs(dir, keep);
    latest
}

/// Remove the oldest archived logs in `dir` beyond `keep`. Returns how many
/// were removed. `latest.log` and non-log files are left alone.
pub fn prune_logs(dir: &Path, keep: usize) -> usize {
    let Ok(entries) = fs::read_dir(dir) else {
        return 0;
    };

    let mut archived: Vec<_> = entries
        .filter_map(|e| e.ok())
        .filter(|e| {
            let name = e.file_name();
            let name = name.to_string_lossy();
            name.ends_with(".log") && name != LATEST_LOG
        })
        .collect();

    if archived.len() <= keep {
        return 0;
    }

    // oldest first; the name breaks ties within the same mtime
    archived.sort_by_key(|e| (e.metadata().and_then(|m| m.modified()).ok(), e.file_name()));

    let excess = archived.len() - keep;
    archived
        .iter()
        .take(excess)
        .filter(|e| fs::remove_file(e.path()).is_ok())
        .count()
}
