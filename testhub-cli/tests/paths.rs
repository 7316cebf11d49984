use std::fs;

use testhub_cli::logging::terminal_level;
use testhub_cli::paths::{LATEST_LOG, prune_logs, rotate_logs};

fn touch(dir: &std::path::Path, name: &str) {
    fs::write(dir.join(name), name).unwrap();
}

fn log_count(dir: &std::path::Path) -> usize {
    fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".log"))
        .count()
}

// ============================================================================
// Log rotation
// ============================================================================

#[test]
fn test_rotate_archives_latest() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), LATEST_LOG);

    let latest = rotate_logs(dir.path(), 25);

    assert_eq!(latest, dir.path().join(LATEST_LOG));
    assert!(!latest.exists());
    assert_eq!(log_count(dir.path()), 1);
}

#[test]
fn test_rotate_without_latest_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    rotate_logs(dir.path(), 25);
    assert_eq!(log_count(dir.path()), 0);
}

#[test]
fn test_prune_keeps_newest() {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..30 {
        touch(dir.path(), &format!("20240101_0000{:02}.log", i));
    }
    touch(dir.path(), LATEST_LOG);
    touch(dir.path(), "notes.txt");

    assert_eq!(prune_logs(dir.path(), 25), 5);
    assert_eq!(log_count(dir.path()), 26);
    assert!(dir.path().join(LATEST_LOG).exists());
    assert!(dir.path().join("notes.txt").exists());

    assert_eq!(prune_logs(dir.path(), 25), 0);
}

#[test]
fn test_prune_missing_dir() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(prune_logs(&dir.path().join("missing"), 1), 0);
}

// ============================================================================
// Verbosity
// ============================================================================

#[test]
fn test_terminal_level() {
    use simplelog::LevelFilter;

    assert_eq!(terminal_level(0), LevelFilter::Off);
    assert_eq!(terminal_level(1), LevelFilter::Info);
    assert_eq!(terminal_level(2), LevelFilter::Debug);
    assert_eq!(terminal_level(7), LevelFilter::Trace);
}
