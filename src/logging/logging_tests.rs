//! Tests for tracing subscriber initialization.

use super::*;
use serial_test::serial;
use std::fs;

#[test]
fn split_log_path_separates_directory_and_file() {
    let (dir, file) = split_log_path(Path::new("/var/log/admin-console/console.log")).unwrap();
    assert_eq!(dir, Path::new("/var/log/admin-console"));
    assert_eq!(file, "console.log");
}

#[test]
fn bare_file_name_logs_to_current_directory() {
    let (dir, file) = split_log_path(Path::new("console.log")).unwrap();
    assert_eq!(dir, Path::new("."));
    assert_eq!(file, "console.log");
}

#[test]
fn root_path_is_invalid() {
    let err = split_log_path(Path::new("/")).unwrap_err();
    assert!(matches!(err, LoggingError::InvalidPath(_)));
}

#[test]
#[serial(tracing_init)]
fn init_creates_log_directory_if_missing() {
    let test_dir = std::env::temp_dir().join("admin_console_test_logs_create");
    let log_file = test_dir.join("test.log");

    let _ = fs::remove_dir_all(&test_dir);

    // May fail if a subscriber is already set; the directory is created first.
    let _ = init(&log_file);

    assert!(
        test_dir.exists(),
        "Log directory should be created: {:?}",
        test_dir
    );

    let _ = fs::remove_dir_all(&test_dir);
}

#[test]
#[serial(tracing_init)]
fn second_init_reports_subscriber_already_set() {
    let test_dir = std::env::temp_dir().join("admin_console_test_logs_twice");
    let log_file = test_dir.join("twice.log");

    let _ = init(&log_file);
    let second = init(&log_file);

    assert!(matches!(second, Err(LoggingError::SubscriberAlreadySet)));

    let _ = fs::remove_dir_all(&test_dir);
}

#[test]
#[serial(tracing_init)]
fn env_filter_falls_back_to_default() {
    let saved = std::env::var("RUST_LOG").ok();
    std::env::remove_var("RUST_LOG");

    assert_eq!(env_filter().to_string(), DEFAULT_FILTER);

    if let Some(value) = saved {
        std::env::set_var("RUST_LOG", value);
    }
}
