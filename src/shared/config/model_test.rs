use indoc::indoc;
use std::fs;
use tempfile::tempdir;

use crate::engine::processor::UnknownVersionPolicy;
use crate::engine::version::version_adapter::DEFAULT_MAX_DATA_VERSION;
use crate::shared::config::model::{CleanerConfig, config_path, load_settings};

#[test]
fn file_values_override_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cleaner.toml");
    fs::write(
        &path,
        indoc! {r#"
            [logging]
            stdout_level = "warn"
            log_dir = "logs"

            [cleaner]
            workers = 3
            unknown_version_policy = "skip"
            max_data_version = 5000
        "#},
    )
    .unwrap();

    let settings = load_settings(Some(&path)).unwrap();

    assert_eq!(settings.logging.stdout_level, "warn");
    assert_eq!(settings.logging.file_level, "debug");
    assert_eq!(settings.logging.log_dir.as_deref(), Some("logs"));
    assert_eq!(settings.cleaner.workers(), 3);
    assert_eq!(settings.cleaner.unknown_version_policy, UnknownVersionPolicy::Skip);
    assert_eq!(settings.cleaner.adapter().max_supported(), 5000);
}

#[test]
fn partial_file_keeps_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cleaner.toml");
    fs::write(
        &path,
        indoc! {r#"
            [cleaner]
            workers = 2
        "#},
    )
    .unwrap();

    let settings = load_settings(Some(&path)).unwrap();

    assert_eq!(settings.logging.stdout_level, "info");
    assert!(settings.logging.log_dir.is_none());
    assert_eq!(settings.cleaner.unknown_version_policy, UnknownVersionPolicy::Fail);
    assert_eq!(settings.cleaner.adapter().max_supported(), DEFAULT_MAX_DATA_VERSION);
}

#[test]
fn explicit_missing_file_is_an_error() {
    let dir = tempdir().unwrap();
    assert!(load_settings(Some(&dir.path().join("absent.toml"))).is_err());
}

#[test]
fn bad_policy_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cleaner.toml");
    fs::write(
        &path,
        indoc! {r#"
            [cleaner]
            unknown_version_policy = "maybe"
        "#},
    )
    .unwrap();

    assert!(load_settings(Some(&path)).is_err());
}

#[test]
fn explicit_path_wins() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mine.toml");
    assert_eq!(config_path(Some(&path)), path);
}

#[test]
fn zero_workers_falls_back_to_default() {
    let cfg = CleanerConfig {
        workers: Some(0),
        unknown_version_policy: UnknownVersionPolicy::Fail,
        max_data_version: None,
    };
    assert!(cfg.workers() >= 1);
}
