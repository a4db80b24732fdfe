use std::fs;
use std::time::Duration;

use sysdash::core::{BlinkMode, Config, LayoutMode};
use sysdash::SysdashError;
use tempfile::TempDir;

#[test]
fn test_config_load_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(
        &path,
        r#"{
            "thresholds": {
                "cpu_percent": 80,
                "memory_percent": 90,
                "disk_percent": 95,
                "net_bytes_per_sec": 1048576
            },
            "tui": { "refresh_interval": 2.5, "layout": "stacked", "blink": "software" },
            "alert_log_path": "custom_alerts.log"
        }"#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();

    assert_eq!(config.thresholds.net_bytes_per_sec, Some(1048576.0));
    assert_eq!(config.tui.refresh_interval, Duration::from_millis(2500));
    assert_eq!(config.tui.layout, LayoutMode::Stacked);
    assert_eq!(config.tui.blink, BlinkMode::Software);
    assert_eq!(config.alert_log_path.to_str(), Some("custom_alerts.log"));
    assert_eq!(config.log_interval, Duration::from_secs(5));
}

#[test]
fn test_config_missing_file_is_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = Config::load(&temp_dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, SysdashError::Config(_)));
}

#[test]
fn test_config_malformed_file_names_the_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, "{ not json").unwrap();

    let err = Config::load(&path).unwrap_err();

    assert!(matches!(err, SysdashError::Config(_)));
    assert!(err.to_string().contains("config.json"));
}

#[test]
fn test_config_rejects_negative_threshold() {
    let result = Config::from_json(
        r#"{ "thresholds": { "cpu_percent": -5, "memory_percent": 90, "disk_percent": 95 } }"#,
    );
    assert!(matches!(result, Err(SysdashError::Config(_))));
}

#[test]
fn test_explicit_config_path_wins() {
    let temp_dir = TempDir::new().unwrap();
    let explicit = temp_dir.path().join("elsewhere.json");
    assert_eq!(Config::resolve_path(Some(&explicit)), explicit);
}
