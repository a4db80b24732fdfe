use std::fs;

use chrono::{TimeZone, Utc};
use sysdash::core::system_monitor::{
    evaluate_alerts, AlertCategory, AlertLog, Rates, Sample, ThresholdConfig,
};
use tempfile::TempDir;

fn thresholds() -> ThresholdConfig {
    ThresholdConfig {
        cpu_percent: 80.0,
        memory_percent: 90.0,
        disk_percent: 95.0,
        net_bytes_per_sec: None,
    }
}

fn sample(cpu: f32, mem: f32) -> Sample {
    Sample {
        cpu_total_percent: cpu,
        mem_percent: mem,
        disk_percent: 10.0,
        ..Default::default()
    }
}

#[test]
fn test_only_rising_edges_are_written() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("alerts.log");
    let mut log = AlertLog::new(&path);
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();

    // cpu high in 1-3, clear in 4, high again in 5; memory joins in 3
    let cycles = [
        sample(85.0, 50.0),
        sample(86.0, 50.0),
        sample(87.0, 95.0),
        sample(40.0, 95.0),
        sample(90.0, 95.0),
    ];
    let written: Vec<usize> = cycles
        .iter()
        .map(|s| {
            let alerts = evaluate_alerts(s, &Rates::default(), &thresholds());
            log.record(&alerts, now).unwrap()
        })
        .collect();

    assert_eq!(written, vec![1, 0, 1, 0, 1]);

    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].ends_with(" - High CPU: 85.0%"));
    assert!(lines[1].ends_with(" - High Memory: 95.0%"));
    assert!(lines[2].ends_with(" - High CPU: 90.0%"));
    assert!(lines[0].starts_with("2024-03-01T12:00:00"));
}

#[test]
fn test_changing_value_is_not_a_new_alert() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("alerts.log");
    let mut log = AlertLog::new(&path);

    for cpu in [81.0, 92.5, 99.9] {
        let alerts = evaluate_alerts(&sample(cpu, 10.0), &Rates::default(), &thresholds());
        log.record(&alerts, Utc::now()).unwrap();
    }

    assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 1);
    let active = log.last_active().get(AlertCategory::Cpu).unwrap();
    assert_eq!(active.message, "High CPU: 99.9%");
}

#[test]
fn test_existing_log_is_appended_to() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("alerts.log");
    fs::write(&path, "earlier line\n").unwrap();

    let mut log = AlertLog::new(&path);
    let alerts = evaluate_alerts(&sample(85.0, 10.0), &Rates::default(), &thresholds());
    log.record(&alerts, Utc::now()).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("earlier line\n"));
    assert_eq!(contents.lines().count(), 2);
}

#[test]
fn test_unwritable_log_counts_failures_and_keeps_going() {
    let temp_dir = TempDir::new().unwrap();
    let mut log = AlertLog::new(temp_dir.path().join("missing").join("alerts.log"));

    let high = evaluate_alerts(&sample(85.0, 10.0), &Rates::default(), &thresholds());
    let clear = evaluate_alerts(&sample(10.0, 10.0), &Rates::default(), &thresholds());

    assert!(log.record(&high, Utc::now()).is_err());
    assert!(log.record(&clear, Utc::now()).is_ok());
    assert!(log.record(&high, Utc::now()).is_err());

    assert_eq!(log.failures(), 2);
    assert!(log.last_error().is_some());
}
