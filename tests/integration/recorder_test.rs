use std::fs;

use chrono::{TimeDelta, Utc};
use sysdash::core::system_monitor::recorder::CSV_HEADERS;
use sysdash::core::system_monitor::{AlertLog, CsvLog, Recorder, Sample, ThresholdConfig};
use tempfile::TempDir;

fn thresholds() -> ThresholdConfig {
    ThresholdConfig {
        cpu_percent: 80.0,
        memory_percent: 90.0,
        disk_percent: 95.0,
        net_bytes_per_sec: Some(1000.0),
    }
}

#[test]
fn test_recorder_writes_rows_and_alerts() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("metrics_log.csv");
    let alert_path = temp_dir.path().join("alerts.log");

    let baseline = Sample::default();
    let mut recorder = Recorder::new(
        baseline.clone(),
        CsvLog::open(&csv_path).unwrap(),
        AlertLog::new(&alert_path),
        thresholds(),
    );

    let busy = Sample {
        timestamp: baseline.timestamp + TimeDelta::seconds(5),
        cpu_total_percent: 92.0,
        net_sent_bytes: 10_000,
        ..Default::default()
    };
    let fresh = recorder.record(&busy, Utc::now()).unwrap();
    let categories: Vec<String> = fresh.iter().map(|a| a.message.clone()).collect();
    assert_eq!(fresh.len(), 2);
    assert!(categories[0].starts_with("High CPU"));
    assert!(categories[1].starts_with("High Network I/O"));

    let again = Sample {
        timestamp: busy.timestamp + TimeDelta::seconds(5),
        ..busy.clone()
    };
    assert!(recorder.record(&again, Utc::now()).unwrap().is_empty());

    let csv = fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], CSV_HEADERS.join(","));
    // 10_000 bytes over 5 s
    assert!(lines[1].ends_with(",2000.0"));
    // no traffic in the second interval
    assert!(lines[2].ends_with(",0.0"));

    assert_eq!(fs::read_to_string(&alert_path).unwrap().lines().count(), 2);
}

#[test]
fn test_reopening_keeps_single_header() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("metrics_log.csv");

    for _ in 0..2 {
        let mut recorder = Recorder::new(
            Sample::default(),
            CsvLog::open(&csv_path).unwrap(),
            AlertLog::new(temp_dir.path().join("alerts.log")),
            thresholds(),
        );
        recorder.record(&Sample::default(), Utc::now()).unwrap();
    }

    let csv = fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv.lines().count(), 3);
    assert_eq!(csv.lines().filter(|l| l.starts_with("ts,")).count(), 1);
}
