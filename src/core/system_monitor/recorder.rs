//! Headless metrics recorder.
//!
//! Appends one CSV row per sample to a flat file and edge-logs alerts, for
//! long unattended sessions where the dashboard is not running.

use chrono::{DateTime, Utc};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::alert_log::AlertLog;
use super::alerts::{evaluate_alerts, Alert, ThresholdConfig};
use super::metrics::{Rates, Sample};
use super::rates::RateState;
use crate::error::Result;
use crate::ui::formatters::utc_timestamp;

pub const CSV_HEADERS: [&str; 17] = [
    "ts",
    "cpu_percent",
    "cpu_percore",
    "mem_total",
    "mem_used",
    "mem_available",
    "mem_percent",
    "disk_total",
    "disk_used",
    "disk_percent",
    "disk_read_count",
    "disk_write_count",
    "disk_read_bytes",
    "disk_write_bytes",
    "net_bytes_sent",
    "net_bytes_recv",
    "net_bytes_per_sec",
];

/// Quote a field when it contains a separator, quote or newline
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn optional(value: Option<u64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Render one CSV line (without trailing newline) for a sample.
///
/// `net_bytes_per_sec` is the combined upload and download rate.
pub fn csv_row(sample: &Sample, rates: &Rates) -> Result<String> {
    let per_core = serde_json::to_string(&sample.cpu_per_core)?;
    let fields = [
        utc_timestamp(sample.timestamp),
        sample.cpu_total_percent.to_string(),
        per_core,
        sample.mem_total.to_string(),
        sample.mem_used.to_string(),
        sample.mem_available.to_string(),
        sample.mem_percent.to_string(),
        sample.disk_total.to_string(),
        sample.disk_used.to_string(),
        sample.disk_percent.to_string(),
        optional(sample.disk_read_count),
        optional(sample.disk_write_count),
        sample.disk_read_bytes.to_string(),
        sample.disk_write_bytes.to_string(),
        sample.net_sent_bytes.to_string(),
        sample.net_recv_bytes.to_string(),
        format!("{:.1}", rates.net_up_bps + rates.net_down_bps),
    ];

    Ok(fields
        .iter()
        .map(|f| csv_field(f))
        .collect::<Vec<_>>()
        .join(","))
}

/// Append-only CSV file with a header row
#[derive(Debug)]
pub struct CsvLog {
    path: PathBuf,
}

impl CsvLog {
    /// Open `path`, writing the header row if the file does not exist yet
    pub fn open<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            let mut file = File::create(&path)?;
            writeln!(file, "{}", CSV_HEADERS.join(","))?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, sample: &Sample, rates: &Rates) -> Result<()> {
        let row = csv_row(sample, rates)?;
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        writeln!(file, "{}", row)?;
        Ok(())
    }
}

/// Per-interval state of the recorder
pub struct Recorder {
    rates: RateState,
    csv: CsvLog,
    alert_log: AlertLog,
    thresholds: ThresholdConfig,
}

impl Recorder {
    pub fn new(
        baseline: Sample,
        csv: CsvLog,
        alert_log: AlertLog,
        thresholds: ThresholdConfig,
    ) -> Self {
        Self {
            rates: RateState::new(baseline),
            csv,
            alert_log,
            thresholds,
        }
    }

    /// Record one sample and return the alerts that became active with it.
    ///
    /// A failed CSV append is an error; a failed alert-log append is not,
    /// it is counted by the alert log.
    pub fn record(&mut self, sample: &Sample, now: DateTime<Utc>) -> Result<Vec<Alert>> {
        let rates = self.rates.advance(sample);
        self.csv.append(sample, &rates)?;

        let alerts = evaluate_alerts(sample, &rates, &self.thresholds);
        let fresh: Vec<Alert> = alerts
            .newly_active(self.alert_log.last_active())
            .cloned()
            .collect();
        let _ = self.alert_log.record(&alerts, now);
        Ok(fresh)
    }

    pub fn alert_log(&self) -> &AlertLog {
        &self.alert_log
    }
}
