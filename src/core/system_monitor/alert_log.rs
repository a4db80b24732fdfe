//! Edge-triggered alert log.
//!
//! Only alerts that became active since the previous cycle are appended, so a
//! condition that stays high produces one line, and a condition that clears
//! and comes back produces a new one.

use chrono::{DateTime, Utc};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::alerts::{Alert, AlertSet};
use crate::error::{Result, SysdashError};
use crate::ui::formatters::utc_timestamp;

/// Append new alerts to `path` and return the baseline for the next cycle.
///
/// The baseline is always `current`, whether or not the write succeeded.
pub fn log_new_alerts(
    current: &AlertSet,
    previous: &AlertSet,
    path: &Path,
    now: DateTime<Utc>,
) -> (AlertSet, Result<usize>) {
    let fresh: Vec<&Alert> = current.newly_active(previous).collect();
    let outcome = if fresh.is_empty() {
        Ok(0)
    } else {
        append_alerts(path, &fresh, now).map(|()| fresh.len())
    };
    (current.clone(), outcome)
}

/// Append one `<timestamp> - <message>` line per alert
pub fn append_alerts(path: &Path, alerts: &[&Alert], now: DateTime<Utc>) -> Result<()> {
    let ts = utc_timestamp(now);
    let mut lines = String::new();
    for alert in alerts {
        lines.push_str(&format!("{} - {}\n", ts, alert.message));
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| SysdashError::alert_log(format!("{}: {}", path.display(), e)))?;
    file.write_all(lines.as_bytes())
        .map_err(|e| SysdashError::alert_log(format!("{}: {}", path.display(), e)))?;
    Ok(())
}

/// Alert log state owned by the refresh loop
#[derive(Debug)]
pub struct AlertLog {
    path: PathBuf,
    last_active: AlertSet,
    failures: u64,
    last_error: Option<String>,
}

impl AlertLog {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            last_active: AlertSet::new(),
            failures: 0,
            last_error: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Log rising edges of `current` and remember it as the new baseline.
    ///
    /// Returns the number of lines written. Write failures are counted and
    /// returned but never panic.
    pub fn record(&mut self, current: &AlertSet, now: DateTime<Utc>) -> Result<usize> {
        let (baseline, outcome) = log_new_alerts(current, &self.last_active, &self.path, now);
        self.last_active = baseline;

        if let Err(ref e) = outcome {
            if self.failures == 0 {
                log::warn!("{}", e);
            }
            self.failures += 1;
            self.last_error = Some(e.to_string());
        }
        outcome
    }

    pub fn last_active(&self) -> &AlertSet {
        &self.last_active
    }

    /// Failed writes since startup
    pub fn failures(&self) -> u64 {
        self.failures
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
