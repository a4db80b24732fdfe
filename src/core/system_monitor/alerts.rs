//! Alert system for monitoring critical conditions.
//!
//! Evaluates a sample and its derived rates against configurable thresholds
//! and produces the set of alerts active in the current cycle.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::metrics::{Rates, Sample};
use crate::error::{Result, SysdashError};
use crate::ui::formatters::format_bytes;

/// Alert thresholds. A metric at or above its threshold is in alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    pub cpu_percent: f64,    // Applies to the aggregate and to every core
    pub memory_percent: f64, // (%)
    pub disk_percent: f64,   // (%)
    /// Upload or download rate; `None` disables network alerts
    #[serde(default)]
    pub net_bytes_per_sec: Option<f64>,
}

impl ThresholdConfig {
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("cpu_percent", Some(self.cpu_percent)),
            ("memory_percent", Some(self.memory_percent)),
            ("disk_percent", Some(self.disk_percent)),
            ("net_bytes_per_sec", self.net_bytes_per_sec),
        ];

        for (name, value) in checks {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(SysdashError::config(format!(
                        "thresholds.{} must be a non-negative number, got {}",
                        name, v
                    )));
                }
            }
        }
        Ok(())
    }
}

/// The condition an alert reports on.
///
/// Alert identity is the condition, not the message text: the message carries
/// the live value, which changes from cycle to cycle while the condition holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AlertCategory {
    Cpu,
    CpuCore(usize),
    Memory,
    Disk,
    Network,
}

/// An individual alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub category: AlertCategory,
    pub message: String,
    pub value: f64,
    pub threshold: f64,
}

/// Alerts active in one cycle, at most one per [`AlertCategory`].
///
/// Iteration order is stable: aggregate CPU, cores by index, memory, disk,
/// network.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertSet {
    alerts: BTreeMap<AlertCategory, Alert>,
}

impl AlertSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, alert: Alert) {
        self.alerts.insert(alert.category, alert);
    }

    pub fn contains(&self, category: AlertCategory) -> bool {
        self.alerts.contains_key(&category)
    }

    pub fn get(&self, category: AlertCategory) -> Option<&Alert> {
        self.alerts.get(&category)
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.values()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.iter().map(|a| a.message.as_str()).collect()
    }

    /// Alerts in `self` whose condition is absent from `previous`
    pub fn newly_active<'a>(&'a self, previous: &'a AlertSet) -> impl Iterator<Item = &'a Alert> {
        self.iter()
            .filter(move |alert| !previous.contains(alert.category))
    }
}

impl FromIterator<Alert> for AlertSet {
    fn from_iter<I: IntoIterator<Item = Alert>>(iter: I) -> Self {
        let mut set = AlertSet::new();
        for alert in iter {
            set.insert(alert);
        }
        set
    }
}

/// Evaluate a sample and its rates and generate alerts
pub fn evaluate_alerts(sample: &Sample, rates: &Rates, config: &ThresholdConfig) -> AlertSet {
    let mut alerts = AlertSet::new();

    // CPU alerts
    let cpu = sample.cpu_total_percent as f64;
    if cpu >= config.cpu_percent {
        alerts.insert(Alert {
            category: AlertCategory::Cpu,
            message: format!("High CPU: {:.1}%", cpu),
            value: cpu,
            threshold: config.cpu_percent,
        });
    }

    // Check for individual hot cores
    for (i, &usage) in sample.cpu_per_core.iter().enumerate() {
        let usage = usage as f64;
        if usage >= config.cpu_percent {
            alerts.insert(Alert {
                category: AlertCategory::CpuCore(i),
                message: format!("High CPU Core {}: {:.1}%", i, usage),
                value: usage,
                threshold: config.cpu_percent,
            });
        }
    }

    // Memory alerts
    let mem = sample.mem_percent as f64;
    if mem >= config.memory_percent {
        alerts.insert(Alert {
            category: AlertCategory::Memory,
            message: format!("High Memory: {:.1}%", mem),
            value: mem,
            threshold: config.memory_percent,
        });
    }

    // Disk alerts
    let disk = sample.disk_percent as f64;
    if disk >= config.disk_percent {
        alerts.insert(Alert {
            category: AlertCategory::Disk,
            message: format!("High Disk: {:.1}%", disk),
            value: disk,
            threshold: config.disk_percent,
        });
    }

    // Network alerts, only when a limit is configured
    if let Some(limit) = config.net_bytes_per_sec {
        let peak = rates.net_up_bps.max(rates.net_down_bps);
        if rates.net_up_bps >= limit || rates.net_down_bps >= limit {
            alerts.insert(Alert {
                category: AlertCategory::Network,
                message: format!(
                    "High Network I/O: up {}/s, down {}/s",
                    format_bytes(rates.net_up_bps),
                    format_bytes(rates.net_down_bps)
                ),
                value: peak,
                threshold: limit,
            });
        }
    }

    alerts
}
