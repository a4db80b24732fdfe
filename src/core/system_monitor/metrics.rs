use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Point-in-time snapshot of host counters.
///
/// Every value shown or derived in one refresh cycle comes from a single
/// `Sample`, so displayed numbers and rates never mix two polls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub cpu_total_percent: f32,
    pub cpu_per_core: Vec<f32>,
    pub mem_used: u64,
    pub mem_total: u64,
    pub mem_available: u64,
    pub mem_percent: f32,
    pub disk_used: u64,
    pub disk_total: u64,
    pub disk_percent: f32,
    /// Cumulative since boot
    pub disk_read_bytes: u64,
    pub disk_write_bytes: u64,
    /// Cumulative read/write operations, where the platform exposes them
    pub disk_read_count: Option<u64>,
    pub disk_write_count: Option<u64>,
    pub net_sent_bytes: u64,
    pub net_recv_bytes: u64,
}

impl Default for Sample {
    fn default() -> Self {
        Self {
            timestamp: DateTime::<Utc>::UNIX_EPOCH,
            cpu_total_percent: 0.0,
            cpu_per_core: Vec::new(),
            mem_used: 0,
            mem_total: 0,
            mem_available: 0,
            mem_percent: 0.0,
            disk_used: 0,
            disk_total: 0,
            disk_percent: 0.0,
            disk_read_bytes: 0,
            disk_write_bytes: 0,
            disk_read_count: None,
            disk_write_count: None,
            net_sent_bytes: 0,
            net_recv_bytes: 0,
        }
    }
}

impl Sample {
    /// Disk (read, write) byte counters
    pub fn disk_counters(&self) -> CounterPair {
        CounterPair::new(self.disk_read_bytes, self.disk_write_bytes)
    }

    /// Network (sent, received) byte counters
    pub fn net_counters(&self) -> CounterPair {
        CounterPair::new(self.net_sent_bytes, self.net_recv_bytes)
    }
}

/// Two cumulative counters sampled at the same instant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterPair {
    pub a: u64,
    pub b: u64,
}

impl CounterPair {
    pub fn new(a: u64, b: u64) -> Self {
        Self { a, b }
    }
}

/// Per-second rates derived from two successive samples
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rates {
    pub disk_read_bps: f64,
    pub disk_write_bps: f64,
    pub net_up_bps: f64,
    pub net_down_bps: f64,
}

/// Percentage of `part` in `total`, 0 when `total` is 0
pub fn percent_of(part: u64, total: u64) -> f32 {
    if total > 0 {
        (part as f64 / total as f64 * 100.0) as f32
    } else {
        0.0
    }
}
