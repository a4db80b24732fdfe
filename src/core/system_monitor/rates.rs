//! Rate derivation from cumulative counters.

use chrono::{DateTime, Utc};

use super::metrics::{CounterPair, Rates, Sample};

/// Smallest elapsed time used for a rate, in seconds
pub const MIN_ELAPSED_SECS: f64 = 1e-6;

/// Seconds between two sample times, floored at [`MIN_ELAPSED_SECS`].
///
/// A clock step backwards or two polls inside the clock resolution yields a
/// large but finite rate instead of a division by zero.
pub fn elapsed_seconds(previous: DateTime<Utc>, current: DateTime<Utc>) -> f64 {
    let secs = (current - previous)
        .num_microseconds()
        .map(|us| us as f64 / 1_000_000.0)
        .unwrap_or_else(|| (current - previous).num_milliseconds() as f64 / 1000.0);
    secs.max(MIN_ELAPSED_SECS)
}

/// Per-second rate for one counter. Counter resets clamp to zero.
pub fn rate_per_sec(previous: u64, current: u64, elapsed_secs: f64) -> f64 {
    current.saturating_sub(previous) as f64 / elapsed_secs.max(MIN_ELAPSED_SECS)
}

/// Rates for both counters of a pair
pub fn compute_rate(
    previous: CounterPair,
    previous_time: DateTime<Utc>,
    current: CounterPair,
    current_time: DateTime<Utc>,
) -> (f64, f64) {
    let elapsed = elapsed_seconds(previous_time, current_time);
    (
        rate_per_sec(previous.a, current.a, elapsed),
        rate_per_sec(previous.b, current.b, elapsed),
    )
}

/// Previous sample kept by the refresh loop between cycles
#[derive(Debug, Clone)]
pub struct RateState {
    previous: Sample,
}

impl RateState {
    /// Seed from the baseline poll taken before the loop starts
    pub fn new(baseline: Sample) -> Self {
        Self { previous: baseline }
    }

    pub fn previous(&self) -> &Sample {
        &self.previous
    }

    /// Derive rates against the previous sample, then make `current` the new
    /// baseline.
    pub fn advance(&mut self, current: &Sample) -> Rates {
        let rates = rates_between(&self.previous, current);
        self.previous = current.clone();
        rates
    }
}

/// Disk and network rates between two samples
pub fn rates_between(previous: &Sample, current: &Sample) -> Rates {
    let (disk_read_bps, disk_write_bps) = compute_rate(
        previous.disk_counters(),
        previous.timestamp,
        current.disk_counters(),
        current.timestamp,
    );
    let (net_up_bps, net_down_bps) = compute_rate(
        previous.net_counters(),
        previous.timestamp,
        current.net_counters(),
        current.timestamp,
    );

    Rates {
        disk_read_bps,
        disk_write_bps,
        net_up_bps,
        net_down_bps,
    }
}
