//! System monitoring core functionality.
//!
//! This module turns raw host counters into rates, evaluates them against
//! thresholds and keeps the edge-triggered alert log.

pub mod alert_log;
pub mod alerts;
mod collector;
mod diskstats;
mod metrics;
mod provider;
pub mod rates;
pub mod recorder;

pub use alert_log::{log_new_alerts, AlertLog};
pub use alerts::{evaluate_alerts, Alert, AlertCategory, AlertSet, ThresholdConfig};
pub use collector::MetricsCollector;
pub use metrics::{percent_of, CounterPair, Rates, Sample};
pub use provider::MetricsProvider;
pub use rates::{compute_rate, RateState};
pub use recorder::{CsvLog, Recorder};
