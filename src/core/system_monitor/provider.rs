use super::metrics::Sample;
use crate::error::Result;

/// Trait for host metrics providers
///
/// One call returns one consistent snapshot. Implementations must be cheap to
/// call repeatedly; the refresh loop calls `sample` once per cycle.
pub trait MetricsProvider {
    /// Collect a point-in-time snapshot of host counters
    fn sample(&mut self) -> Result<Sample>;
}

impl<P: MetricsProvider + ?Sized> MetricsProvider for Box<P> {
    fn sample(&mut self) -> Result<Sample> {
        (**self).sample()
    }
}
