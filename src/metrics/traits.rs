//! Traits for host metric acquisition.

use crate::error::Result;
use crate::metrics::data::RawSample;

/// Source of raw host snapshots.
///
/// Implementations are expected to block the caller for their measurement
/// window while reading CPU load; the sample loop relies on that delay as
/// its only pacing mechanism.
pub trait MetricsProvider {
    /// Take one snapshot of host counters.
    ///
    /// Fails with `SensorUnavailable` when a required source is absent and
    /// with `MetricRead` on any other acquisition failure.
    fn sample(&mut self) -> impl std::future::Future<Output = Result<RawSample>> + Send;
}
