//! Host metric sampling and derived-metric calculation.
//!
//! This module turns the host's raw counters into a [`RawSample`] once per
//! cycle and derives interval rates and transfer totals from consecutive
//! samples.

pub mod collector;
pub mod data;
pub mod derive;
pub mod scripted;
pub mod traits;

// Re-export commonly used items
pub use collector::{SensorReading, SystemSampler};
pub use data::{DerivedMetrics, RawSample, UptimeBreakdown};
pub use derive::derive;
pub use scripted::ScriptedProvider;
pub use traits::MetricsProvider;
