//! Scripted metrics provider for driving the sample loop without a host.

use crate::error::{MonitorError, Result};
use crate::metrics::data::RawSample;
use crate::metrics::traits::MetricsProvider;
use std::collections::VecDeque;

/// Provider that replays a fixed script of samples and failures.
///
/// Used to drive the sample loop without touching the host. Once the
/// script runs out every call fails with `MetricRead`.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    script: VecDeque<Result<RawSample>>,
    calls: usize,
}

impl ScriptedProvider {
    pub fn new(script: Vec<Result<RawSample>>) -> Self {
        Self {
            script: script.into(),
            calls: 0,
        }
    }

    /// Number of `sample` calls made so far.
    pub fn calls(&self) -> usize {
        self.calls
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl MetricsProvider for ScriptedProvider {
    async fn sample(&mut self) -> Result<RawSample> {
        self.calls += 1;
        self.script
            .pop_front()
            .unwrap_or_else(|| Err(MonitorError::metric_read("sample script exhausted")))
    }
}
