//! The sample → derive → format → send cycle.
//!
//! Each cycle waits on the metrics provider, whose CPU measurement window
//! is the only pacing: there is no independent timer, so the period is the
//! window plus the (small) cost of deriving, formatting and sending, and it
//! drifts by that much.
//!
//! The first successful sample only warms up the loop; the first frame is
//! sent once a second sample exists to derive rates from.
//!
//! A skipped cycle is followed by a retry pause, so a provider that fails
//! without waiting cannot starve the shutdown signal.

use crate::display::{self, DisplayFrame, LayoutVersion};
use crate::error::Result;
use crate::metrics::{derive, MetricsProvider, RawSample};
use crate::transport::{PortOpener, SerialTransport, Session};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

/// State carried from one cycle to the next.
#[derive(Debug, Default)]
pub struct LoopState {
    /// Sample of the last successful cycle
    pub prev: Option<RawSample>,
    /// Open display session, absent after a failed reopen
    pub session: Option<Session>,
}

/// What happened during one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// First sample stored; nothing sent.
    WarmedUp,
    /// Frame written on the existing session.
    Sent,
    /// Frame written after the session was reopened.
    SentAfterReopen,
    /// Sampling failed transiently; `prev` kept, nothing sent.
    Skipped,
    /// Frame dropped because the device could not be reached.
    Dropped,
}

/// Orchestrates sampling, rendering and delivery.
pub struct SampleLoop<P, O> {
    provider: P,
    transport: SerialTransport<O>,
    layout: LayoutVersion,
    threshold_bytes: u64,
    retry_delay: Duration,
    state: LoopState,
}

impl<P, O> SampleLoop<P, O>
where
    P: MetricsProvider,
    O: PortOpener,
{
    /// Open the display link and prepare the loop.
    ///
    /// Failing to open the device here is fatal.
    pub fn start(
        provider: P,
        mut transport: SerialTransport<O>,
        layout: LayoutVersion,
        threshold_bytes: u64,
    ) -> Result<Self> {
        let session = transport.open_clean()?;
        Ok(Self {
            provider,
            transport,
            layout,
            threshold_bytes,
            retry_delay: Duration::from_millis(crate::MEASUREMENT_WINDOW_MS),
            state: LoopState {
                prev: None,
                session: Some(session),
            },
        })
    }

    /// Pause after a skipped cycle before sampling again.
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn state(&self) -> &LoopState {
        &self.state
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Run one cycle.
    ///
    /// Only fatal errors are returned; everything recoverable is reported
    /// through the outcome.
    pub async fn cycle(&mut self) -> Result<CycleOutcome> {
        let curr = match self.provider.sample().await {
            Ok(sample) => sample,
            Err(err) if !err.is_fatal() => {
                warn!("Skipping display update: {}", err);
                return Ok(CycleOutcome::Skipped);
            }
            Err(err) => return Err(err),
        };

        let Some(prev) = self.state.prev.replace(curr.clone()) else {
            debug!("First sample stored, waiting for a second before display");
            return Ok(CycleOutcome::WarmedUp);
        };

        let derived = derive(&prev, &curr, self.threshold_bytes);
        let frame = display::format(&curr, &derived, self.layout);
        let overflow = frame.overflowing_lines();
        if !overflow.is_empty() {
            warn!("Frame lines {:?} are wider than the display", overflow);
        }

        let outcome = self.deliver(&frame);
        debug!(
            "Cycle done: {:?} (up {} B, down {} B)",
            outcome,
            derived.display_upload_rate(),
            derived.display_download_rate()
        );
        Ok(outcome)
    }

    /// Send `frame`, reopening once if the session is missing or the write
    /// fails. At most one payload reaches the device per call.
    fn deliver(&mut self, frame: &DisplayFrame) -> CycleOutcome {
        if let Some(session) = self.state.session.as_mut() {
            match self.transport.send(session, frame) {
                Ok(()) => return CycleOutcome::Sent,
                Err(err) => warn!("Display write failed, reopening: {}", err),
            }
            if let Some(stale) = self.state.session.take() {
                self.transport.close(stale);
            }
        }

        let mut session = match self.transport.open() {
            Ok(session) => session,
            Err(err) => {
                warn!("Dropping frame: {}", err);
                return CycleOutcome::Dropped;
            }
        };

        match self.transport.send(&mut session, frame) {
            Ok(()) => {
                info!("Display link re-established on {}", session.device());
                self.state.session = Some(session);
                CycleOutcome::SentAfterReopen
            }
            Err(err) => {
                warn!("Dropping frame after reopen: {}", err);
                self.transport.close(session);
                CycleOutcome::Dropped
            }
        }
    }

    /// Cycle until `shutdown` resolves or a fatal error occurs, then close
    /// the display session.
    pub async fn run_until<F>(mut self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        let result = loop {
            let outcome = tokio::select! {
                _ = &mut shutdown => None,
                outcome = self.cycle() => Some(outcome),
            };

            match outcome {
                None => {
                    info!("Shutdown requested");
                    break Ok(());
                }
                Some(Ok(CycleOutcome::Skipped)) => {
                    let interrupted = tokio::select! {
                        _ = &mut shutdown => true,
                        _ = tokio::time::sleep(self.retry_delay) => false,
                    };
                    if interrupted {
                        info!("Shutdown requested");
                        break Ok(());
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(err)) => break Err(err),
            }
        };

        self.close();
        result
    }

    /// Close the display session, if one is open.
    pub fn close(&mut self) {
        if let Some(session) = self.state.session.take() {
            self.transport.close(session);
        }
    }
}
