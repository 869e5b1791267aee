//! Connection to the display device.
//!
//! [`SerialTransport`] owns how the device is opened; a [`Session`] is one
//! open handle. `send` never retries on its own: reopen policy belongs to
//! the sample loop.

pub mod fake;
pub mod serial;

pub use fake::{FakeLine, FakeOpener};
pub use serial::SerialOpener;

use crate::display::DisplayFrame;
use crate::error::{MonitorError, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::time::Duration;
use tracing::{debug, info};

/// Where and how to open the display device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportSettings {
    /// Device path (e.g. "/dev/ttyUSB0")
    pub device: String,
    /// Baud rate
    pub baud: u32,
    /// Read timeout; the read path is unused but configured on the port
    pub timeout: Duration,
}

/// Opens raw byte sinks for a device.
pub trait PortOpener {
    fn open(&mut self, settings: &TransportSettings) -> Result<Box<dyn Write + Send>>;
}

/// An open connection to the display device.
pub struct Session {
    device: String,
    port: Box<dyn Write + Send>,
}

impl Session {
    pub fn device(&self) -> &str {
        &self.device
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("device", &self.device)
            .finish_non_exhaustive()
    }
}

/// Frame transport over a serial link.
pub struct SerialTransport<O> {
    opener: O,
    settings: TransportSettings,
}

impl<O: PortOpener> SerialTransport<O> {
    pub fn new(opener: O, settings: TransportSettings) -> Self {
        Self { opener, settings }
    }

    pub fn settings(&self) -> &TransportSettings {
        &self.settings
    }

    /// Open a session on the configured device.
    pub fn open(&mut self) -> Result<Session> {
        let port = self.opener.open(&self.settings)?;
        debug!(
            "Opened {} at {} baud",
            self.settings.device, self.settings.baud
        );
        Ok(Session {
            device: self.settings.device.clone(),
            port,
        })
    }

    /// Open, close, then open again to discard half-open state left behind
    /// by a previous run.
    pub fn open_clean(&mut self) -> Result<Session> {
        let stale = self.open()?;
        self.close(stale);
        let session = self.open()?;
        info!("Display link ready on {}", session.device);
        Ok(session)
    }

    /// Write `frame` as a single payload.
    pub fn send(&self, session: &mut Session, frame: &DisplayFrame) -> Result<()> {
        let payload = frame.to_wire();
        session
            .port
            .write_all(&payload)
            .and_then(|_| session.port.flush())
            .map_err(MonitorError::TransportWrite)
    }

    /// Flush and release a session.
    pub fn close(&self, mut session: Session) {
        if let Err(err) = session.port.flush() {
            debug!("Flush on close of {} failed: {}", session.device, err);
        }
        debug!("Closed {}", session.device);
    }
}
