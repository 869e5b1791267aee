//! Serial device opener.

use super::{PortOpener, TransportSettings};
use crate::error::{MonitorError, Result};
use std::io::Write;

/// Opens the display device through the `serialport` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct SerialOpener;

impl PortOpener for SerialOpener {
    fn open(&mut self, settings: &TransportSettings) -> Result<Box<dyn Write + Send>> {
        let port = serialport::new(settings.device.as_str(), settings.baud)
            .timeout(settings.timeout)
            .open()
            .map_err(|err| {
                MonitorError::transport_unavailable(format!("{}: {}", settings.device, err))
            })?;
        Ok(Box::new(port))
    }
}
