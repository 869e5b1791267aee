//! Scripted display link used in tests.

use super::{PortOpener, TransportSettings};
use crate::error::{MonitorError, Result};
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct LineState {
    opens: usize,
    failing_opens: usize,
    failing_writes: usize,
    writes: Vec<String>,
}

/// Shared record of everything a fake display link saw.
///
/// Clones observe the same line, so a test can keep one handle while the
/// transport owns the opener.
#[derive(Debug, Clone, Default)]
pub struct FakeLine {
    state: Arc<Mutex<LineState>>,
}

impl FakeLine {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, LineState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Make the next `count` open attempts fail.
    pub fn fail_next_opens(&self, count: usize) {
        self.state().failing_opens = count;
    }

    /// Make the next `count` writes fail.
    pub fn fail_next_writes(&self, count: usize) {
        self.state().failing_writes = count;
    }

    /// Successful open attempts.
    pub fn opens(&self) -> usize {
        self.state().opens
    }

    /// Payloads that reached the display, in order.
    pub fn writes(&self) -> Vec<String> {
        self.state().writes.clone()
    }
}

/// Scripted stand-in for a serial device, used in tests.
#[derive(Debug, Clone, Default)]
pub struct FakeOpener {
    line: FakeLine,
}

impl FakeOpener {
    pub fn new(line: FakeLine) -> Self {
        Self { line }
    }
}

impl PortOpener for FakeOpener {
    fn open(&mut self, settings: &TransportSettings) -> Result<Box<dyn Write + Send>> {
        let mut state = self.line.state();
        if state.failing_opens > 0 {
            state.failing_opens -= 1;
            return Err(MonitorError::transport_unavailable(format!(
                "{}: scripted open failure",
                settings.device
            )));
        }
        state.opens += 1;
        Ok(Box::new(FakePort {
            line: self.line.clone(),
        }))
    }
}

struct FakePort {
    line: FakeLine,
}

impl Write for FakePort {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.line.state();
        if state.failing_writes > 0 {
            state.failing_writes -= 1;
            return Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "scripted write failure",
            ));
        }
        state.writes.push(String::from_utf8_lossy(buf).into_owned());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn settings() -> TransportSettings {
        TransportSettings {
            device: "/dev/ttyFAKE0".to_string(),
            baud: 9_600,
            timeout: Duration::from_millis(10),
        }
    }

    #[test]
    fn test_fake_line_scripts_opens_and_writes() {
        let line = FakeLine::new();
        line.fail_next_opens(1);
        line.fail_next_writes(1);

        let mut opener = FakeOpener::new(line.clone());
        assert!(opener.open(&settings()).is_err());

        let mut port = opener.open(&settings()).unwrap();
        assert!(port.write_all(b"dropped").is_err());
        port.write_all(b"kept").unwrap();

        assert_eq!(line.opens(), 1);
        assert_eq!(line.writes(), vec!["kept".to_string()]);
    }
}
