//! Monitor configuration.

use crate::display::LayoutVersion;
use crate::error::{MonitorError, Result};
use crate::transport::TransportSettings;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the sampling-to-display pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Serial device path of the display
    pub device: String,
    /// Serial baud rate
    pub baud: u32,
    /// Serial read timeout in milliseconds
    pub read_timeout_ms: u64,
    /// Frame layout sent to the display
    pub layout: LayoutVersion,
    /// Temperature sensor group name (label prefix)
    pub sensor_group: String,
    /// Index of the sensor within its group
    pub sensor_index: usize,
    /// Bytes per interval above which a transfer counts as active
    pub activity_threshold_bytes: u64,
    /// CPU measurement window in milliseconds; also the cycle period
    pub measurement_window_ms: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            device: crate::DEFAULT_DEVICE.to_string(),
            baud: crate::DEFAULT_BAUD,
            read_timeout_ms: crate::DEFAULT_READ_TIMEOUT_MS,
            layout: LayoutVersion::default(),
            sensor_group: crate::DEFAULT_SENSOR_GROUP.to_string(),
            sensor_index: crate::DEFAULT_SENSOR_INDEX,
            activity_threshold_bytes: crate::ACTIVITY_THRESHOLD_BYTES,
            measurement_window_ms: crate::MEASUREMENT_WINDOW_MS,
        }
    }
}

impl MonitorConfig {
    /// Create a configuration for `device` with default settings otherwise.
    pub fn new(device: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            ..Default::default()
        }
    }

    pub fn with_baud(mut self, baud: u32) -> Self {
        self.baud = baud;
        self
    }

    pub fn with_layout(mut self, layout: LayoutVersion) -> Self {
        self.layout = layout;
        self
    }

    /// Select the temperature sensor by group name and index.
    pub fn with_sensor(mut self, group: impl Into<String>, index: usize) -> Self {
        self.sensor_group = group.into();
        self.sensor_index = index;
        self
    }

    pub fn with_activity_threshold(mut self, bytes: u64) -> Self {
        self.activity_threshold_bytes = bytes;
        self
    }

    pub fn with_measurement_window_ms(mut self, window_ms: u64) -> Self {
        self.measurement_window_ms = window_ms;
        self
    }

    pub fn measurement_window(&self) -> Duration {
        Duration::from_millis(self.measurement_window_ms)
    }

    pub fn transport_settings(&self) -> TransportSettings {
        TransportSettings {
            device: self.device.clone(),
            baud: self.baud,
            timeout: Duration::from_millis(self.read_timeout_ms),
        }
    }

    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.device.trim().is_empty() {
            return Err(MonitorError::config_error("device path is empty"));
        }
        if self.baud == 0 {
            return Err(MonitorError::config_error("baud rate must be positive"));
        }
        if self.sensor_group.trim().is_empty() {
            return Err(MonitorError::config_error("sensor group is empty"));
        }
        if self.measurement_window_ms == 0 {
            return Err(MonitorError::config_error(
                "measurement window must be positive",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MonitorConfig::default();
        assert_eq!(config.device, "/dev/ttyUSB0");
        assert_eq!(config.baud, 115_200);
        assert_eq!(config.layout, LayoutVersion::Current);
        assert_eq!(config.sensor_group, "coretemp");
        assert_eq!(config.sensor_index, 0);
        assert_eq!(config.activity_threshold_bytes, 1024);
        assert_eq!(config.measurement_window(), Duration::from_secs(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_transport_settings() {
        let settings = MonitorConfig::new("/dev/ttyACM0")
            .with_baud(57_600)
            .transport_settings();
        assert_eq!(settings.device, "/dev/ttyACM0");
        assert_eq!(settings.baud, 57_600);
        assert_eq!(settings.timeout, Duration::from_secs(1));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(MonitorConfig::new("").validate().is_err());
        assert!(MonitorConfig::default().with_baud(0).validate().is_err());
        assert!(MonitorConfig::default()
            .with_sensor(" ", 0)
            .validate()
            .is_err());
        assert!(MonitorConfig::default()
            .with_measurement_window_ms(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_serializes_layout_lowercase() {
        let json = serde_json::to_string(&MonitorConfig::default()).unwrap();
        assert!(json.contains("\"layout\":\"current\""));
    }
}
