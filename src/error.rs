//! Error handling for the serial LCD monitor.

/// A specialized `Result` type for monitor operations.
pub type Result<T> = std::result::Result<T, MonitorError>;

/// The main error type for sampling, rendering and transport operations.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// A required metric source (e.g. a named temperature sensor) is absent
    #[error("Sensor unavailable: {0}")]
    SensorUnavailable(String),

    /// Transient failure while acquiring a metric
    #[error("Failed to read metric: {0}")]
    MetricRead(String),

    /// The display device could not be opened
    #[error("Transport unavailable: {0}")]
    TransportUnavailable(String),

    /// Writing a frame to the display device failed
    #[error("Transport write failed: {0}")]
    TransportWrite(#[source] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl MonitorError {
    /// Create a new sensor-unavailable error
    pub fn sensor_unavailable(msg: impl Into<String>) -> Self {
        Self::SensorUnavailable(msg.into())
    }

    /// Create a new metric read error
    pub fn metric_read(msg: impl Into<String>) -> Self {
        Self::MetricRead(msg.into())
    }

    /// Create a new transport-unavailable error
    pub fn transport_unavailable(msg: impl Into<String>) -> Self {
        Self::TransportUnavailable(msg.into())
    }

    /// Create a new configuration error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the process cannot continue after this error.
    ///
    /// `TransportUnavailable` is reported as fatal here because it is only
    /// surfaced to callers at startup; mid-run reopen failures are absorbed
    /// by the sample loop.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::SensorUnavailable(_) | Self::Config(_) | Self::TransportUnavailable(_) => true,
            Self::MetricRead(_) | Self::TransportWrite(_) => false,
        }
    }
}
