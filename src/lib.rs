//! # Serial LCD Monitor - host telemetry on a character display
//!
//! Samples host telemetry once per cycle (CPU load, memory, temperature,
//! network throughput, uptime), renders it into a 20x4 text frame and pushes
//! it over a serial link to an external character display.
//!
//! ## Pipeline
//!
//! - **Sampling**: [`SystemSampler`] reads the host through sysinfo. Its CPU
//!   measurement window is the loop's clock.
//! - **Deriving**: [`derive`] turns two consecutive samples into interval
//!   rates and cumulative transfer totals.
//! - **Formatting**: [`display::format`] renders a [`DisplayFrame`] in one of
//!   two [`LayoutVersion`]s.
//! - **Sending**: [`SerialTransport`] writes the frame, and [`SampleLoop`]
//!   reopens the link when a write fails.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use serial_lcd_monitor::{MonitorConfig, SampleLoop, SerialOpener, SerialTransport, SystemSampler};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = MonitorConfig::new("/dev/ttyUSB0");
//!     let sampler = SystemSampler::new(&config.sensor_group, config.sensor_index, config.measurement_window());
//!     let transport = SerialTransport::new(SerialOpener, config.transport_settings());
//!     let sample_loop = SampleLoop::start(sampler, transport, config.layout, config.activity_threshold_bytes)?;
//!
//!     sample_loop.run_until(async { let _ = tokio::signal::ctrl_c().await; }).await?;
//!     Ok(())
//! }
//! ```

pub mod display;
pub mod error;
pub mod metrics;
pub mod monitor;
pub mod transport;

// Re-export public API
pub use display::{DisplayFrame, LayoutVersion};
pub use error::{MonitorError, Result};
pub use metrics::{
    derive, DerivedMetrics, MetricsProvider, RawSample, ScriptedProvider, SensorReading,
    SystemSampler, UptimeBreakdown,
};
pub use monitor::{CycleOutcome, LoopState, MonitorConfig, SampleLoop};
pub use transport::{
    FakeLine, FakeOpener, PortOpener, SerialOpener, SerialTransport, Session, TransportSettings,
};

/// The default display device
pub const DEFAULT_DEVICE: &str = "/dev/ttyUSB0";

/// The default serial baud rate
pub const DEFAULT_BAUD: u32 = 115_200;

/// The default serial read timeout in milliseconds
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 1000;

/// The default temperature sensor group
pub const DEFAULT_SENSOR_GROUP: &str = "coretemp";

/// The default sensor index within the group
pub const DEFAULT_SENSOR_INDEX: usize = 0;

/// Bytes per interval above which a transfer counts as active
pub const ACTIVITY_THRESHOLD_BYTES: u64 = 1024;

/// The default CPU measurement window (and cycle period) in milliseconds
pub const MEASUREMENT_WINDOW_MS: u64 = 1000;
