//! Data structures for sampled and derived metrics.

use serde::{Deserialize, Serialize};

/// Zero-padded width of the uptime day count.
pub const UPTIME_DAYS_WIDTH: usize = 3;

/// Zero-padded width of the uptime hour, minute and second fields.
pub const UPTIME_CLOCK_WIDTH: usize = 2;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;

/// A raw snapshot of host counters, taken once per cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    /// Global CPU usage percentage (0.0 to 100.0)
    pub cpu_percent: f32,
    /// Used memory percentage (0.0 to 100.0)
    pub mem_percent: f32,
    /// Free memory as a percentage of total memory (0.0 to 100.0)
    pub mem_avail_percent: f32,
    /// Temperature of the selected sensor in Celsius
    pub cpu_temp_c: f32,
    /// System uptime in seconds
    pub uptime_seconds: u64,
    /// Cumulative bytes transmitted across all interfaces
    pub bytes_sent_total: u64,
    /// Cumulative bytes received across all interfaces
    pub bytes_recv_total: u64,
}

/// Rates and totals computed from two consecutive samples.
///
/// Rates keep the raw signed delta; a counter reset shows up as a negative
/// value. Use [`DerivedMetrics::display_upload_rate`] and
/// [`DerivedMetrics::display_download_rate`] when rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Bytes sent during the interval
    pub upload_rate_bytes_per_interval: i64,
    /// Bytes received during the interval
    pub download_rate_bytes_per_interval: i64,
    /// Upload rate strictly above the activity threshold
    pub upload_active: bool,
    /// Download rate strictly above the activity threshold
    pub download_active: bool,
    /// Total transmitted, in whole megabytes (10^6 bytes)
    pub total_tx_megabytes: u64,
    /// Total received, in whole megabytes (10^6 bytes)
    pub total_rx_megabytes: u64,
}

impl DerivedMetrics {
    /// Upload rate with counter resets clamped to zero.
    pub fn display_upload_rate(&self) -> u64 {
        self.upload_rate_bytes_per_interval.max(0) as u64
    }

    /// Download rate with counter resets clamped to zero.
    pub fn display_download_rate(&self) -> u64 {
        self.download_rate_bytes_per_interval.max(0) as u64
    }
}

/// Uptime split into calendar-style fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UptimeBreakdown {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl UptimeBreakdown {
    pub fn from_seconds(uptime_seconds: u64) -> Self {
        Self {
            days: uptime_seconds / SECONDS_PER_DAY,
            hours: (uptime_seconds % SECONDS_PER_DAY) / SECONDS_PER_HOUR,
            minutes: (uptime_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE,
            seconds: uptime_seconds % SECONDS_PER_MINUTE,
        }
    }

    /// Day count, zero-padded to three digits. Widens past 999 days.
    pub fn days_field(&self) -> String {
        format!("{:0width$}", self.days, width = UPTIME_DAYS_WIDTH)
    }

    pub fn hours_field(&self) -> String {
        format!("{:0width$}", self.hours, width = UPTIME_CLOCK_WIDTH)
    }

    pub fn minutes_field(&self) -> String {
        format!("{:0width$}", self.minutes, width = UPTIME_CLOCK_WIDTH)
    }

    pub fn seconds_field(&self) -> String {
        format!("{:0width$}", self.seconds, width = UPTIME_CLOCK_WIDTH)
    }

    /// `hh:mm:ss`
    pub fn clock(&self) -> String {
        format!(
            "{}:{}:{}",
            self.hours_field(),
            self.minutes_field(),
            self.seconds_field()
        )
    }
}
