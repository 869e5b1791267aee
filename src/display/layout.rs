//! Layout versions and their field geometry.

use crate::error::MonitorError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Character columns on the display.
pub const DISPLAY_COLS: usize = 20;

/// Character rows on the display.
pub const DISPLAY_ROWS: usize = 4;

/// Which fields appear in a frame and how they are arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutVersion {
    /// Uptime, CPU, memory and temperature as labelled decimals.
    Legacy,
    /// Uptime with transfer activity glyphs, a compact values grid and
    /// cumulative transfer totals.
    Current,
}

impl Default for LayoutVersion {
    fn default() -> Self {
        Self::Current
    }
}

impl LayoutVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Current => "current",
        }
    }
}

impl fmt::Display for LayoutVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutVersion {
    type Err = MonitorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" | "a" => Ok(Self::Legacy),
            "current" | "b" => Ok(Self::Current),
            other => Err(MonitorError::config_error(format!(
                "unknown layout '{other}' (expected 'legacy' or 'current')"
            ))),
        }
    }
}

/// Field geometry of the legacy layout.
pub mod legacy {
    pub const UPTIME_PREFIX: &str = "UP  ";
    pub const DAYS_SUFFIX: &str = "D ";
    pub const CPU_LABEL: &str = "CPU(%) :   ";
    pub const MEM_LABEL: &str = "MEM(%) :   ";
    pub const TEMP_LABEL: &str = "TEMP   :   ";
    pub const TEMP_UNIT: &str = " 'C";
    /// Decimal places for every numeric field.
    pub const DECIMALS: usize = 1;
}

/// Field geometry of the current layout.
pub mod current {
    pub const UPTIME_PREFIX: &str = "> ";
    pub const DAYS_SUFFIX: &str = "D ";
    pub const HEADER: &str = "CPU%  MEM%  TEMP'c";
    /// Zero-padded width of each value under the header.
    pub const VALUE_WIDTH: usize = 3;
    /// Spacing between values, aligning them with the header columns.
    pub const VALUE_GAP: &str = "   ";
    pub const TX_LABEL: &str = "T ";
    pub const RX_LABEL: &str = " R ";
    /// Zero-padded width of each transfer total in megabytes.
    pub const TOTAL_WIDTH: usize = 7;
    pub const UPLOAD_ACTIVE: char = '^';
    pub const DOWNLOAD_ACTIVE: char = 'v';
    pub const IDLE: char = '-';
    pub const GLYPH_SEPARATOR: char = '|';
}
