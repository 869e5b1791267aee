//! Rendering of samples into display frames.
//!
//! Every function here is pure: identical inputs give byte-identical
//! frames. Numeric fields have a minimum width and widen on overflow, so a
//! large value pushes later text right instead of losing leading digits.

use crate::display::{
    frame::DisplayFrame,
    layout::{current, legacy, LayoutVersion},
};
use crate::metrics::data::{DerivedMetrics, RawSample, UptimeBreakdown};

/// Render `curr` and `derived` with the chosen layout.
///
/// The legacy layout carries no network information and ignores `derived`.
pub fn format(curr: &RawSample, derived: &DerivedMetrics, layout: LayoutVersion) -> DisplayFrame {
    match layout {
        LayoutVersion::Legacy => format_legacy(curr),
        LayoutVersion::Current => format_current(curr, derived),
    }
}

fn format_legacy(curr: &RawSample) -> DisplayFrame {
    let uptime = UptimeBreakdown::from_seconds(curr.uptime_seconds);

    DisplayFrame::new([
        format!(
            "{}{}{}{}",
            legacy::UPTIME_PREFIX,
            uptime.days_field(),
            legacy::DAYS_SUFFIX,
            uptime.clock()
        ),
        format!("{}{}", legacy::CPU_LABEL, decimal(curr.cpu_percent)),
        format!("{}{}", legacy::MEM_LABEL, decimal(curr.mem_percent)),
        format!(
            "{}{}{}",
            legacy::TEMP_LABEL,
            decimal(curr.cpu_temp_c),
            legacy::TEMP_UNIT
        ),
    ])
}

fn format_current(curr: &RawSample, derived: &DerivedMetrics) -> DisplayFrame {
    let uptime = UptimeBreakdown::from_seconds(curr.uptime_seconds);

    DisplayFrame::new([
        format!(
            "{}{}{}{} {}",
            current::UPTIME_PREFIX,
            uptime.days_field(),
            current::DAYS_SUFFIX,
            uptime.clock(),
            activity_glyphs(derived)
        ),
        current::HEADER.to_string(),
        values_line(curr),
        totals_line(derived),
    ])
}

/// `U|D` activity indicator.
pub fn activity_glyphs(derived: &DerivedMetrics) -> String {
    let upload = if derived.upload_active {
        current::UPLOAD_ACTIVE
    } else {
        current::IDLE
    };
    let download = if derived.download_active {
        current::DOWNLOAD_ACTIVE
    } else {
        current::IDLE
    };
    format!("{upload}{}{download}", current::GLYPH_SEPARATOR)
}

/// CPU%, MEM% and temperature aligned under the header.
pub fn values_line(curr: &RawSample) -> String {
    [curr.cpu_percent, curr.mem_percent, curr.cpu_temp_c]
        .into_iter()
        .map(|value| truncated(value, current::VALUE_WIDTH))
        .collect::<Vec<_>>()
        .join(current::VALUE_GAP)
}

/// `T <tx MB> R <rx MB>`
pub fn totals_line(derived: &DerivedMetrics) -> String {
    format!(
        "{}{:0width$}{}{:0width$}",
        current::TX_LABEL,
        derived.total_tx_megabytes,
        current::RX_LABEL,
        derived.total_rx_megabytes,
        width = current::TOTAL_WIDTH
    )
}

/// Truncate toward zero, then zero-pad to `width`.
fn truncated(value: f32, width: usize) -> String {
    // `as` saturates and maps NaN to 0.
    let whole = value.trunc() as i64;
    format!("{whole:0width$}")
}

fn decimal(value: f32) -> String {
    format!("{value:.prec$}", prec = legacy::DECIMALS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RawSample {
        RawSample {
            cpu_percent: 7.8,
            mem_percent: 45.2,
            mem_avail_percent: 31.0,
            cpu_temp_c: 63.9,
            uptime_seconds: 90061,
            bytes_sent_total: 6_500_000,
            bytes_recv_total: 123_456_789,
        }
    }

    fn derived(upload: i64, download: i64) -> DerivedMetrics {
        DerivedMetrics {
            upload_rate_bytes_per_interval: upload,
            download_rate_bytes_per_interval: download,
            upload_active: upload > 1024,
            download_active: download > 1024,
            total_tx_megabytes: 6,
            total_rx_megabytes: 123,
        }
    }

    #[test]
    fn test_legacy_layout() {
        let frame = format(&sample(), &derived(0, 0), LayoutVersion::Legacy);
        assert_eq!(
            frame.lines(),
            [
                "UP  001D 01:01:01",
                "CPU(%) :   7.8",
                "MEM(%) :   45.2",
                "TEMP   :   63.9 'C",
            ]
        );
        assert!(frame.fits_display());
    }

    #[test]
    fn test_current_layout() {
        let frame = format(&sample(), &derived(1_500_000, 0), LayoutVersion::Current);
        assert_eq!(
            frame.lines(),
            [
                "> 001D 01:01:01 ^|-",
                "CPU%  MEM%  TEMP'c",
                "007   045   063",
                "T 0000006 R 0000123",
            ]
        );
        assert!(frame.fits_display());
    }

    #[test]
    fn test_values_truncate_not_round() {
        let mut curr = sample();
        curr.cpu_percent = 99.99;
        curr.mem_percent = 100.0;
        curr.cpu_temp_c = 0.5;
        assert_eq!(values_line(&curr), "099   100   000");
    }

    #[test]
    fn test_activity_glyphs() {
        assert_eq!(activity_glyphs(&derived(1024, 1024)), "-|-");
        assert_eq!(activity_glyphs(&derived(1025, 0)), "^|-");
        assert_eq!(activity_glyphs(&derived(0, 4096)), "-|v");
        assert_eq!(activity_glyphs(&derived(4096, 4096)), "^|v");
    }

    #[test]
    fn test_totals_widen_instead_of_truncating() {
        let mut wide = derived(0, 0);
        wide.total_tx_megabytes = 12_345_678;
        wide.total_rx_megabytes = 9;
        assert_eq!(totals_line(&wide), "T 12345678 R 0000009");
    }

    #[test]
    fn test_uptime_days_widen() {
        let mut curr = sample();
        curr.uptime_seconds = 1234 * 86_400;
        let frame = format(&curr, &derived(0, 0), LayoutVersion::Current);
        assert_eq!(frame.lines()[0], "> 1234D 00:00:00 -|-");
    }

    #[test]
    fn test_format_is_idempotent() {
        let curr = sample();
        let derived = derived(2048, 0);
        for layout in [LayoutVersion::Legacy, LayoutVersion::Current] {
            assert_eq!(
                format(&curr, &derived, layout).to_wire(),
                format(&curr, &derived, layout).to_wire()
            );
        }
    }
}
