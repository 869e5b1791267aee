//! Rates and cumulative totals from two consecutive samples.

use crate::metrics::data::{DerivedMetrics, RawSample};

/// Bytes per megabyte for the transfer totals (decimal, 10^6).
pub const BYTES_PER_MEGABYTE: u64 = 1_000_000;

/// Derive interval rates and totals from `prev` and `curr`.
///
/// Negative deltas (counter resets) are passed through unchanged in the
/// rate fields. Activity flags compare the clamped rate against
/// `threshold_bytes` with a strict `>`.
pub fn derive(prev: &RawSample, curr: &RawSample, threshold_bytes: u64) -> DerivedMetrics {
    let upload = counter_delta(prev.bytes_sent_total, curr.bytes_sent_total);
    let download = counter_delta(prev.bytes_recv_total, curr.bytes_recv_total);

    DerivedMetrics {
        upload_rate_bytes_per_interval: upload,
        download_rate_bytes_per_interval: download,
        upload_active: is_active(upload, threshold_bytes),
        download_active: is_active(download, threshold_bytes),
        total_tx_megabytes: curr.bytes_sent_total / BYTES_PER_MEGABYTE,
        total_rx_megabytes: curr.bytes_recv_total / BYTES_PER_MEGABYTE,
    }
}

fn counter_delta(prev: u64, curr: u64) -> i64 {
    let magnitude = |d: u64| d.min(i64::MAX as u64) as i64;
    if curr >= prev {
        magnitude(curr - prev)
    } else {
        -magnitude(prev - curr)
    }
}

fn is_active(rate: i64, threshold_bytes: u64) -> bool {
    rate.max(0) as u64 > threshold_bytes
}
