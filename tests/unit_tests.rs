use serial_lcd_monitor::{
    derive, display, CycleOutcome, DerivedMetrics, FakeLine, FakeOpener, LayoutVersion,
    MonitorConfig, MonitorError, RawSample, SampleLoop, ScriptedProvider, SerialTransport,
    UptimeBreakdown, ACTIVITY_THRESHOLD_BYTES,
};

fn sample(cpu: f32, mem: f32, temp: f32, uptime: u64, sent: u64, recv: u64) -> RawSample {
    RawSample {
        cpu_percent: cpu,
        mem_percent: mem,
        mem_avail_percent: 100.0 - mem,
        cpu_temp_c: temp,
        uptime_seconds: uptime,
        bytes_sent_total: sent,
        bytes_recv_total: recv,
    }
}

fn fake_loop(
    script: Vec<Result<RawSample, MonitorError>>,
    layout: LayoutVersion,
    line: &FakeLine,
) -> SampleLoop<ScriptedProvider, FakeOpener> {
    let config = MonitorConfig::new("/dev/ttyFAKE0").with_layout(layout);
    let transport = SerialTransport::new(FakeOpener::new(line.clone()), config.transport_settings());
    SampleLoop::start(
        ScriptedProvider::new(script),
        transport,
        config.layout,
        config.activity_threshold_bytes,
    )
    .expect("fake transport should open")
}

/// Rates are never negative once clamped, and totals floor to whole megabytes
#[test]
fn test_derived_rates_and_totals() {
    let pairs = [
        ((0, 0), (0, 0)),
        ((1_000, 2_000), (3_500, 2_000)),
        ((9_000_000, 4_000_000), (1_000, 3_999_999)),
        ((0, 0), (1_999_999, 2_000_000)),
    ];

    for ((sent0, recv0), (sent1, recv1)) in pairs {
        let prev = sample(0.0, 0.0, 40.0, 0, sent0, recv0);
        let curr = sample(0.0, 0.0, 40.0, 1, sent1, recv1);
        let derived = derive(&prev, &curr, ACTIVITY_THRESHOLD_BYTES);

        assert_eq!(derived.display_upload_rate(), sent1.saturating_sub(sent0));
        assert_eq!(derived.display_download_rate(), recv1.saturating_sub(recv0));
        assert_eq!(derived.total_tx_megabytes, sent1 / 1_000_000);
        assert_eq!(derived.total_rx_megabytes, recv1 / 1_000_000);
    }
}

/// 1 day, 1 hour, 1 minute and 1 second
#[test]
fn test_uptime_breakdown_fields() {
    let uptime = UptimeBreakdown::from_seconds(90061);
    assert_eq!(uptime.days_field(), "001");
    assert_eq!(uptime.hours_field(), "01");
    assert_eq!(uptime.minutes_field(), "01");
    assert_eq!(uptime.seconds_field(), "01");
}

/// Values truncate toward zero before padding
#[test]
fn test_current_layout_values_line() {
    let curr = sample(7.8, 45.2, 63.9, 0, 0, 0);
    let derived = derive(&curr, &curr, ACTIVITY_THRESHOLD_BYTES);
    let frame = display::format(&curr, &derived, LayoutVersion::Current);
    assert_eq!(frame.lines()[2], "007   045   063");
}

/// Upload glyph uses a strict threshold
#[test]
fn test_upload_glyph_threshold() {
    let prev = sample(0.0, 0.0, 40.0, 0, 0, 0);

    let idle = derive(&prev, &sample(0.0, 0.0, 40.0, 0, 1024, 0), 1024);
    let frame = display::format(&prev, &idle, LayoutVersion::Current);
    assert!(frame.lines()[0].ends_with("-|-"));

    let busy = derive(&prev, &sample(0.0, 0.0, 40.0, 0, 1025, 0), 1024);
    let frame = display::format(&prev, &busy, LayoutVersion::Current);
    assert!(frame.lines()[0].ends_with("^|-"));
}

/// Formatting twice gives byte-identical frames
#[test]
fn test_format_idempotence() {
    let curr = sample(33.3, 66.6, 71.2, 123_456, 42_000_000, 7_000_000);
    let derived = DerivedMetrics {
        upload_rate_bytes_per_interval: 5000,
        download_rate_bytes_per_interval: -12,
        upload_active: true,
        download_active: false,
        total_tx_megabytes: 42,
        total_rx_megabytes: 7,
    };

    for layout in [LayoutVersion::Legacy, LayoutVersion::Current] {
        let first = display::format(&curr, &derived, layout);
        let second = display::format(&curr, &derived, layout);
        assert_eq!(first.to_wire(), second.to_wire());
        assert!(first.fits_display());
    }
}

/// Two consecutive samples over one cycle produce an upload burst frame
#[tokio::test]
async fn test_upload_burst_end_to_end() {
    let prev = sample(10.0, 50.0, 60.0, 100, 5_000_000, 0);
    let curr = sample(10.0, 50.0, 60.0, 101, 6_500_000, 0);

    let derived = derive(&prev, &curr, ACTIVITY_THRESHOLD_BYTES);
    assert_eq!(derived.upload_rate_bytes_per_interval, 1_500_000);
    assert!(derived.upload_active);
    assert_eq!(derived.total_tx_megabytes, 6);

    let line = FakeLine::new();
    let mut sample_loop = fake_loop(vec![Ok(prev), Ok(curr)], LayoutVersion::Current, &line);
    assert_eq!(sample_loop.cycle().await.unwrap(), CycleOutcome::WarmedUp);
    assert_eq!(sample_loop.cycle().await.unwrap(), CycleOutcome::Sent);

    let writes = line.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(
        writes[0],
        "> 000D 00:01:41 ^|-\nCPU%  MEM%  TEMP'c\n010   050   060\nT 0000006 R 0000000\n"
    );
}

/// A failed send followed by a successful reopen delivers exactly one frame per cycle
#[tokio::test]
async fn test_send_failure_then_reopen() {
    let line = FakeLine::new();
    let script = (0..4)
        .map(|tick| Ok(sample(5.0, 20.0, 45.0, tick, tick * 10_000, 0)))
        .collect();
    let mut sample_loop = fake_loop(script, LayoutVersion::Legacy, &line);

    assert_eq!(sample_loop.cycle().await.unwrap(), CycleOutcome::WarmedUp);
    assert_eq!(sample_loop.cycle().await.unwrap(), CycleOutcome::Sent);

    line.fail_next_writes(1);
    assert_eq!(
        sample_loop.cycle().await.unwrap(),
        CycleOutcome::SentAfterReopen
    );
    assert_eq!(line.writes().len(), 2);

    assert_eq!(sample_loop.cycle().await.unwrap(), CycleOutcome::Sent);
    let writes = line.writes();
    assert_eq!(writes.len(), 3);
    assert!(writes[1].starts_with("UP  000D 00:00:02\n"));
    assert!(writes[2].starts_with("UP  000D 00:00:03\n"));
    assert_eq!(sample_loop.provider().calls(), 4);
}

/// Legacy frames match the original four-line text layout
#[test]
fn test_legacy_wire_payload() {
    let curr = sample(12.3, 45.6, 52.0, 3 * 86_400 + 4 * 3600 + 5 * 60 + 6, 0, 0);
    let derived = derive(&curr, &curr, ACTIVITY_THRESHOLD_BYTES);
    let frame = display::format(&curr, &derived, LayoutVersion::Legacy);
    assert_eq!(
        String::from_utf8(frame.to_wire()).unwrap(),
        "UP  003D 04:05:06\nCPU(%) :   12.3\nMEM(%) :   45.6\nTEMP   :   52.0 'C\n"
    );
}

/// Test MonitorError creation and formatting
#[test]
fn test_monitor_error_types() {
    let sensor = MonitorError::sensor_unavailable("no sensor group 'coretemp'");
    assert!(sensor.to_string().contains("coretemp"));
    assert!(sensor.is_fatal());

    let read = MonitorError::metric_read("memory");
    assert!(read.to_string().contains("memory"));
    assert!(!read.is_fatal());

    let config = MonitorError::config_error("baud rate must be positive");
    assert!(config.to_string().contains("baud"));
}

/// Test MonitorConfig builder pattern
#[test]
fn test_monitor_config() {
    let config = MonitorConfig::new("/dev/ttyS1")
        .with_baud(9_600)
        .with_layout(LayoutVersion::Legacy)
        .with_sensor("k10temp", 1)
        .with_activity_threshold(4096);

    assert_eq!(config.device, "/dev/ttyS1");
    assert_eq!(config.baud, 9_600);
    assert_eq!(config.layout, LayoutVersion::Legacy);
    assert_eq!(config.sensor_group, "k10temp");
    assert_eq!(config.sensor_index, 1);
    assert_eq!(config.activity_threshold_bytes, 4096);
    assert!(config.validate().is_ok());
}

/// RawSample serializes with snake_case field names
#[test]
fn test_raw_sample_json() {
    let json = serde_json::to_value(sample(1.0, 2.0, 3.0, 4, 5, 6)).expect("Should serialize");
    assert!(json.get("cpu_percent").is_some());
    assert!(json.get("mem_avail_percent").is_some());
    assert!(json.get("cpu_temp_c").is_some());
    assert_eq!(json.get("uptime_seconds").and_then(|v| v.as_u64()), Some(4));
    assert_eq!(json.get("bytes_recv_total").and_then(|v| v.as_u64()), Some(6));
}
