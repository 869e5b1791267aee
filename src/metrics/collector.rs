//! Host metric sampling backed by sysinfo.

use crate::error::{MonitorError, Result};
use crate::metrics::{data::RawSample, traits::MetricsProvider};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use sysinfo::{Components, Networks, System, MINIMUM_CPU_UPDATE_INTERVAL};
use tokio::time;

/// A temperature sensor as seen by the host, for the `sensors` listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Sensor label as reported by the host (e.g. "coretemp Package id 0")
    pub label: String,
    /// Current reading in Celsius
    pub celsius: f32,
    /// Position within the configured sensor group, if it belongs to it
    pub group_index: Option<usize>,
}

/// Host metric sampler using sysinfo.
pub struct SystemSampler {
    system: System,
    networks: Networks,
    components: Components,
    sensor_group: String,
    sensor_index: usize,
    window: Duration,
}

impl SystemSampler {
    /// Create a sampler reading temperature from `sensor_group[sensor_index]`.
    ///
    /// The CPU measurement window is raised to sysinfo's minimum update
    /// interval if shorter.
    pub fn new(sensor_group: impl Into<String>, sensor_index: usize, window: Duration) -> Self {
        let mut system = System::new();
        system.refresh_cpu_usage();
        system.refresh_memory();

        Self {
            system,
            networks: Networks::new_with_refreshed_list(),
            components: Components::new_with_refreshed_list(),
            sensor_group: sensor_group.into(),
            sensor_index,
            window: window.max(MINIMUM_CPU_UPDATE_INTERVAL),
        }
    }

    /// Effective CPU measurement window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Measure global CPU usage over the window. This is the tick delay.
    async fn measure_cpu(&mut self) -> Result<f32> {
        self.system.refresh_cpu_usage();
        time::sleep(self.window).await;
        self.system.refresh_cpu_usage();

        let usage = self.system.global_cpu_usage();
        if !usage.is_finite() {
            return Err(MonitorError::metric_read("CPU usage is not a number"));
        }
        Ok(usage.clamp(0.0, 100.0))
    }

    /// Returns `(used_percent, free_percent)`.
    fn read_memory(&mut self) -> Result<(f32, f32)> {
        self.system.refresh_memory();
        memory_percentages(
            self.system.total_memory(),
            self.system.available_memory(),
            self.system.free_memory(),
        )
    }

    fn read_temperature(&mut self) -> Result<f32> {
        self.components.refresh();
        let readings: Vec<(&str, f32)> = self
            .components
            .iter()
            .map(|component| (component.label(), component.temperature()))
            .collect();

        let celsius = select_sensor(&readings, &self.sensor_group, self.sensor_index)?;
        if !celsius.is_finite() {
            return Err(MonitorError::metric_read(format!(
                "sensor {}[{}] returned no reading",
                self.sensor_group, self.sensor_index
            )));
        }
        Ok(celsius)
    }

    /// Returns `(bytes_sent, bytes_received)` summed over all interfaces.
    fn read_network(&mut self) -> (u64, u64) {
        self.networks.refresh();
        self.networks
            .iter()
            .fold((0u64, 0u64), |(sent, recv), (_, data)| {
                (
                    sent.saturating_add(data.total_transmitted()),
                    recv.saturating_add(data.total_received()),
                )
            })
    }

    /// List every temperature sensor the host exposes.
    pub fn list_sensors(&mut self) -> Vec<SensorReading> {
        self.components.refresh_list();
        let mut next_index = 0;
        self.components
            .iter()
            .map(|component| {
                let group_index = if in_group(component.label(), &self.sensor_group) {
                    next_index += 1;
                    Some(next_index - 1)
                } else {
                    None
                };
                SensorReading {
                    label: component.label().to_string(),
                    celsius: component.temperature(),
                    group_index,
                }
            })
            .collect()
    }
}

impl MetricsProvider for SystemSampler {
    async fn sample(&mut self) -> Result<RawSample> {
        // The window is paid before any read that can fail, so a failing
        // sensor still paces the caller.
        let cpu_percent = self.measure_cpu().await?;
        let cpu_temp_c = self.read_temperature()?;
        let (mem_percent, mem_avail_percent) = self.read_memory()?;
        let (bytes_sent_total, bytes_recv_total) = self.read_network();

        Ok(RawSample {
            cpu_percent,
            mem_percent,
            mem_avail_percent,
            cpu_temp_c,
            uptime_seconds: System::uptime(),
            bytes_sent_total,
            bytes_recv_total,
        })
    }
}

fn in_group(label: &str, group: &str) -> bool {
    label
        .get(..group.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(group))
}

/// Pick the `index`-th reading whose label belongs to `group`.
fn select_sensor(readings: &[(&str, f32)], group: &str, index: usize) -> Result<f32> {
    let members: Vec<f32> = readings
        .iter()
        .filter(|(label, _)| in_group(label, group))
        .map(|(_, celsius)| *celsius)
        .collect();

    if members.is_empty() {
        return Err(MonitorError::sensor_unavailable(format!(
            "no temperature sensor group '{group}'"
        )));
    }

    members.get(index).copied().ok_or_else(|| {
        MonitorError::sensor_unavailable(format!(
            "sensor group '{group}' has {} sensor(s), index {index} is out of range",
            members.len()
        ))
    })
}

fn memory_percentages(total: u64, available: u64, free: u64) -> Result<(f32, f32)> {
    if total == 0 {
        return Err(MonitorError::metric_read("total memory reported as zero"));
    }
    let used = total.saturating_sub(available);
    let used_percent = used as f64 / total as f64 * 100.0;
    let free_percent = free.min(total) as f64 / total as f64 * 100.0;
    Ok((used_percent as f32, free_percent as f32))
}
