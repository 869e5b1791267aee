//! Serial LCD Monitor binary
//!
//! Streams host telemetry frames to a serial character display until interrupted.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serial_lcd_monitor::{
    derive, display, LayoutVersion, MetricsProvider, MonitorConfig, SampleLoop, SerialOpener,
    SerialTransport, SystemSampler, DEFAULT_BAUD, DEFAULT_DEVICE, DEFAULT_SENSOR_GROUP,
    DEFAULT_SENSOR_INDEX,
};
use tracing::{error, info, Level};
use tracing_subscriber::{filter::LevelFilter, EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "serial_lcd_monitor")]
#[command(about = "Host telemetry on a 20x4 serial character display")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    long_about = "Samples CPU, memory, temperature, network and uptime once per second and pushes a text frame to a serial LCD"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Serial device of the display
    #[arg(long, default_value = DEFAULT_DEVICE)]
    device: String,

    /// Serial baud rate
    #[arg(short, long, default_value_t = DEFAULT_BAUD)]
    baud: u32,

    /// Frame layout: legacy or current
    #[arg(short, long, default_value_t = LayoutVersion::Current)]
    layout: LayoutVersion,

    /// Temperature sensor group (label prefix, e.g. coretemp, k10temp, cpu_thermal)
    #[arg(long, default_value = DEFAULT_SENSOR_GROUP)]
    sensor_group: String,

    /// Index of the temperature sensor within its group
    #[arg(long, default_value_t = DEFAULT_SENSOR_INDEX)]
    sensor_index: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Stream frames to the display (default)
    Run,

    /// Render one frame to stdout without touching the display
    Preview(PreviewArgs),

    /// List the host's temperature sensors
    Sensors,
}

#[derive(Args)]
struct PreviewArgs {
    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    format: String,
}

impl Cli {
    fn monitor_config(&self) -> MonitorConfig {
        MonitorConfig::new(&self.device)
            .with_baud(self.baud)
            .with_layout(self.layout)
            .with_sensor(&self.sensor_group, self.sensor_index)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging
    init_logging(&cli)?;

    let config = cli.monitor_config();
    config.validate()?;

    match &cli.command {
        Some(Commands::Run) | None => run_command(&config).await,
        Some(Commands::Preview(args)) => preview_command(&config, args).await,
        Some(Commands::Sensors) => sensors_command(&config),
    }
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    };

    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(log_filter(level, directives))
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

/// `RUST_LOG` directives refine the level picked by the flags.
fn log_filter(level: Level, directives: Option<String>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .parse_lossy(directives.unwrap_or_default())
}

async fn run_command(config: &MonitorConfig) -> anyhow::Result<()> {
    println!(" >>> Starting monitor on {}", config.device);

    let sampler = sampler_for(config);
    let transport = SerialTransport::new(SerialOpener, config.transport_settings());
    let sample_loop = SampleLoop::start(
        sampler,
        transport,
        config.layout,
        config.activity_threshold_bytes,
    )
    .with_context(|| format!("cannot open display on {}", config.device))?
    .with_retry_delay(config.measurement_window());

    info!("Monitor configuration:");
    info!("  - Device: {} @ {} baud", config.device, config.baud);
    info!("  - Layout: {}", config.layout);
    info!(
        "  - Sensor: {}[{}]",
        config.sensor_group, config.sensor_index
    );
    info!("  - Cycle: {}ms", config.measurement_window_ms);

    println!(" >>> to stop, press [CTRL+C]");

    sample_loop
        .run_until(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for interrupt: {}", err);
                std::future::pending::<()>().await;
            }
        })
        .await
        .context("monitor stopped")?;

    info!("Display session closed");
    Ok(())
}

async fn preview_command(config: &MonitorConfig, args: &PreviewArgs) -> anyhow::Result<()> {
    let mut sampler = sampler_for(config);
    let prev = sampler.sample().await?;
    let curr = sampler.sample().await?;
    let derived = derive(&prev, &curr, config.activity_threshold_bytes);
    let frame = display::format(&curr, &derived, config.layout);

    match args.format.as_str() {
        "json" => {
            let json = serde_json::json!({
                "sample": curr,
                "derived": derived,
                "layout": config.layout,
                "frame": frame.lines(),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        "pretty" => {
            println!(
                "Frame preview ({}, layout {})",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                config.layout
            );
            let border = "-".repeat(display::DISPLAY_COLS + 2);
            println!("{border}");
            for line in frame.lines() {
                println!("|{:<width$}|", line, width = display::DISPLAY_COLS);
            }
            println!("{border}");
            if !frame.fits_display() {
                println!("(lines {:?} overflow the display)", frame.overflowing_lines());
            }
        }
        other => {
            anyhow::bail!("Unsupported format: {}. Use 'json' or 'pretty'", other);
        }
    }

    Ok(())
}

fn sensors_command(config: &MonitorConfig) -> anyhow::Result<()> {
    let mut sampler = sampler_for(config);
    let sensors = sampler.list_sensors();

    if sensors.is_empty() {
        println!("No temperature sensors reported by this host");
        return Ok(());
    }

    println!("Temperature sensors (group '{}'):", config.sensor_group);
    for sensor in &sensors {
        let marker = match sensor.group_index {
            Some(index) if index == config.sensor_index => format!("[{index}] *"),
            Some(index) => format!("[{index}]"),
            None => String::new(),
        };
        println!("  {:<8} {:<32} {:.1}°C", marker, sensor.label, sensor.celsius);
    }

    Ok(())
}

fn sampler_for(config: &MonitorConfig) -> SystemSampler {
    SystemSampler::new(
        &config.sensor_group,
        config.sensor_index,
        config.measurement_window(),
    )
}
