//! rigwatch - Hardware & AI Workload Monitor Binary
//!
//! A standalone binary serving a local dashboard for GPU, thermal, system
//! load, disk, and Ollama model telemetry.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rigwatch::{
    start_web_server, AppState, MonitorConfig, Snapshot, TelemetryCollector, TieredCache,
    WebConfig, DEFAULT_WEB_PORT,
};
use tracing::{error, info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "rigwatch")]
#[command(about = "📡 rigwatch - Hardware & AI Workload Monitor")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "Austin Couch")]
#[command(long_about = "A local dashboard for GPU, thermal, disk, and Ollama model telemetry")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Web server bind address
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Web server port
    #[arg(short, long, default_value_t = DEFAULT_WEB_PORT)]
    port: u16,

    /// Fast-tier refresh interval in seconds (GPU, thermals, load)
    #[arg(long, default_value_t = 1)]
    fast_interval: u64,

    /// Slow-tier refresh interval in seconds (disk, model list)
    #[arg(long, default_value_t = 60)]
    slow_interval: u64,

    /// Hard deadline for one external command, in seconds
    #[arg(long, default_value_t = 5)]
    command_timeout: u64,

    /// Device identifier to report disk usage for
    #[arg(long, default_value = "nvme0n1p2")]
    storage: String,

    /// Name of the container running the Ollama server
    #[arg(long, default_value = "ollama")]
    container: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server (default)
    Serve(ServeArgs),

    /// Poll every source once, print the result, and exit
    Snapshot(SnapshotArgs),
}

#[derive(Args)]
struct ServeArgs {
    /// Static files directory (optional)
    #[arg(long)]
    static_dir: Option<String>,

    /// Disable CORS headers
    #[arg(long)]
    no_cors: bool,
}

#[derive(Args)]
struct SnapshotArgs {
    /// Output format: json, compact, or pretty
    #[arg(short, long, default_value = "pretty")]
    format: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging
    init_logging(&cli)?;

    // Print banner
    print_banner();

    match &cli.command {
        Some(Commands::Serve(args)) => {
            serve_command(&cli, args).await?;
        }
        Some(Commands::Snapshot(args)) => {
            snapshot_command(&cli, args).await?;
        }
        None => {
            // Default to serve command
            let serve_args = ServeArgs {
                static_dir: None,
                no_cors: false,
            };
            serve_command(&cli, &serve_args).await?;
        }
    }

    Ok(())
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install tracing subscriber")?;

    Ok(())
}

fn print_banner() {
    println!("📡 rigwatch - Hardware & AI Workload Monitor");
    println!("   Version: {}", env!("CARGO_PKG_VERSION"));
    println!();
}

fn monitor_config(cli: &Cli) -> MonitorConfig {
    MonitorConfig::default()
        .with_storage_device(&cli.storage)
        .with_container(&cli.container)
        .with_fast_interval(Duration::from_secs(cli.fast_interval))
        .with_slow_interval(Duration::from_secs(cli.slow_interval))
        .with_command_timeout(Duration::from_secs(cli.command_timeout))
}

async fn serve_command(cli: &Cli, args: &ServeArgs) -> anyhow::Result<()> {
    info!("Starting rigwatch telemetry monitor...");

    let config = monitor_config(cli);
    let collector = TelemetryCollector::new(&config);
    let cache = TieredCache::new(collector, config.fast_interval, config.slow_interval);
    let state = Arc::new(AppState { cache });
    info!("Telemetry collector initialized");

    // Configure web server
    let mut web_config = WebConfig::new(&cli.host, cli.port);

    if let Some(static_dir) = &args.static_dir {
        web_config = web_config.with_static_path(Some(static_dir.clone()));
        info!("Using static files from: {}", static_dir);
    }

    web_config = web_config.with_cors(!args.no_cors);

    info!("Web server configuration:");
    info!("  - Bind address: {}:{}", cli.host, cli.port);
    info!("  - CORS enabled: {}", !args.no_cors);
    info!("  - Fast tier interval: {}s", cli.fast_interval);
    info!("  - Slow tier interval: {}s", cli.slow_interval);
    info!("  - Storage device: {}", cli.storage);
    info!("  - Ollama container: {}", cli.container);

    // Start web server
    info!("Starting web server...");
    start_web_server(web_config, state)
        .await
        .context("web server failed")?;

    Ok(())
}

async fn snapshot_command(cli: &Cli, args: &SnapshotArgs) -> anyhow::Result<()> {
    let config = monitor_config(cli);
    let collector = TelemetryCollector::new(&config);
    let cache = TieredCache::new(collector, config.fast_interval, config.slow_interval);
    let snapshot = cache.snapshot().await;

    match args.format.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&snapshot)?;
            println!("{}", json);
        }
        "compact" => {
            println!("{}", serde_json::to_string(&snapshot)?);
        }
        "pretty" => {
            print_pretty_snapshot(&snapshot);
        }
        _ => {
            error!(
                "Unsupported format: {}. Use 'json', 'compact', or 'pretty'",
                args.format
            );
            std::process::exit(1);
        }
    }

    Ok(())
}

fn print_pretty_snapshot(snapshot: &Snapshot) {
    println!("📡 Telemetry Snapshot ({})", snapshot.server_time);
    println!("==========================================");
    println!();

    println!("⚡ GPU:");
    match snapshot.nvidia.value() {
        Some(gpu) => {
            println!("  Utilization: {}", gpu.util);
            println!("  Temperature: {}", gpu.temp);
            println!("  Memory: {}", gpu.mem);
            println!("  Power: {}", gpu.power);
            println!("  Fan: {}", gpu.fan);
        }
        None => println!(
            "  Unavailable: {}",
            snapshot.nvidia.error().unwrap_or("unknown")
        ),
    }
    println!();

    println!("🧠 System:");
    match snapshot.sys.value() {
        Some(sys) => {
            println!("  Memory: {} / {}", sys.mem_used, sys.mem_total);
            println!("  Load (1 min): {}", sys.load);
        }
        None => println!(
            "  Unavailable: {}",
            snapshot.sys.error().unwrap_or("unknown")
        ),
    }
    println!();

    println!("🌡️  Thermals:");
    match snapshot.temps.value() {
        Some(temps) => {
            println!("  CPU: {}", temps.cpu_temp);
            println!("  SSD: {}", temps.ssd_temp);
            println!("  VRM: {}", temps.vrm_temp);
            println!("  Pump: {}", temps.pump_speed);
            println!("  Case fan: {}", temps.sys_fan_1);
        }
        None => println!(
            "  Unavailable: {}",
            snapshot.temps.error().unwrap_or("unknown")
        ),
    }
    println!();

    println!("💾 Storage ({}):", snapshot.disk.storage);
    println!(
        "  {} used of {} ({}), {} free, mounted at {}",
        snapshot.disk.used,
        snapshot.disk.size,
        snapshot.disk.percent,
        snapshot.disk.avail,
        snapshot.disk.mount
    );
    println!();

    println!("🤖 Loaded Models:");
    if snapshot.ollama.is_empty() {
        println!("  (none)");
    } else {
        for model in &snapshot.ollama {
            println!(
                "  {} ({}) on {}, until {}",
                model.name, model.size, model.processor, model.until
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        use clap::Parser;

        let cli = Cli::try_parse_from(["rigwatch", "--port", "9090"]).unwrap();
        assert_eq!(cli.port, 9090);
    }

    #[test]
    fn test_default_values() {
        use clap::Parser;

        let cli = Cli::try_parse_from(["rigwatch"]).unwrap();
        assert_eq!(cli.port, DEFAULT_WEB_PORT);
        assert_eq!(cli.fast_interval, 1);
        assert_eq!(cli.slow_interval, 60);
        assert_eq!(cli.command_timeout, 5);
        assert_eq!(cli.host, "0.0.0.0");
        assert_eq!(cli.storage, "nvme0n1p2");
        assert_eq!(cli.container, "ollama");
    }

    #[test]
    fn test_snapshot_subcommand_format() {
        use clap::Parser;

        let cli =
            Cli::try_parse_from(["rigwatch", "snapshot", "--format", "json"]).unwrap();
        match cli.command {
            Some(Commands::Snapshot(args)) => assert_eq!(args.format, "json"),
            _ => panic!("expected snapshot subcommand"),
        }
    }

    #[test]
    fn test_serve_subcommand_flags() {
        use clap::Parser;

        let cli = Cli::try_parse_from([
            "rigwatch",
            "--storage",
            "sda1",
            "serve",
            "--no-cors",
            "--static-dir",
            "web",
        ])
        .unwrap();
        assert_eq!(cli.storage, "sda1");
        match cli.command {
            Some(Commands::Serve(args)) => {
                assert!(args.no_cors);
                assert_eq!(args.static_dir.as_deref(), Some("web"));
            }
            _ => panic!("expected serve subcommand"),
        }
    }
}
