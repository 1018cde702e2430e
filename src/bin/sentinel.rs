//! sentinel - host health monitoring agent.
//!
//! Samples CPU load, memory and disk space on a fixed cadence, derives
//! alert events and fans them out to a colorized console stream, an
//! append-only log file and (optionally) a live terminal dashboard.
//! Runs until externally terminated; Ctrl-C shuts the pipeline down
//! deterministically.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

#[cfg(target_os = "linux")]
use sentinel::collector::RealFs;
#[cfg(not(target_os = "linux"))]
use sentinel::collector::mock::MockFs;
use sentinel::agent::{self, AgentConfig};
use sentinel::collector::ProcSampler;
use sentinel::dashboard::StdDashboard;
use sentinel::fmt::format_size;
use sentinel::queue::{EventQueue, OverflowPolicy};
use sentinel::rules::Thresholds;
use sentinel::sink::{Broadcaster, ConsoleSink, FileSink};

/// Queue overflow policy, as a CLI value.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OverflowArg {
    /// Block the producer until the consumer makes room.
    Block,
    /// Evict the oldest queued event.
    DropOldest,
    /// Drop the new event.
    Reject,
}

impl From<OverflowArg> for OverflowPolicy {
    fn from(arg: OverflowArg) -> Self {
        match arg {
            OverflowArg::Block => OverflowPolicy::Block,
            OverflowArg::DropOldest => OverflowPolicy::DropOldest,
            OverflowArg::Reject => OverflowPolicy::Reject,
        }
    }
}

/// Host health monitoring agent.
#[derive(Parser)]
#[command(name = "sentinel", about = "Host health monitoring agent", version)]
struct Args {
    /// Sampling interval in milliseconds.
    #[arg(short, long, default_value = "1000")]
    interval_ms: u64,

    /// Path of the append-only event log file.
    #[arg(short, long, default_value = "sentinel.log")]
    log_file: String,

    /// Show the live terminal dashboard instead of the console stream.
    #[arg(short, long)]
    dashboard: bool,

    /// CPU load percentage above which a warning event is raised.
    #[arg(long, default_value = "90.0")]
    cpu_threshold: f64,

    /// Free disk space below which a warning event is raised
    /// (e.g., "10G", "500M", "10737418240").
    #[arg(long, default_value = "10G", value_parser = parse_size)]
    disk_threshold: u64,

    /// Path to /proc filesystem (for testing/mocking).
    #[arg(long, default_value = "/proc")]
    proc_path: String,

    /// Filesystem whose free space is monitored.
    #[arg(long, default_value = "/")]
    disk_path: String,

    /// Maximum number of events buffered between producer and consumer.
    #[arg(long, default_value = "1024")]
    queue_capacity: usize,

    /// What to do when the event queue is full.
    #[arg(long, value_enum, default_value_t = OverflowArg::Block)]
    overflow: OverflowArg,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

/// Parses a human-readable size string (e.g., "1G", "500M", "1024K") into bytes.
fn parse_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty size string".to_string());
    }

    let (num_str, multiplier) = if let Some(num) = s.strip_suffix('G') {
        (num, 1024 * 1024 * 1024)
    } else if let Some(num) = s.strip_suffix('M') {
        (num, 1024 * 1024)
    } else if let Some(num) = s.strip_suffix('K') {
        (num, 1024)
    } else {
        (s, 1)
    };

    num_str
        .trim()
        .parse::<u64>()
        .map(|n| n * multiplier)
        .map_err(|e| format!("invalid size '{}': {}", s, e))
}

/// Initializes the tracing subscriber with the appropriate log level.
///
/// Diagnostics go to stderr, which keeps them out of the event stream on
/// stdout and off the dashboard's alternate screen.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(format!("sentinel={}", level).parse().unwrap());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    info!("sentinel {} starting", env!("CARGO_PKG_VERSION"));
    info!(
        "Config: interval={}ms, log={}, cpu_threshold={:.1}%, disk_threshold={}",
        args.interval_ms,
        args.log_file,
        args.cpu_threshold,
        format_size(args.disk_threshold)
    );
    info!(
        "Queue: capacity={}, overflow={:?}",
        args.queue_capacity, args.overflow
    );

    // Create sampler
    #[cfg(target_os = "linux")]
    let sampler = ProcSampler::new(RealFs::new(), &*args.proc_path, &*args.disk_path);
    #[cfg(not(target_os = "linux"))]
    let sampler = ProcSampler::new(MockFs::typical_system(), &*args.proc_path, &*args.disk_path);

    // A sink that cannot acquire its backing resource aborts startup:
    // no partial pipeline is allowed to run.
    let file_sink = match FileSink::create(Path::new(&args.log_file)) {
        Ok(sink) => Arc::new(sink),
        Err(e) => {
            eprintln!("Error: cannot open log file '{}': {}", args.log_file, e);
            std::process::exit(1);
        }
    };

    let broadcaster = Arc::new(Broadcaster::new());

    // Console output would corrupt the dashboard's alternate screen, so
    // the two presentation sinks are mutually exclusive; the file sink is
    // always registered.
    let dashboard = if args.dashboard {
        match StdDashboard::enter() {
            Ok(dashboard) => {
                let dashboard = Arc::new(dashboard);
                broadcaster.add_sink(dashboard.clone());
                Some(dashboard)
            }
            Err(e) => {
                eprintln!("Error: cannot initialize dashboard: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        broadcaster.add_sink(Arc::new(ConsoleSink::new()));
        None
    };
    broadcaster.add_sink(file_sink);

    let queue = Arc::new(EventQueue::new(args.queue_capacity, args.overflow.into()));

    // Setup graceful shutdown
    let running = Arc::new(AtomicBool::new(true));
    {
        let running = running.clone();
        let queue = queue.clone();
        if let Err(e) = ctrlc::set_handler(move || {
            info!("Received shutdown signal");
            running.store(false, Ordering::SeqCst);
            queue.close();
        }) {
            tracing::warn!("Failed to set Ctrl-C handler: {}", e);
        }
    }

    let config = AgentConfig {
        interval: Duration::from_millis(args.interval_ms),
        thresholds: Thresholds {
            cpu_load_percent: args.cpu_threshold,
            disk_free_bytes: args.disk_threshold,
        },
    };

    info!("Starting monitoring pipeline");

    let producer = agent::spawn_producer(
        sampler,
        queue.clone(),
        dashboard.clone(),
        config,
        running.clone(),
    );
    let consumer = agent::spawn_consumer(queue.clone(), broadcaster);

    // Block until the shutdown signal stops the producer, then let the
    // consumer drain whatever is still queued.
    if producer.join().is_err() {
        tracing::error!("Producer thread panicked");
    }
    queue.close();
    if consumer.join().is_err() {
        tracing::error!("Consumer thread panicked");
    }

    // Restores the terminal via its Drop impl.
    drop(dashboard);

    info!("Shutdown complete");
}

#[cfg(test)]
mod tests {
    use super::parse_size;

    #[test]
    fn parse_size_accepts_suffixes() {
        assert_eq!(parse_size("10G").unwrap(), 10 * 1024 * 1024 * 1024);
        assert_eq!(parse_size("500M").unwrap(), 500 * 1024 * 1024);
        assert_eq!(parse_size("64K").unwrap(), 64 * 1024);
        assert_eq!(parse_size("1234").unwrap(), 1234);
    }

    #[test]
    fn parse_size_rejects_garbage() {
        assert!(parse_size("").is_err());
        assert!(parse_size("ten gigs").is_err());
    }
}
