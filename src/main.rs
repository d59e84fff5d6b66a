//! CLI glue around the sampling core: argument validation, process spawning
//! for "run this command" mode, wiring and exit codes.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use event_count::config::{SampleConfig, Target};
use event_count::count::Counter;
use event_count::monitor;
use event_count::sample::{DEFAULT_RING_BYTES, MAX_RING_BYTES, MIN_RING_BYTES};
use event_count::sink::Sink;
use log::{info, warn};

/// Record one raw hardware performance counter to a file.
#[derive(Parser)]
#[command(name = "event-count", version)]
struct Cli {
    /// Event number (hex)
    #[arg(short = 'e', value_name = "HEX", value_parser = parse_hex)]
    event: u64,

    /// Umask value (hex)
    #[arg(short = 'u', value_name = "HEX", value_parser = parse_hex)]
    umask: u64,

    /// Attach to an existing process
    #[arg(short = 'p', value_name = "PID", conflicts_with = "command")]
    pid: Option<u32>,

    /// Sampling frequency in samples per second
    #[arg(short = 'f', value_name = "HZ", default_value_t = SampleConfig::DEFAULT_FREQ)]
    freq: u64,

    /// Output file
    #[arg(short = 'o', value_name = "FILE", default_value = "events.count")]
    output: PathBuf,

    /// Sample buffer size in kilobytes (default: 512)
    #[arg(short = 'k', value_name = "KB", conflicts_with = "mb")]
    kb: Option<usize>,

    /// Sample buffer size in megabytes
    #[arg(short = 'm', value_name = "MB")]
    mb: Option<usize>,

    /// Ring poll interval in milliseconds
    #[arg(long = "interval", value_name = "MS", default_value_t = 120)]
    interval_ms: u64,

    /// Command to run and monitor
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

fn parse_hex(s: &str) -> Result<u64, String> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    u64::from_str_radix(digits, 16).map_err(|e| e.to_string())
}

fn ring_bytes(cli: &Cli) -> Result<usize> {
    let bytes = match (cli.kb, cli.mb) {
        (Some(kb), None) => kb * 1024,
        (None, Some(mb)) => mb * 1024 * 1024,
        (None, None) => DEFAULT_RING_BYTES,
        // clap rejects -k together with -m.
        (Some(_), Some(_)) => unreachable!(),
    };
    if !bytes.is_power_of_two() || !(MIN_RING_BYTES..=MAX_RING_BYTES).contains(&bytes) {
        bail!(
            "sample buffer must be a power of two between 8 KiB and 128 MiB, got {} bytes",
            bytes
        );
    }
    Ok(bytes)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let ring = ring_bytes(&cli)?;
    let config = SampleConfig::new(cli.event, cli.umask, cli.freq)?;
    if config.freq() < SampleConfig::ADVISORY_MIN_FREQ {
        warn!(
            "sampling at {} Hz; frequencies below {} Hz may miss short-lived activity",
            config.freq(),
            SampleConfig::ADVISORY_MIN_FREQ
        );
    }

    let target = if let Some(pid) = cli.pid {
        Target::attach(pid)
    } else if let [program, args @ ..] = cli.command.as_slice() {
        let target = Target::spawn(program, args)
            .with_context(|| format!("failed to run {:?}", program))?;
        info!("monitoring child process {}", target.pid());
        target
    } else {
        bail!("no process specified: give -p <pid> or a command to run");
    };

    let counter = Counter::new(&config, target)
        .context("the kernel refused the counter (perf_event_open)")?;
    let sampler = counter
        .sampler(ring)
        .context("failed to map the sample ring")?;
    let mut sink = Sink::open(&cli.output)
        .with_context(|| format!("cannot open output file {:?}", cli.output))?;

    let stop = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&stop);
    ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed))
        .context("failed to install Ctrl-C handler")?;

    let mut rb = sampler.consumer();
    monitor::drain_loop(
        &mut rb,
        &mut sink,
        Duration::from_millis(cli.interval_ms),
        &stop,
    )
    .context("failed to record samples")?;

    Ok(())
}
