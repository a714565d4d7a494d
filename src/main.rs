//! Heart-rate sensor CLI
//!
//! Inspect and manage the settings document and run the simulated source.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use heartrate_sensor::{
    settings::{protocol, settings_path},
    HeartRateSource, Settings, SettingsRecord, SimulatedHeartRateSource, VERSION,
};

#[derive(Parser)]
#[command(name = "heartrate-sensor")]
#[command(version = VERSION)]
#[command(about = "Heart-rate sensor core utilities", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the resolved settings file location
    Path,

    /// Show the current settings as they would be persisted
    Config,

    /// Write default settings to disk
    Init,

    /// Run the simulated sensor source and print its events
    Simulate {
        /// Tick interval in milliseconds
        #[arg(long, default_value = "1000")]
        tick_ms: u64,

        /// Stop after this many events (default: run until Ctrl+C)
        #[arg(long)]
        count: Option<usize>,
    },
}

fn main() {
    env_logger::builder().init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Path => cmd_path(),
        Commands::Config => cmd_config(),
        Commands::Init => cmd_init(),
        Commands::Simulate { tick_ms, count } => cmd_simulate(tick_ms, count),
    }
}

fn cmd_path() {
    match settings_path() {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("Settings path unavailable; persistence is disabled.");
            std::process::exit(1);
        }
    }
}

fn cmd_config() {
    let path = settings_path();
    let mut settings = Settings::default();

    match settings.load(path.as_deref()) {
        Ok(true) => {}
        Ok(false) => println!("No settings file found; showing defaults."),
        Err(e) => {
            eprintln!("Error loading settings: {e}");
            std::process::exit(1);
        }
    }

    match protocol::to_document(&SettingsRecord::encode(&settings)) {
        Ok(document) => println!("{document}"),
        Err(e) => {
            eprintln!("Error encoding settings: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_init() {
    let path = settings_path();
    let settings = Settings::default();

    if let Err(e) = settings.save(path.as_deref()) {
        eprintln!("Error saving settings: {e}");
        std::process::exit(1);
    }

    if let Some(p) = path {
        println!("Wrote default settings to {}", p.display());
    }
}

fn cmd_simulate(tick_ms: u64, count: Option<usize>) {
    println!("Heart-rate simulator v{VERSION}");
    println!("Tick interval: {tick_ms} ms");
    match count {
        Some(n) => println!("Stopping after {n} event(s)"),
        None => println!("Press Ctrl+C to stop"),
    }
    println!();

    let mut source = SimulatedHeartRateSource::with_tick_rate(Duration::from_millis(tick_ms));
    let events = source.subscribe();

    if let Err(e) = source.initiate_default() {
        eprintln!("Error starting source: {e}");
        std::process::exit(1);
    }

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl+C handler");

    let mut received = 0usize;
    while running.load(Ordering::SeqCst) {
        match events.recv_timeout(Duration::from_millis(100)) {
            Ok(event) => {
                println!("{:>3} bpm  ({:?})", event.bpm, event.status);
                received += 1;
                if count.is_some_and(|n| received >= n) {
                    break;
                }
            }
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => {}
            Err(crossbeam_channel::RecvTimeoutError::Disconnected) => break,
        }
    }

    println!();
    println!("Stopping source...");
    source.cleanup();
}
