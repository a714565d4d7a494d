//! Demonstration of the simulated heart-rate source and settings codec.
//!
//! This example shows how to:
//! 1. Resolve the settings location and load-or-default the settings
//! 2. Create and start a simulated source
//! 3. Receive and print heart-rate events
//! 4. Persist the settings back to disk
//!
//! Run with: cargo run --example simulate_demo

use std::time::Duration;

use heartrate_sensor::{
    settings::settings_path, HeartRateSource, Settings, SimulatedHeartRateSource,
};

fn main() {
    env_logger::builder().init();

    println!("Heart-rate Sensor - Simulator Demo");
    println!("==================================");
    println!();

    // Load settings, falling back to defaults when no file exists yet.
    let path = settings_path();
    let mut settings = Settings::default();
    match settings.load(path.as_deref()) {
        Ok(true) => println!("Loaded settings from {:?}", path.as_deref().unwrap()),
        Ok(false) => println!("No settings file yet; using defaults."),
        Err(e) => println!("Settings unavailable ({e}); using defaults."),
    }
    println!(
        "Warn at {} bpm, alert at {} bpm",
        settings.warn_level, settings.alert_level
    );
    println!();

    // Run the simulator at 4 ticks per second for a quick demo.
    let mut source = SimulatedHeartRateSource::with_tick_rate(Duration::from_millis(250));
    let events = source.subscribe();
    source.initiate_default().expect("Failed to start source");

    println!("Receiving samples...");
    while let Ok(event) = events.recv_timeout(Duration::from_secs(1)) {
        let marker = if u32::from(event.bpm) >= settings.alert_level {
            " ALERT"
        } else if u32::from(event.bpm) >= settings.warn_level {
            " warn"
        } else {
            ""
        };
        println!("  {:>3} bpm ({:?}){marker}", event.bpm, event.status);
    }
    println!("Sample sequence exhausted.");

    source.cleanup();

    // Persist the (unchanged) settings so the file exists for next time.
    if let Err(e) = settings.save(path.as_deref()) {
        println!("Could not save settings: {e}");
    } else if let Some(p) = path {
        println!("Saved settings to {p:?}");
    }
}
