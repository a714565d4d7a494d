//! Heart-rate sensor core: durable settings persistence and an event-driven
//! sensor-source abstraction.
//!
//! This library is the non-UI heart of a heart-rate display application.
//! Presentation concerns (windows, overlays, thread marshaling) live in
//! external consumers; what lives here are the two pieces with real
//! contracts:
//!
//! - **Settings persistence**: a live [`Settings`] model saved to and loaded
//!   from a versioned per-user XML document through an explicit wire record,
//!   with typed errors at the boundary and merge-on-load semantics so older
//!   documents never clobber fields they don't define.
//! - **Sensor sources**: the [`HeartRateSource`] contract plus a
//!   deterministic [`SimulatedHeartRateSource`] that emits a fixed ascending
//!   sample sequence from an injectable ticker, used for testing and demos
//!   in place of real hardware.
//!
//! # Example
//!
//! ```no_run
//! use heartrate_sensor::{HeartRateSource, Settings, SimulatedHeartRateSource};
//!
//! let mut settings = Settings::default();
//! let path = heartrate_sensor::settings_path();
//! settings.load(path.as_deref()).expect("settings document unreadable");
//!
//! let mut source = SimulatedHeartRateSource::new();
//! let events = source.subscribe();
//! source.initiate_default().expect("source failed to start");
//!
//! for event in events.iter().take(3) {
//!     println!("{} bpm ({:?})", event.bpm, event.status);
//! }
//! source.cleanup();
//! ```

pub mod color;
pub mod sensor;
pub mod settings;

// Re-export key types at crate root for convenience
pub use color::Argb;
pub use sensor::{
    ContactStatus, HeartRateEvent, HeartRateSource, SensorError, SimulatedHeartRateSource,
};
pub use settings::{settings_path, Settings, SettingsError, SettingsRecord};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
