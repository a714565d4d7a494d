//! Heart-rate sensor sources.
//!
//! A source emits a stream of [`HeartRateEvent`]s at a cadence it controls.
//! Subscribers receive events on the source's own scheduling context;
//! marshaling to a presentation thread is an external adapter's job.

pub mod simulated;
pub mod types;

use crossbeam_channel::Receiver;

pub use simulated::{SimulatedHeartRateSource, SAMPLE_BPMS};
pub use types::{ContactStatus, HeartRateEvent};

/// Contract for a device producing live heart-rate samples.
pub trait HeartRateSource {
    /// Begin emission. Errors if already running or disposed.
    fn initiate_default(&mut self) -> Result<(), SensorError>;

    /// Register a subscriber; every event is delivered to every receiver
    /// obtained here.
    fn subscribe(&self) -> Receiver<HeartRateEvent>;

    /// Stop emission. Idempotent: repeated calls are no-ops. An in-flight
    /// tick may still deliver one final event.
    fn cleanup(&mut self);

    /// Whether the source has been stopped. Terminal.
    fn is_disposed(&self) -> bool;
}

/// Errors from source lifecycle calls.
#[derive(Debug)]
pub enum SensorError {
    AlreadyRunning,
    Disposed,
}

impl std::fmt::Display for SensorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SensorError::AlreadyRunning => write!(f, "Source is already running"),
            SensorError::Disposed => write!(f, "Source has been disposed"),
        }
    }
}

impl std::error::Error for SensorError {}
