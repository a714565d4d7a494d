//! Deterministic, timer-driven heart-rate source used in place of real
//! hardware.
//!
//! The source emits a fixed ascending sequence of ten bpm samples, one per
//! ticker tick, always with contact status [`ContactStatus::Contact`]. Once
//! the sequence is exhausted further ticks are silently swallowed, modeling
//! sensor exhaustion rather than failure.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, select, Receiver, Sender};

use crate::sensor::{HeartRateSource, SensorError};
use crate::sensor::types::HeartRateEvent;

/// The fixed sample sequence, in emission order.
pub const SAMPLE_BPMS: [u16; 10] = [10, 20, 30, 40, 50, 60, 70, 80, 90, 99];

/// Per-subscriber channel capacity. A stalled subscriber drops events
/// rather than blocking the ticker.
const SUBSCRIBER_CAPACITY: usize = 64;

/// A simulated heart-rate source driven by a periodic ticker.
///
/// The ticker runs on its own thread; event delivery happens on that
/// thread's context, not any designated consumer thread. Redispatching to a
/// presentation thread is the subscriber's concern.
pub struct SimulatedHeartRateSource {
    ticks: Receiver<Instant>,
    subscribers: Arc<Mutex<Vec<Sender<HeartRateEvent>>>>,
    tick_count: Arc<Mutex<usize>>,
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
    disposed: Arc<AtomicBool>,
    started: bool,
}

impl SimulatedHeartRateSource {
    /// Create a source ticking once per second.
    pub fn new() -> Self {
        Self::with_tick_rate(Duration::from_secs(1))
    }

    /// Create a source with a custom tick cadence.
    pub fn with_tick_rate(tick_rate: Duration) -> Self {
        Self::with_ticks(crossbeam_channel::tick(tick_rate))
    }

    /// Create a source driven by an external tick channel.
    ///
    /// Tests send into the channel to drive ticks deterministically without
    /// wall-clock delays.
    pub fn with_ticks(ticks: Receiver<Instant>) -> Self {
        Self {
            ticks,
            subscribers: Arc::new(Mutex::new(Vec::new())),
            tick_count: Arc::new(Mutex::new(0)),
            stop_tx: None,
            handle: None,
            disposed: Arc::new(AtomicBool::new(false)),
            started: false,
        }
    }

    /// Number of ticks processed so far, including swallowed ones.
    pub fn tick_count(&self) -> usize {
        *lock_unpoisoned(&self.tick_count)
    }
}

impl Default for SimulatedHeartRateSource {
    fn default() -> Self {
        Self::new()
    }
}

impl HeartRateSource for SimulatedHeartRateSource {
    fn initiate_default(&mut self) -> Result<(), SensorError> {
        if self.disposed.load(Ordering::SeqCst) {
            return Err(SensorError::Disposed);
        }
        if self.started {
            return Err(SensorError::AlreadyRunning);
        }

        let (stop_tx, stop_rx) = bounded::<()>(1);
        let ticks = self.ticks.clone();
        let subscribers = Arc::clone(&self.subscribers);
        let tick_count = Arc::clone(&self.tick_count);

        let handle = thread::spawn(move || loop {
            select! {
                recv(ticks) -> tick => match tick {
                    Ok(_) => deliver_tick(&tick_count, &subscribers),
                    Err(_) => break, // tick channel dropped
                },
                recv(stop_rx) -> _ => break,
            }
        });

        self.stop_tx = Some(stop_tx);
        self.handle = Some(handle);
        self.started = true;
        Ok(())
    }

    fn subscribe(&self) -> Receiver<HeartRateEvent> {
        let (tx, rx) = bounded(SUBSCRIBER_CAPACITY);
        lock_unpoisoned(&self.subscribers).push(tx);
        rx
    }

    fn cleanup(&mut self) {
        self.disposed.store(true, Ordering::SeqCst);

        // Subsequent calls find nothing to stop. A tick callback already in
        // flight may still complete and emit one final event; only future
        // ticks are stopped.
        if let Some(stop) = self.stop_tx.take() {
            let _ = stop.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }
}

impl Drop for SimulatedHeartRateSource {
    fn drop(&mut self) {
        self.cleanup();
    }
}

/// Process one tick: advance the counter and emit the matching sample.
///
/// The critical section covers exactly the increment and the bounds check,
/// so ticks are handled in strict order and at most once each even when
/// they arrive faster than subscribers consume, or when disposal races with
/// a tick in flight.
fn deliver_tick(
    tick_count: &Mutex<usize>,
    subscribers: &Mutex<Vec<Sender<HeartRateEvent>>>,
) {
    let seq = {
        let mut count = lock_unpoisoned(tick_count);
        *count += 1;
        *count
    };

    if seq > SAMPLE_BPMS.len() {
        // Sequence exhausted: swallow the tick, no event and no error.
        return;
    }

    let event = HeartRateEvent::contact(SAMPLE_BPMS[seq - 1]);
    for tx in lock_unpoisoned(subscribers).iter() {
        if tx.try_send(event).is_err() {
            log::warn!("Dropping heart-rate event for a stalled subscriber");
        }
    }
}

/// Recover the guarded data even if a holder panicked; the tick counter
/// must never be lost to poisoning.
fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    fn drive(ticks: &Sender<Instant>, n: usize) {
        for _ in 0..n {
            ticks.send(Instant::now()).unwrap();
        }
    }

    fn wait_for_ticks(source: &SimulatedHeartRateSource, n: usize) {
        let deadline = Instant::now() + Duration::from_secs(2);
        while source.tick_count() < n && Instant::now() < deadline {
            thread::yield_now();
        }
    }

    fn collect_events(rx: &Receiver<HeartRateEvent>) -> Vec<u16> {
        let mut bpms = Vec::new();
        while let Ok(event) = rx.recv_timeout(Duration::from_millis(500)) {
            bpms.push(event.bpm);
            if bpms.len() == SAMPLE_BPMS.len() {
                break;
            }
        }
        bpms
    }

    #[test]
    fn test_emits_samples_in_order() {
        let (tick_tx, tick_rx) = unbounded();
        let mut source = SimulatedHeartRateSource::with_ticks(tick_rx);
        let events = source.subscribe();
        source.initiate_default().unwrap();

        drive(&tick_tx, 10);

        assert_eq!(collect_events(&events), SAMPLE_BPMS.to_vec());
        source.cleanup();
    }

    #[test]
    fn test_partial_sequence_for_few_ticks() {
        let (tick_tx, tick_rx) = unbounded();
        let mut source = SimulatedHeartRateSource::with_ticks(tick_rx);
        let events = source.subscribe();
        source.initiate_default().unwrap();

        drive(&tick_tx, 3);

        let mut bpms = Vec::new();
        for _ in 0..3 {
            bpms.push(events.recv_timeout(Duration::from_millis(500)).unwrap().bpm);
        }
        assert_eq!(bpms, vec![10, 20, 30]);
        assert!(events
            .recv_timeout(Duration::from_millis(50))
            .is_err());
        source.cleanup();
    }

    #[test]
    fn test_ticks_beyond_sequence_are_swallowed() {
        let (tick_tx, tick_rx) = unbounded();
        let mut source = SimulatedHeartRateSource::with_ticks(tick_rx);
        let events = source.subscribe();
        source.initiate_default().unwrap();

        drive(&tick_tx, 15);

        assert_eq!(collect_events(&events), SAMPLE_BPMS.to_vec());
        // No eleventh event.
        assert!(events.recv_timeout(Duration::from_millis(50)).is_err());

        wait_for_ticks(&source, 15);
        assert_eq!(source.tick_count(), 15);
        source.cleanup();
    }

    #[test]
    fn test_all_events_report_contact() {
        let (tick_tx, tick_rx) = unbounded();
        let mut source = SimulatedHeartRateSource::with_ticks(tick_rx);
        let events = source.subscribe();
        source.initiate_default().unwrap();

        drive(&tick_tx, 4);

        for _ in 0..4 {
            let event = events.recv_timeout(Duration::from_millis(500)).unwrap();
            assert_eq!(event.status, crate::sensor::ContactStatus::Contact);
        }
        source.cleanup();
    }

    #[test]
    fn test_cleanup_is_idempotent() {
        let (_tick_tx, tick_rx) = unbounded();
        let mut source = SimulatedHeartRateSource::with_ticks(tick_rx);
        source.initiate_default().unwrap();

        source.cleanup();
        assert!(source.is_disposed());
        source.cleanup();
        assert!(source.is_disposed());
    }

    #[test]
    fn test_no_events_after_cleanup() {
        let (tick_tx, tick_rx) = unbounded();
        let mut source = SimulatedHeartRateSource::with_ticks(tick_rx);
        let events = source.subscribe();
        source.initiate_default().unwrap();

        source.cleanup();
        // Ticker thread is gone; these ticks go nowhere.
        let _ = tick_tx.send(Instant::now());
        let _ = tick_tx.send(Instant::now());

        assert!(events.recv_timeout(Duration::from_millis(50)).is_err());
    }

    #[test]
    fn test_initiate_twice_fails() {
        let (_tick_tx, tick_rx) = unbounded();
        let mut source = SimulatedHeartRateSource::with_ticks(tick_rx);
        source.initiate_default().unwrap();

        assert!(matches!(
            source.initiate_default(),
            Err(SensorError::AlreadyRunning)
        ));
        source.cleanup();
    }

    #[test]
    fn test_initiate_after_dispose_fails() {
        let (_tick_tx, tick_rx) = unbounded();
        let mut source = SimulatedHeartRateSource::with_ticks(tick_rx);
        source.cleanup();

        assert!(matches!(
            source.initiate_default(),
            Err(SensorError::Disposed)
        ));
    }

    #[test]
    fn test_rapid_ticks_keep_strict_order() {
        let (tick_tx, tick_rx) = unbounded();
        let mut source = SimulatedHeartRateSource::with_ticks(tick_rx);
        let events = source.subscribe();
        source.initiate_default().unwrap();

        // Queue every tick before the ticker thread can drain any of them.
        drive(&tick_tx, 50);

        assert_eq!(collect_events(&events), SAMPLE_BPMS.to_vec());
        wait_for_ticks(&source, 50);
        assert_eq!(source.tick_count(), 50);
        source.cleanup();
    }
}
