//! End-to-end tests of the simulated source running on its real ticker.

use std::time::Duration;

use heartrate_sensor::{
    sensor::SAMPLE_BPMS, ContactStatus, HeartRateSource, SimulatedHeartRateSource,
};

#[test]
fn real_ticker_emits_full_ascending_sequence() {
    let mut source = SimulatedHeartRateSource::with_tick_rate(Duration::from_millis(5));
    let events = source.subscribe();
    source.initiate_default().unwrap();

    let mut bpms = Vec::new();
    for _ in 0..SAMPLE_BPMS.len() {
        let event = events
            .recv_timeout(Duration::from_secs(2))
            .expect("simulator stopped emitting early");
        assert_eq!(event.status, ContactStatus::Contact);
        bpms.push(event.bpm);
    }

    assert_eq!(bpms, SAMPLE_BPMS.to_vec());

    // Sequence exhausted: the ticker keeps running but emits nothing more.
    assert!(events.recv_timeout(Duration::from_millis(100)).is_err());

    source.cleanup();
    assert!(source.is_disposed());
}

#[test]
fn cleanup_stops_emission_midstream() {
    let mut source = SimulatedHeartRateSource::with_tick_rate(Duration::from_millis(5));
    let events = source.subscribe();
    source.initiate_default().unwrap();

    // Let a few samples through, then stop.
    let first = events.recv_timeout(Duration::from_secs(2)).unwrap();
    assert_eq!(first.bpm, SAMPLE_BPMS[0]);

    source.cleanup();

    // Drain whatever was emitted before or during disposal (including one
    // possible in-flight tick), then the stream stays silent.
    while events.recv_timeout(Duration::from_millis(50)).is_ok() {}
    assert!(events.recv_timeout(Duration::from_millis(100)).is_err());

    // Second cleanup is a no-op.
    source.cleanup();
    assert!(source.is_disposed());
}

#[test]
fn multiple_subscribers_each_receive_every_event() {
    let mut source = SimulatedHeartRateSource::with_tick_rate(Duration::from_millis(5));
    let first = source.subscribe();
    let second = source.subscribe();
    source.initiate_default().unwrap();

    for expected in SAMPLE_BPMS.iter().take(3) {
        let a = first.recv_timeout(Duration::from_secs(2)).unwrap();
        let b = second.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(a.bpm, *expected);
        assert_eq!(b.bpm, *expected);
    }

    source.cleanup();
}
