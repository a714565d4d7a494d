//! Event types delivered by heart-rate sources.

use serde::{Deserialize, Serialize};

/// Whether the sensor currently has a valid physiological reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactStatus {
    /// The sensor is reading a live signal.
    Contact,
    /// The sensor is worn but has no valid reading.
    NoContact,
    /// The sensor is not reachable at all.
    Disconnected,
}

/// A single heart-rate notification.
///
/// Transient: delivered to subscribers and never stored by the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartRateEvent {
    pub status: ContactStatus,
    /// Beats per minute.
    pub bpm: u16,
}

impl HeartRateEvent {
    pub fn new(status: ContactStatus, bpm: u16) -> Self {
        Self { status, bpm }
    }

    /// A reading with the sensor in contact.
    pub fn contact(bpm: u16) -> Self {
        Self::new(ContactStatus::Contact, bpm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_constructor() {
        let event = HeartRateEvent::contact(72);
        assert_eq!(event.status, ContactStatus::Contact);
        assert_eq!(event.bpm, 72);
    }
}
