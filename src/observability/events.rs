//! Observable lifecycle events
//!
//! Domain outcomes (capacity, missing records) are returned to the caller
//! and never appear here.

use std::fmt;

/// Observable events in skipdb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Store constructed and ready
    StoreOpened,
    /// Configuration file parsed and validated
    ConfigLoaded,
    /// Configuration file rejected
    ConfigRejected,
    /// A lock was poisoned by a panicking holder and recovered
    LockPoisoned,
    /// Structural check of the index failed (FATAL)
    InvariantViolated,
}

impl Event {
    /// Returns the event name as it appears in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::StoreOpened => "STORE_OPENED",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ConfigRejected => "CONFIG_REJECTED",
            Event::LockPoisoned => "STORE_LOCK_POISONED",
            Event::InvariantViolated => "INDEX_INVARIANT_VIOLATED",
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::InvariantViolated)
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Event::LockPoisoned | Event::ConfigRejected)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::StoreOpened.as_str(), "STORE_OPENED");
        assert_eq!(Event::LockPoisoned.to_string(), "STORE_LOCK_POISONED");
    }

    #[test]
    fn test_only_invariant_violation_is_fatal() {
        let events = [
            Event::StoreOpened,
            Event::ConfigLoaded,
            Event::ConfigRejected,
            Event::LockPoisoned,
        ];
        for event in events {
            assert!(!event.is_fatal());
        }
        assert!(Event::InvariantViolated.is_fatal());
    }
}
