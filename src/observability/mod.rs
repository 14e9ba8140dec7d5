//! Observability subsystem for skipdb
//!
//! - Structured logging (one JSON object per line)
//! - Lifecycle events
//! - Operation counters
//!
//! Observability is read-only: it never changes the outcome of a store
//! operation, and nothing is logged while the store lock is held.
//!
//! ```ignore
//! use skipdb::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::StoreOpened, &[("records", "0")]);
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

/// Severity an event is logged at
pub fn event_severity(event: Event) -> Severity {
    if event.is_fatal() {
        Severity::Fatal
    } else if event.is_warning() {
        Severity::Warn
    } else {
        Severity::Info
    }
}

/// Log a lifecycle event
pub fn log_event(event: Event) {
    Logger::log(event_severity(event), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event_severity(event), event.as_str(), fields);
}
