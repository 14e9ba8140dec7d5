//! Metrics registry for skipdb
//!
//! - Counters are monotonic and reset only when the store is rebuilt
//! - `records` is a gauge holding the last observed live record count;
//!   only `set_records` moves it
//! - Thread-safe, counters are updated outside the store lock

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters for one store.
///
/// Relaxed ordering throughout; values are exact once writers quiesce.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    inserts: AtomicU64,
    inserts_rejected: AtomicU64,
    updates: AtomicU64,
    updates_missed: AtomicU64,
    deletes: AtomicU64,
    deletes_missed: AtomicU64,
    page_reads: AtomicU64,
    /// Live record count (gauge)
    records: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Successful insert
    pub fn record_insert(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }

    /// Insert refused at capacity
    pub fn record_insert_rejected(&self) {
        self.inserts_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_update(&self) {
        self.updates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_update_missed(&self) {
        self.updates_missed.fetch_add(1, Ordering::Relaxed);
    }

    /// Successful delete
    pub fn record_delete(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_delete_missed(&self) {
        self.deletes_missed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_page_read(&self) {
        self.page_reads.fetch_add(1, Ordering::Relaxed);
    }

    /// Set the live record gauge from a count read under the store lock
    pub fn set_records(&self, count: u64) {
        self.records.store(count, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            inserts: self.inserts.load(Ordering::Relaxed),
            inserts_rejected: self.inserts_rejected.load(Ordering::Relaxed),
            updates: self.updates.load(Ordering::Relaxed),
            updates_missed: self.updates_missed.load(Ordering::Relaxed),
            deletes: self.deletes.load(Ordering::Relaxed),
            deletes_missed: self.deletes_missed.load(Ordering::Relaxed),
            page_reads: self.page_reads.load(Ordering::Relaxed),
            records: self.records.load(Ordering::Relaxed),
        }
    }

    /// Get current snapshot of all metrics as JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MetricsSnapshot {
    pub inserts: u64,
    pub inserts_rejected: u64,
    pub updates: u64,
    pub updates_missed: u64,
    pub deletes: u64,
    pub deletes_missed: u64,
    pub page_reads: u64,
    pub records: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registry_has_zero_values() {
        assert_eq!(MetricsRegistry::new().snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn test_delete_before_insert_is_counted_does_not_wrap_gauge() {
        let registry = MetricsRegistry::new();
        registry.set_records(0);
        registry.record_delete();
        registry.record_insert();

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.inserts, 1);
        assert_eq!(snapshot.deletes, 1);
        assert_eq!(snapshot.records, 0);
    }

    #[test]
    fn test_misses_do_not_touch_gauge() {
        let registry = MetricsRegistry::new();
        registry.set_records(5);
        registry.record_insert_rejected();
        registry.record_delete_missed();
        registry.record_update_missed();

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.records, 5);
        assert_eq!(snapshot.inserts_rejected, 1);
        assert_eq!(snapshot.deletes_missed, 1);
        assert_eq!(snapshot.updates_missed, 1);
    }

    #[test]
    fn test_to_json() {
        let registry = MetricsRegistry::new();
        registry.record_insert();
        registry.record_page_read();
        registry.set_records(1);

        let parsed: serde_json::Value = serde_json::from_str(&registry.to_json()).unwrap();
        assert_eq!(parsed["inserts"], 1);
        assert_eq!(parsed["page_reads"], 1);
        assert_eq!(parsed["records"], 1);
    }

    #[test]
    fn test_thread_safety() {
        use std::sync::Arc;
        use std::thread;

        let registry = Arc::new(MetricsRegistry::new());
        let mut handles = vec![];

        for _ in 0..8 {
            let reg = Arc::clone(&registry);
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    reg.record_insert();
                    reg.record_page_read();
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.inserts, 800);
        assert_eq!(snapshot.page_reads, 800);
        assert_eq!(snapshot.records, 0);
    }
}
