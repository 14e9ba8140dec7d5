//! Reader/writer facade over a record engine
//!
//! `Store` is the only way callers reach an engine. One `RwLock` covers
//! the whole engine:
//!
//! - insert, update and delete hold the exclusive lock for their full run
//! - count, page, get, paginate and verify share the lock
//! - the records gauge is stored from the engine count inside the
//!   exclusive section; counters and logging happen after the lock is
//!   released
//!
//! Exclusive-lock acquisition order is the total order of mutations, and
//! identifier assignment happens inside it, so concurrent inserts never
//! collide on an id. A store is built explicitly and shared by `Arc`.

use std::sync::RwLock;

use crate::observability::{log_event_with_fields, Event, MetricsRegistry, MetricsSnapshot};

use super::config::StoreConfig;
use super::engine::{Engine, RecordStore};
use super::errors::{StoreError, StoreResult};
use super::page::{PageWindow, Pagination};
use super::record::{Record, RecordId};

/// Thread-safe record store
#[derive(Debug)]
pub struct Store<E> {
    engine: RwLock<E>,
    metrics: MetricsRegistry,
}

impl<R: Record> Store<RecordStore<R>> {
    /// Creates an empty skip-list-backed store
    pub fn new(config: StoreConfig) -> StoreResult<Self> {
        Ok(Self::with_engine(RecordStore::new(config)?))
    }
}

impl<E: Engine> Store<E> {
    /// Wraps an existing engine
    pub fn with_engine(engine: E) -> Self {
        let records = engine.count();
        let capacity = engine.capacity();

        let metrics = MetricsRegistry::new();
        metrics.set_records(records as u64);

        log_event_with_fields(
            Event::StoreOpened,
            &[
                ("capacity", capacity.to_string().as_str()),
                ("records", records.to_string().as_str()),
            ],
        );

        Self {
            engine: RwLock::new(engine),
            metrics,
        }
    }

    // Nodes are fully built before the first link changes, so a panicking
    // writer never leaves a half-spliced index behind a poisoned lock.
    fn with_read<T>(&self, f: impl FnOnce(&E) -> T) -> T {
        let (value, recovered) = match self.engine.read() {
            Ok(engine) => (f(&*engine), false),
            Err(poisoned) => {
                self.engine.clear_poison();
                (f(&*poisoned.into_inner()), true)
            }
        };

        if recovered {
            log_event_with_fields(Event::LockPoisoned, &[("mode", "read")]);
        }
        value
    }

    fn with_write<T>(&self, f: impl FnOnce(&mut E) -> T) -> T {
        let (value, recovered) = match self.engine.write() {
            Ok(mut engine) => (f(&mut *engine), false),
            Err(poisoned) => {
                self.engine.clear_poison();
                (f(&mut *poisoned.into_inner()), true)
            }
        };

        if recovered {
            log_event_with_fields(Event::LockPoisoned, &[("mode", "write")]);
        }
        value
    }

    /// Inserts a record and returns the identifier assigned to it.
    ///
    /// Fails with `CapacityExceeded` when the store is full; the count and
    /// the identifier counter are unchanged in that case.
    pub fn insert(&self, record: E::Record) -> StoreResult<RecordId> {
        let result = self.with_write(|engine| {
            let result = engine.insert(record);
            self.metrics.set_records(engine.count() as u64);
            result
        });

        match result {
            Ok(_) => self.metrics.record_insert(),
            Err(_) => self.metrics.record_insert_rejected(),
        }
        result
    }

    /// Number of live records
    pub fn count(&self) -> usize {
        self.with_read(|engine| engine.count())
    }

    /// Returns page `page` (1-indexed) of `page_size` records in identifier
    /// order. Callers validate both inputs; a page past the end is empty.
    pub fn page(&self, page: usize, page_size: usize) -> Vec<E::Record> {
        let records = self.with_read(|engine| engine.page(page, page_size));
        self.metrics.record_page_read();
        records
    }

    /// Returns one page along with the total it was taken from, both read
    /// under the same shared lock.
    pub fn paginate(&self, window: PageWindow) -> Pagination<E::Record> {
        let (total, items) = self.with_read(|engine| {
            (engine.count(), engine.page(window.page(), window.page_size()))
        });
        self.metrics.record_page_read();

        Pagination {
            page: window.page(),
            page_size: window.page_size(),
            total,
            items,
        }
    }

    /// Returns the record with identifier `id`
    pub fn get(&self, id: RecordId) -> Option<E::Record> {
        self.with_read(|engine| engine.get(id))
    }

    /// Deletes a record. The identifier is never issued again.
    pub fn delete(&self, id: RecordId) -> StoreResult<()> {
        let found = self.with_write(|engine| {
            let found = engine.delete(id);
            self.metrics.set_records(engine.count() as u64);
            found
        });

        if found {
            self.metrics.record_delete();
            Ok(())
        } else {
            self.metrics.record_delete_missed();
            Err(StoreError::NotFound(id))
        }
    }

    /// Replaces the record stored under `id`. Never creates a record.
    pub fn update(&self, id: RecordId, record: E::Record) -> StoreResult<()> {
        let result = self.with_write(|engine| engine.update(id, record));

        match result {
            Ok(()) => self.metrics.record_update(),
            Err(_) => self.metrics.record_update_missed(),
        }
        result
    }

    /// Checks the structural invariants of the index.
    ///
    /// A failure is a defect: it is logged at FATAL and returned.
    pub fn verify(&self) -> StoreResult<()> {
        let result = self.with_read(|engine| engine.verify());

        if let Err(err) = &result {
            log_event_with_fields(
                Event::InvariantViolated,
                &[("code", err.code()), ("reason", err.to_string().as_str())],
            );
        }
        result
    }

    /// Capacity ceiling
    pub fn capacity(&self) -> usize {
        self.with_read(|engine| engine.capacity())
    }

    /// Current operation counters
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}
