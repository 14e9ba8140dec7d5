//! Record engines
//!
//! An engine owns identifier assignment and record order. It is not
//! thread-safe on its own; `Store` serializes access to it.
//!
//! # Identifier policy
//!
//! - The first issued identifier is 1
//! - Every issued identifier is greater than all earlier ones
//! - The counter advances only when an insert succeeds
//! - Identifiers are never reused, even after delete

use crate::index::{IndexError, SkipList};

use super::config::StoreConfig;
use super::errors::{StoreError, StoreResult};
use super::record::{Record, RecordId};

/// The operation set a `Store` exposes, without locking.
pub trait Engine {
    /// Record type held by the engine
    type Record: Record;

    /// Assigns the next identifier, stamps it on the record and stores it
    fn insert(&mut self, record: Self::Record) -> StoreResult<RecordId>;

    /// Number of live records
    fn count(&self) -> usize;

    /// Returns page `page` (1-indexed) of `page_size` records in
    /// identifier order; empty when the window starts past the end
    fn page(&self, page: usize, page_size: usize) -> Vec<Self::Record>;

    /// Returns the record with identifier `id`
    fn get(&self, id: RecordId) -> Option<Self::Record>;

    /// Removes the record, returning whether it existed
    fn delete(&mut self, id: RecordId) -> bool;

    /// Replaces an existing record; never creates one
    fn update(&mut self, id: RecordId, record: Self::Record) -> StoreResult<()>;

    /// Capacity ceiling
    fn capacity(&self) -> usize;

    /// Checks structural invariants of the underlying index
    fn verify(&self) -> StoreResult<()>;
}

/// Skip-list-backed engine with a sequential identifier counter
#[derive(Debug)]
pub struct RecordStore<R> {
    index: SkipList<R>,
    next_id: RecordId,
    config: StoreConfig,
}

impl<R: Record> RecordStore<R> {
    /// Creates an empty store after validating `config`
    pub fn new(config: StoreConfig) -> StoreResult<Self> {
        config.validate()?;
        Ok(Self {
            index: SkipList::new(config.max_entries, config.max_level),
            next_id: 1,
            config,
        })
    }

    /// Creates an empty store with reproducible tower heights
    pub fn with_seed(config: StoreConfig, seed: u64) -> StoreResult<Self> {
        config.validate()?;
        Ok(Self {
            index: SkipList::with_seed(config.max_entries, config.max_level, seed),
            next_id: 1,
            config,
        })
    }

    /// Identifier the next successful insert will receive
    pub fn next_id(&self) -> RecordId {
        self.next_id
    }

    /// Returns the configuration the store was built with
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Borrows the record with identifier `id`
    pub fn record(&self, id: RecordId) -> Option<&R> {
        self.index.get(id)
    }

    /// Iterates records in identifier order
    pub fn records(&self) -> impl Iterator<Item = &R> {
        self.index.iter().map(|(_, record)| record)
    }

    /// Read access to the underlying index
    pub fn index(&self) -> &SkipList<R> {
        &self.index
    }
}

impl<R: Record> Engine for RecordStore<R> {
    type Record = R;

    fn insert(&mut self, mut record: R) -> StoreResult<RecordId> {
        let id = self.next_id;
        record.set_id(id);
        self.index.insert(id, record)?;
        self.next_id += 1;
        Ok(id)
    }

    fn count(&self) -> usize {
        self.index.count()
    }

    fn page(&self, page: usize, page_size: usize) -> Vec<R> {
        self.index
            .range_by_page(page, page_size)
            .into_iter()
            .cloned()
            .collect()
    }

    fn get(&self, id: RecordId) -> Option<R> {
        self.index.get(id).cloned()
    }

    fn delete(&mut self, id: RecordId) -> bool {
        self.index.delete(id)
    }

    fn update(&mut self, id: RecordId, mut record: R) -> StoreResult<()> {
        if self.index.remove(id).is_none() {
            return Err(StoreError::NotFound(id));
        }

        // A slot was just freed, so this cannot hit capacity
        record.set_id(id);
        self.index.insert(id, record)?;
        Ok(())
    }

    fn capacity(&self) -> usize {
        self.index.max_entries()
    }

    fn verify(&self) -> StoreResult<()> {
        self.index.check_invariants()?;

        if let Some((last, _)) = self.index.iter().last() {
            if last >= self.next_id {
                return Err(IndexError::invariant_violated(
                    0,
                    format!("key {} not below next identifier {}", last, self.next_id),
                )
                .into());
            }
        }

        Ok(())
    }
}
