//! Record store subsystem for skipdb
//!
//! Layers, caller first:
//!
//! - `Store`: reader/writer lock facade, the only public entry point
//! - `RecordStore`: sequential identifier assignment over the index
//! - `index::SkipList`: ordered storage, identifier-agnostic
//!
//! # Invariants
//!
//! - Identifiers start at 1, strictly increase and are never reused
//! - A failed insert consumes no identifier
//! - `update` never creates a record
//! - Pages follow identifier order; a page past the end is empty

mod config;
mod engine;
mod errors;
mod guard;
mod page;
mod record;

pub use config::{StoreConfig, MAX_LEVEL_CEILING};
pub use engine::{Engine, RecordStore};
pub use errors::{StoreError, StoreResult};
pub use guard::Store;
pub use page::{PageWindow, Pagination};
pub use record::{Record, RecordId};
