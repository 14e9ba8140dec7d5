//! Ordered index subsystem for skipdb
//!
//! A skip list over integer keys with opaque payloads. The index knows
//! nothing about identifier policy; the record store above it decides
//! which keys exist.
//!
//! # Design Principles
//!
//! - In-memory only: no persistence
//! - Arena storage: nodes addressed by slot index, freed slots reused
//! - Deterministic order: iteration follows key order, never insertion order
//!
//! # Invariants
//!
//! - Every level chain is strictly increasing
//! - Level 0 contains every live key exactly once
//! - Entry count never exceeds `max_entries`

mod errors;
mod skiplist;

pub use errors::{IndexError, IndexErrorCode, IndexResult, Severity};
pub use skiplist::{Iter, Key, SkipList};
