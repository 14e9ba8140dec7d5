//! Record identity contract
//!
//! The store assigns identifiers; records carry a typed identifier field
//! that the store stamps on insert and update.

use crate::index::Key;

/// Sequential record identifier, starting at 1
pub type RecordId = Key;

/// A value the record store can hold.
///
/// Records are cloned out of the store on reads so no reference escapes
/// the lock.
pub trait Record: Clone {
    /// Returns the identifier currently carried by the record
    fn id(&self) -> RecordId;

    /// Stamps the identifier assigned by the store
    fn set_id(&mut self, id: RecordId);
}
