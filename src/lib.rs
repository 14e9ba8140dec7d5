//! skipdb - an in-memory ordered record store
//!
//! Records are kept in identifier order by a skip list, identifiers are
//! issued sequentially, and a single reader/writer lock serializes
//! mutations while letting reads run in parallel.
//!
//! ```ignore
//! use skipdb::entity::{Task, TaskStatus};
//! use skipdb::store::{RecordStore, Store, StoreConfig};
//!
//! let store: Store<RecordStore<Task>> = Store::new(StoreConfig::default())?;
//! let id = store.insert(Task::new("task-1", TaskStatus::Incompleted))?;
//! assert_eq!(store.page(1, 10)[0].id, id);
//! ```

pub mod entity;
pub mod index;
pub mod observability;
pub mod store;
