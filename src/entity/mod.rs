//! Record types served by skipdb

mod task;

pub use task::{Task, TaskStatus};
