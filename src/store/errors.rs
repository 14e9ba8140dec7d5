//! # Record Store Errors

use thiserror::Error;

use crate::index::{IndexError, IndexErrorCode};

use super::record::RecordId;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Record store errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The index is at its configured ceiling
    #[error("Capacity exceeded (max: {max} records)")]
    CapacityExceeded { max: usize },

    #[error("Record not found: {0}")]
    NotFound(RecordId),

    #[error("Invalid page window: page={page}, page_size={page_size}")]
    InvalidPage { page: usize, page_size: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Structural defect reported by the index
    #[error("{0}")]
    Index(IndexError),
}

impl StoreError {
    /// Returns the stable string code for the error
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::CapacityExceeded { .. } => "SKIP_CAPACITY_EXCEEDED",
            StoreError::NotFound(_) => "SKIP_RECORD_NOT_FOUND",
            StoreError::InvalidPage { .. } => "SKIP_INVALID_PAGE",
            StoreError::InvalidConfig(_) => "SKIP_INVALID_CONFIG",
            StoreError::Index(err) => err.code().code(),
        }
    }

    /// Only structural defects are fatal
    pub fn is_fatal(&self) -> bool {
        matches!(self, StoreError::Index(err) if err.is_fatal())
    }
}

impl From<IndexError> for StoreError {
    fn from(err: IndexError) -> Self {
        match err.code() {
            IndexErrorCode::SkipCapacityExceeded => match err.limit() {
                Some(max) => StoreError::CapacityExceeded { max },
                None => StoreError::Index(err),
            },
            IndexErrorCode::SkipKeyNotFound => match err.key() {
                Some(key) => StoreError::NotFound(key),
                None => StoreError::Index(err),
            },
            _ => StoreError::Index(err),
        }
    }
}
