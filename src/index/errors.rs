//! Index error types
//!
//! Error codes:
//! - SKIP_CAPACITY_EXCEEDED (ERROR)
//! - SKIP_KEY_NOT_FOUND (ERROR)
//! - SKIP_INVARIANT_VIOLATED (FATAL)

use std::fmt;

use super::skiplist::Key;

/// Severity levels for index errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Operation rejected, structure untouched
    Error,
    /// Structure is corrupt, system must halt
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Index-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexErrorCode {
    /// Entry count reached the configured ceiling
    SkipCapacityExceeded,
    /// No entry with the requested key
    SkipKeyNotFound,
    /// A level chain is out of order or inconsistent with level 0
    SkipInvariantViolated,
}

impl IndexErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            IndexErrorCode::SkipCapacityExceeded => "SKIP_CAPACITY_EXCEEDED",
            IndexErrorCode::SkipKeyNotFound => "SKIP_KEY_NOT_FOUND",
            IndexErrorCode::SkipInvariantViolated => "SKIP_INVARIANT_VIOLATED",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            IndexErrorCode::SkipInvariantViolated => Severity::Fatal,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for IndexErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Index error type with full context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexError {
    /// Error code
    code: IndexErrorCode,
    /// Human-readable message
    message: String,
    /// Key if applicable
    key: Option<Key>,
    /// Capacity ceiling for capacity errors
    limit: Option<usize>,
}

impl IndexError {
    /// Create a capacity exceeded error
    pub fn capacity_exceeded(max_entries: usize) -> Self {
        Self {
            code: IndexErrorCode::SkipCapacityExceeded,
            message: format!("Index is full ({} entries)", max_entries),
            key: None,
            limit: Some(max_entries),
        }
    }

    /// Create a key not found error
    pub fn not_found(key: Key) -> Self {
        Self {
            code: IndexErrorCode::SkipKeyNotFound,
            message: format!("No entry for key {}", key),
            key: Some(key),
            limit: None,
        }
    }

    /// Create an invariant violation error
    pub fn invariant_violated(level: usize, reason: impl Into<String>) -> Self {
        Self {
            code: IndexErrorCode::SkipInvariantViolated,
            message: format!("Level {}: {}", level, reason.into()),
            key: None,
            limit: None,
        }
    }

    /// Attach the offending key
    pub fn with_key(mut self, key: Key) -> Self {
        self.key = Some(key);
        self
    }

    /// Returns the error code
    pub fn code(&self) -> IndexErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the key if applicable
    pub fn key(&self) -> Option<Key> {
        self.key
    }

    /// Returns the capacity ceiling for capacity errors
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Returns whether this is a fatal error
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code.severity(), self.code.code(), self.message)?;
        if let Some(key) = self.key {
            write!(f, " [key {}]", key)?;
        }
        Ok(())
    }
}

impl std::error::Error for IndexError {}

/// Result type for index operations
pub type IndexResult<T> = Result<T, IndexError>;
