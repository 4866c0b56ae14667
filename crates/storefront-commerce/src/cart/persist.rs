//! Snapshot persistence failure reporting.

use std::fmt;

use thiserror::Error;

/// What the cart was doing to its snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotOperation {
    /// Writing the current lines.
    Write,
    /// Removing the snapshot entirely.
    Delete,
}

impl fmt::Display for SnapshotOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Write => write!(f, "write"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// A snapshot update that failed after the in-memory change was applied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to {operation} cart snapshot '{key}': {reason}")]
pub struct PersistenceWriteFailure {
    /// Snapshot key.
    pub key: String,
    /// Operation that failed.
    pub operation: SnapshotOperation,
    /// Underlying store error.
    pub reason: String,
}

/// Receives persistence failures.
///
/// The cart never returns these to its caller; the mutation has already
/// happened and stays visible.
pub trait PersistenceObserver: Send + Sync {
    /// Called once per failed snapshot update.
    fn write_failed(&self, failure: &PersistenceWriteFailure);
}

/// Observer that logs failures as warnings.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl PersistenceObserver for LogObserver {
    fn write_failed(&self, failure: &PersistenceWriteFailure) {
        tracing::warn!(
            key = %failure.key,
            operation = %failure.operation,
            reason = %failure.reason,
            "cart snapshot not persisted"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_message() {
        let failure = PersistenceWriteFailure {
            key: "cart".to_string(),
            operation: SnapshotOperation::Write,
            reason: "store is read-only".to_string(),
        };
        assert_eq!(
            failure.to_string(),
            "failed to write cart snapshot 'cart': store is read-only"
        );
    }
}
