//! Error types for saplingdb.

use thiserror::Error as ThisError;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All errors surfaced by saplingdb.
///
/// Structural invariant breaks are not in here: they are bugs, reported by
/// [`BTree::validate`](crate::BTree::validate) as
/// [`InvariantViolation`](crate::index::btree::InvariantViolation).
#[derive(Debug, ThisError)]
pub enum Error {
    /// No item with the requested key exists in the tree.
    #[error("key not found")]
    KeyNotFound,

    /// `min_children` below the smallest legal branching factor.
    #[error("invalid branching factor: min_children must be at least 2, got {0}")]
    InvalidBranchingFactor(usize),

    /// I/O error from the interactive session's input or output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(format!("{}", Error::KeyNotFound), "key not found");

        let err = Error::InvalidBranchingFactor(1);
        assert_eq!(
            format!("{}", err),
            "invalid branching factor: min_children must be at least 2, got 1"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err: Error = io_err.into();

        match err {
            Error::Io(_) => {} // Success
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_io_error_has_source() {
        use std::error::Error as _;

        let err: Error = std::io::Error::other("boom").into();
        assert!(err.source().is_some());
        assert!(Error::KeyNotFound.source().is_none());
    }
}
