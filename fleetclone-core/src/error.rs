//! Error types for fleetclone

use thiserror::Error;

/// Result type alias for fleetclone operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for fleetclone operations
///
/// Only configuration and pre-run validation problems surface as `Error`.
/// Per-repository clone failures are outcomes recorded in the aggregate result.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration source could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// The merged configuration violates a field constraint
    #[error("Invalid value for `{field}`: {reason}")]
    Validation {
        /// Name of the offending option
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// Two repository descriptors share a name
    #[error("Duplicate repository name: {0}")]
    DuplicateRepository(String),

    /// Git error
    #[error("Git error: {0}")]
    Git(String),
}

impl Error {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Error::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Whether this error stops a run before any clone starts
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::Validation { .. } | Error::DuplicateRepository(_)
        )
    }
}
