//! Error types
//!
//! `MutationError` is the typed failure of every store mutation. A failed
//! mutation never produces a new snapshot. `ApiError` wraps it for the
//! session facade, configuration, logging and the advisor boundary.

use thiserror::Error;

/// Failure of a Mutation Engine operation. The source snapshot is untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    /// Empty (or otherwise unusable) name supplied to create/rename
    #[error("Invalid name: {0}")]
    Validation(String),

    /// Target path already occupied
    #[error("Path already exists: {0}")]
    Collision(String),

    /// Unknown node id, or a destination that is not an existing folder
    #[error("Not found: {0}")]
    NotFound(String),

    /// Folder moved onto itself or into its own subtree
    #[error("Cannot move {source_path} into {destination}")]
    CyclicMove {
        source_path: String,
        destination: String,
    },
}

/// Facade-level error
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Mutation(#[from] MutationError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Location advisor error: {0}")]
    AdvisorError(String),

    #[error("Seed data error: {0}")]
    SeedError(String),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::AdvisorError(err.to_string())
    }
}
