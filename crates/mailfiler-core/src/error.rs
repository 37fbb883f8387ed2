//! Error types for the core library.

use thiserror::Error;

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Caller input is empty, blank or out of range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Account name or email is already registered.
    #[error("Account already exists: {0}")]
    DuplicateAccount(String),

    /// Folder not found.
    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    /// A folder or mail entry already occupies the path.
    #[error("Folder already exists: {0}")]
    FolderAlreadyExists(String),

    /// An intermediate folder of the path is missing.
    #[error("Path not found: {0}")]
    PathNotFound(String),

    /// The path is malformed or outside the writable part of the tree.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// A rule with the same predicate and priority targets another folder.
    #[error("Rule conflicts with existing rule targeting {existing}")]
    ConflictingRule {
        /// Target folder of the rule already stored.
        existing: String,
    },

    /// Mail or rule definition could not be decoded.
    #[error("Definition error: {0}")]
    Definition(#[from] mailfiler_definition::Error),

    /// Configuration could not be deserialized.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
