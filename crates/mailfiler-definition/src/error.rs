//! Error types for definition decoding.

/// Result type alias for decoding operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Definition decoding errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The same field prefix appeared more than once in a rule definition.
    #[error("Duplicate field in definition: {0}")]
    DuplicateField(&'static str),

    /// A required field is absent.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The `received:` value is not a `YYYY-MM-DD HH:MM` timestamp.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
