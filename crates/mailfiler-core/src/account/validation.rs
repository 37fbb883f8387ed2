//! Argument validation.

use crate::error::{Error, Result};

/// Validation error for an account identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Account name is empty or blank.
    EmptyName,
    /// Email address is empty or blank.
    EmptyEmail,
}

impl ValidationError {
    /// Get human-readable error message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::EmptyName => "Account name is required",
            Self::EmptyEmail => "Email address is required",
        }
    }

    /// Get the field name this error relates to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyName => "name",
            Self::EmptyEmail => "email",
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for Error {
    fn from(error: ValidationError) -> Self {
        Self::InvalidArgument(error.message().to_string())
    }
}

/// Validate the identity fields of a new account.
///
/// The name is checked before the email.
///
/// # Errors
///
/// Returns the first `ValidationError` found.
pub fn validate_identity(name: &str, email: &str) -> std::result::Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if email.trim().is_empty() {
        return Err(ValidationError::EmptyEmail);
    }
    Ok(())
}

/// Reject empty or whitespace-only caller input.
///
/// # Errors
///
/// Returns `Error::InvalidArgument` naming `field`.
pub fn require_text(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidArgument(format!("{field} must not be blank")));
    }
    Ok(())
}
