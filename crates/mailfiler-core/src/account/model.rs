//! Account model types.

use serde::{Deserialize, Serialize};

/// A registered mail identity.
///
/// Both the display name and the email address are unique across the
/// registry. Accounts are immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Account {
    name: String,
    email: String,
}

impl Account {
    /// Create an account identity.
    ///
    /// Only the registry hands these out, after validation.
    #[must_use]
    pub(crate) fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Display name of the account.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Email address of the account.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

impl std::fmt::Display for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}
