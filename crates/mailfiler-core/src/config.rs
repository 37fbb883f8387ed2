//! Router configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::mailbox::MailNameSequence;
use crate::rules::PriorityOrder;

/// Uniqueness scope of minted mail names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameScope {
    /// One sequence shared by every account.
    #[default]
    Global,
    /// Each account numbers its own mail.
    PerAccount,
}

/// How stored mail is named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MailNaming {
    /// Prefix followed by the sequence number, e.g. `mail` gives `mail1`.
    pub prefix: String,
    /// Uniqueness scope of the sequence.
    pub scope: NameScope,
}

impl Default for MailNaming {
    fn default() -> Self {
        Self {
            prefix: MailNameSequence::DEFAULT_PREFIX.to_string(),
            scope: NameScope::default(),
        }
    }
}

/// Settings of a [`MailRouter`](crate::MailRouter).
///
/// Every field has a default, so `{}` is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Mail naming.
    pub naming: MailNaming,
    /// Rule evaluation order.
    pub priority_order: PriorityOrder,
}

impl RouterConfig {
    /// Parse a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns `Error::Serde` if the JSON is malformed or has unknown enum
    /// values.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
