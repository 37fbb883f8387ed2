//! Mail as returned to callers.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::account::Account;
use crate::mailbox::MailFile;

/// A stored mail joined with its sender's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mail {
    /// Registered account that sent the mail.
    pub sender: Account,
    /// Recipient email addresses.
    pub recipients: BTreeSet<String>,
    /// Subject line, if any.
    pub subject: Option<String>,
    /// Body text.
    pub body: String,
    /// Receive time, if known.
    pub received_at: Option<NaiveDateTime>,
}

impl Mail {
    /// Build the view of `file` sent by `sender`.
    #[must_use]
    pub fn new(file: MailFile, sender: Account) -> Self {
        let metadata = file.metadata();
        Self {
            recipients: metadata.recipients.clone(),
            subject: metadata.subject.clone(),
            received_at: metadata.received_at,
            body: file.content().to_string(),
            sender,
        }
    }
}
