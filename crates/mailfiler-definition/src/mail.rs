//! Mail definition decoding.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;

use crate::error::{Error, Result};
use crate::words::{extract_words, parse_timestamp, strip_field};

const SENDER: &str = "sender:";
const SUBJECT: &str = "subject:";
const RECIPIENTS: &str = "recipients:";
const RECEIVED: &str = "received:";

/// Envelope metadata of a mail, decoded from its definition text.
///
/// ```text
/// sender: testy@gmail.com
/// subject: Hello, MJT!
/// recipients: pesho@gmail.com, gosho@gmail.com,
/// received: 2022-12-08 14:14
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MailDefinition {
    /// Sender email address.
    pub sender: String,
    /// Recipient email addresses. Empty when the definition names none.
    pub recipients: BTreeSet<String>,
    /// Subject line, if present.
    pub subject: Option<String>,
    /// Time the mail was received, if present.
    pub received_at: Option<NaiveDateTime>,
}

impl MailDefinition {
    /// Decodes a mail definition.
    ///
    /// Lines with an unknown prefix are ignored. When a field repeats, the
    /// last occurrence wins.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] if there is no `sender:` line, or
    /// [`Error::InvalidTimestamp`] if `received:` is malformed.
    pub fn parse(text: &str) -> Result<Self> {
        let mut sender = None;
        let mut recipients = BTreeSet::new();
        let mut subject = None;
        let mut received_at = None;

        for line in text.lines() {
            if let Some(value) = strip_field(line, SUBJECT) {
                subject = Some(value.trim().to_string());
            } else if let Some(value) = strip_field(line, RECIPIENTS) {
                recipients = extract_words(value);
            } else if let Some(value) = strip_field(line, RECEIVED) {
                received_at = Some(parse_timestamp(value)?);
            } else if let Some(value) = strip_field(line, SENDER) {
                sender = Some(value.trim().to_string());
            }
        }

        let sender = sender
            .filter(|s| !s.is_empty())
            .ok_or(Error::MissingField("sender"))?;

        Ok(Self {
            sender,
            recipients,
            subject,
            received_at,
        })
    }
}

/// Decodes a mail definition. See [`MailDefinition::parse`].
///
/// # Errors
///
/// Propagates the errors of [`MailDefinition::parse`].
pub fn decode_mail_definition(text: &str) -> Result<MailDefinition> {
    MailDefinition::parse(text)
}
