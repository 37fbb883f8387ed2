//! Rule definition decoding.

use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::words::{extract_words, strip_field};

const FROM: &str = "from:";
const RECIPIENTS_INCLUDES: &str = "recipients-includes:";
const SUBJECT_INCLUDES: &str = "subject-includes:";
const SUBJECT_OR_BODY_INCLUDES: &str = "subject-or-body-includes:";

/// Match conditions of a filing rule, decoded from its definition text.
///
/// Every field is optional. An empty set means the condition is unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleDefinition {
    /// Exact sender address required by `from:`.
    pub sender: Option<String>,
    /// Recipients listed by `recipients-includes:`; any one suffices.
    pub recipients: BTreeSet<String>,
    /// Words listed by `subject-includes:`; all must occur in the subject.
    pub subject_words: BTreeSet<String>,
    /// Words listed by `subject-or-body-includes:`; each must occur in the
    /// subject or the body.
    pub subject_or_body_words: BTreeSet<String>,
}

impl RuleDefinition {
    /// Decodes a rule definition.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateField`] if a prefix appears more than once.
    pub fn parse(text: &str) -> Result<Self> {
        let mut sender: Option<String> = None;
        let mut recipients: Option<BTreeSet<String>> = None;
        let mut subject_words: Option<BTreeSet<String>> = None;
        let mut subject_or_body_words: Option<BTreeSet<String>> = None;

        for line in text.lines() {
            if let Some(value) = strip_field(line, SUBJECT_OR_BODY_INCLUDES) {
                set_once(
                    &mut subject_or_body_words,
                    extract_words(value),
                    SUBJECT_OR_BODY_INCLUDES,
                )?;
            } else if let Some(value) = strip_field(line, SUBJECT_INCLUDES) {
                set_once(&mut subject_words, extract_words(value), SUBJECT_INCLUDES)?;
            } else if let Some(value) = strip_field(line, RECIPIENTS_INCLUDES) {
                set_once(&mut recipients, extract_words(value), RECIPIENTS_INCLUDES)?;
            } else if let Some(value) = strip_field(line, FROM) {
                set_once(&mut sender, value.trim().to_string(), FROM)?;
            }
        }

        Ok(Self {
            sender: sender.filter(|s| !s.is_empty()),
            recipients: recipients.unwrap_or_default(),
            subject_words: subject_words.unwrap_or_default(),
            subject_or_body_words: subject_or_body_words.unwrap_or_default(),
        })
    }

    /// Returns `true` if no condition is set, i.e. the rule matches any mail.
    #[must_use]
    pub fn is_unconditional(&self) -> bool {
        self.sender.is_none()
            && self.recipients.is_empty()
            && self.subject_words.is_empty()
            && self.subject_or_body_words.is_empty()
    }
}

fn set_once<T>(slot: &mut Option<T>, value: T, field: &'static str) -> Result<()> {
    if slot.is_some() {
        return Err(Error::DuplicateField(field));
    }
    *slot = Some(value);
    Ok(())
}

/// Decodes a rule definition. See [`RuleDefinition::parse`].
///
/// # Errors
///
/// Propagates the errors of [`RuleDefinition::parse`].
pub fn decode_rule_definition(text: &str) -> Result<RuleDefinition> {
    RuleDefinition::parse(text)
}
