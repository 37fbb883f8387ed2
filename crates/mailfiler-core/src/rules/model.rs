//! Filing rule data models.

use std::collections::BTreeSet;

use mailfiler_definition::RuleDefinition;
use serde::Serialize;

use super::priority::Priority;
use crate::mailbox::{MailFile, MailMetadata, MailboxPath};

/// Match conditions of a rule. Unset conditions always hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct RulePredicate {
    /// Exact sender address.
    pub sender: Option<String>,
    /// At least one of these must be a recipient.
    pub recipients: BTreeSet<String>,
    /// All of these must occur in the subject.
    pub subject_words: BTreeSet<String>,
    /// Each of these must occur in the subject or the body.
    pub subject_or_body_words: BTreeSet<String>,
}

impl From<RuleDefinition> for RulePredicate {
    fn from(definition: RuleDefinition) -> Self {
        Self {
            sender: definition.sender,
            recipients: definition.recipients,
            subject_words: definition.subject_words,
            subject_or_body_words: definition.subject_or_body_words,
        }
    }
}

impl RulePredicate {
    /// Whether a mail with this metadata and body satisfies every set
    /// condition.
    #[must_use]
    pub fn matches(&self, metadata: &MailMetadata, body: &str) -> bool {
        self.sender_matches(metadata)
            && self.recipients_match(metadata)
            && self.subject_matches(metadata)
            && self.subject_or_body_matches(metadata, body)
    }

    /// Like [`RulePredicate::matches`], for a stored mail.
    #[must_use]
    pub fn matches_file(&self, file: &MailFile) -> bool {
        self.matches(file.metadata(), file.content())
    }

    fn sender_matches(&self, metadata: &MailMetadata) -> bool {
        self.sender
            .as_ref()
            .is_none_or(|sender| *sender == metadata.sender)
    }

    fn recipients_match(&self, metadata: &MailMetadata) -> bool {
        self.recipients.is_empty()
            || metadata
                .recipients
                .iter()
                .any(|recipient| self.recipients.contains(recipient))
    }

    fn subject_matches(&self, metadata: &MailMetadata) -> bool {
        if self.subject_words.is_empty() {
            return true;
        }
        metadata.subject.as_deref().is_some_and(|subject| {
            self.subject_words
                .iter()
                .all(|word| subject.contains(word.as_str()))
        })
    }

    fn subject_or_body_matches(&self, metadata: &MailMetadata, body: &str) -> bool {
        let subject = metadata.subject.as_deref().unwrap_or_default();
        self.subject_or_body_words
            .iter()
            .all(|word| body.contains(word.as_str()) || subject.contains(word.as_str()))
    }
}

/// A filing rule: mail matching `predicate` goes to `folder`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    predicate: RulePredicate,
    priority: Priority,
    folder: MailboxPath,
}

impl Rule {
    /// Create a rule targeting an existing folder.
    #[must_use]
    pub const fn new(predicate: RulePredicate, priority: Priority, folder: MailboxPath) -> Self {
        Self {
            predicate,
            priority,
            folder,
        }
    }

    /// Match conditions.
    #[must_use]
    pub const fn predicate(&self) -> &RulePredicate {
        &self.predicate
    }

    /// Priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Target folder.
    #[must_use]
    pub const fn folder(&self) -> &MailboxPath {
        &self.folder
    }

    /// Whether two rules contradict each other.
    ///
    /// They do only when predicate and priority are both identical and the
    /// target folders differ. Identical predicates at different priorities
    /// coexist; the evaluation order decides between them.
    #[must_use]
    pub fn conflicts_with(&self, other: &Self) -> bool {
        let same_predicate = self.predicate == other.predicate;
        let same_priority = self.priority == other.priority;
        same_predicate && same_priority && self.folder != other.folder
    }
}
