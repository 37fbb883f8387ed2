//! Per-account rule storage.

use std::cmp::Ordering;

use tracing::{debug, warn};

use super::model::Rule;
use super::priority::PriorityOrder;
use crate::error::{Error, Result};
use crate::mailbox::MailMetadata;

/// Filing rules of one account, kept in evaluation order.
///
/// Rules of equal priority keep their insertion order.
#[derive(Debug, Clone, Default)]
pub struct RuleStore {
    rules: Vec<Rule>,
    order: PriorityOrder,
}

impl RuleStore {
    /// Create an empty store evaluating rules in `order`.
    #[must_use]
    pub const fn new(order: PriorityOrder) -> Self {
        Self {
            rules: Vec::new(),
            order,
        }
    }

    /// Check that `rule` could be added.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConflictingRule` if a stored rule has the same
    /// predicate and priority but another target folder.
    pub fn check(&self, rule: &Rule) -> Result<()> {
        match self.rules.iter().find(|existing| existing.conflicts_with(rule)) {
            Some(existing) => {
                warn!(
                    "Rule for {} conflicts with existing rule for {} at priority {}",
                    rule.folder(),
                    existing.folder(),
                    existing.priority()
                );
                Err(Error::ConflictingRule {
                    existing: existing.folder().to_string(),
                })
            }
            None => Ok(()),
        }
    }

    /// Add a rule.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConflictingRule`; see [`RuleStore::check`].
    pub fn add(&mut self, rule: Rule) -> Result<()> {
        self.check(&rule)?;
        self.insert(rule);
        Ok(())
    }

    /// Insert after every rule that is evaluated no later than `rule`.
    pub(crate) fn insert(&mut self, rule: Rule) {
        let order = self.order;
        let index = self.rules.partition_point(|existing| {
            order.compare(existing.priority(), rule.priority()) != Ordering::Greater
        });
        debug!(
            "Adding rule for {} at priority {} (position {index})",
            rule.folder(),
            rule.priority()
        );
        self.rules.insert(index, rule);
    }

    /// First rule, in evaluation order, matching a mail.
    #[must_use]
    pub fn first_matching(&self, metadata: &MailMetadata, body: &str) -> Option<&Rule> {
        self.rules
            .iter()
            .find(|rule| rule.predicate().matches(metadata, body))
    }

    /// Rules in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Evaluation order of this store.
    #[must_use]
    pub const fn order(&self) -> PriorityOrder {
        self.order
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rule is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
