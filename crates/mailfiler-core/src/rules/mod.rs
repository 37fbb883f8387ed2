//! Filing rules.
//!
//! A rule pairs a [`RulePredicate`] with a [`Priority`] and a target folder.
//! Each account keeps its rules in a [`RuleStore`] sorted by the configured
//! [`PriorityOrder`]; the first matching rule decides where a mail is filed.
//!
//! # Example
//!
//! ```
//! use mailfiler_core::mailbox::MailboxPath;
//! use mailfiler_core::rules::{Priority, PriorityOrder, Rule, RulePredicate, RuleStore};
//! use mailfiler_definition::decode_rule_definition;
//!
//! let predicate: RulePredicate = decode_rule_definition("subject-includes: mjt")?.into();
//! let mut store = RuleStore::new(PriorityOrder::Ascending);
//! store.add(Rule::new(predicate, Priority::new(3)?, MailboxPath::parse("/inbox/uni")?))?;
//! assert_eq!(store.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod model;
mod priority;
mod store;

pub use model::{Rule, RulePredicate};
pub use priority::{Priority, PriorityOrder};
pub use store::RuleStore;
