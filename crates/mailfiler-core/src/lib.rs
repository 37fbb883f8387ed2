//! # mailfiler-core
//!
//! In-memory mail routing for a set of accounts.
//!
//! This crate provides:
//! - Account registration with unique names and email addresses
//! - Per-account folder trees rooted at `/inbox` and `/sent`
//! - Priority-ordered filing rules, applied on receipt and retroactively
//!   to the inbox when a rule is added
//! - Sending with fan-out to every registered recipient
//!
//! All operations go through [`MailRouter`], which is `Send + Sync` and may
//! be shared between threads.
//!
//! # Example
//!
//! ```
//! use mailfiler_core::MailRouter;
//!
//! let router = MailRouter::new();
//! router.create_account("Ivan", "ivan@abv.bg")?;
//! router.create_account("Pesho", "pesho@gmail.com")?;
//!
//! router.create_folder("Pesho", "/inbox/uni")?;
//! router.add_rule("Pesho", "/inbox/uni", "subject-includes: mjt", 3)?;
//!
//! router.send_mail(
//!     "Ivan",
//!     "sender: ivan@abv.bg\nsubject: mjt homework\nrecipients: pesho@gmail.com",
//!     "deadline is friday",
//! )?;
//!
//! let mails = router.get_mails_from_folder("Pesho", "/inbox/uni")?;
//! assert_eq!(mails.len(), 1);
//! assert_eq!(mails[0].sender.name(), "Ivan");
//! # Ok::<(), mailfiler_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod account;
mod config;
mod error;
pub mod mailbox;
pub mod router;
pub mod rules;

pub use account::{Account, AccountRegistry, ValidationError};
pub use config::{MailNaming, NameScope, RouterConfig};
pub use error::{Error, Result};
pub use mailbox::{MailFile, MailMetadata, MailboxPath, MailboxTree};
pub use router::{Mail, MailRouter};
pub use rules::{Priority, PriorityOrder, Rule, RulePredicate, RuleStore};
