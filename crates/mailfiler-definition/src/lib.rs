//! # mailfiler-definition
//!
//! Decoders for the line-oriented text formats used to describe mail and
//! filing rules.
//!
//! ## Mail definitions
//!
//! ```
//! use mailfiler_definition::decode_mail_definition;
//!
//! let mail = decode_mail_definition(
//!     "sender: testy@gmail.com\nsubject: Hello\nrecipients: a@b.bg, c@d.bg,\nreceived: 2022-12-08 14:14",
//! )?;
//! assert_eq!(mail.sender, "testy@gmail.com");
//! assert_eq!(mail.recipients.len(), 2);
//! # Ok::<(), mailfiler_definition::Error>(())
//! ```
//!
//! ## Rule definitions
//!
//! ```
//! use mailfiler_definition::decode_rule_definition;
//!
//! let rule = decode_rule_definition("subject-includes: mjt, izpit\nfrom: stoyo@fmi.bg")?;
//! assert_eq!(rule.sender.as_deref(), Some("stoyo@fmi.bg"));
//! assert!(rule.subject_words.contains("izpit"));
//! # Ok::<(), mailfiler_definition::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod error;
mod mail;
mod rule;

pub mod words;

pub use error::{Error, Result};
pub use mail::{MailDefinition, decode_mail_definition};
pub use rule::{RuleDefinition, decode_rule_definition};
