//! Per-account folder trees.
//!
//! Every account owns one [`MailboxTree`]. Its root holds two permanent
//! folders, `/inbox` and `/sent`; user folders nest beneath `/inbox`.
//! Folders own their children exclusively, and a mail file lives in exactly
//! one folder at a time.
//!
//! # Example
//!
//! ```
//! use mailfiler_core::mailbox::{MailboxPath, MailboxTree};
//!
//! let mut tree = MailboxTree::new();
//! tree.create_folder(&MailboxPath::parse("/inbox/gaming/")?)?;
//!
//! let gaming = tree.resolve_directory(&MailboxPath::parse("/inbox/gaming")?)?;
//! assert!(gaming.is_some());
//! # Ok::<(), mailfiler_core::Error>(())
//! ```

mod naming;
mod path;
mod tree;

pub use naming::MailNameSequence;
pub use path::{INBOX, MailboxPath, SENT, SEPARATOR, validate_name};
pub use tree::{Directory, Entry, MailFile, MailMetadata, MailboxTree};
