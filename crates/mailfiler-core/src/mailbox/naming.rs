//! Mail file name minting.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic source of mail file names: `mail1`, `mail2`, ...
///
/// Owned by whoever decides the uniqueness scope: the router for
/// process-wide names, or each account's space for per-account names.
#[derive(Debug)]
pub struct MailNameSequence {
    prefix: String,
    next: AtomicU64,
}

impl MailNameSequence {
    /// Prefix used when none is configured.
    pub const DEFAULT_PREFIX: &'static str = "mail";

    /// Create a sequence starting at 1.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }

    /// Mint the next name.
    pub fn next_name(&self) -> String {
        let number = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}{number}", self.prefix)
    }
}

impl Default for MailNameSequence {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PREFIX)
    }
}
