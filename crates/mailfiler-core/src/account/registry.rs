//! Account registry.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::info;

use super::model::Account;
use super::validation::validate_identity;
use crate::error::{Error, Result};
use crate::mailbox::{MailNameSequence, MailboxTree};
use crate::rules::{PriorityOrder, RuleStore};

/// Mutable per-account state: the folder tree and the filing rules.
#[derive(Debug)]
pub struct AccountSpace {
    /// Folder tree rooted at `/`, holding `inbox` and `sent`.
    pub tree: MailboxTree,
    /// Filing rules in evaluation order.
    pub rules: RuleStore,
    /// Mail name sequence used when names are scoped per account.
    pub names: MailNameSequence,
}

impl AccountSpace {
    fn new(priority_order: PriorityOrder, name_prefix: &str) -> Self {
        Self {
            tree: MailboxTree::new(),
            rules: RuleStore::new(priority_order),
            names: MailNameSequence::new(name_prefix),
        }
    }
}

/// A registered account together with its lock-protected state.
#[derive(Debug)]
pub struct AccountEntry {
    account: Account,
    space: Mutex<AccountSpace>,
}

impl AccountEntry {
    /// Identity of this account.
    #[must_use]
    pub const fn account(&self) -> &Account {
        &self.account
    }

    /// Lock the account's tree and rules.
    ///
    /// A poisoned lock is recovered: state is only mutated after all
    /// checks have passed, so a panicking holder cannot leave it torn.
    pub fn lock(&self) -> MutexGuard<'_, AccountSpace> {
        self.space.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Registry of accounts, indexed by name and by email.
#[derive(Debug)]
pub struct AccountRegistry {
    by_name: HashMap<String, Arc<AccountEntry>>,
    name_by_email: HashMap<String, String>,
    priority_order: PriorityOrder,
    name_prefix: String,
}

impl AccountRegistry {
    /// Create an empty registry.
    ///
    /// New accounts get a rule store ordered by `priority_order` and a mail
    /// name sequence using `name_prefix`.
    #[must_use]
    pub fn new(priority_order: PriorityOrder, name_prefix: impl Into<String>) -> Self {
        Self {
            by_name: HashMap::new(),
            name_by_email: HashMap::new(),
            priority_order,
            name_prefix: name_prefix.into(),
        }
    }

    /// Register a new account and create its mailbox.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if the name or email is blank, and
    /// `Error::DuplicateAccount` if either is already registered.
    pub fn register(&mut self, name: &str, email: &str) -> Result<Arc<AccountEntry>> {
        validate_identity(name, email)?;

        if self.is_name_taken(name) {
            return Err(Error::DuplicateAccount(format!("name {name} is taken")));
        }
        if self.is_email_taken(email) {
            return Err(Error::DuplicateAccount(format!("email {email} is taken")));
        }

        let entry = Arc::new(AccountEntry {
            account: Account::new(name, email),
            space: Mutex::new(AccountSpace::new(self.priority_order, &self.name_prefix)),
        });
        self.by_name.insert(name.to_string(), Arc::clone(&entry));
        self.name_by_email
            .insert(email.to_string(), name.to_string());

        info!("Registered account {}", entry.account());
        Ok(entry)
    }

    /// Look up an account by display name.
    ///
    /// # Errors
    ///
    /// Returns `Error::AccountNotFound` if no account has this name.
    pub fn lookup_by_name(&self, name: &str) -> Result<&Account> {
        self.entry(name).map(|entry| entry.account())
    }

    /// Look up an account by email address.
    ///
    /// # Errors
    ///
    /// Returns `Error::AccountNotFound` if no account has this email.
    pub fn lookup_by_email(&self, email: &str) -> Result<&Account> {
        self.entry_by_email(email)
            .map(|entry| entry.account())
            .ok_or_else(|| Error::AccountNotFound(format!("no account with email {email}")))
    }

    /// Get the entry of an account by display name.
    ///
    /// # Errors
    ///
    /// Returns `Error::AccountNotFound` if no account has this name.
    pub fn entry(&self, name: &str) -> Result<&Arc<AccountEntry>> {
        self.by_name
            .get(name)
            .ok_or_else(|| Error::AccountNotFound(format!("no account named {name}")))
    }

    /// Get the entry of an account by email address, if registered.
    #[must_use]
    pub fn entry_by_email(&self, email: &str) -> Option<&Arc<AccountEntry>> {
        self.name_by_email
            .get(email)
            .and_then(|name| self.by_name.get(name))
    }

    /// Whether an account already uses this display name.
    #[must_use]
    pub fn is_name_taken(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Whether an account already uses this email address.
    #[must_use]
    pub fn is_email_taken(&self, email: &str) -> bool {
        self.name_by_email.contains_key(email)
    }

    /// Number of registered accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Whether no account is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl Default for AccountRegistry {
    fn default() -> Self {
        Self::new(PriorityOrder::default(), MailNameSequence::DEFAULT_PREFIX)
    }
}
