//! Mail routing.
//!
//! [`MailRouter`] is the public surface of the crate. It ties the account
//! registry, the mailbox trees and the rule stores together:
//!
//! - receiving files a mail into the first matching rule's folder, or the
//!   inbox when no rule matches
//! - sending stores a copy under `/sent` and delivers to every registered
//!   recipient
//! - adding a rule re-files matching mail already sitting in the inbox
//!
//! # Locking
//!
//! The registry sits behind a read-write lock that only account creation
//! takes for writing. Each account's tree and rules sit behind their own
//! mutex, held for the whole of one operation on that account. Fan-out
//! delivery locks one recipient at a time, after the sender's lock has been
//! released.

mod mail;

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use mailfiler_definition::{decode_mail_definition, decode_rule_definition};
use tracing::{debug, warn};

use crate::account::{Account, AccountEntry, AccountRegistry, AccountSpace, require_text};
use crate::config::{NameScope, RouterConfig};
use crate::error::{Error, Result};
use crate::mailbox::{Directory, MailMetadata, MailNameSequence, MailboxPath, MailboxTree};
use crate::rules::{Priority, Rule, RulePredicate};

pub use mail::Mail;

/// In-memory mail router for a set of accounts.
#[derive(Debug)]
pub struct MailRouter {
    config: RouterConfig,
    registry: RwLock<AccountRegistry>,
    names: MailNameSequence,
}

impl MailRouter {
    /// Create a router with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    /// Create a router with the given configuration.
    #[must_use]
    pub fn with_config(config: RouterConfig) -> Self {
        let registry = AccountRegistry::new(config.priority_order, config.naming.prefix.clone());
        Self {
            names: MailNameSequence::new(config.naming.prefix.clone()),
            registry: RwLock::new(registry),
            config,
        }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Register an account. Its `/inbox` and `/sent` folders exist at once.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidArgument` if the name or email is blank
    /// - `Error::DuplicateAccount` if either is already registered
    pub fn create_account(&self, name: &str, email: &str) -> Result<Account> {
        let mut registry = self
            .registry
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let entry = registry.register(name, email)?;
        Ok(entry.account().clone())
    }

    /// Look up an account by display name.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidArgument` if the name is blank
    /// - `Error::AccountNotFound` if no account has this name
    pub fn account(&self, name: &str) -> Result<Account> {
        require_text(name, "account name")?;
        Ok(self.registry().lookup_by_name(name)?.clone())
    }

    /// Create a folder beneath `/inbox`.
    ///
    /// All intermediate folders must already exist.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidArgument` for blank arguments
    /// - `Error::AccountNotFound` for an unknown account
    /// - `Error::InvalidPath` for a malformed path or one outside `/inbox`
    /// - `Error::PathNotFound` if an intermediate folder is missing
    /// - `Error::FolderAlreadyExists` if the path is taken
    pub fn create_folder(&self, account_name: &str, path: &str) -> Result<()> {
        require_text(account_name, "account name")?;
        require_text(path, "folder path")?;

        let entry = self.entry(account_name)?;
        let path = MailboxPath::parse(path)?;
        let created = entry.lock().tree.create_folder(&path)?;

        debug!("Created folder {created} for {}", entry.account().name());
        Ok(())
    }

    /// Add a filing rule, then move matching inbox mail into its folder.
    ///
    /// Only mail directly in `/inbox` is re-filed; nested folders are left
    /// alone.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidArgument` for blank arguments or a priority outside
    ///   `1..=10`
    /// - `Error::AccountNotFound` for an unknown account
    /// - `Error::FolderNotFound` if the folder or one of its parents is
    ///   missing
    /// - `Error::Definition` if the rule definition repeats a field
    /// - `Error::ConflictingRule` if it contradicts an existing rule
    pub fn add_rule(
        &self,
        account_name: &str,
        folder_path: &str,
        rule_definition: &str,
        priority: u8,
    ) -> Result<()> {
        require_text(account_name, "account name")?;
        require_text(folder_path, "folder path")?;
        require_text(rule_definition, "rule definition")?;
        let priority = Priority::new(priority)?;

        let entry = self.entry(account_name)?;
        let folder = parse_folder(folder_path)?;

        let mut space = entry.lock();
        resolve_folder(&space.tree, &folder)?;

        let predicate: RulePredicate = decode_rule_definition(rule_definition)?.into();
        let rule = Rule::new(predicate, priority, folder);
        space.rules.check(&rule)?;

        let matching: Vec<String> = space
            .tree
            .inbox()
            .files()
            .filter(|file| rule.predicate().matches_file(file))
            .map(|file| file.name().to_string())
            .collect();
        space
            .tree
            .move_files(matching.as_slice(), &MailboxPath::inbox(), rule.folder())?;
        if !matching.is_empty() {
            debug!(
                "Re-filed {} inbox mail(s) of {} into {}",
                matching.len(),
                entry.account().name(),
                rule.folder()
            );
        }

        space.rules.insert(rule);
        Ok(())
    }

    /// Receive a mail into an account.
    ///
    /// The mail lands in the folder of the first matching rule, or in
    /// `/inbox` when no rule matches.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidArgument` for blank arguments
    /// - `Error::AccountNotFound` for an unknown account
    /// - `Error::Definition` if the mail definition cannot be decoded
    pub fn receive_mail(&self, account_name: &str, mail_definition: &str, content: &str) -> Result<()> {
        require_text(account_name, "account name")?;
        require_text(mail_definition, "mail definition")?;
        require_text(content, "mail content")?;

        let entry = self.entry(account_name)?;
        let metadata: MailMetadata = decode_mail_definition(mail_definition)?.into();
        self.deliver(&entry, metadata, content)?;
        Ok(())
    }

    /// Send a mail from an account.
    ///
    /// A copy is stored under the sender's `/sent`, then the mail is
    /// received by every recipient that is a registered account. Other
    /// recipients are skipped.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidArgument` for blank arguments
    /// - `Error::AccountNotFound` for an unknown account, or if the
    ///   definition's sender is not the account's own address
    /// - `Error::Definition` if the mail definition cannot be decoded
    pub fn send_mail(&self, account_name: &str, mail_definition: &str, content: &str) -> Result<()> {
        require_text(account_name, "account name")?;
        require_text(mail_definition, "mail definition")?;
        require_text(content, "mail content")?;

        let entry = self.entry(account_name)?;
        let metadata: MailMetadata = decode_mail_definition(mail_definition)?.into();
        if metadata.sender != entry.account().email() {
            warn!(
                "Rejected mail from {} sent as {}",
                entry.account(),
                metadata.sender
            );
            return Err(Error::AccountNotFound(format!(
                "sender {} is not the address of {}",
                metadata.sender,
                entry.account().name()
            )));
        }

        {
            let mut space = entry.lock();
            let name = self.mint_name(&space);
            space
                .tree
                .sent_mut()
                .add_file(&name, content, metadata.clone())?;
            debug!("Stored {name} in /sent of {}", entry.account().name());
        }

        for recipient in &metadata.recipients {
            let recipient_entry = self.registry().entry_by_email(recipient).map(Arc::clone);
            match recipient_entry {
                Some(recipient_entry) => {
                    self.deliver(&recipient_entry, metadata.clone(), content)?;
                }
                None => debug!("Skipping unregistered recipient {recipient}"),
            }
        }
        Ok(())
    }

    /// Mail stored directly in a folder, with resolved sender identities.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidArgument` for blank arguments
    /// - `Error::AccountNotFound` for an unknown account, or a mail whose
    ///   sender was never registered
    /// - `Error::FolderNotFound` if the folder or one of its parents is
    ///   missing
    pub fn get_mails_from_folder(&self, account_name: &str, folder_path: &str) -> Result<Vec<Mail>> {
        require_text(account_name, "account name")?;
        require_text(folder_path, "folder path")?;

        let entry = self.entry(account_name)?;
        let folder = parse_folder(folder_path)?;
        let files = resolve_folder(&entry.lock().tree, &folder)?.list_files();

        let registry = self.registry();
        files
            .into_iter()
            .map(|file| {
                let sender = registry.lookup_by_email(&file.metadata().sender)?.clone();
                Ok(Mail::new(file, sender))
            })
            .collect()
    }

    /// Rules of an account in evaluation order.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidArgument` if the name is blank
    /// - `Error::AccountNotFound` for an unknown account
    pub fn rules(&self, account_name: &str) -> Result<Vec<Rule>> {
        require_text(account_name, "account name")?;
        let entry = self.entry(account_name)?;
        let rules = entry.lock().rules.iter().cloned().collect();
        Ok(rules)
    }

    /// Paths of the folders directly inside a folder.
    ///
    /// # Errors
    ///
    /// Same as [`MailRouter::get_mails_from_folder`], minus sender lookup.
    pub fn folders(&self, account_name: &str, folder_path: &str) -> Result<Vec<MailboxPath>> {
        require_text(account_name, "account name")?;
        require_text(folder_path, "folder path")?;

        let entry = self.entry(account_name)?;
        let folder = parse_folder(folder_path)?;
        let folders = resolve_folder(&entry.lock().tree, &folder)?.list_subdirectories();
        Ok(folders)
    }

    fn registry(&self) -> RwLockReadGuard<'_, AccountRegistry> {
        self.registry.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn entry(&self, account_name: &str) -> Result<Arc<AccountEntry>> {
        self.registry().entry(account_name).map(Arc::clone)
    }

    fn mint_name(&self, space: &AccountSpace) -> String {
        match self.config.naming.scope {
            NameScope::Global => self.names.next_name(),
            NameScope::PerAccount => space.names.next_name(),
        }
    }

    /// Store a mail where the account's rules send it.
    fn deliver(&self, entry: &AccountEntry, metadata: MailMetadata, content: &str) -> Result<()> {
        let mut space = entry.lock();
        let folder = space
            .rules
            .first_matching(&metadata, content)
            .map_or_else(MailboxPath::inbox, |rule| rule.folder().clone());
        let name = self.mint_name(&space);

        space
            .tree
            .directory_mut(&folder)
            .ok_or_else(|| Error::FolderNotFound(folder.to_string()))?
            .add_file(&name, content, metadata)?;

        debug!("Filed {name} for {} into {folder}", entry.account().name());
        Ok(())
    }
}

impl Default for MailRouter {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_folder(path: &str) -> Result<MailboxPath> {
    MailboxPath::parse(path).map_err(|_| Error::FolderNotFound(path.trim().to_string()))
}

/// Resolve a folder, reporting every kind of absence as `FolderNotFound`.
fn resolve_folder<'a>(tree: &'a MailboxTree, path: &MailboxPath) -> Result<&'a Directory> {
    match tree.resolve_directory(path) {
        Ok(Some(directory)) => Ok(directory),
        Ok(None) | Err(Error::PathNotFound(_)) => Err(Error::FolderNotFound(path.to_string())),
        Err(err) => Err(err),
    }
}
