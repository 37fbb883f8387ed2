//! Folder tree of a single account.

use std::collections::{BTreeMap, BTreeSet, btree_map};

use chrono::NaiveDateTime;
use mailfiler_definition::MailDefinition;
use serde::Serialize;

use super::path::{INBOX, MailboxPath, SENT, validate_name};
use crate::error::{Error, Result};

/// Immutable envelope metadata of a stored mail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailMetadata {
    /// Sender email address.
    pub sender: String,
    /// Recipient email addresses.
    pub recipients: BTreeSet<String>,
    /// Subject line, if any.
    pub subject: Option<String>,
    /// Receive time, if known.
    pub received_at: Option<NaiveDateTime>,
}

impl From<MailDefinition> for MailMetadata {
    fn from(definition: MailDefinition) -> Self {
        Self {
            sender: definition.sender,
            recipients: definition.recipients,
            subject: definition.subject,
            received_at: definition.received_at,
        }
    }
}

/// A stored mail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailFile {
    name: String,
    content: String,
    metadata: MailMetadata,
}

impl MailFile {
    /// File name, unique within its folder.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Body text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Envelope metadata.
    #[must_use]
    pub const fn metadata(&self) -> &MailMetadata {
        &self.metadata
    }
}

/// Child of a directory.
#[derive(Debug, Clone)]
pub enum Entry {
    /// A nested folder.
    Directory(Directory),
    /// A stored mail.
    File(MailFile),
}

impl Entry {
    fn as_directory(&self) -> Option<&Directory> {
        match self {
            Self::Directory(directory) => Some(directory),
            Self::File(_) => None,
        }
    }

    fn as_directory_mut(&mut self) -> Option<&mut Directory> {
        match self {
            Self::Directory(directory) => Some(directory),
            Self::File(_) => None,
        }
    }

    fn as_file(&self) -> Option<&MailFile> {
        match self {
            Self::File(file) => Some(file),
            Self::Directory(_) => None,
        }
    }
}

/// A folder: named children, unique among siblings.
///
/// Each directory records its own absolute path instead of pointing back at
/// its parent.
#[derive(Debug, Clone)]
pub struct Directory {
    path: MailboxPath,
    children: BTreeMap<String, Entry>,
}

impl Directory {
    fn new(path: MailboxPath) -> Self {
        Self {
            path,
            children: BTreeMap::new(),
        }
    }

    /// Folder name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.path.name().unwrap_or_default()
    }

    /// Absolute path of the folder.
    #[must_use]
    pub const fn path(&self) -> &MailboxPath {
        &self.path
    }

    /// Child entry by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.children.get(name)
    }

    /// Whether a child with this name exists, file or folder.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.children.contains_key(name)
    }

    /// Nested folder by name.
    #[must_use]
    pub fn subdirectory(&self, name: &str) -> Option<&Directory> {
        self.children.get(name).and_then(Entry::as_directory)
    }

    fn subdirectory_mut(&mut self, name: &str) -> Option<&mut Directory> {
        self.children.get_mut(name).and_then(Entry::as_directory_mut)
    }

    /// Stored mail by name.
    #[must_use]
    pub fn file(&self, name: &str) -> Option<&MailFile> {
        self.children.get(name).and_then(Entry::as_file)
    }

    /// Mail files directly inside this folder.
    pub fn files(&self) -> impl Iterator<Item = &MailFile> {
        self.children.values().filter_map(Entry::as_file)
    }

    /// Folders directly inside this folder.
    pub fn subdirectories(&self) -> impl Iterator<Item = &Directory> {
        self.children.values().filter_map(Entry::as_directory)
    }

    /// Snapshot of the mail files in this folder.
    #[must_use]
    pub fn list_files(&self) -> Vec<MailFile> {
        self.files().cloned().collect()
    }

    /// Snapshot of the paths of the folders in this folder.
    #[must_use]
    pub fn list_subdirectories(&self) -> Vec<MailboxPath> {
        self.subdirectories().map(|d| d.path.clone()).collect()
    }

    /// Create a nested folder and return its path.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPath` for a bad name and
    /// `Error::FolderAlreadyExists` if a sibling already uses it.
    pub fn add_subdirectory(&mut self, name: &str) -> Result<MailboxPath> {
        let path = self.path.join(name)?;
        match self.children.entry(name.to_string()) {
            btree_map::Entry::Occupied(_) => Err(Error::FolderAlreadyExists(path.to_string())),
            btree_map::Entry::Vacant(slot) => {
                slot.insert(Entry::Directory(Self::new(path.clone())));
                Ok(path)
            }
        }
    }

    /// Store a mail in this folder.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPath` for a bad name and
    /// `Error::FolderAlreadyExists` if a sibling already uses it.
    pub fn add_file(
        &mut self,
        name: &str,
        content: impl Into<String>,
        metadata: MailMetadata,
    ) -> Result<()> {
        validate_name(name)?;
        self.insert_file(MailFile {
            name: name.to_string(),
            content: content.into(),
            metadata,
        })
    }

    fn insert_file(&mut self, file: MailFile) -> Result<()> {
        let path = self.path.join(&file.name)?;
        match self.children.entry(file.name.clone()) {
            btree_map::Entry::Occupied(_) => Err(Error::FolderAlreadyExists(path.to_string())),
            btree_map::Entry::Vacant(slot) => {
                slot.insert(Entry::File(file));
                Ok(())
            }
        }
    }

    fn take_file(&mut self, name: &str) -> Option<MailFile> {
        self.file(name)?;
        match self.children.remove(name) {
            Some(Entry::File(file)) => Some(file),
            _ => None,
        }
    }
}

/// Folder tree of one account.
///
/// The root holds exactly two folders, `inbox` and `sent`, from creation
/// on. User folders can only be created beneath `/inbox`.
#[derive(Debug, Clone)]
pub struct MailboxTree {
    inbox: Directory,
    sent: Directory,
}

impl MailboxTree {
    /// Create a tree with empty `inbox` and `sent` folders.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inbox: Directory::new(MailboxPath::inbox()),
            sent: Directory::new(MailboxPath::sent()),
        }
    }

    /// The `/inbox` folder.
    #[must_use]
    pub const fn inbox(&self) -> &Directory {
        &self.inbox
    }

    /// The `/sent` folder.
    #[must_use]
    pub const fn sent(&self) -> &Directory {
        &self.sent
    }

    /// The `/sent` folder, mutably.
    pub fn sent_mut(&mut self) -> &mut Directory {
        &mut self.sent
    }

    fn top_level(&self, name: &str) -> Option<&Directory> {
        match name {
            INBOX => Some(&self.inbox),
            SENT => Some(&self.sent),
            _ => None,
        }
    }

    fn top_level_mut(&mut self, name: &str) -> Option<&mut Directory> {
        match name {
            INBOX => Some(&mut self.inbox),
            SENT => Some(&mut self.sent),
            _ => None,
        }
    }

    /// Resolve a folder by absolute path.
    ///
    /// Returns `Ok(None)` when only the last segment is missing. The root
    /// itself holds no mail and also resolves to `None`.
    ///
    /// # Errors
    ///
    /// Returns `Error::PathNotFound` if an intermediate folder is missing.
    pub fn resolve_directory(&self, path: &MailboxPath) -> Result<Option<&Directory>> {
        let Some((first, rest)) = path.segments().split_first() else {
            return Ok(None);
        };
        let Some((last, intermediate)) = rest.split_last() else {
            return Ok(self.top_level(first));
        };

        let mut current = self
            .top_level(first)
            .ok_or_else(|| Error::PathNotFound(path.to_string()))?;
        for segment in intermediate {
            current = current
                .subdirectory(segment)
                .ok_or_else(|| Error::PathNotFound(path.to_string()))?;
        }
        Ok(current.subdirectory(last))
    }

    /// Mutable folder lookup; `None` if any segment is missing.
    pub fn directory_mut(&mut self, path: &MailboxPath) -> Option<&mut Directory> {
        let (first, rest) = path.segments().split_first()?;
        let mut current = self.top_level_mut(first)?;
        for segment in rest {
            current = current.subdirectory_mut(segment)?;
        }
        Some(current)
    }

    /// Create a folder beneath `/inbox`.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidPath` if the path is outside `/inbox`
    /// - `Error::FolderAlreadyExists` for `/inbox` itself or an occupied name
    /// - `Error::PathNotFound` if an intermediate folder is missing
    pub fn create_folder(&mut self, path: &MailboxPath) -> Result<MailboxPath> {
        if path.segments().first().map(String::as_str) != Some(INBOX) {
            return Err(Error::InvalidPath(format!(
                "{path} is outside {}",
                MailboxPath::inbox()
            )));
        }
        let (Some(name), Some(parent)) = (path.name(), path.parent()) else {
            return Err(Error::InvalidPath(path.to_string()));
        };
        if parent.is_root() {
            return Err(Error::FolderAlreadyExists(path.to_string()));
        }

        let parent = self
            .directory_mut(&parent)
            .ok_or_else(|| Error::PathNotFound(path.to_string()))?;
        parent.add_subdirectory(name)
    }

    /// Move a mail between folders, keeping its name, content and metadata.
    ///
    /// Moving a mail into the folder that already holds it does nothing.
    ///
    /// # Errors
    ///
    /// - `Error::FolderNotFound` if either folder is missing
    /// - `Error::PathNotFound` if `from` holds no mail called `name`
    /// - `Error::FolderAlreadyExists` if `to` already has an entry `name`
    ///
    /// The source folder is unchanged on error.
    pub fn move_file(&mut self, name: &str, from: &MailboxPath, to: &MailboxPath) -> Result<()> {
        self.move_files(&[name], from, to)
    }

    /// Move several mails between folders as one step.
    ///
    /// Every move is checked before any is made.
    ///
    /// # Errors
    ///
    /// See [`MailboxTree::move_file`].
    pub fn move_files<S: AsRef<str>>(
        &mut self,
        names: &[S],
        from: &MailboxPath,
        to: &MailboxPath,
    ) -> Result<()> {
        let source = self
            .resolve_directory(from)
            .ok()
            .flatten()
            .ok_or_else(|| Error::FolderNotFound(from.to_string()))?;
        for name in names {
            let name = name.as_ref();
            if source.file(name).is_none() {
                return Err(Error::PathNotFound(from.join(name)?.to_string()));
            }
        }
        if from == to {
            return Ok(());
        }

        let target = self
            .resolve_directory(to)
            .ok()
            .flatten()
            .ok_or_else(|| Error::FolderNotFound(to.to_string()))?;
        for name in names {
            let name = name.as_ref();
            if target.contains(name) {
                return Err(Error::FolderAlreadyExists(to.join(name)?.to_string()));
            }
        }

        let mut moved = Vec::with_capacity(names.len());
        if let Some(source) = self.directory_mut(from) {
            moved.extend(names.iter().filter_map(|name| source.take_file(name.as_ref())));
        }
        if let Some(target) = self.directory_mut(to) {
            for file in moved {
                target.insert_file(file)?;
            }
        }
        Ok(())
    }
}

impl Default for MailboxTree {
    fn default() -> Self {
        Self::new()
    }
}
