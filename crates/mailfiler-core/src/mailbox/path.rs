//! Absolute mailbox paths.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::{Error, Result};

/// Hierarchy separator.
pub const SEPARATOR: char = '/';

/// Name of the incoming mail folder under the root.
pub const INBOX: &str = "inbox";

/// Name of the outgoing mail folder under the root.
pub const SENT: &str = "sent";

/// Absolute path of a folder or mail file, such as `/inbox/gaming`.
///
/// The root has no segments and displays as the empty string. Trailing
/// separators are insignificant when parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MailboxPath {
    segments: Vec<String>,
}

impl MailboxPath {
    /// The root path.
    #[must_use]
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// `/inbox`.
    #[must_use]
    pub fn inbox() -> Self {
        Self {
            segments: vec![INBOX.to_string()],
        }
    }

    /// `/sent`.
    #[must_use]
    pub fn sent() -> Self {
        Self {
            segments: vec![SENT.to_string()],
        }
    }

    /// Parses an absolute path.
    ///
    /// Surrounding whitespace and trailing separators are dropped, so
    /// `/inbox/gaming/` and `/inbox/gaming` are the same path.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPath` if the path is not absolute or contains
    /// an empty segment (`/inbox//gaming`).
    pub fn parse(path: &str) -> Result<Self> {
        let trimmed = path.trim();
        let Some(relative) = trimmed.strip_prefix(SEPARATOR) else {
            return Err(Error::InvalidPath(format!(
                "{trimmed} must start with {SEPARATOR}"
            )));
        };

        let relative = relative.trim_end_matches(SEPARATOR);
        if relative.is_empty() {
            return Ok(Self::root());
        }

        let mut segments = Vec::new();
        for segment in relative.split(SEPARATOR) {
            if segment.is_empty() {
                return Err(Error::InvalidPath(format!("{trimmed} has an empty segment")));
            }
            segments.push(segment.to_string());
        }
        Ok(Self { segments })
    }

    /// Path segments from the root down.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Whether this is the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Last segment, or `None` for the root.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Parent path, or `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let (_, parent) = self.segments.split_last()?;
        Some(Self {
            segments: parent.to_vec(),
        })
    }

    /// Appends one segment.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPath` if `name` is empty or contains the
    /// separator.
    pub fn join(&self, name: &str) -> Result<Self> {
        validate_name(name)?;
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Ok(Self { segments })
    }

    /// Whether `self` equals `ancestor` or lies beneath it.
    #[must_use]
    pub fn starts_with(&self, ancestor: &Self) -> bool {
        self.segments.starts_with(&ancestor.segments)
    }
}

/// Checks a single folder or file name.
///
/// # Errors
///
/// Returns `Error::InvalidPath` if `name` is empty or contains the separator.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidPath("name must not be empty".to_string()));
    }
    if name.contains(SEPARATOR) {
        return Err(Error::InvalidPath(format!(
            "name {name} must not contain {SEPARATOR}"
        )));
    }
    Ok(())
}

impl fmt::Display for MailboxPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "{SEPARATOR}{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for MailboxPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for MailboxPath {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
