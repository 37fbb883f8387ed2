//! Rule priorities and their evaluation order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Priority of a filing rule, from 1 to 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Priority(u8);

impl Priority {
    /// Smallest accepted priority.
    pub const MIN: u8 = 1;
    /// Largest accepted priority.
    pub const MAX: u8 = 10;

    /// Create a priority.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if `value` is outside `1..=10`.
    pub fn new(value: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::InvalidArgument(format!(
                "priority {value} is outside {}..={}",
                Self::MIN,
                Self::MAX
            )))
        }
    }

    /// Numeric value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Order in which rules are evaluated; the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityOrder {
    /// Priority 1 is evaluated first.
    #[default]
    Ascending,
    /// Priority 10 is evaluated first.
    Descending,
}

impl PriorityOrder {
    /// Compare two priorities; `Less` means `a` is evaluated before `b`.
    #[must_use]
    pub fn compare(self, a: Priority, b: Priority) -> Ordering {
        match self {
            Self::Ascending => a.cmp(&b),
            Self::Descending => b.cmp(&a),
        }
    }
}
