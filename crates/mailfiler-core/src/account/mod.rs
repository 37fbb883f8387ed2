//! Account management module.
//!
//! Provides account identities, their validation, and the registry that
//! owns every account's mailbox and rules.

mod model;
mod registry;
mod validation;

pub use model::Account;
pub use registry::{AccountEntry, AccountRegistry, AccountSpace};
pub use validation::{ValidationError, require_text, validate_identity};
