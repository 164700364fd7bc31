//! Identity primitives for fsgate.
//!
//! Provides:
//! - [`Identity`]: A user name plus the groups it belongs to
//! - [`IdentityProvider`]: Trait the permission checker reads the caller from
//! - [`GroupMapping`]: Trait for user → groups lookups, with in-memory and
//!   group-file implementations
//! - [`MappedIdentity`]: A user whose groups come from a [`GroupMapping`]
//! - [`LoginSource`]: Trait for discovering the process' own login identity,
//!   with one environment-based implementation per platform
//! - [`AuthError`]: Auth-specific error types
//!
//! Identities are always passed explicitly. There is no ambient "current
//! caller" and no process-wide login user.

#![forbid(unsafe_code)]

mod error;
mod groups;
mod identity;
mod login;

use std::collections::BTreeSet;

pub use error::AuthError;
pub use groups::{
    GroupFileMapping, GroupMapping, MappedIdentity, StaticGroupMapping, groups_or_empty,
};
pub use identity::Identity;
pub use login::{EnvLogin, LoginSource, StaticLogin};

/// Source of the acting user's name and group memberships.
///
/// Both methods must return the same answer for the lifetime of one value,
/// whether they compute it eagerly or lazily.
pub trait IdentityProvider {
    /// Short name of the acting user.
    fn user_name(&self) -> &str;

    /// Names of every group the acting user belongs to.
    fn group_names(&self) -> BTreeSet<String>;
}

impl<T: IdentityProvider + ?Sized> IdentityProvider for &T {
    fn user_name(&self) -> &str {
        (**self).user_name()
    }

    fn group_names(&self) -> BTreeSet<String> {
        (**self).group_names()
    }
}
