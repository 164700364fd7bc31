//! A resolved caller identity.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::IdentityProvider;

/// A user and the groups it belongs to, captured once per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// The user's short name.
    pub user: String,
    /// Every group the user belongs to.
    #[serde(default)]
    pub groups: BTreeSet<String>,
}

impl Identity {
    /// Creates an identity with no groups.
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            groups: BTreeSet::new(),
        }
    }

    /// Creates an identity that belongs to the given groups.
    pub fn with_groups<I, S>(user: impl Into<String>, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            user: user.into(),
            groups: groups.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the user belongs to `group`.
    pub fn in_group(&self, group: &str) -> bool {
        self.groups.contains(group)
    }
}

impl IdentityProvider for Identity {
    fn user_name(&self) -> &str {
        &self.user
    }

    fn group_names(&self) -> BTreeSet<String> {
        self.groups.clone()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let groups: Vec<&str> = self.groups.iter().map(String::as_str).collect();
        write!(f, "uid={}, groups={}", self.user, groups.join(","))
    }
}
