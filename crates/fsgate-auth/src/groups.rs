//! User → group mapping.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::OnceLock;

use crate::IdentityProvider;
use crate::error::AuthError;

/// Looks up the groups a user belongs to.
pub trait GroupMapping: Send + Sync {
    /// Groups of `user`. Unknown users have no groups.
    fn groups(&self, user: &str) -> Result<BTreeSet<String>, AuthError>;
}

/// Groups of `user`, or an empty set if the lookup fails.
///
/// A failed lookup only costs the caller its group-class permissions; it
/// never fails the request.
pub fn groups_or_empty(mapping: &dyn GroupMapping, user: &str) -> BTreeSet<String> {
    match mapping.groups(user) {
        Ok(groups) => groups,
        Err(e) => {
            log::warn!("Unable to obtain groups for {user}: {e}");
            BTreeSet::new()
        }
    }
}

/// In-memory user → groups table.
#[derive(Debug, Clone, Default)]
pub struct StaticGroupMapping {
    table: HashMap<String, BTreeSet<String>>,
}

impl StaticGroupMapping {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `user` with the given groups, replacing earlier entries.
    pub fn with_user<I, S>(mut self, user: impl Into<String>, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(user, groups);
        self
    }

    /// Adds `user` with the given groups, replacing earlier entries.
    pub fn insert<I, S>(&mut self, user: impl Into<String>, groups: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.table
            .insert(user.into(), groups.into_iter().map(Into::into).collect());
    }
}

impl GroupMapping for StaticGroupMapping {
    fn groups(&self, user: &str) -> Result<BTreeSet<String>, AuthError> {
        Ok(self.table.get(user).cloned().unwrap_or_default())
    }
}

/// Group mapping backed by text in `/etc/group` format.
///
/// Each non-comment line is `name:password:gid:member,member,...`. A user
/// belongs to every group that lists it as a member.
#[derive(Debug, Clone, Default)]
pub struct GroupFileMapping {
    members: HashMap<String, BTreeSet<String>>,
}

impl GroupFileMapping {
    /// Parses group file text.
    pub fn parse(content: &str) -> Result<Self, AuthError> {
        let mut members: HashMap<String, BTreeSet<String>> = HashMap::new();
        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split(':').collect();
            if fields.len() != 4 || fields[0].is_empty() {
                return Err(AuthError::InvalidGroupFile {
                    line: idx + 1,
                    content: raw.to_string(),
                });
            }
            let group = fields[0];
            for user in fields[3].split(',').map(str::trim).filter(|u| !u.is_empty()) {
                members
                    .entry(user.to_string())
                    .or_default()
                    .insert(group.to_string());
            }
        }
        Ok(Self { members })
    }

    /// Reads and parses a group file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AuthError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }
}

impl GroupMapping for GroupFileMapping {
    fn groups(&self, user: &str) -> Result<BTreeSet<String>, AuthError> {
        Ok(self.members.get(user).cloned().unwrap_or_default())
    }
}

/// A user whose groups are looked up on first use and then kept.
pub struct MappedIdentity<M> {
    user: String,
    mapping: M,
    groups: OnceLock<BTreeSet<String>>,
}

impl<M: GroupMapping> MappedIdentity<M> {
    /// Creates an identity for `user` that resolves groups through `mapping`.
    pub fn new(user: impl Into<String>, mapping: M) -> Self {
        Self {
            user: user.into(),
            mapping,
            groups: OnceLock::new(),
        }
    }
}

impl<M: GroupMapping> IdentityProvider for MappedIdentity<M> {
    fn user_name(&self) -> &str {
        &self.user
    }

    fn group_names(&self) -> BTreeSet<String> {
        self.groups
            .get_or_init(|| groups_or_empty(&self.mapping, &self.user))
            .clone()
    }
}

impl<M> std::fmt::Debug for MappedIdentity<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MappedIdentity")
            .field("user", &self.user)
            .field("groups", &self.groups.get())
            .finish()
    }
}
