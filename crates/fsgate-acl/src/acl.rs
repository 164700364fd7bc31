//! Per-node permission record.

use serde::{Deserialize, Serialize};

use crate::mode::Mode;
use crate::permission::AclPermission;

/// Kind of an ACL entry.
///
/// Only `User`, `Group` and `Other` take part in permission checks. The
/// named and mask kinds are carried so that richer ACLs survive a round
/// trip, but nothing evaluates them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AclEntryType {
    /// The owning user.
    User,
    /// The owning group.
    Group,
    /// Everybody else.
    Other,
    /// A specific user other than the owner.
    NamedUser,
    /// A specific group other than the owning group.
    NamedGroup,
    /// Upper bound for named entries.
    Mask,
}

/// One `(type, name, permission)` entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclEntry {
    /// What the entry applies to.
    pub entry_type: AclEntryType,
    /// User or group name; empty for `Other` and `Mask`.
    pub name: String,
    /// Granted permission.
    pub permission: AclPermission,
}

impl AclEntry {
    /// Creates an entry.
    pub fn new(
        entry_type: AclEntryType,
        name: impl Into<String>,
        permission: AclPermission,
    ) -> Self {
        Self {
            entry_type,
            name: name.into(),
            permission,
        }
    }

    /// Owning-user entry.
    pub fn user(name: impl Into<String>, permission: AclPermission) -> Self {
        Self::new(AclEntryType::User, name, permission)
    }

    /// Owning-group entry.
    pub fn group(name: impl Into<String>, permission: AclPermission) -> Self {
        Self::new(AclEntryType::Group, name, permission)
    }

    /// Other entry.
    pub fn other(permission: AclPermission) -> Self {
        Self::new(AclEntryType::Other, "", permission)
    }
}

/// Owner, group, the three permission classes and the sticky bit of one
/// namespace node.
///
/// The combined numeric form is always computed from the three class fields,
/// and [`set_permission`](Self::set_permission) rewrites all of them, so the
/// two views cannot drift apart.
///
/// Mutators take `&mut self`; the node that owns the ACL decides who may
/// call them.
///
/// A deserialized ACL describes a node that already exists and never accepts
/// a umask.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Acl {
    owner_user: String,
    owner_group: String,
    user_permission: AclPermission,
    group_permission: AclPermission,
    other_permission: AclPermission,
    #[serde(default)]
    sticky_bit: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    extended_entries: Vec<AclEntry>,
    #[serde(skip, default = "sealed")]
    umask_applied: bool,
}

fn sealed() -> bool {
    true
}

impl PartialEq for Acl {
    fn eq(&self, other: &Self) -> bool {
        self.owner_user == other.owner_user
            && self.owner_group == other.owner_group
            && self.user_permission == other.user_permission
            && self.group_permission == other.group_permission
            && self.other_permission == other.other_permission
            && self.sticky_bit == other.sticky_bit
            && self.extended_entries == other.extended_entries
    }
}

impl Eq for Acl {}

impl Acl {
    /// Starts an [`AclBuilder`].
    pub fn builder() -> AclBuilder {
        AclBuilder::default()
    }

    /// ACL with the given owner, group and mode; no umask applied.
    pub fn new(owner_user: impl Into<String>, owner_group: impl Into<String>, mode: Mode) -> Self {
        Self {
            owner_user: owner_user.into(),
            owner_group: owner_group.into(),
            user_permission: mode.user(),
            group_permission: mode.group(),
            other_permission: mode.other(),
            sticky_bit: mode.sticky(),
            extended_entries: Vec::new(),
            umask_applied: false,
        }
    }

    /// Owning user.
    pub fn owner_user(&self) -> &str {
        &self.owner_user
    }

    /// Owning group.
    pub fn owner_group(&self) -> &str {
        &self.owner_group
    }

    /// Permission of the owning user.
    pub fn user_permission(&self) -> AclPermission {
        self.user_permission
    }

    /// Permission of members of the owning group.
    pub fn group_permission(&self) -> AclPermission {
        self.group_permission
    }

    /// Permission of everybody else.
    pub fn other_permission(&self) -> AclPermission {
        self.other_permission
    }

    /// Whether the sticky bit is set.
    pub fn sticky_bit(&self) -> bool {
        self.sticky_bit
    }

    /// Named and mask entries, never consulted by the checker.
    pub fn extended_entries(&self) -> &[AclEntry] {
        &self.extended_entries
    }

    /// The combined form, sticky bit included.
    pub fn permission(&self) -> Mode {
        Mode::from_parts(
            self.user_permission,
            self.group_permission,
            self.other_permission,
        )
        .with_sticky(self.sticky_bit)
    }

    /// Symbolic form, e.g. `rwxr-xr-x`.
    pub fn mode_string(&self) -> String {
        self.permission().to_string()
    }

    /// Replaces all three classes and the sticky bit from a combined value.
    pub fn set_permission(&mut self, mode: Mode) {
        self.user_permission = mode.user();
        self.group_permission = mode.group();
        self.other_permission = mode.other();
        self.sticky_bit = mode.sticky();
    }

    /// Replaces the owning user's permission.
    pub fn set_user_permission(&mut self, permission: AclPermission) {
        self.user_permission = permission;
    }

    /// Replaces the owning group's permission.
    pub fn set_group_permission(&mut self, permission: AclPermission) {
        self.group_permission = permission;
    }

    /// Replaces everybody else's permission.
    pub fn set_other_permission(&mut self, permission: AclPermission) {
        self.other_permission = permission;
    }

    /// Sets or clears the sticky bit.
    pub fn set_sticky_bit(&mut self, sticky: bool) {
        self.sticky_bit = sticky;
    }

    /// Changes the owning user. Permissions are untouched.
    pub fn set_owner_user(&mut self, name: impl Into<String>) {
        self.owner_user = name.into();
    }

    /// Changes the owning group. Permissions are untouched.
    pub fn set_owner_group(&mut self, name: impl Into<String>) {
        self.owner_group = name.into();
    }

    /// Clears the bits set in `umask` from each class.
    ///
    /// A umask belongs to the creation of a node and is applied once; later
    /// calls, and any call on a deserialized ACL, leave the ACL unchanged and
    /// return `false`.
    pub fn apply_umask(&mut self, umask: Mode) -> bool {
        if self.umask_applied {
            log::debug!(
                "Ignoring umask {umask:o} for ACL owned by {}: already applied",
                self.owner_user
            );
            return false;
        }
        self.set_permission(self.permission().apply_umask(umask));
        self.umask_applied = true;
        true
    }
}

/// Builds an [`Acl`] from entries.
///
/// # Example
///
/// ```rust
/// use fsgate_acl::{Acl, AclEntry, AclPermission, Mode};
///
/// let acl = Acl::builder()
///     .entry(AclEntry::user("leo", AclPermission::ReadWrite))
///     .entry(AclEntry::group("sales", AclPermission::ReadWrite))
///     .entry(AclEntry::other(AclPermission::ReadWrite))
///     .umask(Mode::from_bits_truncate(0o022))
///     .build();
/// assert_eq!(acl.mode_string(), "rw-r--r--");
/// ```
#[derive(Clone, Debug, Default)]
pub struct AclBuilder {
    user: Option<AclEntry>,
    group: Option<AclEntry>,
    other: Option<AclEntry>,
    extended: Vec<AclEntry>,
    sticky: bool,
    umask: Option<Mode>,
}

impl AclBuilder {
    /// Adds an entry; user, group and other entries replace earlier ones of
    /// the same type, every other type is kept as an extended entry.
    pub fn entry(mut self, entry: AclEntry) -> Self {
        match entry.entry_type {
            AclEntryType::User => self.user = Some(entry),
            AclEntryType::Group => self.group = Some(entry),
            AclEntryType::Other => self.other = Some(entry),
            AclEntryType::NamedUser | AclEntryType::NamedGroup | AclEntryType::Mask => {
                self.extended.push(entry)
            }
        }
        self
    }

    /// Sets owner, group and all three classes from a combined value.
    pub fn owner_group_mode(
        self,
        owner: impl Into<String>,
        group: impl Into<String>,
        mode: Mode,
    ) -> Self {
        self.entry(AclEntry::user(owner, mode.user()))
            .entry(AclEntry::group(group, mode.group()))
            .entry(AclEntry::other(mode.other()))
            .sticky(mode.sticky())
    }

    /// Sets the sticky bit.
    pub fn sticky(mut self, sticky: bool) -> Self {
        self.sticky = sticky;
        self
    }

    /// Umask applied by [`build`](Self::build).
    pub fn umask(mut self, umask: Mode) -> Self {
        self.umask = Some(umask);
        self
    }

    /// Builds the ACL. Missing entries mean an empty name and no permission.
    pub fn build(self) -> Acl {
        let (owner_user, user_permission) = split(self.user);
        let (owner_group, group_permission) = split(self.group);
        let (_, other_permission) = split(self.other);
        let mut acl = Acl {
            owner_user,
            owner_group,
            user_permission,
            group_permission,
            other_permission,
            sticky_bit: self.sticky,
            extended_entries: self.extended,
            umask_applied: false,
        };
        if let Some(umask) = self.umask {
            acl.apply_umask(umask);
        }
        acl
    }
}

fn split(entry: Option<AclEntry>) -> (String, AclPermission) {
    entry
        .map(|e| (e.name, e.permission))
        .unwrap_or_default()
}
