//! Permission enforcement over a resolved path.

use std::collections::BTreeSet;

use fsgate_auth::IdentityProvider;
use fsgate_core::PermissionConfig;

use crate::error::{Error, Result};
use crate::inodes::{FsNode, InodesInPath};
use crate::permission::AclPermission;
use crate::request::AccessRequest;

/// Decides whether one identity may access a resolved path.
///
/// The identity is captured once at construction; after that the checker
/// holds no mutable state and can be shared between threads for any number
/// of checks.
///
/// The fs owner and every member of the supergroup are superusers and pass
/// every check.
///
/// # Example
///
/// ```rust
/// use fsgate_acl::FsPermissionChecker;
/// use fsgate_auth::Identity;
///
/// let checker = FsPermissionChecker::new("fsgate", "supergroup", &Identity::new("leo"));
/// assert!(!checker.is_super_user());
/// assert_eq!(checker.user(), "leo");
/// ```
#[derive(Clone, Debug)]
pub struct FsPermissionChecker {
    fs_owner: String,
    supergroup: String,
    user: String,
    groups: BTreeSet<String>,
    is_super_user: bool,
}

impl FsPermissionChecker {
    /// Captures the identity's user and groups.
    pub fn new<P>(fs_owner: impl Into<String>, supergroup: impl Into<String>, identity: &P) -> Self
    where
        P: IdentityProvider + ?Sized,
    {
        let fs_owner = fs_owner.into();
        let supergroup = supergroup.into();
        let user = identity.user_name().to_string();
        let groups = identity.group_names();
        let is_super_user = user == fs_owner || groups.contains(&supergroup);
        Self {
            fs_owner,
            supergroup,
            user,
            groups,
            is_super_user,
        }
    }

    /// Checker whose fs owner and supergroup come from configuration.
    pub fn from_config<P>(conf: &PermissionConfig, identity: &P) -> Self
    where
        P: IdentityProvider + ?Sized,
    {
        Self::new(conf.fs_owner(), conf.supergroup(), identity)
    }

    /// The file system owner.
    pub fn fs_owner(&self) -> &str {
        &self.fs_owner
    }

    /// The superuser group.
    pub fn supergroup(&self) -> &str {
        &self.supergroup
    }

    /// The acting user.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Groups of the acting user.
    pub fn groups(&self) -> &BTreeSet<String> {
        &self.groups
    }

    /// Whether the acting user bypasses all checks.
    pub fn is_super_user(&self) -> bool {
        self.is_super_user
    }

    /// Checks a resolved path.
    ///
    /// Stages run in order and the first violation is returned:
    ///
    /// 1. `ancestor`: every node from [`InodesInPath::ancestor_index`] down to
    ///    the root.
    /// 2. `parent`: every node from the target's parent down to the root.
    /// 3. `access`: the target.
    /// 4. `require_owner`: the caller must own the target.
    ///
    /// A `None` access disables its stage, and missing nodes are skipped by
    /// the three access stages. Ownership of a missing target is never
    /// granted. The caller must keep the namespace unchanged until this
    /// returns.
    pub fn check<N: FsNode>(
        &self,
        iip: &InodesInPath<'_, N>,
        require_owner: bool,
        ancestor: Option<AclPermission>,
        parent: Option<AclPermission>,
        access: Option<AclPermission>,
    ) -> Result<()> {
        log::debug!(
            "ACCESS CHECK: user={}, groups={:?}, path={}, require_owner={require_owner}, \
             ancestor={ancestor:?}, parent={parent:?}, access={access:?}",
            self.user,
            self.groups,
            iip.full_path()
        );
        if self.is_super_user {
            return Ok(());
        }
        if iip.is_empty() {
            return Ok(());
        }

        let path = iip.full_path();
        let nodes = iip.nodes();

        if let Some(ancestor) = ancestor {
            let ancestor_index = iip.ancestor_index()?;
            for node in nodes[..=ancestor_index].iter().rev() {
                self.check_access(*node, &path, ancestor)?;
            }
        }

        if let Some(parent) = parent
            && nodes.len() > 1
        {
            for node in nodes[..nodes.len() - 1].iter().rev() {
                self.check_access(*node, &path, parent)?;
            }
        }

        let last = iip.last()?;
        if let Some(access) = access {
            self.check_access(last, &path, access)?;
        }
        if require_owner {
            match last {
                Some(node) => self.check_owner(node)?,
                None => {
                    return Err(Error::NotOwner {
                        user: self.user.clone(),
                        inode: path,
                    });
                }
            }
        }
        Ok(())
    }

    /// Runs [`check`](Self::check) with the stages of `request`.
    pub fn check_request<N: FsNode>(
        &self,
        iip: &InodesInPath<'_, N>,
        request: &AccessRequest,
    ) -> Result<()> {
        self.check(
            iip,
            request.require_owner,
            request.ancestor,
            request.parent,
            request.access,
        )
    }

    /// Checks a single node; `path` only feeds the error message.
    ///
    /// A missing node passes. Superusers pass.
    pub fn check_access<N: FsNode>(
        &self,
        node: Option<&N>,
        path: &str,
        access: AclPermission,
    ) -> Result<()> {
        let Some(node) = node else {
            return Ok(());
        };
        if self.is_super_user || self.permits(node, access) {
            return Ok(());
        }
        let acl = node.acl();
        log::debug!(
            "Denied {access} on {path} to {}: {}:{}:{}",
            self.user,
            acl.owner_user(),
            acl.owner_group(),
            acl.mode_string()
        );
        Err(Error::AccessDenied {
            user: self.user.clone(),
            access,
            path: path.to_string(),
            owner: acl.owner_user().to_string(),
            group: acl.owner_group().to_string(),
            kind: if node.is_directory() { 'd' } else { '-' },
            mode: acl.permission(),
        })
    }

    /// Whether the caller owns `node`. Superusers are not exempt.
    pub fn check_owner<N: FsNode>(&self, node: &N) -> Result<()> {
        if self.user == node.acl().owner_user() {
            return Ok(());
        }
        Err(Error::NotOwner {
            user: self.user.clone(),
            inode: node.to_string(),
        })
    }

    /// Fails unless the caller is a superuser.
    pub fn check_super_user(&self, operation: &str) -> Result<()> {
        if self.is_super_user {
            return Ok(());
        }
        Err(Error::SuperuserRequired {
            user: self.user.clone(),
            operation: operation.to_string(),
        })
    }

    /// The permission class that applies to the caller grants `access`.
    ///
    /// Exactly one class applies: owner, else owning group, else other.
    pub fn permits<N: FsNode>(&self, node: &N, access: AclPermission) -> bool {
        let acl = node.acl();
        let granted = if self.user == acl.owner_user() {
            acl.user_permission()
        } else if self.groups.contains(acl.owner_group()) {
            acl.group_permission()
        } else {
            acl.other_permission()
        };
        granted.implies(access)
    }
}
