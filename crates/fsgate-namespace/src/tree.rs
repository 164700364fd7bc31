//! The in-memory namespace.

use std::collections::BTreeMap;

use fsgate_acl::{
    AccessRequest, Acl, AclPermission, FsNode, FsPermissionChecker, InodesInPath, Mode,
    default_acl,
};
use fsgate_auth::{Identity, IdentityProvider};
use fsgate_core::PermissionConfig;

use crate::error::{NamespaceError, Result};
use crate::inode::{Inode, InodeKind};
use crate::path::{join_segments, split_path};

const ROOT_ID: u64 = 1;

/// A tree of files and directories, each carrying an [`Acl`].
///
/// Plain methods (`mkdir`, `set_mode`, ...) do no permission checking. The
/// `*_as` methods first check the request against an
/// [`FsPermissionChecker`], then mutate.
///
/// Resolving a path borrows the tree, so an [`InodesInPath`] can never
/// observe a change made while it is alive.
///
/// # Example
///
/// ```rust
/// use fsgate_acl::{Acl, FsPermissionChecker, Mode};
/// use fsgate_auth::Identity;
/// use fsgate_namespace::InodeTree;
///
/// let mode = |bits| Mode::from_bits_truncate(bits);
/// let mut tree = InodeTree::new(Acl::new("fsgate", "supergroup", mode(0o755)));
/// tree.mkdir("/home", Acl::new("leo", "sales", mode(0o755))).unwrap();
///
/// let diana = FsPermissionChecker::new("fsgate", "supergroup", &Identity::new("diana"));
/// let home = Acl::new("diana", "sales", mode(0o700));
/// assert!(tree.mkdir_as(&diana, "/home/diana", home).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct InodeTree {
    nodes: BTreeMap<u64, Inode>,
    next_id: u64,
}

impl InodeTree {
    /// A tree holding only the root directory.
    pub fn new(root_acl: Acl) -> Self {
        let root = Inode::new(ROOT_ID, String::new(), None, InodeKind::Directory, root_acl);
        Self {
            nodes: BTreeMap::from([(ROOT_ID, root)]),
            next_id: ROOT_ID + 1,
        }
    }

    /// A tree whose root is owned by the configured fs owner and carries the
    /// default directory ACL.
    pub fn with_defaults(conf: &PermissionConfig) -> Self {
        Self::new(default_acl(&Identity::new(conf.fs_owner()), conf, true))
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`; the root cannot be removed.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The root directory.
    pub fn root(&self) -> Result<&Inode> {
        self.get(ROOT_ID)
    }

    /// Node by id.
    pub fn get(&self, id: u64) -> Result<&Inode> {
        self.nodes
            .get(&id)
            .ok_or_else(|| NamespaceError::NotFound(format!("inode {id}")))
    }

    fn get_mut(&mut self, id: u64) -> Result<&mut Inode> {
        self.nodes
            .get_mut(&id)
            .ok_or_else(|| NamespaceError::NotFound(format!("inode {id}")))
    }

    /// Resolves `path` into the chain of nodes along it.
    ///
    /// Positions from the first missing name on are `None`, as is anything
    /// below a file.
    pub fn resolve(&self, path: &str) -> Result<InodesInPath<'_, Inode>> {
        let segments = split_path(path)?;
        let mut nodes = Vec::with_capacity(segments.len());
        let mut current = self.nodes.get(&ROOT_ID);
        nodes.push(current);
        for name in &segments[1..] {
            current = current
                .and_then(|node| node.child(name))
                .and_then(|id| self.nodes.get(&id));
            nodes.push(current);
        }
        Ok(InodesInPath::new(nodes, segments)?)
    }

    /// The node at `path`.
    pub fn lookup(&self, path: &str) -> Result<&Inode> {
        self.resolve(path)?
            .last()?
            .ok_or_else(|| NamespaceError::NotFound(path.to_string()))
    }

    /// Children of the directory at `path`, sorted by name.
    pub fn list(&self, path: &str) -> Result<Vec<&Inode>> {
        let dir = self.lookup(path)?;
        if !dir.is_directory() {
            return Err(NamespaceError::NotADirectory(path.to_string()));
        }
        dir.children().map(|(_, id)| self.get(id)).collect()
    }

    /// Creates a directory; its parent must exist.
    pub fn mkdir(&mut self, path: &str, acl: Acl) -> Result<u64> {
        self.insert(path, InodeKind::Directory, acl)
    }

    /// Creates a file; its parent must exist.
    pub fn create_file(&mut self, path: &str, acl: Acl) -> Result<u64> {
        self.insert(path, InodeKind::File, acl)
    }

    /// Creates every missing directory along `path` with the default
    /// directory ACL for `identity`, and returns the id of the last one.
    ///
    /// Existing directories are left alone; an existing file anywhere on the
    /// path fails with [`NamespaceError::NotADirectory`].
    pub fn mkdirs<P>(&mut self, path: &str, identity: &P, conf: &PermissionConfig) -> Result<u64>
    where
        P: IdentityProvider + ?Sized,
    {
        let segments = split_path(path)?;
        let mut current = ROOT_ID;
        for (i, name) in segments.iter().enumerate().skip(1) {
            let node = self.get(current)?;
            if !node.is_directory() {
                return Err(NamespaceError::NotADirectory(join_segments(&segments[..i])));
            }
            current = match node.child(name) {
                Some(id) => id,
                None => self.add_child(
                    current,
                    name,
                    InodeKind::Directory,
                    default_acl(identity, conf, true),
                )?,
            };
        }
        if !self.get(current)?.is_directory() {
            return Err(NamespaceError::NotADirectory(path.to_string()));
        }
        Ok(current)
    }

    /// Removes a file or an empty directory.
    pub fn delete(&mut self, path: &str) -> Result<()> {
        let (id, parent, name) = {
            let node = self.lookup(path)?;
            let parent = node
                .parent()
                .ok_or_else(|| NamespaceError::invalid_path(path, "cannot delete the root"))?;
            if node.has_children() {
                return Err(NamespaceError::NotEmpty(path.to_string()));
            }
            (node.id(), parent, node.name().to_string())
        };
        self.get_mut(parent)?.remove_child(&name);
        self.nodes.remove(&id);
        log::debug!("Deleted {path} (inode {id})");
        Ok(())
    }

    /// Mutable access to the ACL at `path`.
    pub fn acl_mut(&mut self, path: &str) -> Result<&mut Acl> {
        let id = self.lookup(path)?.id();
        Ok(self.get_mut(id)?.acl_mut())
    }

    /// Changes the owning user of `path`.
    pub fn set_owner(&mut self, path: &str, user: &str) -> Result<()> {
        self.acl_mut(path)?.set_owner_user(user);
        Ok(())
    }

    /// Changes the owning group of `path`.
    pub fn set_group(&mut self, path: &str, group: &str) -> Result<()> {
        self.acl_mut(path)?.set_owner_group(group);
        Ok(())
    }

    /// Replaces the mode of `path`.
    pub fn set_mode(&mut self, path: &str, mode: Mode) -> Result<()> {
        self.acl_mut(path)?.set_permission(mode);
        Ok(())
    }

    // ====================================================================
    // Permission-checked operations
    // ====================================================================

    /// Checks `request` against `path` without changing anything.
    pub fn check(
        &self,
        checker: &FsPermissionChecker,
        path: &str,
        request: &AccessRequest,
    ) -> Result<()> {
        let iip = self.resolve(path)?;
        checker.check_request(&iip, request)?;
        Ok(())
    }

    /// The node at `path`, if the caller may read it.
    pub fn read_as(&self, checker: &FsPermissionChecker, path: &str) -> Result<&Inode> {
        self.check(checker, path, &AccessRequest::read())?;
        self.lookup(path)
    }

    /// Children of the directory at `path`, if the caller may list it.
    pub fn list_as(&self, checker: &FsPermissionChecker, path: &str) -> Result<Vec<&Inode>> {
        self.check(checker, path, &AccessRequest::list())?;
        self.list(path)
    }

    /// [`mkdir`](Self::mkdir) for a caller that can write to the parent.
    pub fn mkdir_as(&mut self, checker: &FsPermissionChecker, path: &str, acl: Acl) -> Result<u64> {
        self.check_create(checker, path)?;
        self.mkdir(path, acl)
    }

    /// [`create_file`](Self::create_file) for a caller that can write to
    /// the parent.
    pub fn create_file_as(
        &mut self,
        checker: &FsPermissionChecker,
        path: &str,
        acl: Acl,
    ) -> Result<u64> {
        self.check_create(checker, path)?;
        self.create_file(path, acl)
    }

    /// [`mkdirs`](Self::mkdirs) for a caller that can write to the deepest
    /// existing directory. New directories belong to the caller.
    pub fn mkdirs_as(
        &mut self,
        checker: &FsPermissionChecker,
        path: &str,
        conf: &PermissionConfig,
    ) -> Result<u64> {
        {
            let iip = self.resolve(path)?;
            checker.check_request(&iip, &AccessRequest::create())?;
            if !iip.exists() {
                let ancestor = iip.ancestor()?;
                if !ancestor.is_empty() {
                    checker.check_access(ancestor.last()?, &iip.full_path(), AclPermission::Write)?;
                }
            }
        }
        let identity = Identity::with_groups(checker.user(), checker.groups().iter().cloned());
        self.mkdirs(path, &identity, conf)
    }

    /// [`delete`](Self::delete) for a caller that can write to the parent.
    pub fn delete_as(&mut self, checker: &FsPermissionChecker, path: &str) -> Result<()> {
        {
            let iip = self.resolve(path)?;
            checker.check_request(&iip, &AccessRequest::traverse())?;
            if iip.len() > 1 {
                checker.check_access(iip.at(-2)?, &iip.full_path(), AclPermission::WriteExecute)?;
            }
        }
        self.delete(path)
    }

    /// Changes owner and/or group.
    ///
    /// Only superusers may change the owning user. The owner of a node may
    /// change its group to any group they belong to.
    pub fn set_owner_as(
        &mut self,
        checker: &FsPermissionChecker,
        path: &str,
        user: Option<&str>,
        group: Option<&str>,
    ) -> Result<()> {
        {
            let iip = self.resolve(path)?;
            if iip.last()?.is_none() {
                return Err(NamespaceError::NotFound(path.to_string()));
            }
            if user.is_some() {
                checker.check_request(&iip, &AccessRequest::traverse())?;
                checker.check_super_user("change the owner")?;
            } else {
                checker.check_request(&iip, &AccessRequest::owner())?;
            }
            if let Some(group) = group
                && !checker.is_super_user()
                && !checker.groups().contains(group)
            {
                checker.check_super_user(&format!("change the group to {group}"))?;
            }
        }
        if let Some(user) = user {
            self.set_owner(path, user)?;
        }
        if let Some(group) = group {
            self.set_group(path, group)?;
        }
        Ok(())
    }

    /// [`set_mode`](Self::set_mode) for the owner of `path`.
    pub fn set_mode_as(
        &mut self,
        checker: &FsPermissionChecker,
        path: &str,
        mode: Mode,
    ) -> Result<()> {
        {
            let iip = self.resolve(path)?;
            if iip.last()?.is_none() {
                return Err(NamespaceError::NotFound(path.to_string()));
            }
            checker.check_request(&iip, &AccessRequest::owner())?;
        }
        self.set_mode(path, mode)
    }

    fn check_create(&self, checker: &FsPermissionChecker, path: &str) -> Result<()> {
        let iip = self.resolve(path)?;
        if iip.len() < 2 {
            return Err(NamespaceError::AlreadyExists(path.to_string()));
        }
        checker.check_request(&iip, &AccessRequest::create())?;
        checker.check_access(iip.at(-2)?, &iip.full_path(), AclPermission::Write)?;
        Ok(())
    }

    fn insert(&mut self, path: &str, kind: InodeKind, acl: Acl) -> Result<u64> {
        let segments = split_path(path)?;
        let Some((name, parent_segments)) = segments.split_last() else {
            return Err(NamespaceError::invalid_path(path, "empty"));
        };
        if parent_segments.is_empty() {
            return Err(NamespaceError::AlreadyExists(path.to_string()));
        }
        let parent_path = join_segments(parent_segments);
        let parent = self.lookup(&parent_path)?;
        if !parent.is_directory() {
            return Err(NamespaceError::NotADirectory(parent_path));
        }
        let parent_id = parent.id();
        self.add_child(parent_id, name, kind, acl)
    }

    fn add_child(&mut self, parent: u64, name: &str, kind: InodeKind, acl: Acl) -> Result<u64> {
        let id = self.next_id;
        let parent_node = self.get_mut(parent)?;
        if parent_node.child(name).is_some() {
            return Err(NamespaceError::AlreadyExists(name.to_string()));
        }
        parent_node.add_child(name.to_string(), id);
        log::debug!(
            "Created {} {name} (inode {id}) under inode {parent}: {}:{}:{}",
            kind.as_str(),
            acl.owner_user(),
            acl.owner_group(),
            acl.mode_string()
        );
        self.nodes
            .insert(id, Inode::new(id, name.to_string(), Some(parent), kind, acl));
        self.next_id += 1;
        Ok(id)
    }
}
