//! Named access requirements for common namespace operations.

use serde::{Deserialize, Serialize};

use crate::permission::AclPermission;

/// The stages of one [`check`](crate::FsPermissionChecker::check) call.
///
/// Presets cover what a namespace operation needs from the path it works
/// on. Ancestor and parent stages reach all the way to the root, so the
/// presets only ask them for traversal; write access to the directory being
/// modified is checked on that single node by the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRequest {
    /// The caller must own the target.
    #[serde(default)]
    pub require_owner: bool,
    /// Access required on every existing ancestor.
    #[serde(default)]
    pub ancestor: Option<AclPermission>,
    /// Access required on every node above the target.
    #[serde(default)]
    pub parent: Option<AclPermission>,
    /// Access required on the target.
    #[serde(default)]
    pub access: Option<AclPermission>,
}

impl AccessRequest {
    /// Nothing required.
    pub fn none() -> Self {
        Self::default()
    }

    /// Reach the target: execute on every directory above it.
    pub fn traverse() -> Self {
        Self::none().with_parent(AclPermission::Execute)
    }

    /// Read a file.
    pub fn read() -> Self {
        Self::traverse().with_access(AclPermission::Read)
    }

    /// Write a file.
    pub fn write() -> Self {
        Self::traverse().with_access(AclPermission::Write)
    }

    /// List a directory.
    pub fn list() -> Self {
        Self::traverse().with_access(AclPermission::ReadExecute)
    }

    /// Reach the deepest existing ancestor of a path that may not exist yet.
    pub fn create() -> Self {
        Self::none().with_ancestor(AclPermission::Execute)
    }

    /// Change the mode or group of the target.
    pub fn owner() -> Self {
        Self::traverse().with_owner(true)
    }

    /// Sets the ancestor stage.
    pub fn with_ancestor(mut self, access: AclPermission) -> Self {
        self.ancestor = Some(access);
        self
    }

    /// Sets the parent stage.
    pub fn with_parent(mut self, access: AclPermission) -> Self {
        self.parent = Some(access);
        self
    }

    /// Sets the target stage.
    pub fn with_access(mut self, access: AclPermission) -> Self {
        self.access = Some(access);
        self
    }

    /// Sets the ownership requirement.
    pub fn with_owner(mut self, require_owner: bool) -> Self {
        self.require_owner = require_owner;
        self
    }
}
