//! Namespace nodes.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use fsgate_acl::{Acl, FsNode};

/// Whether a node is a file or a directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InodeKind {
    /// Regular file.
    File,
    /// Directory.
    #[serde(alias = "dir")]
    Directory,
}

impl InodeKind {
    /// `"dir"` or `"file"`.
    pub fn as_str(self) -> &'static str {
        match self {
            InodeKind::File => "file",
            InodeKind::Directory => "dir",
        }
    }
}

/// One file or directory of an [`InodeTree`](crate::InodeTree).
#[derive(Clone, Debug)]
pub struct Inode {
    id: u64,
    name: String,
    parent: Option<u64>,
    kind: InodeKind,
    acl: Acl,
    children: BTreeMap<String, u64>,
}

impl Inode {
    pub(crate) fn new(
        id: u64,
        name: String,
        parent: Option<u64>,
        kind: InodeKind,
        acl: Acl,
    ) -> Self {
        Self {
            id,
            name,
            parent,
            kind,
            acl,
            children: BTreeMap::new(),
        }
    }

    /// Name within the parent; empty for the root.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Id of the parent directory; `None` for the root.
    pub fn parent(&self) -> Option<u64> {
        self.parent
    }

    /// File or directory.
    pub fn kind(&self) -> InodeKind {
        self.kind
    }

    /// Id of the child called `name`.
    pub fn child(&self, name: &str) -> Option<u64> {
        self.children.get(name).copied()
    }

    /// Child names and ids, sorted by name.
    pub fn children(&self) -> impl Iterator<Item = (&str, u64)> {
        self.children.iter().map(|(name, id)| (name.as_str(), *id))
    }

    /// Whether the node has children.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub(crate) fn acl_mut(&mut self) -> &mut Acl {
        &mut self.acl
    }

    pub(crate) fn add_child(&mut self, name: String, id: u64) {
        self.children.insert(name, id);
    }

    pub(crate) fn remove_child(&mut self, name: &str) -> Option<u64> {
        self.children.remove(name)
    }
}

impl FsNode for Inode {
    fn acl(&self) -> &Acl {
        &self.acl
    }

    fn is_directory(&self) -> bool {
        self.kind == InodeKind::Directory
    }

    fn id(&self) -> u64 {
        self.id
    }
}

impl fmt::Display for Inode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(id={}, name={})", self.kind.as_str(), self.id, self.name)
    }
}
