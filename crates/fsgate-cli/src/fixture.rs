//! Namespace trees described in TOML.
//!
//! ```toml
//! [root]
//! owner = "fsgate"
//! group = "supergroup"
//! mode = 0o755
//!
//! [[node]]
//! path = "/dir1"
//! kind = "dir"
//! owner = "leo"
//! group = "sales"
//! mode = 0o755
//! ```
//!
//! Without a `[root]` table the root gets the configured defaults.

use std::path::Path;

use serde::Deserialize;

use fsgate_acl::{Acl, Mode};
use fsgate_core::PermissionConfig;
use fsgate_namespace::{InodeKind, InodeTree, split_path};

use crate::error::{Error, Result};

/// Owner, group and mode of one node.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeAcl {
    /// Owning user
    pub owner: String,
    /// Owning group
    pub group: String,
    /// Permission bits, sticky included
    pub mode: Mode,
}

impl NodeAcl {
    fn to_acl(&self) -> Acl {
        Acl::new(&self.owner, &self.group, self.mode)
    }
}

/// One non-root node.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeSpec {
    /// Absolute path
    pub path: String,
    /// `file` or `dir`
    pub kind: InodeKind,
    /// Owning user
    pub owner: String,
    /// Owning group
    pub group: String,
    /// Permission bits, sticky included
    pub mode: Mode,
}

/// A whole tree.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TreeFixture {
    /// Root permissions
    #[serde(default)]
    pub root: Option<NodeAcl>,
    /// Every other node, in any order
    #[serde(default, rename = "node")]
    pub nodes: Vec<NodeSpec>,
}

impl TreeFixture {
    /// Parses a fixture from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::fixture(e.to_string()))
    }

    /// Reads a fixture file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| fsgate_core::Error::io_with_path(e, path))?;
        toml::from_str(&content).map_err(|e| Error::fixture(format!("{}: {e}", path.display())))
    }

    /// Builds the tree; parents are created before their children.
    pub fn build(&self, conf: &PermissionConfig) -> Result<InodeTree> {
        let mut tree = match &self.root {
            Some(root) => InodeTree::new(root.to_acl()),
            None => InodeTree::with_defaults(conf),
        };
        let mut nodes = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            nodes.push((split_path(&node.path)?.len(), node));
        }
        nodes.sort_by_key(|(depth, _)| *depth);
        for (_, node) in nodes {
            let acl = Acl::new(&node.owner, &node.group, node.mode);
            match node.kind {
                InodeKind::Directory => tree.mkdir(&node.path, acl)?,
                InodeKind::File => tree.create_file(&node.path, acl)?,
            };
        }
        log::debug!("Built fixture tree with {} nodes", tree.len());
        Ok(tree)
    }
}
