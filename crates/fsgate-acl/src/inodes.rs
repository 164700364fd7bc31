//! A path resolved into the chain of nodes along it.

use std::fmt;

use crate::acl::Acl;
use crate::error::{Error, Result};

/// What the checker needs to know about a namespace node.
///
/// `Display` is used in ownership errors and should identify the node, e.g.
/// `file(id=3, name=file2)`.
pub trait FsNode: fmt::Display {
    /// The node's ACL.
    fn acl(&self) -> &Acl;

    /// Whether the node is a directory.
    fn is_directory(&self) -> bool;

    /// Stable identifier of the node.
    fn id(&self) -> u64;
}

/// The nodes along a path, from the root to the target.
///
/// Slot `i` holds the node named by `segments[i]`, or `None` when that
/// component does not exist yet. The root segment is the empty string, so
/// `/a/b` is `["", "a", "b"]`. The chain borrows the nodes, which keeps the
/// namespace from changing while a check runs.
pub struct InodesInPath<'a, N> {
    nodes: Vec<Option<&'a N>>,
    segments: Vec<String>,
}

impl<'a, N: FsNode> InodesInPath<'a, N> {
    /// Pairs the nodes with their path segments.
    ///
    /// Fails with [`Error::MalformedChain`] when the lengths differ.
    pub fn new<S: Into<String>>(
        nodes: Vec<Option<&'a N>>,
        segments: impl IntoIterator<Item = S>,
    ) -> Result<Self> {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if nodes.len() != segments.len() {
            return Err(Error::MalformedChain {
                nodes: nodes.len(),
                segments: segments.len(),
            });
        }
        Ok(Self { nodes, segments })
    }

    /// Number of positions, existing or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the chain has no positions.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node slots in root-to-target order.
    pub fn nodes(&self) -> &[Option<&'a N>] {
        &self.nodes
    }

    /// Path segments in root-to-target order.
    pub fn path_segments(&self) -> &[String] {
        &self.segments
    }

    /// Segments joined with `/`; the empty root segment gives the leading
    /// slash, so `["", "a", "b"]` is `/a/b`.
    pub fn full_path(&self) -> String {
        self.segments.join("/")
    }

    /// Whether the target itself exists.
    pub fn exists(&self) -> bool {
        matches!(self.nodes.last(), Some(Some(_)))
    }

    /// Node at position `i`; a negative `i` counts from the end, so `-1` is
    /// the target.
    pub fn at(&self, i: isize) -> Result<Option<&'a N>> {
        let len = self.nodes.len() as isize;
        let index = if i < 0 { len + i } else { i };
        if index < 0 || index >= len {
            return Err(Error::not_found(format!(
                "index {i} out of range for {len} inodes"
            )));
        }
        Ok(self.nodes[index as usize])
    }

    /// The target node, `None` if it does not exist.
    pub fn last(&self) -> Result<Option<&'a N>> {
        if self.is_empty() {
            return Err(Error::not_found("inodes is empty"));
        }
        self.at(-1)
    }

    /// The chain without its last position.
    pub fn parent(&self) -> Result<Self> {
        if self.is_empty() {
            return Err(Error::not_found("inodes is empty"));
        }
        Ok(self.prefix(self.len() - 1))
    }

    /// Index of the first missing node among all but the last position, or
    /// `len - 1` when none of them is missing.
    pub fn ancestor_index(&self) -> Result<usize> {
        if self.is_empty() {
            return Err(Error::not_found("inodes is empty"));
        }
        let last = self.len() - 1;
        let index = self.nodes[..last]
            .iter()
            .position(Option::is_none)
            .unwrap_or(last);
        Ok(index)
    }

    /// The chain truncated to [`ancestor_index`](Self::ancestor_index)
    /// positions.
    ///
    /// For `/c1/c2/c3` where only `/c1` exists, the parent is `/c1/c2` but
    /// the ancestor is `/c1`.
    pub fn ancestor(&self) -> Result<Self> {
        let index = self.ancestor_index()?;
        Ok(self.prefix(index))
    }

    fn prefix(&self, len: usize) -> Self {
        Self {
            nodes: self.nodes[..len].to_vec(),
            segments: self.segments[..len].to_vec(),
        }
    }
}

impl<N> Clone for InodesInPath<'_, N> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            segments: self.segments.clone(),
        }
    }
}

impl<N: FsNode> fmt::Debug for InodesInPath<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nodes: Vec<String> = self
            .nodes
            .iter()
            .map(|n| n.map_or_else(|| "null".to_string(), ToString::to_string))
            .collect();
        f.debug_struct("InodesInPath")
            .field("path", &self.full_path())
            .field("inodes", &nodes)
            .finish()
    }
}
