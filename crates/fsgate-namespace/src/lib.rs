//! # fsgate-namespace
//!
//! An in-memory file and directory tree whose nodes carry fsgate ACLs.
//!
//! [`InodeTree::resolve`] turns an absolute path into the
//! [`InodesInPath`](fsgate_acl::InodesInPath) chain the permission checker
//! walks, and the `*_as` operations pair each mutation with the check it
//! needs.

#![forbid(unsafe_code)]

pub mod error;
pub mod inode;
pub mod path;
pub mod tree;

pub use error::{NamespaceError, Result};
pub use inode::{Inode, InodeKind};
pub use path::{join_segments, split_path};
pub use tree::InodeTree;
