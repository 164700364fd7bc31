//! # fsgate-acl
//!
//! Access control for hierarchical namespaces.
//!
//! This crate implements the permission model and its enforcement:
//! - [`AclPermission`]: read/write/execute combinations with an `implies` order
//! - [`Mode`]: the numeric owner/group/other encoding (plus sticky bit)
//! - [`Acl`]: the per-node permission record
//! - [`mode`] and [`defaults`]: numeric conversions and default ACLs
//! - [`ModeParser`]: chmod-style mode strings
//! - [`InodesInPath`]: a path resolved into its chain of nodes
//! - [`FsPermissionChecker`]: the ancestor → parent → target → owner walk
//!
//! The checker only reads ACLs. Whoever resolves a path must keep the
//! namespace from changing until the check returns; with [`InodesInPath`]
//! borrowing the nodes, the borrow checker does that for in-process trees.

#![forbid(unsafe_code)]

pub mod acl;
pub mod checker;
pub mod defaults;
pub mod error;
pub mod inodes;
pub mod mode;
pub mod parser;
pub mod permission;
pub mod request;

mod proptests;

pub use acl::{Acl, AclBuilder, AclEntry, AclEntryType};
pub use checker::FsPermissionChecker;
pub use defaults::{default_acl, default_acl_for_login, umask_from_config};
pub use error::{Error, Result};
pub use inodes::{FsNode, InodesInPath};
pub use mode::{Mode, format_mode, lookup_by_symbol};
pub use parser::ModeParser;
pub use permission::AclPermission;
pub use request::AccessRequest;
