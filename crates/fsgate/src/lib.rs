//! fsgate permission engine: umbrella crate.
//!
//! This crate re-exports all fsgate components for convenience.

#![doc = include_str!("../README.md")]

pub use fsgate_acl as acl;
pub use fsgate_auth as auth;
pub use fsgate_core as core;
pub use fsgate_namespace as namespace;

#[cfg(feature = "cli")]
pub use fsgate_cli as cli;

pub use fsgate_acl::{AccessRequest, Acl, AclPermission, FsPermissionChecker, Mode};
pub use fsgate_auth::Identity;
pub use fsgate_core::PermissionConfig;
pub use fsgate_namespace::InodeTree;
