//! fsgate Core: shared errors, configuration, and constants.
//!
//! This crate provides the foundational types used across all fsgate crates.
//! It has no internal fsgate dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`config`]: Permission configuration with fixed fallbacks

#![forbid(unsafe_code)]

pub mod config;
pub mod error;

// Re-export key types at crate root for convenience
pub use config::PermissionConfig;
pub use error::{Error, Result};
