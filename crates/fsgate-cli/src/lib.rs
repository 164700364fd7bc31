//! # fsgate-cli
//!
//! Command-line front end for fsgate:
//! - `mode`: convert octal modes and apply chmod-style mode strings
//! - `default-acl`: show the ACL a new file or directory would get
//! - `check`: run a permission check against a tree described in TOML
//! - `config`: locate, show and initialize the configuration file

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config_handlers;
pub mod error;
pub mod fixture;

pub use error::{Error, Result};
