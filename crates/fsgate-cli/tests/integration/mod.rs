//! Integration test modules.

mod check;
mod config;
mod mode;
