//! Property-based tests for the permission model.
