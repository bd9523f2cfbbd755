//! Shared byte conversion helpers.

pub mod converter;
