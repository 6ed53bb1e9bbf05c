//! Common test utilities and helpers
//!
//! This module provides shared functionality for integration tests:
//! - Assertion helpers for robust comparisons
//! - Test fixture creation utilities
//!
//! # Usage
//!
//! ```rust,no_run
//! mod common;
//! use common::fixtures;
//!
//! let (dir, _) = fixtures::create_mixed_project()?;
//! ```

pub mod assertions;
pub mod fixtures;

/// Check if running in CI environment
#[allow(dead_code)]
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok() || std::env::var("GITHUB_ACTIONS").is_ok()
}
