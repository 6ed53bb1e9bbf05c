//! Configuration for src-slim
//!
//! This module provides:
//! - Profile presets (safe, balanced, aggressive)
//! - .src-slim.toml config file support
//! - Resolution of profile and overrides into [`ProjectSettings`](crate::project::ProjectSettings)

pub mod file;
pub mod loader;
pub mod profile;

pub use file::{CleanSettings, ConfigFile, CONFIG_FILE_NAME};
pub use loader::ConfigLoader;
pub use profile::{Profile, ProfileType};
