//! Command handlers for src-slim CLI
//!
//! This module contains all command implementations, organized by functionality.
//! Each submodule handles a specific CLI command.

pub mod clean;
pub mod completions;
pub mod file;
pub mod init;
pub mod languages;
pub mod minify;

// Re-export command functions for convenient access
pub use clean::cmd_clean;
pub use completions::cmd_completions;
pub use file::cmd_file;
pub use init::cmd_init;
pub use languages::cmd_languages;
pub use minify::cmd_minify;

use anyhow::Result;
use std::path::Path;

use crate::config::{ConfigFile, ConfigLoader, Profile, CONFIG_FILE_NAME};
use crate::error::SrcSlimError;

/// Command-line values that take precedence over `.src-slim.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Profile name
    pub profile: Option<String>,
    /// Artifact suffix
    pub suffix: Option<String>,
    /// Worker threads
    pub jobs: Option<usize>,
    /// Keep line numbers stable
    pub keep_lines: bool,
}

/// Load `.src-slim.toml` from `root` and apply `overrides`.
///
/// # Examples
///
/// ```
/// use src_slim::cmd::{load_config, Overrides};
///
/// let dir = tempfile::tempdir()?;
/// let overrides = Overrides {
///     profile: Some("safe".to_string()),
///     ..Overrides::default()
/// };
/// let config = load_config(dir.path(), &overrides)?;
/// assert_eq!(config.profile, "safe");
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn load_config(root: &Path, overrides: &Overrides) -> Result<ConfigFile> {
    let mut config = ConfigLoader::load(root).map_err(|source| SrcSlimError::InvalidConfig {
        path: root.join(CONFIG_FILE_NAME),
        source,
    })?;

    if let Some(profile) = &overrides.profile {
        if Profile::get(profile).is_none() {
            return Err(SrcSlimError::InvalidProfile {
                name: profile.clone(),
                available: Profile::names().iter().map(|n| n.to_string()).collect(),
            }
            .into());
        }
        config.profile = profile.to_lowercase();
    }
    if let Some(suffix) = &overrides.suffix {
        config.suffix = Some(suffix.clone());
    }
    if let Some(jobs) = overrides.jobs {
        config.concurrency = Some(jobs);
    }
    if overrides.keep_lines {
        config.pipeline.get_or_insert_with(Default::default).keep_line_parity = Some(true);
    }

    config.validate()?;
    Ok(config)
}
