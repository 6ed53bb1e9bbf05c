//! Configuration file data structures

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::profile::{Profile, ProfileType};
use crate::file::{ArtifactNaming, PipelineSettings, DEFAULT_SUFFIX};
use crate::project::{ProjectSettings, DEFAULT_SKIP_DIRS};

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = ".src-slim.toml";

/// Upper bound for the `concurrency` key
pub const MAX_CONCURRENCY: usize = 512;

/// src-slim configuration file structure
///
/// # Examples
///
/// ```
/// use src_slim::config::ConfigFile;
///
/// let config: ConfigFile = toml_edit::de::from_str(
///     r#"
/// profile = "aggressive"
/// exclude = ["^vendor/"]
///
/// [pipeline]
/// keep-line-parity = true
/// "#,
/// )?;
/// config.validate()?;
///
/// let settings = config.to_project_settings()?;
/// assert_eq!(settings.pipeline.keep_line_parity, Some(true));
/// assert_eq!(settings.pipeline.actions.map(|a| a.len()), Some(4));
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigFile {
    /// Profile to start from
    #[serde(default = "default_profile")]
    pub profile: String,

    /// Artifact suffix (default `.min`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,

    /// Worker threads (0 or absent = one per core)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<usize>,

    /// Directory names never entered (replaces the defaults)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_dirs: Option<Vec<String>>,

    /// Regexes for paths, relative to the project root, to leave alone
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,

    /// Pipeline overrides (take precedence over the profile)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline: Option<PipelineSettings>,

    /// Artifact clean-up settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clean: Option<CleanSettings>,
}

fn default_profile() -> String {
    ProfileType::default().name().to_string()
}

/// `[clean]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CleanSettings {
    /// Only delete artifacts whose source still exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_source: Option<bool>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            profile: default_profile(),
            suffix: None,
            concurrency: None,
            skip_dirs: None,
            exclude: Vec::new(),
            pipeline: None,
            clean: None,
        }
    }
}

impl ConfigFile {
    /// Configuration for a profile, with every other key at its default.
    pub fn for_profile(profile: ProfileType) -> Self {
        Self {
            profile: profile.name().to_string(),
            ..Self::default()
        }
    }

    /// Check every value that deserialization alone cannot.
    pub fn validate(&self) -> Result<()> {
        self.profile_type()?;
        self.naming()?;

        if let Some(concurrency) = self.concurrency {
            if concurrency > MAX_CONCURRENCY {
                anyhow::bail!(
                    "concurrency ({}) cannot exceed {}",
                    concurrency,
                    MAX_CONCURRENCY
                );
            }
        }

        if let Some(actions) = self.pipeline.as_ref().and_then(|p| p.actions.as_ref()) {
            if actions.is_empty() {
                anyhow::bail!("[pipeline] actions cannot be empty; remove the key to use the profile's actions");
            }
        }

        if let Some(dirs) = &self.skip_dirs {
            if let Some(bad) = dirs.iter().find(|d| d.is_empty() || d.contains(['/', '\\'])) {
                anyhow::bail!("skip-dirs entries must be plain directory names, got '{}'", bad);
            }
        }

        for pattern in &self.exclude {
            Regex::new(pattern).with_context(|| format!("invalid exclude pattern '{}'", pattern))?;
        }

        Ok(())
    }

    /// The selected profile.
    pub fn profile_type(&self) -> Result<ProfileType> {
        self.profile.parse::<ProfileType>().map_err(|e| {
            anyhow::anyhow!("{} (available: {})", e, Profile::names().join(", "))
        })
    }

    /// Artifact naming for the configured suffix.
    pub fn naming(&self) -> Result<ArtifactNaming> {
        let suffix = self.suffix.as_deref().unwrap_or(DEFAULT_SUFFIX);
        Ok(ArtifactNaming::new(suffix)?)
    }

    /// Profile preset with the `[pipeline]` overrides applied.
    pub fn pipeline_settings(&self) -> Result<PipelineSettings> {
        let mut settings = Profile::new(self.profile_type()?).pipeline;
        if let Some(overrides) = &self.pipeline {
            if overrides.actions.is_some() {
                settings.actions = overrides.actions.clone();
            }
            if overrides.indentation.is_some() {
                settings.indentation = overrides.indentation;
            }
            if overrides.keep_line_parity.is_some() {
                settings.keep_line_parity = overrides.keep_line_parity;
            }
        }
        Ok(settings)
    }

    /// Resolve into settings for a project pass.
    pub fn to_project_settings(&self) -> Result<ProjectSettings> {
        Ok(ProjectSettings {
            concurrency: self.concurrency.unwrap_or(0),
            skip_dirs: self
                .skip_dirs
                .clone()
                .unwrap_or_else(|| DEFAULT_SKIP_DIRS.iter().map(|d| d.to_string()).collect()),
            exclude: self.exclude.clone(),
            require_source: self
                .clean
                .as_ref()
                .and_then(|c| c.require_source)
                .unwrap_or(false),
            pipeline: self.pipeline_settings()?,
        })
    }
}
