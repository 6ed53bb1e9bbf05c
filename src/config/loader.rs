//! Configuration file loading and saving

use super::file::{ConfigFile, CONFIG_FILE_NAME};
use crate::infra::{FileSystem, RealFileSystem};
use anyhow::{Context, Result};
use std::path::Path;

/// Handles loading and saving configuration files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from .src-slim.toml in the given directory
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use src_slim::config::ConfigLoader;
    /// use std::path::Path;
    ///
    /// let config = ConfigLoader::load(Path::new("."))?;
    /// println!("Loaded config with profile: {}", config.profile);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(project_root: &Path) -> Result<ConfigFile> {
        Self::load_with_fs(project_root, &RealFileSystem)
    }

    /// Load config with a custom filesystem implementation
    pub fn load_with_fs<FS: FileSystem>(project_root: &Path, fs: &FS) -> Result<ConfigFile> {
        let config_path = project_root.join(CONFIG_FILE_NAME);

        let contents = match fs.read_to_string(&config_path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no {} in {}, using defaults", CONFIG_FILE_NAME, project_root.display());
                return Ok(ConfigFile::default());
            }
            Err(e) => {
                return Err(e).context("Failed to read .src-slim.toml");
            }
        };

        let config: ConfigFile =
            toml_edit::de::from_str(&contents).context("Failed to parse .src-slim.toml")?;

        config
            .validate()
            .context("Invalid configuration in .src-slim.toml")?;

        log::debug!("loaded {} (profile {})", config_path.display(), config.profile);
        Ok(config)
    }

    /// Save config to .src-slim.toml in the given directory
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use src_slim::config::{ConfigFile, ConfigLoader, ProfileType};
    /// use std::path::Path;
    ///
    /// let config = ConfigFile::for_profile(ProfileType::Safe);
    /// ConfigLoader::save(&config, Path::new("."))?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn save(config: &ConfigFile, project_root: &Path) -> Result<()> {
        Self::save_with_fs(config, project_root, &RealFileSystem)
    }

    /// Save config with a custom filesystem implementation
    pub fn save_with_fs<FS: FileSystem>(
        config: &ConfigFile,
        project_root: &Path,
        fs: &FS,
    ) -> Result<()> {
        let config_path = project_root.join(CONFIG_FILE_NAME);

        let contents =
            toml_edit::ser::to_string_pretty(config).context("Failed to serialize config")?;

        fs.write(&config_path, contents)
            .context("Failed to write .src-slim.toml")?;

        Ok(())
    }

    /// Check if config file exists in project
    pub fn exists(project_root: &Path) -> bool {
        project_root.join(CONFIG_FILE_NAME).exists()
    }
}
