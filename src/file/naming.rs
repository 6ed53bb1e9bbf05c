//! Artifact naming convention
//!
//! The minified copy of `dir/name.ext` is `dir/name<suffix>.ext`; a file
//! without an extension gets the suffix appended. The mapping depends only
//! on the path and can be inverted, so artifacts are recognized (and
//! cleaned up) without any bookkeeping.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Default suffix inserted before the extension.
pub const DEFAULT_SUFFIX: &str = ".min";

/// Rejected artifact suffix
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid artifact suffix '{0}': expected a dot and at least one character, without path separators or further dots")]
pub struct InvalidSuffix(pub String);

/// Maps source paths to artifact paths and back.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use src_slim::file::ArtifactNaming;
///
/// let naming = ArtifactNaming::default();
/// let artifact = naming.output_path_for(Path::new("web/app.js"));
///
/// assert_eq!(artifact, Path::new("web/app.min.js"));
/// assert!(naming.is_generated_artifact(&artifact));
/// assert_eq!(naming.source_path_for(&artifact).unwrap(), Path::new("web/app.js"));
/// assert_eq!(naming.output_path_for(Path::new("Makefile")), Path::new("Makefile.min"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactNaming {
    suffix: String,
}

impl Default for ArtifactNaming {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_SUFFIX.to_string(),
        }
    }
}

impl ArtifactNaming {
    /// Naming with a custom suffix. The leading dot is optional: `min` and
    /// `.min` are the same suffix.
    pub fn new(suffix: &str) -> Result<Self, InvalidSuffix> {
        let trimmed = suffix.trim();
        let body = trimmed.strip_prefix('.').unwrap_or(trimmed);
        let valid = !body.is_empty()
            && !body
                .chars()
                .any(|c| c == '.' || c == '/' || c == '\\' || c.is_whitespace());
        if !valid {
            return Err(InvalidSuffix(suffix.to_string()));
        }
        Ok(Self {
            suffix: format!(".{}", body),
        })
    }

    /// The suffix, with its leading dot.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Path of the artifact for `source`, in the same directory.
    pub fn output_path_for(&self, source: &Path) -> PathBuf {
        let name = match (source.file_stem(), source.extension()) {
            (Some(stem), Some(ext)) => format!(
                "{}{}.{}",
                stem.to_string_lossy(),
                self.suffix,
                ext.to_string_lossy()
            ),
            _ => format!(
                "{}{}",
                source
                    .file_name()
                    .map(OsStr::to_string_lossy)
                    .unwrap_or_default(),
                self.suffix
            ),
        };
        source.with_file_name(name)
    }

    /// True if `path` is named like an artifact of some source file.
    pub fn is_generated_artifact(&self, path: &Path) -> bool {
        self.source_path_for(path).is_some()
    }

    /// The source `path` was generated from, if `path` is an artifact name.
    pub fn source_path_for(&self, path: &Path) -> Option<PathBuf> {
        if let (Some(stem), Some(ext)) = (path.file_stem(), path.extension()) {
            let stem = stem.to_str()?;
            if let Some(base) = stem.strip_suffix(self.suffix.as_str()) {
                if !base.is_empty() {
                    return Some(path.with_file_name(format!("{}.{}", base, ext.to_str()?)));
                }
            }
        }
        let name = path.file_name()?.to_str()?;
        match name.strip_suffix(self.suffix.as_str()) {
            Some(base) if !base.is_empty() => Some(path.with_file_name(base)),
            _ => None,
        }
    }
}
