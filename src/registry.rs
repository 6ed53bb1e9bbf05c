//! Minifier registry
//!
//! Maps language identifiers and file extensions to registered
//! [`LanguageMinifier`]s. A registry is an ordinary value: build one with
//! [`MinifierRegistry::with_builtin_languages`] (or start empty), register
//! extra languages, then lend it to jobs and project passes by shared
//! reference.
//!
//! # Examples
//!
//! ```
//! use std::path::Path;
//! use src_slim::registry::MinifierRegistry;
//!
//! let registry = MinifierRegistry::with_builtin_languages();
//!
//! assert_eq!(registry.resolve("PY")?.name(), "python");
//! assert_eq!(registry.resolve(".js")?.name(), "javascript");
//! assert_eq!(registry.resolve_path(Path::new("lib/util.rs"))?.name(), "rust");
//! assert!(registry.resolve("cobol").is_err());
//! # Ok::<(), src_slim::registry::RegistryError>(())
//! ```

use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::language::{builtin, normalize_extension, LanguageMinifier};

/// Registry lookup errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No minifier for the identifier or extension
    #[error("unsupported language: '{key}'")]
    UnsupportedLanguage {
        /// Key that failed to resolve
        key: String,
    },
}

/// Extension and identifier lookup for language minifiers.
#[derive(Debug, Clone, Default)]
pub struct MinifierRegistry {
    by_name: HashMap<String, Arc<dyn LanguageMinifier>>,
    by_extension: HashMap<String, Arc<dyn LanguageMinifier>>,
}

impl MinifierRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in language.
    pub fn with_builtin_languages() -> Self {
        let mut registry = Self::new();
        for language in builtin::all() {
            registry.register(Arc::new(language));
        }
        registry
    }

    /// Register a minifier under its name and every extension it declares.
    ///
    /// A later registration replaces an earlier one for the same name or
    /// extension.
    pub fn register(&mut self, minifier: Arc<dyn LanguageMinifier>) {
        let name = minifier.name().to_lowercase();
        for extension in minifier.file_extensions() {
            let extension = normalize_extension(extension);
            if let Some(previous) = self.by_extension.get(&extension) {
                if previous.name() != name {
                    log::debug!(
                        "extension {} moves from {} to {}",
                        extension,
                        previous.name(),
                        name
                    );
                }
            }
            self.by_extension.insert(extension, Arc::clone(&minifier));
        }
        self.by_name.insert(name, minifier);
    }

    /// Remove a minifier by name, along with the extensions still mapped
    /// to it. Returns the removed minifier.
    pub fn unregister(&mut self, name: &str) -> Option<Arc<dyn LanguageMinifier>> {
        let removed = self.by_name.remove(&name.to_lowercase())?;
        self.by_extension
            .retain(|_, minifier| !Arc::ptr_eq(minifier, &removed));
        Some(removed)
    }

    /// Resolve an identifier or an extension (leading dot optional, any
    /// case). Identifiers are tried first.
    pub fn resolve(&self, key: &str) -> Result<Arc<dyn LanguageMinifier>, RegistryError> {
        let trimmed = key.trim();
        if !trimmed.starts_with('.') {
            if let Some(minifier) = self.get_by_name(trimmed) {
                return Ok(minifier);
            }
        }
        self.get_for_extension(trimmed)
            .ok_or_else(|| RegistryError::UnsupportedLanguage {
                key: key.to_string(),
            })
    }

    /// Resolve by the extension of a path.
    pub fn resolve_path(&self, path: &Path) -> Result<Arc<dyn LanguageMinifier>, RegistryError> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.get_for_extension(ext))
            .ok_or_else(|| RegistryError::UnsupportedLanguage {
                key: path.display().to_string(),
            })
    }

    /// Minifier registered under `name`.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn LanguageMinifier>> {
        self.by_name.get(&name.trim().to_lowercase()).cloned()
    }

    /// Minifier registered for `extension`.
    pub fn get_for_extension(&self, extension: &str) -> Option<Arc<dyn LanguageMinifier>> {
        let extension = normalize_extension(extension);
        if extension.len() <= 1 {
            return None;
        }
        self.by_extension.get(&extension).cloned()
    }

    /// True if `key` resolves.
    pub fn contains(&self, key: &str) -> bool {
        self.resolve(key).is_ok()
    }

    /// Every registered extension, sorted.
    pub fn supported_extensions(&self) -> Vec<String> {
        let sorted: BTreeSet<&String> = self.by_extension.keys().collect();
        sorted.into_iter().cloned().collect()
    }

    /// Every registered minifier, sorted by name.
    pub fn minifiers(&self) -> Vec<Arc<dyn LanguageMinifier>> {
        let mut all: Vec<_> = self.by_name.values().cloned().collect();
        all.sort_by(|a, b| a.name().cmp(b.name()));
        all
    }

    /// Number of registered minifiers.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
