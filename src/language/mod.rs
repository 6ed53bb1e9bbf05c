//! Language minifiers
//!
//! A language minifier binds a [`PatternSet`] to a default [`ActionPipeline`]
//! and to the file extensions it handles. [`Language`] is the stock
//! implementation; every built-in language in [`builtin`] is one. Anything
//! implementing [`LanguageMinifier`] can be registered alongside them.
//!
//! # Examples
//!
//! ```
//! use src_slim::action::ActionPipeline;
//! use src_slim::language::{Language, LanguageMinifier};
//! use src_slim::pattern::{PatternSet, StringDelimiter};
//!
//! let ini = Language::new(
//!     "ini",
//!     ["ini", ".cfg"],
//!     PatternSet::builder()
//!         .line_comment(";")
//!         .string(StringDelimiter::quoted("\""))
//!         .build(),
//! );
//!
//! assert_eq!(ini.file_extensions(), [".ini", ".cfg"]);
//! assert_eq!(ini.minify("; comment\nkey = \"a ; b\"\n"), "key = \"a ; b\"\n");
//! ```

pub mod builtin;

use std::fmt;
use std::sync::Arc;

use crate::action::{ActionOptions, ActionPipeline};
use crate::pattern::PatternSet;

/// A minifier for one language.
pub trait LanguageMinifier: Send + Sync + fmt::Debug {
    /// Unique lowercase identifier, e.g. `python`
    fn name(&self) -> &str;

    /// Extensions handled, lowercase with a leading dot
    fn file_extensions(&self) -> &[String];

    /// Lexical patterns of the language
    fn patterns(&self) -> &PatternSet;

    /// Pipeline used when the caller does not supply one
    fn default_pipeline(&self) -> &ActionPipeline;

    /// Options used when the caller does not supply any
    fn default_options(&self) -> ActionOptions {
        ActionOptions::default()
    }

    /// Minify with the default pipeline and options.
    fn minify(&self, code: &str) -> String {
        self.default_pipeline()
            .apply(code, self.patterns(), &self.default_options())
    }

    /// Minify with an explicit pipeline and options.
    fn minify_with(&self, code: &str, pipeline: &ActionPipeline, options: &ActionOptions) -> String {
        pipeline.apply(code, self.patterns(), options)
    }
}

/// Normalize an extension to lowercase with exactly one leading dot.
///
/// # Examples
///
/// ```
/// use src_slim::language::normalize_extension;
///
/// assert_eq!(normalize_extension("PY"), ".py");
/// assert_eq!(normalize_extension(".Js"), ".js");
/// ```
pub fn normalize_extension(extension: &str) -> String {
    format!(".{}", extension.trim().trim_start_matches('.').to_lowercase())
}

/// Data-driven language minifier.
#[derive(Debug, Clone)]
pub struct Language {
    name: String,
    extensions: Vec<String>,
    patterns: Arc<PatternSet>,
    pipeline: ActionPipeline,
    options: ActionOptions,
}

impl Language {
    /// Create a language with the standard pipeline and default options.
    pub fn new<I, S>(name: impl Into<String>, extensions: I, patterns: PatternSet) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_shared_patterns(name, extensions, Arc::new(patterns))
    }

    /// Like [`new`](Self::new), reusing an existing pattern set.
    pub fn with_shared_patterns<I, S>(
        name: impl Into<String>,
        extensions: I,
        patterns: Arc<PatternSet>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for ext in extensions {
            let ext = normalize_extension(ext.as_ref());
            if ext.len() > 1 && !normalized.contains(&ext) {
                normalized.push(ext);
            }
        }
        Self {
            name: name.into().to_lowercase(),
            extensions: normalized,
            patterns,
            pipeline: ActionPipeline::standard(),
            options: ActionOptions::default(),
        }
    }

    /// Replace the default pipeline.
    pub fn with_pipeline(mut self, pipeline: ActionPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Replace the default options.
    pub fn with_options(mut self, options: ActionOptions) -> Self {
        self.options = options;
        self
    }

    /// Shared handle to the pattern set.
    pub fn shared_patterns(&self) -> Arc<PatternSet> {
        Arc::clone(&self.patterns)
    }
}

impl LanguageMinifier for Language {
    fn name(&self) -> &str {
        &self.name
    }

    fn file_extensions(&self) -> &[String] {
        &self.extensions
    }

    fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    fn default_pipeline(&self) -> &ActionPipeline {
        &self.pipeline
    }

    fn default_options(&self) -> ActionOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionKind, IndentPolicy};

    fn hash_comments() -> PatternSet {
        PatternSet::builder().line_comment("#").build()
    }

    #[test]
    fn test_extensions_are_normalized_and_deduplicated() {
        let lang = Language::new("Conf", ["CONF", ".conf", " cnf ", ""], hash_comments());

        assert_eq!(lang.name(), "conf");
        assert_eq!(lang.file_extensions(), [".conf", ".cnf"]);
    }

    #[test]
    fn test_default_pipeline_is_standard() {
        let lang = Language::new("conf", ["conf"], hash_comments());
        assert_eq!(
            lang.default_pipeline().names(),
            vec!["comments", "whitespace", "blank-lines"]
        );
    }

    #[test]
    fn test_custom_pipeline_and_options() {
        let lang = Language::new("conf", ["conf"], hash_comments())
            .with_pipeline(ActionPipeline::from_kinds(&[ActionKind::Comments]))
            .with_options(ActionOptions {
                indentation: IndentPolicy::Preserve,
                keep_line_parity: true,
            });

        assert_eq!(lang.minify("# a\n  x  # b\n"), "\n  x  \n");
    }

    #[test]
    fn test_minify_with_overrides_defaults() {
        let lang = Language::new("conf", ["conf"], hash_comments());
        let only_whitespace = ActionPipeline::from_kinds(&[ActionKind::Whitespace]);

        let out = lang.minify_with("a   b # c  d", &only_whitespace, &ActionOptions::default());
        assert_eq!(out, "a b # c  d");
    }

    #[test]
    fn test_shared_patterns_are_not_copied() {
        let lang = Language::new("conf", ["conf"], hash_comments());
        let twin = Language::with_shared_patterns("conf2", ["conf2"], lang.shared_patterns());

        assert!(Arc::ptr_eq(&lang.shared_patterns(), &twin.shared_patterns()));
    }
}
