#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! src-slim library
//!
//! This library provides the core functionality for minifying source files
//! in many languages: comments and redundant whitespace are removed while
//! string literals are left untouched. It can be used programmatically in
//! addition to the CLI interface.
//!
//! # Basic Example
//!
//! Minifying a snippet with a built-in language:
//!
//! ```
//! use src_slim::registry::MinifierRegistry;
//!
//! let registry = MinifierRegistry::with_builtin_languages();
//! let python = registry.resolve("python")?;
//!
//! assert_eq!(python.minify("a = 1  # comment\nb = 2\n"), "a = 1\nb = 2\n");
//! assert_eq!(python.minify("s = '# kept'\n"), "s = '# kept'\n");
//! # Ok::<(), src_slim::registry::RegistryError>(())
//! ```
//!
//! # Advanced Example: Custom Pipelines
//!
//! Running a chosen sequence of actions with line numbers kept stable:
//!
//! ```
//! use src_slim::action::{ActionKind, ActionOptions, ActionPipeline};
//! use src_slim::language::builtin;
//! use src_slim::language::LanguageMinifier;
//!
//! let c = builtin::c();
//! let pipeline = ActionPipeline::from_kinds(&[ActionKind::Comments, ActionKind::Whitespace]);
//! let options = ActionOptions {
//!     keep_line_parity: true,
//!     ..c.default_options()
//! };
//!
//! let out = c.minify_with("/* a\n b */\nint  x;\n", &pipeline, &options);
//! assert_eq!(out.lines().count(), 3);
//! assert!(out.ends_with("int x;\n"));
//! ```
//!
//! # Advanced Example: Whole Projects
//!
//! Minifying a directory tree and cleaning up afterwards:
//!
//! ```
//! use src_slim::file::FileProcessor;
//! use src_slim::project::{FileFilter, ProjectMinifier, ProjectSettings};
//! use src_slim::registry::MinifierRegistry;
//! use std::fs;
//! use tempfile::TempDir;
//!
//! let workspace = TempDir::new()?;
//! fs::write(workspace.path().join("main.rs"), "fn main() {} // entry\n")?;
//!
//! let registry = MinifierRegistry::with_builtin_languages();
//! let minifier = ProjectMinifier::new(&registry, FileProcessor::new(), ProjectSettings::default())?;
//!
//! let report = minifier.minify_project(workspace.path(), &FileFilter::default())?;
//! assert_eq!(report.processed, 1);
//! assert!(workspace.path().join("main.min.rs").exists());
//!
//! minifier.delete_minified_files(workspace.path(), &[])?;
//! assert!(!workspace.path().join("main.min.rs").exists());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Minification actions and pipelines
pub mod action;
/// Command handlers for CLI operations
pub mod cmd;
/// Configuration file and profile management
pub mod config;
/// Enhanced error types with contextual suggestions
pub mod error;
/// Single-file jobs, artifact naming and atomic writes
pub mod file;
/// Shared formatting utilities
pub mod fmt;
/// Infrastructure traits for filesystem access
pub mod infra;
/// Language minifiers
pub mod language;
/// Lexical patterns and the span scanner
pub mod pattern;
/// Project-wide minification and artifact clean-up
pub mod project;
/// Language registry
pub mod registry;
