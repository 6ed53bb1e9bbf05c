//! Enhanced error types with contextual suggestions
//!
//! Provides structured error types that include:
//! - Actionable error messages
//! - Suggested fixes and recovery actions
//! - Documentation links
//! - Proper exit codes for CI/CD
//!
//! # Examples
//!
//! ```no_run
//! use src_slim::error::{ErrorFormatter, SrcSlimError};
//!
//! let err = anyhow::Error::new(SrcSlimError::UnsupportedLanguage {
//!     key: "cobol".to_string(),
//!     available: vec!["python".to_string(), "rust".to_string()],
//! });
//! eprint!("{}", ErrorFormatter::format(&err));
//! std::process::exit(ErrorFormatter::exit_code(&err));
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::file::JobError;
use crate::project::ProjectError;

const DOCS: &str = "https://github.com/src-slim/src-slim";

/// User-facing src-slim errors with contextual suggestions
#[derive(Error, Debug)]
pub enum SrcSlimError {
    /// No minifier for a language name or file
    #[error("Unsupported language: '{key}'")]
    UnsupportedLanguage {
        /// Name, extension or path that did not resolve
        key: String,
        /// Registered language names
        available: Vec<String>,
    },

    /// Invalid profile name
    #[error("Invalid profile: '{name}'")]
    InvalidProfile {
        /// Invalid profile name
        name: String,
        /// List of valid profile names
        available: Vec<String>,
    },

    /// Configuration file could not be loaded
    #[error("Invalid configuration: {}", path.display())]
    InvalidConfig {
        /// Path to config file
        path: PathBuf,
        /// Underlying problem
        #[source]
        source: anyhow::Error,
    },

    /// Input file or directory not found
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// Path to missing file
        path: PathBuf,
        /// Operation that required the file
        operation: String,
    },

    /// Some files of a batch failed
    #[error("{failed} of {total} files failed")]
    BatchFailed {
        /// Failed files
        failed: usize,
        /// Files listed
        total: usize,
    },

    /// Generic I/O error with context
    #[error("I/O error: {context}")]
    Io {
        /// Context about where the error occurred
        context: String,
        #[source]
        /// IO error source
        source: std::io::Error,
    },

    /// Single-file job error
    #[error(transparent)]
    Job(#[from] JobError),

    /// Project pass error
    #[error(transparent)]
    Project(#[from] ProjectError),
}

impl SrcSlimError {
    /// Get actionable suggestion for resolving this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use src_slim::error::SrcSlimError;
    ///
    /// let error = SrcSlimError::InvalidProfile {
    ///     name: "extreme".to_string(),
    ///     available: vec!["safe".to_string(), "balanced".to_string()],
    /// };
    ///
    /// assert!(error.suggestion().unwrap().contains("safe, balanced"));
    /// ```
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::UnsupportedLanguage { available, .. } => Some(format!(
                "Supported languages: {}\nRun 'src-slim languages' to see their extensions",
                available.join(", ")
            )),
            Self::InvalidProfile { available, .. } => {
                Some(format!("Available profiles: {}", available.join(", ")))
            }
            Self::InvalidConfig { .. } => Some(
                "Fix the file, or run 'src-slim init --force' to write a fresh one".to_string(),
            ),
            Self::FileNotFound { path, operation } => Some(format!(
                "Ensure {} exists before running {}",
                path.display(),
                operation
            )),
            Self::BatchFailed { .. } => Some(
                "See the warnings above; rerun with RUST_LOG=debug for per-file details"
                    .to_string(),
            ),
            Self::Io { context, .. } => Some(format!(
                "Check file permissions and that {} is accessible",
                context
            )),
            Self::Job(JobError::UnsupportedLanguage { .. }) => Some(
                "Pass --language to choose a minifier, or run 'src-slim languages'".to_string(),
            ),
            Self::Job(_) => Some("Check file permissions and free disk space".to_string()),
            Self::Project(ProjectError::UnknownLanguage { available, .. }) => {
                Some(format!("Supported languages: {}", available.join(", ")))
            }
            Self::Project(ProjectError::InvalidExclude { .. }) => Some(
                "Exclude patterns are regular expressions; escape '.' and '(' as '\\.' and '\\('"
                    .to_string(),
            ),
            Self::Project(ProjectError::Walk { root, .. }) => Some(format!(
                "Check that {} exists and is readable",
                root.display()
            )),
            Self::Project(ProjectError::ThreadPool(_)) => {
                Some("Lower --jobs or the concurrency setting".to_string())
            }
        }
    }

    /// Get documentation URL for this error.
    pub fn docs_url(&self) -> Option<String> {
        match self {
            Self::InvalidConfig { .. } | Self::InvalidProfile { .. } => {
                Some(format!("{}#configuration", DOCS))
            }
            Self::UnsupportedLanguage { .. } | Self::Project(ProjectError::UnknownLanguage { .. }) => {
                Some(format!("{}#supported-languages", DOCS))
            }
            _ => None,
        }
    }

    /// Get appropriate exit code for this error.
    ///
    /// Follows sysexits.h conventions.
    ///
    /// # Examples
    ///
    /// ```
    /// use src_slim::error::SrcSlimError;
    ///
    /// let error = SrcSlimError::BatchFailed { failed: 1, total: 3 };
    /// assert_eq!(error.exit_code(), 1);
    /// ```
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::UnsupportedLanguage { .. } => 65, // EX_DATAERR
            Self::InvalidProfile { .. } => 64,      // EX_USAGE
            Self::InvalidConfig { .. } => 78,       // EX_CONFIG
            Self::FileNotFound { .. } => 66,        // EX_NOINPUT
            Self::BatchFailed { .. } => 1,
            Self::Io { .. } => 74, // EX_IOERR
            Self::Job(JobError::UnsupportedLanguage { .. }) => 65,
            Self::Job(JobError::Read { .. }) => 66,
            Self::Job(JobError::Write { .. }) => 73, // EX_CANTCREAT
            Self::Project(ProjectError::UnknownLanguage { .. }) => 64,
            Self::Project(ProjectError::InvalidExclude { .. }) => 78,
            Self::Project(ProjectError::Walk { .. }) => 66,
            Self::Project(ProjectError::ThreadPool(_)) => 71, // EX_OSERR
        }
    }
}

/// Error formatter with colors and structured output
pub struct ErrorFormatter;

impl ErrorFormatter {
    /// Format error with suggestions and documentation links
    pub fn format(error: &anyhow::Error) -> String {
        use console::style;

        let mut output = String::new();

        output.push_str(&format!("{} {}\n", style("error:").red().bold(), error));

        let mut source = error.source();
        let mut indent = 1;
        while let Some(err) = source {
            output.push_str(&format!(
                "{}{} {}\n",
                "  ".repeat(indent),
                style("caused by:").yellow(),
                err
            ));
            source = err.source();
            indent += 1;
        }

        if let Some(slim_error) = Self::find(error) {
            if let Some(suggestion) = slim_error.suggestion() {
                output.push_str(&format!(
                    "\n{} {}\n",
                    style("help:").cyan().bold(),
                    suggestion
                ));
            }

            if let Some(docs) = slim_error.docs_url() {
                output.push_str(&format!("{} {}\n", style("docs:").blue(), docs));
            }
        }

        output
    }

    /// Get exit code from error
    pub fn exit_code(error: &anyhow::Error) -> i32 {
        Self::find(error).map_or(1, SrcSlimError::exit_code)
    }

    /// The outermost [`SrcSlimError`] in the chain, if any.
    fn find(error: &anyhow::Error) -> Option<&SrcSlimError> {
        error.chain().find_map(|e| e.downcast_ref::<SrcSlimError>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    fn all_variants() -> Vec<SrcSlimError> {
        vec![
            SrcSlimError::UnsupportedLanguage {
                key: "x".to_string(),
                available: vec!["python".to_string()],
            },
            SrcSlimError::InvalidProfile {
                name: "x".to_string(),
                available: vec!["safe".to_string()],
            },
            SrcSlimError::InvalidConfig {
                path: PathBuf::from(".src-slim.toml"),
                source: anyhow::anyhow!("bad"),
            },
            SrcSlimError::FileNotFound {
                path: PathBuf::from("a.py"),
                operation: "file".to_string(),
            },
            SrcSlimError::BatchFailed { failed: 1, total: 2 },
            SrcSlimError::Io {
                context: "reading".to_string(),
                source: std::io::Error::other("test"),
            },
            SrcSlimError::Job(JobError::Write {
                path: PathBuf::from("a.min.py"),
                source: std::io::Error::other("full"),
            }),
            SrcSlimError::Project(ProjectError::UnknownLanguage {
                name: "cobol".to_string(),
                available: vec!["python".to_string()],
            }),
        ]
    }

    #[test]
    fn test_all_error_variants_have_suggestions() {
        for err in all_variants() {
            let suggestion = err.suggestion();
            assert!(
                suggestion.as_deref().is_some_and(|s| !s.is_empty()),
                "Error {:?} should have a suggestion",
                err
            );
        }
    }

    #[test]
    fn test_all_error_variants_have_exit_codes() {
        for err in all_variants() {
            let exit_code = err.exit_code();
            assert!(exit_code > 0, "Error {:?} should have non-zero exit code", err);
            assert!(exit_code < 256, "Exit code should fit in a byte");
        }
    }

    #[test]
    fn test_exit_codes_follow_conventions() {
        let not_found = SrcSlimError::FileNotFound {
            path: PathBuf::from("a"),
            operation: "file".to_string(),
        };
        assert_eq!(not_found.exit_code(), 66);

        let config = SrcSlimError::InvalidConfig {
            path: PathBuf::from(".src-slim.toml"),
            source: anyhow::anyhow!("bad"),
        };
        assert_eq!(config.exit_code(), 78);
    }

    #[test]
    fn test_unknown_language_lists_alternatives() {
        let err = SrcSlimError::Project(ProjectError::UnknownLanguage {
            name: "cobol".to_string(),
            available: vec!["python".to_string(), "rust".to_string()],
        });
        assert!(err.suggestion().unwrap().contains("python, rust"));
        assert!(err.docs_url().unwrap().ends_with("#supported-languages"));
    }

    #[test]
    fn test_formatter_includes_cause_and_help() {
        let err = anyhow::Error::new(SrcSlimError::Job(JobError::Read {
            path: PathBuf::from("a.py"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        }));

        let text = ErrorFormatter::format(&err);
        assert!(text.contains("failed to read a.py"));
        assert!(text.contains("caused by:"));
        assert!(text.contains("denied"));
        assert!(text.contains("help:"));
        assert_eq!(ErrorFormatter::exit_code(&err), 66);
    }

    #[test]
    fn test_formatter_finds_error_under_context() {
        let err = Err::<(), _>(SrcSlimError::BatchFailed { failed: 2, total: 5 })
            .context("minify failed")
            .unwrap_err();

        assert_eq!(ErrorFormatter::exit_code(&err), 1);
        assert!(ErrorFormatter::format(&err).contains("2 of 5 files failed"));
    }

    #[test]
    fn test_plain_anyhow_error_exits_with_one() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(ErrorFormatter::exit_code(&err), 1);
        assert!(!ErrorFormatter::format(&err).contains("help:"));
    }
}
