//! Single-file minification job
//!
//! A job loads one source file, resolves its minifier, runs the pipeline
//! and writes the artifact next to the source. Jobs are created per file
//! and discarded after [`MinificationJob::execute`].

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::metrics::SizeMetrics;
use super::processor::FileProcessor;
use crate::action::{ActionKind, ActionOptions, ActionPipeline, IndentPolicy};
use crate::infra::{FileSystem, RealFileSystem};
use crate::language::LanguageMinifier;
use crate::registry::MinifierRegistry;

/// Overrides applied on top of a language's defaults.
///
/// `None` fields keep the language default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PipelineSettings {
    /// Actions to run, in order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<ActionKind>>,
    /// Indentation policy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indentation: Option<IndentPolicy>,
    /// Keep line numbers stable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_line_parity: Option<bool>,
}

impl PipelineSettings {
    /// Pipeline for `minifier`: the configured actions, or its default pipeline.
    pub fn pipeline_for(&self, minifier: &dyn LanguageMinifier) -> ActionPipeline {
        match &self.actions {
            Some(kinds) => ActionPipeline::from_kinds(kinds),
            None => minifier.default_pipeline().clone(),
        }
    }

    /// Options for `minifier`, starting from its defaults.
    pub fn options_for(&self, minifier: &dyn LanguageMinifier) -> ActionOptions {
        let defaults = minifier.default_options();
        ActionOptions {
            indentation: self.indentation.unwrap_or(defaults.indentation),
            keep_line_parity: self.keep_line_parity.unwrap_or(defaults.keep_line_parity),
        }
    }
}

/// Why a file was not (re)written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    /// The file is itself a minified artifact
    GeneratedArtifact,
    /// Excluded by a language, extension, or path filter
    Filtered,
    /// No minifier for the file
    UnsupportedLanguage,
    /// The batch was cancelled before the job started
    Cancelled,
    /// The artifact already holds the minified text
    UpToDate,
}

impl SkipReason {
    /// Short label for summaries
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GeneratedArtifact => "generated artifact",
            Self::Filtered => "filtered",
            Self::UnsupportedLanguage => "unsupported language",
            Self::Cancelled => "cancelled",
            Self::UpToDate => "up to date",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one job.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobReport {
    /// Source file
    pub source: PathBuf,
    /// Artifact path
    pub output_path: PathBuf,
    /// Language that minified the file
    pub language: String,
    /// Source size in bytes
    pub original_size: u64,
    /// Minified size in bytes
    pub minified_size: u64,
    /// True if the artifact was not written
    pub skipped: bool,
    /// Why the artifact was not written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<SkipReason>,
}

impl JobReport {
    /// Before/after sizes
    pub fn metrics(&self) -> SizeMetrics {
        SizeMetrics {
            before_bytes: self.original_size,
            after_bytes: self.minified_size,
        }
    }
}

/// Errors that end a single job
#[derive(Error, Debug)]
pub enum JobError {
    /// No minifier was given and none is registered for the file
    #[error("no minifier for {}", path.display())]
    UnsupportedLanguage {
        /// Source file
        path: PathBuf,
    },

    /// The source could not be read
    #[error("failed to read {}", path.display())]
    Read {
        /// Source file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// The artifact could not be written
    #[error("failed to write {}", path.display())]
    Write {
        /// Artifact path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },
}

impl JobError {
    /// The file the error is about.
    pub fn path(&self) -> &Path {
        match self {
            Self::UnsupportedLanguage { path }
            | Self::Read { path, .. }
            | Self::Write { path, .. } => path,
        }
    }
}

/// Minification of one file.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use src_slim::file::{FileProcessor, MinificationJob};
/// use src_slim::infra::MemoryFileSystem;
/// use src_slim::registry::MinifierRegistry;
///
/// let registry = MinifierRegistry::with_builtin_languages();
/// let processor = FileProcessor::with_fs(
///     MemoryFileSystem::new().with_file("/src/app.py", "x = 1  # one\n"),
/// );
///
/// let report = MinificationJob::new("/src/app.py", &processor)
///     .with_registry(&registry)
///     .execute()?;
///
/// assert_eq!(report.output_path, Path::new("/src/app.min.py"));
/// assert_eq!(processor.fs().get(&report.output_path).unwrap(), "x = 1\n");
/// # Ok::<(), src_slim::file::JobError>(())
/// ```
pub struct MinificationJob<'a, FS: FileSystem = RealFileSystem> {
    source: PathBuf,
    processor: &'a FileProcessor<FS>,
    minifier: Option<Arc<dyn LanguageMinifier>>,
    registry: Option<&'a MinifierRegistry>,
    settings: PipelineSettings,
}

impl<'a, FS: FileSystem> MinificationJob<'a, FS> {
    /// Job for `source`, doing its I/O through `processor`.
    pub fn new(source: impl Into<PathBuf>, processor: &'a FileProcessor<FS>) -> Self {
        Self {
            source: source.into(),
            processor,
            minifier: None,
            registry: None,
            settings: PipelineSettings::default(),
        }
    }

    /// Use this minifier regardless of the file extension.
    pub fn with_minifier(mut self, minifier: Arc<dyn LanguageMinifier>) -> Self {
        self.minifier = Some(minifier);
        self
    }

    /// Resolve the minifier from the file extension through `registry`.
    pub fn with_registry(mut self, registry: &'a MinifierRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Override the language defaults.
    pub fn with_settings(mut self, settings: PipelineSettings) -> Self {
        self.settings = settings;
        self
    }

    /// The source file.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// The minifier that will run: the explicit one, else the registry's.
    pub fn resolve_minifier(&self) -> Result<Arc<dyn LanguageMinifier>, JobError> {
        if let Some(minifier) = &self.minifier {
            return Ok(Arc::clone(minifier));
        }
        self.registry
            .and_then(|registry| registry.resolve_path(&self.source).ok())
            .ok_or_else(|| JobError::UnsupportedLanguage {
                path: self.source.clone(),
            })
    }

    /// Minify the source and write the artifact.
    ///
    /// If the artifact already holds exactly the minified text it is left
    /// untouched and the report says [`SkipReason::UpToDate`].
    pub fn execute(self) -> Result<JobReport, JobError> {
        let minifier = self.resolve_minifier()?;
        let text = self
            .processor
            .read(&self.source)
            .map_err(|source| JobError::Read {
                path: self.source.clone(),
                source,
            })?;

        let pipeline = self.settings.pipeline_for(minifier.as_ref());
        let options = self.settings.options_for(minifier.as_ref());
        let minified = minifier.minify_with(&text, &pipeline, &options);

        let output_path = self.processor.output_path_for(&self.source);
        let metrics = SizeMetrics::of(&text, &minified);
        let up_to_date = self.processor.exists(&output_path)
            && self
                .processor
                .read(&output_path)
                .is_ok_and(|existing| existing == minified);

        if up_to_date {
            log::debug!("{} is up to date", output_path.display());
        } else {
            self.processor
                .write_atomic(&output_path, &minified)
                .map_err(|source| JobError::Write {
                    path: output_path.clone(),
                    source,
                })?;
            log::debug!(
                "{} -> {} ({}: {} -> {} bytes)",
                self.source.display(),
                output_path.display(),
                minifier.name(),
                metrics.before_bytes,
                metrics.after_bytes
            );
        }

        Ok(JobReport {
            source: self.source,
            output_path,
            language: minifier.name().to_string(),
            original_size: metrics.before_bytes,
            minified_size: metrics.after_bytes,
            skipped: up_to_date,
            reason: up_to_date.then_some(SkipReason::UpToDate),
        })
    }
}
