//! Project-wide minification
//!
//! [`ProjectMinifier`] walks a directory tree, decides for every file
//! whether it is minified or skipped, runs the jobs on a bounded thread
//! pool and collects one [`FileOutcome`] per listed file. A failure in one
//! file never stops the batch; only problems found before the first job
//! (an unreadable root, an unknown language in the filter, a bad exclude
//! pattern) are errors.
//!
//! # Examples
//!
//! ```
//! use std::path::Path;
//! use src_slim::file::FileProcessor;
//! use src_slim::infra::MemoryFileSystem;
//! use src_slim::project::{FileFilter, ProjectMinifier, ProjectSettings};
//! use src_slim::registry::MinifierRegistry;
//!
//! let fs = MemoryFileSystem::new()
//!     .with_file("/app/main.py", "x = 1  # one\n")
//!     .with_file("/app/web/app.js", "let a = 1; // two\n")
//!     .with_file("/app/README", "docs\n");
//! let registry = MinifierRegistry::with_builtin_languages();
//! let minifier = ProjectMinifier::new(
//!     &registry,
//!     FileProcessor::with_fs(fs),
//!     ProjectSettings::default(),
//! )?;
//!
//! let report = minifier.minify_project(Path::new("/app"), &FileFilter::default())?;
//! assert_eq!((report.processed, report.skipped, report.failed), (2, 1, 0));
//!
//! let cleaned = minifier.delete_minified_files(Path::new("/app"), &[])?;
//! assert_eq!(cleaned.deleted.len(), 2);
//! # Ok::<(), src_slim::project::ProjectError>(())
//! ```

pub mod cancel;
pub mod report;

pub use cancel::CancellationToken;
pub use report::{BatchReport, CleanFailure, CleanReport, FileOutcome};

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use regex::Regex;
use thiserror::Error;

use crate::file::{FileProcessor, JobError, MinificationJob, PipelineSettings, SkipReason};
use crate::infra::{FileSystem, RealFileSystem};
use crate::language::{normalize_extension, LanguageMinifier};
use crate::registry::MinifierRegistry;

/// Directories never entered unless configured otherwise.
pub const DEFAULT_SKIP_DIRS: [&str; 4] = [".git", "__pycache__", "node_modules", "target"];

/// Errors raised before any file is processed
#[derive(Error, Debug)]
pub enum ProjectError {
    /// The language filter names a language that is not registered
    #[error("unknown language in filter: '{name}'")]
    UnknownLanguage {
        /// Name as given
        name: String,
        /// Registered language names
        available: Vec<String>,
    },

    /// An exclude pattern is not a valid regular expression
    #[error("invalid exclude pattern '{pattern}'")]
    InvalidExclude {
        /// Pattern as given
        pattern: String,
        /// Regex error
        #[source]
        source: regex::Error,
    },

    /// The project root could not be listed
    #[error("cannot list files under {}", root.display())]
    Walk {
        /// Project root
        root: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The worker pool could not be created
    #[error("failed to start worker threads")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Settings for a project pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSettings {
    /// Worker threads; 0 lets rayon decide
    pub concurrency: usize,
    /// Directory names never entered
    pub skip_dirs: Vec<String>,
    /// Regexes matched against `/`-separated paths relative to the root;
    /// matching files are skipped as filtered
    pub exclude: Vec<String>,
    /// Only delete artifacts whose source still exists
    pub require_source: bool,
    /// Overrides for every job
    pub pipeline: PipelineSettings,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            concurrency: 0,
            skip_dirs: DEFAULT_SKIP_DIRS.iter().map(|d| d.to_string()).collect(),
            exclude: Vec::new(),
            require_source: false,
            pipeline: PipelineSettings::default(),
        }
    }
}

/// Restricts which files a pass minifies. Empty lists mean no restriction;
/// when both lists are set, a file selected by either one is minified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileFilter {
    /// Language names (or extensions) to minify
    pub languages: Vec<String>,
    /// Extensions to minify, leading dot optional
    pub extensions: Vec<String>,
}

impl FileFilter {
    /// Filter on languages only.
    pub fn languages<I, S>(languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            languages: languages.into_iter().map(Into::into).collect(),
            extensions: Vec::new(),
        }
    }

    /// Filter on extensions only.
    pub fn extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            languages: Vec::new(),
            extensions: extensions.into_iter().map(Into::into).collect(),
        }
    }
}

type ProgressFn<'r> = dyn Fn(&FileOutcome, usize) + Send + Sync + 'r;

/// Minifies every supported file under a root directory.
///
/// The registry is borrowed for the lifetime of the minifier, so it cannot
/// change while a pass is running.
pub struct ProjectMinifier<'r, FS: FileSystem = RealFileSystem> {
    registry: &'r MinifierRegistry,
    processor: FileProcessor<FS>,
    settings: ProjectSettings,
    exclude: Vec<Regex>,
    pool: rayon::ThreadPool,
    cancel: CancellationToken,
    progress: Option<Box<ProgressFn<'r>>>,
}

/// A listed file after classification.
enum Planned {
    Done(FileOutcome),
    Run(PathBuf, Arc<dyn LanguageMinifier>),
}

impl<'r, FS: FileSystem> ProjectMinifier<'r, FS> {
    /// Create a minifier. Fails if an exclude pattern does not compile or
    /// the thread pool cannot be built.
    pub fn new(
        registry: &'r MinifierRegistry,
        processor: FileProcessor<FS>,
        settings: ProjectSettings,
    ) -> Result<Self, ProjectError> {
        let exclude = settings
            .exclude
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| ProjectError::InvalidExclude {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(settings.concurrency)
            .thread_name(|i| format!("src-slim-{}", i))
            .build()?;

        Ok(Self {
            registry,
            processor,
            settings,
            exclude,
            pool,
            cancel: CancellationToken::new(),
            progress: None,
        })
    }

    /// Use an externally owned cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Call `callback` with each outcome and the number of listed files, as
    /// outcomes are produced. Called from worker threads.
    pub fn on_progress(mut self, callback: impl Fn(&FileOutcome, usize) + Send + Sync + 'r) -> Self {
        self.progress = Some(Box::new(callback));
        self
    }

    /// Token that cancels this minifier's passes.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// The processor used for all I/O.
    pub fn processor(&self) -> &FileProcessor<FS> {
        &self.processor
    }

    /// Settings of this minifier.
    pub fn settings(&self) -> &ProjectSettings {
        &self.settings
    }

    /// Minify every file under `root` that passes `filter`.
    pub fn minify_project(&self, root: &Path, filter: &FileFilter) -> Result<BatchReport, ProjectError> {
        let languages = self.resolve_language_filter(&filter.languages)?;
        let extensions: BTreeSet<String> =
            filter.extensions.iter().map(|e| normalize_extension(e)).collect();
        let files = self.list(root)?;
        let total = files.len();
        log::info!("minifying {} files under {}", total, root.display());

        let planned: Vec<Planned> = files
            .into_iter()
            .map(|path| self.plan(root, path, &languages, &extensions))
            .collect();

        let outcomes: Vec<FileOutcome> = self.pool.install(|| {
            planned
                .into_par_iter()
                .map(|item| {
                    let outcome = match item {
                        Planned::Done(outcome) => outcome,
                        Planned::Run(path, _) if self.cancel.is_cancelled() => FileOutcome::Skipped {
                            path,
                            reason: SkipReason::Cancelled,
                        },
                        Planned::Run(path, minifier) => self.run(path, minifier),
                    };
                    if let Some(progress) = &self.progress {
                        progress(&outcome, total);
                    }
                    outcome
                })
                .collect()
        });

        let report = BatchReport::from_outcomes(outcomes);
        log::info!(
            "processed {}, skipped {}, failed {}{}",
            report.processed,
            report.skipped,
            report.failed,
            if report.cancelled { " (cancelled)" } else { "" }
        );
        Ok(report)
    }

    /// Delete artifacts under `root`, optionally only those whose source
    /// has one of `extensions`.
    ///
    /// Files are recognized by name alone. With `require_source` set, an
    /// artifact whose source no longer exists is kept.
    pub fn delete_minified_files(
        &self,
        root: &Path,
        extensions: &[String],
    ) -> Result<CleanReport, ProjectError> {
        let extensions: BTreeSet<String> =
            extensions.iter().map(|e| normalize_extension(e)).collect();
        let naming = self.processor.naming();
        let mut report = CleanReport::default();

        for path in self.list(root)? {
            let Some(source) = naming.source_path_for(&path) else {
                continue;
            };
            if self.is_excluded(root, &path) || !Self::extension_allowed(&source, &extensions) {
                continue;
            }
            if self.settings.require_source && !self.processor.exists(&source) {
                log::debug!("keeping {}: source is missing", path.display());
                report.kept.push(path);
                continue;
            }
            match self.processor.remove(&path) {
                Ok(()) => {
                    log::debug!("deleted {}", path.display());
                    report.deleted.push(path);
                }
                Err(e) => {
                    log::warn!("could not delete {}: {}", path.display(), e);
                    report.failed.push(CleanFailure {
                        path,
                        error: e.to_string(),
                    });
                }
            }
        }

        log::info!(
            "deleted {} artifacts under {}",
            report.deleted.len(),
            root.display()
        );
        Ok(report)
    }

    fn resolve_language_filter(&self, names: &[String]) -> Result<BTreeSet<String>, ProjectError> {
        names
            .iter()
            .map(|name| {
                self.registry
                    .resolve(name)
                    .map(|minifier| minifier.name().to_string())
                    .map_err(|_| ProjectError::UnknownLanguage {
                        name: name.clone(),
                        available: self
                            .registry
                            .minifiers()
                            .iter()
                            .map(|m| m.name().to_string())
                            .collect(),
                    })
            })
            .collect()
    }

    fn list(&self, root: &Path) -> Result<Vec<PathBuf>, ProjectError> {
        self.processor
            .fs()
            .list_files(root, &self.settings.skip_dirs)
            .map_err(|source| ProjectError::Walk {
                root: root.to_path_buf(),
                source,
            })
    }

    fn plan(
        &self,
        root: &Path,
        path: PathBuf,
        languages: &BTreeSet<String>,
        extensions: &BTreeSet<String>,
    ) -> Planned {
        let skip = |path: PathBuf, reason| Planned::Done(FileOutcome::Skipped { path, reason });

        if self.processor.naming().is_generated_artifact(&path) {
            return skip(path, SkipReason::GeneratedArtifact);
        }
        if self.is_excluded(root, &path) {
            return skip(path, SkipReason::Filtered);
        }
        let resolved = self.registry.resolve_path(&path);
        // Language and extension filters add up: a file passes if either selects it
        if !languages.is_empty() || !extensions.is_empty() {
            let by_language = resolved
                .as_ref()
                .is_ok_and(|minifier| languages.contains(minifier.name()));
            let by_extension = !extensions.is_empty() && Self::extension_allowed(&path, extensions);
            if !by_language && !by_extension {
                return skip(path, SkipReason::Filtered);
            }
        }
        let Ok(minifier) = resolved else {
            return skip(path, SkipReason::UnsupportedLanguage);
        };
        Planned::Run(path, minifier)
    }

    fn run(&self, path: PathBuf, minifier: Arc<dyn LanguageMinifier>) -> FileOutcome {
        let result = MinificationJob::new(path.clone(), &self.processor)
            .with_minifier(minifier)
            .with_settings(self.settings.pipeline.clone())
            .execute();

        match result {
            Ok(report) if report.skipped => FileOutcome::Skipped {
                path,
                reason: report.reason.unwrap_or(SkipReason::UpToDate),
            },
            Ok(report) => FileOutcome::Processed { report },
            Err(JobError::UnsupportedLanguage { .. }) => FileOutcome::Skipped {
                path,
                reason: SkipReason::UnsupportedLanguage,
            },
            Err(e) => {
                let error = error_chain(&e);
                log::warn!("{}", error);
                FileOutcome::Failed { path, error }
            }
        }
    }

    fn is_excluded(&self, root: &Path, path: &Path) -> bool {
        if self.exclude.is_empty() {
            return false;
        }
        let relative = path.strip_prefix(root).unwrap_or(path);
        let relative = relative.to_string_lossy().replace('\\', "/");
        self.exclude.iter().any(|re| re.is_match(&relative))
    }

    fn extension_allowed(path: &Path, extensions: &BTreeSet<String>) -> bool {
        if extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.contains(&normalize_extension(ext)))
    }
}

/// `error: cause: cause` on one line.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
