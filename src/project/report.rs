//! Batch and clean-up reports

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::file::{JobReport, SizeMetrics, SkipReason};

/// What happened to one listed file.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum FileOutcome {
    /// Artifact written
    Processed {
        /// Job result
        report: JobReport,
    },
    /// Left alone
    Skipped {
        /// The file
        path: PathBuf,
        /// Why
        reason: SkipReason,
    },
    /// Read or write failed
    Failed {
        /// The file
        path: PathBuf,
        /// Error message, including its causes
        error: String,
    },
}

impl FileOutcome {
    /// The listed file this outcome is about.
    pub fn path(&self) -> &Path {
        match self {
            Self::Processed { report } => &report.source,
            Self::Skipped { path, .. } | Self::Failed { path, .. } => path,
        }
    }

    /// Skip reason, if skipped.
    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            Self::Skipped { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}

/// Result of one project pass.
///
/// Every listed file appears exactly once in `outcomes`, so
/// `processed + skipped + failed == outcomes.len()`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Files whose artifact was written
    pub processed: usize,
    /// Files left alone
    pub skipped: usize,
    /// Files that could not be read or written
    pub failed: usize,
    /// Byte totals over processed files
    pub totals: SizeMetrics,
    /// True if at least one job was skipped because the pass was cancelled
    pub cancelled: bool,
    /// Per-file outcomes, in listing order
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    /// Tally `outcomes` into a report.
    pub fn from_outcomes(outcomes: Vec<FileOutcome>) -> Self {
        let mut report = Self {
            cancelled: outcomes
                .iter()
                .any(|outcome| outcome.skip_reason() == Some(SkipReason::Cancelled)),
            ..Self::default()
        };
        for outcome in &outcomes {
            match outcome {
                FileOutcome::Processed { report: job } => {
                    report.processed += 1;
                    report.totals += job.metrics();
                }
                FileOutcome::Skipped { .. } => report.skipped += 1,
                FileOutcome::Failed { .. } => report.failed += 1,
            }
        }
        report.outcomes = outcomes;
        report
    }

    /// Number of files listed.
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of files skipped for `reason`.
    pub fn skipped_for(&self, reason: SkipReason) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.skip_reason() == Some(reason))
            .count()
    }

    /// Failed outcomes.
    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome, FileOutcome::Failed { .. }))
    }

    /// True if nothing failed.
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// An artifact that could not be deleted.
#[derive(Debug, Clone, Serialize)]
pub struct CleanFailure {
    /// The artifact
    pub path: PathBuf,
    /// Error message
    pub error: String,
}

/// Result of a deletion pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CleanReport {
    /// Artifacts removed
    pub deleted: Vec<PathBuf>,
    /// Artifacts kept because their source is missing
    pub kept: Vec<PathBuf>,
    /// Artifacts that could not be removed
    pub failed: Vec<CleanFailure>,
}

impl CleanReport {
    /// True if nothing failed.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}
