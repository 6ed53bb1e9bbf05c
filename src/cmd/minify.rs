//! Minify command implementation
//!
//! Thin presentation layer over [`ProjectMinifier`]: loads the
//! configuration, drives a progress bar from the pass's progress callback
//! and prints the batch summary.

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

use crate::cmd::{load_config, Overrides};
use crate::error::SrcSlimError;
use crate::file::{FileProcessor, SkipReason};
use crate::fmt::{format_bytes, format_reduction, CHART, CHECKMARK, CROSSMARK, SCISSORS, STOP};
use crate::project::{BatchReport, FileFilter, FileOutcome, ProjectMinifier};
use crate::registry::MinifierRegistry;

/// Main minify command handler (presentation layer)
///
/// Writes a `<stem>.min.<ext>` artifact next to every supported file under
/// `dir`. Fails with [`SrcSlimError::BatchFailed`] if any file failed.
///
/// # Examples
///
/// ```no_run
/// use src_slim::cmd::{cmd_minify, Overrides};
/// use src_slim::project::FileFilter;
/// use std::path::Path;
///
/// // Minify only the Python files of the current directory
/// cmd_minify(
///     Path::new("."),
///     &FileFilter::languages(["python"]),
///     &Overrides::default(),
///     false,
/// )?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_minify(
    dir: &Path,
    filter: &FileFilter,
    overrides: &Overrides,
    json_output: bool,
) -> Result<()> {
    if !dir.is_dir() {
        return Err(SrcSlimError::FileNotFound {
            path: dir.to_path_buf(),
            operation: "minify".to_string(),
        }
        .into());
    }

    let config = load_config(dir, overrides)?;
    let registry = MinifierRegistry::with_builtin_languages();
    let processor = FileProcessor::new().with_naming(config.naming()?);

    if !json_output {
        println!(
            "{} {} Minifying {} (profile: {})",
            SCISSORS,
            style("src-slim").bold(),
            style(dir.display()).cyan(),
            style(&config.profile).bold()
        );
        println!();
    }

    let bar = progress_bar(json_output);
    let progress = bar.clone();
    let minifier = ProjectMinifier::new(&registry, processor, config.to_project_settings()?)
        .map_err(SrcSlimError::from)?
        .on_progress(move |outcome, total| {
            progress.set_length(total as u64);
            progress.set_message(outcome.path().display().to_string());
            progress.inc(1);
        });

    let report = minifier
        .minify_project(dir, filter)
        .map_err(SrcSlimError::from)?;
    bar.finish_and_clear();

    if json_output {
        present_json_report(&report)?;
    } else {
        present_failures(&report);
        present_summary(&report);
    }

    if !report.is_success() {
        return Err(SrcSlimError::BatchFailed {
            failed: report.failed,
            total: report.total(),
        }
        .into());
    }
    Ok(())
}

fn progress_bar(hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    bar
}

/// Present files that could not be minified
fn present_failures(report: &BatchReport) {
    for outcome in report.failures() {
        if let FileOutcome::Failed { path, error } = outcome {
            println!(
                "   {} {}: {}",
                CROSSMARK,
                style(path.display()).red(),
                error
            );
        }
    }
}

/// Present counts and size totals
fn present_summary(report: &BatchReport) {
    let mark = if report.is_success() { CHECKMARK } else { CROSSMARK };
    println!(
        "{} Processed {}, skipped {}, failed {}",
        mark,
        style(report.processed).green().bold(),
        style(report.skipped).yellow(),
        style(report.failed).red()
    );

    let reasons = [
        SkipReason::UpToDate,
        SkipReason::UnsupportedLanguage,
        SkipReason::GeneratedArtifact,
        SkipReason::Filtered,
        SkipReason::Cancelled,
    ];
    for reason in reasons {
        let count = report.skipped_for(reason);
        if count > 0 {
            println!("   {} {} {}", style("•").dim(), count, style(reason).dim());
        }
    }

    if report.processed > 0 {
        println!(
            "{} {} -> {} {}",
            CHART,
            format_bytes(report.totals.before_bytes),
            style(format_bytes(report.totals.after_bytes)).green().bold(),
            style(format_reduction(
                report.totals.before_bytes,
                report.totals.after_bytes
            ))
            .green()
        );
    }

    if report.cancelled {
        println!("{} Cancelled before every file was processed", STOP);
    }
}

/// Present JSON report for CI/CD systems
fn present_json_report(report: &BatchReport) -> Result<()> {
    let json = serde_json::json!({
        "processed": report.processed,
        "skipped": report.skipped,
        "failed": report.failed,
        "cancelled": report.cancelled,
        "original_size": report.totals.before_bytes,
        "minified_size": report.totals.after_bytes,
        "reduction_bytes": report.totals.reduction_bytes(),
        "reduction_percent": report.totals.reduction_percent(),
        "files": report.outcomes,
    });
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
