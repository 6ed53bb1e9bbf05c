//! Clean command implementation
//!
//! Handles `src-slim clean [DIR]`, which deletes generated artifacts.

use anyhow::Result;
use console::style;
use std::path::Path;

use crate::cmd::{load_config, Overrides};
use crate::error::SrcSlimError;
use crate::file::FileProcessor;
use crate::fmt::{BROOM, CHECKMARK, CROSSMARK, INFO};
use crate::project::{CleanReport, ProjectMinifier};
use crate::registry::MinifierRegistry;

/// Delete every artifact under `dir`
///
/// `extensions` restricts deletion to artifacts of sources with those
/// extensions. Sources are never touched.
///
/// # Examples
///
/// ```no_run
/// use src_slim::cmd::{cmd_clean, Overrides};
/// use std::path::Path;
///
/// // Remove the *.min.js and *.min.css files only
/// cmd_clean(
///     Path::new("."),
///     &["js".to_string(), "css".to_string()],
///     &Overrides::default(),
///     false,
/// )?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_clean(
    dir: &Path,
    extensions: &[String],
    overrides: &Overrides,
    json_output: bool,
) -> Result<()> {
    if !dir.is_dir() {
        return Err(SrcSlimError::FileNotFound {
            path: dir.to_path_buf(),
            operation: "clean".to_string(),
        }
        .into());
    }

    let config = load_config(dir, overrides)?;
    let registry = MinifierRegistry::with_builtin_languages();
    let processor = FileProcessor::new().with_naming(config.naming()?);
    let minifier = ProjectMinifier::new(&registry, processor, config.to_project_settings()?)
        .map_err(SrcSlimError::from)?;

    let report = minifier
        .delete_minified_files(dir, extensions)
        .map_err(SrcSlimError::from)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        present_report(dir, &report);
    }

    if !report.is_success() {
        return Err(SrcSlimError::BatchFailed {
            failed: report.failed.len(),
            total: report.deleted.len() + report.kept.len() + report.failed.len(),
        }
        .into());
    }
    Ok(())
}

fn present_report(dir: &Path, report: &CleanReport) {
    println!(
        "{} {} Cleaning {}",
        BROOM,
        style("src-slim").bold(),
        style(dir.display()).cyan()
    );
    println!();

    for path in &report.deleted {
        println!("   {} {}", style("-").red(), path.display());
    }
    for path in &report.kept {
        println!(
            "   {} {} {}",
            INFO,
            path.display(),
            style("(source missing, kept)").dim()
        );
    }
    for failure in &report.failed {
        println!(
            "   {} {}: {}",
            CROSSMARK,
            style(failure.path.display()).red(),
            failure.error
        );
    }

    println!();
    println!(
        "{} Deleted {} artifact(s)",
        CHECKMARK,
        style(report.deleted.len()).green().bold()
    );
}
