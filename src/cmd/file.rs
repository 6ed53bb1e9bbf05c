//! File command implementation
//!
//! Handles `src-slim file <FILE>`: minifies one file, either into its
//! artifact or to stdout.

use anyhow::Result;
use console::style;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use crate::cmd::{load_config, Overrides};
use crate::error::SrcSlimError;
use crate::file::{FileProcessor, JobError, MinificationJob, PipelineSettings};
use crate::fmt::{format_bytes, format_reduction, CHECKMARK, INFO};
use crate::language::LanguageMinifier;
use crate::registry::MinifierRegistry;

/// Minify a single file
///
/// `language` forces a minifier by name or extension; otherwise the file's
/// extension decides. With `to_stdout` the result is printed and no
/// artifact is written.
///
/// # Examples
///
/// ```no_run
/// use src_slim::cmd::{cmd_file, Overrides};
/// use std::path::Path;
///
/// // Write script.min.sh
/// cmd_file(Path::new("script.sh"), None, &Overrides::default(), false)?;
///
/// // Treat a .txt file as Python and print the result
/// cmd_file(Path::new("notes.txt"), Some("python"), &Overrides::default(), true)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_file(
    path: &Path,
    language: Option<&str>,
    overrides: &Overrides,
    to_stdout: bool,
) -> Result<()> {
    if !path.is_file() {
        return Err(SrcSlimError::FileNotFound {
            path: path.to_path_buf(),
            operation: "file".to_string(),
        }
        .into());
    }

    let config_root = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let config = load_config(config_root, overrides)?;
    let settings = config.pipeline_settings()?;
    let registry = MinifierRegistry::with_builtin_languages();
    let minifier = resolve(&registry, path, language)?;

    if to_stdout {
        let text = std::fs::read_to_string(path).map_err(|source| {
            SrcSlimError::from(JobError::Read {
                path: path.to_path_buf(),
                source,
            })
        })?;
        let minified = minify_text(minifier.as_ref(), &text, &settings);
        std::io::stdout()
            .write_all(minified.as_bytes())
            .map_err(|source| SrcSlimError::Io {
                context: "writing to stdout".to_string(),
                source,
            })?;
        return Ok(());
    }

    let processor = FileProcessor::new().with_naming(config.naming()?);
    let report = MinificationJob::new(path, &processor)
        .with_minifier(minifier)
        .with_settings(settings)
        .execute()
        .map_err(SrcSlimError::from)?;

    if report.skipped {
        println!(
            "{} {} is up to date",
            INFO,
            style(report.output_path.display()).cyan()
        );
    } else {
        println!(
            "{} {} -> {} ({})",
            CHECKMARK,
            report.source.display(),
            style(report.output_path.display()).cyan().bold(),
            report.language
        );
    }
    println!(
        "   {} -> {} {}",
        format_bytes(report.original_size),
        style(format_bytes(report.minified_size)).green(),
        style(format_reduction(report.original_size, report.minified_size)).dim()
    );
    Ok(())
}

fn resolve(
    registry: &MinifierRegistry,
    path: &Path,
    language: Option<&str>,
) -> Result<Arc<dyn LanguageMinifier>, SrcSlimError> {
    let resolved = match language {
        Some(key) => registry.resolve(key),
        None => registry.resolve_path(path),
    };
    resolved.map_err(|_| SrcSlimError::UnsupportedLanguage {
        key: language
            .map(str::to_string)
            .unwrap_or_else(|| path.display().to_string()),
        available: registry
            .minifiers()
            .iter()
            .map(|m| m.name().to_string())
            .collect(),
    })
}

fn minify_text(minifier: &dyn LanguageMinifier, text: &str, settings: &PipelineSettings) -> String {
    let pipeline = settings.pipeline_for(minifier);
    let options = settings.options_for(minifier);
    minifier.minify_with(text, &pipeline, &options)
}
