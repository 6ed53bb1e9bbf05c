//! Languages command implementation
//!
//! Handles `src-slim languages`, listing every registered minifier with its
//! extensions and default pipeline.

use anyhow::Result;
use console::style;
use serde::Serialize;

use crate::fmt::INFO;
use crate::language::LanguageMinifier;
use crate::registry::MinifierRegistry;

/// One row of the listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageInfo {
    /// Language name
    pub name: String,
    /// Handled extensions
    pub extensions: Vec<String>,
    /// Default pipeline, in order
    pub actions: Vec<&'static str>,
    /// Indentation is kept regardless of settings
    pub significant_indentation: bool,
}

impl LanguageInfo {
    /// Describe `minifier`.
    pub fn of(minifier: &dyn LanguageMinifier) -> Self {
        Self {
            name: minifier.name().to_string(),
            extensions: minifier.file_extensions().to_vec(),
            actions: minifier.default_pipeline().names(),
            significant_indentation: minifier.patterns().is_indentation_significant(),
        }
    }
}

/// Describe every language in `registry`, sorted by name.
pub fn language_table(registry: &MinifierRegistry) -> Vec<LanguageInfo> {
    registry
        .minifiers()
        .iter()
        .map(|m| LanguageInfo::of(m.as_ref()))
        .collect()
}

/// List supported languages
///
/// # Examples
///
/// ```no_run
/// use src_slim::cmd::cmd_languages;
///
/// cmd_languages(false)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_languages(json_output: bool) -> Result<()> {
    let table = language_table(&MinifierRegistry::with_builtin_languages());

    if json_output {
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    println!("{}  Supported languages ({}):", INFO, table.len());
    let width = table.iter().map(|l| l.name.len()).max().unwrap_or(0);
    for language in &table {
        println!(
            "   {:<width$}  {}  {}",
            style(&language.name).bold(),
            style(language.extensions.join(" ")).cyan(),
            style(language.actions.join(" > ")).dim(),
            width = width
        );
    }
    Ok(())
}
