//! Minification actions
//!
//! An action is one atomic, language-aware text transformation. Actions are
//! stateless: everything they need comes from the [`PatternSet`] of the
//! language being minified and the [`ActionOptions`] of the current run.
//! Every action is idempotent and never makes its input longer.
//!
//! Actions are combined into an [`ActionPipeline`], which is itself usable
//! wherever a single action is.

pub mod blank_lines;
pub mod comments;
pub mod operators;
pub mod pipeline;
pub mod whitespace;

pub use blank_lines::RemoveBlankLines;
pub use comments::StripComments;
pub use operators::RemoveOperatorSpacing;
pub use pipeline::{Action, ActionPipeline};
pub use whitespace::CollapseWhitespace;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::pattern::PatternSet;

/// An atomic text transformation driven by a [`PatternSet`].
pub trait MinifyAction: Send + Sync + fmt::Debug {
    /// Short identifier used in logs and reports
    fn name(&self) -> &'static str;

    /// Transform `text`, returning the new text.
    fn apply(&self, text: &str, patterns: &PatternSet, options: &ActionOptions) -> String;
}

/// How leading indentation is rewritten by whitespace collapsing.
///
/// Languages whose pattern set marks indentation as significant always get
/// [`IndentPolicy::Preserve`], whatever is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndentPolicy {
    /// Keep indentation exactly as written
    Preserve,
    /// Remove indentation entirely
    #[default]
    Strip,
    /// Replace any indentation with one space
    SingleSpace,
}

impl IndentPolicy {
    /// Get the policy name as used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Preserve => "preserve",
            Self::Strip => "strip",
            Self::SingleSpace => "single-space",
        }
    }
}

impl FromStr for IndentPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "preserve" => Ok(Self::Preserve),
            "strip" => Ok(Self::Strip),
            "single-space" | "single_space" => Ok(Self::SingleSpace),
            _ => Err(format!(
                "Unknown indentation policy: '{}' (expected preserve, strip or single-space)",
                s
            )),
        }
    }
}

/// Run-wide options passed to every action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionOptions {
    /// Leading indentation handling
    pub indentation: IndentPolicy,
    /// Keep the number of lines unchanged so positions in stack traces and
    /// diagnostics still point at the right line
    pub keep_line_parity: bool,
}

/// The built-in action types, addressable by name from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    /// Strip comments
    #[serde(alias = "strip-comments")]
    Comments,
    /// Collapse horizontal whitespace
    #[serde(alias = "collapse-whitespace")]
    Whitespace,
    /// Remove blank lines
    #[serde(alias = "empty-lines")]
    BlankLines,
    /// Remove spacing around punctuation
    #[serde(alias = "operator-spacing")]
    Operators,
}

impl ActionKind {
    /// Every action kind, in default pipeline order
    pub const ALL: [ActionKind; 4] = [
        Self::Comments,
        Self::Whitespace,
        Self::BlankLines,
        Self::Operators,
    ];

    /// Get the action name as used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Comments => "comments",
            Self::Whitespace => "whitespace",
            Self::BlankLines => "blank-lines",
            Self::Operators => "operators",
        }
    }

    /// Get a one-line description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Comments => "Remove line and block comments",
            Self::Whitespace => "Collapse runs of spaces and tabs, drop trailing whitespace",
            Self::BlankLines => "Remove lines containing only whitespace",
            Self::Operators => "Remove spaces next to punctuation and operators",
        }
    }

    /// Build the action for this kind.
    pub fn create(&self) -> Arc<dyn MinifyAction> {
        match self {
            Self::Comments => Arc::new(StripComments),
            Self::Whitespace => Arc::new(CollapseWhitespace),
            Self::BlankLines => Arc::new(RemoveBlankLines),
            Self::Operators => Arc::new(RemoveOperatorSpacing),
        }
    }
}

impl FromStr for ActionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "comments" | "strip-comments" => Ok(Self::Comments),
            "whitespace" | "collapse-whitespace" => Ok(Self::Whitespace),
            "blank-lines" | "empty-lines" => Ok(Self::BlankLines),
            "operators" | "operator-spacing" => Ok(Self::Operators),
            _ => Err(format!(
                "Unknown action: '{}' (expected one of: {})",
                s,
                Self::ALL.map(|k| k.as_str()).join(", ")
            )),
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build a pipeline from action names, in the given order.
///
/// # Examples
///
/// ```
/// use src_slim::action::create_pipeline;
///
/// let pipeline = create_pipeline(["comments", "whitespace"]).unwrap();
/// assert_eq!(pipeline.names(), vec!["comments", "whitespace"]);
///
/// assert!(create_pipeline(["uglify"]).is_err());
/// ```
pub fn create_pipeline<I, S>(names: I) -> Result<ActionPipeline, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let kinds = names
        .into_iter()
        .map(|name| name.as_ref().parse::<ActionKind>())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ActionPipeline::from_kinds(&kinds))
}

/// Horizontal whitespace: everything that separates tokens on one line.
pub(crate) fn is_horizontal_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{0b}' | '\u{0c}')
}

/// Keep a `#!` that was not at the start of `text` from becoming a shebang
/// line once whatever stood in front of it has been removed.
pub(crate) fn guard_shebang(text: &str, patterns: &PatternSet, mut out: String) -> String {
    if patterns.has_shebang() && out.starts_with("#!") && !text.starts_with("#!") {
        out.insert(0, ' ');
    }
    out
}
