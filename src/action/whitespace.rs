//! Whitespace collapsing

use super::{is_horizontal_space, ActionOptions, IndentPolicy, MinifyAction};
use crate::pattern::{PatternSet, SpanKind};

/// Collapses runs of horizontal whitespace in code to a single space.
///
/// Whitespace before a line terminator or the end of input is dropped, and
/// leading indentation follows the configured [`IndentPolicy`] (always
/// [`IndentPolicy::Preserve`] for languages with significant indentation).
/// Literals and comments are copied unchanged.
///
/// # Examples
///
/// ```
/// use src_slim::action::{ActionOptions, CollapseWhitespace, MinifyAction};
/// use src_slim::pattern::{PatternSet, StringDelimiter};
///
/// let patterns = PatternSet::builder().string(StringDelimiter::quoted("'")).build();
/// let out = CollapseWhitespace.apply("  x  =  'a   b'   \n", &patterns, &ActionOptions::default());
/// assert_eq!(out, "x = 'a   b'\n");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CollapseWhitespace;

impl MinifyAction for CollapseWhitespace {
    fn name(&self) -> &'static str {
        "whitespace"
    }

    fn apply(&self, text: &str, patterns: &PatternSet, options: &ActionOptions) -> String {
        let policy = if patterns.is_indentation_significant() {
            IndentPolicy::Preserve
        } else {
            options.indentation
        };
        let mut out = String::with_capacity(text.len());

        for span in patterns.scan(text) {
            let slice = span.text(text);
            if span.kind != SpanKind::Code {
                out.push_str(slice);
                continue;
            }

            let mut rest = slice;
            let mut offset = span.start;
            while let Some(run_start) = rest.find(is_horizontal_space) {
                out.push_str(&rest[..run_start]);
                let run_len = rest[run_start..]
                    .find(|c: char| !is_horizontal_space(c))
                    .unwrap_or(rest.len() - run_start);
                let run = &rest[run_start..run_start + run_len];
                let after = &rest[run_start + run_len..];

                let absolute = offset + run_start;
                let at_line_start = absolute == 0 || text[..absolute].ends_with('\n');
                let at_line_end = if after.is_empty() {
                    span.end == text.len()
                } else {
                    after.starts_with('\n') || after.starts_with("\r\n")
                };

                if at_line_end {
                    // trailing whitespace
                } else if absolute == 0
                    && patterns.has_shebang()
                    && text[absolute + run_len..].starts_with("#!")
                {
                    // removing it would turn the first line into an interpreter line
                    out.push_str(run);
                } else if at_line_start {
                    match policy {
                        IndentPolicy::Preserve => out.push_str(run),
                        IndentPolicy::Strip => {}
                        IndentPolicy::SingleSpace => out.push(' '),
                    }
                } else {
                    out.push(' ');
                }

                offset += run_start + run_len;
                rest = after;
            }
            out.push_str(rest);
        }
        out
    }
}
