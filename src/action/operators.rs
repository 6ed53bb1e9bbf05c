//! Operator spacing removal

use super::{is_horizontal_space, ActionOptions, MinifyAction};
use crate::pattern::{PatternSet, SpanKind};

/// Drops horizontal whitespace between a punctuation character and a
/// non-punctuation character, e.g. `x = f(a, b)` becomes `x=f(a,b)`.
///
/// Only characters listed in the language's
/// [`tight_punctuation`](PatternSet::tight_punctuation) count; languages that
/// list none are left alone. Whitespace between two punctuation characters is
/// kept so no new token (`//`, `/*`, `&&`, `<!--`) can form, and indentation
/// and trailing whitespace are left to the other actions.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveOperatorSpacing;

impl MinifyAction for RemoveOperatorSpacing {
    fn name(&self) -> &'static str {
        "operators"
    }

    fn apply(&self, text: &str, patterns: &PatternSet, _options: &ActionOptions) -> String {
        let punctuation = patterns.tight_punctuation();
        if punctuation.is_empty() {
            return text.to_string();
        }
        let is_tight = |c: char| punctuation.contains(c);
        let is_line_break = |c: char| c == '\n' || c == '\r';

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
                let absolute = offset + run_start;

                let before = text[..absolute].chars().next_back();
                let after = text[absolute + run_len..].chars().next();
                let removable = match (before, after) {
                    (Some(b), Some(a)) if !is_line_break(b) && !is_line_break(a) => {
                        is_tight(b) != is_tight(a)
                    }
                    _ => false,
                };
                if !removable {
                    out.push_str(run);
                }

                offset = absolute + run_len;
                rest = &rest[run_start + run_len..];
            }
            out.push_str(rest);
        }
        out
    }
}
