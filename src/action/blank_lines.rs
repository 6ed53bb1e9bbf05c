//! Blank line removal

use std::collections::BTreeSet;

use super::{guard_shebang, ActionOptions, MinifyAction};
use crate::pattern::{PatternSet, Span, SpanKind};

/// Removes lines that contain only whitespace.
///
/// Lines inside string literals (terminated or not) and inside unterminated
/// block comments are kept, as is the empty line that ends a single-line
/// literal continued by an escaped newline. One blank line after a line that
/// ends in a directive comment (see
/// [`keeps_comment`](PatternSet::keeps_comment)) is kept too. With `keep_line_parity` the action does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveBlankLines;

/// A `\`-continued line comment; dropping a blank line inside it would pull
/// the following line into the comment.
fn continued_line_comment(span: &Span, text: &str) -> bool {
    span.kind == SpanKind::LineComment && span.text(text).contains('\n')
}

impl MinifyAction for RemoveBlankLines {
    fn name(&self) -> &'static str {
        "blank-lines"
    }

    fn apply(&self, text: &str, patterns: &PatternSet, options: &ActionOptions) -> String {
        if options.keep_line_parity {
            return text.to_string();
        }

        let protected: Vec<_> = patterns
            .scan(text)
            .filter(|span| span.is_protected() || continued_line_comment(span, text))
            .map(|span| {
                let mut range = span.range();
                // A single-line literal cut off by a newline, or a line comment
                // continued onto the next line, owns the newline it stops at,
                // even when that newline is the whole of the next line
                let owns_newline = span.kind == SpanKind::LineComment
                    || (span.kind == SpanKind::StringLiteral && !span.terminated);
                if owns_newline && range.end < text.len() {
                    range.end += 1;
                }
                range
            })
            .collect();

        // Where directive comments end; the blank line after one is kept
        // (Go build constraints need it)
        let directive_ends: BTreeSet<usize> = patterns
            .scan(text)
            .filter(|span| span.is_comment() && patterns.keeps_comment(span.text(text)))
            .map(|span| span.end)
            .collect();

        let mut out = String::with_capacity(text.len());
        let mut next_protected = 0;
        let mut start = 0;
        let mut after_directive = false;
        for line in text.split_inclusive('\n') {
            let line_start = start;
            start += line.len();
            let follows_directive = after_directive;
            let content = line.trim_end_matches(['\n', '\r']);
            after_directive = directive_ends.contains(&(line_start + content.len()));

            while next_protected < protected.len() && protected[next_protected].end <= line_start
            {
                next_protected += 1;
            }
            let in_literal = protected
                .get(next_protected)
                .is_some_and(|range| range.start <= line_start);

            if line.trim().is_empty() && !in_literal && !follows_directive {
                continue;
            }
            out.push_str(line);
        }
        guard_shebang(text, patterns, out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::StringDelimiter;

    fn python() -> PatternSet {
        PatternSet::builder()
            .line_comment("#")
            .string(StringDelimiter::quoted("\"\"\"").multiline())
            .string(StringDelimiter::quoted("'"))
            .build()
    }

    fn remove(text: &str) -> String {
        RemoveBlankLines.apply(text, &python(), &ActionOptions::default())
    }

    #[test]
    fn test_removes_blank_and_whitespace_lines() {
        assert_eq!(remove("a\n\n   \n\t\nb\n\n"), "a\nb\n");
    }

    #[test]
    fn test_keeps_final_newline() {
        assert_eq!(remove("a = 1\nb = 2\n"), "a = 1\nb = 2\n");
    }

    #[test]
    fn test_blank_lines_inside_string_kept() {
        let src = "s = \"\"\"\n\nbody\n\n\"\"\"\n\nx = 1\n";
        assert_eq!(remove(src), "s = \"\"\"\n\nbody\n\n\"\"\"\nx = 1\n");
    }

    #[test]
    fn test_blank_lines_inside_unterminated_string_kept() {
        let src = "x = 1\n\ns = \"\"\"open\n\n\n";
        assert_eq!(remove(src), "x = 1\ns = \"\"\"open\n\n\n");
    }

    #[test]
    fn test_crlf_blank_lines_removed() {
        assert_eq!(remove("a\r\n\r\nb\r\n"), "a\r\nb\r\n");
    }

    #[test]
    fn test_line_parity_disables_removal() {
        let options = ActionOptions {
            keep_line_parity: true,
            ..ActionOptions::default()
        };
        let src = "a\n\nb";
        assert_eq!(RemoveBlankLines.apply(src, &python(), &options), src);
    }

    #[test]
    fn test_empty_line_ending_escaped_string_kept() {
        let js = PatternSet::builder()
            .line_comment("//")
            .string(StringDelimiter::quoted("'"))
            .string(StringDelimiter::quoted("`").multiline())
            .build();
        let src = "a = 'x\\\n\n`\n\nb`\n";

        let once = RemoveBlankLines.apply(src, &js, &ActionOptions::default());
        assert_eq!(once, "a = 'x\\\n\n`\n\nb`\n");
        assert_eq!(RemoveBlankLines.apply(&once, &js, &ActionOptions::default()), once);
    }

    #[test]
    fn test_blank_line_ending_continued_comment_kept() {
        let c = PatternSet::builder()
            .continued_line_comment("//", '\\')
            .string(StringDelimiter::quoted("\""))
            .build();
        let src = "// note \\\n\nputs(\"x\");\n\n";

        assert_eq!(
            RemoveBlankLines.apply(src, &c, &ActionOptions::default()),
            "// note \\\n\nputs(\"x\");\n"
        );
    }

    #[test]
    fn test_removed_blank_line_does_not_create_shebang() {
        let js = PatternSet::builder()
            .line_comment("//")
            .string(StringDelimiter::quoted("`").multiline())
            .shebang()
            .build();
        let options = ActionOptions::default();

        let once = RemoveBlankLines.apply("\n#!x `\n\n`\n", &js, &options);
        assert_eq!(once, " #!x `\n\n`\n");
        assert_eq!(RemoveBlankLines.apply(&once, &js, &options), once);
    }

    #[test]
    fn test_blank_line_after_directive_kept() {
        let go = PatternSet::builder()
            .line_comment("//")
            .keep_comments_starting_with("//go:")
            .build();
        let src = "//go:build linux\n\n\npackage x\n\nvar a int\n";

        let once = RemoveBlankLines.apply(src, &go, &ActionOptions::default());
        assert_eq!(once, "//go:build linux\n\npackage x\nvar a int\n");
        assert_eq!(RemoveBlankLines.apply(&once, &go, &ActionOptions::default()), once);
    }

    #[test]
    fn test_idempotent() {
        let once = remove("\n\na\n \n'x'\n\n");
        assert_eq!(remove(&once), once);
        assert_eq!(once, "a\n'x'\n");
    }
}
