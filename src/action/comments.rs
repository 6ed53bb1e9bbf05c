//! Comment stripping

use std::collections::BTreeSet;

use super::{guard_shebang, ActionOptions, MinifyAction};
use crate::pattern::{PatternSet, Span, SpanKind};

/// Removes line and block comments, leaving literals untouched.
///
/// - A block comment squeezed between two non-whitespace characters becomes a
///   single space, so `int/**/x` cannot turn into `intx`.
/// - With `keep_line_parity`, a dropped comment leaves behind exactly the line
///   terminators it contained.
/// - Otherwise a multi-line block comment collapses to one newline, and a line
///   left holding nothing but whitespace after its comment was removed is
///   deleted along with its terminator. A trailing comment keeps its line.
///
/// Block comments that never close are kept verbatim, and so are the
/// comments a language marks as directives (`{-# LANGUAGE .. #-}`,
/// `//go:build`) or as attached to an anchor (the cgo preamble before
/// `import "C"`).
///
/// # Examples
///
/// ```
/// use src_slim::action::{ActionOptions, MinifyAction, StripComments};
/// use src_slim::pattern::PatternSet;
///
/// let patterns = PatternSet::builder().line_comment("#").build();
/// let out = StripComments.apply("# header\nx = 1  # one\n", &patterns, &ActionOptions::default());
/// assert_eq!(out, "x = 1  \n");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StripComments;

/// True when removing the text between `before` and `after` would glue two
/// tokens together.
fn separates(before: Option<char>, after: Option<char>) -> bool {
    match (before, after) {
        (Some(b), Some(a)) => !b.is_whitespace() && !a.is_whitespace(),
        _ => false,
    }
}

/// Drop every line listed in `emptied` that holds only whitespace.
fn remove_emptied_lines(text: &str, emptied: &BTreeSet<usize>) -> String {
    let mut out = String::with_capacity(text.len());
    for (index, line) in text.split_inclusive('\n').enumerate() {
        if emptied.contains(&index) && line.trim().is_empty() {
            continue;
        }
        out.push_str(line);
    }
    out
}

/// Flag the comments that sit in front of `anchor` with nothing but other
/// comments and single line breaks in between. A blank line detaches.
fn attached_comments(text: &str, spans: &[Span], anchor: Option<&str>) -> Vec<bool> {
    let mut flags = vec![false; spans.len()];
    let Some(anchor) = anchor else {
        return flags;
    };
    let mut attached = false;
    for (flag, span) in flags.iter_mut().zip(spans).rev() {
        match span.kind {
            SpanKind::LineComment | SpanKind::BlockComment => *flag = attached,
            SpanKind::Code => {
                let slice = span.text(text);
                let code = slice.trim_start();
                let adjacent = slice[..slice.len() - code.len()].matches('\n').count() <= 1;
                attached = if code.is_empty() {
                    attached && adjacent
                } else {
                    adjacent && text[span.end - code.len()..].starts_with(anchor)
                };
            }
            SpanKind::StringLiteral => attached = false,
        }
    }
    flags
}

impl MinifyAction for StripComments {
    fn name(&self) -> &'static str {
        "comments"
    }

    fn apply(&self, text: &str, patterns: &PatternSet, options: &ActionOptions) -> String {
        let mut out = String::with_capacity(text.len());
        // Output lines from which a comment was removed
        let mut emptied = BTreeSet::new();
        let mut line = 0usize;

        let spans: Vec<Span> = patterns.scan(text).collect();
        let attached = attached_comments(text, &spans, patterns.kept_comment_anchor());

        for (span, attached) in spans.iter().zip(attached) {
            let slice = span.text(text);
            if !span.is_comment() || !span.terminated || attached || patterns.keeps_comment(slice)
            {
                line += slice.matches('\n').count();
                out.push_str(slice);
                continue;
            }

            emptied.insert(line);
            let newlines = slice.matches('\n').count();
            if options.keep_line_parity && newlines > 0 {
                out.extend(std::iter::repeat_n('\n', newlines));
                line += newlines;
            } else if newlines > 0 {
                out.push('\n');
                line += 1;
                emptied.insert(line);
            } else if separates(out.chars().next_back(), text[span.end..].chars().next()) {
                out.push(' ');
            }
        }

        if !options.keep_line_parity && !emptied.is_empty() {
            out = remove_emptied_lines(&out, &emptied);
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
            .string(StringDelimiter::quoted("\""))
            .string(StringDelimiter::quoted("'"))
            .build()
    }

    fn c_like() -> PatternSet {
        PatternSet::builder()
            .line_comment("//")
            .block_comment("/*", "*/")
            .string(StringDelimiter::quoted("\""))
            .build()
    }

    fn strip(text: &str, patterns: &PatternSet) -> String {
        StripComments.apply(text, patterns, &ActionOptions::default())
    }

    fn strip_keeping_lines(text: &str, patterns: &PatternSet) -> String {
        let options = ActionOptions {
            keep_line_parity: true,
            ..ActionOptions::default()
        };
        StripComments.apply(text, patterns, &options)
    }

    #[test]
    fn test_trailing_comment_keeps_line() {
        assert_eq!(strip("a = 1  # comment\nb = 2\n", &python()), "a = 1  \nb = 2\n");
    }

    #[test]
    fn test_full_line_comment_removes_line() {
        assert_eq!(
            strip("# header\n    # indented\nx = 1\n# tail", &python()),
            "x = 1\n"
        );
    }

    #[test]
    fn test_comment_marker_in_string_survives() {
        let src = "print(\"# not a comment\")  # real\n";
        assert_eq!(strip(src, &python()), "print(\"# not a comment\")  \n");
    }

    #[test]
    fn test_block_comment_between_tokens_becomes_space() {
        assert_eq!(strip("int/**/x = 1;", &c_like()), "int x = 1;");
        assert_eq!(strip("a /* c */ b", &c_like()), "a  b");
    }

    #[test]
    fn test_multiline_block_comment_collapses_to_newline() {
        assert_eq!(
            strip("return /* a\n b */ x;", &c_like()),
            "return \n x;"
        );
        assert_eq!(strip("x;\n/* a\nb */\ny;", &c_like()), "x;\ny;");
    }

    #[test]
    fn test_line_parity_preserves_line_count() {
        let src = "/* a\nb\nc */\nx; // y\n// z\n";
        let out = strip_keeping_lines(src, &c_like());

        assert_eq!(out, "\n\n\nx; \n\n");
        assert_eq!(out.lines().count(), src.lines().count());
    }

    #[test]
    fn test_unterminated_block_comment_is_kept() {
        let src = "x; /* open\n y;";
        assert_eq!(strip(src, &c_like()), src);
    }

    #[test]
    fn test_crlf_full_line_comment_removed() {
        assert_eq!(strip("// c\r\nx;\r\n", &c_like()), "x;\r\n");
    }

    #[test]
    fn test_directive_comments_are_kept() {
        let go = PatternSet::builder()
            .line_comment("//")
            .block_comment("/*", "*/")
            .keep_comments_starting_with("//go:")
            .build();
        let src = "//go:build linux\n// Package x\npackage x\n//go:embed a.txt\nvar a string // data\n";

        assert_eq!(
            strip(src, &go),
            "//go:build linux\npackage x\n//go:embed a.txt\nvar a string \n"
        );
    }

    #[test]
    fn test_comments_before_anchor_are_kept() {
        let go = PatternSet::builder()
            .line_comment("//")
            .block_comment("/*", "*/")
            .string(StringDelimiter::quoted("\""))
            .keep_comments_before("import \"C\"")
            .build();
        let src = "package x\n\n// drop\nvar v = 1\n// #include <stdio.h>\n/*\nint add(int a, int b);\n*/\nimport \"C\"\n// after\n";

        assert_eq!(
            strip(src, &go),
            "package x\n\nvar v = 1\n// #include <stdio.h>\n/*\nint add(int a, int b);\n*/\nimport \"C\"\n"
        );
    }

    #[test]
    fn test_blank_line_detaches_comment_from_anchor() {
        let go = PatternSet::builder()
            .line_comment("//")
            .string(StringDelimiter::quoted("\""))
            .keep_comments_before("import \"C\"")
            .build();
        let src = "// license\n\n// #cgo LDFLAGS: -lm\nimport \"C\"\n";

        assert_eq!(strip(src, &go), "\n// #cgo LDFLAGS: -lm\nimport \"C\"\n");
    }

    #[test]
    fn test_removed_comment_does_not_create_shebang() {
        let js = PatternSet::builder()
            .line_comment("//")
            .block_comment("/*", "*/")
            .string(StringDelimiter::quoted("`").multiline())
            .shebang()
            .build();
        let src = "/* c */#!x `\n// d\n`";

        let once = strip(src, &js);
        assert_eq!(once, " #!x `\n// d\n`");
        assert_eq!(strip(&once, &js), once);
    }

    #[test]
    fn test_stripping_is_idempotent() {
        let src = "a/*1*/b // c\n/* d\n*/ e \"/* f */\" # g\n";
        let once = strip(src, &c_like());
        assert_eq!(strip(&once, &c_like()), once);
    }

    #[test]
    fn test_never_grows() {
        for src in ["a/**/b", "#\n", "x/*\n*/y", "'#'", ""] {
            assert!(strip(src, &c_like()).len() <= src.len());
            assert!(strip(src, &python()).len() <= src.len());
        }
    }
}
