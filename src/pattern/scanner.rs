//! Tokenizing scanner
//!
//! Splits text into gap-free, non-overlapping [`Span`]s classified as code,
//! comments or string literals. The scanner is a single left-to-right pass
//! over a small state machine; it never fails. Unterminated literals and
//! comments simply extend to the end of input (or, for single-line strings,
//! to the end of the line) and are reported with `terminated == false`.

use std::ops::Range;

use super::{OpenerKind, PatternSet};

/// Classification of a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    /// Ordinary program text
    Code,
    /// From a line comment marker up to (not including) the line terminator
    LineComment,
    /// From a block comment opener through its matching closer
    BlockComment,
    /// A string, template, character or regex literal including its delimiters
    StringLiteral,
}

/// A classified byte range of the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// What the range contains
    pub kind: SpanKind,
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
    /// False when the construct ran into end of input (or end of line for
    /// single-line strings) before its closing delimiter
    pub terminated: bool,
}

impl Span {
    fn new(kind: SpanKind, start: usize, end: usize, terminated: bool) -> Self {
        Self {
            kind,
            start,
            end,
            terminated,
        }
    }

    /// Byte range of the span.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Slice of `source` covered by the span.
    pub fn text<'t>(&self, source: &'t str) -> &'t str {
        &source[self.start..self.end]
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True for zero-length spans (never produced by the scanner).
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True for line and block comments.
    pub fn is_comment(&self) -> bool {
        matches!(self.kind, SpanKind::LineComment | SpanKind::BlockComment)
    }

    /// Spans that every action must reproduce byte for byte: literals, and
    /// block comments that never found their closer.
    pub fn is_protected(&self) -> bool {
        match self.kind {
            SpanKind::StringLiteral => true,
            SpanKind::BlockComment => !self.terminated,
            _ => false,
        }
    }
}

/// Keywords after which a `/` starts a regex literal rather than a division.
const REGEX_PRECEDING_KEYWORDS: &[&str] = &[
    "return",
    "typeof",
    "instanceof",
    "in",
    "of",
    "new",
    "delete",
    "void",
    "throw",
    "case",
    "do",
    "else",
    "yield",
    "await",
];

/// Characters after which a `/` starts a regex literal.
const REGEX_PRECEDING_PUNCT: &str = "(,=:[!&|?{};+-*%<>~^";

/// Characters after which a word-boundary line comment may open.
const WORD_BOUNDARY_PUNCT: &str = ";|&()";

/// Lazy iterator of spans over a text.
///
/// # Examples
///
/// ```
/// use src_slim::pattern::{PatternSet, SpanKind};
///
/// let patterns = PatternSet::builder().line_comment("#").build();
/// let spans: Vec<_> = patterns.scan("a = 1  # note\n").collect();
///
/// assert_eq!(spans.len(), 3);
/// assert_eq!(spans[1].kind, SpanKind::LineComment);
/// assert_eq!(spans[1].text("a = 1  # note\n"), "# note");
/// ```
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    text: &'a str,
    patterns: &'a PatternSet,
    pos: usize,
    pending: Option<Span>,
    /// End of the last code or literal content, ignoring comments
    context_end: usize,
}

impl<'a> Scanner<'a> {
    /// Create a scanner over `text`.
    pub fn new(text: &'a str, patterns: &'a PatternSet) -> Self {
        Self {
            text,
            patterns,
            pos: 0,
            pending: None,
            context_end: 0,
        }
    }

    fn char_len_at(&self, pos: usize) -> usize {
        self.text[pos..].chars().next().map_or(1, char::len_utf8)
    }

    /// Offset of the next `\n` at or after `pos`, or end of input.
    fn line_end(&self, pos: usize) -> usize {
        self.text[pos..]
            .find('\n')
            .map_or(self.text.len(), |i| pos + i)
    }

    /// Move `end` back over a `\r` that belongs to a `\r\n` terminator.
    fn before_cr(&self, floor: usize, end: usize) -> usize {
        if end > floor && self.text.as_bytes()[end - 1] == b'\r' {
            end - 1
        } else {
            end
        }
    }

    fn at_word_boundary(&self, pos: usize) -> bool {
        match self.text[..pos].chars().next_back() {
            None => true,
            Some(c) => c.is_whitespace() || WORD_BOUNDARY_PUNCT.contains(c),
        }
    }

    /// Find the construct opening at `pos`, if any.
    fn opener_at(&self, pos: usize) -> Option<OpenerKind> {
        let rest = &self.text[pos..];
        for opener in self.patterns.openers() {
            if !rest.starts_with(opener.text.as_str()) {
                continue;
            }
            if let OpenerKind::Line(i) = opener.kind {
                if self.patterns.line_comments()[i].word_boundary && !self.at_word_boundary(pos)
                {
                    continue;
                }
            }
            return Some(opener.kind);
        }
        None
    }

    /// Decide whether a `/` at `pos` opens a regex literal, from the last
    /// significant character before it. Comments in between are skipped.
    fn regex_allowed(&self, run_start: usize, pos: usize) -> bool {
        let before = if self.text[run_start..pos].trim().is_empty() {
            self.text[..self.context_end].trim_end()
        } else {
            self.text[..pos].trim_end()
        };
        let Some(last) = before.chars().next_back() else {
            return true;
        };
        if REGEX_PRECEDING_PUNCT.contains(last) {
            return true;
        }
        if last.is_alphanumeric() || last == '_' || last == '$' {
            let word_start = before
                .char_indices()
                .rev()
                .take_while(|(_, c)| c.is_alphanumeric() || *c == '_' || *c == '$')
                .last()
                .map_or(before.len(), |(i, _)| i);
            return REGEX_PRECEDING_KEYWORDS.contains(&&before[word_start..]);
        }
        false
    }

    fn scan_string(&self, pos: usize, index: usize) -> Span {
        let delimiter = &self.patterns.strings()[index];
        let len = self.text.len();
        let mut i = pos + delimiter.open.len();
        let mut depth = 1usize;
        let nests = delimiter.allows_nesting && delimiter.open != delimiter.close;

        while i < len {
            let rest = &self.text[i..];
            if let Some(escape) = delimiter.escape {
                if rest.starts_with(escape) {
                    i += escape.len_utf8();
                    if i < len {
                        i += self.char_len_at(i);
                    }
                    continue;
                }
            }
            if rest.starts_with(delimiter.close.as_str()) {
                i += delimiter.close.len();
                depth -= 1;
                if depth == 0 {
                    return Span::new(SpanKind::StringLiteral, pos, i, true);
                }
                continue;
            }
            if nests && rest.starts_with(delimiter.open.as_str()) {
                i += delimiter.open.len();
                depth += 1;
                continue;
            }
            if rest.starts_with('\n') && !delimiter.multiline {
                let end = self.before_cr(pos + delimiter.open.len(), i);
                return Span::new(SpanKind::StringLiteral, pos, end, false);
            }
            i += self.char_len_at(i);
        }
        Span::new(SpanKind::StringLiteral, pos, len, false)
    }

    fn scan_block(&self, pos: usize, index: usize) -> Span {
        let block = &self.patterns.block_comments()[index];
        let len = self.text.len();
        let mut i = pos + block.open.len();
        let mut depth = 1usize;

        while i < len {
            let rest = &self.text[i..];
            if rest.starts_with(block.close.as_str()) {
                i += block.close.len();
                depth -= 1;
                if depth == 0 {
                    return Span::new(SpanKind::BlockComment, pos, i, true);
                }
                continue;
            }
            if block.nested && rest.starts_with(block.open.as_str()) {
                i += block.open.len();
                depth += 1;
                continue;
            }
            i += self.char_len_at(i);
        }
        Span::new(SpanKind::BlockComment, pos, len, false)
    }

    fn scan_line(&self, pos: usize, index: usize) -> Span {
        let comment = &self.patterns.line_comments()[index];
        let floor = pos + comment.marker.len();
        let mut i = floor;

        loop {
            let end = self.line_end(i);
            if end == self.text.len() {
                return Span::new(SpanKind::LineComment, pos, end, true);
            }
            let body_end = self.before_cr(floor, end);
            let continued = comment.continuation.is_some_and(|c| {
                self.text[floor..body_end].ends_with(c)
            });
            if !continued {
                return Span::new(SpanKind::LineComment, pos, body_end, true);
            }
            i = end + 1;
        }
    }

    fn scan_regex(&self, pos: usize) -> Span {
        let len = self.text.len();
        let mut i = pos + 1;
        let mut in_class = false;

        while i < len {
            match self.text.as_bytes()[i] {
                b'\\' => {
                    i += 1;
                    if i < len && self.text.as_bytes()[i] != b'\n' {
                        i += self.char_len_at(i);
                    }
                    continue;
                }
                b'[' => in_class = true,
                b']' => in_class = false,
                b'/' if !in_class => return Span::new(SpanKind::StringLiteral, pos, i + 1, true),
                b'\n' => {
                    let end = self.before_cr(pos + 1, i);
                    return Span::new(SpanKind::StringLiteral, pos, end, false);
                }
                _ => {}
            }
            i += self.char_len_at(i);
        }
        Span::new(SpanKind::StringLiteral, pos, len, false)
    }

    /// Here-document opened by `<<WORD`, `<<-WORD` or `<<'WORD'` at `pos`.
    /// The literal runs from the operator through the line holding only
    /// the terminating word.
    fn scan_heredoc(&self, pos: usize) -> Option<Span> {
        let bytes = self.text.as_bytes();
        let len = self.text.len();
        if !self.text[pos..].starts_with("<<")
            || self.text[pos..].starts_with("<<<")
            || (pos > 0 && bytes[pos - 1] == b'<')
        {
            return None;
        }

        let mut i = pos + 2;
        let strip_tabs = bytes.get(i) == Some(&b'-');
        if strip_tabs {
            i += 1;
        }
        while i < len && (bytes[i] == b' ' || bytes[i] == b'\t') {
            i += 1;
        }
        let quote = match bytes.get(i) {
            Some(&q) if q == b'\'' || q == b'"' => Some(q),
            _ => None,
        };
        if quote.is_some() {
            i += 1;
        }
        let word_start = i;
        while i < len && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
            i += 1;
        }
        let word = &self.text[word_start..i];
        if word.is_empty() || word.starts_with(|c: char| c.is_ascii_digit()) {
            return None;
        }
        if let Some(q) = quote {
            if bytes.get(i) != Some(&q) {
                return None;
            }
        }

        let mut line_start = self.line_end(i) + 1;
        while line_start < len {
            let line_end = self.line_end(line_start);
            let line = &self.text[line_start..self.before_cr(line_start, line_end)];
            let line = if strip_tabs {
                line.trim_start_matches('\t')
            } else {
                line
            };
            if line == word {
                return Some(Span::new(SpanKind::StringLiteral, pos, line_end, true));
            }
            line_start = line_end + 1;
        }
        Some(Span::new(SpanKind::StringLiteral, pos, len, false))
    }

    /// Span of the construct starting at `pos`, if one starts there.
    fn construct_at(&self, run_start: usize, pos: usize) -> Option<Span> {
        match self.opener_at(pos) {
            Some(OpenerKind::String(i)) => Some(self.scan_string(pos, i)),
            Some(OpenerKind::Block(i)) => Some(self.scan_block(pos, i)),
            Some(OpenerKind::Line(i)) => Some(self.scan_line(pos, i)),
            None if self.patterns.has_heredocs() && self.text.as_bytes()[pos] == b'<' => {
                self.scan_heredoc(pos)
            }
            None if self.patterns.has_regex_literals()
                && self.text.as_bytes()[pos] == b'/'
                && self.regex_allowed(run_start, pos) =>
            {
                Some(self.scan_regex(pos))
            }
            None => None,
        }
    }
}

impl Scanner<'_> {
    fn record(&mut self, span: Span) -> Span {
        match span.kind {
            SpanKind::StringLiteral => self.context_end = span.end,
            SpanKind::Code => {
                let content = self.text[span.start..span.end].trim_end();
                if !content.trim_start().is_empty() {
                    self.context_end = span.start + content.len();
                }
            }
            SpanKind::LineComment | SpanKind::BlockComment => {}
        }
        span
    }
}

impl Iterator for Scanner<'_> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        if let Some(span) = self.pending.take() {
            return Some(self.record(span));
        }
        let len = self.text.len();
        if self.pos >= len {
            return None;
        }

        let start = self.pos;
        let mut cursor = start;
        if start == 0 && self.patterns.has_shebang() && self.text.starts_with("#!") {
            cursor = self.line_end(0);
        }

        while cursor < len {
            if let Some(span) = self.construct_at(start, cursor) {
                self.pos = span.end;
                if cursor > start {
                    self.pending = Some(span);
                    return Some(self.record(Span::new(SpanKind::Code, start, cursor, true)));
                }
                return Some(self.record(span));
            }
            cursor += self.char_len_at(cursor);
        }

        self.pos = len;
        Some(self.record(Span::new(SpanKind::Code, start, len, true)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::StringDelimiter;

    fn c_like() -> PatternSet {
        PatternSet::builder()
            .line_comment("//")
            .block_comment("/*", "*/")
            .string(StringDelimiter::quoted("\""))
            .string(StringDelimiter::quoted("'"))
            .build()
    }

    fn python_like() -> PatternSet {
        PatternSet::builder()
            .line_comment("#")
            .string(StringDelimiter::quoted("\"\"\"").multiline())
            .string(StringDelimiter::quoted("'''").multiline())
            .string(StringDelimiter::quoted("\""))
            .string(StringDelimiter::quoted("'"))
            .shebang()
            .build()
    }

    fn classify(text: &str, patterns: &PatternSet) -> Vec<(SpanKind, String)> {
        patterns
            .scan(text)
            .map(|s| (s.kind, s.text(text).to_string()))
            .collect()
    }

    #[test]
    fn test_spans_cover_input_without_gaps() {
        let text = "int a = 1; /* x */ char *s = \"//\"; // end\nb();";
        let spans: Vec<Span> = c_like().scan(text).collect();

        let mut expected_start = 0;
        for span in &spans {
            assert_eq!(span.start, expected_start);
            assert!(!span.is_empty());
            expected_start = span.end;
        }
        assert_eq!(expected_start, text.len());
    }

    #[test]
    fn test_comment_marker_inside_string_is_literal() {
        let spans = classify("s = \"a // b /* c */\";", &c_like());

        assert_eq!(
            spans,
            vec![
                (SpanKind::Code, "s = ".to_string()),
                (SpanKind::StringLiteral, "\"a // b /* c */\"".to_string()),
                (SpanKind::Code, ";".to_string()),
            ]
        );
    }

    #[test]
    fn test_line_comment_excludes_terminator() {
        let spans = classify("a // x\r\nb", &c_like());

        assert_eq!(spans[1], (SpanKind::LineComment, "// x".to_string()));
        assert_eq!(spans[2], (SpanKind::Code, "\r\nb".to_string()));
    }

    #[test]
    fn test_escaped_quote_does_not_close_string() {
        let spans = classify(r#"x = "a\"b" // c"#, &c_like());

        assert_eq!(spans[1], (SpanKind::StringLiteral, r#""a\"b""#.to_string()));
        assert_eq!(spans[3].0, SpanKind::LineComment);
    }

    #[test]
    fn test_longest_delimiter_wins() {
        let spans = classify("x = \"\"\"a\n# not comment\n\"\"\" # c", &python_like());

        assert_eq!(spans[1].0, SpanKind::StringLiteral);
        assert_eq!(spans[1].1, "\"\"\"a\n# not comment\n\"\"\"");
        assert_eq!(spans[3], (SpanKind::LineComment, "# c".to_string()));
    }

    #[test]
    fn test_unterminated_string_runs_to_end_of_input() {
        let text = "x = '''open\n# still string";
        let spans: Vec<Span> = python_like().scan(text).collect();

        let last = spans.last().unwrap();
        assert_eq!(last.kind, SpanKind::StringLiteral);
        assert_eq!(last.end, text.len());
        assert!(!last.terminated);
    }

    #[test]
    fn test_single_line_string_stops_at_newline() {
        let spans = classify("x = 'oops\ny = 1 # c", &python_like());

        assert_eq!(spans[1], (SpanKind::StringLiteral, "'oops".to_string()));
        assert_eq!(spans[2], (SpanKind::Code, "\ny = 1 ".to_string()));
        assert_eq!(spans[3].0, SpanKind::LineComment);
    }

    #[test]
    fn test_unterminated_block_comment_is_protected() {
        let text = "a(); /* never closed\nb();";
        let spans: Vec<Span> = c_like().scan(text).collect();

        let last = spans.last().unwrap();
        assert_eq!(last.kind, SpanKind::BlockComment);
        assert!(!last.terminated);
        assert!(last.is_protected());
    }

    #[test]
    fn test_nested_block_comments_track_depth() {
        let patterns = PatternSet::builder()
            .nested_block_comment("/*", "*/")
            .build();
        let spans = classify("a /* x /* y */ z */ b", &patterns);

        assert_eq!(
            spans,
            vec![
                (SpanKind::Code, "a ".to_string()),
                (SpanKind::BlockComment, "/* x /* y */ z */".to_string()),
                (SpanKind::Code, " b".to_string()),
            ]
        );
    }

    #[test]
    fn test_non_nested_block_comment_closes_at_first_closer() {
        let spans = classify("a /* x /* y */ z */ b", &c_like());

        assert_eq!(spans[1], (SpanKind::BlockComment, "/* x /* y */".to_string()));
        assert_eq!(spans[2], (SpanKind::Code, " z */ b".to_string()));
    }

    #[test]
    fn test_shebang_line_is_code() {
        let spans = classify("#!/usr/bin/env python\n# real comment\n", &python_like());

        assert_eq!(spans[0], (SpanKind::Code, "#!/usr/bin/env python\n".to_string()));
        assert_eq!(spans[1].0, SpanKind::LineComment);
    }

    #[test]
    fn test_word_boundary_line_comment() {
        let patterns = PatternSet::builder().word_line_comment("#").build();
        let spans = classify("echo $# ${#x} # count", &patterns);

        assert_eq!(spans[0], (SpanKind::Code, "echo $# ${#x} ".to_string()));
        assert_eq!(spans[1], (SpanKind::LineComment, "# count".to_string()));
    }

    #[test]
    fn test_line_comment_continuation() {
        let patterns = PatternSet::builder()
            .continued_line_comment("//", '\\')
            .build();
        let spans = classify("// a \\\n still comment\ncode", &patterns);

        assert_eq!(
            spans[0],
            (SpanKind::LineComment, "// a \\\n still comment".to_string())
        );
        assert_eq!(spans[1], (SpanKind::Code, "\ncode".to_string()));
    }

    #[test]
    fn test_regex_literal_after_operator() {
        let patterns = PatternSet::builder()
            .line_comment("//")
            .block_comment("/*", "*/")
            .string(StringDelimiter::quoted("'"))
            .regex_literals()
            .build();
        let spans = classify("var r = /\\/\\/[/]x/g; // c", &patterns);

        assert_eq!(spans[1], (SpanKind::StringLiteral, "/\\/\\/[/]x/".to_string()));
        assert_eq!(spans[2], (SpanKind::Code, "g; ".to_string()));
        assert_eq!(spans[3].0, SpanKind::LineComment);
    }

    #[test]
    fn test_division_is_not_regex() {
        let patterns = PatternSet::builder()
            .line_comment("//")
            .regex_literals()
            .build();

        let spans = classify("x = a / b / c; // half", &patterns);
        assert_eq!(spans[0], (SpanKind::Code, "x = a / b / c; ".to_string()));

        let spans = classify("return /a b/.test(s)", &patterns);
        assert_eq!(spans[1], (SpanKind::StringLiteral, "/a b/".to_string()));
    }

    #[test]
    fn test_regex_detection_skips_comments() {
        let patterns = PatternSet::builder()
            .line_comment("//")
            .block_comment("/*", "*/")
            .regex_literals()
            .build();

        let spans = classify("return /* c */ /a\\/\\/b/", &patterns);
        assert_eq!(spans[3], (SpanKind::StringLiteral, "/a\\/\\/b/".to_string()));
    }

    #[test]
    fn test_heredoc_body_is_literal() {
        let patterns = PatternSet::builder()
            .word_line_comment("#")
            .heredocs()
            .build();
        let text = "cat <<-'EOF' > out # note\n# kept\n\tEOF\n# gone\n";
        let spans = classify(text, &patterns);

        assert_eq!(
            spans[1],
            (
                SpanKind::StringLiteral,
                "<<-'EOF' > out # note\n# kept\n\tEOF".to_string()
            )
        );
        assert_eq!(spans[3], (SpanKind::LineComment, "# gone".to_string()));
    }

    #[test]
    fn test_shift_and_here_string_are_not_heredocs() {
        let patterns = PatternSet::builder()
            .word_line_comment("#")
            .heredocs()
            .build();

        let spans = classify("echo $((1 << 2)) # c", &patterns);
        assert_eq!(spans[0].0, SpanKind::Code);
        assert_eq!(spans[1], (SpanKind::LineComment, "# c".to_string()));

        let spans = classify("grep x <<< \"$v\" # c", &patterns);
        assert_eq!(spans[1], (SpanKind::LineComment, "# c".to_string()));
    }

    #[test]
    fn test_nesting_string_delimiter() {
        let patterns = PatternSet::builder()
            .string(StringDelimiter::pair("q{", "}").nesting().multiline())
            .line_comment("//")
            .build();
        let spans = classify("q{ a q{ // b } c } // d", &patterns);

        assert_eq!(spans[0], (SpanKind::StringLiteral, "q{ a q{ // b } c }".to_string()));
        assert_eq!(spans[2], (SpanKind::LineComment, "// d".to_string()));
    }

    #[test]
    fn test_multibyte_text_is_scanned_by_char() {
        let spans = classify("s = 'héllo' // ünïcode", &c_like());

        assert_eq!(spans[1], (SpanKind::StringLiteral, "'héllo'".to_string()));
        assert_eq!(spans[3], (SpanKind::LineComment, "// ünïcode".to_string()));
    }

    #[test]
    fn test_empty_input_yields_no_spans() {
        assert_eq!(c_like().scan("").count(), 0);
    }
}
