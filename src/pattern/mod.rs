//! Declarative per-language lexical patterns
//!
//! A [`PatternSet`] describes just enough of a language's lexical structure to
//! tell code apart from comments and literals: comment markers, block comment
//! pairs, and string delimiters with their escape rules. It carries no
//! behavior of its own; the [`scanner`] turns it into classified spans.
//!
//! # Examples
//!
//! ```
//! use src_slim::pattern::{PatternSet, SpanKind, StringDelimiter};
//!
//! let patterns = PatternSet::builder()
//!     .line_comment("//")
//!     .block_comment("/*", "*/")
//!     .string(StringDelimiter::quoted("\""))
//!     .build();
//!
//! let kinds: Vec<SpanKind> = patterns
//!     .scan("x = \"//\"; // note")
//!     .map(|span| span.kind)
//!     .collect();
//! assert_eq!(
//!     kinds,
//!     vec![SpanKind::Code, SpanKind::StringLiteral, SpanKind::Code, SpanKind::LineComment]
//! );
//! ```

pub mod scanner;

pub use scanner::{Scanner, Span, SpanKind};

/// Punctuation next to which spacing carries no meaning in C-like languages.
pub const C_LIKE_PUNCTUATION: &str = "{}()[],;:=<>!&|?*/%^~";

/// A line comment marker such as `//`, `#` or `--`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineComment {
    /// Marker text that opens the comment
    pub marker: String,
    /// Only open a comment at the start of a word (shell `#` vs `$#`)
    pub word_boundary: bool,
    /// Character that, placed right before a newline, continues the comment
    /// onto the next line (C preprocessor `\`)
    pub continuation: Option<char>,
}

impl LineComment {
    /// Plain marker: opens anywhere in code, ends at the next newline.
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            word_boundary: false,
            continuation: None,
        }
    }
}

/// A block comment delimiter pair such as `/* */` or `{- -}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockComment {
    /// Opening delimiter
    pub open: String,
    /// Closing delimiter
    pub close: String,
    /// Whether an inner opener increases nesting depth
    pub nested: bool,
}

/// A string (or other literal) delimiter pair with its escape rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringDelimiter {
    /// Opening delimiter
    pub open: String,
    /// Closing delimiter
    pub close: String,
    /// Escape character; consumes itself and the following character
    pub escape: Option<char>,
    /// Whether an inner opener increases nesting depth (only when open != close)
    pub allows_nesting: bool,
    /// Whether the literal may span lines; otherwise a newline ends it
    pub multiline: bool,
}

impl StringDelimiter {
    /// Single-line literal closed by the same delimiter, with `\` escapes.
    pub fn quoted(quote: impl Into<String>) -> Self {
        let quote = quote.into();
        Self {
            open: quote.clone(),
            close: quote,
            escape: Some('\\'),
            allows_nesting: false,
            multiline: false,
        }
    }

    /// Literal with distinct open and close delimiters, with `\` escapes.
    pub fn pair(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
            escape: Some('\\'),
            allows_nesting: false,
            multiline: false,
        }
    }

    /// Allow the literal to span lines.
    pub fn multiline(mut self) -> Self {
        self.multiline = true;
        self
    }

    /// Treat backslashes as ordinary characters (raw strings).
    pub fn raw(mut self) -> Self {
        self.escape = None;
        self
    }

    /// Track nested open/close pairs.
    pub fn nesting(mut self) -> Self {
        self.allows_nesting = true;
        self
    }
}

/// Which construct an opener belongs to, with its index in the pattern set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OpenerKind {
    String(usize),
    Block(usize),
    Line(usize),
}

impl OpenerKind {
    /// Tie-break rank when two openers of equal length match: strings first,
    /// then block comments, then line comments.
    fn rank(self) -> u8 {
        match self {
            Self::String(_) => 0,
            Self::Block(_) => 1,
            Self::Line(_) => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Opener {
    pub(crate) text: String,
    pub(crate) kind: OpenerKind,
}

/// Per-language description of comment and string delimiters.
///
/// Immutable once built; languages share it behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternSet {
    line_comments: Vec<LineComment>,
    block_comments: Vec<BlockComment>,
    strings: Vec<StringDelimiter>,
    regex_literals: bool,
    heredocs: bool,
    shebang: bool,
    indentation_significant: bool,
    tight_punctuation: String,
    /// Comments starting with one of these are directives, not commentary
    kept_comment_prefixes: Vec<String>,
    /// Comments directly before this code are kept (cgo preamble)
    kept_comment_anchor: Option<String>,
    /// All openers, longest first
    openers: Vec<Opener>,
}

impl PatternSet {
    /// Start building a pattern set.
    pub fn builder() -> PatternSetBuilder {
        PatternSetBuilder::default()
    }

    /// Line comment markers.
    pub fn line_comments(&self) -> &[LineComment] {
        &self.line_comments
    }

    /// Block comment delimiter pairs.
    pub fn block_comments(&self) -> &[BlockComment] {
        &self.block_comments
    }

    /// String delimiters.
    pub fn strings(&self) -> &[StringDelimiter] {
        &self.strings
    }

    /// Whether `/re/` regex literals are recognized.
    pub fn has_regex_literals(&self) -> bool {
        self.regex_literals
    }

    /// Whether shell `<<WORD` here-documents are recognized.
    pub fn has_heredocs(&self) -> bool {
        self.heredocs
    }

    /// Whether a leading `#!` line is treated as code.
    pub fn has_shebang(&self) -> bool {
        self.shebang
    }

    /// Whether leading indentation carries meaning (Python, YAML, Haskell).
    pub fn is_indentation_significant(&self) -> bool {
        self.indentation_significant
    }

    /// Characters next to which horizontal whitespace may be dropped.
    /// Empty when spacing around punctuation is significant.
    pub fn tight_punctuation(&self) -> &str {
        &self.tight_punctuation
    }

    /// Whether `comment` (the full comment text, markers included) carries
    /// meaning for a compiler or build tool and must be kept.
    pub fn keeps_comment(&self, comment: &str) -> bool {
        self.kept_comment_prefixes
            .iter()
            .any(|prefix| comment.starts_with(prefix.as_str()))
    }

    /// Code that keeps every comment directly in front of it, if any.
    pub fn kept_comment_anchor(&self) -> Option<&str> {
        self.kept_comment_anchor.as_deref()
    }

    /// Classify `text` into spans.
    pub fn scan<'a>(&'a self, text: &'a str) -> Scanner<'a> {
        Scanner::new(text, self)
    }

    pub(crate) fn openers(&self) -> &[Opener] {
        &self.openers
    }
}

/// Builder for [`PatternSet`].
#[derive(Debug, Clone, Default)]
pub struct PatternSetBuilder {
    set: PatternSet,
}

impl PatternSetBuilder {
    /// Add a plain line comment marker.
    pub fn line_comment(mut self, marker: impl Into<String>) -> Self {
        self.set.line_comments.push(LineComment::new(marker));
        self
    }

    /// Add a line comment marker that only opens at the start of a word.
    pub fn word_line_comment(mut self, marker: impl Into<String>) -> Self {
        let mut comment = LineComment::new(marker);
        comment.word_boundary = true;
        self.set.line_comments.push(comment);
        self
    }

    /// Add a line comment marker whose newline can be escaped by `continuation`.
    pub fn continued_line_comment(mut self, marker: impl Into<String>, continuation: char) -> Self {
        let mut comment = LineComment::new(marker);
        comment.continuation = Some(continuation);
        self.set.line_comments.push(comment);
        self
    }

    /// Add a non-nesting block comment pair.
    pub fn block_comment(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.set.block_comments.push(BlockComment {
            open: open.into(),
            close: close.into(),
            nested: false,
        });
        self
    }

    /// Add a nesting block comment pair.
    pub fn nested_block_comment(
        mut self,
        open: impl Into<String>,
        close: impl Into<String>,
    ) -> Self {
        self.set.block_comments.push(BlockComment {
            open: open.into(),
            close: close.into(),
            nested: true,
        });
        self
    }

    /// Add a string delimiter.
    pub fn string(mut self, delimiter: StringDelimiter) -> Self {
        self.set.strings.push(delimiter);
        self
    }

    /// Recognize JavaScript-style regex literals.
    pub fn regex_literals(mut self) -> Self {
        self.set.regex_literals = true;
        self
    }

    /// Recognize shell here-documents as literals.
    pub fn heredocs(mut self) -> Self {
        self.set.heredocs = true;
        self
    }

    /// Keep a leading `#!` interpreter line as code.
    pub fn shebang(mut self) -> Self {
        self.set.shebang = true;
        self
    }

    /// Mark leading indentation as significant.
    pub fn significant_indentation(mut self) -> Self {
        self.set.indentation_significant = true;
        self
    }

    /// Allow operator spacing removal next to these characters.
    pub fn tight_punctuation(mut self, chars: impl Into<String>) -> Self {
        self.set.tight_punctuation = chars.into();
        self
    }

    /// Never strip comments that start with `prefix` (`{-#`, `//go:`).
    pub fn keep_comments_starting_with(mut self, prefix: impl Into<String>) -> Self {
        self.set.kept_comment_prefixes.push(prefix.into());
        self
    }

    /// Never strip comments separated from `anchor` only by whitespace and
    /// other comments.
    pub fn keep_comments_before(mut self, anchor: impl Into<String>) -> Self {
        self.set.kept_comment_anchor = Some(anchor.into());
        self
    }

    /// Finish the set. Empty delimiters are dropped.
    pub fn build(mut self) -> PatternSet {
        let set = &mut self.set;
        set.line_comments.retain(|c| !c.marker.is_empty());
        set.block_comments
            .retain(|b| !b.open.is_empty() && !b.close.is_empty());
        set.strings
            .retain(|s| !s.open.is_empty() && !s.close.is_empty());
        set.kept_comment_prefixes.retain(|p| !p.is_empty());
        set.kept_comment_anchor = set.kept_comment_anchor.take().filter(|a| !a.is_empty());

        let mut openers: Vec<Opener> = Vec::new();
        openers.extend(set.strings.iter().enumerate().map(|(i, s)| Opener {
            text: s.open.clone(),
            kind: OpenerKind::String(i),
        }));
        openers.extend(set.block_comments.iter().enumerate().map(|(i, b)| Opener {
            text: b.open.clone(),
            kind: OpenerKind::Block(i),
        }));
        openers.extend(set.line_comments.iter().enumerate().map(|(i, c)| Opener {
            text: c.marker.clone(),
            kind: OpenerKind::Line(i),
        }));
        // Stable sort keeps registration order among equal candidates
        openers.sort_by(|a, b| {
            b.text
                .len()
                .cmp(&a.text.len())
                .then(a.kind.rank().cmp(&b.kind.rank()))
        });
        set.openers = openers;

        self.set
    }
}
