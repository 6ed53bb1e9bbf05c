//! Built-in languages
//!
//! Each function returns a ready-to-register [`Language`]. The pattern sets
//! are deliberately conservative: when a construct cannot be told apart
//! from a comment without a real parser, it is described as a literal so
//! the minifier leaves it alone.

use crate::action::{ActionKind, ActionOptions, ActionPipeline, IndentPolicy};
use crate::pattern::{PatternSet, PatternSetBuilder, StringDelimiter, C_LIKE_PUNCTUATION};

use super::Language;

/// Punctuation that is safe to tighten in style sheets. `(` and `:` are
/// excluded (`and (` in media queries, `div :hover`).
const CSS_PUNCTUATION: &str = "{};,>~!";

/// Every built-in language, in alphabetical order.
pub fn all() -> Vec<Language> {
    vec![
        c(),
        cpp(),
        csharp(),
        css(),
        go(),
        haskell(),
        html(),
        java(),
        javascript(),
        kotlin(),
        lua(),
        ocaml(),
        python(),
        rust(),
        scss(),
        shell(),
        sql(),
        swift(),
        toml(),
        typescript(),
        xml(),
    ]
}

fn c_family(continued_comments: bool) -> PatternSetBuilder {
    let builder = if continued_comments {
        PatternSet::builder().continued_line_comment("//", '\\')
    } else {
        PatternSet::builder().line_comment("//")
    };
    builder
        .block_comment("/*", "*/")
        .string(StringDelimiter::quoted("\""))
        .string(StringDelimiter::quoted("'"))
}

/// Python: `#` comments, triple-quoted strings, significant indentation.
pub fn python() -> Language {
    Language::new(
        "python",
        ["py", "pyw", "pyi"],
        PatternSet::builder()
            .line_comment("#")
            .string(StringDelimiter::quoted("\"\"\"").multiline())
            .string(StringDelimiter::quoted("'''").multiline())
            .string(StringDelimiter::quoted("\""))
            .string(StringDelimiter::quoted("'"))
            .shebang()
            .significant_indentation()
            .tight_punctuation(C_LIKE_PUNCTUATION)
            .build(),
    )
    .with_options(ActionOptions {
        indentation: IndentPolicy::Preserve,
        keep_line_parity: false,
    })
}

fn ecmascript() -> PatternSetBuilder {
    PatternSet::builder()
        .line_comment("//")
        .block_comment("/*", "*/")
        .string(StringDelimiter::quoted("\""))
        .string(StringDelimiter::quoted("'"))
        .string(StringDelimiter::quoted("`").multiline())
        .regex_literals()
        .shebang()
        .tight_punctuation(C_LIKE_PUNCTUATION)
}

/// JavaScript, including modules and JSX.
pub fn javascript() -> Language {
    Language::new("javascript", ["js", "mjs", "cjs", "jsx"], ecmascript().build())
}

/// TypeScript shares the JavaScript lexical rules. Triple-slash directives
/// and `@ts-` pragmas steer the compiler and are kept.
pub fn typescript() -> Language {
    Language::new(
        "typescript",
        ["ts", "tsx", "mts", "cts"],
        ecmascript()
            .keep_comments_starting_with("/// <reference")
            .keep_comments_starting_with("/// <amd-")
            .keep_comments_starting_with("// @ts-")
            .keep_comments_starting_with("//@ts-")
            .build(),
    )
}

/// CSS. Operator spacing is part of the default pipeline.
pub fn css() -> Language {
    Language::new(
        "css",
        ["css"],
        PatternSet::builder()
            .block_comment("/*", "*/")
            .string(StringDelimiter::quoted("\""))
            .string(StringDelimiter::quoted("'"))
            .tight_punctuation(CSS_PUNCTUATION)
            .build(),
    )
    .with_pipeline(ActionPipeline::standard().then(ActionPipeline::from_kinds(&[
        ActionKind::Operators,
    ])))
}

/// SCSS and Less: CSS plus `//` comments. Unquoted `url(...)` is a literal
/// so `url(http://...)` is not mistaken for a comment.
pub fn scss() -> Language {
    Language::new(
        "scss",
        ["scss", "less"],
        PatternSet::builder()
            .line_comment("//")
            .block_comment("/*", "*/")
            .string(StringDelimiter::quoted("\""))
            .string(StringDelimiter::quoted("'"))
            .string(StringDelimiter::pair("url(", ")").raw())
            .tight_punctuation(CSS_PUNCTUATION)
            .build(),
    )
}

/// HTML: only `<!-- -->` comments. Double-quoted attribute values are
/// literals. Inline `<script>` and `<style>` bodies are treated as markup, so
/// their own comments stay in place.
pub fn html() -> Language {
    Language::new(
        "html",
        ["html", "htm", "xhtml"],
        PatternSet::builder()
            .block_comment("<!--", "-->")
            .string(StringDelimiter::quoted("\"").raw().multiline())
            .string(StringDelimiter::pair("<![CDATA[", "]]>").raw().multiline())
            .build(),
    )
}

/// XML and SVG.
pub fn xml() -> Language {
    Language::new(
        "xml",
        ["xml", "svg", "xsd", "xsl", "xslt"],
        PatternSet::builder()
            .block_comment("<!--", "-->")
            .string(StringDelimiter::quoted("\"").raw().multiline())
            .string(StringDelimiter::pair("<![CDATA[", "]]>").raw().multiline())
            .build(),
    )
}

/// C. Line comments continue across backslash-newline. Spacing is never
/// tightened: `#define F (x)` and `#define F(x)` differ.
pub fn c() -> Language {
    Language::new("c", ["c", "h"], c_family(true).build())
}

/// C++: the C rules plus `R"( )"` raw strings.
pub fn cpp() -> Language {
    Language::new(
        "cpp",
        ["cpp", "cc", "cxx", "hpp", "hh", "hxx"],
        c_family(true)
            .string(StringDelimiter::pair("R\"(", ")\"").raw().multiline())
            .build(),
    )
}

/// Java, with `"""` text blocks.
pub fn java() -> Language {
    Language::new(
        "java",
        ["java"],
        c_family(false)
            .string(StringDelimiter::quoted("\"\"\"").multiline())
            .tight_punctuation(C_LIKE_PUNCTUATION)
            .build(),
    )
}

/// C#, with `@"..."` verbatim strings.
pub fn csharp() -> Language {
    Language::new(
        "csharp",
        ["cs"],
        c_family(false)
            .string(StringDelimiter::pair("@\"", "\"").raw().multiline())
            .string(StringDelimiter::quoted("\"\"\"").raw().multiline())
            .tight_punctuation(C_LIKE_PUNCTUATION)
            .build(),
    )
}

/// Go, with backtick raw strings. Compiler directives (`//go:build`,
/// `//go:embed`, `//export`) and the cgo preamble in front of `import "C"`
/// are kept.
pub fn go() -> Language {
    Language::new(
        "go",
        ["go"],
        c_family(false)
            .string(StringDelimiter::quoted("`").raw().multiline())
            .keep_comments_starting_with("//go:")
            .keep_comments_starting_with("// +build")
            .keep_comments_starting_with("//export ")
            .keep_comments_starting_with("//line ")
            .keep_comments_before("import \"C\"")
            .tight_punctuation(C_LIKE_PUNCTUATION)
            .build(),
    )
}

/// Rust: nesting block comments and raw strings. A bare `'` is not a
/// delimiter (lifetimes); only the character literals that could confuse
/// the scanner, `'"'` and backslash escapes, are described.
pub fn rust() -> Language {
    Language::new(
        "rust",
        ["rs"],
        PatternSet::builder()
            .line_comment("//")
            .nested_block_comment("/*", "*/")
            .string(StringDelimiter::quoted("\"").multiline())
            .string(StringDelimiter::pair("r##\"", "\"##").raw().multiline())
            .string(StringDelimiter::pair("r#\"", "\"#").raw().multiline())
            .string(StringDelimiter::pair("r\"", "\"").raw().multiline())
            .string(StringDelimiter::pair("'\"", "'").raw())
            .string(StringDelimiter::pair("'\\", "'").raw())
            .tight_punctuation(C_LIKE_PUNCTUATION)
            .build(),
    )
}

/// Kotlin: nesting block comments and `"""` raw strings.
pub fn kotlin() -> Language {
    Language::new(
        "kotlin",
        ["kt", "kts"],
        PatternSet::builder()
            .line_comment("//")
            .nested_block_comment("/*", "*/")
            .string(StringDelimiter::quoted("\"\"\"").raw().multiline())
            .string(StringDelimiter::quoted("\""))
            .string(StringDelimiter::quoted("'"))
            .tight_punctuation(C_LIKE_PUNCTUATION)
            .build(),
    )
}

/// Swift. Operators must keep balanced spacing, so spacing is never
/// tightened.
pub fn swift() -> Language {
    Language::new(
        "swift",
        ["swift"],
        PatternSet::builder()
            .line_comment("//")
            .nested_block_comment("/*", "*/")
            .string(StringDelimiter::quoted("\"\"\"").multiline())
            .string(StringDelimiter::quoted("\""))
            .build(),
    )
}

/// POSIX shells. `#` only opens a comment at the start of a word, and
/// here-documents are literals.
pub fn shell() -> Language {
    Language::new(
        "shell",
        ["sh", "bash", "zsh"],
        PatternSet::builder()
            .word_line_comment("#")
            .string(StringDelimiter::quoted("\"").multiline())
            .string(StringDelimiter::quoted("'").raw().multiline())
            .heredocs()
            .shebang()
            .build(),
    )
}

/// TOML.
pub fn toml() -> Language {
    Language::new(
        "toml",
        ["toml"],
        PatternSet::builder()
            .line_comment("#")
            .string(StringDelimiter::quoted("\"\"\"").multiline())
            .string(StringDelimiter::quoted("'''").raw().multiline())
            .string(StringDelimiter::quoted("\""))
            .string(StringDelimiter::quoted("'").raw())
            .build(),
    )
}

/// SQL. Quotes are doubled rather than escaped.
pub fn sql() -> Language {
    Language::new(
        "sql",
        ["sql"],
        PatternSet::builder()
            .line_comment("--")
            .block_comment("/*", "*/")
            .string(StringDelimiter::quoted("'").raw().multiline())
            .string(StringDelimiter::quoted("\"").raw().multiline())
            .build(),
    )
}

/// Deepest `[==[` long bracket level described for Lua.
const LUA_MAX_LEVEL: usize = 4;

/// Lua: `--` comments, `--[[ ]]` blocks and `[[ ]]` long strings, including
/// the leveled forms `--[==[ ]==]` and `[==[ ]==]`.
pub fn lua() -> Language {
    let mut builder = PatternSet::builder()
        .line_comment("--")
        .string(StringDelimiter::quoted("\""))
        .string(StringDelimiter::quoted("'"))
        .shebang()
        .tight_punctuation(C_LIKE_PUNCTUATION);
    for level in 0..=LUA_MAX_LEVEL {
        let equals = "=".repeat(level);
        let close = format!("]{}]", equals);
        builder = builder
            .block_comment(format!("--[{}[", equals), close.clone())
            .string(StringDelimiter::pair(format!("[{}[", equals), close).raw().multiline());
    }
    Language::new("lua", ["lua"], builder.build())
}

/// Haskell: nesting `{- -}` comments, significant indentation. Primes in
/// identifiers rule out `'` as a delimiter except for `'"'`. `{-# #-}`
/// pragmas are kept.
pub fn haskell() -> Language {
    Language::new(
        "haskell",
        ["hs"],
        PatternSet::builder()
            .line_comment("--")
            .nested_block_comment("{-", "-}")
            .string(StringDelimiter::quoted("\""))
            .string(StringDelimiter::pair("'\"", "'").raw())
            .keep_comments_starting_with("{-#")
            .significant_indentation()
            .build(),
    )
    .with_options(ActionOptions {
        indentation: IndentPolicy::Preserve,
        keep_line_parity: false,
    })
}

/// OCaml: nesting `(* *)` comments and no line comments. As in Haskell,
/// `'"'` is the only character literal described.
pub fn ocaml() -> Language {
    Language::new(
        "ocaml",
        ["ml", "mli"],
        PatternSet::builder()
            .nested_block_comment("(*", "*)")
            .string(StringDelimiter::quoted("\"").multiline())
            .string(StringDelimiter::pair("'\"", "'").raw())
            .build(),
    )
}
