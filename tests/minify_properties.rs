//! Property-based tests for the minification pipeline
//!
//! Inputs are drawn from one token alphabet shared by every built-in
//! language: words, whitespace, punctuation and the comment, string and
//! heredoc markers of all of them. Each action is checked on its own, for
//! every language, with and without line parity.

use proptest::prelude::*;
use std::path::PathBuf;

use src_slim::action::{ActionKind, ActionOptions, ActionPipeline};
use src_slim::file::ArtifactNaming;
use src_slim::language::{builtin, Language, LanguageMinifier};
use src_slim::pattern::SpanKind;

const TOKENS: &[&str] = &[
    "x", "y1", " ", "  ", "\t", "\n", "\n\n", "  \n", ";", "=", ":", ",", "(", ")", "{", "}",
    "[", "]", "<", ">", "!", "-", "*", "/", "#", "#!", "\\", "\"", "'", "`", "//", "/*", "*/",
    "--", "{-", "-}", "(*", "*)", "[[", "]]", "[==[", "]==]", "<!--", "-->", "\"quoted\"",
    "'c'", "// line\n", "/* block */", "# hash\n", "-- dash\n", "<<EOF\n", "EOF\n",
];

fn source() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(TOKENS), 0..40).prop_map(|parts| parts.concat())
}

fn options_for(language: &Language, keep_line_parity: bool) -> ActionOptions {
    ActionOptions {
        keep_line_parity,
        ..language.default_options()
    }
}

/// Every (language, single action, line parity) combination
fn single_action_runs() -> Vec<(Language, ActionKind, bool)> {
    let mut runs = Vec::new();
    for language in builtin::all() {
        for kind in ActionKind::ALL {
            for parity in [false, true] {
                runs.push((language.clone(), kind, parity));
            }
        }
    }
    runs
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: applying an action twice gives the same result as once
    #[test]
    fn prop_single_action_is_idempotent(src in source()) {
        for (language, kind, parity) in single_action_runs() {
            let pipeline = ActionPipeline::from_kinds(&[kind]);
            let options = options_for(&language, parity);

            let once = pipeline.apply(&src, language.patterns(), &options);
            let twice = pipeline.apply(&once, language.patterns(), &options);
            prop_assert_eq!(
                &twice, &once,
                "{} / {} / parity {}", language.name(), kind, parity
            );
        }
    }

    /// Property: output is never larger than input
    #[test]
    fn prop_single_action_never_grows(src in source()) {
        for (language, kind, parity) in single_action_runs() {
            let pipeline = ActionPipeline::from_kinds(&[kind]);
            let out = pipeline.apply(&src, language.patterns(), &options_for(&language, parity));
            prop_assert!(
                out.len() <= src.len(),
                "{} / {} / parity {}: {:?} -> {:?}", language.name(), kind, parity, src, out
            );
        }
    }

    /// Property: every closed literal of the input survives byte for byte
    #[test]
    fn prop_single_action_keeps_string_literals(src in source()) {
        for (language, kind, parity) in single_action_runs() {
            let pipeline = ActionPipeline::from_kinds(&[kind]);
            let out = pipeline.apply(&src, language.patterns(), &options_for(&language, parity));

            for span in language.patterns().scan(&src) {
                if span.kind == SpanKind::StringLiteral && span.terminated {
                    let literal = span.text(&src);
                    prop_assert!(
                        out.contains(literal),
                        "{} / {} / parity {}: {:?} lost {:?}",
                        language.name(), kind, parity, out, literal
                    );
                }
            }
        }
    }

    /// Property: with line parity on, no action changes the line count
    #[test]
    fn prop_line_parity_keeps_line_count(src in source()) {
        let lines = src.matches('\n').count();
        for (language, kind, parity) in single_action_runs() {
            if !parity {
                continue;
            }
            let pipeline = ActionPipeline::from_kinds(&[kind]);
            let out = pipeline.apply(&src, language.patterns(), &options_for(&language, true));
            prop_assert_eq!(
                out.matches('\n').count(), lines,
                "{} / {}: {:?} -> {:?}", language.name(), kind, &src, &out
            );
        }
    }

    /// Property: each language's default pipeline is idempotent
    #[test]
    fn prop_default_pipeline_is_idempotent(src in source()) {
        for language in builtin::all() {
            let once = language.minify(&src);
            prop_assert_eq!(&language.minify(&once), &once, "{}", language.name());
        }
    }

    /// Property: nesting pipelines does not change their effect
    #[test]
    fn prop_pipeline_composition_is_associative(src in source()) {
        let c = builtin::c();
        let options = c.default_options();
        let step = |kind| ActionPipeline::from_kinds(&[kind]);

        let left = step(ActionKind::Comments)
            .then(step(ActionKind::Whitespace))
            .then(step(ActionKind::BlankLines));
        let right = step(ActionKind::Comments)
            .then(step(ActionKind::Whitespace).then(step(ActionKind::BlankLines)));

        let flat = ActionPipeline::standard().apply(&src, c.patterns(), &options);
        prop_assert_eq!(&left.apply(&src, c.patterns(), &options), &flat);
        prop_assert_eq!(&right.apply(&src, c.patterns(), &options), &flat);
        prop_assert_eq!(left.names(), right.names());
    }

    /// Property: artifact names map back to their source, and sources are
    /// never mistaken for artifacts
    #[test]
    fn prop_artifact_naming_round_trips(
        dir in "[a-z]{1,6}",
        stem in "[a-z_]{1,10}",
        ext in prop::option::of("[a-z]{1,4}"),
    ) {
        let naming = ArtifactNaming::default();
        let name = match &ext {
            Some(ext) => format!("{}.{}", stem, ext),
            None => stem.clone(),
        };
        let source = PathBuf::from(dir).join(name);
        let artifact = naming.output_path_for(&source);

        prop_assert!(!naming.is_generated_artifact(&source));
        prop_assert!(naming.is_generated_artifact(&artifact));
        prop_assert_eq!(naming.source_path_for(&artifact), Some(source));
    }

    /// Property: distinct sources get distinct artifacts
    #[test]
    fn prop_artifact_naming_is_injective(
        a in "[a-z]{1,6}(\\.[a-z]{1,3})?",
        b in "[a-z]{1,6}(\\.[a-z]{1,3})?",
    ) {
        prop_assume!(a != b);
        let naming = ArtifactNaming::default();
        prop_assert_ne!(
            naming.output_path_for(PathBuf::from(&a).as_path()),
            naming.output_path_for(PathBuf::from(&b).as_path())
        );
    }
}
