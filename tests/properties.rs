use proptest::prelude::*;

use rematch::{CompileOptions, compile, compile_with};

/// Escape every non-alphanumeric character so the pattern is literal-only.
fn escape(literal: &str) -> String {
    let mut out = String::new();
    for c in literal.chars() {
        if !c.is_ascii_alphanumeric() {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

proptest! {
    #[test]
    fn literal_pattern_matches_iff_prefix(p in "[a-c]{0,5}", s in "[a-c]{0,8}") {
        let pattern = compile(&p).unwrap();
        let result = pattern.match_anchored(&s);
        prop_assert_eq!(result.success, s.starts_with(&p));
        if result.success {
            prop_assert_eq!(result.span(), Some(0..p.chars().count()));
        }
    }

    #[test]
    fn escaped_text_matches_itself(text in "\\PC{0,12}", tail in "\\PC{0,4}") {
        let pattern = compile(&escape(&text)).unwrap();
        let subject = format!("{text}{tail}");
        let result = pattern.match_anchored(&subject);
        prop_assert!(result.success);
        prop_assert_eq!(result.matched_text(&subject), Some(text.as_str()));
    }

    #[test]
    fn span_is_anchored_and_in_bounds(p in "[ab.*+?()]{0,8}", s in "[ab]{0,10}") {
        if let Ok(pattern) = compile(&p) {
            let result = pattern.match_anchored(&s);
            if result.success {
                prop_assert_eq!(result.start, 0);
                prop_assert!(result.end <= s.chars().count());
            } else {
                prop_assert_eq!((result.start, result.end), (0, 0));
            }
        }
    }

    #[test]
    fn end_anchor_consumes_whole_subject(s in "[ab]{0,10}") {
        let pattern = compile("[ab]*$").unwrap();
        let result = pattern.match_anchored(&s);
        prop_assert!(result.success);
        prop_assert_eq!(result.end, s.chars().count());
    }

    #[test]
    fn compile_never_panics(p in "\\PC{0,16}") {
        if let Err(err) = compile(&p) {
            prop_assert!(err.position <= p.chars().count());
        }
    }

    #[test]
    fn matching_is_repeatable(p in "[ab]{1,3}[*+?]?", s in "[ab]{0,6}", other in "[ab]{0,6}") {
        let pattern = compile(&p).unwrap();
        let first = pattern.match_anchored(&s);
        let _ = pattern.match_anchored(&other);
        prop_assert_eq!(first, pattern.match_anchored(&s));
    }

    #[test]
    fn ignore_case_agrees_with_lowercasing(p in "[a-c]{0,4}", s in "[a-cA-C]{0,6}") {
        let folded = compile_with(&p.to_uppercase(), CompileOptions { ignore_case: true }).unwrap();
        let plain = compile(&p).unwrap();
        prop_assert_eq!(
            folded.match_anchored(&s),
            plain.match_anchored(&s.to_lowercase())
        );
    }
}
