//! A small anchored regular-expression matcher.
//!
//! Patterns are compiled once and matched against the start of a subject,
//! with greedy backtracking quantifiers.
//!
//! # Example
//!
//! ```rust
//! use rematch::compile;
//!
//! let pattern = compile("a{1,3}$").unwrap();
//! assert!(pattern.is_match("aaa"));
//! assert!(!pattern.is_match("aaaa"));
//!
//! // Matching is anchored at the start but may stop early.
//! let result = compile("(ab)*").unwrap().match_anchored("ababx");
//! assert_eq!(result.span(), Some(0..4));
//! assert_eq!(result.matched_text("ababx"), Some("abab"));
//!
//! assert!(compile("a{3,1}").is_err());
//! ```

pub mod demo;
pub mod pattern;

pub use pattern::{
    CompileOptions, MatchResult, Pattern, PatternSyntaxError, SyntaxErrorKind, compile,
    compile_with, match_anchored,
};
