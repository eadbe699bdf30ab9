//! Compiled patterns and the compile entry points.

use std::fmt;

use tracing::debug;

use super::ast::{Anchor, Element, Item, Sequence};
use super::matcher::{MatchResult, match_anchored};
use super::parser::{PatternSyntaxError, parse};

/// Flags that change how a pattern matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileOptions {
    /// Compare literals and classes without regard to case.
    pub ignore_case: bool,
}

/// A compiled pattern.
///
/// Immutable once built; a single `Pattern` can be matched against any
/// number of subjects, from any number of threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    options: CompileOptions,
    root: Sequence,
}

/// Compile `source` with default options.
pub fn compile(source: &str) -> Result<Pattern, PatternSyntaxError> {
    compile_with(source, CompileOptions::default())
}

/// Compile `source` with the given options.
pub fn compile_with(source: &str, options: CompileOptions) -> Result<Pattern, PatternSyntaxError> {
    match parse(source) {
        Ok(root) => {
            debug!(pattern = source, items = root.items.len(), "compiled pattern");
            Ok(Pattern {
                source: source.to_string(),
                options,
                root,
            })
        }
        Err(err) => {
            debug!(pattern = source, %err, "pattern failed to compile");
            Err(err)
        }
    }
}

impl Pattern {
    /// The pattern string this was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn options(&self) -> CompileOptions {
        self.options
    }

    /// The compiled top-level items.
    pub fn items(&self) -> &[Item] {
        &self.root.items
    }

    pub(crate) fn root(&self) -> &Sequence {
        &self.root
    }

    /// True when the pattern begins with `^`.
    pub fn is_start_anchored(&self) -> bool {
        matches!(
            self.root.items.first().map(|item| &item.element),
            Some(Element::Anchor(Anchor::Start))
        )
    }

    /// True when the pattern ends with `$`, i.e. a match must consume the
    /// whole subject.
    pub fn is_end_anchored(&self) -> bool {
        matches!(
            self.root.items.last().map(|item| &item.element),
            Some(Element::Anchor(Anchor::End))
        )
    }

    /// Match this pattern at the start of `subject`.
    pub fn match_anchored(&self, subject: &str) -> MatchResult {
        match_anchored(self, subject)
    }

    pub fn is_match(&self, subject: &str) -> bool {
        self.match_anchored(subject).success
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl std::str::FromStr for Pattern {
    type Err = PatternSyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        compile(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::parser::SyntaxErrorKind;

    #[test]
    fn keeps_source_and_options() {
        let p = compile_with("a+b", CompileOptions { ignore_case: true }).unwrap();
        assert_eq!(p.as_str(), "a+b");
        assert_eq!(p.to_string(), "a+b");
        assert!(p.options().ignore_case);
        assert_eq!(p.items().len(), 2);
    }

    #[test]
    fn anchoring_flags() {
        let p = compile("^abc$").unwrap();
        assert!(p.is_start_anchored());
        assert!(p.is_end_anchored());
        let p = compile(r"abc\$").unwrap();
        assert!(!p.is_start_anchored());
        assert!(!p.is_end_anchored());
    }

    #[test]
    fn from_str() {
        let p: Pattern = "[a-z]+".parse().unwrap();
        assert!(p.is_match("abc"));
        let err = "(abc".parse::<Pattern>().unwrap_err();
        assert_eq!(err.kind, SyntaxErrorKind::UnbalancedParenthesis);
    }

    #[test]
    fn pattern_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Pattern>();
    }

    #[test]
    fn shared_across_threads() {
        let p = compile("(ab)+c?").unwrap();
        let pattern = &p;
        std::thread::scope(|s| {
            let handles: Vec<_> = ["ab", "ababc", "xab"]
                .into_iter()
                .map(|subject| s.spawn(move || pattern.is_match(subject)))
                .collect();
            let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
            assert_eq!(results, vec![true, true, false]);
        });
    }
}
