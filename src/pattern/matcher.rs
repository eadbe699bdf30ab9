//! Pattern matcher: run a compiled [`Pattern`] against the start of a subject.
//!
//! All positions are **character** (not byte) offsets into the subject.

use std::ops::Range;

use tracing::trace;

use super::ast::*;
use super::char_class::{chars_eq, class_matches};
use super::compiled::Pattern;

/// The outcome of an anchored match attempt.
///
/// A failed match is a normal result, not an error: `success` is false and
/// both offsets are 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    pub success: bool,
    /// Always 0 on success; matching is anchored at the subject start.
    pub start: usize,
    /// Offset just past the last consumed character.
    pub end: usize,
}

impl MatchResult {
    pub fn failure() -> Self {
        Self {
            success: false,
            start: 0,
            end: 0,
        }
    }

    fn matched(end: usize) -> Self {
        Self {
            success: true,
            start: 0,
            end,
        }
    }

    pub fn is_match(&self) -> bool {
        self.success
    }

    /// The matched character range, or `None` if the match failed.
    pub fn span(&self) -> Option<Range<usize>> {
        self.success.then_some(self.start..self.end)
    }

    /// Slice the matched text out of the subject this result came from.
    pub fn matched_text<'s>(&self, subject: &'s str) -> Option<&'s str> {
        let span = self.span()?;
        let byte_at = |col: usize| {
            subject
                .char_indices()
                .nth(col)
                .map_or(subject.len(), |(idx, _)| idx)
        };
        subject.get(byte_at(span.start)..byte_at(span.end))
    }
}

/// Match `pattern` at the start of `subject`.
///
/// Trailing characters after the match are allowed unless the pattern ends
/// with `$`.
pub fn match_anchored(pattern: &Pattern, subject: &str) -> MatchResult {
    let ctx = MatchCtx {
        subject: subject.chars().collect(),
        ignore_case: pattern.options().ignore_case,
    };

    let mut end = None;
    ctx.match_items(&pattern.root().items, 0, &mut |pos| {
        end = Some(pos);
        true
    });

    let result = end.map_or_else(MatchResult::failure, MatchResult::matched);
    trace!(
        pattern = pattern.as_str(),
        subject,
        success = result.success,
        end = result.end,
        "match attempt"
    );
    result
}

// ─── Core matching functions ─────────────────────────────────────────────────

/// Continuation for the rest of the pattern. Called with the position reached
/// so far; returns true once the whole pattern has matched.
type Cont<'k> = dyn FnMut(usize) -> bool + 'k;

/// Per-call matching state. Nothing here outlives one `match_anchored` call.
struct MatchCtx {
    subject: Vec<char>,
    ignore_case: bool,
}

impl MatchCtx {
    /// Match `items` in order from `pos`, then hand the end position to `k`.
    ///
    /// When `k` rejects, earlier quantified items give back repetitions one
    /// at a time and try again.
    fn match_items(&self, items: &[Item], pos: usize, k: &mut Cont<'_>) -> bool {
        let Some((item, rest)) = items.split_first() else {
            return k(pos);
        };
        let (min, max) = item.quantifier.bounds();
        if let Some(end) = self.greedy_run(&item.element, max, pos) {
            // Single-character element: the run is scanned in a loop and given
            // back one character at a time, so stack depth does not grow with
            // the subject.
            let Some(least) = pos.checked_add(min).filter(|&least| least <= end) else {
                return false;
            };
            return (least..=end)
                .rev()
                .any(|next| self.match_items(rest, next, k));
        }
        self.match_repeat(&item.element, min, max, 0, pos, &mut |next| {
            self.match_items(rest, next, k)
        })
    }

    /// End of the longest run (at most `max` characters) of `element` starting
    /// at `pos`. `None` for groups and anchors.
    fn greedy_run(&self, element: &Element, max: usize, pos: usize) -> Option<usize> {
        let mut end = pos;
        while end - pos < max {
            if !self.single_char_matches(element, end)? {
                break;
            }
            end += 1;
        }
        Some(end)
    }

    /// Greedy repetition of a group, `count` repetitions already matched.
    ///
    /// Tries one more repetition first and only falls back to stopping here
    /// when everything after that fails.
    fn match_repeat(
        &self,
        element: &Element,
        min: usize,
        max: usize,
        count: usize,
        pos: usize,
        k: &mut Cont<'_>,
    ) -> bool {
        if count < max {
            let more = self.match_element_once(element, pos, &mut |next| {
                if next == pos {
                    // Zero-width repetition. Past the minimum it would repeat
                    // forever; below it, every remaining repetition can be
                    // zero-width too.
                    return count < min && self.match_repeat(element, min, max, min, next, k);
                }
                self.match_repeat(element, min, max, count + 1, next, k)
            });
            if more {
                return true;
            }
        }
        count >= min && k(pos)
    }

    /// Match one repetition of `element` at `pos`, then continue with `k`.
    fn match_element_once(&self, element: &Element, pos: usize, k: &mut Cont<'_>) -> bool {
        match element {
            Element::Group(seq) => self.match_items(&seq.items, pos, k),
            Element::Anchor(Anchor::Start) => pos == 0 && k(pos),
            Element::Anchor(Anchor::End) => pos == self.subject.len() && k(pos),
            _ => self.single_char_matches(element, pos) == Some(true) && k(pos + 1),
        }
    }

    /// Whether a literal, wildcard or class accepts the character at `pos`.
    /// `None` when `element` is not a single-character element.
    fn single_char_matches(&self, element: &Element, pos: usize) -> Option<bool> {
        let ch = self.char_at(pos);
        match element {
            Element::Literal(c) => Some(ch.is_some_and(|ch| chars_eq(*c, ch, self.ignore_case))),
            Element::Wildcard => Some(ch.is_some()),
            Element::Class(class) => {
                Some(ch.is_some_and(|ch| class_matches(class, ch, self.ignore_case)))
            }
            Element::Group(_) | Element::Anchor(_) => None,
        }
    }

    fn char_at(&self, pos: usize) -> Option<char> {
        self.subject.get(pos).copied()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
