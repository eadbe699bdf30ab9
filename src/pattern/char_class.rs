//! Character class membership tests.

use super::ast::{CharClass, ClassMember, Shorthand};

/// Test whether `ch` is accepted by `class`.
///
/// With `ignore_case`, a member accepts `ch` when it accepts any case variant
/// of `ch`. Negation is applied after folding, so `[^a]` rejects both `a`
/// and `A` in that mode.
pub fn class_matches(class: &CharClass, ch: char, ignore_case: bool) -> bool {
    let base = if ignore_case {
        case_variants(ch).any(|v| members_match(&class.members, v))
    } else {
        members_match(&class.members, ch)
    };
    if class.negated { !base } else { base }
}

/// Case-insensitive character comparison used for literals.
pub fn chars_eq(a: char, b: char, ignore_case: bool) -> bool {
    a == b || (ignore_case && case_variants(a).any(|v| v == b))
}

fn members_match(members: &[ClassMember], ch: char) -> bool {
    members.iter().any(|m| member_matches(m, ch))
}

/// Test whether `ch` falls within a single class member.
pub fn member_matches(member: &ClassMember, ch: char) -> bool {
    match member {
        ClassMember::Single(c) => *c == ch,
        ClassMember::Range(lo, hi) => *lo <= ch && ch <= *hi,
        ClassMember::Shorthand(s) => shorthand_matches(*s, ch),
    }
}

fn shorthand_matches(s: Shorthand, ch: char) -> bool {
    match s {
        Shorthand::Digit => ch.is_ascii_digit(),
        Shorthand::NotDigit => !ch.is_ascii_digit(),
        Shorthand::Word => is_word(ch),
        Shorthand::NotWord => !is_word(ch),
        Shorthand::Space => ch.is_whitespace(),
        Shorthand::NotSpace => !ch.is_whitespace(),
    }
}

fn is_word(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}

/// `ch` plus its simple lower and upper case forms. Mappings that expand to
/// more than one character (`ß` to `SS`, `İ` to `i̇`) have no single-character
/// counterpart and are left out.
fn case_variants(ch: char) -> impl Iterator<Item = char> {
    std::iter::once(ch)
        .chain(single(ch.to_lowercase()))
        .chain(single(ch.to_uppercase()))
}

fn single(mut mapped: impl ExactSizeIterator<Item = char>) -> Option<char> {
    if mapped.len() == 1 { mapped.next() } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(members: Vec<ClassMember>) -> CharClass {
        CharClass {
            negated: false,
            members,
        }
    }
    fn neg(members: Vec<ClassMember>) -> CharClass {
        CharClass {
            negated: true,
            members,
        }
    }

    #[test]
    fn vowels() {
        let cs = class("aeiou".chars().map(ClassMember::Single).collect());
        assert!(class_matches(&cs, 'a', false));
        assert!(class_matches(&cs, 'u', false));
        assert!(!class_matches(&cs, 'b', false));
    }

    #[test]
    fn range_is_inclusive() {
        let cs = class(vec![ClassMember::Range('a', 'z')]);
        assert!(class_matches(&cs, 'a', false));
        assert!(class_matches(&cs, 'm', false));
        assert!(class_matches(&cs, 'z', false));
        assert!(!class_matches(&cs, 'A', false));
        assert!(!class_matches(&cs, '0', false));
    }

    #[test]
    fn negated_range() {
        let cs = neg(vec![ClassMember::Range('0', '9')]);
        assert!(class_matches(&cs, 'x', false));
        assert!(!class_matches(&cs, '5', false));
    }

    #[test]
    fn shorthand_digit_is_ascii_only() {
        let cs = class(vec![ClassMember::Shorthand(Shorthand::Digit)]);
        assert!(class_matches(&cs, '7', false));
        assert!(!class_matches(&cs, '٣', false));
    }

    #[test]
    fn shorthand_word() {
        let cs = class(vec![ClassMember::Shorthand(Shorthand::Word)]);
        for ch in ['a', 'Z', '0', '_', 'é'] {
            assert!(class_matches(&cs, ch, false), "expected word: {ch}");
        }
        assert!(!class_matches(&cs, '-', false));
        assert!(!class_matches(&cs, ' ', false));
    }

    #[test]
    fn shorthand_space_and_negation() {
        let space = class(vec![ClassMember::Shorthand(Shorthand::Space)]);
        let not_space = class(vec![ClassMember::Shorthand(Shorthand::NotSpace)]);
        for ch in [' ', '\t', '\n'] {
            assert!(class_matches(&space, ch, false));
            assert!(!class_matches(&not_space, ch, false));
        }
        assert!(class_matches(&not_space, 'x', false));
    }

    #[test]
    fn ignore_case_range() {
        let cs = class(vec![ClassMember::Range('a', 'f')]);
        assert!(!class_matches(&cs, 'C', false));
        assert!(class_matches(&cs, 'C', true));
        assert!(!class_matches(&cs, 'G', true));
    }

    #[test]
    fn ignore_case_negation_applies_after_folding() {
        let cs = neg(vec![ClassMember::Single('a')]);
        assert!(!class_matches(&cs, 'A', true));
        assert!(class_matches(&cs, 'A', false));
    }

    #[test]
    fn literal_comparison() {
        assert!(chars_eq('a', 'a', false));
        assert!(!chars_eq('a', 'A', false));
        assert!(chars_eq('a', 'A', true));
        assert!(chars_eq('Σ', 'σ', true));
        assert!(!chars_eq('a', 'b', true));
    }

    #[test]
    fn multi_char_case_mappings_do_not_fold() {
        assert!(!chars_eq('ß', 'S', true));
        assert!(!chars_eq('İ', 'i', true));
        assert!(!chars_eq('ŉ', 'N', true));
        assert!(chars_eq('ß', 'ß', true));
        assert!(chars_eq('ẞ', 'ß', true));

        let sharp_s = class(vec![ClassMember::Single('ß')]);
        assert!(!class_matches(&sharp_s, 'S', true));
        let dotted = class(vec![ClassMember::Single('i')]);
        assert!(!class_matches(&dotted, 'İ', true));
    }
}
