//! Token types for compiled patterns.

use std::fmt;

use itertools::Itertools;

/// A concatenation of items. The top level of a pattern and the body of
/// every group are sequences.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sequence {
    pub items: Vec<Item>,
}

/// One quantified element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub quantifier: Quantifier,
    pub element: Element,
}

impl Item {
    pub fn once(element: Element) -> Self {
        Self {
            quantifier: Quantifier::Once,
            element,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    Once,
    ZeroOrMore,
    OneOrMore,
    ZeroOrOne,
    Exactly(usize),
    AtLeast(usize),
    Between(usize, usize),
}

impl Quantifier {
    /// Inclusive repetition bounds. Unbounded quantifiers report `usize::MAX`.
    pub fn bounds(&self) -> (usize, usize) {
        match *self {
            Quantifier::Once => (1, 1),
            Quantifier::ZeroOrMore => (0, usize::MAX),
            Quantifier::OneOrMore => (1, usize::MAX),
            Quantifier::ZeroOrOne => (0, 1),
            Quantifier::Exactly(n) => (n, n),
            Quantifier::AtLeast(n) => (n, usize::MAX),
            Quantifier::Between(lo, hi) => (lo, hi),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Literal(char),
    Wildcard,
    Class(CharClass),
    Group(Box<Sequence>),
    Anchor(Anchor),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start, // ^ : pos == 0
    End,   // $ : pos == subject length
}

/// A bracketed set `[...]` or a shorthand escape such as `\d`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharClass {
    pub negated: bool,
    pub members: Vec<ClassMember>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassMember {
    Single(char),
    Range(char, char),
    Shorthand(Shorthand),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shorthand {
    Digit,    // \d
    NotDigit, // \D
    Word,     // \w
    NotWord,  // \W
    Space,    // \s
    NotSpace, // \S
}

impl Shorthand {
    pub fn letter(&self) -> char {
        match self {
            Shorthand::Digit => 'd',
            Shorthand::NotDigit => 'D',
            Shorthand::Word => 'w',
            Shorthand::NotWord => 'W',
            Shorthand::Space => 's',
            Shorthand::NotSpace => 'S',
        }
    }
}

// ─── Display ────────────────────────────────────────────────────────────────
//
// Rendering an item gives back pattern syntax equivalent to what was parsed.
// The `--explain` listing relies on this.

const METACHARS: &str = r".^$*+?{}[]()\|";

fn write_escaped(f: &mut fmt::Formatter<'_>, ch: char, specials: &str) -> fmt::Result {
    match ch {
        '\n' => f.write_str(r"\n"),
        '\t' => f.write_str(r"\t"),
        '\r' => f.write_str(r"\r"),
        '\x0c' => f.write_str(r"\f"),
        '\x0b' => f.write_str(r"\v"),
        '\0' => f.write_str(r"\0"),
        c if specials.contains(c) => write!(f, "\\{c}"),
        c => write!(f, "{c}"),
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.items.iter().join(""))
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.element, self.quantifier)
    }
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantifier::Once => Ok(()),
            Quantifier::ZeroOrMore => f.write_str("*"),
            Quantifier::OneOrMore => f.write_str("+"),
            Quantifier::ZeroOrOne => f.write_str("?"),
            Quantifier::Exactly(n) => write!(f, "{{{n}}}"),
            Quantifier::AtLeast(n) => write!(f, "{{{n},}}"),
            Quantifier::Between(lo, hi) => write!(f, "{{{lo},{hi}}}"),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Literal(c) => write_escaped(f, *c, METACHARS),
            Element::Wildcard => f.write_str("."),
            Element::Class(class) => write!(f, "{class}"),
            Element::Group(seq) => write!(f, "({seq})"),
            Element::Anchor(Anchor::Start) => f.write_str("^"),
            Element::Anchor(Anchor::End) => f.write_str("$"),
        }
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // A lone shorthand prints bare, as it was most likely written.
        if let [ClassMember::Shorthand(s)] = self.members.as_slice()
            && !self.negated
        {
            return write!(f, "\\{}", s.letter());
        }
        f.write_str("[")?;
        if self.negated {
            f.write_str("^")?;
        }
        for member in &self.members {
            match member {
                ClassMember::Single(c) => write_escaped(f, *c, r"]\^-")?,
                ClassMember::Range(lo, hi) => {
                    write_escaped(f, *lo, r"]\^-")?;
                    f.write_str("-")?;
                    write_escaped(f, *hi, r"]\^-")?;
                }
                ClassMember::Shorthand(s) => write!(f, "\\{}", s.letter())?,
            }
        }
        f.write_str("]")
    }
}
