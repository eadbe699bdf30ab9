//! Recursive descent parser for pattern strings.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use itertools::Itertools;
use phf::{Map, phf_map};
use thiserror::Error;

use super::ast::*;

/// The reason a pattern failed to compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    UnbalancedParenthesis,
    UnbalancedBracket,
    NothingToRepeat,
    InvalidRepeatBound,
    InvertedRepeatBound,
    InvalidClassRange,
    MisplacedAnchor,
    TrailingEscape,
    NestingTooDeep,
}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnbalancedParenthesis => write!(f, "Unbalanced parenthesis"),
            Self::UnbalancedBracket => write!(f, "Unbalanced bracket"),
            Self::NothingToRepeat => write!(f, "Nothing to repeat"),
            Self::InvalidRepeatBound => write!(f, "Invalid repeat bound"),
            Self::InvertedRepeatBound => write!(f, "Repeat bound min is greater than max"),
            Self::InvalidClassRange => write!(f, "Invalid character class range"),
            Self::MisplacedAnchor => write!(f, "Anchor not at the start or end of the pattern"),
            Self::TrailingEscape => write!(f, "Trailing backslash"),
            Self::NestingTooDeep => write!(f, "Groups nested too deeply"),
        }
    }
}

/// A pattern string that could not be compiled.
///
/// `position` is the character offset where the offending construct starts,
/// and `fragment` is the offending text itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at position {position}: {fragment:?}")]
pub struct PatternSyntaxError {
    pub kind: SyntaxErrorKind,
    pub position: usize,
    pub fragment: String,
}

/// Deepest group nesting accepted. Compiling, matching, displaying and
/// dropping a pattern all recurse once per level.
pub const MAX_GROUP_DEPTH: usize = 256;

/// `\d`-style escapes. The lowercase letter is the class, uppercase its complement.
const SHORTHAND_ESCAPES: Map<char, Shorthand> = phf_map! {
    'd' => Shorthand::Digit,
    'D' => Shorthand::NotDigit,
    'w' => Shorthand::Word,
    'W' => Shorthand::NotWord,
    's' => Shorthand::Space,
    'S' => Shorthand::NotSpace,
};

const CONTROL_ESCAPES: Map<char, char> = phf_map! {
    '0' => '\0',
    'f' => '\x0c',
    'n' => '\n',
    'r' => '\r',
    't' => '\t',
    'v' => '\x0b',
};

/// Parse a pattern string into its top-level [`Sequence`].
pub fn parse(source: &str) -> Result<Sequence, PatternSyntaxError> {
    let mut parser = Parser {
        source,
        chars: source.chars().peekable(),
        pos: 0,
        len: source.chars().count(),
        depth: 0,
    };
    parser.parse_sequence(None)
}

/// What a backslash escape stands for.
enum Escape {
    Char(char),
    Shorthand(Shorthand),
}

struct Parser<'a> {
    source: &'a str,
    chars: Peekable<Chars<'a>>,
    /// Character offset of the next unconsumed character.
    pos: usize,
    len: usize,
    /// Number of groups currently open.
    depth: usize,
}

impl Parser<'_> {
    /// Parse items until end of input or, inside a group, the closing `)`.
    ///
    /// `open` is the offset of the `(` that started the enclosing group.
    fn parse_sequence(&mut self, open: Option<usize>) -> Result<Sequence, PatternSyntaxError> {
        let mut items: Vec<Item> = Vec::new();
        // Whether the last item may still take a quantifier.
        let mut repeatable = false;

        loop {
            let start = self.pos;
            let Some(c) = self.peek() else {
                return match open {
                    Some(open) => Err(self.error(SyntaxErrorKind::UnbalancedParenthesis, open, self.len)),
                    None => Ok(Sequence { items }),
                };
            };

            if matches!(c, '*' | '+' | '?' | '{') {
                if !repeatable {
                    self.bump();
                    return Err(self.error(SyntaxErrorKind::NothingToRepeat, start, self.pos));
                }
                let quantifier = self.parse_quantifier()?;
                if let Some(last) = items.last_mut() {
                    last.quantifier = quantifier;
                }
                repeatable = false;
                continue;
            }

            self.bump();
            let element = match c {
                ')' => match open {
                    Some(_) => return Ok(Sequence { items }),
                    None => return Err(self.error(SyntaxErrorKind::UnbalancedParenthesis, start, self.pos)),
                },
                '(' => {
                    if self.depth == MAX_GROUP_DEPTH {
                        return Err(self.error(SyntaxErrorKind::NestingTooDeep, start, self.pos));
                    }
                    self.depth += 1;
                    let body = self.parse_sequence(Some(start))?;
                    self.depth -= 1;
                    Element::Group(Box::new(body))
                }
                '[' => Element::Class(self.parse_class(start)?),
                ']' => return Err(self.error(SyntaxErrorKind::UnbalancedBracket, start, self.pos)),
                '.' => Element::Wildcard,
                '^' if start == 0 => Element::Anchor(Anchor::Start),
                '$' if start + 1 == self.len => Element::Anchor(Anchor::End),
                '^' | '$' => return Err(self.error(SyntaxErrorKind::MisplacedAnchor, start, self.pos)),
                '\\' => match self.parse_escape(start)? {
                    Escape::Char(ch) => Element::Literal(ch),
                    Escape::Shorthand(s) => Element::Class(CharClass {
                        negated: false,
                        members: vec![ClassMember::Shorthand(s)],
                    }),
                },
                other => Element::Literal(other),
            };
            repeatable = !matches!(element, Element::Anchor(_));
            items.push(Item::once(element));
        }
    }

    /// Parse `*`, `+`, `?` or a `{m,n}` bound following a repeatable item.
    fn parse_quantifier(&mut self) -> Result<Quantifier, PatternSyntaxError> {
        let start = self.pos;
        match self.bump() {
            Some('*') => Ok(Quantifier::ZeroOrMore),
            Some('+') => Ok(Quantifier::OneOrMore),
            Some('?') => Ok(Quantifier::ZeroOrOne),
            _ => self.parse_brace_quantifier(start),
        }
    }

    /// Parse a `{m,n}`-style quantifier (the opening `{` has already been consumed).
    fn parse_brace_quantifier(&mut self, start: usize) -> Result<Quantifier, PatternSyntaxError> {
        let first = self.parse_number(start)?;

        // Single-number form: {n} = Exactly(n)
        if self.peek() == Some('}') {
            self.bump();
            return match first {
                Some(n) => Ok(Quantifier::Exactly(n)),
                None => Err(self.error(SyntaxErrorKind::InvalidRepeatBound, start, self.pos)),
            };
        }

        if self.peek() != Some(',') {
            self.bump();
            return Err(self.error(SyntaxErrorKind::InvalidRepeatBound, start, self.pos));
        }
        self.bump();

        let second = self.parse_number(start)?;
        if self.bump() != Some('}') {
            return Err(self.error(SyntaxErrorKind::InvalidRepeatBound, start, self.pos));
        }

        match (first, second) {
            (None, None) => Ok(Quantifier::ZeroOrMore),       // {,}
            (Some(n), None) => Ok(Quantifier::AtLeast(n)),    // {n,}
            (None, Some(m)) => Ok(Quantifier::Between(0, m)), // {,m}
            (Some(n), Some(m)) if n <= m => Ok(Quantifier::Between(n, m)),
            _ => Err(self.error(SyntaxErrorKind::InvertedRepeatBound, start, self.pos)),
        }
    }

    /// Read a run of ASCII digits. An empty run is `None`, not an error.
    fn parse_number(&mut self, start: usize) -> Result<Option<usize>, PatternSyntaxError> {
        let digits: String = self
            .chars
            .peeking_take_while(|ch| ch.is_ascii_digit())
            .collect();
        self.pos += digits.len();
        if digits.is_empty() {
            return Ok(None);
        }
        digits
            .parse::<usize>()
            .map(Some)
            .map_err(|_| self.error(SyntaxErrorKind::InvalidRepeatBound, start, self.pos))
    }

    /// Parse a bracketed class (the opening `[` at `start` has already been consumed).
    fn parse_class(&mut self, start: usize) -> Result<CharClass, PatternSyntaxError> {
        let negated = self.peek() == Some('^');
        if negated {
            self.bump();
        }

        let mut members = Vec::new();
        let mut first = true;
        loop {
            let atom_start = self.pos;
            let lo = match self.bump() {
                None => return Err(self.error(SyntaxErrorKind::UnbalancedBracket, start, self.len)),
                Some(']') if !first => break,
                Some('\\') => match self.parse_escape(atom_start)? {
                    Escape::Char(ch) => ch,
                    Escape::Shorthand(_) if self.at_class_range() => {
                        self.bump(); // '-'
                        self.bump();
                        return Err(self.error(SyntaxErrorKind::InvalidClassRange, atom_start, self.pos));
                    }
                    Escape::Shorthand(s) => {
                        members.push(ClassMember::Shorthand(s));
                        first = false;
                        continue;
                    }
                },
                Some(ch) => ch,
            };
            first = false;

            if !self.at_class_range() {
                members.push(ClassMember::Single(lo));
                continue;
            }
            self.bump(); // consume '-'

            let hi = match self.bump() {
                None => return Err(self.error(SyntaxErrorKind::UnbalancedBracket, start, self.len)),
                Some('\\') => match self.parse_escape(self.pos - 1)? {
                    Escape::Char(ch) => ch,
                    Escape::Shorthand(_) => {
                        return Err(self.error(SyntaxErrorKind::InvalidClassRange, atom_start, self.pos));
                    }
                },
                Some(ch) => ch,
            };
            if lo > hi {
                return Err(self.error(SyntaxErrorKind::InvalidClassRange, atom_start, self.pos));
            }
            members.push(ClassMember::Range(lo, hi));
        }

        Ok(CharClass { negated, members })
    }

    /// True when the next two characters are `-` followed by a range end,
    /// i.e. not by `]` or end of input.
    fn at_class_range(&self) -> bool {
        let mut ahead = self.chars.clone();
        ahead.next() == Some('-') && !matches!(ahead.next(), None | Some(']'))
    }

    /// Parse the character after a `\` (the backslash at `start` has already been consumed).
    fn parse_escape(&mut self, start: usize) -> Result<Escape, PatternSyntaxError> {
        let Some(c) = self.bump() else {
            return Err(self.error(SyntaxErrorKind::TrailingEscape, start, self.pos));
        };
        if let Some(s) = SHORTHAND_ESCAPES.get(&c) {
            return Ok(Escape::Shorthand(*s));
        }
        Ok(Escape::Char(CONTROL_ESCAPES.get(&c).copied().unwrap_or(c)))
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.pos += 1;
        Some(c)
    }

    fn error(&self, kind: SyntaxErrorKind, start: usize, end: usize) -> PatternSyntaxError {
        PatternSyntaxError {
            kind,
            position: start,
            fragment: self.source.chars().skip(start).take(end - start).collect(),
        }
    }
}
