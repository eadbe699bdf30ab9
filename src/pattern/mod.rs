//! Anchored pattern matching engine.
//!
//! A pattern is compiled once and matched against the *start* of a subject:
//! a match always begins at offset 0 and may leave trailing characters
//! unconsumed unless the pattern ends with `$`.
//!
//! # Pattern syntax
//!
//! | Token         | Meaning                                        |
//! |---------------|------------------------------------------------|
//! | `c`           | The literal character `c`                      |
//! | `.`           | Any one character                              |
//! | `[abc]`       | One character from the set                     |
//! | `[a-z]`       | One character in the range (inclusive)         |
//! | `[^…]`        | One character not in the set                   |
//! | `\d` `\w` `\s`| Digit, word, whitespace character              |
//! | `\D` `\W` `\S`| Their complements                              |
//! | `\n` `\t` …   | Control characters                             |
//! | `\c`          | Literal `c`, for any other `c`                 |
//! | `(…)`         | Grouping                                       |
//! | `X*`          | Zero or more                                   |
//! | `X+`          | One or more                                    |
//! | `X?`          | Zero or one                                    |
//! | `X{n}`        | Exactly n                                      |
//! | `X{n,}`       | At least n                                     |
//! | `X{,m}`       | At most m                                      |
//! | `X{n,m}`      | Between n and m                                |
//! | `^`           | Start of subject (first character only)        |
//! | `$`           | End of subject (last character only)           |
//!
//! All quantifiers are greedy.

pub mod ast;
pub mod char_class;
pub mod compiled;
pub mod matcher;
pub mod parser;

pub use compiled::{CompileOptions, Pattern, compile, compile_with};
pub use matcher::{MatchResult, match_anchored};
pub use parser::{PatternSyntaxError, SyntaxErrorKind};
