//! Built-in demonstration: a fixed table of patterns and subjects.

use crate::pattern::{MatchResult, PatternSyntaxError, compile};

pub struct DemoCase {
    pub label: &'static str,
    pub pattern: &'static str,
    pub subject: &'static str,
    /// Expected end of the matched span, or `None` for no match.
    pub expected_end: Option<usize>,
}

pub const CASES: &[DemoCase] = &[
    DemoCase {
        label: "Match-1",
        pattern: "col.r",
        subject: "color ",
        expected_end: Some(5),
    },
    DemoCase {
        label: "Match-2",
        pattern: "^colo..r$",
        subject: "coloaar",
        expected_end: Some(7),
    },
    DemoCase {
        label: "Match-3",
        pattern: "a*",
        subject: "color",
        expected_end: Some(0),
    },
    DemoCase {
        label: "Match-4",
        pattern: "a+",
        subject: "aaaaacolor",
        expected_end: Some(5),
    },
    DemoCase {
        label: "Match-5",
        pattern: "(ab)*",
        subject: "aaaaacolor",
        expected_end: Some(0),
    },
    DemoCase {
        label: "Match-6",
        pattern: "ice(-)?cream",
        subject: "icecream",
        expected_end: Some(8),
    },
    DemoCase {
        label: "Match-7",
        pattern: "a{1,3}$",
        subject: "aaa",
        expected_end: Some(3),
    },
    DemoCase {
        label: "Match-8",
        pattern: "[aeiou]",
        subject: "aaa",
        expected_end: Some(1),
    },
    DemoCase {
        label: "Match-9",
        pattern: "[A-Z][a-z][0-9]",
        subject: "Aa9",
        expected_end: Some(3),
    },
];

/// One executed demo case.
pub struct DemoOutcome {
    pub case: &'static DemoCase,
    pub result: MatchResult,
}

impl DemoOutcome {
    /// True when the result agrees with the table.
    pub fn as_expected(&self) -> bool {
        self.result.span().map(|span| span.end) == self.case.expected_end
    }
}

/// Compile and run every case in [`CASES`].
pub fn run() -> Result<Vec<DemoOutcome>, PatternSyntaxError> {
    CASES
        .iter()
        .map(|case| {
            let pattern = compile(case.pattern)?;
            Ok(DemoOutcome {
                case,
                result: pattern.match_anchored(case.subject),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_cases_behave_as_listed() {
        let outcomes = run().unwrap();
        assert_eq!(outcomes.len(), CASES.len());
        for outcome in &outcomes {
            assert!(
                outcome.as_expected(),
                "{} ({:?} against {:?}) gave {:?}",
                outcome.case.label,
                outcome.case.pattern,
                outcome.case.subject,
                outcome.result
            );
        }
    }

    #[test]
    fn every_case_matches() {
        assert!(run().unwrap().iter().all(|o| o.result.success));
    }
}
