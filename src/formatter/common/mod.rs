//! Common helpers for formatter implementations.
//!
//! Small helper types that are convenient when implementing topotest
//! formatters. They are formatter focused and not meant as general purpose
//! building blocks.

use std::io;

use crate::{formatter::common::label::GroupLabel, outcome::TestResult, report::GroupOutcome};

pub mod color;
pub mod fto;
pub mod label;

/// Write the closing report: one line per group, then the total.
///
/// ```text
/// Group bar: 1 succeeded, 0 failed in total 1 tests.
/// Group (no name): 2 succeeded, 1 failed in total 3 tests.
/// Total: 3 succeeded, 1 failed in total 4 tests.
/// ```
pub fn write_summary(
    target: &mut impl io::Write,
    outcomes: &[GroupOutcome<'_>],
    total: TestResult,
) -> io::Result<()> {
    for outcome in outcomes {
        writeln!(
            target,
            "Group {}: {}",
            GroupLabel(outcome.name),
            Counted(outcome.result)
        )?;
    }
    writeln!(target, "Total: {}", Counted(total))
}

struct Counted(TestResult);

impl std::fmt::Display for Counted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} succeeded, {} failed in total {} tests.",
            self.0.succeeded,
            self.0.failed,
            self.0.total()
        )
    }
}

/// `1 test`, `2 tests` and the like.
pub(crate) fn plural(count: usize, noun: &str) -> String {
    match count {
        1 => format!("1 {noun}"),
        count => format!("{count} {noun}s"),
    }
}
