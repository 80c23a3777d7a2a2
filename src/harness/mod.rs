mod run;
use std::io;

pub use run::TestHarness;

use crate::{formatter::pretty::PrettyFormatter, plan::Plan};

/// Start configuring a run over `plan`.
///
/// By default the run reports to stderr through a [`PrettyFormatter`].
pub fn harness(plan: &Plan) -> TestHarness<'_, PrettyFormatter<io::Stderr>> {
    TestHarness {
        plan,
        formatter: PrettyFormatter::default(),
    }
}

/// Pair a formatter call with the event it formats.
macro_rules! named_fmt {
    (@event fmt_run_start) => { $crate::formatter::FormatError::RunStart };
    (@event fmt_group_start) => { $crate::formatter::FormatError::GroupStart };
    (@event fmt_test_start) => { $crate::formatter::FormatError::TestStart };
    (@event fmt_test_outcome) => { $crate::formatter::FormatError::TestOutcome };
    (@event fmt_group_outcome) => { $crate::formatter::FormatError::GroupOutcome };
    (@event fmt_run_outcomes) => { $crate::formatter::FormatError::RunOutcomes };
    (@event fmt_init_listing) => { $crate::formatter::FormatError::InitListing };
    (@event fmt_list_group) => { $crate::formatter::FormatError::ListGroup };
    (@event fmt_list_test) => { $crate::formatter::FormatError::ListTest };
    (@event fmt_end_listing) => { $crate::formatter::FormatError::EndListing };

    ($formatter:ident.$method:ident($data:expr)) => {
        (named_fmt!(@event $method), $formatter.$method($data))
    };
}

pub(crate) use named_fmt;

pub(crate) trait FmtErrors<E> {
    fn push_on_error(&mut self, named: (crate::formatter::FormatError, Result<(), E>));
}

impl<E> FmtErrors<E> for Vec<(crate::formatter::FormatError, E)> {
    fn push_on_error(&mut self, (event, result): (crate::formatter::FormatError, Result<(), E>)) {
        if let Err(err) = result {
            self.push((event, err));
        }
    }
}
