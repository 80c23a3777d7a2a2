use std::{
    process::{ExitCode, Termination},
    time::Duration,
};

use crate::{formatter::FormatError, outcome::TestResult};

/// How one group fared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupOutcome<'t> {
    pub name: Option<&'t str>,
    pub origin_file: &'t str,
    /// Number of tests executed.
    pub tests: usize,
    pub result: TestResult,
    pub duration: Duration,
}

/// Everything a finished run produced, groups in execution order.
#[derive(Debug)]
#[non_exhaustive]
pub struct TestReport<'t, FmtError: 't> {
    pub outcomes: Vec<GroupOutcome<'t>>,
    pub total: TestResult,
    pub duration: Duration,
    pub fmt_errors: Vec<(FormatError, FmtError)>,
}

impl<'t, FmtError: 't> TestReport<'t, FmtError> {
    /// `1` if any check failed, success otherwise.
    pub fn exit_code(&self) -> ExitCode {
        match self.total.is_good() {
            true => ExitCode::SUCCESS,
            false => ExitCode::FAILURE,
        }
    }
}

impl<'t, FmtError: 't> Termination for TestReport<'t, FmtError> {
    fn report(self) -> ExitCode {
        self.exit_code()
    }
}
