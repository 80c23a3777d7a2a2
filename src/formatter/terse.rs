use std::io;

use crate::formatter::{
    common::{
        color::{ColorSetting, SupportsColor, colors::*},
        fto::{Counts, TestVerdict},
        label::TestLabel,
        plural, write_summary,
    },
    *,
};

/// A compact formatter, one character per test.
///
/// Failing tests are listed with their group before the summary.
#[derive(Debug)]
pub struct TerseFormatter<W: io::Write> {
    target: W,
    color_setting: ColorSetting,
    failures: Vec<String>,
}

impl Default for TerseFormatter<io::Stderr> {
    fn default() -> Self {
        Self {
            target: io::stderr(),
            color_setting: Default::default(),
            failures: Vec::new(),
        }
    }
}

impl<W: io::Write> TerseFormatter<W> {
    pub fn with_target<WithTarget: io::Write>(
        self,
        with_target: WithTarget,
    ) -> TerseFormatter<WithTarget> {
        TerseFormatter {
            target: with_target,
            color_setting: self.color_setting,
            failures: self.failures,
        }
    }

    pub fn with_color_setting(self, color_setting: impl Into<ColorSetting>) -> Self {
        TerseFormatter {
            color_setting: color_setting.into(),
            ..self
        }
    }
}

impl<W: io::Write + SupportsColor> TerseFormatter<W> {
    /// Return whether this formatter will currently emit colored output.
    pub fn use_color(&self) -> bool {
        self.color_setting.use_color(&self.target)
    }
}

impl<'t, W: io::Write + Send + SupportsColor> TestFormatter<'t> for TerseFormatter<W> {
    type Error = io::Error;

    type RunStart = Counts;
    fn fmt_run_start(&mut self, data: Self::RunStart) -> Result<(), Self::Error> {
        writeln!(self.target, "\nrunning {}", plural(data.tests, "test"))
    }

    type TestOutcome = TestVerdict<'t>;
    fn fmt_test_outcome(&mut self, data: Self::TestOutcome) -> Result<(), Self::Error> {
        if data.failed {
            let failure = format!("{} ({})", data.label, data.group);
            self.failures.push(failure);
        }

        match (data.failed, self.use_color()) {
            (false, false) => write!(self.target, "."),
            (false, true) => write!(self.target, "{GREEN}.{RESET}"),
            (true, false) => write!(self.target, "F"),
            (true, true) => write!(self.target, "{RED}F{RESET}"),
        }
    }

    type RunOutcomes = FmtRunOutcomes<'t>;
    fn fmt_run_outcomes(&mut self, data: Self::RunOutcomes) -> Result<(), Self::Error> {
        writeln!(self.target)?;

        if !self.failures.is_empty() {
            writeln!(self.target, "\nfailures:")?;
            for failure in self.failures.drain(..) {
                writeln!(self.target, "    {failure}")?;
            }
        }

        writeln!(self.target)?;
        write_summary(&mut self.target, &data.outcomes, data.total)?;
        writeln!(self.target)
    }

    type GroupStart = ();
    type TestStart = ();
    type GroupOutcome = ();
}

impl<'t, W: io::Write> TestListFormatter<'t> for TerseFormatter<W> {
    type Error = io::Error;

    type ListTest = TestLabel<'t>;
    fn fmt_list_test(&mut self, data: Self::ListTest) -> Result<(), Self::Error> {
        writeln!(self.target, "{data}: test")
    }

    type InitListing = ();
    type ListGroup = ();
    type EndListing = ();
}
