use std::io;

use crate::formatter::{
    common::{
        color::{ColorSetting, SupportsColor, colors::*},
        fto::{Counts, GroupHeader, ListedGroup, TestVerdict},
        label::TestLabel,
        plural, write_summary,
    },
    *,
};

/// The default formatter, one line per test, grouped under a header per group.
///
/// ```text
/// running 3 tests in 2 groups
///
/// group bar (bar.rs)
/// test connects ... ok
///
/// group foo (foo.rs)
/// test reads ... ok
/// test writes ... FAILED
///
/// Group bar: 1 succeeded, 0 failed in total 1 tests.
/// Group foo: 3 succeeded, 1 failed in total 4 tests.
/// Total: 4 succeeded, 1 failed in total 5 tests.
/// ```
#[derive(Debug)]
pub struct PrettyFormatter<W: io::Write> {
    target: W,
    color_setting: ColorSetting,
}

impl Default for PrettyFormatter<io::Stderr> {
    fn default() -> Self {
        Self {
            target: io::stderr(),
            color_setting: Default::default(),
        }
    }
}

impl<W: io::Write> PrettyFormatter<W> {
    pub fn with_target<WithTarget: io::Write>(
        self,
        with_target: WithTarget,
    ) -> PrettyFormatter<WithTarget> {
        PrettyFormatter {
            target: with_target,
            color_setting: self.color_setting,
        }
    }

    pub fn with_color_setting(self, color_setting: impl Into<ColorSetting>) -> Self {
        PrettyFormatter {
            color_setting: color_setting.into(),
            ..self
        }
    }

    pub fn target(&self) -> &W {
        &self.target
    }
}

impl<W: io::Write + SupportsColor> PrettyFormatter<W> {
    /// Return whether this formatter will currently emit colored output.
    pub fn use_color(&self) -> bool {
        self.color_setting.use_color(&self.target)
    }
}

impl<'t, W: io::Write + Send + SupportsColor> TestFormatter<'t> for PrettyFormatter<W> {
    type Error = io::Error;

    type RunStart = Counts;
    fn fmt_run_start(&mut self, data: Self::RunStart) -> Result<(), Self::Error> {
        writeln!(
            self.target,
            "\nrunning {} in {}",
            plural(data.tests, "test"),
            plural(data.groups, "group")
        )
    }

    type GroupStart = GroupHeader<'t>;
    fn fmt_group_start(&mut self, data: Self::GroupStart) -> Result<(), Self::Error> {
        writeln!(self.target, "\ngroup {} ({})", data.label, data.origin_file)
    }

    type TestOutcome = TestVerdict<'t>;
    fn fmt_test_outcome(&mut self, data: Self::TestOutcome) -> Result<(), Self::Error> {
        write!(self.target, "test {} ... ", data.label)?;
        match (data.failed, self.use_color()) {
            (false, false) => writeln!(self.target, "ok"),
            (false, true) => writeln!(self.target, "{GREEN}ok{RESET}"),
            (true, false) => writeln!(self.target, "FAILED"),
            (true, true) => writeln!(self.target, "{RED}FAILED{RESET}"),
        }
    }

    type RunOutcomes = FmtRunOutcomes<'t>;
    fn fmt_run_outcomes(&mut self, data: Self::RunOutcomes) -> Result<(), Self::Error> {
        writeln!(self.target)?;
        write_summary(&mut self.target, &data.outcomes, data.total)?;
        writeln!(self.target)
    }

    type TestStart = ();
    type GroupOutcome = ();
}

impl<'t, W: io::Write> TestListFormatter<'t> for PrettyFormatter<W> {
    type Error = io::Error;

    type ListGroup = ListedGroup<'t>;
    fn fmt_list_group(&mut self, data: Self::ListGroup) -> Result<(), Self::Error> {
        write!(self.target, "{} ({}): group", data.label, data.origin_file)?;
        if !data.depends_on.is_empty() {
            write!(self.target, ", depends on {}", data.depends_on.join(", "))?;
        }
        writeln!(self.target)
    }

    type ListTest = TestLabel<'t>;
    fn fmt_list_test(&mut self, data: Self::ListTest) -> Result<(), Self::Error> {
        writeln!(self.target, "    {data}: test")
    }

    type EndListing = Counts;
    fn fmt_end_listing(&mut self, data: Self::EndListing) -> Result<(), Self::Error> {
        writeln!(
            self.target,
            "\n{} in {}",
            plural(data.tests, "test"),
            plural(data.groups, "group")
        )
    }

    type InitListing = ();
}
