//! Turning harness events into output.
//!
//! The harness describes every step of a run with a small `Fmt*` value and
//! hands it to a [`TestFormatter`]. Formatters do not consume these values
//! directly. Each formatter method takes an associated type that only needs to
//! implement `From` for the matching `Fmt*` value, so a formatter picks exactly
//! the data it cares about and `()` for the events it ignores.
//!
//! Formatting runs on its own thread while the tests run, which is why the
//! formatter and its event types have to be [`Send`].

use std::{borrow::Cow, time::Duration};

use crate::{outcome::TestResult, report::GroupOutcome};

pub mod common;
pub mod no;
pub mod pretty;
pub mod terse;

/// The formatter event that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatError {
    RunStart,
    GroupStart,
    TestStart,
    TestOutcome,
    GroupOutcome,
    RunOutcomes,
    InitListing,
    ListGroup,
    ListTest,
    EndListing,
}

pub trait TestFormatter<'t>: Send {
    type Error: Send + 't;

    type RunStart: From<FmtRunStart>;
    fn fmt_run_start(&mut self, data: Self::RunStart) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }

    type GroupStart: From<FmtGroupStart<'t>> + Send;
    fn fmt_group_start(&mut self, data: Self::GroupStart) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }

    type TestStart: From<FmtTestStart<'t>> + Send;
    fn fmt_test_start(&mut self, data: Self::TestStart) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }

    type TestOutcome: From<FmtTestOutcome<'t>> + Send;
    fn fmt_test_outcome(&mut self, data: Self::TestOutcome) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }

    type GroupOutcome: From<FmtGroupOutcome<'t>> + Send;
    fn fmt_group_outcome(&mut self, data: Self::GroupOutcome) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }

    type RunOutcomes: From<FmtRunOutcomes<'t>>;
    fn fmt_run_outcomes(&mut self, data: Self::RunOutcomes) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }
}

pub trait TestListFormatter<'t> {
    type Error: 't;

    type InitListing: From<FmtInitListing>;
    fn fmt_init_listing(&mut self, data: Self::InitListing) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }

    type ListGroup: From<FmtListGroup<'t>>;
    fn fmt_list_group(&mut self, data: Self::ListGroup) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }

    type ListTest: From<FmtListTest<'t>>;
    fn fmt_list_test(&mut self, data: Self::ListTest) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }

    type EndListing: From<FmtEndListing>;
    fn fmt_end_listing(&mut self, data: Self::EndListing) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct FmtRunStart {
    pub groups: usize,
    pub tests: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct FmtGroupStart<'t> {
    pub name: Option<&'t str>,
    pub origin_file: &'t str,
    pub tests: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct FmtTestStart<'t> {
    pub name: Option<&'t str>,
    pub group: Option<&'t str>,
    pub origin_file: &'t str,
    pub source_line: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct FmtTestOutcome<'t> {
    pub name: Option<&'t str>,
    pub group: Option<&'t str>,
    pub origin_file: &'t str,
    pub source_line: u32,
    /// Checks this test recorded on its group.
    pub result: TestResult,
    pub duration: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct FmtGroupOutcome<'t> {
    pub outcome: GroupOutcome<'t>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct FmtRunOutcomes<'t> {
    pub outcomes: Vec<GroupOutcome<'t>>,
    pub total: TestResult,
    pub duration: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct FmtInitListing {
    pub groups: usize,
    pub tests: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct FmtListGroup<'t> {
    pub name: Option<&'t str>,
    pub origin_file: &'t str,
    pub depends_on: &'t [Cow<'static, str>],
    pub tests: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct FmtListTest<'t> {
    pub name: Option<&'t str>,
    pub group: Option<&'t str>,
    pub origin_file: &'t str,
    pub source_line: u32,
    pub depends_on: &'t [Cow<'static, str>],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct FmtEndListing {
    pub groups: usize,
    pub tests: usize,
}
