//! Format transfer objects that are used by multiple formatters.

use std::borrow::Cow;

use crate::formatter::{
    common::label::{GroupLabel, TestLabel},
    *,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counts {
    pub groups: usize,
    pub tests: usize,
}

impl From<FmtRunStart> for Counts {
    fn from(value: FmtRunStart) -> Self {
        Counts {
            groups: value.groups,
            tests: value.tests,
        }
    }
}

impl From<FmtEndListing> for Counts {
    fn from(value: FmtEndListing) -> Self {
        Counts {
            groups: value.groups,
            tests: value.tests,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupHeader<'t> {
    pub label: GroupLabel<'t>,
    pub origin_file: &'t str,
    pub tests: usize,
}

impl<'t> From<FmtGroupStart<'t>> for GroupHeader<'t> {
    fn from(value: FmtGroupStart<'t>) -> Self {
        GroupHeader {
            label: GroupLabel(value.name),
            origin_file: value.origin_file,
            tests: value.tests,
        }
    }
}

/// The result of one test, reduced to whether it recorded a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestVerdict<'t> {
    pub label: TestLabel<'t>,
    pub group: GroupLabel<'t>,
    pub failed: bool,
}

impl<'t> From<FmtTestOutcome<'t>> for TestVerdict<'t> {
    fn from(value: FmtTestOutcome<'t>) -> Self {
        TestVerdict {
            label: TestLabel {
                name: value.name,
                origin_file: value.origin_file,
                source_line: value.source_line,
            },
            group: GroupLabel(value.group),
            failed: value.result.is_bad(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListedGroup<'t> {
    pub label: GroupLabel<'t>,
    pub origin_file: &'t str,
    pub depends_on: &'t [Cow<'static, str>],
}

impl<'t> From<FmtListGroup<'t>> for ListedGroup<'t> {
    fn from(value: FmtListGroup<'t>) -> Self {
        ListedGroup {
            label: GroupLabel(value.name),
            origin_file: value.origin_file,
            depends_on: value.depends_on,
        }
    }
}

impl<'t> From<FmtListTest<'t>> for TestLabel<'t> {
    fn from(value: FmtListTest<'t>) -> Self {
        TestLabel {
            name: value.name,
            origin_file: value.origin_file,
            source_line: value.source_line,
        }
    }
}
