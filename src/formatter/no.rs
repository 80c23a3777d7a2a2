use crate::formatter::*;

/// A formatter that produces no output.
///
/// `NoFormatter` implements the formatter and list formatter traits but
/// discards every event. Useful when only the [`TestReport`](crate::TestReport)
/// matters, for example when embedding the harness into another reporter.
#[derive(Debug, Default, Clone)]
pub struct NoFormatter;

macro_rules! impl_unit_from {
    [$($name:ident$(<$($generic:tt),*>)?),* $(,)?] => {$(
        impl$(<$($generic),*>)? From<$name$(<$($generic),*>)?> for () {
            fn from(_: $name$(<$($generic),*>)?) -> () {}
        })*
    };
}

impl_unit_from![
    FmtRunStart,
    FmtGroupStart<'t>,
    FmtTestStart<'t>,
    FmtTestOutcome<'t>,
    FmtGroupOutcome<'t>,
    FmtRunOutcomes<'t>,
    FmtInitListing,
    FmtListGroup<'t>,
    FmtListTest<'t>,
    FmtEndListing,
];

impl<'t> TestFormatter<'t> for NoFormatter {
    type Error = ();
    type RunStart = ();
    type GroupStart = ();
    type TestStart = ();
    type TestOutcome = ();
    type GroupOutcome = ();
    type RunOutcomes = ();
}

impl<'t> TestListFormatter<'t> for NoFormatter {
    type Error = ();
    type InitListing = ();
    type ListGroup = ();
    type ListTest = ();
    type EndListing = ();
}
