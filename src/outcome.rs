use std::ops::{Add, AddAssign};

/// Check counters of one group.
///
/// Every test of a group receives the same `TestResult` through its
/// [`Scope`](crate::test::Scope) and records its checks on it.
/// The harness itself never looks at single checks, only at these counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TestResult {
    pub succeeded: u64,
    pub failed: u64,
}

impl TestResult {
    pub const fn new() -> Self {
        Self {
            succeeded: 0,
            failed: 0,
        }
    }

    /// Record a single check and return whether it passed.
    pub fn record(&mut self, passed: bool) -> bool {
        match passed {
            true => self.pass(),
            false => self.fail(),
        }
        passed
    }

    pub fn pass(&mut self) {
        self.succeeded += 1;
    }

    pub fn fail(&mut self) {
        self.failed += 1;
    }

    pub const fn total(&self) -> u64 {
        self.succeeded + self.failed
    }

    pub const fn is_good(&self) -> bool {
        self.failed == 0
    }

    pub const fn is_bad(&self) -> bool {
        !self.is_good()
    }

    /// The checks recorded since `earlier` was taken from the same counters.
    pub const fn since(&self, earlier: TestResult) -> TestResult {
        TestResult {
            succeeded: self.succeeded.saturating_sub(earlier.succeeded),
            failed: self.failed.saturating_sub(earlier.failed),
        }
    }
}

impl Add for TestResult {
    type Output = TestResult;

    fn add(self, rhs: Self) -> Self::Output {
        TestResult {
            succeeded: self.succeeded + rhs.succeeded,
            failed: self.failed + rhs.failed,
        }
    }
}

impl AddAssign for TestResult {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<'a> std::iter::Sum<&'a TestResult> for TestResult {
    fn sum<I: Iterator<Item = &'a TestResult>>(iter: I) -> Self {
        iter.fold(TestResult::new(), |acc, result| acc + *result)
    }
}
