use std::{panic, thread, time::Instant};

use crossbeam_channel::Sender;

use crate::{
    TestReport,
    formatter::*,
    outcome::TestResult,
    plan::{Plan, PlannedGroup},
    report::GroupOutcome,
    test::ErasedScope,
};

use super::{FmtErrors, named_fmt};

/// Events buffered between the test thread and the formatter thread.
const FORMAT_QUEUE: usize = 16;

pub struct TestHarness<'t, Formatter> {
    pub(crate) plan: &'t Plan,
    pub(crate) formatter: Formatter,
}

enum FmtEvent<'t, F: TestFormatter<'t>> {
    GroupStart(F::GroupStart),
    TestStart(F::TestStart),
    TestOutcome(F::TestOutcome),
    GroupOutcome(F::GroupOutcome),
}

impl<'t, Formatter: TestFormatter<'t> + 't> TestHarness<'t, Formatter> {
    /// Execute the plan.
    ///
    /// Groups and tests run one after another on the calling thread, in plan
    /// order. Failing checks never stop the run, they only show up in the
    /// report.
    pub fn run(self) -> TestReport<'t, Formatter::Error> {
        let now = Instant::now();
        let plan = self.plan;

        let mut formatter = self.formatter;
        let mut fmt_errors = Vec::new();
        fmt_errors.push_on_error(named_fmt!(
            formatter.fmt_run_start(
                FmtRunStart {
                    groups: plan.groups().len(),
                    tests: plan.test_count(),
                }
                .into()
            )
        ));

        let (outcomes, mut formatter, mut fmt_errors) = thread::scope(move |scope| {
            let (ftx, frx) = crossbeam_channel::bounded(FORMAT_QUEUE);
            let fmt_thread = scope.spawn(move || {
                while let Ok(event) = frx.recv() {
                    fmt_errors.push_on_error(match event {
                        FmtEvent::GroupStart(data) => named_fmt!(formatter.fmt_group_start(data)),
                        FmtEvent::TestStart(data) => named_fmt!(formatter.fmt_test_start(data)),
                        FmtEvent::TestOutcome(data) => named_fmt!(formatter.fmt_test_outcome(data)),
                        FmtEvent::GroupOutcome(data) => {
                            named_fmt!(formatter.fmt_group_outcome(data))
                        }
                    });
                }
                (formatter, fmt_errors)
            });

            let outcomes: Vec<_> = plan
                .groups()
                .iter()
                .map(|group| run_group::<Formatter>(group, &ftx))
                .collect();

            drop(ftx);
            let (formatter, fmt_errors) = match fmt_thread.join() {
                Ok(joined) => joined,
                Err(payload) => panic::resume_unwind(payload),
            };

            (outcomes, formatter, fmt_errors)
        });

        let total: TestResult = outcomes.iter().map(|outcome| &outcome.result).sum();
        let duration = now.elapsed();
        fmt_errors.push_on_error(named_fmt!(
            formatter.fmt_run_outcomes(
                FmtRunOutcomes {
                    outcomes: outcomes.clone(),
                    total,
                    duration,
                }
                .into()
            )
        ));

        tracing::debug!(
            succeeded = total.succeeded,
            failed = total.failed,
            ?duration,
            "run finished"
        );

        TestReport {
            outcomes,
            total,
            duration,
            fmt_errors,
        }
    }
}

/// Run one group inside its fixture scope.
fn run_group<'t, F: TestFormatter<'t>>(
    group: &'t PlannedGroup,
    ftx: &Sender<FmtEvent<'t, F>>,
) -> GroupOutcome<'t> {
    let started = Instant::now();
    let config = group.config();
    let tests = group.tests();

    let _ = ftx.send(FmtEvent::GroupStart(
        FmtGroupStart {
            name: config.name(),
            origin_file: &config.origin_file,
            tests: tests.len(),
        }
        .into(),
    ));

    let group_scope = config
        .fixture()
        .map(|(setup, teardown)| (setup.call(), teardown));
    tracing::trace!(
        group = ?config.name(),
        origin_file = %config.origin_file,
        fixture = group_scope.is_some(),
        "entering group"
    );

    let mut result = TestResult::new();
    for test in tests {
        let _ = ftx.send(FmtEvent::TestStart(
            FmtTestStart {
                name: test.name(),
                group: config.name(),
                origin_file: &test.origin_file,
                source_line: test.source_line,
            }
            .into(),
        ));

        let before = result;
        let test_started = Instant::now();
        let group_ctx = group_scope.as_ref().map(|(ctx, _)| &**ctx);
        match test.fixture() {
            Some((setup, teardown)) => {
                let mut ctx = setup.call();
                test.call(ErasedScope {
                    ctx: Some(&mut *ctx),
                    group_ctx,
                    test,
                    config,
                    result: &mut result,
                });
                teardown.call(ctx);
            }
            None => test.call(ErasedScope {
                ctx: None,
                group_ctx,
                test,
                config,
                result: &mut result,
            }),
        }

        let _ = ftx.send(FmtEvent::TestOutcome(
            FmtTestOutcome {
                name: test.name(),
                group: config.name(),
                origin_file: &test.origin_file,
                source_line: test.source_line,
                result: result.since(before),
                duration: test_started.elapsed(),
            }
            .into(),
        ));
    }

    if let Some((ctx, teardown)) = group_scope {
        teardown.call(ctx);
    }
    tracing::trace!(group = ?config.name(), "left group");

    let outcome = GroupOutcome {
        name: config.name(),
        origin_file: &config.origin_file,
        tests: tests.len(),
        result,
        duration: started.elapsed(),
    };
    let _ = ftx.send(FmtEvent::GroupOutcome(FmtGroupOutcome { outcome }.into()));
    outcome
}

impl<'t, Formatter: TestListFormatter<'t>> TestHarness<'t, Formatter> {
    /// Print the plan without running anything.
    pub fn list(self) -> Vec<(FormatError, Formatter::Error)> {
        let plan = self.plan;
        let mut formatter = self.formatter;
        let mut fmt_errors = Vec::new();
        fmt_errors.push_on_error(named_fmt!(
            formatter.fmt_init_listing(
                FmtInitListing {
                    groups: plan.groups().len(),
                    tests: plan.test_count(),
                }
                .into()
            )
        ));

        for group in plan.groups() {
            let config = group.config();
            fmt_errors.push_on_error(named_fmt!(
                formatter.fmt_list_group(
                    FmtListGroup {
                        name: config.name(),
                        origin_file: &config.origin_file,
                        depends_on: &config.depends_on,
                        tests: group.tests().len(),
                    }
                    .into()
                )
            ));

            for test in group.tests() {
                fmt_errors.push_on_error(named_fmt!(
                    formatter.fmt_list_test(
                        FmtListTest {
                            name: test.name(),
                            group: config.name(),
                            origin_file: &test.origin_file,
                            source_line: test.source_line,
                            depends_on: &test.depends_on,
                        }
                        .into()
                    )
                ));
            }
        }

        fmt_errors.push_on_error(named_fmt!(
            formatter.fmt_end_listing(
                FmtEndListing {
                    groups: plan.groups().len(),
                    tests: plan.test_count(),
                }
                .into()
            )
        ));

        fmt_errors
    }
}

impl<'t, Formatter> TestHarness<'t, Formatter> {
    pub fn with_formatter<WithFormatter>(
        self,
        formatter: WithFormatter,
    ) -> TestHarness<'t, WithFormatter> {
        TestHarness {
            plan: self.plan,
            formatter,
        }
    }
}
