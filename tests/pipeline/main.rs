use std::{
    cell::RefCell,
    io,
    rc::Rc,
    string::FromUtf8Error,
    sync::{Arc, Mutex},
};

use pretty_assertions::assert_eq;
use regex::Regex;
use topotest::{
    Error,
    formatter::{
        common::color::SupportsColor, no::NoFormatter, pretty::PrettyFormatter,
        terse::TerseFormatter,
    },
    group::GroupConfig,
    outcome::TestResult,
    plan::Plan,
    registry::Registry,
    test::{Scope, TestDescriptor},
};

#[derive(Debug)]
#[allow(dead_code)]
enum BufferError {
    Poison,
    FromUtf8(FromUtf8Error),
}

#[derive(Debug, Default, Clone)]
struct Buffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .0
            .lock()
            .map_err(|_| io::Error::other("poison error"))?;
        guard.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut guard = self
            .0
            .lock()
            .map_err(|_| io::Error::other("poison error"))?;
        guard.flush()
    }
}

impl SupportsColor for Buffer {
    fn supports_color(&self) -> bool {
        false
    }
}

impl Buffer {
    fn try_to_string(&self) -> Result<String, BufferError> {
        let guard = self.0.lock().map_err(|_| BufferError::Poison)?;
        String::from_utf8(guard.to_vec()).map_err(BufferError::FromUtf8)
    }
}

type Trace = Rc<RefCell<Vec<&'static str>>>;

/// A test that records its name in `trace` and one passing check.
fn traced(
    trace: &Trace,
    origin_file: &'static str,
    line: u32,
    name: &'static str,
) -> TestDescriptor {
    let trace = Rc::clone(trace);
    TestDescriptor::new(origin_file, line, move |scope: Scope<'_>| {
        trace.borrow_mut().push(name);
        scope.result.pass();
    })
    .with_name(name)
}

fn run_pretty(plan: &Plan) -> (TestResult, String) {
    let out = Buffer::default();
    let report = topotest::harness(plan)
        .with_formatter(PrettyFormatter::default().with_target(out.clone()))
        .run();
    assert!(report.fmt_errors.is_empty());
    (report.total, out.try_to_string().unwrap())
}

#[test]
fn chained_tests_run_in_dependency_order() {
    let trace = Trace::default();
    let registry = Registry::new(
        vec![
            traced(&trace, "chain.rs", 30, "third")
                .with_depends_on(["second"]),
            traced(&trace, "chain.rs", 20, "second")
                .with_depends_on(["first"]),
            traced(&trace, "chain.rs", 10, "first"),
        ],
        Vec::new(),
    );
    let plan = Plan::new(registry).unwrap();
    let report = topotest::harness(&plan).with_formatter(NoFormatter).run();

    assert_eq!(*trace.borrow(), ["first", "second", "third"]);
    assert_eq!(report.outcomes.len(), 1);
    assert_eq!(
        report.outcomes[0].result,
        TestResult {
            succeeded: 3,
            failed: 0,
        }
    );
}

#[test]
fn dependent_group_runs_and_reports_last() {
    let trace = Trace::default();
    let registry = Registry::new(
        vec![
            traced(&trace, "a_foo.rs", 1, "in_foo"),
            traced(&trace, "b_bar.rs", 1, "in_bar"),
        ],
        vec![
            GroupConfig::new("a_foo.rs")
                .with_name("foo")
                .with_depends_on(["bar"]),
            GroupConfig::new("b_bar.rs").with_name("bar"),
        ],
    );
    // `a_foo.rs` sorts first, only the dependency moves it behind `b_bar.rs`.
    let plan = Plan::new(registry).unwrap();
    let (total, output) = run_pretty(&plan);

    assert_eq!(*trace.borrow(), ["in_bar", "in_foo"]);
    assert_eq!(
        total,
        TestResult {
            succeeded: 2,
            failed: 0,
        }
    );
    assert_eq!(
        output,
        "
running 2 tests in 2 groups

group bar (b_bar.rs)
test in_bar ... ok

group foo (a_foo.rs)
test in_foo ... ok

Group bar: 1 succeeded, 0 failed in total 1 tests.
Group foo: 1 succeeded, 0 failed in total 1 tests.
Total: 2 succeeded, 0 failed in total 2 tests.

"
    );
}

#[test]
fn unknown_dependency_keeps_sorted_position() {
    let trace = Trace::default();
    let registry = Registry::new(
        vec![
            traced(&trace, "a.rs", 3, "c"),
            traced(&trace, "a.rs", 2, "b")
                .with_depends_on(["nonexistent"]),
            traced(&trace, "a.rs", 1, "a"),
        ],
        Vec::new(),
    );
    let plan = Plan::new(registry).unwrap();
    topotest::harness(&plan).with_formatter(NoFormatter).run();

    assert_eq!(*trace.borrow(), ["a", "b", "c"]);
}

#[test]
fn group_cycle_aborts_before_running() {
    let trace = Trace::default();
    let registry = Registry::new(
        vec![
            traced(&trace, "x.rs", 1, "in_x"),
            traced(&trace, "y.rs", 1, "in_y"),
        ],
        vec![
            GroupConfig::new("x.rs")
                .with_name("X")
                .with_depends_on(["Y"]),
            GroupConfig::new("y.rs")
                .with_name("Y")
                .with_depends_on(["X"]),
        ],
    );

    let err = Plan::new(registry).unwrap_err();
    assert!(matches!(err, Error::GroupCycle { .. }));
    assert_eq!(
        err.to_string(),
        "detected circular dependency between groups: X (x.rs), Y (y.rs)"
    );
    assert!(trace.borrow().is_empty());
}

#[test]
fn test_cycle_names_the_file() {
    let trace = Trace::default();
    let registry = Registry::new(
        vec![
            traced(&trace, "loop.rs", 1, "ping")
                .with_depends_on(["pong"]),
            traced(&trace, "loop.rs", 2, "pong")
                .with_depends_on(["ping"]),
            traced(&trace, "fine.rs", 1, "fine"),
        ],
        Vec::new(),
    );

    let err = Plan::new(registry).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("`loop.rs`"), "{message}");
    assert!(trace.borrow().is_empty());
}

#[test]
fn groups_stay_contiguous() {
    let trace = Trace::default();
    let registry = Registry::new(
        vec![
            traced(&trace, "b.rs", 1, "b1"),
            traced(&trace, "a.rs", 1, "a1"),
            traced(&trace, "b.rs", 2, "b2"),
            traced(&trace, "c.rs", 1, "c1"),
            traced(&trace, "a.rs", 2, "a2"),
        ],
        vec![GroupConfig::new("a.rs").with_depends_on(["never declared"])],
    );
    let plan = Plan::new(registry).unwrap();

    let files: Vec<_> = plan.tests().map(|test| &*test.origin_file).collect();
    assert_eq!(files, ["a.rs", "a.rs", "b.rs", "b.rs", "c.rs"]);
    for group in plan.groups() {
        assert!(
            group
                .tests()
                .iter()
                .all(|test| test.origin_file == group.config().origin_file)
        );
    }
}

#[test]
fn fixtures_scope_groups_and_tests() {
    let trace = Trace::default();
    let push = |entry: &'static str| {
        let trace = Rc::clone(&trace);
        move || trace.borrow_mut().push(entry)
    };

    let group = GroupConfig::new("db.rs")
        .with_name("db")
        .with_setup({
            let push = push("open");
            move || {
                push();
                vec![String::from("row")]
            }
        })
        .with_teardown({
            let push = push("close");
            move |_: Vec<String>| push()
        });

    let reads = TestDescriptor::scoped("db.rs", 1, |scope: Scope<'_, u32, Vec<String>>| {
        let rows = scope.group_ctx.map(Vec::len);
        scope.result.record(rows == Some(1));
        scope.result.record(scope.ctx.is_none());
    })
    .with_name("reads");

    let writes = TestDescriptor::scoped("db.rs", 2, {
        let trace = Rc::clone(&trace);
        move |scope: Scope<'_, u32, Vec<String>>| {
            trace.borrow_mut().push("writes");
            let Some(ctx) = scope.ctx else {
                scope.result.fail();
                return;
            };
            *ctx += 1;
            scope.result.record(*ctx == 42);
        }
    })
    .with_name("writes")
    .with_depends_on(["reads"])
    .with_setup({
        let push = push("begin");
        move || {
            push();
            41u32
        }
    })
    .with_teardown({
        let push = push("commit");
        move |ctx: u32| {
            assert_eq!(ctx, 42);
            push();
        }
    });

    let plan = Plan::new(Registry::new(vec![writes, reads], vec![group])).unwrap();
    let (total, _) = run_pretty(&plan);

    assert_eq!(
        *trace.borrow(),
        ["open", "begin", "writes", "commit", "close"]
    );
    assert_eq!(
        total,
        TestResult {
            succeeded: 3,
            failed: 0,
        }
    );
}

#[test]
fn failures_are_reported_not_fatal() {
    let trace = Trace::default();
    let failing = TestDescriptor::new("a.rs", 1, |scope| {
        scope.result.pass();
        scope.result.fail();
    })
    .with_name("broken");
    let registry = Registry::new(
        vec![
            failing,
            traced(&trace, "a.rs", 2, "still runs"),
            traced(&trace, "b.rs", 1, "later"),
        ],
        vec![GroupConfig::new("b.rs").with_name("b")],
    );
    let plan = Plan::new(registry).unwrap();
    let (total, output) = run_pretty(&plan);

    assert_eq!(*trace.borrow(), ["still runs", "later"]);
    assert!(total.is_bad());
    assert!(output.contains("test broken ... FAILED\n"), "{output}");
    assert!(output.contains("test still runs ... ok\n"), "{output}");

    let summary = Regex::new(concat!(
        r"(?m)^Group \(no name\): 2 succeeded, 1 failed in total 3 tests\.\n",
        r"Group b: 1 succeeded, 0 failed in total 1 tests\.\n",
        r"Total: 3 succeeded, 1 failed in total 4 tests\.$",
    ))
    .unwrap();
    assert!(summary.is_match(&output), "{output}");
}

#[test]
fn terse_output_marks_each_test() {
    let trace = Trace::default();
    let failing = TestDescriptor::new("a.rs", 3, |scope| {
        scope.result.fail();
    });
    let registry = Registry::new(
        vec![
            traced(&trace, "a.rs", 1, "one"),
            traced(&trace, "a.rs", 2, "two"),
            failing,
        ],
        vec![GroupConfig::new("a.rs").with_name("alpha")],
    );
    let plan = Plan::new(registry).unwrap();

    let out = Buffer::default();
    let report = topotest::harness(&plan)
        .with_formatter(TerseFormatter::default().with_target(out.clone()))
        .run();
    let output = out.try_to_string().unwrap();

    assert!(report.fmt_errors.is_empty());
    assert_eq!(
        output,
        "
running 3 tests
..F

failures:
    (no name) at a.rs:3 (alpha)

Group alpha: 2 succeeded, 1 failed in total 3 tests.
Total: 2 succeeded, 1 failed in total 3 tests.

"
    );
}

#[test]
fn listing_shows_the_plan() {
    let trace = Trace::default();
    let registry = Registry::new(
        vec![
            traced(&trace, "foo.rs", 1, "in_foo"),
            traced(&trace, "bar.rs", 7, "in_bar"),
        ],
        vec![
            GroupConfig::new("foo.rs")
                .with_name("foo")
                .with_depends_on(["bar"]),
        ],
    );
    let plan = Plan::new(registry).unwrap();

    let out = Buffer::default();
    let errors = topotest::harness(&plan)
        .with_formatter(PrettyFormatter::default().with_target(out.clone()))
        .list();

    assert!(errors.is_empty());
    assert!(trace.borrow().is_empty());
    assert_eq!(
        out.try_to_string().unwrap(),
        "\
(no name) (bar.rs): group
    in_bar: test
foo (foo.rs): group, depends on bar
    in_foo: test

2 tests in 2 groups
"
    );
}
