//! Two groups in one file, `foo` depending on `bar`, with a chain of tests.
//!
//! Run with `RUST_LOG=topotest=debug` to see how the plan is built.

use std::process::ExitCode;

use linkme::distributed_slice;
use topotest::{
    group::GroupConfig,
    plan::Plan,
    registry::{GROUPS, GroupAccessor, Registry, TESTS, TestAccessor},
    test::{Scope, TestDescriptor},
};
use tracing_subscriber::EnvFilter;

const FOO: i64 = 1;
const BAR: i64 = 2;

#[distributed_slice(GROUPS)]
static FOO_GROUP: GroupAccessor = || {
    GroupConfig::new(file!())
        .with_unique_id(FOO)
        .with_name("foo")
        .with_depends_on(["bar"])
};

#[distributed_slice(GROUPS)]
static BAR_GROUP: GroupAccessor = || {
    GroupConfig::new(file!())
        .with_unique_id(BAR)
        .with_name("bar")
        .with_setup(|| String::from("hello world"))
        .with_teardown(|greeting: String| println!("bar is done with {greeting:?}"))
};

#[distributed_slice(TESTS)]
static FIRST: TestAccessor = || {
    TestDescriptor::new(file!(), line!(), |scope| {
        scope.result.record(0 == 0);
    })
    .with_unique_id(FOO)
    .with_name("first test")
};

#[distributed_slice(TESTS)]
static SECOND: TestAccessor = || {
    TestDescriptor::new(file!(), line!(), |scope| {
        let i = 0;
        scope.result.record(i == 0);
        if !scope.result.record(i == 1) {
            eprintln!("i = {i}");
        }
    })
    .with_unique_id(FOO)
    .with_name("second test")
    .with_depends_on(["first test"])
};

#[distributed_slice(TESTS)]
static THIRD: TestAccessor = || {
    TestDescriptor::new(file!(), line!(), |scope| {
        let hello: Option<&str> = Some("hello world");
        if !scope.result.record(hello.is_none()) {
            eprintln!("{hello:?}, {:02x?}", hello.map(str::as_bytes));
        }
    })
    .with_unique_id(FOO)
    .with_name("third test")
    .with_depends_on(["second test"])
};

#[distributed_slice(TESTS)]
static GREETS: TestAccessor = || {
    TestDescriptor::scoped(file!(), line!(), |scope: Scope<'_, (), String>| {
        let greeting = scope.group_ctx.map(String::as_str);
        scope.result.record(greeting == Some("hello world"));
    })
    .with_unique_id(BAR)
    .with_name("greets")
};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let plan = match Plan::new(Registry::collect()) {
        Ok(plan) => plan,
        Err(err) => {
            eprintln!("error: {err}");
            return err.exit_code();
        }
    };

    topotest::harness(&plan).run().exit_code()
}
