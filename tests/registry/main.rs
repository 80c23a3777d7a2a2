use linkme::distributed_slice;
use pretty_assertions::assert_eq;
use topotest::{
    DiscoveryError,
    group::GroupConfig,
    plan::Plan,
    registry::{GROUPS, GroupAccessor, Registry, SymbolDiscovery, TESTS, TestAccessor},
    test::TestDescriptor,
};

#[unsafe(no_mangle)]
#[inline(never)]
pub fn topotest_test_connects() -> TestDescriptor {
    TestDescriptor::new(file!(), line!(), |scope| {
        scope.result.pass();
    })
    .with_name("connects")
}

#[unsafe(no_mangle)]
#[inline(never)]
pub fn topotest_test_queries() -> TestDescriptor {
    TestDescriptor::new(file!(), line!(), |scope| {
        scope.result.pass();
        scope.result.pass();
    })
    .with_name("queries")
    .with_depends_on(["connects"])
}

#[unsafe(no_mangle)]
#[inline(never)]
pub fn topotest_group_registry() -> GroupConfig {
    GroupConfig::new(file!()).with_name("registry")
}

#[distributed_slice(TESTS)]
static CONNECTS: TestAccessor = topotest_test_connects;

#[distributed_slice(TESTS)]
static QUERIES: TestAccessor = topotest_test_queries;

#[distributed_slice(GROUPS)]
static REGISTRY: GroupAccessor = topotest_group_registry;

fn sorted_names(registry: &Registry) -> Vec<String> {
    let mut names: Vec<_> = registry
        .tests
        .iter()
        .filter_map(|test| test.name().map(str::to_owned))
        .collect();
    names.sort();
    names
}

#[test]
fn collect_materializes_every_registration() {
    let registry = Registry::collect();

    assert_eq!(sorted_names(&registry), ["connects", "queries"]);
    assert_eq!(registry.groups.len(), 1);
    assert_eq!(registry.groups[0].name(), Some("registry"));
}

#[test]
fn collected_tests_plan_and_run() {
    let plan = Plan::new(Registry::collect()).unwrap();
    let order: Vec<_> = plan.tests().map(|test| test.name()).collect();
    assert_eq!(order, [Some("connects"), Some("queries")]);

    let report = topotest::harness(&plan)
        .with_formatter(topotest::formatter::no::NoFormatter)
        .run();
    assert_eq!(report.outcomes.len(), 1);
    assert_eq!(report.outcomes[0].name, Some("registry"));
    assert_eq!(report.total.succeeded, 3);
    assert!(report.total.is_good());
}

#[test]
fn discovery_finds_exported_accessors() {
    let registry = match Registry::discover(&SymbolDiscovery::default()) {
        Ok(registry) => registry,
        // No symbol dump tool on this machine.
        Err(DiscoveryError::Spawn { .. } | DiscoveryError::ToolFailed { .. }) => return,
        Err(err) => panic!("discovery failed: {err}"),
    };

    assert_eq!(sorted_names(&registry), ["connects", "queries"]);
    assert_eq!(registry.groups.len(), 1);
}
