//! From registered tests to an execution plan.
//!
//! [`Plan::new`] runs the whole pipeline:
//!
//! 1. sort tests and configurations by group ([`index`]),
//! 2. align exactly one configuration with each group ([`compensate`]),
//! 3. order the tests inside every group ([`resolve::order_tests`]),
//! 4. order the groups ([`resolve::order_groups`]).
//!
//! The first cycle found aborts planning, nothing is scheduled partially.

use crate::{error::Error, group::GroupConfig, registry::Registry, test::TestDescriptor};

pub mod compensate;
pub mod index;
pub mod resolve;

use index::FileIndex;
use resolve::Cycle;

/// Shown wherever an absent name is printed.
pub const NO_NAME: &str = "(no name)";

/// Groups in execution order, each with its tests in execution order.
#[derive(Debug)]
pub struct Plan {
    groups: Vec<PlannedGroup>,
}

#[derive(Debug)]
pub struct PlannedGroup {
    config: GroupConfig,
    tests: Vec<TestDescriptor>,
}

impl PlannedGroup {
    pub fn config(&self) -> &GroupConfig {
        &self.config
    }

    pub fn tests(&self) -> &[TestDescriptor] {
        &self.tests
    }

    pub fn name(&self) -> Option<&str> {
        self.config.name()
    }
}

impl Plan {
    pub fn new(registry: Registry) -> Result<Self, Error> {
        let Registry {
            mut tests,
            groups: mut configs,
        } = registry;

        index::sort_tests(&mut tests);
        index::sort_configs(&mut configs);
        let file_index = FileIndex::build(&tests);
        tracing::debug!(
            tests = tests.len(),
            groups = file_index.len(),
            "indexed tests by group"
        );

        let configs = compensate::compensate(&tests, &file_index, configs);

        let mut remaining = tests.into_iter();
        let mut blocks = Vec::with_capacity(file_index.len());
        for (config, range) in configs.iter().zip(file_index.ranges()) {
            let block: Vec<_> = remaining.by_ref().take(range.len()).collect();
            let order = resolve::order_tests(&block).map_err(|cycle| Error::TestCycle {
                origin_file: config.origin_file.to_string(),
                tests: labels(&block, &cycle, test_label),
            })?;
            blocks.push(reorder(block, &order));
        }

        let group_order = resolve::order_groups(&configs).map_err(|cycle| Error::GroupCycle {
            groups: labels(&configs, &cycle, group_label),
        })?;

        let groups = configs
            .into_iter()
            .zip(blocks)
            .map(|(config, tests)| PlannedGroup { config, tests })
            .collect();
        let groups = reorder(groups, &group_order);
        tracing::debug!(groups = groups.len(), "planned execution order");

        Ok(Self { groups })
    }

    pub fn groups(&self) -> &[PlannedGroup] {
        &self.groups
    }

    pub fn test_count(&self) -> usize {
        self.groups.iter().map(|group| group.tests.len()).sum()
    }

    /// All tests in execution order.
    pub fn tests(&self) -> impl Iterator<Item = &TestDescriptor> {
        self.groups.iter().flat_map(|group| group.tests.iter())
    }
}

/// Take the elements of `items` in the order given by `order`.
///
/// `order` must be a permutation of the indices of `items`.
fn reorder<T>(items: Vec<T>, order: &[usize]) -> Vec<T> {
    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    order
        .iter()
        .filter_map(|&index| slots.get_mut(index).and_then(Option::take))
        .collect()
}

fn labels<N>(nodes: &[N], cycle: &Cycle, label: fn(&N) -> String) -> Vec<String> {
    cycle
        .unscheduled
        .iter()
        .filter_map(|&index| nodes.get(index))
        .map(label)
        .collect()
}

fn test_label(test: &TestDescriptor) -> String {
    format!(
        "{} (line {})",
        test.name().unwrap_or(NO_NAME),
        test.source_line
    )
}

fn group_label(config: &GroupConfig) -> String {
    format!(
        "{} ({})",
        config.name().unwrap_or(NO_NAME),
        config.origin_file
    )
}
