//! Dependency ordering.
//!
//! Both tests inside a group and groups among each other declare their
//! dependencies by name. [`topological_order`] turns such a sequence into an
//! execution order, [`order_tests`] and [`order_groups`] apply it to the two
//! scopes.

use std::{borrow::Cow, collections::BTreeSet};

use crate::{group::GroupConfig, test::TestDescriptor};

/// Nodes that could not be scheduled because they depend on each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    /// Indices of every node left unscheduled, ascending.
    pub unscheduled: Vec<usize>,
}

/// Order `nodes` so that every node comes after the nodes it depends on.
///
/// A dependency name refers to every other node carrying that name. Names
/// without a match and nodes naming themselves add no edge. Among the nodes
/// that are ready at the same time the one with the lowest index goes first,
/// so independent nodes keep their relative order.
///
/// Returns the scheduled indices, or the [`Cycle`] if not every node can be
/// scheduled. There is no partial result.
pub fn topological_order<N, D, M>(nodes: &[N], depends_on: D, name: M) -> Result<Vec<usize>, Cycle>
where
    D: Fn(&N) -> &[Cow<'static, str>],
    M: Fn(&N) -> Option<&str>,
{
    let mut successors = vec![Vec::new(); nodes.len()];
    let mut in_degree = vec![0usize; nodes.len()];

    for (dependent, node) in nodes.iter().enumerate() {
        for dependency in depends_on(node) {
            let mut resolved = false;
            for (prerequisite, other) in nodes.iter().enumerate() {
                if prerequisite == dependent || name(other) != Some(&**dependency) {
                    continue;
                }
                tracing::trace!(prerequisite, dependent, %dependency, "dependency edge");
                successors[prerequisite].push(dependent);
                in_degree[dependent] += 1;
                resolved = true;
            }

            if !resolved {
                tracing::debug!(
                    node = ?name(node),
                    %dependency,
                    "dependency name does not resolve, ignoring it"
                );
            }
        }
    }

    let mut ready: BTreeSet<usize> = in_degree
        .iter()
        .enumerate()
        .filter(|(_, degree)| **degree == 0)
        .map(|(index, _)| index)
        .collect();
    let mut order = Vec::with_capacity(nodes.len());

    while let Some(next) = ready.pop_first() {
        order.push(next);
        for &successor in &successors[next] {
            in_degree[successor] -= 1;
            if in_degree[successor] == 0 {
                ready.insert(successor);
            }
        }
    }

    match order.len() == nodes.len() {
        true => Ok(order),
        false => Err(Cycle {
            unscheduled: in_degree
                .iter()
                .enumerate()
                .filter(|(_, degree)| **degree > 0)
                .map(|(index, _)| index)
                .collect(),
        }),
    }
}

/// Order the tests of one group.
pub fn order_tests(tests: &[TestDescriptor]) -> Result<Vec<usize>, Cycle> {
    topological_order(
        tests,
        |test| test.depends_on.as_slice(),
        TestDescriptor::name,
    )
}

/// Order all groups, one configuration per group.
pub fn order_groups(configs: &[GroupConfig]) -> Result<Vec<usize>, Cycle> {
    topological_order(
        configs,
        |config| config.depends_on.as_slice(),
        GroupConfig::name,
    )
}
