use crate::{group::GroupConfig, plan::index::FileIndex, test::TestDescriptor};

/// Align configurations with the groups of `tests`.
///
/// `tests` must be indexed by `index`, and `configs` sorted the same way (see
/// [`sort_configs`](super::index::sort_configs)). The result holds exactly one
/// configuration per group, in group order. Groups without a configuration get
/// a [synthesized](GroupConfig::synthesized) one. Configurations without tests
/// and additional configurations for an already configured group are dropped.
pub fn compensate(
    tests: &[TestDescriptor],
    index: &FileIndex,
    configs: Vec<GroupConfig>,
) -> Vec<GroupConfig> {
    let mut configs = configs.into_iter().peekable();
    let mut aligned = Vec::with_capacity(index.len());

    for range in index.ranges() {
        let key = tests[range.start].group_key();

        while let Some(orphan) = configs.next_if(|config| config.key() < key) {
            tracing::debug!(
                origin_file = %orphan.origin_file,
                unique_id = orphan.unique_id,
                "dropping group configuration without tests"
            );
        }

        match configs.next_if(|config| config.key() == key) {
            Some(config) => aligned.push(config),
            None => {
                tracing::trace!(
                    origin_file = key.origin_file,
                    unique_id = key.unique_id,
                    "synthesizing group configuration"
                );
                aligned.push(GroupConfig::synthesized(key));
            }
        }

        while let Some(duplicate) = configs.next_if(|config| config.key() == key) {
            tracing::debug!(
                origin_file = %duplicate.origin_file,
                unique_id = duplicate.unique_id,
                name = ?duplicate.name(),
                "dropping duplicate group configuration"
            );
        }
    }

    for orphan in configs {
        tracing::debug!(
            origin_file = %orphan.origin_file,
            unique_id = orphan.unique_id,
            "dropping group configuration without tests"
        );
    }

    aligned
}
