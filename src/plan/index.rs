use std::{cmp::Ordering, ops::Range};

use crate::{group::GroupConfig, test::TestDescriptor};

/// Compare optional strings, absent ones sort after every present one.
pub fn cmp_absent_last(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable sort by group, then name, then source line.
pub fn sort_tests(tests: &mut [TestDescriptor]) {
    tests.sort_by(|a, b| {
        a.group_key()
            .cmp(&b.group_key())
            .then_with(|| cmp_absent_last(a.name(), b.name()))
            .then_with(|| a.source_line.cmp(&b.source_line))
    });
}

/// Stable sort by group.
pub fn sort_configs(configs: &mut [GroupConfig]) {
    configs.sort_by(|a, b| a.key().cmp(&b.key()));
}

/// Boundaries of the contiguous groups in a sorted test sequence.
///
/// Holds one more boundary than there are groups: the first is always `0`,
/// the last always the length of the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileIndex {
    bounds: Vec<usize>,
}

impl FileIndex {
    /// Index tests already ordered by [`sort_tests`].
    pub fn build(tests: &[TestDescriptor]) -> Self {
        let mut bounds = vec![0];
        bounds.extend(
            tests
                .windows(2)
                .enumerate()
                .filter(|(_, pair)| pair[0].group_key() != pair[1].group_key())
                .map(|(i, _)| i + 1),
        );
        if !tests.is_empty() {
            bounds.push(tests.len());
        }
        Self { bounds }
    }

    pub fn bounds(&self) -> &[usize] {
        &self.bounds
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.bounds.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn range(&self, group: usize) -> Option<Range<usize>> {
        let start = *self.bounds.get(group)?;
        let end = *self.bounds.get(group + 1)?;
        Some(start..end)
    }

    pub fn ranges(&self) -> impl ExactSizeIterator<Item = Range<usize>> + '_ {
        self.bounds.windows(2).map(|pair| pair[0]..pair[1])
    }
}
