use crate::{
    group::GroupConfig,
    test::{TestDescriptor, TestFnHandle},
};

pub struct BuildTest {
    pub func: TestFnHandle,
    pub origin_file: &'static str,
    pub source_line: u32,
    pub unique_id: i64,
    pub name: Option<&'static str>,
    pub depends_on: Vec<&'static str>,
}

impl Default for BuildTest {
    fn default() -> Self {
        Self {
            func: TestFnHandle::from_const_fn(|scope| {
                scope.result.pass();
            }),
            origin_file: "a.rs",
            source_line: 0,
            unique_id: 0,
            name: None,
            depends_on: Vec::new(),
        }
    }
}

impl From<BuildTest> for TestDescriptor {
    fn from(value: BuildTest) -> Self {
        let test = TestDescriptor::from_handle(value.origin_file, value.source_line, value.func)
            .with_unique_id(value.unique_id)
            .with_depends_on(value.depends_on);
        match value.name {
            Some(name) => test.with_name(name),
            None => test,
        }
    }
}

pub struct BuildGroup {
    pub origin_file: &'static str,
    pub unique_id: i64,
    pub name: Option<&'static str>,
    pub depends_on: Vec<&'static str>,
}

impl Default for BuildGroup {
    fn default() -> Self {
        Self {
            origin_file: "a.rs",
            unique_id: 0,
            name: None,
            depends_on: Vec::new(),
        }
    }
}

impl From<BuildGroup> for GroupConfig {
    fn from(value: BuildGroup) -> Self {
        let config = GroupConfig::new(value.origin_file)
            .with_unique_id(value.unique_id)
            .with_depends_on(value.depends_on);
        match value.name {
            Some(name) => config.with_name(name),
            None => config,
        }
    }
}

/// Build a [`TestDescriptor`] from named fields, everything else defaulted.
///
/// Without a `func` the test records one success.
macro_rules! descriptor {
    {$($field:ident: $value:expr),* $(,)?} => {
        $crate::test::TestDescriptor::from($crate::test_support::BuildTest {
            $($field: From::from($value),)*
            ..($crate::test_support::BuildTest {
                source_line: line!(),
                ..Default::default()
            })
        })
    };
}

pub(crate) use descriptor;

macro_rules! group {
    {$($field:ident: $value:expr),* $(,)?} => {
        $crate::group::GroupConfig::from($crate::test_support::BuildGroup {
            $($field: From::from($value),)*
            ..Default::default()
        })
    };
}

pub(crate) use group;
