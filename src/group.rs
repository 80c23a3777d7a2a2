use std::{borrow::Cow, fmt::Debug};

use crate::fixture::{self, SetupFn, TeardownFn};

/// Identity of a group.
///
/// Tests and configurations are matched to each other by this key, never by
/// name. Names are optional and do not need to be unique across groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey<'k> {
    pub origin_file: &'k str,
    pub unique_id: i64,
}

/// Configuration of one group, usually declared once per source file.
///
/// Groups without a declared configuration get a synthesized one during
/// planning (see [`GroupConfig::synthesized`]), so every group ends up with
/// exactly one.
#[non_exhaustive]
pub struct GroupConfig {
    pub origin_file: Cow<'static, str>,
    pub unique_id: i64,
    pub name: Option<Cow<'static, str>>,
    pub depends_on: Vec<Cow<'static, str>>,
    setup: Option<SetupFn>,
    teardown: Option<TeardownFn>,
}

impl GroupConfig {
    pub fn new(origin_file: impl Into<Cow<'static, str>>) -> Self {
        Self {
            origin_file: origin_file.into(),
            unique_id: 0,
            name: None,
            depends_on: Vec::new(),
            setup: None,
            teardown: None,
        }
    }

    /// The empty configuration for a group that declared none.
    ///
    /// Its name stays absent, it depends on nothing and has no fixture.
    pub fn synthesized(key: GroupKey<'_>) -> Self {
        Self::new(key.origin_file.to_owned()).with_unique_id(key.unique_id)
    }

    pub fn with_unique_id(self, unique_id: i64) -> Self {
        Self { unique_id, ..self }
    }

    pub fn with_name(self, name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: Some(name.into()),
            ..self
        }
    }

    pub fn with_depends_on<I, S>(self, depends_on: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>,
    {
        Self {
            depends_on: depends_on.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    pub fn with_setup<Ctx, F>(self, setup: F) -> Self
    where
        Ctx: 'static,
        F: Fn() -> Ctx + 'static,
    {
        Self {
            setup: Some(SetupFn::new(setup)),
            ..self
        }
    }

    pub fn with_teardown<Ctx, F>(self, teardown: F) -> Self
    where
        Ctx: 'static,
        F: Fn(Ctx) + 'static,
    {
        Self {
            teardown: Some(TeardownFn::new(teardown)),
            ..self
        }
    }

    pub fn key(&self) -> GroupKey<'_> {
        GroupKey {
            origin_file: &self.origin_file,
            unique_id: self.unique_id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The setup and teardown pair, if both are declared.
    pub fn fixture(&self) -> Option<(&SetupFn, &TeardownFn)> {
        fixture::pair(self.setup.as_ref(), self.teardown.as_ref())
    }
}

impl Debug for GroupConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupConfig")
            .field("origin_file", &self.origin_file)
            .field("unique_id", &self.unique_id)
            .field("name", &self.name)
            .field("depends_on", &self.depends_on)
            .field("setup", &self.setup.is_some())
            .field("teardown", &self.teardown.is_some())
            .finish()
    }
}
