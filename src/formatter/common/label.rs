//! Display labels for tests and groups, both of which may be unnamed.

use std::fmt::{self, Display};

use crate::plan::NO_NAME;

/// A group's name, or the placeholder if it has none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupLabel<'t>(pub Option<&'t str>);

impl Display for GroupLabel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.unwrap_or(NO_NAME))
    }
}

/// A test's name.
///
/// Unnamed tests are told apart by their location instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TestLabel<'t> {
    pub name: Option<&'t str>,
    pub origin_file: &'t str,
    pub source_line: u32,
}

impl Display for TestLabel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name {
            Some(name) => f.write_str(name),
            None => write!(f, "{NO_NAME} at {}:{}", self.origin_file, self.source_line),
        }
    }
}
