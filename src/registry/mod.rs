//! Where tests and group configurations come from.
//!
//! Every declaration contributes a zero-argument accessor to one of two
//! distributed slices, [`TESTS`] and [`GROUPS`]. The linker gathers them into
//! a contiguous slice, so [`Registry::collect`] only has to call each accessor
//! once:
//!
//! ```
//! use linkme::distributed_slice;
//! use topotest::{registry::TESTS, test::TestDescriptor};
//!
//! #[distributed_slice(TESTS)]
//! static CONNECTS: fn() -> TestDescriptor = || {
//!     TestDescriptor::new(file!(), line!(), |scope| {
//!         scope.result.pass();
//!     })
//!     .with_name("connects")
//! };
//! ```
//!
//! The symbol table of the running executable can be used as a second way in,
//! see [`Registry::discover`]. It only ever calls accessors that are also
//! registered in the slices; symbols are used to select them, never to jump to
//! arbitrary addresses.

use std::{borrow::Cow, env, path::PathBuf};

use linkme::distributed_slice;

use crate::{error::DiscoveryError, group::GroupConfig, test::TestDescriptor};

pub mod offset;
pub mod symbols;

use offset::AddressOffset;
use symbols::SymbolRecord;

pub type TestAccessor = fn() -> TestDescriptor;
pub type GroupAccessor = fn() -> GroupConfig;

#[distributed_slice]
pub static TESTS: [TestAccessor];

#[distributed_slice]
pub static GROUPS: [GroupAccessor];

/// Symbol prefix of exported test accessors.
pub const TEST_ACCESSOR_PREFIX: &str = "topotest_test_";

/// Symbol prefix of exported group configuration accessors.
pub const GROUP_ACCESSOR_PREFIX: &str = "topotest_group_";

/// Name of [`topotest_anchor`] in the symbol table.
pub const ANCHOR_SYMBOL: &str = "topotest_anchor";

/// Anchor for the address offset, does nothing.
#[unsafe(no_mangle)]
#[inline(never)]
pub fn topotest_anchor() {}

/// Environment variable overriding the symbol dump tool.
pub const DUMP_TOOL_ENV: &str = "TOPOTEST_NM";

#[derive(Debug, Default)]
pub struct Registry {
    pub tests: Vec<TestDescriptor>,
    pub groups: Vec<GroupConfig>,
}

impl Registry {
    pub fn new(tests: Vec<TestDescriptor>, groups: Vec<GroupConfig>) -> Self {
        Self { tests, groups }
    }

    /// Materialize everything registered in [`TESTS`] and [`GROUPS`].
    pub fn collect() -> Self {
        let tests: Vec<_> = TESTS.iter().map(|accessor| accessor()).collect();
        let groups: Vec<_> = GROUPS.iter().map(|accessor| accessor()).collect();
        tracing::debug!(
            tests = tests.len(),
            groups = groups.len(),
            "collected registered tests"
        );
        Self { tests, groups }
    }

    /// Build a registry from symbol records.
    ///
    /// Records named with [`TEST_ACCESSOR_PREFIX`] or
    /// [`GROUP_ACCESSOR_PREFIX`] are corrected by `offset` and matched against
    /// the runtime addresses of the given accessors. Matches are called in
    /// symbol table order, records without a match are skipped.
    pub fn from_symbols(
        records: &[SymbolRecord],
        offset: AddressOffset,
        test_accessors: &[TestAccessor],
        group_accessors: &[GroupAccessor],
    ) -> Self {
        let mut registry = Self::default();

        for record in records {
            let Some(address) = record.address else {
                continue;
            };

            if record.name.starts_with(TEST_ACCESSOR_PREFIX) {
                match lookup(test_accessors, offset.apply(address)) {
                    Some(accessor) => registry.tests.push(accessor()),
                    None => skip(record),
                }
            } else if record.name.starts_with(GROUP_ACCESSOR_PREFIX) {
                match lookup(group_accessors, offset.apply(address)) {
                    Some(accessor) => registry.groups.push(accessor()),
                    None => skip(record),
                }
            }
        }

        tracing::debug!(
            tests = registry.tests.len(),
            groups = registry.groups.len(),
            "built registry from symbols"
        );
        registry
    }

    /// Discover tests through the symbol table of the running executable.
    pub fn discover(discovery: &SymbolDiscovery) -> Result<Self, DiscoveryError> {
        let executable = match &discovery.executable {
            Some(path) => path.clone(),
            None => env::current_exe().map_err(DiscoveryError::CurrentExe)?,
        };

        let records = symbols::read_symbols(&executable, &discovery.tool)?;
        let offset = AddressOffset::resolve(&records, &discovery.anchor, discovery.anchor_address)?;
        Ok(Self::from_symbols(&records, offset, &TESTS, &GROUPS))
    }
}

fn lookup<T>(accessors: &[fn() -> T], address: usize) -> Option<fn() -> T> {
    accessors
        .iter()
        .copied()
        .find(|accessor| *accessor as usize == address)
}

fn skip(record: &SymbolRecord) {
    tracing::warn!(
        symbol = %record.name,
        address = ?record.address,
        "symbol matches the accessor naming but no registered accessor, skipping"
    );
}

/// Settings for [`Registry::discover`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolDiscovery {
    /// The symbol dump tool, `nm` unless [`DUMP_TOOL_ENV`] says otherwise.
    pub tool: String,
    pub anchor: Cow<'static, str>,
    /// Runtime address of the anchor.
    pub anchor_address: usize,
    /// Executable to inspect, the running one if absent.
    pub executable: Option<PathBuf>,
}

impl Default for SymbolDiscovery {
    fn default() -> Self {
        Self {
            tool: env::var(DUMP_TOOL_ENV).unwrap_or_else(|_| String::from("nm")),
            anchor: Cow::Borrowed(ANCHOR_SYMBOL),
            anchor_address: topotest_anchor as fn() as usize,
            executable: None,
        }
    }
}

impl SymbolDiscovery {
    pub fn with_tool(self, tool: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            ..self
        }
    }

    pub fn with_anchor(self, anchor: impl Into<Cow<'static, str>>, anchor_address: usize) -> Self {
        Self {
            anchor: anchor.into(),
            anchor_address,
            ..self
        }
    }

    pub fn with_executable(self, executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: Some(executable.into()),
            ..self
        }
    }
}
