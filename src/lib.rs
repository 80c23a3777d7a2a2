//! Grouped tests that run in dependency order.
//!
//! Tests are registered through [`registry`], belong to a group identified by
//! their source file, and may name other tests of their group they depend on.
//! Groups in turn may depend on other groups by name. A [`Plan`](plan::Plan)
//! resolves both levels into one execution order, [`harness`] runs it.
//!
//! ```no_run
//! use topotest::{plan::Plan, registry::Registry};
//!
//! fn main() -> std::process::ExitCode {
//!     let plan = match Plan::new(Registry::collect()) {
//!         Ok(plan) => plan,
//!         Err(err) => {
//!             eprintln!("error: {err}");
//!             return err.exit_code();
//!         }
//!     };
//!     topotest::harness(&plan).run().exit_code()
//! }
//! ```

pub mod error;
pub mod fixture;
pub mod formatter;
pub mod group;
pub mod outcome;
pub mod plan;
pub mod registry;

mod harness;
pub use harness::*;

mod report;
pub use report::*;

pub use error::{DiscoveryError, Error};

#[cfg(test)]
mod test_support;
