//! Setup and teardown hooks for tests and groups.
//!
//! A fixture is a pair of a [`SetupFn`] that produces a context and a
//! [`TeardownFn`] that consumes it again. The harness only opens a scope when
//! both halves are declared; a lone setup or teardown is never called.
//!
//! Contexts travel through the harness as [`Context`] (a boxed [`Any`]), so
//! the harness does not need to know their types. The typed constructors
//! below box the value on setup and downcast it again on teardown, and
//! [`Scope`](crate::test::Scope) does the same for the test body.

use std::any::{Any, type_name};
use std::fmt::Debug;

/// A type-erased setup context, owned by the harness between setup and teardown.
pub type Context = Box<dyn Any>;

pub struct SetupFn(Box<dyn Fn() -> Context>);

impl SetupFn {
    pub fn new<Ctx, F>(setup: F) -> Self
    where
        Ctx: 'static,
        F: Fn() -> Ctx + 'static,
    {
        Self(Box::new(move || Box::new(setup()) as Context))
    }

    pub(crate) fn call(&self) -> Context {
        (self.0)()
    }
}

impl Debug for SetupFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SetupFn(...)")
    }
}

pub struct TeardownFn(Box<dyn Fn(Context)>);

impl TeardownFn {
    /// Wrap a typed teardown.
    ///
    /// If the context handed back by the harness is not a `Ctx` (the setup
    /// produced a different type) the context is dropped and a warning is
    /// logged instead.
    pub fn new<Ctx, F>(teardown: F) -> Self
    where
        Ctx: 'static,
        F: Fn(Ctx) + 'static,
    {
        Self(Box::new(move |ctx: Context| match ctx.downcast::<Ctx>() {
            Ok(ctx) => teardown(*ctx),
            Err(_) => tracing::warn!(
                expected = type_name::<Ctx>(),
                "teardown received a context of another type, dropping it"
            ),
        }))
    }

    pub(crate) fn call(&self, ctx: Context) {
        (self.0)(ctx)
    }
}

impl Debug for TeardownFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TeardownFn(...)")
    }
}

/// Pair up optional hooks. Only a complete pair opens a scope.
pub(crate) fn pair<'f>(
    setup: Option<&'f SetupFn>,
    teardown: Option<&'f TeardownFn>,
) -> Option<(&'f SetupFn, &'f TeardownFn)> {
    setup.zip(teardown)
}
