//! Memo/Callback Evaluator: `use_memo`, `try_use_memo`, `use_callback`.
//!
//! A memo slot holds a cached value and the dependency list it was computed
//! from. When the new list equals the stored one the factory is not called
//! and the cached value is returned as-is, so an `Rc` stays the same
//! allocation across renders. Otherwise the factory runs and value and deps
//! are stored together. A failing factory leaves both untouched.

use std::convert::Infallible;

use crate::deps::{Deps, StoredDeps};
use crate::error::{BoxError, HookError};

use super::{deps_unchanged, RenderCx};

impl RenderCx<'_> {
    /// Cache the result of `factory` until `deps` change.
    pub fn use_memo<T, F>(&mut self, factory: F, deps: Deps) -> Result<T, HookError>
    where
        T: Clone + 'static,
        F: FnOnce() -> T,
    {
        self.try_use_memo(|| Ok::<T, Infallible>(factory()), deps)
    }

    /// Like [`use_memo`](Self::use_memo) with a fallible factory.
    ///
    /// A factory error aborts the render with [`HookError::Factory`]; the
    /// slot keeps its last good value and deps.
    pub fn try_use_memo<T, E, F>(&mut self, factory: F, deps: Deps) -> Result<T, HookError>
    where
        T: Clone + 'static,
        E: Into<BoxError>,
        F: FnOnce() -> Result<T, E>,
    {
        let instance = self.instance;
        let diagnostics = self.diagnostics;
        let report_shape = self.config.report_dependency_shape_changes;
        let (index, slot) = self.store.claim_memo()?;

        if deps_unchanged(diagnostics, report_shape, instance, index, slot.deps(), deps.as_deref()) {
            return slot
                .get::<T>()
                .cloned()
                .ok_or(HookError::SlotTypeMismatch { instance, index });
        }

        let value = factory().map_err(|err| HookError::Factory {
            instance,
            index,
            source: err.into(),
        })?;
        slot.store(Box::new(value.clone()), StoredDeps::from_deps(deps));
        tracing::trace!(instance = %instance, slot = index, "memo recomputed");

        Ok(value)
    }

    /// Keep the same callback until `deps` change.
    ///
    /// `F` is usually a [`Callback`](crate::Callback); the returned handle is
    /// the cached allocation, so memoized children see an unchanged prop.
    pub fn use_callback<F>(&mut self, callback: F, deps: Deps) -> Result<F, HookError>
    where
        F: Clone + 'static,
    {
        self.use_memo(move || callback, deps)
    }
}
