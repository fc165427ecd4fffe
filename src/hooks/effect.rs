//! `use_effect`.

use crate::deps::{Deps, StoredDeps};
use crate::error::{BoxError, HookError};
use crate::primitives::Cleanup;
use crate::slots::PendingEffect;

use super::{deps_unchanged, RenderCx};

/// What an effect may return.
///
/// - `()` - no cleanup
/// - [`Cleanup`] / `Option<Cleanup>` - cleanup to run before the next run and at unmount
/// - `Result<_, E>` - an `Err` is reported as a diagnostic, the commit carries on
pub trait EffectOutput {
    fn into_cleanup(self) -> Result<Option<Cleanup>, BoxError>;
}

impl EffectOutput for () {
    fn into_cleanup(self) -> Result<Option<Cleanup>, BoxError> {
        Ok(None)
    }
}

impl EffectOutput for Cleanup {
    fn into_cleanup(self) -> Result<Option<Cleanup>, BoxError> {
        Ok(Some(self))
    }
}

impl EffectOutput for Option<Cleanup> {
    fn into_cleanup(self) -> Result<Option<Cleanup>, BoxError> {
        Ok(self)
    }
}

impl<T: EffectOutput, E: Into<BoxError>> EffectOutput for Result<T, E> {
    fn into_cleanup(self) -> Result<Option<Cleanup>, BoxError> {
        match self {
            Ok(output) => output.into_cleanup(),
            Err(err) => Err(err.into()),
        }
    }
}

impl RenderCx<'_> {
    /// Run `effect` after this render commits, if `deps` changed.
    ///
    /// The closure captures this render's values; its cleanup sees the same
    /// snapshot even if later renders have moved on.
    ///
    /// ```ignore
    /// cx.use_effect(move || {
    ///     let timer = start_timer(interval);
    ///     cleanup(move || timer.cancel())
    /// }, deps![interval])?;
    /// ```
    pub fn use_effect<F, R>(&mut self, effect: F, deps: Deps) -> Result<(), HookError>
    where
        F: FnOnce() -> R + 'static,
        R: EffectOutput,
    {
        let instance = self.instance;
        let diagnostics = self.diagnostics;
        let report_shape = self.config.report_dependency_shape_changes;
        let (index, slot) = self.store.claim_effect()?;

        if deps_unchanged(diagnostics, report_shape, instance, index, &slot.deps, deps.as_deref()) {
            return Ok(());
        }

        slot.schedule(PendingEffect {
            run: Box::new(move || effect().into_cleanup()),
            deps: StoredDeps::from_deps(deps),
        });
        tracing::trace!(instance = %instance, slot = index, "effect scheduled");

        Ok(())
    }
}
