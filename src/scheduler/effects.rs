//! Effect Scheduler - post-commit execution and cleanup.
//!
//! Per slot: `Idle → Scheduled → Running → Idle`.
//!
//! Commit walks effect slots in ascending declaration order. For each
//! scheduled slot the previous cleanup runs first, then the new effect, and
//! only then does the walk move on to the next slot. Unmount walks the slots
//! in descending order and runs every stored cleanup.
//!
//! A failing effect or cleanup (error or panic) is reported as a diagnostic
//! and never stops the walk.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::error::{Diagnostic, Diagnostics, EffectPhase};
use crate::primitives::Cleanup;
use crate::slots::{EffectStatus, SlotStore};
use crate::types::InstanceId;

/// What the commit walk needs to know about its instance.
pub(crate) struct EffectContext<'a> {
    pub(crate) instance: InstanceId,
    pub(crate) diagnostics: &'a Diagnostics,
    pub(crate) catch_panics: bool,
}

impl EffectContext<'_> {
    fn report(&self, slot: usize, phase: EffectPhase, message: String) {
        self.diagnostics.emit(Diagnostic::EffectFailed {
            instance: self.instance,
            slot,
            phase,
            message,
        });
    }

    fn run_cleanup(&self, slot: usize, cleanup: Cleanup) {
        if let Err(message) = guarded(self.catch_panics, cleanup) {
            self.report(slot, EffectPhase::Cleanup, message);
        }
    }
}

/// Run every scheduled effect of the last render. Returns how many ran.
pub(crate) fn commit_effects(store: &mut SlotStore, cx: &EffectContext<'_>) -> usize {
    let mut ran = 0;

    for (index, slot) in store.effects_mut() {
        if slot.status != EffectStatus::Scheduled {
            continue;
        }
        let Some(pending) = slot.pending.take() else {
            slot.status = EffectStatus::Idle;
            continue;
        };

        slot.status = EffectStatus::Running;
        if let Some(cleanup) = slot.cleanup.take() {
            cx.run_cleanup(index, cleanup);
        }

        slot.deps = pending.deps;
        match guarded(cx.catch_panics, pending.run) {
            Ok(Ok(cleanup)) => slot.cleanup = cleanup,
            Ok(Err(err)) => cx.report(index, EffectPhase::Effect, err.to_string()),
            Err(message) => cx.report(index, EffectPhase::Effect, message),
        }
        slot.status = EffectStatus::Idle;
        ran += 1;
        tracing::trace!(instance = %cx.instance, slot = index, "effect ran");
    }

    ran
}

/// Forget effects scheduled by a render that did not commit.
pub(crate) fn discard_scheduled(store: &mut SlotStore) {
    for (_, slot) in store.effects_mut() {
        slot.discard_pending();
    }
}

/// Run stored cleanups in reverse declaration order. Returns how many ran.
pub(crate) fn run_unmount_cleanups(store: &mut SlotStore, cx: &EffectContext<'_>) -> usize {
    let mut ran = 0;

    for (index, slot) in store.effects_rev_mut() {
        slot.pending = None;
        slot.status = EffectStatus::Idle;
        if let Some(cleanup) = slot.cleanup.take() {
            cx.run_cleanup(index, cleanup);
            ran += 1;
        }
    }

    ran
}

fn guarded<T>(catch_panics: bool, f: impl FnOnce() -> T) -> Result<T, String> {
    if !catch_panics {
        return Ok(f());
    }
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(panic_message)
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("panicked: {message}")
    } else {
        "panicked".to_string()
    }
}
