//! Update Batcher - per-instance update queue and folding.
//!
//! Setter calls never touch the slot store. They append to the instance's
//! [`UpdateChannel`] and mark the instance dirty in the [`Scheduler`]. When
//! the tick runs, the queue is folded per slot in call order:
//! - a literal value replaces everything queued before it for that slot
//! - an updater function is applied to the latest pending value
//!
//! If no folded value differs from the slot's current value, the instance
//! bails out and its render function is not invoked.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Weak;

use crate::error::{Diagnostic, Diagnostics};
use crate::slots::SlotStore;
use crate::types::InstanceId;

use super::queue::{Schedulable, Scheduler};

/// Type-erased updater. Returns `None` if the previous value has an unexpected type.
pub(crate) type Updater = Box<dyn FnOnce(&dyn Any) -> Option<Box<dyn Any>>>;

pub(crate) enum Update {
    Replace(Box<dyn Any>),
    Apply(Updater),
}

pub(crate) struct QueuedUpdate {
    slot: usize,
    update: Update,
}

// =============================================================================
// Update Channel
// =============================================================================

/// Queue shared between an instance and every setter it handed out.
pub(crate) struct UpdateChannel {
    instance: InstanceId,
    mounted: Cell<bool>,
    scheduled: Cell<bool>,
    queue: RefCell<Vec<QueuedUpdate>>,
    target: Weak<dyn Schedulable>,
    scheduler: Weak<Scheduler>,
    diagnostics: Diagnostics,
}

impl UpdateChannel {
    pub(crate) fn new(
        instance: InstanceId,
        target: Weak<dyn Schedulable>,
        scheduler: Weak<Scheduler>,
        diagnostics: Diagnostics,
    ) -> Self {
        Self {
            instance,
            mounted: Cell::new(true),
            scheduled: Cell::new(false),
            queue: RefCell::new(Vec::new()),
            target,
            scheduler,
            diagnostics,
        }
    }

    pub(crate) fn instance(&self) -> InstanceId {
        self.instance
    }

    /// Queue an update for a state slot and mark the instance dirty.
    pub(crate) fn enqueue(&self, slot: usize, update: Update) {
        if !self.mounted.get() {
            self.diagnostics.emit(Diagnostic::StaleUpdateDropped {
                instance: self.instance,
                slot,
            });
            return;
        }

        {
            let mut queue = self.queue.borrow_mut();
            if matches!(update, Update::Replace(_)) {
                queue.retain(|queued| queued.slot != slot);
            }
            queue.push(QueuedUpdate { slot, update });
        }
        tracing::trace!(instance = %self.instance, slot, "update queued");

        if !self.scheduled.replace(true) {
            if let Some(scheduler) = self.scheduler.upgrade() {
                scheduler.schedule(self.target.clone());
            }
        }
    }

    /// Take the queued updates for a direct render.
    ///
    /// The scheduler entry stays in place; updates queued afterwards ride on
    /// it instead of adding a second entry to the same tick.
    pub(crate) fn take(&self) -> Vec<QueuedUpdate> {
        std::mem::take(&mut *self.queue.borrow_mut())
    }

    /// Take the queued updates on behalf of the tick that owns the scheduler entry.
    pub(crate) fn take_scheduled(&self) -> Vec<QueuedUpdate> {
        self.scheduled.set(false);
        self.take()
    }

    /// Put the instance back on the scheduler if updates are still queued.
    pub(crate) fn reschedule(&self) {
        self.scheduled.set(false);
        if self.has_pending() && !self.scheduled.replace(true) {
            if let Some(scheduler) = self.scheduler.upgrade() {
                scheduler.schedule(self.target.clone());
            }
        }
    }

    pub(crate) fn has_pending(&self) -> bool {
        !self.queue.borrow().is_empty()
    }

    /// Stop accepting updates. Later setter calls are dropped with a diagnostic.
    pub(crate) fn close(&self) {
        self.mounted.set(false);
        self.scheduled.set(false);
        self.queue.borrow_mut().clear();
    }
}

// =============================================================================
// Folding
// =============================================================================

/// Fold queued updates into the slot store. Returns whether any slot changed.
pub(crate) fn apply_updates(store: &mut SlotStore, updates: Vec<QueuedUpdate>) -> bool {
    let mut pending: BTreeMap<usize, Box<dyn Any>> = BTreeMap::new();

    for QueuedUpdate { slot, update } in updates {
        let next = match update {
            Update::Replace(value) => Some(value),
            Update::Apply(updater) => {
                let previous = match pending.get(&slot) {
                    Some(value) => Some(value.as_ref()),
                    None => store.state(slot).map(|state| state.value()),
                };
                previous.and_then(|previous| updater(previous))
            }
        };

        match next {
            Some(value) => {
                pending.insert(slot, value);
            }
            None => tracing::warn!(slot, "update skipped: slot is not a state slot of that type"),
        }
    }

    let mut changed = false;
    for (slot, value) in pending {
        let Some(state) = store.state_mut(slot) else { continue };
        if !state.accepts(value.as_ref()) {
            tracing::warn!(slot, "update skipped: value type does not match the state slot");
            continue;
        }
        if !state.is_same(value.as_ref()) {
            state.replace(value);
            changed = true;
        }
    }
    changed
}
