//! Hook slot variants.

use std::any::Any;
use std::rc::Rc;

use crate::deps::{ShallowEq, StoredDeps};
use crate::error::BoxError;
use crate::primitives::Cleanup;
use crate::types::HookKind;

/// One positional storage cell of an instance.
pub(crate) enum HookSlot {
    State(StateSlot),
    Memo(MemoSlot),
    Effect(EffectSlot),
    Ref(RefSlot),
}

impl HookSlot {
    pub(crate) fn kind(&self) -> HookKind {
        match self {
            HookSlot::State(_) => HookKind::State,
            HookSlot::Memo(_) => HookKind::Memo,
            HookSlot::Effect(_) => HookKind::Effect,
            HookSlot::Ref(_) => HookKind::Ref,
        }
    }
}

// =============================================================================
// State
// =============================================================================

/// Current value of a state hook. Pending updates live in the instance's
/// update channel so setters can queue without touching the store.
pub(crate) struct StateSlot {
    value: Box<dyn Any>,
    same: fn(&dyn Any, &dyn Any) -> bool,
}

/// Same-value check for bail-out: NaN equals NaN, `Rc` compares by address.
fn same_value<T: ShallowEq + 'static>(a: &dyn Any, b: &dyn Any) -> bool {
    match (a.downcast_ref::<T>(), b.downcast_ref::<T>()) {
        (Some(a), Some(b)) => a.shallow_eq(b),
        _ => false,
    }
}

impl StateSlot {
    pub(crate) fn new<T: ShallowEq + 'static>(value: T) -> Self {
        Self {
            value: Box::new(value),
            same: same_value::<T>,
        }
    }

    pub(crate) fn get<T: 'static>(&self) -> Option<&T> {
        self.value.downcast_ref()
    }

    pub(crate) fn value(&self) -> &dyn Any {
        self.value.as_ref()
    }

    /// Does `next` have this slot's value type?
    pub(crate) fn accepts(&self, next: &dyn Any) -> bool {
        self.value.as_ref().type_id() == next.type_id()
    }

    /// Would replacing the value with `next` leave it unchanged?
    pub(crate) fn is_same(&self, next: &dyn Any) -> bool {
        (self.same)(self.value.as_ref(), next)
    }

    pub(crate) fn replace(&mut self, value: Box<dyn Any>) {
        self.value = value;
    }
}

// =============================================================================
// Memo
// =============================================================================

/// Cached value plus the dependency list it was computed from.
///
/// Both halves only change together through [`MemoSlot::store`].
#[derive(Default)]
pub(crate) struct MemoSlot {
    cached: Option<Box<dyn Any>>,
    deps: StoredDeps,
}

impl MemoSlot {
    pub(crate) fn deps(&self) -> &StoredDeps {
        &self.deps
    }

    pub(crate) fn get<T: 'static>(&self) -> Option<&T> {
        self.cached.as_ref().and_then(|value| value.downcast_ref())
    }

    pub(crate) fn store(&mut self, value: Box<dyn Any>, deps: StoredDeps) {
        self.cached = Some(value);
        self.deps = deps;
    }
}

// =============================================================================
// Effect
// =============================================================================

pub(crate) type EffectRun = Box<dyn FnOnce() -> Result<Option<Cleanup>, BoxError>>;

/// Effect closure captured by the render that scheduled it.
pub(crate) struct PendingEffect {
    pub(crate) run: EffectRun,
    pub(crate) deps: StoredDeps,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum EffectStatus {
    #[default]
    Idle,
    Scheduled,
    Running,
}

#[derive(Default)]
pub(crate) struct EffectSlot {
    pub(crate) deps: StoredDeps,
    pub(crate) cleanup: Option<Cleanup>,
    pub(crate) pending: Option<PendingEffect>,
    pub(crate) status: EffectStatus,
}

impl EffectSlot {
    /// Record a new effect closure; replaces one scheduled by an aborted render.
    pub(crate) fn schedule(&mut self, pending: PendingEffect) {
        self.pending = Some(pending);
        self.status = EffectStatus::Scheduled;
    }

    /// Drop a scheduled effect whose render never committed.
    pub(crate) fn discard_pending(&mut self) {
        if self.pending.take().is_some() {
            self.status = EffectStatus::Idle;
        }
    }
}

// =============================================================================
// Ref
// =============================================================================

/// Mutable cell created once per instance. Writing to it never renders.
pub(crate) struct RefSlot {
    cell: Rc<dyn Any>,
}

impl RefSlot {
    pub(crate) fn new(cell: Rc<dyn Any>) -> Self {
        Self { cell }
    }

    pub(crate) fn cell(&self) -> Rc<dyn Any> {
        Rc::clone(&self.cell)
    }
}
