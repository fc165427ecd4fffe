//! State hooks: `use_state`, `use_state_with`, `use_reducer`.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use crate::deps::ShallowEq;
use crate::error::HookError;
use crate::scheduler::{Update, UpdateChannel};
use crate::slots::StateSlot;
use crate::types::InstanceId;

use super::RenderCx;

// =============================================================================
// SetState
// =============================================================================

/// Setter for one state slot.
///
/// Calls are queued, not applied: every call made during one tick is folded
/// in call order and produces at most one re-render. The handle is stable
/// across renders and compares equal to itself under [`ShallowEq`].
pub struct SetState<T> {
    channel: Rc<UpdateChannel>,
    slot: usize,
    _marker: PhantomData<fn(T)>,
}

impl<T> Clone for SetState<T> {
    fn clone(&self) -> Self {
        Self {
            channel: Rc::clone(&self.channel),
            slot: self.slot,
            _marker: PhantomData,
        }
    }
}

impl<T: 'static> SetState<T> {
    pub(crate) fn new(channel: Rc<UpdateChannel>, slot: usize) -> Self {
        Self {
            channel,
            slot,
            _marker: PhantomData,
        }
    }

    /// Replace the value. Overrides anything queued earlier in the tick.
    pub fn set(&self, value: T) {
        self.channel.enqueue(self.slot, Update::Replace(Box::new(value)));
    }

    /// Queue an updater applied to the latest pending value.
    pub fn update(&self, f: impl FnOnce(&T) -> T + 'static) {
        self.channel.enqueue(
            self.slot,
            Update::Apply(Box::new(move |previous: &dyn Any| {
                previous
                    .downcast_ref::<T>()
                    .map(|previous| Box::new(f(previous)) as Box<dyn Any>)
            })),
        );
    }

    pub fn instance_id(&self) -> InstanceId {
        self.channel.instance()
    }

    pub fn slot(&self) -> usize {
        self.slot
    }
}

impl<T> ShallowEq for SetState<T> {
    fn shallow_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.channel, &other.channel) && self.slot == other.slot
    }
}

impl<T> fmt::Debug for SetState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetState")
            .field("instance", &self.channel.instance())
            .field("slot", &self.slot)
            .finish()
    }
}

// =============================================================================
// Dispatch
// =============================================================================

/// Dispatcher returned by `use_reducer`.
pub struct Dispatch<S, A> {
    set: SetState<S>,
    reducer: fn(&S, A) -> S,
}

impl<S, A> Clone for Dispatch<S, A> {
    fn clone(&self) -> Self {
        Self {
            set: self.set.clone(),
            reducer: self.reducer,
        }
    }
}

impl<S: 'static, A: 'static> Dispatch<S, A> {
    /// Queue `action`; the reducer runs when the tick folds the queue.
    pub fn dispatch(&self, action: A) {
        let reducer = self.reducer;
        self.set.update(move |state| reducer(state, action));
    }
}

impl<S, A> ShallowEq for Dispatch<S, A> {
    fn shallow_eq(&self, other: &Self) -> bool {
        self.set.shallow_eq(&other.set)
    }
}

impl<S, A> fmt::Debug for Dispatch<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatch").field("set", &self.set).finish()
    }
}

// =============================================================================
// Hooks
// =============================================================================

impl RenderCx<'_> {
    /// State slot initialized with `initial` on the first render.
    ///
    /// A queued value that is [`ShallowEq`]-equal to the current one does
    /// not re-render: numbers compare by value (NaN equals NaN, `0.0` and
    /// `-0.0` differ), `Rc` handles by allocation.
    pub fn use_state<T>(&mut self, initial: T) -> Result<(T, SetState<T>), HookError>
    where
        T: Clone + ShallowEq + 'static,
    {
        self.use_state_with(move || initial)
    }

    /// State slot whose initializer runs only on the first render.
    pub fn use_state_with<T, F>(&mut self, init: F) -> Result<(T, SetState<T>), HookError>
    where
        T: Clone + ShallowEq + 'static,
        F: FnOnce() -> T,
    {
        let instance = self.instance;
        let (index, slot) = self.store.claim_state(|| StateSlot::new(init()))?;
        let value = slot
            .get::<T>()
            .cloned()
            .ok_or(HookError::SlotTypeMismatch { instance, index })?;

        Ok((value, SetState::new(Rc::clone(self.channel), index)))
    }

    /// State slot updated through a reducer.
    ///
    /// ```ignore
    /// fn counter(state: &i32, action: Action) -> i32 {
    ///     match action {
    ///         Action::Increment => state + 1,
    ///         Action::Reset => 0,
    ///     }
    /// }
    ///
    /// let (count, dispatch) = cx.use_reducer(counter, 0)?;
    /// ```
    pub fn use_reducer<S, A>(
        &mut self,
        reducer: fn(&S, A) -> S,
        initial: S,
    ) -> Result<(S, Dispatch<S, A>), HookError>
    where
        S: Clone + ShallowEq + 'static,
        A: 'static,
    {
        let (state, set) = self.use_state(initial)?;
        Ok((state, Dispatch { set, reducer }))
    }
}
