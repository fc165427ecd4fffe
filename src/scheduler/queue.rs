//! Render Scheduler - the set of instances with queued updates.
//!
//! Setters mark their instance dirty here. A tick takes the whole set at
//! once, so anything queued while the tick runs (from effects, for example)
//! lands in the next tick.

use std::cell::RefCell;
use std::rc::Weak;

use crate::error::HookError;
use crate::types::InstanceId;

/// What flushing one instance's queued updates did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FlushOutcome {
    /// Updates changed state; the render function ran once and committed.
    Rendered,
    /// Folded values equal the current ones; the render function was not invoked.
    BailedOut,
    /// Instance unmounted before the tick ran.
    Dropped,
    /// A direct render already consumed the queue; nothing left to do.
    Drained,
}

/// An instance the scheduler can re-render without knowing its props or output types.
pub(crate) trait Schedulable {
    fn instance_id(&self) -> InstanceId;
    fn flush_updates(&self) -> Result<FlushOutcome, HookError>;
}

#[derive(Default)]
pub(crate) struct Scheduler {
    dirty: RefCell<Vec<Weak<dyn Schedulable>>>,
}

impl Scheduler {
    pub(crate) fn schedule(&self, target: Weak<dyn Schedulable>) {
        self.dirty.borrow_mut().push(target);
    }

    /// Take every instance scheduled so far, in the order they were first marked.
    pub(crate) fn take_tick(&self) -> Vec<Weak<dyn Schedulable>> {
        std::mem::take(&mut *self.dirty.borrow_mut())
    }

    pub(crate) fn is_idle(&self) -> bool {
        self.dirty.borrow().is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.dirty.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    struct Probe(InstanceId);

    impl Schedulable for Probe {
        fn instance_id(&self) -> InstanceId {
            self.0
        }

        fn flush_updates(&self) -> Result<FlushOutcome, HookError> {
            Ok(FlushOutcome::BailedOut)
        }
    }

    #[test]
    fn test_take_tick_preserves_order_and_empties() {
        let scheduler = Scheduler::default();
        let a: Rc<dyn Schedulable> = Rc::new(Probe(InstanceId::new(1)));
        let b: Rc<dyn Schedulable> = Rc::new(Probe(InstanceId::new(2)));

        scheduler.schedule(Rc::downgrade(&b));
        scheduler.schedule(Rc::downgrade(&a));
        assert_eq!(scheduler.len(), 2);

        let tick: Vec<InstanceId> = scheduler
            .take_tick()
            .iter()
            .filter_map(Weak::upgrade)
            .map(|s| s.instance_id())
            .collect();
        assert_eq!(tick, vec![InstanceId::new(2), InstanceId::new(1)]);
        assert!(scheduler.is_idle());
    }
}
