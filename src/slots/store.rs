//! Hook Slot Store - ordered slots with positional identity.
//!
//! Slots are created lazily during the first render, one per hook call, and
//! matched by position on every later render. The store validates the match
//! as it goes:
//! - same position, different kind → `HookOrderViolation`
//! - more calls than the first render made → `HookCountMismatch`
//! - fewer calls → `HookCountMismatch` when the render finishes

use crate::error::HookError;
use crate::types::{HookKind, InstanceId};

use super::slot::{EffectSlot, HookSlot, MemoSlot, RefSlot, StateSlot};

pub(crate) struct SlotStore {
    instance: InstanceId,
    slots: Vec<HookSlot>,
    cursor: usize,
    /// Set once a render completed; the slot list is fixed from then on.
    sealed: bool,
}

impl SlotStore {
    pub(crate) fn new(instance: InstanceId) -> Self {
        Self {
            instance,
            slots: Vec::new(),
            cursor: 0,
            sealed: false,
        }
    }

    pub(crate) fn begin_render(&mut self) {
        self.cursor = 0;
    }

    /// Check the hook count of the render that just returned.
    pub(crate) fn finish_render(&mut self) -> Result<(), HookError> {
        if self.sealed && self.cursor != self.slots.len() {
            return Err(HookError::HookCountMismatch {
                instance: self.instance,
                expected: self.slots.len(),
                found: self.cursor,
            });
        }
        self.sealed = true;
        Ok(())
    }

    /// Claim the slot at the cursor, creating it on the first render.
    pub(crate) fn claim(
        &mut self,
        kind: HookKind,
        init: impl FnOnce() -> HookSlot,
    ) -> Result<(usize, &mut HookSlot), HookError> {
        let index = self.cursor;

        if let Some(existing) = self.slots.get(index) {
            let expected = existing.kind();
            if expected != kind {
                return Err(HookError::HookOrderViolation {
                    instance: self.instance,
                    index,
                    expected,
                    found: kind,
                });
            }
        } else if self.sealed {
            return Err(HookError::HookCountMismatch {
                instance: self.instance,
                expected: self.slots.len(),
                found: index + 1,
            });
        } else {
            self.slots.push(init());
        }

        self.cursor += 1;
        Ok((index, &mut self.slots[index]))
    }

    pub(crate) fn claim_state(
        &mut self,
        init: impl FnOnce() -> StateSlot,
    ) -> Result<(usize, &mut StateSlot), HookError> {
        let instance = self.instance;
        match self.claim(HookKind::State, || HookSlot::State(init()))? {
            (index, HookSlot::State(slot)) => Ok((index, slot)),
            (index, other) => Err(kind_error(instance, index, other.kind(), HookKind::State)),
        }
    }

    pub(crate) fn claim_memo(&mut self) -> Result<(usize, &mut MemoSlot), HookError> {
        let instance = self.instance;
        match self.claim(HookKind::Memo, || HookSlot::Memo(MemoSlot::default()))? {
            (index, HookSlot::Memo(slot)) => Ok((index, slot)),
            (index, other) => Err(kind_error(instance, index, other.kind(), HookKind::Memo)),
        }
    }

    pub(crate) fn claim_effect(&mut self) -> Result<(usize, &mut EffectSlot), HookError> {
        let instance = self.instance;
        match self.claim(HookKind::Effect, || HookSlot::Effect(EffectSlot::default()))? {
            (index, HookSlot::Effect(slot)) => Ok((index, slot)),
            (index, other) => Err(kind_error(instance, index, other.kind(), HookKind::Effect)),
        }
    }

    pub(crate) fn claim_ref(
        &mut self,
        init: impl FnOnce() -> RefSlot,
    ) -> Result<(usize, &mut RefSlot), HookError> {
        let instance = self.instance;
        match self.claim(HookKind::Ref, || HookSlot::Ref(init()))? {
            (index, HookSlot::Ref(slot)) => Ok((index, slot)),
            (index, other) => Err(kind_error(instance, index, other.kind(), HookKind::Ref)),
        }
    }

    // =========================================================================
    // Access outside render
    // =========================================================================

    pub(crate) fn state(&self, index: usize) -> Option<&StateSlot> {
        match self.slots.get(index) {
            Some(HookSlot::State(slot)) => Some(slot),
            _ => None,
        }
    }

    pub(crate) fn state_mut(&mut self, index: usize) -> Option<&mut StateSlot> {
        match self.slots.get_mut(index) {
            Some(HookSlot::State(slot)) => Some(slot),
            _ => None,
        }
    }

    /// Effect slots in ascending declaration order.
    pub(crate) fn effects_mut(&mut self) -> impl Iterator<Item = (usize, &mut EffectSlot)> {
        self.slots.iter_mut().enumerate().filter_map(|(index, slot)| match slot {
            HookSlot::Effect(effect) => Some((index, effect)),
            _ => None,
        })
    }

    /// Effect slots in descending declaration order.
    pub(crate) fn effects_rev_mut(&mut self) -> impl Iterator<Item = (usize, &mut EffectSlot)> {
        self.slots
            .iter_mut()
            .enumerate()
            .rev()
            .filter_map(|(index, slot)| match slot {
                HookSlot::Effect(effect) => Some((index, effect)),
                _ => None,
            })
    }

    pub(crate) fn kinds(&self) -> Vec<HookKind> {
        self.slots.iter().map(HookSlot::kind).collect()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    /// Drop every slot. Used after unmount cleanups ran.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.cursor = 0;
    }
}

fn kind_error(instance: InstanceId, index: usize, expected: HookKind, found: HookKind) -> HookError {
    HookError::HookOrderViolation {
        instance,
        index,
        expected,
        found,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SlotStore {
        SlotStore::new(InstanceId::new(0))
    }

    #[test]
    fn test_slots_created_on_first_render_and_reused() {
        let mut store = store();

        store.begin_render();
        let (index, slot) = store.claim_state(|| StateSlot::new(1i32)).unwrap();
        assert_eq!(index, 0);
        slot.replace(Box::new(5i32));
        store.claim_memo().unwrap();
        store.finish_render().unwrap();
        assert_eq!(store.kinds(), vec![HookKind::State, HookKind::Memo]);

        store.begin_render();
        let (_, slot) = store.claim_state(|| StateSlot::new(100i32)).unwrap();
        assert_eq!(slot.get::<i32>(), Some(&5), "existing slot reused, initializer ignored");
        store.claim_memo().unwrap();
        store.finish_render().unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_order_violation() {
        let mut store = store();
        store.begin_render();
        store.claim_state(|| StateSlot::new(0u8)).unwrap();
        store.claim_effect().unwrap();
        store.finish_render().unwrap();

        store.begin_render();
        store.claim_state(|| StateSlot::new(0u8)).unwrap();
        let err = store.claim_memo().err().unwrap();
        assert!(matches!(
            err,
            HookError::HookOrderViolation { index: 1, expected: HookKind::Effect, found: HookKind::Memo, .. }
        ));
    }

    #[test]
    fn test_extra_hook_is_count_mismatch() {
        let mut store = store();
        store.begin_render();
        store.claim_memo().unwrap();
        store.finish_render().unwrap();

        store.begin_render();
        store.claim_memo().unwrap();
        let err = store.claim_memo().err().unwrap();
        assert!(matches!(err, HookError::HookCountMismatch { expected: 1, found: 2, .. }));
    }

    #[test]
    fn test_missing_hook_is_count_mismatch() {
        let mut store = store();
        store.begin_render();
        store.claim_memo().unwrap();
        store.claim_effect().unwrap();
        store.finish_render().unwrap();

        store.begin_render();
        store.claim_memo().unwrap();
        let err = store.finish_render().err().unwrap();
        assert!(matches!(err, HookError::HookCountMismatch { expected: 2, found: 1, .. }));
    }

    #[test]
    fn test_unsealed_store_grows_after_aborted_first_render() {
        let mut store = store();
        store.begin_render();
        store.claim_memo().unwrap();
        // render aborted before finish_render

        store.begin_render();
        store.claim_memo().unwrap();
        store.claim_effect().unwrap();
        store.finish_render().unwrap();
        assert_eq!(store.kinds(), vec![HookKind::Memo, HookKind::Effect]);
    }

    #[test]
    fn test_effect_iteration_order() {
        let mut store = store();
        store.begin_render();
        store.claim_effect().unwrap();
        store.claim_state(|| StateSlot::new(())).unwrap();
        store.claim_effect().unwrap();
        store.claim_effect().unwrap();
        store.finish_render().unwrap();

        let forward: Vec<usize> = store.effects_mut().map(|(i, _)| i).collect();
        let backward: Vec<usize> = store.effects_rev_mut().map(|(i, _)| i).collect();
        assert_eq!(forward, vec![0, 2, 3]);
        assert_eq!(backward, vec![3, 2, 0]);
    }
}
