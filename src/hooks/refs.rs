//! `use_ref`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::HookError;
use crate::slots::RefSlot;

use super::RenderCx;

impl RenderCx<'_> {
    /// Mutable cell kept for the life of the instance.
    ///
    /// Writes never schedule a render. Use it for values effects need to
    /// share across runs, such as a "still mounted" flag or a timer handle.
    pub fn use_ref<T: 'static>(
        &mut self,
        init: impl FnOnce() -> T,
    ) -> Result<Rc<RefCell<T>>, HookError> {
        let instance = self.instance;
        let (index, slot) = self
            .store
            .claim_ref(|| RefSlot::new(Rc::new(RefCell::new(init()))))?;

        slot.cell()
            .downcast::<RefCell<T>>()
            .map_err(|_| HookError::SlotTypeMismatch { instance, index })
    }
}
