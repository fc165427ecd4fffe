//! Memo-Component Wrapper - skip child renders when props are unchanged.
//!
//! A [`MemoComponent`] wraps a render function. Each time the parent renders
//! it, the new props are compared field-by-field with the previous ones
//! using [`ShallowEq`]. If every field is the same (values equal,
//! reference-like fields the same allocation) and the child has no pending
//! state updates of its own, the cached output is returned and the render
//! function is not invoked.
//!
//! Pair it with [`use_callback`](crate::RenderCx::use_callback) in the
//! parent: an inline `Rc` callback is a new allocation every render and
//! defeats the comparison.
//!
//! # Example
//!
//! ```ignore
//! struct RowProps {
//!     label: Rc<str>,
//!     on_click: Callback,
//! }
//! impl_shallow_eq!(RowProps { label, on_click });
//!
//! let row = MemoComponent::new(&runtime, |cx, props: &RowProps| {
//!     Ok(format!("[{}]", props.label))
//! });
//!
//! let on_click = cx.use_callback(callback(move |()| set_count.update(|n| n + 1)), deps![])?;
//! let rendered = row.render(RowProps { label, on_click })?;
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::deps::ShallowEq;
use crate::error::HookError;
use crate::hooks::RenderCx;
use crate::pipeline::{Instance, RenderFn, Runtime};
use crate::types::InstanceId;

pub struct MemoComponent<P: 'static, O: 'static> {
    runtime: Runtime,
    render_fn: Rc<RefCell<RenderFn<P, O>>>,
    instance: RefCell<Option<Instance<P, O>>>,
    skipped: Cell<u64>,
}

impl<P: ShallowEq + 'static, O: Clone + 'static> MemoComponent<P, O> {
    /// Wrap `render`. The child is mounted on the first [`render`](Self::render).
    pub fn new<F>(runtime: &Runtime, render: F) -> Self
    where
        F: FnMut(&mut RenderCx<'_>, &P) -> Result<O, HookError> + 'static,
    {
        Self {
            runtime: runtime.clone(),
            render_fn: Rc::new(RefCell::new(Box::new(render))),
            instance: RefCell::new(None),
            skipped: Cell::new(0),
        }
    }

    /// Render the child with `props`, or return its cached output if the
    /// props are shallow-equal to the last ones.
    pub fn render(&self, props: P) -> Result<O, HookError> {
        {
            let current = self.instance.borrow();
            if let Some(instance) = current.as_ref() {
                if !instance.has_pending_updates() && instance.props_shallow_eq(&props)? {
                    if let Some(output) = instance.output() {
                        self.skipped.set(self.skipped.get() + 1);
                        tracing::trace!(instance = %instance.id(), "props unchanged; render skipped");
                        return Ok(output);
                    }
                }
                return instance.set_props(props);
            }
        }

        let instance = self.mount(props)?;
        let output = instance
            .output()
            .ok_or(HookError::NotMounted(instance.id()))?;
        self.instance.replace(Some(instance));
        Ok(output)
    }

    fn mount(&self, props: P) -> Result<Instance<P, O>, HookError> {
        let render_fn = Rc::clone(&self.render_fn);
        self.runtime.mount_with_props(props, move |cx, props: &P| {
            let mut render = render_fn.borrow_mut();
            (&mut *render)(cx, props)
        })
    }
}

impl<P: 'static, O: 'static> MemoComponent<P, O> {
    /// Times the wrapped render function actually ran.
    pub fn invocations(&self) -> u64 {
        self.instance
            .borrow()
            .as_ref()
            .map_or(0, |instance| instance.render_count())
    }

    /// Times a render was skipped because props were unchanged.
    pub fn skipped(&self) -> u64 {
        self.skipped.get()
    }

    pub fn instance_id(&self) -> Option<InstanceId> {
        self.instance.borrow().as_ref().map(|instance| instance.id())
    }

    /// Unmount the child, if it was ever mounted.
    pub fn unmount(self) {
        if let Some(instance) = self.instance.take() {
            instance.unmount();
        }
    }
}
