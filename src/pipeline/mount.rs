//! Component instances - mount, render, commit, unmount.
//!
//! An [`Instance`] is the handle returned by
//! [`Runtime::mount`](crate::Runtime::mount). Whoever holds it owns the
//! instance: dropping the handle unmounts it.
//!
//! # Example
//!
//! ```ignore
//! let runtime = Runtime::new();
//!
//! let counter = runtime.mount(|cx| {
//!     let (count, set_count) = cx.use_state(0)?;
//!     Ok((count, set_count))
//! })?;
//!
//! let (_, set_count) = counter.output().unwrap();
//! runtime.act(|| set_count.update(|n| n + 1))?;
//! assert_eq!(counter.output().unwrap().0, 1);
//!
//! counter.unmount();
//! ```

use std::cell::{Cell, RefCell, RefMut};
use std::rc::{Rc, Weak};

use crate::config::RuntimeConfig;
use crate::deps::ShallowEq;
use crate::error::{Diagnostics, HookError};
use crate::hooks::RenderCx;
use crate::scheduler::{
    apply_updates, commit_effects, discard_scheduled, run_unmount_cleanups, EffectContext,
    FlushOutcome, Schedulable, Scheduler, UpdateChannel,
};
use crate::slots::SlotStore;
use crate::types::{HookKind, InstanceFlags, InstanceId, MountState};

/// Render function of an instance with props `P` and output `O`.
pub type RenderFn<P, O> = Box<dyn FnMut(&mut RenderCx<'_>, &P) -> Result<O, HookError>>;

// =============================================================================
// Instance Internals
// =============================================================================

/// Everything that is only touched while rendering or unmounting.
struct InstanceCore<P, O> {
    render_fn: Option<RenderFn<P, O>>,
    props: P,
    store: SlotStore,
}

pub(crate) struct InstanceShared<P: 'static, O: 'static> {
    id: InstanceId,
    channel: Rc<UpdateChannel>,
    core: RefCell<InstanceCore<P, O>>,
    state: Cell<MountState>,
    flags: Cell<InstanceFlags>,
    render_count: Cell<u64>,
    output: RefCell<Option<O>>,
    diagnostics: Diagnostics,
    config: Rc<RuntimeConfig>,
}

impl<P: 'static, O: 'static> InstanceShared<P, O> {
    fn core(&self) -> Result<RefMut<'_, InstanceCore<P, O>>, HookError> {
        self.core.try_borrow_mut().map_err(|_| {
            tracing::warn!(instance = %self.id, "instance re-entered while rendering");
            HookError::Reentrant(self.id)
        })
    }

    fn set_flag(&self, flag: InstanceFlags, on: bool) {
        let mut flags = self.flags.get();
        flags.set(flag, on);
        self.flags.set(flags);
    }

    fn effect_context(&self) -> EffectContext<'_> {
        EffectContext {
            instance: self.id,
            diagnostics: &self.diagnostics,
            catch_panics: self.config.catch_effect_panics,
        }
    }

    /// Run unmount cleanups in reverse order and drop every slot.
    fn unmount(&self) {
        if self.state.get() == MountState::Unmounted {
            return;
        }
        let Ok(mut core) = self.core.try_borrow_mut() else {
            tracing::warn!(instance = %self.id, "unmount requested while rendering; deferred to drop");
            return;
        };

        self.state.set(MountState::Unmounted);
        self.channel.close();
        let cleanups = run_unmount_cleanups(&mut core.store, &self.effect_context());
        core.store.clear();
        let render_fn = core.render_fn.take();
        drop(core);

        self.output.replace(None);
        // Dropping the render function may unmount children it owned.
        drop(render_fn);
        tracing::debug!(instance = %self.id, cleanups, "unmounted");
    }
}

impl<P: 'static, O: Clone + 'static> InstanceShared<P, O> {
    /// Invoke the render function once and commit its effects.
    fn render_pass(&self, core: &mut InstanceCore<P, O>) -> Result<O, HookError> {
        if self.flags.get().contains(InstanceFlags::BROKEN) {
            return Err(HookError::InstanceBroken(self.id));
        }
        if self.state.get() != MountState::Mounted {
            return Err(HookError::NotMounted(self.id));
        }
        let InstanceCore { render_fn, props, store } = core;
        let Some(render_fn) = render_fn.as_mut() else {
            return Err(HookError::NotMounted(self.id));
        };

        store.begin_render();
        self.render_count.set(self.render_count.get() + 1);
        self.set_flag(InstanceFlags::RENDERING, true);
        let result = {
            let mut cx = RenderCx::new(store, &self.channel, &self.diagnostics, &self.config);
            render_fn(&mut cx, props)
        };
        self.set_flag(InstanceFlags::RENDERING, false);

        let rendered = match result.and_then(|rendered| store.finish_render().map(|()| rendered)) {
            Ok(rendered) => rendered,
            Err(err) => {
                discard_scheduled(store);
                if err.is_fatal() {
                    self.set_flag(InstanceFlags::BROKEN, true);
                    tracing::error!(instance = %self.id, error = %err, "structural hook error; instance must be remounted");
                }
                return Err(err);
            }
        };

        self.set_flag(InstanceFlags::COMMITTING, true);
        let effects = commit_effects(store, &self.effect_context());
        self.set_flag(InstanceFlags::COMMITTING, false);
        tracing::trace!(
            instance = %self.id,
            render = self.render_count.get(),
            effects,
            "render committed"
        );

        self.output.replace(Some(rendered.clone()));
        Ok(rendered)
    }

    /// Fold pending updates, then render unconditionally.
    fn render_now(&self, props: Option<P>) -> Result<O, HookError> {
        let mut core = self.core()?;
        if let Some(props) = props {
            core.props = props;
        }
        let updates = self.channel.take();
        apply_updates(&mut core.store, updates);
        self.render_pass(&mut core)
    }
}

impl<P: 'static, O: Clone + 'static> Schedulable for InstanceShared<P, O> {
    fn instance_id(&self) -> InstanceId {
        self.id
    }

    fn flush_updates(&self) -> Result<FlushOutcome, HookError> {
        if self.state.get() == MountState::Unmounted {
            return Ok(FlushOutcome::Dropped);
        }
        let mut core = match self.core() {
            Ok(core) => core,
            Err(err) => {
                self.channel.reschedule();
                return Err(err);
            }
        };

        let updates = self.channel.take_scheduled();
        if updates.is_empty() {
            return Ok(FlushOutcome::Drained);
        }
        if self.flags.get().contains(InstanceFlags::BROKEN) {
            return Err(HookError::InstanceBroken(self.id));
        }
        if !apply_updates(&mut core.store, updates) {
            tracing::trace!(instance = %self.id, "state unchanged; render skipped");
            return Ok(FlushOutcome::BailedOut);
        }

        self.render_pass(&mut core).map(|_| FlushOutcome::Rendered)
    }
}

impl<P: 'static, O: 'static> Drop for InstanceShared<P, O> {
    fn drop(&mut self) {
        self.unmount();
    }
}

// =============================================================================
// Mount
// =============================================================================

/// Create an instance and run its first render and commit.
pub(crate) fn mount_instance<P, O>(
    id: InstanceId,
    props: P,
    render_fn: RenderFn<P, O>,
    scheduler: Weak<Scheduler>,
    diagnostics: Diagnostics,
    config: Rc<RuntimeConfig>,
) -> Result<Instance<P, O>, HookError>
where
    P: 'static,
    O: Clone + 'static,
{
    let shared = Rc::new_cyclic(|weak: &Weak<InstanceShared<P, O>>| {
        let target: Weak<dyn Schedulable> = weak.clone();
        InstanceShared {
            id,
            channel: Rc::new(UpdateChannel::new(id, target, scheduler, diagnostics.clone())),
            core: RefCell::new(InstanceCore {
                render_fn: Some(render_fn),
                props,
                store: SlotStore::new(id),
            }),
            state: Cell::new(MountState::Mounted),
            flags: Cell::new(InstanceFlags::NONE),
            render_count: Cell::new(0),
            output: RefCell::new(None),
            diagnostics,
            config,
        }
    });

    let instance = Instance { shared };
    instance.shared.render_now(None)?;
    tracing::debug!(instance = %id, "mounted");
    Ok(instance)
}

// =============================================================================
// Instance Handle
// =============================================================================

/// Owning handle to a mounted component instance.
pub struct Instance<P: 'static, O: 'static> {
    shared: Rc<InstanceShared<P, O>>,
}

impl<P: 'static, O: 'static> Instance<P, O> {
    pub fn id(&self) -> InstanceId {
        self.shared.id
    }

    pub fn mount_state(&self) -> MountState {
        self.shared.state.get()
    }

    pub fn flags(&self) -> InstanceFlags {
        self.shared.flags.get()
    }

    /// A structural hook error occurred; the instance must be remounted.
    pub fn is_broken(&self) -> bool {
        self.flags().contains(InstanceFlags::BROKEN)
    }

    /// How many times the render function has been invoked.
    pub fn render_count(&self) -> u64 {
        self.shared.render_count.get()
    }

    /// Updates queued since the last render.
    pub fn has_pending_updates(&self) -> bool {
        self.shared.channel.has_pending()
    }

    /// Kinds of the instance's hook slots in declaration order.
    pub fn hook_kinds(&self) -> Result<Vec<HookKind>, HookError> {
        Ok(self.shared.core()?.store.kinds())
    }

    /// Unmount now: run effect cleanups in reverse order and drop all slots.
    pub fn unmount(self) {
        self.shared.unmount();
    }
}

impl<P: 'static, O: Clone + 'static> Instance<P, O> {
    /// Output of the last committed render.
    pub fn output(&self) -> Option<O> {
        self.shared.output.borrow().clone()
    }

    /// Re-render with the current props (a parent-triggered render).
    ///
    /// Queued updates are folded first. The render function always runs.
    pub fn render(&self) -> Result<O, HookError> {
        self.shared.render_now(None)
    }

    /// Re-render with new props.
    pub fn set_props(&self, props: P) -> Result<O, HookError> {
        self.shared.render_now(Some(props))
    }
}

impl<P: ShallowEq + 'static, O: 'static> Instance<P, O> {
    /// Shallow-compare `props` with the props of the last render.
    pub(crate) fn props_shallow_eq(&self, props: &P) -> Result<bool, HookError> {
        Ok(self.shared.core()?.props.shallow_eq(props))
    }
}

impl<P: 'static, O: 'static> std::fmt::Debug for Instance<P, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Instance")
            .field("id", &self.shared.id)
            .field("state", &self.shared.state.get())
            .field("flags", &self.shared.flags.get())
            .field("renders", &self.shared.render_count.get())
            .finish()
    }
}
