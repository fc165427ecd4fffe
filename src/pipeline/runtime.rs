//! Runtime - instance ids, diagnostics and the render tick loop.
//!
//! Setter calls only mark instances dirty. Nothing re-renders until the
//! host drives a tick with [`Runtime::flush`], [`Runtime::run_until_idle`]
//! or [`Runtime::act`]. A tick processes the instances that were dirty when
//! it started; updates queued by effects during that tick wait for the next.

use std::cell::Cell;
use std::rc::Rc;

use crate::config::RuntimeConfig;
use crate::error::{Diagnostic, Diagnostics, HookError};
use crate::hooks::RenderCx;
use crate::scheduler::{FlushOutcome, Scheduler};
use crate::types::InstanceId;

use super::mount::{mount_instance, Instance};

/// What one tick did.
#[derive(Debug, Default)]
pub struct TickReport {
    /// Instances whose render function ran.
    pub rendered: Vec<InstanceId>,
    /// Instances whose updates left every slot unchanged.
    pub bailed_out: Vec<InstanceId>,
    /// Instances whose render failed.
    pub errors: Vec<(InstanceId, HookError)>,
}

impl TickReport {
    /// Nothing was processed.
    pub fn is_empty(&self) -> bool {
        self.rendered.is_empty() && self.bailed_out.is_empty() && self.errors.is_empty()
    }

    fn into_first_error(self) -> Result<Self, HookError> {
        let mut report = self;
        if report.errors.is_empty() {
            return Ok(report);
        }
        let (_, err) = report.errors.swap_remove(0);
        Err(err)
    }
}

struct RuntimeShared {
    config: Rc<RuntimeConfig>,
    diagnostics: Diagnostics,
    scheduler: Rc<Scheduler>,
    next_id: Cell<u64>,
}

/// Owns the scheduler every mounted instance reports to.
///
/// Cloning is cheap and yields a handle to the same runtime, which lets a
/// render function mount child instances.
#[derive(Clone)]
pub struct Runtime {
    shared: Rc<RuntimeShared>,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    pub fn with_config(config: RuntimeConfig) -> Self {
        let diagnostics = Diagnostics::new(config.diagnostics_capacity);
        Self {
            shared: Rc::new(RuntimeShared {
                config: Rc::new(config),
                diagnostics,
                scheduler: Rc::new(Scheduler::default()),
                next_id: Cell::new(0),
            }),
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.shared.config
    }

    fn allocate_id(&self) -> InstanceId {
        let id = self.shared.next_id.get();
        self.shared.next_id.set(id + 1);
        InstanceId::new(id)
    }

    // -------------------------------------------------------------------------
    // Mount / unmount
    // -------------------------------------------------------------------------

    /// Mount a component without props. Renders and commits once.
    pub fn mount<O, F>(&self, mut render: F) -> Result<Instance<(), O>, HookError>
    where
        O: Clone + 'static,
        F: FnMut(&mut RenderCx<'_>) -> Result<O, HookError> + 'static,
    {
        self.mount_with_props((), move |cx, _: &()| render(cx))
    }

    /// Mount a component with props. Renders and commits once.
    ///
    /// If the first render fails the instance is unmounted and the error
    /// returned.
    pub fn mount_with_props<P, O, F>(&self, props: P, render: F) -> Result<Instance<P, O>, HookError>
    where
        P: 'static,
        O: Clone + 'static,
        F: FnMut(&mut RenderCx<'_>, &P) -> Result<O, HookError> + 'static,
    {
        mount_instance(
            self.allocate_id(),
            props,
            Box::new(render),
            Rc::downgrade(&self.shared.scheduler),
            self.shared.diagnostics.clone(),
            Rc::clone(&self.shared.config),
        )
    }

    /// Same as [`Instance::unmount`].
    pub fn unmount<P: 'static, O: 'static>(&self, instance: Instance<P, O>) {
        instance.unmount();
    }

    // -------------------------------------------------------------------------
    // Ticks
    // -------------------------------------------------------------------------

    /// Run one tick over the instances dirty right now.
    pub fn flush(&self) -> TickReport {
        let mut report = TickReport::default();

        for target in self.shared.scheduler.take_tick() {
            let Some(instance) = target.upgrade() else {
                continue;
            };
            let id = instance.instance_id();
            match instance.flush_updates() {
                Ok(FlushOutcome::Rendered) => report.rendered.push(id),
                Ok(FlushOutcome::BailedOut) => report.bailed_out.push(id),
                Ok(FlushOutcome::Dropped | FlushOutcome::Drained) => {}
                Err(err) => {
                    tracing::warn!(instance = %id, error = %err, "render failed during tick");
                    report.errors.push((id, err));
                }
            }
        }

        if !report.is_empty() {
            tracing::debug!(
                rendered = report.rendered.len(),
                bailed_out = report.bailed_out.len(),
                errors = report.errors.len(),
                "tick flushed"
            );
        }
        report
    }

    /// Flush ticks until no instance is dirty. Returns the number of ticks run.
    ///
    /// Stops at the first failing tick. Gives up with
    /// [`HookError::UpdateLoop`] after `max_ticks` ticks.
    pub fn run_until_idle(&self) -> Result<usize, HookError> {
        let max_ticks = self.shared.config.max_ticks;
        let mut ticks = 0;

        while !self.shared.scheduler.is_idle() {
            if ticks >= max_ticks {
                tracing::error!(ticks, "updates still pending after the tick limit");
                return Err(HookError::UpdateLoop { ticks });
            }
            self.flush().into_first_error()?;
            ticks += 1;
        }
        Ok(ticks)
    }

    /// Run `handler` (an event handler, a timer callback), then flush until idle.
    pub fn act<R>(&self, handler: impl FnOnce() -> R) -> Result<R, HookError> {
        let result = handler();
        self.run_until_idle()?;
        Ok(result)
    }

    /// Instances waiting for the next tick.
    pub fn pending_instances(&self) -> usize {
        self.shared.scheduler.len()
    }

    /// Drain the recorded diagnostics, oldest first.
    pub fn take_diagnostics(&self) -> Vec<Diagnostic> {
        self.shared.diagnostics.take()
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("config", &self.shared.config)
            .field("next_id", &self.shared.next_id.get())
            .field("pending", &self.shared.scheduler.len())
            .finish()
    }
}
