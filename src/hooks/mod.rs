//! Hooks - the calls a render function makes against its instance.
//!
//! There is no ambient "current component". Every render function receives
//! a [`RenderCx`] for the instance being rendered, and every hook is a
//! method on it. The context walks the instance's slots in call order, so
//! hooks must be called unconditionally and in the same order every render.
//!
//! ## Available Hooks
//!
//! - [`RenderCx::use_state`] / [`RenderCx::use_state_with`] - state with a setter
//! - [`RenderCx::use_reducer`] - state driven by a reducer function
//! - [`RenderCx::use_memo`] / [`RenderCx::try_use_memo`] - cached values
//! - [`RenderCx::use_callback`] - cached callbacks (stable identity)
//! - [`RenderCx::use_effect`] - side effects after commit
//! - [`RenderCx::use_ref`] - mutable cell that never triggers renders
//!
//! ## Example
//!
//! ```ignore
//! let counter = runtime.mount(|cx| {
//!     let (count, set_count) = cx.use_state(0)?;
//!     let doubled = cx.use_memo(move || count * 2, deps![count])?;
//!
//!     cx.use_effect(move || {
//!         println!("count is now {count}");
//!     }, deps![count])?;
//!
//!     Ok((doubled, set_count))
//! })?;
//! ```

mod effect;
mod memo;
mod refs;
mod state;

pub use effect::EffectOutput;
pub use state::{Dispatch, SetState};

use std::rc::Rc;

use crate::config::RuntimeConfig;
use crate::deps::{compare_deps, Dep, DepsComparison, StoredDeps};
use crate::error::{Diagnostic, Diagnostics};
use crate::scheduler::UpdateChannel;
use crate::slots::SlotStore;
use crate::types::InstanceId;

/// Render context: the explicit handle hooks are called on.
pub struct RenderCx<'a> {
    instance: InstanceId,
    store: &'a mut SlotStore,
    channel: &'a Rc<UpdateChannel>,
    diagnostics: &'a Diagnostics,
    config: &'a RuntimeConfig,
}

impl<'a> RenderCx<'a> {
    pub(crate) fn new(
        store: &'a mut SlotStore,
        channel: &'a Rc<UpdateChannel>,
        diagnostics: &'a Diagnostics,
        config: &'a RuntimeConfig,
    ) -> Self {
        Self {
            instance: channel.instance(),
            store,
            channel,
            diagnostics,
            config,
        }
    }

    /// Instance being rendered.
    pub fn instance_id(&self) -> InstanceId {
        self.instance
    }
}

/// Compare a slot's stored deps with this render's, reporting shape changes.
fn deps_unchanged(
    diagnostics: &Diagnostics,
    report_shape: bool,
    instance: InstanceId,
    slot: usize,
    previous: &StoredDeps,
    next: Option<&[Dep]>,
) -> bool {
    match compare_deps(previous, next) {
        DepsComparison::Equal => true,
        DepsComparison::Changed => false,
        DepsComparison::ShapeChanged { previous, next } => {
            if report_shape {
                diagnostics.emit(Diagnostic::DependencyShapeChanged {
                    instance,
                    slot,
                    previous,
                    next,
                });
            }
            false
        }
    }
}
