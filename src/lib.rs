//! # spark-hooks
//!
//! Hook runtime for function components in Rust.
//!
//! A component is a render function. It keeps state, cached values and side
//! effects across renders by calling hooks on the [`RenderCx`] it receives.
//!
//! ## Architecture
//!
//! Each mounted [`Instance`] owns a positional slot store. Hooks claim slots
//! in call order, so the n-th hook call of every render addresses the same
//! slot. State setters never re-render synchronously; they queue updates and
//! mark the instance dirty:
//! ```text
//! setter → UpdateChannel → Scheduler → tick → fold → render → commit effects
//! ```
//!
//! There is no global state. Every instance belongs to a [`Runtime`] and every
//! hook call goes through an explicit context.
//!
//! ## Modules
//!
//! - [`types`] - Core types (InstanceId, HookKind, MountState, InstanceFlags)
//! - [`deps`] - Dependency lists and same-value / shallow comparison
//! - [`hooks`] - `use_state`, `use_memo`, `use_callback`, `use_effect`, `use_ref`
//! - [`pipeline`] - Runtime, instances and the tick loop
//! - [`primitives`] - Cleanup / callback handles and [`MemoComponent`]
//!
//! ## Example
//!
//! ```ignore
//! use spark_hooks::{cleanup, deps, Runtime};
//!
//! let runtime = Runtime::new();
//! let counter = runtime.mount(|cx| {
//!     let (count, set_count) = cx.use_state(0)?;
//!     cx.use_effect(move || {
//!         println!("mounted with {count}");
//!         cleanup(|| println!("unmounted"))
//!     }, deps![])?;
//!     Ok((count, set_count))
//! })?;
//!
//! let (_, set_count) = counter.output().unwrap();
//! runtime.act(|| set_count.update(|n| n + 1))?;
//! counter.unmount();
//! ```

pub mod config;
pub mod deps;
pub mod error;
pub mod hooks;
pub mod pipeline;
pub mod primitives;
pub mod types;

mod scheduler;
mod slots;

// Re-export commonly used items
pub use types::*;

pub use config::RuntimeConfig;

pub use deps::{
    compare_deps, shallow_equal, Dep, Deps, DepsComparison, RefIdentity, ShallowEq, StoredDeps,
    ALWAYS,
};

pub use error::{BoxError, Diagnostic, EffectPhase, HookError};

pub use hooks::{Dispatch, EffectOutput, RenderCx, SetState};

pub use pipeline::{Instance, RenderFn, Runtime, TickReport};

pub use primitives::{callback, cleanup, Callback, Cleanup, MemoComponent};
