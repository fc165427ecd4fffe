//! Scheduling - update batching, render scheduling and effect commit.
//!
//! - [`batch`] - per-instance update queue, folding and bail-out
//! - [`queue`] - instances waiting for the next tick
//! - [`effects`] - effect commit and unmount cleanup walks

pub(crate) mod batch;
pub(crate) mod effects;
pub(crate) mod queue;

pub(crate) use batch::{apply_updates, Update, UpdateChannel};
pub(crate) use effects::{commit_effects, discard_scheduled, run_unmount_cleanups, EffectContext};
pub(crate) use queue::{FlushOutcome, Schedulable, Scheduler};
