//! Hook slots - per-instance positional storage.
//!
//! Each instance owns one [`SlotStore`]; no other instance ever reads it.

mod slot;
mod store;

pub(crate) use slot::{EffectSlot, EffectStatus, HookSlot, MemoSlot, PendingEffect, RefSlot, StateSlot};
pub(crate) use store::SlotStore;
