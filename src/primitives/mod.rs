//! Component primitives.
//!
//! - [`Cleanup`] / [`cleanup`] - what an effect hands back for teardown
//! - [`Callback`] / [`callback`] - shared event callbacks passed as props
//! - [`MemoComponent`] - child wrapper that skips renders on unchanged props
//!
//! # Memoized children
//!
//! Props are compared with [`ShallowEq`](crate::ShallowEq): plain values by
//! equality, `Rc` handles by address. Keep callback props stable with
//! `use_callback` or every parent render produces a "changed" prop.
//!
//! ```ignore
//! // CORRECT - same allocation until `step` changes
//! let on_click = cx.use_callback(callback(move |()| set.update(move |n| n + step)), deps![step])?;
//!
//! // WRONG - a fresh Rc every render, the child always re-renders
//! let on_click = callback(move |()| set.update(move |n| n + step));
//! ```

mod memo;
mod types;

pub use memo::MemoComponent;
pub use types::*;
