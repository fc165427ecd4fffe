//! Primitive types - cleanup and callback handles.

use std::rc::Rc;

// =============================================================================
// Cleanup Function
// =============================================================================

/// Cleanup function returned by an effect.
///
/// Runs right before the effect runs again, and once more at unmount.
pub type Cleanup = Box<dyn FnOnce()>;

/// Box a closure as a [`Cleanup`].
pub fn cleanup(f: impl FnOnce() + 'static) -> Cleanup {
    Box::new(f)
}

// =============================================================================
// Callback Types
// =============================================================================

/// Event callback passed down as a prop.
///
/// `Rc<dyn Fn>` so the same callback can be cloned into closures and
/// compared by address: two callbacks are equal only if they are the same
/// allocation.
pub type Callback<A = ()> = Rc<dyn Fn(A)>;

/// Wrap a closure as a [`Callback`].
pub fn callback<A: 'static>(f: impl Fn(A) + 'static) -> Callback<A> {
    Rc::new(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deps::ShallowEq;
    use std::cell::Cell;

    #[test]
    fn test_callback_identity() {
        let hits = Rc::new(Cell::new(0));
        let hits_clone = hits.clone();

        let cb: Callback<u32> = callback(move |n| hits_clone.set(hits_clone.get() + n));
        let same = cb.clone();
        let other: Callback<u32> = callback(|_| {});

        cb(2);
        same(3);
        assert_eq!(hits.get(), 5);
        assert!(cb.shallow_eq(&same));
        assert!(!cb.shallow_eq(&other));
    }

    #[test]
    fn test_cleanup_runs_once() {
        let ran = Rc::new(Cell::new(0));
        let ran_clone = ran.clone();
        let c = cleanup(move || ran_clone.set(ran_clone.get() + 1));
        c();
        assert_eq!(ran.get(), 1);
    }
}
