//! Render Pipeline
//!
//! Connects hooks, the slot store and the scheduler into component
//! instances a host can mount, update and unmount.
//!
//! # Pipeline Architecture
//!
//! ```text
//! setter call → UpdateChannel → Scheduler (dirty) → tick → fold → render → commit effects
//! ```
//!
//! ## Data Flow
//!
//! 1. **render** - the render function runs against a fresh [`RenderCx`](crate::RenderCx)
//! 2. **validate** - the slot cursor must match the slot count of the first render
//! 3. **commit** - scheduled effects run in slot order, each after its old cleanup
//!
//! A failed render commits nothing: its scheduled effects are discarded and
//! the previous output is kept.

pub mod mount;
pub mod runtime;

pub use mount::{Instance, RenderFn};
pub use runtime::{Runtime, TickReport};

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::error::HookError;
    use crate::primitives::cleanup;
    use crate::types::{HookKind, MountState};
    use crate::{deps, Runtime};

    type Log = Rc<RefCell<Vec<String>>>;

    fn log() -> Log {
        Rc::new(RefCell::new(Vec::new()))
    }

    #[test]
    fn test_render_with_props() {
        let runtime = Runtime::new();
        let instance = runtime
            .mount_with_props(2, |cx, factor: &i32| {
                let (base, _) = cx.use_state(10)?;
                Ok(base * factor)
            })
            .unwrap();

        assert_eq!(instance.output(), Some(20));
        assert_eq!(instance.set_props(3).unwrap(), 30);
        assert_eq!(instance.render_count(), 2);
    }

    #[test]
    fn test_hook_kinds_in_order() {
        let runtime = Runtime::new();
        let instance = runtime
            .mount(|cx| {
                cx.use_state(0)?;
                cx.use_memo(|| 1, deps![])?;
                cx.use_effect(|| {}, deps![])?;
                cx.use_ref(|| 0)?;
                Ok(())
            })
            .unwrap();

        assert_eq!(
            instance.hook_kinds().unwrap(),
            vec![HookKind::State, HookKind::Memo, HookKind::Effect, HookKind::Ref]
        );
    }

    #[test]
    fn test_order_violation_breaks_instance() {
        let runtime = Runtime::new();
        let flip = Rc::new(RefCell::new(false));
        let instance = runtime
            .mount({
                let flip = Rc::clone(&flip);
                move |cx| {
                    if *flip.borrow() {
                        cx.use_memo(|| 0, deps![])?;
                    } else {
                        cx.use_state(0)?;
                    }
                    Ok(())
                }
            })
            .unwrap();

        *flip.borrow_mut() = true;
        let err = instance.render().unwrap_err();
        assert!(matches!(err, HookError::HookOrderViolation { index: 0, .. }));
        assert!(instance.is_broken());

        let err = instance.render().unwrap_err();
        assert!(matches!(err, HookError::InstanceBroken(_)));
        assert_eq!(instance.render_count(), 2);
    }

    #[test]
    fn test_failed_render_discards_effects() {
        let runtime = Runtime::new();
        let events = log();
        let fail = Rc::new(RefCell::new(false));
        let instance = runtime
            .mount({
                let events = Rc::clone(&events);
                let fail = Rc::clone(&fail);
                move |cx| {
                    let tick = cx.use_ref(|| 0)?;
                    *tick.borrow_mut() += 1;
                    let n = *tick.borrow();
                    let events = Rc::clone(&events);
                    cx.use_effect(move || events.borrow_mut().push(format!("run {n}")), deps![n])?;
                    if *fail.borrow() {
                        return Err(HookError::render("boom"));
                    }
                    Ok(n)
                }
            })
            .unwrap();

        *fail.borrow_mut() = true;
        assert!(matches!(instance.render(), Err(HookError::Render(_))));
        assert!(!instance.is_broken());
        assert_eq!(instance.output(), Some(1));

        *fail.borrow_mut() = false;
        assert_eq!(instance.render().unwrap(), 3);
        assert_eq!(*events.borrow(), vec!["run 1", "run 3"]);
    }

    #[test]
    fn test_unmount_runs_cleanups_and_drops_updates() {
        let runtime = Runtime::new();
        let events = log();
        let instance = runtime
            .mount({
                let events = Rc::clone(&events);
                move |cx| {
                    let (value, set) = cx.use_state(0)?;
                    let events = Rc::clone(&events);
                    cx.use_effect(
                        move || {
                            let events = Rc::clone(&events);
                            cleanup(move || events.borrow_mut().push("cleanup".to_string()))
                        },
                        deps![],
                    )?;
                    Ok((value, set))
                }
            })
            .unwrap();

        let (_, set) = instance.output().unwrap();
        let id = instance.id();
        runtime.unmount(instance);
        assert_eq!(*events.borrow(), vec!["cleanup"]);

        set.set(5);
        assert_eq!(runtime.pending_instances(), 0);
        assert_eq!(
            runtime.take_diagnostics(),
            vec![crate::Diagnostic::StaleUpdateDropped { instance: id, slot: 0 }]
        );
    }

    #[test]
    fn test_drop_unmounts() {
        let runtime = Runtime::new();
        let events = log();
        let instance = runtime
            .mount({
                let events = Rc::clone(&events);
                move |cx| {
                    let events = Rc::clone(&events);
                    cx.use_effect(
                        move || {
                            let events = Rc::clone(&events);
                            cleanup(move || events.borrow_mut().push("cleanup".to_string()))
                        },
                        deps![],
                    )?;
                    Ok(())
                }
            })
            .unwrap();

        assert_eq!(instance.mount_state(), MountState::Mounted);
        drop(instance);
        assert_eq!(*events.borrow(), vec!["cleanup"]);
    }

    #[test]
    fn test_reentrant_render_is_rejected() {
        let runtime = Runtime::new();
        let slot: Rc<RefCell<Option<Box<dyn Fn() -> Result<(), HookError>>>>> =
            Rc::new(RefCell::new(None));
        let instance = Rc::new(
            runtime
                .mount({
                    let slot = Rc::clone(&slot);
                    move |_| match slot.borrow().as_ref() {
                        Some(render_again) => render_again(),
                        None => Ok(()),
                    }
                })
                .unwrap(),
        );

        let weak = Rc::downgrade(&instance);
        *slot.borrow_mut() = Some(Box::new(move || match weak.upgrade() {
            Some(instance) => instance.render(),
            None => Ok(()),
        }));

        let err = instance.render().unwrap_err();
        assert!(matches!(err, HookError::Reentrant(_)));
        assert!(!instance.is_broken());
    }
}
