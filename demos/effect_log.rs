//! Effect Example - effect runs, cleanups and unmount
//!
//! This example demonstrates:
//! - an effect with `deps![]` that runs once after mount
//! - an effect keyed on a value, cleaned up before each re-run
//! - cleanups running in reverse order at unmount
//!
//! Run with: cargo run --example effect_log

use std::cell::RefCell;
use std::rc::Rc;

use spark_hooks::{cleanup, deps, HookError, Runtime};

fn main() -> Result<(), HookError> {
    let _ = tracing_subscriber::fmt::try_init();

    println!("=== spark-hooks Effect Example ===\n");

    let log = Rc::new(RefCell::new(Vec::<String>::new()));
    let runtime = Runtime::new();

    let subscription = runtime.mount_with_props("news", {
        let log = Rc::clone(&log);
        move |cx, topic: &&'static str| {
            let topic = *topic;
            let (messages, set_messages) = cx.use_state(0u32)?;

            let mount_log = Rc::clone(&log);
            cx.use_effect(
                move || {
                    mount_log.borrow_mut().push("mounted".into());
                    cleanup(move || mount_log.borrow_mut().push("unmounted".into()))
                },
                deps![],
            )?;

            let topic_log = Rc::clone(&log);
            cx.use_effect(
                move || {
                    topic_log.borrow_mut().push(format!("subscribe {topic}"));
                    cleanup(move || topic_log.borrow_mut().push(format!("unsubscribe {topic}")))
                },
                deps![topic],
            )?;

            Ok((messages, set_messages))
        }
    })?;

    subscription.set_props("news")?;
    subscription.set_props("sports")?;

    if let Some((_, set_messages)) = subscription.output() {
        runtime.act(|| set_messages.update(|n| n + 1))?;
    }

    subscription.unmount();

    println!("Effect log:");
    for (i, entry) in log.borrow().iter().enumerate() {
        println!("  {i}: {entry}");
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
