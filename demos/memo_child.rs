//! Memo Child Example - skipping child renders with stable callbacks
//!
//! This example demonstrates:
//! - wrapping a child in `MemoComponent`
//! - keeping a callback prop stable with `use_callback`
//! - how an inline callback defeats the memoization
//!
//! Run with: cargo run --example memo_child

use std::rc::Rc;

use spark_hooks::{callback, deps, impl_shallow_eq, Callback, HookError, MemoComponent, Runtime};

struct ButtonProps {
    label: &'static str,
    on_click: Callback,
}
impl_shallow_eq!(ButtonProps { label, on_click });

fn run(stable: bool) -> Result<u64, HookError> {
    let runtime = Runtime::new();
    let button = Rc::new(MemoComponent::new(&runtime, |_, props: &ButtonProps| {
        Ok(format!("<button>{}</button>", props.label))
    }));

    let parent = runtime.mount({
        let button = Rc::clone(&button);
        move |cx| {
            let (count, set_count) = cx.use_state(0u32)?;
            let on_click = if stable {
                cx.use_callback(callback(|()| println!("clicked")), deps![])?
            } else {
                callback(|()| println!("clicked"))
            };
            let markup = button.render(ButtonProps { label: "+1", on_click })?;
            Ok((format!("{markup} {count}"), set_count))
        }
    })?;

    if let Some((_, set_count)) = parent.output() {
        for _ in 0..5 {
            runtime.act(|| set_count.update(|n| n + 1))?;
        }
    }
    if let Some((markup, _)) = parent.output() {
        println!("  last output: {markup}");
    }

    Ok(button.invocations())
}

fn main() -> Result<(), HookError> {
    let _ = tracing_subscriber::fmt::try_init();

    println!("=== spark-hooks Memo Child Example ===\n");

    println!("With use_callback:");
    let stable = run(true)?;
    println!("  child renders: {stable}\n");

    println!("With an inline callback:");
    let inline = run(false)?;
    println!("  child renders: {inline}");

    println!("\n=== Example Complete ===");
    Ok(())
}
