//! Counter Example - state, memo and batched updates
//!
//! This example demonstrates:
//! - `use_state` with a setter
//! - `use_memo` recomputing only when its deps change
//! - several setter calls in one tick producing one render
//! - setting an equal value producing no render
//!
//! Run with: cargo run --example counter

use spark_hooks::{deps, HookError, Runtime};

fn main() -> Result<(), HookError> {
    let _ = tracing_subscriber::fmt::try_init();

    println!("=== spark-hooks Counter Example ===\n");

    let runtime = Runtime::new();
    let counter = runtime.mount(|cx| {
        let (count, set_count) = cx.use_state(0i64)?;
        let square = cx.use_memo(
            move || {
                println!("  (computing square of {count})");
                count * count
            },
            deps![count],
        )?;
        println!("  render: count={count} square={square}");
        Ok((count, set_count))
    })?;

    let Some((_, set_count)) = counter.output() else {
        return Ok(());
    };

    println!("\nThree increments in one tick:");
    runtime.act(|| {
        set_count.update(|n| n + 1);
        set_count.update(|n| n + 1);
        set_count.update(|n| n + 1);
    })?;

    println!("\nSetting the same value again:");
    runtime.act(|| set_count.set(3))?;
    println!("  (no render)");

    println!("\nRenders: {}", counter.render_count());
    counter.unmount();

    println!("\n=== Example Complete ===");
    Ok(())
}
