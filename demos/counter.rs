//! Counter
//!
//! This example demonstrates the basic dispatch/subscribe loop.
//!
//! Key concepts:
//! - Pure transition function over a JSON payload
//! - Logger interceptor tracing every command
//! - Subscribers notified after each commit
//!
//! Run with: RUST_LOG=info cargo run --example counter

use serde_json::json;
use statecell::core::{Action, Command, Transition};
use statecell::interceptors::logger;
use statecell::StateContainer;
use tracing_subscriber::EnvFilter;

#[derive(Clone, PartialEq, Debug)]
struct Counter {
    count: i64,
}

fn transition() -> Transition<Counter> {
    Transition::new(|state: &Counter, action: &Action| match action.tag.as_str() {
        "INC" => Counter {
            count: state.count + 1,
        },
        "ADD" => Counter {
            count: state.count
                + action
                    .payload
                    .as_ref()
                    .and_then(|p| p.as_i64())
                    .unwrap_or(0),
        },
        _ => state.clone(),
    })
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Counter Example ===\n");

    let container = StateContainer::builder()
        .initial(Counter { count: 0 })
        .transition(transition())
        .interceptor(logger())
        .build()
        .unwrap();

    let handle = container.handle();
    container.subscribe(move || {
        if let Some(state) = handle.get_state() {
            println!("  subscriber sees count = {}", state.count);
        }
    });

    for _ in 0..3 {
        container.dispatch(Command::action("INC")).unwrap();
    }
    container
        .dispatch(Command::with_payload("ADD", json!(10)))
        .unwrap();
    container.dispatch(Command::action("NOOP")).unwrap();

    println!("\nFinal state: {:?}", container.get_state());
    println!("\n=== Example Complete ===");
}
