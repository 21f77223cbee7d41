//! Delayed Increment
//!
//! This example demonstrates procedure commands and deferred effects.
//!
//! Key concepts:
//! - A procedure schedules a dispatch on an external timer queue
//! - The container never waits; the timer fires a later, independent dispatch
//! - A deferred effect describes a dispatch that runs only when asked
//!
//! Run with: RUST_LOG=debug cargo run --example delayed_increment

use statecell::core::{Action, Command, Transition};
use statecell::effects::DeferredEffect;
use statecell::interceptors::{defer_when, logger, procedures};
use statecell::StateContainer;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

#[derive(Clone, PartialEq, Debug)]
struct Counter {
    count: i64,
}

/// Stand-in for an event loop's timer facility.
#[derive(Clone, Default)]
struct TimerQueue {
    pending: Rc<RefCell<VecDeque<Box<dyn FnOnce()>>>>,
}

impl TimerQueue {
    fn schedule(&self, callback: impl FnOnce() + 'static) {
        self.pending.borrow_mut().push_back(Box::new(callback));
    }

    fn tick(&self) -> bool {
        let next = self.pending.borrow_mut().pop_front();
        match next {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Delayed Increment Example ===\n");

    let container = StateContainer::builder()
        .initial(Counter { count: 0 })
        .transition(Transition::new(|state: &Counter, action: &Action| {
            match action.tag.as_str() {
                "INC" | "INC_LATER" => Counter {
                    count: state.count + 1,
                },
                _ => state.clone(),
            }
        }))
        .interceptor(logger())
        .interceptor(procedures())
        .interceptor(defer_when("defer-later", |action: &Action| {
            action.is("INC_LATER")
        }))
        .build()
        .unwrap();

    let timers = TimerQueue::default();
    let scheduler = timers.clone();
    container
        .dispatch(Command::procedure("INC_ASYNC", move |store| {
            let store = store.clone();
            scheduler.schedule(move || {
                if let Err(error) = store.dispatch(Command::action("INC")) {
                    eprintln!("timer dispatch failed: {error}");
                }
            });
        }))
        .unwrap();
    println!("After scheduling: {:?}", container.get_state());

    while timers.tick() {}
    println!("After timers fired: {:?}", container.get_state());

    let pending = container
        .dispatch(Command::action("INC_LATER"))
        .unwrap()
        .into_deferred()
        .unwrap();
    println!("Deferred, not yet run: {:?}", container.get_state());

    let report = pending.map(|result| match result {
        Ok(outcome) => format!("settled: {:?}", outcome.state()),
        Err(error) => format!("failed: {error}"),
    });
    println!("{}", report.run());

    let greeting = DeferredEffect::of("effects run only on request").memoize();
    println!("{}", greeting.run());

    println!("\n=== Example Complete ===");
}
