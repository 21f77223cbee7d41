//! Property-based tests for the container and deferred effects.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use proptest::prelude::*;
use serde_json::json;
use statecell::container::{dispatch_fn, DispatchFn, StoreHandle};
use statecell::core::{Action, Command, Transition};
use statecell::effects::DeferredEffect;
use statecell::interceptors::from_fn;
use statecell::{ContainerBuilder, StateContainer};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Clone, PartialEq, Debug)]
struct Counter {
    count: i64,
}

fn counter_transition() -> Transition<Counter> {
    Transition::new(|state: &Counter, action: &Action| match action.tag.as_str() {
        "INC" => Counter {
            count: state.count + 1,
        },
        "DEC" => Counter {
            count: state.count - 1,
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

prop_compose! {
    fn arbitrary_action()(variant in 0..4u8, amount in -50i64..50) -> Action {
        match variant {
            0 => Action::new("INC"),
            1 => Action::new("DEC"),
            2 => Action::with_payload("ADD", json!(amount)),
            _ => Action::new("NOOP"),
        }
    }
}

type Log = Rc<RefCell<Vec<String>>>;

fn recorder(index: usize, log: Log) -> impl statecell::Interceptor<Counter> {
    from_fn(
        format!("recorder-{index}"),
        move |_store: StoreHandle<Counter>, next: DispatchFn<Counter>| {
            let log = Rc::clone(&log);
            dispatch_fn(move |command: Command<Counter>| {
                log.borrow_mut().push(format!("in:{index}"));
                let result = next(command);
                log.borrow_mut().push(format!("out:{index}"));
                result
            })
        },
    )
}

fn step(op: u8, n: i64) -> i64 {
    match op {
        0 => n.wrapping_add(3),
        1 => n.wrapping_mul(2),
        2 => n.wrapping_sub(7),
        _ => -n,
    }
}

fn effect_fn(op: u8, calls: Rc<Cell<usize>>) -> impl Fn(i64) -> DeferredEffect<i64> {
    move |n| {
        let calls = Rc::clone(&calls);
        DeferredEffect::from_fn(move || {
            calls.set(calls.get() + 1);
            step(op, n)
        })
    }
}

proptest! {
    #[test]
    fn dispatch_matches_direct_replay(actions in prop::collection::vec(arbitrary_action(), 0..20)) {
        let transition = counter_transition();
        let container = StateContainer::new(Counter { count: 0 }, transition.clone(), Vec::new()).unwrap();

        let mut replayed = Counter { count: 0 };
        for action in &actions {
            container.dispatch(Command::Action(action.clone())).unwrap();
            replayed = transition.apply(&replayed, action).unwrap();
        }

        prop_assert_eq!(&*container.get_state(), &replayed);
    }

    #[test]
    fn interceptors_follow_onion_order(count in 1usize..6) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let mut builder = ContainerBuilder::new()
            .initial(Counter { count: 0 })
            .transition(counter_transition());
        for index in 0..count {
            builder = builder.interceptor(recorder(index, Rc::clone(&log)));
        }
        let container = builder.build().unwrap();

        container.dispatch(Command::action("INC")).unwrap();

        let expected: Vec<String> = (0..count)
            .map(|i| format!("in:{i}"))
            .chain((0..count).rev().map(|i| format!("out:{i}")))
            .collect();
        prop_assert_eq!(&*log.borrow(), &expected);
    }

    #[test]
    fn every_subscriber_sees_post_state_once_in_order(count in 0usize..8) {
        let container = StateContainer::new(Counter { count: 0 }, counter_transition(), Vec::new()).unwrap();
        let seen: Rc<RefCell<Vec<(usize, Option<i64>)>>> = Rc::new(RefCell::new(Vec::new()));

        for index in 0..count {
            let seen = Rc::clone(&seen);
            let handle = container.handle();
            container.subscribe(move || {
                let observed = handle.get_state().map(|s| s.count);
                seen.borrow_mut().push((index, observed));
            });
        }

        container.dispatch(Command::action("INC")).unwrap();

        let expected: Vec<(usize, Option<i64>)> = (0..count).map(|i| (i, Some(1))).collect();
        prop_assert_eq!(&*seen.borrow(), &expected);
    }

    #[test]
    fn effect_construction_is_lazy(start in -100i64..100, op in 0..4u8) {
        let calls = Rc::new(Cell::new(0));
        let counted = Rc::clone(&calls);

        let effect = DeferredEffect::from_fn(move || {
            counted.set(counted.get() + 1);
            start
        })
        .map(move |n| step(op, n))
        .chain(effect_fn(op, Rc::clone(&calls)));

        prop_assert_eq!(calls.get(), 0);
        effect.run();
        prop_assert_eq!(calls.get(), 2);
    }

    #[test]
    fn chain_is_associative(start in -1000i64..1000, f_op in 0..4u8, g_op in 0..4u8) {
        let left_calls = Rc::new(Cell::new(0));
        let right_calls = Rc::new(Cell::new(0));

        let left = DeferredEffect::of(start)
            .chain(effect_fn(f_op, Rc::clone(&left_calls)))
            .chain(effect_fn(g_op, Rc::clone(&left_calls)));

        let f = effect_fn(f_op, Rc::clone(&right_calls));
        let g = Rc::new(effect_fn(g_op, Rc::clone(&right_calls)));
        let right = DeferredEffect::of(start).chain(move |x| {
            let g = Rc::clone(&g);
            f(x).chain(move |y| g(y))
        });

        prop_assert_eq!(left.run(), right.run());
        prop_assert_eq!(left_calls.get(), right_calls.get());
        prop_assert_eq!(left.run(), right.run());
        prop_assert_eq!(left_calls.get(), 4);
        prop_assert_eq!(right_calls.get(), 4);
    }

    #[test]
    fn map_identity_preserves_result(start in -1000i64..1000) {
        let effect = DeferredEffect::of(start);
        prop_assert_eq!(effect.clone().map(|n| n).run(), effect.run());
    }

    #[test]
    fn action_roundtrip_serialization(action in arbitrary_action()) {
        let json = serde_json::to_string(&action).unwrap();
        let deserialized: Action = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(action, deserialized);
    }
}
