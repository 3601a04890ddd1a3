//! Property-based tests for the transition engine.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated configurations and command sequences.

use passive_fsm::{fsm_enum, FsmBuilder, FsmError, StateMachine, TransitionContext};
use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fsm_enum! {
    enum Node {
        Source,
        T0,
        T1,
        T2,
        T3,
        T4,
        T5,
    }
}

fsm_enum! {
    enum Go {
        Go,
    }
}

const TARGETS: [Node; 6] = [Node::T0, Node::T1, Node::T2, Node::T3, Node::T4, Node::T5];

fsm_enum! {
    enum Light {
        Green,
        Yellow,
        Red,
    }
}

fsm_enum! {
    enum Signal {
        SwitchNext,
        Reset,
        Hold,
    }
}

type LightCtx = TransitionContext<Light, Signal>;

prop_compose! {
    fn arbitrary_light()(variant in 0..3usize) -> Light {
        [Light::Green, Light::Yellow, Light::Red][variant]
    }
}

prop_compose! {
    fn arbitrary_signal()(variant in 0..3usize) -> Signal {
        [Signal::SwitchNext, Signal::Reset, Signal::Hold][variant]
    }
}

/// Green -> Yellow -> Red -> Yellow -> Green ..., with `Reset` forcing Red
/// from anywhere and `Hold` never registered.
fn traffic_light(initial: Light) -> FsmBuilder<Light, Signal> {
    let mut builder: FsmBuilder<Light, Signal> = FsmBuilder::new().unwrap();
    builder.from_state(initial).as_initial_state().unwrap();
    builder
        .from_state(Light::Green)
        .on_command(Signal::SwitchNext)
        .unwrap()
        .set_state(Light::Yellow)
        .on_command(Signal::Reset)
        .unwrap()
        .set_state(Light::Red);
    builder
        .from_state(Light::Yellow)
        .on_command_if(Signal::SwitchNext, |ctx: &LightCtx| {
            ctx.previous_state() == Some(Light::Green)
        })
        .unwrap()
        .set_state(Light::Red)
        .on_command_if(Signal::SwitchNext, |ctx: &LightCtx| {
            ctx.previous_state() == Some(Light::Red)
        })
        .unwrap()
        .set_state(Light::Green)
        .on_command(Signal::Reset)
        .unwrap()
        .set_state(Light::Red);
    builder
        .from_state(Light::Red)
        .on_command(Signal::SwitchNext)
        .unwrap()
        .set_state(Light::Yellow)
        .on_command(Signal::Reset)
        .unwrap()
        .set_state(Light::Red);
    builder
}

/// Reference model of `traffic_light`.
fn expected_next(current: Light, previous: Option<Light>, signal: Signal) -> Option<Light> {
    match (current, signal) {
        (_, Signal::Hold) => None,
        (_, Signal::Reset) => Some(Light::Red),
        (Light::Green, Signal::SwitchNext) => Some(Light::Yellow),
        (Light::Red, Signal::SwitchNext) => Some(Light::Yellow),
        (Light::Yellow, Signal::SwitchNext) => match previous {
            Some(Light::Green) => Some(Light::Red),
            Some(Light::Red) => Some(Light::Green),
            _ => None,
        },
    }
}

proptest! {
    #[test]
    fn first_true_guard_wins(outcomes in prop::collection::vec(any::<bool>(), 1..=6)) {
        let evaluations: Vec<Arc<AtomicUsize>> =
            outcomes.iter().map(|_| Arc::new(AtomicUsize::new(0))).collect();
        let mut builder: FsmBuilder<Node, Go> = FsmBuilder::new().unwrap();
        builder.from_state(Node::Source).as_initial_state().unwrap();
        for (i, outcome) in outcomes.iter().copied().enumerate() {
            let counter = Arc::clone(&evaluations[i]);
            builder
                .from_state(Node::Source)
                .on_command_if(Go::Go, move |_: &TransitionContext<Node, Go>| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    outcome
                })
                .unwrap()
                .set_state(TARGETS[i]);
        }
        let mut machine = builder.create_state_machine_with_start(true).unwrap();

        let result = machine.trigger_command(Go::Go);

        let winner = outcomes.iter().position(|outcome| *outcome);
        match winner {
            Some(i) => {
                prop_assert!(result.is_ok());
                prop_assert_eq!(machine.current_state().unwrap(), TARGETS[i]);
            }
            None => {
                let not_supported = matches!(result, Err(FsmError::CommandNotSupported { .. }));
                prop_assert!(not_supported);
                prop_assert_eq!(machine.current_state().unwrap(), Node::Source);
            }
        }

        let last_evaluated = winner.unwrap_or(outcomes.len() - 1);
        for (i, counter) in evaluations.iter().enumerate() {
            let expected = usize::from(i <= last_evaluated);
            prop_assert_eq!(counter.load(Ordering::SeqCst), expected);
        }
    }

    #[test]
    fn random_walk_matches_model(
        initial in arbitrary_light(),
        signals in prop::collection::vec(arbitrary_signal(), 0..40)
    ) {
        let mut machine = traffic_light(initial).create_state_machine().unwrap();
        machine.start().unwrap();
        let mut current = initial;
        let mut previous = None;

        for signal in signals {
            let result = machine.trigger_command(signal);
            match expected_next(current, previous, signal) {
                Some(next) => {
                    prop_assert!(result.is_ok());
                    previous = Some(current);
                    current = next;
                }
                None => {
                    let not_supported =
                        matches!(result, Err(FsmError::CommandNotSupported { .. }));
                    prop_assert!(not_supported);
                }
            }
            prop_assert_eq!(machine.current_state().unwrap(), current);
            prop_assert_eq!(machine.previous_state(), previous);
        }
    }

    #[test]
    fn lifecycle_errors_hold_for_any_initial_state(initial in arbitrary_light()) {
        let mut machine = traffic_light(initial).create_state_machine().unwrap();

        let before_start = matches!(machine.current_state(), Err(FsmError::InvalidOperation(_)));
        prop_assert!(before_start);
        let trigger_before_start = matches!(
            machine.trigger_command(Signal::SwitchNext),
            Err(FsmError::InvalidOperation(_))
        );
        prop_assert!(trigger_before_start);

        machine.start().unwrap();
        prop_assert_eq!(machine.current_state().unwrap(), initial);
        prop_assert_eq!(machine.previous_state(), None);

        let second_start = matches!(machine.start(), Err(FsmError::InvalidOperation(_)));
        prop_assert!(second_start);
        prop_assert_eq!(machine.current_state().unwrap(), initial);
    }

    #[test]
    fn repeated_unguarded_registration_is_rejected(
        state in arbitrary_light(),
        signal in arbitrary_signal(),
        target in arbitrary_light()
    ) {
        let mut builder: FsmBuilder<Light, Signal> = FsmBuilder::new().unwrap();
        builder.from_state(state).on_command(signal).unwrap().set_state(target);

        let again = builder.from_state(state).on_command(signal).err();
        let guarded = builder
            .from_state(state)
            .on_command_if(signal, |_: &LightCtx| true)
            .err();

        prop_assert!(matches!(again, Some(FsmError::CommandRegistration(_))));
        prop_assert!(matches!(guarded, Some(FsmError::CommandRegistration(_))));
    }
}
