//! Property-based tests for match mechanics.
//!
//! These tests drive matches with arbitrary command sequences and verify
//! the rules hold after every step.
//! Run with: cargo test --release prop_match

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use laser_arena::game::{check_invariants, MatchLog, TURN_ORDER};
use laser_arena::soak::{run_soak, SoakConfig};
use laser_arena::{Action, Command, Direction, MatchController, MatchPhase};

fn arb_command() -> impl Strategy<Value = Command> {
    (0usize..4, 0usize..3, 0usize..4).prop_map(|(actor, action, direction)| {
        Command::new(
            TURN_ORDER[actor],
            Action::ALL[action],
            Direction::ALL[direction],
        )
    })
}

/// Mostly on-turn commands, so matches actually progress.
fn arb_turn() -> impl Strategy<Value = (bool, Command)> {
    (prop::bool::weighted(0.85), arb_command())
}

fn log_lines(log: &MatchLog) -> Vec<String> {
    log.iter().map(str::to_string).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Invariants hold after every command, whatever is submitted.
    #[test]
    fn prop_invariants_hold(turns in prop::collection::vec(arb_turn(), 1..400)) {
        let mut controller = MatchController::started();
        for (on_turn, command) in turns {
            let command = if on_turn {
                Command::new(controller.active_id(), command.action, command.direction)
            } else {
                command
            };
            controller.submit(command);
            let violations = check_invariants(controller.state());
            prop_assert!(violations.is_empty(), "{command}: {violations:?}");
        }
    }

    /// The turn moves only after a consumed command; the round grows only on wrap.
    #[test]
    fn prop_turn_protocol(turns in prop::collection::vec(arb_turn(), 1..300)) {
        let mut controller = MatchController::started();
        for (on_turn, command) in turns {
            let command = if on_turn {
                Command::new(controller.active_id(), command.action, command.direction)
            } else {
                command
            };
            let before = controller.state().clone();
            let outcome = controller.submit(command);
            let after = controller.state();

            if !outcome.consumed {
                prop_assert_eq!(after, &before);
                continue;
            }

            let (old, new) = (before.turn.active_index(), after.turn.active_index());
            if after.phase == MatchPhase::Finished {
                prop_assert_eq!(new, old);
                prop_assert_eq!(after.round(), before.round());
            } else {
                prop_assert_ne!(new, old);
                let expected = if new <= old { before.round() + 1 } else { before.round() };
                prop_assert_eq!(after.round(), expected);
                prop_assert!(after.active().alive);
            }
        }
    }

    /// Same commands, same match.
    #[test]
    fn prop_deterministic(commands in prop::collection::vec(arb_command(), 1..200)) {
        let mut a = MatchController::started();
        let mut b = MatchController::started();
        for command in &commands {
            let oa = a.submit(*command);
            let ob = b.submit(*command);
            prop_assert_eq!(oa, ob);
        }
        prop_assert_eq!(a.state(), b.state());
        prop_assert_eq!(log_lines(a.log()), log_lines(b.log()));
    }

    /// Unparsable text never changes state or consumes the turn.
    #[test]
    fn prop_garbage_text_is_inert(text in "[a-z ]{0,30}") {
        let mut controller = MatchController::started();
        let before = controller.state().clone();
        let parsed = text.parse::<Command>().is_ok();
        let outcome = controller.submit_text(&text);
        if !parsed {
            prop_assert!(!outcome.consumed);
            prop_assert_eq!(controller.state(), &before);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Soaks pass every invariant check and are reproducible.
    #[test]
    fn prop_soak_reproducible(seed in any::<u64>()) {
        let config = SoakConfig { max_commands: 1500, ..SoakConfig::default() };
        let first = run_soak(seed, &config).unwrap();
        let second = run_soak(seed, &config).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.commands, first.consumed + first.rejected);
    }
}
