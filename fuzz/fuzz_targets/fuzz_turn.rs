#![no_main]

//! Match turn fuzzer.
//!
//! Drives a match with arbitrary structured commands and raw text lines,
//! checking the match invariants after every submission. A rejected
//! submission must leave the state untouched.

use arbitrary::Arbitrary;
use laser_arena::game::{check_invariants, TURN_ORDER};
use laser_arena::{Action, Command, Direction, MatchController, MatchPhase};
use libfuzzer_sys::fuzz_target;

/// A fuzzer-generated submission.
#[derive(Arbitrary, Debug)]
enum FuzzInput {
    /// A command from whoever is active.
    OnTurn { action: u8, direction: u8 },
    /// A command from an arbitrary combatant.
    Any { actor: u8, action: u8, direction: u8 },
    /// A raw text line.
    Text(String),
    /// Restart the match.
    Restart,
}

fn pick<T: Copy>(items: &[T], raw: u8) -> T {
    items[usize::from(raw) % items.len()]
}

fuzz_target!(|inputs: Vec<FuzzInput>| {
    let mut controller = MatchController::started();

    for input in inputs.into_iter().take(2000) {
        let before = controller.state().clone();
        let outcome = match input {
            FuzzInput::OnTurn { action, direction } => controller.submit(Command::new(
                controller.active_id(),
                pick(&Action::ALL, action),
                pick(&Direction::ALL, direction),
            )),
            FuzzInput::Any {
                actor,
                action,
                direction,
            } => controller.submit(Command::new(
                pick(&TURN_ORDER, actor),
                pick(&Action::ALL, action),
                pick(&Direction::ALL, direction),
            )),
            FuzzInput::Text(line) => controller.submit_text(&line),
            FuzzInput::Restart => {
                controller.start();
                assert_eq!(controller.phase(), MatchPhase::Playing);
                continue;
            }
        };

        if !outcome.consumed {
            assert_eq!(controller.state(), &before, "rejected input changed state");
        }

        let violations = check_invariants(controller.state());
        assert!(violations.is_empty(), "Invariant violations: {violations:?}");
    }
});
