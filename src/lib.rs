// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Laser Arena: a deterministic, turn-based four-player laser duel.
//!
//! Four combatants start on the edges of an 11×11 board dotted with blocks.
//! On its turn a combatant moves, turns its shield, or fires a laser that
//! stops at the first block or living combatant in its path. The last one
//! standing wins.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   CLI (play, run, replay, watch)    │
//! ├──────────────────┬──────────────────┤
//! │  Replay/Render   │   Soak harness   │
//! ├──────────────────┴──────────────────┤
//! │  Match controller + game rules      │
//! └─────────────────────────────────────┘
//! ```
//!
//! The engine is single-threaded and never blocks. Every command resolves
//! synchronously into a list of events and time-stamped effect records.

pub mod error;
pub mod game;
pub mod replay;
pub mod soak;

pub use error::{ParseError, ParseResult};

// Re-export key game types at crate root for convenience
pub use game::{
    Action, Board, Combatant, CombatantId, Command, Direction, Event, EventKind, MatchController,
    MatchPhase, MatchState, Position, TurnOutcome,
};
pub use replay::{Recording, ReplayEngine};
pub use soak::{run_soak, SoakConfig, SoakResult};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_reexports_play_a_turn() {
        let mut controller = MatchController::started();
        let outcome = controller.submit(Command::new(
            CombatantId::Up,
            Action::Shield,
            Direction::Left,
        ));
        assert!(outcome.consumed);
        assert_eq!(controller.state().phase, MatchPhase::Playing);
    }
}
