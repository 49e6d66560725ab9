//! Match invariants - consistency checks that detect bugs.
//!
//! No sequence of commands should ever trip these. They are run after every
//! command by the soak harness and the property tests.

use std::fmt;

use crate::game::{MatchPhase, MatchState, DEFAULT_HP};

/// Invariant violation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl InvariantViolation {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all match invariants.
///
/// Returns the violations found, or an empty list if everything holds.
#[must_use]
pub fn check_invariants(state: &MatchState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let board = &state.board;

    for combatant in state.roster.iter() {
        let id = combatant.id;

        if combatant.alive != (combatant.hp > 0) {
            violations.push(InvariantViolation::new(format!(
                "{id} has alive={} with hp {}",
                combatant.alive, combatant.hp
            )));
        }
        if combatant.hp > DEFAULT_HP {
            violations.push(InvariantViolation::new(format!(
                "{id} has hp {} > max {DEFAULT_HP}",
                combatant.hp
            )));
        }
        if !board.in_bounds(combatant.position) {
            violations.push(InvariantViolation::new(format!(
                "{id} is off the board at {}",
                combatant.position
            )));
            continue;
        }
        if combatant.alive
            && board
                .tile_at(combatant.position)
                .is_some_and(|cell| cell.is_block())
        {
            violations.push(InvariantViolation::new(format!(
                "{id} stands on a block at {}",
                combatant.position
            )));
        }
    }

    // Shared cells among the living
    let alive: Vec<_> = state.roster.alive_combatants().collect();
    for (i, a) in alive.iter().enumerate() {
        for b in &alive[i + 1..] {
            if a.position == b.position {
                violations.push(InvariantViolation::new(format!(
                    "{} and {} share cell {}",
                    a.id, b.id, a.position
                )));
            }
        }
    }

    let alive_count = alive.len();
    match state.phase {
        MatchPhase::Idle => {}
        MatchPhase::Finished if alive_count != 1 => {
            violations.push(InvariantViolation::new(format!(
                "match finished with {alive_count} combatants alive"
            )));
        }
        MatchPhase::Playing => {
            if alive_count <= 1 {
                violations.push(InvariantViolation::new(format!(
                    "match still playing with {alive_count} combatants alive"
                )));
            }
            if !state.active().alive {
                violations.push(InvariantViolation::new(format!(
                    "active combatant {} is dead",
                    state.active().id
                )));
            }
        }
        MatchPhase::Finished => {}
    }

    violations
}

/// Assert all match invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(state: &MatchState) {
    let violations = check_invariants(state);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Match invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_state: &MatchState) {}
