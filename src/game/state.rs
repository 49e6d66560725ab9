//! Match state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::{Board, Combatant, CombatantId, Roster, TurnSequencer};

/// Lifecycle of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPhase {
    /// Not started.
    Idle,
    /// Accepting commands.
    Playing,
    /// One combatant left; terminal until reset.
    Finished,
}

impl fmt::Display for MatchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MatchPhase::Idle => "idle",
            MatchPhase::Playing => "playing",
            MatchPhase::Finished => "finished",
        })
    }
}

/// Complete state of one match.
///
/// Owned by a [`crate::game::MatchController`]; several can coexist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchState {
    /// Current phase.
    pub phase: MatchPhase,
    /// The arena.
    pub board: Board,
    /// The four combatants.
    pub roster: Roster,
    /// Whose turn it is and the round counter.
    pub turn: TurnSequencer,
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchState {
    /// Idle match with the standard board and roster.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: MatchPhase::Idle,
            board: Board::standard(),
            roster: Roster::standard(),
            turn: TurnSequencer::new(),
        }
    }

    /// Playing match built from an explicit board and roster.
    ///
    /// Used to stage scenarios; the first slot is active at round 1.
    #[must_use]
    pub fn with_setup(board: Board, roster: Roster) -> Self {
        Self {
            phase: MatchPhase::Playing,
            board,
            roster,
            turn: TurnSequencer::new(),
        }
    }

    /// Current round number.
    #[must_use]
    pub const fn round(&self) -> u32 {
        self.turn.round()
    }

    /// Combatant whose input is currently accepted.
    #[must_use]
    pub fn active(&self) -> &Combatant {
        self.roster.get(self.turn.active_id())
    }

    /// Check if the match is over.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == MatchPhase::Finished
    }

    /// The sole survivor, once the match is over.
    #[must_use]
    pub fn winner(&self) -> Option<CombatantId> {
        if !self.is_finished() {
            return None;
        }
        let mut alive = self.roster.alive_combatants();
        match (alive.next(), alive.next()) {
            (Some(winner), None) => Some(winner.id),
            _ => None,
        }
    }
}
