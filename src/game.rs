//! Game layer for the laser arena.
//!
//! Implements the rules of a four-player, turn-based duel on an 11×11 grid:
//! - Board of empty cells and blocks (finite strength or indestructible)
//! - Roster of four combatants with hit points, a shield and an aim
//! - Turn sequencing over the living combatants
//! - Action validation and the laser ray cast
//! - Match controller with event stream, effects and a bounded log

mod action;
mod board;
mod controller;
mod direction;
mod events;
mod invariants;
mod log;
mod raycast;
mod roster;
mod state;
mod turn;

pub use action::{resolve_action, Action, Command, Resolution};
pub use board::{
    Board, Cell, DamageOutcome, Position, Strength, INDESTRUCTIBLE, MAP_COLS, MAP_ROWS,
    STANDARD_TEMPLATE,
};
pub use controller::{MatchController, TurnOutcome};
pub use direction::Direction;
pub use events::{
    CommandRejection, Effect, EffectKind, EffectRecord, Event, EventKind, MoveRejection,
    SoundCue, HIT_FLASH_DURATION_MS, HIT_SHAKE_AMPLITUDE, HIT_SHAKE_DURATION_MS,
    HIT_SOUND_DURATION_MS, LASER_BEAM_DURATION_MS,
};
pub use invariants::{assert_invariants, check_invariants, InvariantViolation};
pub use log::{MatchLog, MATCH_LOG_CAPACITY};
pub use raycast::{cast_ray, trace, Obstruction, LASER_DAMAGE};
pub use roster::{Combatant, CombatantId, HitOutcome, Roster, DEFAULT_HP, TURN_ORDER};
pub use state::{MatchPhase, MatchState};
pub use turn::{TurnAdvance, TurnSequencer};
