//! Seeded random playouts for shaking out rule bugs.
//!
//! Provides a pure function interface: `(seed, config) -> SoakResult`
//!
//! Each soak plays one match from the start with a deterministic PRNG picking
//! commands, checks every invariant after each command, and stops when the
//! match finishes or the command budget runs out. Matches share nothing, so
//! callers can run as many soaks in parallel as they like.

// PRNG output is reduced to small ranges on purpose
#![allow(clippy::cast_possible_truncation)]

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::{
    check_invariants, Action, CombatantId, Command, Direction, EventKind, InvariantViolation,
    MatchController, TURN_ORDER,
};

/// Deterministic PRNG using xorshift64.
#[derive(Debug, Clone, Copy)]
struct Rng {
    state: u64,
}

impl Rng {
    /// Create a new RNG with the given seed.
    const fn new(seed: u64) -> Self {
        // xorshift is stuck at zero
        let state = if seed == 0 { 0x5555_5555_5555_5555 } else { seed };
        Self { state }
    }

    /// Generate next random u64.
    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate random u32 in [0, max).
    fn next_u32(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        (self.next_u64() % u64::from(max)) as u32
    }

    /// True with probability `percent`/100.
    fn chance(&mut self, percent: u32) -> bool {
        self.next_u32(100) < percent
    }

    fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[self.next_u32(items.len() as u32) as usize]
    }
}

/// Configuration for a soak run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoakConfig {
    /// Commands submitted before giving up on a match.
    pub max_commands: u32,
    /// Percent of commands addressed to a random, possibly off-turn, actor.
    pub off_turn_percent: u32,
    /// Percent of inputs sent as unparsable text.
    pub garbage_percent: u32,
}

impl Default for SoakConfig {
    fn default() -> Self {
        Self {
            max_commands: 5000,
            off_turn_percent: 10,
            garbage_percent: 2,
        }
    }
}

/// Final result of one soak.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoakResult {
    /// The seed used for this soak.
    pub seed: u64,
    /// Sole survivor, if the match finished.
    pub winner: Option<CombatantId>,
    /// Round reached when the soak stopped.
    pub rounds: u32,
    /// Inputs submitted, including refused ones.
    pub commands: u32,
    /// Inputs that used up a turn.
    pub consumed: u32,
    /// Inputs that did not.
    pub rejected: u32,
    /// Elimination order (first eliminated is index 0).
    pub elimination_order: Vec<CombatantId>,
}

impl SoakResult {
    /// Check if the match reached a winner within the budget.
    #[must_use]
    pub fn finished(&self) -> bool {
        self.winner.is_some()
    }
}

/// Error type for soak runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SoakError {
    /// Configuration cannot produce a meaningful run.
    #[error("invalid soak config: {0}")]
    InvalidConfig(&'static str),
    /// A consistency check failed after a command.
    #[error("seed {seed}: after command {index} ({command}): {}", first_message(.violations))]
    InvariantViolated {
        /// Seed of the failing soak.
        seed: u64,
        /// Zero-based index of the offending input.
        index: u32,
        /// Text of the offending input.
        command: String,
        /// Everything that failed.
        violations: Vec<InvariantViolation>,
    },
}

fn first_message(violations: &[InvariantViolation]) -> &str {
    violations.first().map_or("", |v| v.message.as_str())
}

/// Play one random match with the given seed.
///
/// # Determinism
///
/// Given the same seed and config, this function always produces the same
/// `SoakResult`.
///
/// # Errors
///
/// Returns an error if:
/// - `max_commands` is zero or a percentage exceeds 100
/// - Any invariant fails after a command
pub fn run_soak(seed: u64, config: &SoakConfig) -> Result<SoakResult, SoakError> {
    if config.max_commands == 0 {
        return Err(SoakError::InvalidConfig("max_commands must be positive"));
    }
    if config.off_turn_percent > 100 || config.garbage_percent > 100 {
        return Err(SoakError::InvalidConfig("percentages must be at most 100"));
    }

    let mut rng = Rng::new(seed);
    let mut controller = MatchController::started();
    let mut result = SoakResult {
        seed,
        winner: None,
        rounds: 1,
        commands: 0,
        consumed: 0,
        rejected: 0,
        elimination_order: Vec::new(),
    };

    for index in 0..config.max_commands {
        let (text, outcome) = if rng.chance(config.garbage_percent) {
            let text = "fire the laser";
            (text.to_string(), controller.submit_text(text))
        } else {
            let command = random_command(&mut rng, &controller, config);
            (command.to_string(), controller.submit(command))
        };

        result.commands += 1;
        if outcome.consumed {
            result.consumed += 1;
        } else {
            result.rejected += 1;
        }
        result.elimination_order.extend(outcome.events.iter().filter_map(|e| match e.kind {
            EventKind::Eliminated { target } => Some(target),
            _ => None,
        }));

        let violations = check_invariants(controller.state());
        if !violations.is_empty() {
            warn!("seed {seed}: {} invariant violation(s) after {text:?}", violations.len());
            return Err(SoakError::InvariantViolated {
                seed,
                index,
                command: text,
                violations,
            });
        }

        if controller.state().is_finished() {
            break;
        }
    }

    result.winner = controller.winner();
    result.rounds = controller.state().round();
    debug!(
        "seed {seed}: {} commands, winner {:?}, round {}",
        result.commands, result.winner, result.rounds
    );
    Ok(result)
}

/// Pick a command, usually for the active combatant.
fn random_command(rng: &mut Rng, controller: &MatchController, config: &SoakConfig) -> Command {
    let actor = if rng.chance(config.off_turn_percent) {
        rng.pick(&TURN_ORDER)
    } else {
        controller.active_id()
    };
    // Shots end matches; favor them.
    let action = match rng.next_u32(10) {
        0..=4 => Action::Shoot,
        5..=7 => Action::Move,
        _ => Action::Shield,
    };
    Command::new(actor, action, rng.pick(&Direction::ALL))
}
