//! Events and effect records emitted by the engine.
//!
//! Events are the authoritative record of what a command did. Effect records
//! are hints for a renderer: each has a start time and a lifetime, and the
//! engine never reads them back.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::{CombatantId, Direction, Position};

/// Lifetime of a laser beam effect.
pub const LASER_BEAM_DURATION_MS: u32 = 1000;

/// Lifetime of a hit flash effect.
pub const HIT_FLASH_DURATION_MS: u32 = 700;

/// Lifetime of a hit shake effect.
pub const HIT_SHAKE_DURATION_MS: u32 = 260;

/// Peak displacement of a hit shake, in pixels.
pub const HIT_SHAKE_AMPLITUDE: f32 = 4.5;

/// Lifetime of a hit sound cue.
pub const HIT_SOUND_DURATION_MS: u32 = 180;

/// Why a move did not happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MoveRejection {
    /// Target cell is off the board.
    OutOfBounds,
    /// Target cell holds a block.
    Blocked,
    /// Target cell holds a living combatant.
    Occupied,
}

/// Why a command was refused before it reached the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommandRejection {
    /// The match is not in progress.
    NotPlaying,
    /// The actor is not the active combatant.
    NotActive,
    /// The actor has been eliminated.
    ActorDead,
    /// The command text did not parse.
    Unparsable,
}

/// Kind-specific payload of an [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum EventKind {
    /// A fresh match began.
    MatchStarted,
    /// Input was refused without touching state.
    CommandRejected {
        /// Reason for the refusal.
        reason: CommandRejection,
    },
    /// The actor stepped to a neighbouring cell.
    Moved {
        /// Direction of travel.
        direction: Direction,
        /// Cell left.
        from: Position,
        /// Cell entered.
        to: Position,
    },
    /// The actor tried to step somewhere it cannot go.
    MoveRejected {
        /// Direction attempted.
        direction: Direction,
        /// Reason the cell was unavailable.
        reason: MoveRejection,
    },
    /// The actor turned its shield.
    ShieldRepositioned {
        /// New shield facing.
        direction: Direction,
    },
    /// The actor tried to fire through its own shield.
    ShotRejected {
        /// Direction attempted.
        direction: Direction,
    },
    /// The laser left the board without hitting anything.
    BeamMiss {
        /// Direction fired.
        direction: Direction,
        /// Last on-board cell the beam crossed.
        endpoint: Position,
    },
    /// The laser chipped a destructible block.
    BlockWeakened {
        /// Block cell.
        at: Position,
        /// Strength left.
        remaining: u8,
    },
    /// The laser broke a destructible block.
    BlockDestroyed {
        /// Former block cell, now empty.
        at: Position,
    },
    /// The laser stopped on an indestructible block.
    BlockIndestructibleHit {
        /// Block cell.
        at: Position,
    },
    /// The target's shield faced the incoming laser.
    ShieldBlocked {
        /// Combatant that was shot.
        target: CombatantId,
        /// Side the laser arrived from.
        incoming: Direction,
    },
    /// The laser damaged a combatant.
    Hit {
        /// Combatant that was shot.
        target: CombatantId,
        /// Damage dealt.
        damage: u8,
        /// Hit points left.
        remaining_hp: u8,
    },
    /// A combatant's hit points reached zero.
    Eliminated {
        /// Combatant taken out.
        target: CombatantId,
    },
    /// Exactly one combatant is left; the actor won.
    MatchWon,
    /// The turn passed to the next living combatant.
    TurnAdvanced {
        /// Newly active combatant.
        next: CombatantId,
        /// Round after the hand-off.
        round: u32,
    },
}

/// Something that happened, attributed to a combatant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Combatant the event belongs to.
    pub actor: CombatantId,
    /// What happened.
    #[serde(flatten)]
    pub kind: EventKind,
}

impl Event {
    /// Create a new event.
    #[must_use]
    pub const fn new(actor: CombatantId, kind: EventKind) -> Self {
        Self { actor, kind }
    }

    /// Short machine-friendly name of the event kind.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self.kind {
            EventKind::MatchStarted => "match-started",
            EventKind::CommandRejected { .. } => "command-rejected",
            EventKind::Moved { .. } => "moved",
            EventKind::MoveRejected { .. } => "move-rejected",
            EventKind::ShieldRepositioned { .. } => "shield-repositioned",
            EventKind::ShotRejected { .. } => "shot-rejected",
            EventKind::BeamMiss { .. } => "beam-miss",
            EventKind::BlockWeakened { .. } => "block-weakened",
            EventKind::BlockDestroyed { .. } => "block-destroyed",
            EventKind::BlockIndestructibleHit { .. } => "block-indestructible-hit",
            EventKind::ShieldBlocked { .. } => "shield-blocked",
            EventKind::Hit { .. } => "hit",
            EventKind::Eliminated { .. } => "eliminated",
            EventKind::MatchWon => "match-won",
            EventKind::TurnAdvanced { .. } => "turn-advanced",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let actor = self.actor;
        match self.kind {
            EventKind::MatchStarted => {
                f.write_str("Match started. Turn order: Up -> Left -> Down -> Right.")
            }
            EventKind::CommandRejected { reason } => match reason {
                CommandRejection::NotPlaying => {
                    write!(f, "{actor} cannot act: match is not running.")
                }
                CommandRejection::NotActive => write!(f, "{actor} cannot act out of turn."),
                CommandRejection::ActorDead => write!(f, "{actor} is eliminated and cannot act."),
                CommandRejection::Unparsable => {
                    write!(f, "{actor} issued an unrecognized command.")
                }
            },
            EventKind::Moved { direction, .. } => write!(f, "{actor} moved {direction}."),
            EventKind::MoveRejected { reason, .. } => match reason {
                MoveRejection::OutOfBounds => write!(f, "{actor} cannot move out of map."),
                MoveRejection::Blocked => write!(f, "{actor} cannot move into a block."),
                MoveRejection::Occupied => write!(f, "{actor} cannot move into another player."),
            },
            EventKind::ShieldRepositioned { direction } => {
                write!(f, "{actor} moved shield to {direction}.")
            }
            EventKind::ShotRejected { direction } => write!(
                f,
                "{actor} cannot shoot toward {direction} because their shield is there."
            ),
            EventKind::BeamMiss { direction, .. } => {
                write!(f, "{actor} shot {direction}, but hit nothing.")
            }
            EventKind::BlockWeakened { at, remaining } => {
                write!(f, "Laser weakened block at {at} to {remaining}.")
            }
            EventKind::BlockDestroyed { at } => write!(f, "Laser destroyed block at {at}."),
            EventKind::BlockIndestructibleHit { at } => {
                write!(f, "Laser hit an indestructible block at {at}.")
            }
            EventKind::ShieldBlocked { target, incoming } => write!(
                f,
                "{actor} shot {target}, but shield blocked from {incoming}."
            ),
            EventKind::Hit {
                target,
                damage,
                remaining_hp,
            } => write!(
                f,
                "{actor} hit {target} for {damage} damage (HP {remaining_hp})."
            ),
            EventKind::Eliminated { target } => write!(f, "{target} is eliminated."),
            EventKind::MatchWon => write!(f, "{actor} wins the match."),
            EventKind::TurnAdvanced { next, round } => {
                write!(f, "Round {round}: {next} to act.")
            }
        }
    }
}

/// Audio cue attached to a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SoundCue {
    /// Laser struck a block.
    Block,
    /// Laser struck an unshielded combatant.
    Player,
}

/// Kind of transient visual or audio effect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "kebab-case")]
pub enum EffectKind {
    /// Beam drawn from `origin` to `position`.
    Beam,
    /// Outline flash on the struck cell.
    HitFlash,
    /// Jitter of whatever occupies the struck cell.
    HitShake {
        /// Peak displacement, in pixels.
        amplitude: f32,
    },
    /// One-shot sound.
    Sound {
        /// Which sound to play.
        cue: SoundCue,
    },
}

/// An unstamped effect produced while resolving a command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    /// What to show or play.
    #[serde(flatten)]
    pub kind: EffectKind,
    /// Cell the effect starts from (the shooter, for beams).
    pub origin: Position,
    /// Cell the effect lands on.
    pub position: Position,
    /// How long the effect lasts.
    pub duration_ms: u32,
}

impl Effect {
    /// Beam from `origin` to `position`.
    #[must_use]
    pub const fn beam(origin: Position, position: Position) -> Self {
        Self {
            kind: EffectKind::Beam,
            origin,
            position,
            duration_ms: LASER_BEAM_DURATION_MS,
        }
    }

    /// Flash on `position`.
    #[must_use]
    pub const fn hit_flash(position: Position) -> Self {
        Self {
            kind: EffectKind::HitFlash,
            origin: position,
            position,
            duration_ms: HIT_FLASH_DURATION_MS,
        }
    }

    /// Shake on `position`.
    #[must_use]
    pub const fn hit_shake(position: Position) -> Self {
        Self {
            kind: EffectKind::HitShake {
                amplitude: HIT_SHAKE_AMPLITUDE,
            },
            origin: position,
            position,
            duration_ms: HIT_SHAKE_DURATION_MS,
        }
    }

    /// Sound cue at `position`.
    #[must_use]
    pub const fn sound(cue: SoundCue, position: Position) -> Self {
        Self {
            kind: EffectKind::Sound { cue },
            origin: position,
            position,
            duration_ms: HIT_SOUND_DURATION_MS,
        }
    }

    /// Attach a start time.
    #[must_use]
    pub const fn at(self, started_at_ms: u64) -> EffectRecord {
        EffectRecord {
            effect: self,
            started_at_ms,
        }
    }
}

/// An effect with its start time, as handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectRecord {
    /// The effect itself.
    #[serde(flatten)]
    pub effect: Effect,
    /// Caller-supplied time the effect begins.
    pub started_at_ms: u64,
}

impl EffectRecord {
    /// Check whether the effect is still running at `now_ms`.
    #[must_use]
    pub const fn is_live(&self, now_ms: u64) -> bool {
        now_ms >= self.started_at_ms
            && now_ms - self.started_at_ms < self.effect.duration_ms as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_display_matches_log_wording() {
        let event = Event::new(
            CombatantId::Up,
            EventKind::Moved {
                direction: Direction::Down,
                from: Position::new(0, 5),
                to: Position::new(1, 5),
            },
        );
        assert_eq!(event.to_string(), "Player A (Up) moved down.");

        let event = Event::new(
            CombatantId::Up,
            EventKind::BlockDestroyed {
                at: Position::new(2, 5),
            },
        );
        assert_eq!(event.to_string(), "Laser destroyed block at (2, 5).");

        let event = Event::new(
            CombatantId::Left,
            EventKind::Hit {
                target: CombatantId::Right,
                damage: 1,
                remaining_hp: 9,
            },
        );
        assert_eq!(
            event.to_string(),
            "Player B (Left) hit Player D (Right) for 1 damage (HP 9)."
        );
    }

    #[test]
    fn test_event_json_uses_kind_tag() {
        let event = Event::new(
            CombatantId::Down,
            EventKind::BlockWeakened {
                at: Position::new(9, 3),
                remaining: 1,
            },
        );
        let json = serde_json::to_value(event).unwrap();
        assert_eq!(json["kind"], "block-weakened");
        assert_eq!(json["actor"], "down");
        assert_eq!(json["remaining"], 1);
        assert_eq!(event.name(), "block-weakened");
    }

    #[test]
    fn test_effect_lifetime() {
        let record = Effect::hit_shake(Position::new(3, 3)).at(1_000);
        assert!(!record.is_live(999));
        assert!(record.is_live(1_000));
        assert!(record.is_live(1_259));
        assert!(!record.is_live(1_260));
    }

    #[test]
    fn test_hit_shake_serializes_amplitude() {
        let record = Effect::hit_shake(Position::new(2, 5)).at(0);
        assert_eq!(
            record.effect.kind,
            EffectKind::HitShake {
                amplitude: HIT_SHAKE_AMPLITUDE
            }
        );

        let json = serde_json::to_value(record).unwrap();
        assert_eq!(json["effect"], "hit-shake");
        assert_eq!(json["amplitude"], 4.5);
        assert_eq!(json["duration_ms"], 260);
        assert_eq!(json["started_at_ms"], 0);

        let back: EffectRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_effect_durations() {
        let pos = Position::new(0, 0);
        assert_eq!(Effect::beam(pos, pos).duration_ms, LASER_BEAM_DURATION_MS);
        assert_eq!(Effect::hit_flash(pos).duration_ms, HIT_FLASH_DURATION_MS);
        assert_eq!(
            Effect::sound(SoundCue::Block, pos).duration_ms,
            HIT_SOUND_DURATION_MS
        );
    }
}
