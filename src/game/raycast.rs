//! Laser resolution.
//!
//! A shot walks cell by cell from the shooter until the first obstruction:
//! the board edge, a block, or a living combatant. Only that obstruction is
//! affected. Blocks never let the beam through, whatever their strength, and
//! a combatant stops the beam whether or not its shield absorbs the hit.

use crate::game::{
    Board, CombatantId, DamageOutcome, Direction, Effect, Event, EventKind, Position,
    Resolution, Roster, SoundCue,
};

/// Damage dealt by one unshielded laser hit.
pub const LASER_DAMAGE: u8 = 1;

/// The first thing a ray runs into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Obstruction {
    /// Nothing on the board; `last` is the final on-board cell crossed.
    Edge {
        /// Final on-board cell, or the shooter's own cell if it stands on the edge.
        last: Position,
    },
    /// A block of any strength.
    Block(Position),
    /// A living combatant.
    Combatant(CombatantId, Position),
}

/// Walk from `origin` in `direction` and report the first obstruction.
///
/// Never inspects `origin` itself and never reads an off-board cell.
#[must_use]
pub fn trace(
    board: &Board,
    roster: &Roster,
    origin: Position,
    direction: Direction,
) -> Obstruction {
    let mut last = origin;
    let mut pos = origin.step(direction);

    while board.in_bounds(pos) {
        if board.tile_at(pos).is_some_and(|cell| cell.is_block()) {
            return Obstruction::Block(pos);
        }
        if let Some(target) = roster.combatant_at(pos) {
            return Obstruction::Combatant(target, pos);
        }
        last = pos;
        pos = pos.step(direction);
    }

    Obstruction::Edge { last }
}

/// Fire `shooter`'s laser in `direction` and apply the result.
///
/// Always consumes the turn. The self-shield check lives in the action
/// resolver; this function assumes the shot is legal.
pub fn cast_ray(
    board: &mut Board,
    roster: &mut Roster,
    shooter: CombatantId,
    direction: Direction,
) -> Resolution {
    let origin = roster.get(shooter).position;
    let mut resolution = Resolution::consumed();

    match trace(board, roster, origin, direction) {
        Obstruction::Edge { last } => {
            resolution.effects.push(Effect::beam(origin, last));
            resolution.events.push(Event::new(
                shooter,
                EventKind::BeamMiss {
                    direction,
                    endpoint: last,
                },
            ));
        }
        Obstruction::Block(at) => {
            resolution.effects.extend([
                Effect::beam(origin, at),
                Effect::hit_flash(at),
                Effect::hit_shake(at),
                Effect::sound(SoundCue::Block, at),
            ]);
            let kind = match board.apply_damage(at) {
                Some(DamageOutcome::Weakened { remaining }) => {
                    EventKind::BlockWeakened { at, remaining }
                }
                Some(DamageOutcome::Destroyed) => EventKind::BlockDestroyed { at },
                Some(DamageOutcome::Blocked) | None => EventKind::BlockIndestructibleHit { at },
            };
            resolution.events.push(Event::new(shooter, kind));
        }
        Obstruction::Combatant(target, at) => {
            resolution.effects.extend([Effect::beam(origin, at), Effect::hit_flash(at)]);

            let incoming = direction.opposite();
            let victim = roster.get_mut(target);
            if victim.shield == incoming {
                resolution.events.push(Event::new(
                    shooter,
                    EventKind::ShieldBlocked { target, incoming },
                ));
                return resolution;
            }

            let outcome = victim.take_hit(LASER_DAMAGE);
            resolution.effects.extend([
                Effect::hit_shake(at),
                Effect::sound(SoundCue::Player, at),
            ]);
            resolution.events.push(Event::new(
                shooter,
                EventKind::Hit {
                    target,
                    damage: LASER_DAMAGE,
                    remaining_hp: outcome.remaining_hp,
                },
            ));
            if outcome.eliminated {
                resolution
                    .events
                    .push(Event::new(shooter, EventKind::Eliminated { target }));
            }
        }
    }

    resolution
}
