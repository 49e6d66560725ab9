//! Turn sequencing over the living combatants.

use crate::game::{CombatantId, Roster, TURN_ORDER};

/// Record of one turn hand-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnAdvance {
    /// Combatant whose turn just ended.
    pub from: CombatantId,
    /// Combatant now active.
    pub to: CombatantId,
    /// Round after the hand-off.
    pub round: u32,
    /// Whether the scan wrapped past the end of the turn order.
    pub wrapped: bool,
}

/// Cyclic active-turn pointer and round counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnSequencer {
    /// Index into [`TURN_ORDER`] of the combatant whose input is accepted.
    active_index: usize,
    /// Current round, starting at 1.
    round: u32,
}

impl Default for TurnSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnSequencer {
    /// Sequencer at round 1 with the first slot active.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            active_index: 0,
            round: 1,
        }
    }

    /// Index of the active slot.
    #[must_use]
    pub const fn active_index(&self) -> usize {
        self.active_index
    }

    /// Identity of the active combatant.
    #[must_use]
    pub const fn active_id(&self) -> CombatantId {
        TURN_ORDER[self.active_index]
    }

    /// Current round number.
    #[must_use]
    pub const fn round(&self) -> u32 {
        self.round
    }

    /// Hand the turn to the next living combatant.
    ///
    /// Scans forward from the slot after the active one. The round counter
    /// increments when the new index is not greater than the old one. Returns
    /// `None` if nobody else is alive to take the turn; the caller's win check
    /// runs first, so that only happens on a misuse.
    pub fn advance(&mut self, roster: &Roster) -> Option<TurnAdvance> {
        let before = self.active_index;
        let from = TURN_ORDER[before];

        let next = (1..=TURN_ORDER.len())
            .map(|offset| (before + offset) % TURN_ORDER.len())
            .find(|&idx| roster.active_combatant(idx).alive)?;

        self.active_index = next;
        let wrapped = next <= before;
        if wrapped {
            self.round += 1;
        }

        Some(TurnAdvance {
            from,
            to: TURN_ORDER[next],
            round: self.round,
            wrapped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::DEFAULT_HP;

    #[test]
    fn test_full_cycle_increments_round_once() {
        let roster = Roster::standard();
        let mut turn = TurnSequencer::new();

        for expected in [CombatantId::Left, CombatantId::Down, CombatantId::Right] {
            let advance = turn.advance(&roster).unwrap();
            assert_eq!(advance.to, expected);
            assert!(!advance.wrapped);
            assert_eq!(turn.round(), 1);
        }

        let advance = turn.advance(&roster).unwrap();
        assert_eq!(advance.to, CombatantId::Up);
        assert!(advance.wrapped);
        assert_eq!(turn.round(), 2);
    }

    #[test]
    fn test_skips_dead_combatants() {
        let mut roster = Roster::standard();
        roster.get_mut(CombatantId::Left).take_hit(DEFAULT_HP);
        roster.get_mut(CombatantId::Down).take_hit(DEFAULT_HP);

        let mut turn = TurnSequencer::new();
        let advance = turn.advance(&roster).unwrap();
        assert_eq!(advance.from, CombatantId::Up);
        assert_eq!(advance.to, CombatantId::Right);
        assert_eq!(turn.round(), 1);

        let advance = turn.advance(&roster).unwrap();
        assert_eq!(advance.to, CombatantId::Up);
        assert_eq!(turn.round(), 2);
    }

    #[test]
    fn test_sole_survivor_wraps_to_self() {
        let mut roster = Roster::standard();
        for id in [CombatantId::Left, CombatantId::Down, CombatantId::Right] {
            roster.get_mut(id).take_hit(DEFAULT_HP);
        }

        let mut turn = TurnSequencer::new();
        let advance = turn.advance(&roster).unwrap();
        assert_eq!(advance.to, CombatantId::Up);
        assert!(advance.wrapped);
    }

    #[test]
    fn test_nobody_alive() {
        let mut roster = Roster::standard();
        for id in TURN_ORDER {
            roster.get_mut(id).take_hit(DEFAULT_HP);
        }

        let mut turn = TurnSequencer::new();
        assert!(turn.advance(&roster).is_none());
        assert_eq!(turn.active_index(), 0);
        assert_eq!(turn.round(), 1);
    }
}
