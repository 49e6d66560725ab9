//! The four combatants.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, ParseResult};
use crate::game::{Direction, Position, MAP_COLS, MAP_ROWS};

/// Hit points every combatant starts with.
pub const DEFAULT_HP: u8 = 10;

/// Identity of a combatant: the board edge it starts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombatantId {
    /// Starts at the top edge. Label A.
    Up,
    /// Starts at the left edge. Label B.
    Left,
    /// Starts at the bottom edge. Label C.
    Down,
    /// Starts at the right edge. Label D.
    Right,
}

/// Fixed cyclic turn order.
pub const TURN_ORDER: [CombatantId; 4] = [
    CombatantId::Up,
    CombatantId::Left,
    CombatantId::Down,
    CombatantId::Right,
];

impl CombatantId {
    /// Slot in [`TURN_ORDER`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            CombatantId::Up => 0,
            CombatantId::Left => 1,
            CombatantId::Down => 2,
            CombatantId::Right => 3,
        }
    }

    /// Single-letter label.
    #[must_use]
    pub const fn label(self) -> char {
        match self {
            CombatantId::Up => 'A',
            CombatantId::Left => 'B',
            CombatantId::Down => 'C',
            CombatantId::Right => 'D',
        }
    }

    /// Capitalized side name.
    #[must_use]
    pub const fn side(self) -> &'static str {
        match self {
            CombatantId::Up => "Up",
            CombatantId::Left => "Left",
            CombatantId::Down => "Down",
            CombatantId::Right => "Right",
        }
    }

    /// The direction of this combatant's home edge.
    #[must_use]
    pub const fn home(self) -> Direction {
        match self {
            CombatantId::Up => Direction::Up,
            CombatantId::Left => Direction::Left,
            CombatantId::Down => Direction::Down,
            CombatantId::Right => Direction::Right,
        }
    }

    /// Midpoint of the home edge.
    #[must_use]
    pub const fn start_position(self) -> Position {
        let mid_row = MAP_ROWS / 2;
        let mid_col = MAP_COLS / 2;
        match self {
            CombatantId::Up => Position::new(0, mid_col),
            CombatantId::Left => Position::new(mid_row, 0),
            CombatantId::Down => Position::new(MAP_ROWS - 1, mid_col),
            CombatantId::Right => Position::new(mid_row, MAP_COLS - 1),
        }
    }
}

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {} ({})", self.label(), self.side())
    }
}

impl FromStr for CombatantId {
    type Err = ParseError;

    fn from_str(s: &str) -> ParseResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "up" | "a" => Ok(CombatantId::Up),
            "left" | "b" => Ok(CombatantId::Left),
            "down" | "c" => Ok(CombatantId::Down),
            "right" | "d" => Ok(CombatantId::Right),
            _ => Err(ParseError::UnknownCombatant(s.to_string())),
        }
    }
}

/// Result of a combatant absorbing damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitOutcome {
    /// Hit points left, clamped at zero.
    pub remaining_hp: u8,
    /// Whether this hit took the combatant out.
    pub eliminated: bool,
}

/// State for a single combatant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    /// Which slot this combatant fills.
    pub id: CombatantId,
    /// Current cell.
    pub position: Position,
    /// Hit points, `0..=DEFAULT_HP`.
    pub hp: u8,
    /// The side shots are absorbed from.
    pub shield: Direction,
    /// Direction last moved or fired in.
    pub aim: Direction,
    /// Kept equal to `hp > 0`.
    pub alive: bool,
}

impl Combatant {
    /// A fresh combatant at its start position.
    #[must_use]
    pub const fn new(id: CombatantId) -> Self {
        Self {
            id,
            position: id.start_position(),
            hp: DEFAULT_HP,
            shield: id.home(),
            aim: id.home(),
            alive: true,
        }
    }

    /// Subtract `damage` hit points, marking the combatant dead at zero.
    pub fn take_hit(&mut self, damage: u8) -> HitOutcome {
        self.hp = self.hp.saturating_sub(damage);
        let eliminated = self.alive && self.hp == 0;
        if self.hp == 0 {
            self.alive = false;
        }
        HitOutcome {
            remaining_hp: self.hp,
            eliminated,
        }
    }
}

/// All four combatants, indexed by turn-order slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Roster {
    combatants: [Combatant; 4],
}

impl Default for Roster {
    fn default() -> Self {
        Self::standard()
    }
}

impl Roster {
    /// Four fresh combatants at their start positions.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            combatants: TURN_ORDER.map(Combatant::new),
        }
    }

    /// Get a combatant by identity.
    #[must_use]
    pub fn get(&self, id: CombatantId) -> &Combatant {
        &self.combatants[id.index()]
    }

    /// Get a mutable combatant by identity.
    #[must_use]
    pub fn get_mut(&mut self, id: CombatantId) -> &mut Combatant {
        &mut self.combatants[id.index()]
    }

    /// Combatant occupying turn-order slot `index` (taken modulo 4).
    #[must_use]
    pub fn active_combatant(&self, index: usize) -> &Combatant {
        &self.combatants[index % TURN_ORDER.len()]
    }

    /// First living combatant standing on `pos`, in turn order.
    #[must_use]
    pub fn combatant_at(&self, pos: Position) -> Option<CombatantId> {
        self.combatants
            .iter()
            .find(|c| c.alive && c.position == pos)
            .map(|c| c.id)
    }

    /// All combatants in turn order, living or not.
    pub fn iter(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter()
    }

    /// Living combatants in turn order.
    pub fn alive_combatants(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter().filter(|c| c.alive)
    }

    /// Number of living combatants.
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.alive_combatants().count()
    }
}
