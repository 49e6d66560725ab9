//! Cardinal directions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, ParseResult};

/// One of the four cardinal directions on the board.
///
/// Rows grow downward, so `Up` steps to a smaller row index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Toward row 0.
    Up,
    /// Toward column 0.
    Left,
    /// Toward the last row.
    Down,
    /// Toward the last column.
    Right,
}

impl Direction {
    /// All directions, in turn order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Right,
    ];

    /// The direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Left => Direction::Right,
            Direction::Down => Direction::Up,
            Direction::Right => Direction::Left,
        }
    }

    /// Row and column delta of one step in this direction.
    #[must_use]
    pub const fn unit_vector(self) -> (i16, i16) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Left => (0, -1),
            Direction::Down => (1, 0),
            Direction::Right => (0, 1),
        }
    }

    /// Lowercase name, as used in commands and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Left => "left",
            Direction::Down => "down",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ParseError;

    fn from_str(s: &str) -> ParseResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "up" | "u" => Ok(Direction::Up),
            "left" | "l" => Ok(Direction::Left),
            "down" | "d" => Ok(Direction::Down),
            "right" | "r" => Ok(Direction::Right),
            _ => Err(ParseError::UnknownDirection(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_is_involution() {
        for dir in Direction::ALL {
            assert_ne!(dir.opposite(), dir);
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn test_unit_vectors_cancel() {
        for dir in Direction::ALL {
            let (dr, dc) = dir.unit_vector();
            let (odr, odc) = dir.opposite().unit_vector();
            assert_eq!(dr + odr, 0);
            assert_eq!(dc + odc, 0);
            assert_eq!(dr.abs() + dc.abs(), 1);
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("up".parse::<Direction>().unwrap(), Direction::Up);
        assert_eq!("LEFT".parse::<Direction>().unwrap(), Direction::Left);
        assert_eq!("d".parse::<Direction>().unwrap(), Direction::Down);
        assert!("north".parse::<Direction>().is_err());
    }

    #[test]
    fn test_display_roundtrips_through_parse() {
        for dir in Direction::ALL {
            assert_eq!(dir.to_string().parse::<Direction>().unwrap(), dir);
        }
    }
}
