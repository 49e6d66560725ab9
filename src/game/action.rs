//! Per-turn actions and their validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, ParseResult};
use crate::game::{
    cast_ray, Board, CombatantId, Direction, Effect, Event, EventKind, MoveRejection, Roster,
};

/// What a combatant does with its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Step one cell.
    Move,
    /// Turn the shield to face a side.
    Shield,
    /// Fire the laser.
    Shoot,
}

impl Action {
    /// All actions.
    pub const ALL: [Action; 3] = [Action::Move, Action::Shield, Action::Shoot];

    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Action::Move => "move",
            Action::Shield => "shield",
            Action::Shoot => "shoot",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ParseError;

    fn from_str(s: &str) -> ParseResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "move" | "m" => Ok(Action::Move),
            "shield" | "s" => Ok(Action::Shield),
            "shoot" | "fire" | "f" => Ok(Action::Shoot),
            _ => Err(ParseError::UnknownAction(s.to_string())),
        }
    }
}

/// One player input: who, what, and which way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Command {
    /// Combatant the input is addressed to.
    pub actor: CombatantId,
    /// Chosen action.
    pub action: Action,
    /// Chosen direction.
    pub direction: Direction,
}

impl Command {
    /// Create a new command.
    #[must_use]
    pub const fn new(actor: CombatantId, action: Action, direction: Direction) -> Self {
        Self {
            actor,
            action,
            direction,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.actor.side().to_ascii_lowercase(),
            self.action,
            self.direction
        )
    }
}

/// Parses `"<actor> <action> <direction>"`, e.g. `"up shoot down"` or `"a move left"`.
impl FromStr for Command {
    type Err = ParseError;

    fn from_str(s: &str) -> ParseResult<Self> {
        let words: Vec<&str> = s.split_whitespace().collect();
        let [actor, action, direction] = words[..] else {
            return Err(ParseError::WrongArity(words.len()));
        };
        Ok(Self {
            actor: actor.parse()?,
            action: action.parse()?,
            direction: direction.parse()?,
        })
    }
}

/// Outcome of resolving one action.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// Whether the action used up the actor's turn.
    pub consumed: bool,
    /// Events in the order they happened.
    pub events: Vec<Event>,
    /// Renderer hints produced along the way.
    pub effects: Vec<Effect>,
}

impl Resolution {
    /// Empty resolution that consumes the turn.
    #[must_use]
    pub fn consumed() -> Self {
        Self {
            consumed: true,
            ..Self::default()
        }
    }

    /// Resolution that leaves the turn with the actor, explained by one event.
    #[must_use]
    pub fn rejected(event: Event) -> Self {
        Self {
            consumed: false,
            events: vec![event],
            effects: Vec::new(),
        }
    }

    fn with_event(mut self, event: Event) -> Self {
        self.events.push(event);
        self
    }
}

/// Validate and apply `action` for `actor`.
///
/// Rejected actions leave board and roster untouched.
pub fn resolve_action(
    board: &mut Board,
    roster: &mut Roster,
    actor: CombatantId,
    action: Action,
    direction: Direction,
) -> Resolution {
    match action {
        Action::Move => try_move(board, roster, actor, direction),
        Action::Shield => {
            roster.get_mut(actor).shield = direction;
            Resolution::consumed()
                .with_event(Event::new(actor, EventKind::ShieldRepositioned { direction }))
        }
        Action::Shoot => {
            let shooter = roster.get_mut(actor);
            if shooter.shield == direction {
                return Resolution::rejected(Event::new(
                    actor,
                    EventKind::ShotRejected { direction },
                ));
            }
            shooter.aim = direction;
            cast_ray(board, roster, actor, direction)
        }
    }
}

fn try_move(
    board: &Board,
    roster: &mut Roster,
    actor: CombatantId,
    direction: Direction,
) -> Resolution {
    let from = roster.get(actor).position;
    let to = from.step(direction);

    let rejection = if !board.in_bounds(to) {
        Some(MoveRejection::OutOfBounds)
    } else if board.tile_at(to).is_some_and(|cell| cell.is_block()) {
        Some(MoveRejection::Blocked)
    } else if roster.combatant_at(to).is_some() {
        Some(MoveRejection::Occupied)
    } else {
        None
    };

    if let Some(reason) = rejection {
        return Resolution::rejected(Event::new(
            actor,
            EventKind::MoveRejected { direction, reason },
        ));
    }

    let mover = roster.get_mut(actor);
    mover.position = to;
    mover.aim = direction;
    Resolution::consumed().with_event(Event::new(
        actor,
        EventKind::Moved {
            direction,
            from,
            to,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Position, DEFAULT_HP};

    #[test]
    fn test_command_parse() {
        let cmd: Command = "up shoot down".parse().unwrap();
        assert_eq!(
            cmd,
            Command::new(CombatantId::Up, Action::Shoot, Direction::Down)
        );

        let cmd: Command = "  B   move  r ".parse().unwrap();
        assert_eq!(
            cmd,
            Command::new(CombatantId::Left, Action::Move, Direction::Right)
        );

        assert_eq!(
            "up jump down".parse::<Command>(),
            Err(ParseError::UnknownAction("jump".to_string()))
        );
        assert_eq!(
            "up shoot".parse::<Command>(),
            Err(ParseError::WrongArity(2))
        );
    }

    #[test]
    fn test_command_display_parses_back() {
        let cmd = Command::new(CombatantId::Right, Action::Shield, Direction::Up);
        assert_eq!(cmd.to_string(), "right shield up");
        assert_eq!(cmd.to_string().parse::<Command>().unwrap(), cmd);
    }

    #[test]
    fn test_move_updates_position_and_aim() {
        let mut board = Board::standard();
        let mut roster = Roster::standard();

        let res = resolve_action(
            &mut board,
            &mut roster,
            CombatantId::Up,
            Action::Move,
            Direction::Left,
        );

        assert!(res.consumed);
        let up = roster.get(CombatantId::Up);
        assert_eq!(up.position, Position::new(0, 4));
        assert_eq!(up.aim, Direction::Left);
        assert_eq!(res.events[0].name(), "moved");
    }

    #[test]
    fn test_move_rejections_leave_state_unchanged() {
        let mut board = Board::standard();
        let mut roster = Roster::standard();
        let before = roster;

        // Off the top edge.
        let res = resolve_action(
            &mut board,
            &mut roster,
            CombatantId::Up,
            Action::Move,
            Direction::Up,
        );
        assert!(!res.consumed);
        assert_eq!(
            res.events[0].kind,
            EventKind::MoveRejected {
                direction: Direction::Up,
                reason: MoveRejection::OutOfBounds,
            }
        );

        // (4, 0) is empty but (3, 0) is a block: walk Left up one, then try again.
        roster.get_mut(CombatantId::Left).position = Position::new(4, 0);
        let staged = roster;
        let res = resolve_action(
            &mut board,
            &mut roster,
            CombatantId::Left,
            Action::Move,
            Direction::Up,
        );
        assert!(!res.consumed);
        assert_eq!(
            res.events[0].kind,
            EventKind::MoveRejected {
                direction: Direction::Up,
                reason: MoveRejection::Blocked,
            }
        );
        assert_eq!(roster, staged);
        assert_ne!(roster, before);
    }

    #[test]
    fn test_move_into_combatant_rejected() {
        let mut board = Board::empty();
        let mut roster = Roster::standard();
        roster.get_mut(CombatantId::Down).position = Position::new(1, 5);
        let before = roster;

        let res = resolve_action(
            &mut board,
            &mut roster,
            CombatantId::Up,
            Action::Move,
            Direction::Down,
        );
        assert!(!res.consumed);
        assert_eq!(
            res.events[0].kind,
            EventKind::MoveRejected {
                direction: Direction::Down,
                reason: MoveRejection::Occupied,
            }
        );
        assert_eq!(roster, before);
    }

    #[test]
    fn test_move_onto_dead_combatant_allowed() {
        let mut board = Board::empty();
        let mut roster = Roster::standard();
        roster.get_mut(CombatantId::Down).position = Position::new(1, 5);
        roster.get_mut(CombatantId::Down).take_hit(DEFAULT_HP);

        let res = resolve_action(
            &mut board,
            &mut roster,
            CombatantId::Up,
            Action::Move,
            Direction::Down,
        );
        assert!(res.consumed);
    }

    #[test]
    fn test_shield_always_consumes() {
        let mut board = Board::standard();
        let mut roster = Roster::standard();

        for dir in Direction::ALL {
            let res = resolve_action(
                &mut board,
                &mut roster,
                CombatantId::Down,
                Action::Shield,
                dir,
            );
            assert!(res.consumed);
            assert_eq!(roster.get(CombatantId::Down).shield, dir);
        }
    }

    #[test]
    fn test_shoot_into_own_shield_rejected() {
        let mut board = Board::standard();
        let mut roster = Roster::standard();
        let board_before = board.clone();
        let roster_before = roster;

        let res = resolve_action(
            &mut board,
            &mut roster,
            CombatantId::Up,
            Action::Shoot,
            Direction::Up,
        );

        assert!(!res.consumed);
        assert_eq!(res.events[0].name(), "shot-rejected");
        assert_eq!(board, board_before);
        assert_eq!(roster, roster_before);
    }

    #[test]
    fn test_shoot_sets_aim() {
        let mut board = Board::standard();
        let mut roster = Roster::standard();

        let res = resolve_action(
            &mut board,
            &mut roster,
            CombatantId::Up,
            Action::Shoot,
            Direction::Down,
        );
        assert!(res.consumed);
        assert_eq!(roster.get(CombatantId::Up).aim, Direction::Down);
    }
}
