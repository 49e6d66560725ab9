//! Error types shared across the engine.

use thiserror::Error;

/// Failure to parse a word or line of a text command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Direction word not one of up/left/down/right.
    #[error("unknown direction: {0:?}")]
    UnknownDirection(String),
    /// Action word not one of move/shield/shoot.
    #[error("unknown action: {0:?}")]
    UnknownAction(String),
    /// Actor word not a side name or a label A-D.
    #[error("unknown combatant: {0:?}")]
    UnknownCombatant(String),
    /// Wrong number of words on a command line.
    #[error("expected `<actor> <action> <direction>`, got {0} word(s)")]
    WrongArity(usize),
}

/// Result type for text parsing.
pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Action, CombatantId, Command, Direction};

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::UnknownAction("jump".to_string());
        assert!(format!("{err}").contains("jump"));

        let err = ParseError::WrongArity(2);
        assert!(format!("{err}").contains('2'));
    }

    #[test]
    fn test_parse_result_is_from_str_output() {
        let parsed: ParseResult<Direction> = "sideways".parse();
        assert_eq!(
            parsed,
            Err(ParseError::UnknownDirection("sideways".to_string()))
        );

        let parsed: ParseResult<Command> = "left shoot up".parse();
        assert_eq!(
            parsed,
            Ok(Command::new(CombatantId::Left, Action::Shoot, Direction::Up))
        );
    }
}
