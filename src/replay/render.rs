//! ASCII renderer for terminal viewing with ANSI colors.

#![allow(clippy::format_push_string)]

use crate::game::{
    Board, Cell, Combatant, CombatantId, Direction, MatchController, Position, Strength,
    DEFAULT_HP,
};

/// ANSI color codes for combatants, in turn order.
const COMBATANT_COLORS: [&str; 4] = [
    "\x1b[31m", // A: Red
    "\x1b[34m", // B: Blue
    "\x1b[32m", // C: Green
    "\x1b[33m", // D: Yellow
];

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const WHITE: &str = "\x1b[37m";
const GRAY: &str = "\x1b[90m";

/// Render a match to ASCII with ANSI colors.
///
/// Output format:
/// ```text
/// Round 3  [playing]
/// ┌───────────────────────┐
/// │ . . . . . A . . . . . │
/// │ . . . 2 . . . 2 . . . │
/// │ . # . . . 1 . . . # . │
/// └───────────────────────┘
///
/// Legend: A-D=Combatant  1-9=Block strength  #=Indestructible  .=Empty
///
/// Player A (Up):     HP 10/10 ██████████  Shield ↑  Aim ↑  at (0, 5)
/// Player B (Left):   ELIMINATED
///
/// Active: Player A (Up). Choose command and direction.
/// ```
#[must_use]
pub fn render_ascii(controller: &MatchController) -> String {
    let state = controller.state();
    let mut output = String::new();

    output.push_str(&format!("{BOLD}Round {}{RESET}  [{}]\n", state.round(), state.phase));

    render_board(&mut output, controller);

    output.push_str("\nLegend: A-D=Combatant  1-9=Block strength  #=Indestructible  .=Empty\n\n");

    for combatant in state.roster.iter() {
        render_combatant(&mut output, combatant);
    }

    output.push('\n');
    output.push_str(&controller.status_line());
    output.push('\n');

    output
}

/// Render the board grid with combatants overlaid.
fn render_board(output: &mut String, controller: &MatchController) {
    let state = controller.state();
    let board = &state.board;
    let inner = usize::try_from(board.cols()).unwrap_or(0) * 2 + 1;

    output.push('┌');
    output.push_str(&"─".repeat(inner));
    output.push_str("┐\n");

    for row in 0..board.rows() {
        output.push_str("│ ");
        for col in 0..board.cols() {
            let pos = Position::new(row, col);
            match state.roster.combatant_at(pos) {
                Some(id) => {
                    let bold = if id == controller.active_id() { BOLD } else { "" };
                    output.push_str(&format!("{}{bold}{}{RESET}", combatant_color(id), id.label()));
                }
                None => render_cell(output, board, pos),
            }
            output.push(' ');
        }
        output.push_str("│\n");
    }

    output.push('└');
    output.push_str(&"─".repeat(inner));
    output.push_str("┘\n");
}

/// Render a single board cell.
fn render_cell(output: &mut String, board: &Board, pos: Position) {
    match board.tile_at(pos) {
        Some(Cell::Block(strength)) => {
            output.push_str(&format!("{WHITE}{BOLD}{}{RESET}", strength_to_char(strength)));
        }
        Some(Cell::Empty) => output.push_str(&format!("{GRAY}.{RESET}")),
        None => output.push('?'),
    }
}

/// Render one line of the hit point panel.
fn render_combatant(output: &mut String, combatant: &Combatant) {
    let name = combatant.id.to_string();
    if !combatant.alive {
        output.push_str(&format!("{DIM}{name}: ELIMINATED{RESET}\n"));
        return;
    }

    let color = combatant_color(combatant.id);
    let filled = usize::from(combatant.hp);
    let empty = usize::from(DEFAULT_HP).saturating_sub(filled);
    output.push_str(&format!(
        "{color}{:<17}{RESET} HP {:>2}/{DEFAULT_HP} {}{}  Shield {}  Aim {}  at {}\n",
        format!("{name}:"),
        combatant.hp,
        "█".repeat(filled),
        "░".repeat(empty),
        direction_arrow(combatant.shield),
        direction_arrow(combatant.aim),
        combatant.position
    ));
}

/// Convert block strength to a display character.
fn strength_to_char(strength: Strength) -> char {
    match strength {
        Strength::Indestructible => '#',
        Strength::Finite(n) => char::from_digit(u32::from(n), 10).unwrap_or('+'),
    }
}

/// Arrow pointing in `direction`.
fn direction_arrow(direction: Direction) -> char {
    match direction {
        Direction::Up => '↑',
        Direction::Left => '←',
        Direction::Down => '↓',
        Direction::Right => '→',
    }
}

/// Get ANSI color for a combatant.
fn combatant_color(id: CombatantId) -> &'static str {
    COMBATANT_COLORS[id.index()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Action, Command};

    #[test]
    fn test_render_ascii_basic() {
        let controller = MatchController::started();
        let output = render_ascii(&controller);

        assert!(output.contains("Round 1"));
        assert!(output.contains("[playing]"));
        assert!(output.contains('┌'));
        assert!(output.contains('┘'));
        assert!(output.contains("Legend"));
        for id in [CombatantId::Up, CombatantId::Left, CombatantId::Down, CombatantId::Right] {
            assert!(output.contains(&id.to_string()));
        }
        assert!(output.contains("Active: Player A (Up)."));
    }

    #[test]
    fn test_render_shows_destroyed_block() {
        let mut controller = MatchController::started();
        let before = render_ascii(&controller);
        controller.submit(Command::new(CombatantId::Up, Action::Shoot, Direction::Down));
        let after = render_ascii(&controller);

        assert_ne!(before, after);
        assert!(after.contains("Round 1"));
    }

    #[test]
    fn test_strength_to_char() {
        assert_eq!(strength_to_char(Strength::Indestructible), '#');
        assert_eq!(strength_to_char(Strength::Finite(1)), '1');
        assert_eq!(strength_to_char(Strength::Finite(9)), '9');
        assert_eq!(strength_to_char(Strength::Finite(12)), '+');
    }

    #[test]
    fn test_direction_arrow() {
        assert_eq!(direction_arrow(Direction::Up), '↑');
        assert_eq!(direction_arrow(Direction::Right), '→');
    }
}
