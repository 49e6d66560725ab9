//! Structured plain-text match report.
//!
//! Machine-friendly but human-readable: no colors, one fact per line, stable
//! section headers.

#![allow(clippy::format_push_string)]

use crate::game::{Cell, MatchController, MatchPhase, MatchState, Strength};

/// Render a match to a structured text report.
///
/// Output format:
/// ```text
/// === ROUND 3 (playing) ===
/// Active: Player C (Down)
///
/// BOARD (11x11):
/// Blocks: 28 (8 indestructible, 20 destructible, 26 strength total)
///
/// COMBATANTS:
/// - Player A (Up): hp 10, at (0, 5), shield up, aim down
/// - Player B (Left): ELIMINATED at (5, 0)
///
/// RECENT LOG:
/// - Laser destroyed block at (2, 5).
/// ```
#[must_use]
pub fn render_report(controller: &MatchController) -> String {
    let state = controller.state();
    let mut output = String::new();

    render_header(&mut output, controller);
    render_board_digest(&mut output, state);
    render_combatants(&mut output, state);

    output.push_str("RECENT LOG:\n");
    if controller.log().is_empty() {
        output.push_str("- (empty)\n");
    }
    for line in controller.log().iter() {
        output.push_str(&format!("- {line}\n"));
    }

    output
}

fn render_header(output: &mut String, controller: &MatchController) {
    let state = controller.state();
    output.push_str(&format!(
        "=== ROUND {} ({}) ===\n",
        state.round(),
        state.phase
    ));
    match state.phase {
        MatchPhase::Idle => output.push_str("Not started\n"),
        MatchPhase::Playing => output.push_str(&format!("Active: {}\n", controller.active_id())),
        MatchPhase::Finished => match controller.winner() {
            Some(winner) => output.push_str(&format!("Winner: {winner}\n")),
            None => output.push_str("Winner: none\n"),
        },
    }
    output.push('\n');
}

/// Summarize the blocks left on the board.
fn render_board_digest(output: &mut String, state: &MatchState) {
    let board = &state.board;
    let mut indestructible = 0u32;
    let mut destructible = 0u32;
    let mut strength_total = 0u32;

    for (_, cell) in board.iter() {
        match cell {
            Cell::Block(Strength::Indestructible) => indestructible += 1,
            Cell::Block(Strength::Finite(n)) => {
                destructible += 1;
                strength_total += u32::from(n);
            }
            Cell::Empty => {}
        }
    }

    output.push_str(&format!("BOARD ({}x{}):\n", board.rows(), board.cols()));
    output.push_str(&format!(
        "Blocks: {} ({indestructible} indestructible, {destructible} destructible, ",
        indestructible + destructible
    ));
    output.push_str(&format!("{strength_total} strength total)\n\n"));
}

fn render_combatants(output: &mut String, state: &MatchState) {
    output.push_str("COMBATANTS:\n");
    for combatant in state.roster.iter() {
        if combatant.alive {
            output.push_str(&format!(
                "- {}: hp {}, at {}, shield {}, aim {}\n",
                combatant.id, combatant.hp, combatant.position, combatant.shield, combatant.aim
            ));
        } else {
            output.push_str(&format!(
                "- {}: ELIMINATED at {}\n",
                combatant.id, combatant.position
            ));
        }
    }
    output.push('\n');
}
