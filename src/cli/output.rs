//! Output formatting utilities for CLI.

// Rates and averages are display-only
#![allow(clippy::cast_precision_loss, clippy::format_push_string)]

use laser_arena::game::{Combatant, Event, MatchLog};
use laser_arena::soak::{SoakError, SoakResult};
use laser_arena::{CombatantId, MatchController, MatchPhase};
use serde::Serialize;

/// Running totals for a scripted or interactive match.
#[derive(Debug, Default, Clone, Copy)]
pub(super) struct CommandTally {
    /// Inputs submitted.
    pub(super) commands: u32,
    /// Inputs that used up a turn.
    pub(super) consumed: u32,
}

impl CommandTally {
    /// Count one input.
    pub(super) fn record(&mut self, consumed: bool) {
        self.commands += 1;
        if consumed {
            self.consumed += 1;
        }
    }

    /// Inputs that did not use up a turn.
    pub(super) fn rejected(self) -> u32 {
        self.commands - self.consumed
    }
}

/// JSON-serializable match result.
#[derive(Debug, Serialize)]
pub(super) struct JsonMatchResult<'a> {
    /// Final phase.
    phase: MatchPhase,
    /// Winner (null while the match is running).
    winner: Option<CombatantId>,
    /// Round reached.
    round: u32,
    /// Inputs submitted.
    commands: u32,
    /// Inputs that used up a turn.
    consumed: u32,
    /// Inputs that did not.
    rejected: u32,
    /// Final combatant states.
    combatants: Vec<&'a Combatant>,
    /// Every event emitted, in order.
    events: &'a [Event],
    /// Recent log lines, newest first.
    log: Vec<&'a str>,
}

impl<'a> JsonMatchResult<'a> {
    /// Create from a controller and the events it produced.
    pub(super) fn new(
        controller: &'a MatchController,
        tally: CommandTally,
        events: &'a [Event],
    ) -> Self {
        let state = controller.state();
        Self {
            phase: state.phase,
            winner: controller.winner(),
            round: state.round(),
            commands: tally.commands,
            consumed: tally.consumed,
            rejected: tally.rejected(),
            combatants: state.roster.iter().collect(),
            events,
            log: log_lines(controller.log()),
        }
    }
}

fn log_lines(log: &MatchLog) -> Vec<&str> {
    log.iter().collect()
}

/// Format a match result as human-readable text.
pub(super) fn format_text(controller: &MatchController, tally: CommandTally) -> String {
    let state = controller.state();
    let mut output = String::new();

    output.push_str(&format!("Match Result ({})\n", state.phase));
    match controller.winner() {
        Some(winner) => output.push_str(&format!("  Winner: {winner}\n")),
        None => output.push_str("  Winner: none yet\n"),
    }
    output.push_str(&format!("  Round: {}\n", state.round()));
    output.push_str(&format!(
        "  Commands: {} ({} consumed, {} rejected)\n\n",
        tally.commands,
        tally.consumed,
        tally.rejected()
    ));

    for combatant in state.roster.iter() {
        output.push_str(&format!("  {}: hp {}", combatant.id, combatant.hp));
        if !combatant.alive {
            output.push_str(" [eliminated]");
        }
        output.push('\n');
    }

    output
}

/// Soak statistics for aggregated results.
#[derive(Debug, Default)]
pub(super) struct SoakStats {
    /// Total matches played.
    pub(super) games_played: u64,
    /// Win count per combatant, in turn order.
    pub(super) wins: [u64; 4],
    /// Matches that hit the command budget.
    pub(super) unfinished: u64,
    /// Total commands across all matches.
    total_commands: u64,
    /// Total rejected commands across all matches.
    total_rejected: u64,
    /// Total rounds across all matches.
    total_rounds: u64,
    /// Longest match in rounds.
    max_rounds: u32,
    /// Failure messages, one per failing seed.
    pub(super) failures: Vec<String>,
}

impl SoakStats {
    /// Add a soak outcome to the stats.
    pub(super) fn add_result(&mut self, result: &Result<SoakResult, SoakError>) {
        self.games_played += 1;
        let result = match result {
            Ok(result) => result,
            Err(e) => {
                self.failures.push(e.to_string());
                return;
            }
        };

        self.total_commands += u64::from(result.commands);
        self.total_rejected += u64::from(result.rejected);
        self.total_rounds += u64::from(result.rounds);
        self.max_rounds = self.max_rounds.max(result.rounds);

        match result.winner {
            Some(winner) => self.wins[winner.index()] += 1,
            None => self.unfinished += 1,
        }
    }

    /// Merge another partial accumulation into this one.
    pub(super) fn merge(&mut self, other: &Self) {
        self.games_played += other.games_played;
        for (a, b) in self.wins.iter_mut().zip(other.wins) {
            *a += b;
        }
        self.unfinished += other.unfinished;
        self.total_commands += other.total_commands;
        self.total_rejected += other.total_rejected;
        self.total_rounds += other.total_rounds;
        self.max_rounds = self.max_rounds.max(other.max_rounds);
        self.failures.extend(other.failures.iter().cloned());
    }

    fn completed(&self) -> u64 {
        self.games_played - self.failures.len() as u64
    }

    /// Get win rate for a combatant (0.0-1.0).
    pub(super) fn win_rate(&self, id: CombatantId) -> f64 {
        let completed = self.completed();
        if completed == 0 {
            return 0.0;
        }
        self.wins[id.index()] as f64 / completed as f64
    }

    /// Get average match length in rounds.
    pub(super) fn avg_rounds(&self) -> f64 {
        let completed = self.completed();
        if completed == 0 {
            return 0.0;
        }
        self.total_rounds as f64 / completed as f64
    }

    /// Get average commands per match.
    pub(super) fn avg_commands(&self) -> f64 {
        let completed = self.completed();
        if completed == 0 {
            return 0.0;
        }
        self.total_commands as f64 / completed as f64
    }

    /// Share of commands that were rejected (0.0-1.0).
    pub(super) fn rejection_rate(&self) -> f64 {
        if self.total_commands == 0 {
            return 0.0;
        }
        self.total_rejected as f64 / self.total_commands as f64
    }
}

/// JSON-serializable soak summary.
#[derive(Debug, Serialize)]
pub(super) struct JsonSoakResult<'a> {
    /// Total matches played.
    games_played: u64,
    /// Per-combatant statistics.
    combatants: Vec<JsonSoakCombatant>,
    /// Matches that hit the command budget.
    unfinished: u64,
    /// Average match length in rounds.
    avg_rounds: f64,
    /// Longest match in rounds.
    max_rounds: u32,
    /// Average commands per match.
    avg_commands: f64,
    /// Share of rejected commands.
    rejection_rate: f64,
    /// Invariant failures.
    failures: &'a [String],
}

/// JSON-serializable per-combatant soak stats.
#[derive(Debug, Serialize)]
pub(super) struct JsonSoakCombatant {
    /// Combatant identity.
    id: CombatantId,
    /// Number of wins.
    wins: u64,
    /// Win rate (0.0-1.0).
    win_rate: f64,
}

impl<'a> JsonSoakResult<'a> {
    /// Create from stats.
    pub(super) fn from_stats(stats: &'a SoakStats) -> Self {
        Self {
            games_played: stats.games_played,
            combatants: laser_arena::game::TURN_ORDER
                .iter()
                .map(|&id| JsonSoakCombatant {
                    id,
                    wins: stats.wins[id.index()],
                    win_rate: stats.win_rate(id),
                })
                .collect(),
            unfinished: stats.unfinished,
            avg_rounds: stats.avg_rounds(),
            max_rounds: stats.max_rounds,
            avg_commands: stats.avg_commands(),
            rejection_rate: stats.rejection_rate(),
            failures: &stats.failures,
        }
    }
}

/// Format soak stats as human-readable text.
pub(super) fn format_soak_text(stats: &SoakStats) -> String {
    let mut output = String::new();

    output.push_str(&format!("Soak Results ({} matches)\n", stats.games_played));
    output.push_str("========================================\n\n");

    output.push_str("Win Rates:\n");
    for id in laser_arena::game::TURN_ORDER {
        output.push_str(&format!(
            "  {id}: {:.1}% ({} wins)\n",
            stats.win_rate(id) * 100.0,
            stats.wins[id.index()]
        ));
    }
    output.push_str(&format!("  Unfinished: {}\n\n", stats.unfinished));

    output.push_str(&format!(
        "Average Match Length: {:.1} rounds (max {})\n",
        stats.avg_rounds(),
        stats.max_rounds
    ));
    output.push_str(&format!(
        "Average Commands: {:.1} ({:.1}% rejected)\n",
        stats.avg_commands(),
        stats.rejection_rate() * 100.0
    ));

    output.push_str(&format!("\nInvariant Failures: {}\n", stats.failures.len()));
    for failure in stats.failures.iter().take(10) {
        output.push_str(&format!("  {failure}\n"));
    }

    output
}

/// Format soak stats as CSV.
pub(super) fn format_soak_csv(stats: &SoakStats) -> String {
    let mut output = String::new();

    output.push_str("combatant,label,wins,win_rate\n");
    for id in laser_arena::game::TURN_ORDER {
        output.push_str(&format!(
            "{},{},{},{:.4}\n",
            id.side().to_ascii_lowercase(),
            id.label(),
            stats.wins[id.index()],
            stats.win_rate(id)
        ));
    }

    output
}
