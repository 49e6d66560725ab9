//! Match orchestration: one command in, one resolved turn out.

use log::{debug, info};

use crate::game::{
    resolve_action, Command, CommandRejection, CombatantId, EffectRecord, Event, EventKind,
    MatchLog, MatchPhase, MatchState,
};

/// Everything a single submitted command produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TurnOutcome {
    /// Whether the command used up the actor's turn.
    pub consumed: bool,
    /// Events in emission order.
    pub events: Vec<Event>,
    /// Time-stamped renderer hints.
    pub effects: Vec<EffectRecord>,
}

impl TurnOutcome {
    fn rejected(actor: CombatantId, reason: CommandRejection) -> Self {
        Self {
            consumed: false,
            events: vec![Event::new(actor, EventKind::CommandRejected { reason })],
            effects: Vec::new(),
        }
    }

    /// Check if any event has the given kind name.
    #[must_use]
    pub fn has_event(&self, name: &str) -> bool {
        self.events.iter().any(|e| e.name() == name)
    }
}

/// Owns one match and drives it through the per-turn protocol.
///
/// 1. Refuse input unless the match is playing and the actor is the living
///    active combatant.
/// 2. Resolve the action.
/// 3. A non-consuming result stops here; the actor may retry.
/// 4. Otherwise check for a winner, finishing the match if one remains.
/// 5. Otherwise advance the turn.
#[derive(Debug, Clone, Default)]
pub struct MatchController {
    state: MatchState,
    log: MatchLog,
}

impl MatchController {
    /// Controller holding an idle match.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: MatchState::new(),
            log: MatchLog::new(),
        }
    }

    /// Controller holding a started match.
    #[must_use]
    pub fn started() -> Self {
        let mut controller = Self::new();
        controller.start();
        controller
    }

    /// Controller wrapping an already staged state.
    #[must_use]
    pub fn from_state(state: MatchState) -> Self {
        Self {
            state,
            log: MatchLog::new(),
        }
    }

    /// Discard everything and begin a fresh match.
    ///
    /// Valid from any phase; this is also the reset.
    pub fn start(&mut self) -> Event {
        self.state = MatchState::new();
        self.state.phase = MatchPhase::Playing;
        self.log.clear();

        let event = Event::new(self.state.turn.active_id(), EventKind::MatchStarted);
        self.log.push(event.to_string());
        info!("match started");
        event
    }

    /// Current match state.
    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Recent log lines, newest first.
    #[must_use]
    pub fn log(&self) -> &MatchLog {
        &self.log
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> MatchPhase {
        self.state.phase
    }

    /// Combatant whose input is accepted.
    #[must_use]
    pub fn active_id(&self) -> CombatantId {
        self.state.turn.active_id()
    }

    /// Sole survivor once finished.
    #[must_use]
    pub fn winner(&self) -> Option<CombatantId> {
        self.state.winner()
    }

    /// One-line summary of what the match is waiting for.
    #[must_use]
    pub fn status_line(&self) -> String {
        match self.state.phase {
            MatchPhase::Idle => "Press Start Match.".to_string(),
            MatchPhase::Finished => match self.winner() {
                Some(winner) => format!("{winner} wins."),
                None => "Match finished.".to_string(),
            },
            MatchPhase::Playing => format!(
                "Active: {}. Choose command and direction.",
                self.active_id()
            ),
        }
    }

    /// Submit a command with effects stamped at time zero.
    pub fn submit(&mut self, command: Command) -> TurnOutcome {
        self.submit_at(command, 0)
    }

    /// Parse and submit a text command.
    ///
    /// Text that does not parse is refused without consuming the turn and is
    /// attributed to the active combatant.
    pub fn submit_text(&mut self, line: &str) -> TurnOutcome {
        match line.parse::<Command>() {
            Ok(command) => self.submit(command),
            Err(err) => {
                debug!("unparsable command {line:?}: {err}");
                let outcome = TurnOutcome::rejected(self.active_id(), CommandRejection::Unparsable);
                self.record(&outcome);
                outcome
            }
        }
    }

    /// Submit a command, stamping its effects with `now_ms`.
    pub fn submit_at(&mut self, command: Command, now_ms: u64) -> TurnOutcome {
        if let Some(reason) = self.refusal(command.actor) {
            debug!("{command}: refused ({reason:?})");
            let outcome = TurnOutcome::rejected(command.actor, reason);
            self.record(&outcome);
            return outcome;
        }

        let state = &mut self.state;
        let resolution = resolve_action(
            &mut state.board,
            &mut state.roster,
            command.actor,
            command.action,
            command.direction,
        );

        let mut outcome = TurnOutcome {
            consumed: resolution.consumed,
            events: resolution.events,
            effects: resolution
                .effects
                .into_iter()
                .map(|effect| effect.at(now_ms))
                .collect(),
        };
        debug!("{command}: consumed={}", outcome.consumed);

        if outcome.consumed {
            self.finish_turn(command.actor, &mut outcome);
        }

        self.record(&outcome);
        outcome
    }

    fn refusal(&self, actor: CombatantId) -> Option<CommandRejection> {
        if self.state.phase != MatchPhase::Playing {
            Some(CommandRejection::NotPlaying)
        } else if actor != self.active_id() {
            Some(CommandRejection::NotActive)
        } else if !self.state.roster.get(actor).alive {
            Some(CommandRejection::ActorDead)
        } else {
            None
        }
    }

    /// Win check, then turn hand-off. Only called after a consumed action.
    fn finish_turn(&mut self, actor: CombatantId, outcome: &mut TurnOutcome) {
        let mut alive = self.state.roster.alive_combatants();
        if let (Some(winner), None) = (alive.next(), alive.next()) {
            let winner = winner.id;
            self.state.phase = MatchPhase::Finished;
            outcome.events.push(Event::new(winner, EventKind::MatchWon));
            info!("{winner} wins in round {}", self.state.round());
            return;
        }

        if let Some(advance) = self.state.turn.advance(&self.state.roster) {
            outcome.events.push(Event::new(
                actor,
                EventKind::TurnAdvanced {
                    next: advance.to,
                    round: advance.round,
                },
            ));
        }
    }

    fn record(&mut self, outcome: &TurnOutcome) {
        for event in &outcome.events {
            if !matches!(event.kind, EventKind::TurnAdvanced { .. }) {
                self.log.push(event.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{
        Action, Board, Direction, Position, Roster, DEFAULT_HP, MATCH_LOG_CAPACITY,
    };

    fn cmd(actor: CombatantId, action: Action, direction: Direction) -> Command {
        Command::new(actor, action, direction)
    }

    #[test]
    fn test_idle_refuses_input() {
        let mut controller = MatchController::new();
        let outcome = controller.submit(cmd(CombatantId::Up, Action::Shield, Direction::Down));
        assert!(!outcome.consumed);
        assert_eq!(
            outcome.events[0].kind,
            EventKind::CommandRejected {
                reason: CommandRejection::NotPlaying
            }
        );
        assert_eq!(controller.status_line(), "Press Start Match.");
    }

    #[test]
    fn test_out_of_turn_refused() {
        let mut controller = MatchController::started();
        let before = controller.state().clone();

        let outcome = controller.submit(cmd(CombatantId::Down, Action::Shoot, Direction::Up));
        assert!(!outcome.consumed);
        assert_eq!(
            outcome.events[0].kind,
            EventKind::CommandRejected {
                reason: CommandRejection::NotActive
            }
        );
        assert_eq!(controller.state(), &before);
    }

    #[test]
    fn test_consumed_action_advances_turn() {
        let mut controller = MatchController::started();
        let outcome = controller.submit(cmd(CombatantId::Up, Action::Shield, Direction::Down));

        assert!(outcome.consumed);
        assert_eq!(controller.active_id(), CombatantId::Left);
        assert_eq!(
            outcome.events.last().map(|e| e.kind),
            Some(EventKind::TurnAdvanced {
                next: CombatantId::Left,
                round: 1
            })
        );
    }

    #[test]
    fn test_rejected_action_keeps_turn() {
        let mut controller = MatchController::started();
        let outcome = controller.submit(cmd(CombatantId::Up, Action::Move, Direction::Up));

        assert!(!outcome.consumed);
        assert!(!outcome.has_event("turn-advanced"));
        assert_eq!(controller.active_id(), CombatantId::Up);
        assert_eq!(controller.state().round(), 1);
    }

    #[test]
    fn test_unparsable_text_is_refused() {
        let mut controller = MatchController::started();
        let before = controller.state().clone();

        let outcome = controller.submit_text("up dance left");
        assert!(!outcome.consumed);
        assert_eq!(outcome.events[0].actor, CombatantId::Up);
        assert_eq!(
            outcome.events[0].kind,
            EventKind::CommandRejected {
                reason: CommandRejection::Unparsable
            }
        );
        assert_eq!(controller.state(), &before);
    }

    #[test]
    fn test_effects_are_stamped() {
        let mut controller = MatchController::started();
        let shot = cmd(CombatantId::Up, Action::Shoot, Direction::Down);
        let outcome = controller.submit_at(shot, 500);
        assert!(!outcome.effects.is_empty());
        assert!(outcome.effects.iter().all(|e| e.started_at_ms == 500));
    }

    #[test]
    fn test_last_elimination_finishes_match() {
        let mut roster = Roster::standard();
        roster.get_mut(CombatantId::Down).take_hit(DEFAULT_HP);
        roster.get_mut(CombatantId::Up).take_hit(DEFAULT_HP);
        roster.get_mut(CombatantId::Right).hp = 1;
        let mut state = MatchState::with_setup(Board::empty(), roster);
        state.turn.advance(&state.roster);
        let mut controller = MatchController::from_state(state);
        assert_eq!(controller.active_id(), CombatantId::Left);

        let outcome = controller.submit(cmd(CombatantId::Left, Action::Shoot, Direction::Right));

        let names: Vec<_> = outcome.events.iter().map(Event::name).collect();
        assert_eq!(names, vec!["hit", "eliminated", "match-won"]);
        assert_eq!(controller.phase(), MatchPhase::Finished);
        assert_eq!(controller.winner(), Some(CombatantId::Left));
        assert_eq!(controller.active_id(), CombatantId::Left);
        assert_eq!(controller.status_line(), "Player B (Left) wins.");
        assert_eq!(controller.log().latest(), Some("Player B (Left) wins the match."));

        let outcome = controller.submit(cmd(CombatantId::Left, Action::Shield, Direction::Up));
        assert!(!outcome.consumed);
    }

    #[test]
    fn test_restart_discards_everything() {
        let mut controller = MatchController::started();
        controller.submit(cmd(CombatantId::Up, Action::Shoot, Direction::Down));
        controller.submit(cmd(CombatantId::Left, Action::Move, Direction::Right));
        assert_ne!(controller.state().board, Board::standard());

        controller.start();
        assert_eq!(controller.state().board, Board::standard());
        assert_eq!(controller.state().roster, Roster::standard());
        assert_eq!(controller.active_id(), CombatantId::Up);
        assert_eq!(controller.state().round(), 1);
        assert_eq!(controller.log().len(), 1);
        assert_eq!(
            controller.state().roster.get(CombatantId::Left).position,
            Position::new(5, 0)
        );
    }

    #[test]
    fn test_log_is_bounded() {
        let mut controller = MatchController::started();
        for _ in 0..30 {
            controller.submit(cmd(CombatantId::Up, Action::Move, Direction::Up));
        }
        assert_eq!(controller.log().len(), MATCH_LOG_CAPACITY);
        assert_eq!(
            controller.log().latest(),
            Some("Player A (Up) cannot move out of map.")
        );
    }
}
