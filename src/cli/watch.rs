//! Watch command implementation - Interactive TUI viewer.

use super::CliError;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use laser_arena::game::{Cell, EffectKind, EffectRecord, Position, Strength};
use laser_arena::replay::{Recording, ReplayEngine};
use laser_arena::CombatantId;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io::stdout;
use std::path::Path;
use std::time::{Duration, Instant};

/// Execute the watch command.
///
/// # Errors
///
/// Returns an error if the recording cannot be loaded or the TUI fails.
pub(crate) fn execute(recording_path: &Path, speed: u64) -> Result<(), CliError> {
    let recording = Recording::load(recording_path)?;
    let engine = ReplayEngine::new(recording);
    run_tui(engine, speed)
}

/// App state for the TUI.
struct App {
    engine: ReplayEngine,
    paused: bool,
    speed_ms: u64,
    last_step: Instant,
}

impl App {
    fn new(engine: ReplayEngine, speed_ms: u64) -> Self {
        Self {
            engine,
            paused: true, // Start paused
            speed_ms,
            last_step: Instant::now(),
        }
    }

    fn step_forward(&mut self) {
        if !self.engine.is_finished() {
            let _ = self.engine.step_forward();
            self.last_step = Instant::now();
        }
    }

    fn step_backward(&mut self) {
        let _ = self.engine.step_backward();
        self.last_step = Instant::now();
    }

    fn restart(&mut self) {
        let _ = self.engine.goto_step(0);
        self.paused = true;
    }

    fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    fn increase_speed(&mut self) {
        self.speed_ms = self.speed_ms.saturating_sub(100).max(50);
    }

    fn decrease_speed(&mut self) {
        self.speed_ms = (self.speed_ms + 100).min(2000);
    }

    fn should_auto_step(&self) -> bool {
        !self.paused
            && !self.engine.is_finished()
            && self.last_step.elapsed() >= Duration::from_millis(self.speed_ms)
    }

    /// Effects of the last step, still live at the current wall time.
    ///
    /// Replayed effects are stamped at 0, so elapsed time since the step is
    /// the clock they are measured against.
    fn live_effects(&self) -> Vec<EffectRecord> {
        let elapsed = u64::try_from(self.last_step.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.engine
            .last_outcome()
            .map(|outcome| {
                outcome
                    .effects
                    .iter()
                    .copied()
                    .filter(|e| e.is_live(elapsed))
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn run_tui(engine: ReplayEngine, speed: u64) -> Result<(), CliError> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| CliError::new(e.to_string()))?;

    let mut app = App::new(engine, speed);

    loop {
        terminal
            .draw(|f| ui(f, &app))
            .map_err(|e| CliError::new(e.to_string()))?;

        if app.should_auto_step() {
            app.step_forward();
        }

        // Handle input with timeout
        if event::poll(Duration::from_millis(50)).map_err(|e| CliError::new(e.to_string()))?
            && let Event::Key(key) = event::read().map_err(|e| CliError::new(e.to_string()))?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Char(' ') => app.toggle_pause(),
                KeyCode::Right | KeyCode::Char('l') => {
                    app.paused = true;
                    app.step_forward();
                }
                KeyCode::Left | KeyCode::Char('h') => {
                    app.paused = true;
                    app.step_backward();
                }
                KeyCode::Char('+' | '=') => app.increase_speed(),
                KeyCode::Char('-') => app.decrease_speed(),
                KeyCode::Char('r') => app.restart(),
                _ => {}
            }
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(13),   // Board and side panel
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    render_header(f, chunks[0], app);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(26), Constraint::Min(30)])
        .split(chunks[1]);

    render_board(f, main_chunks[0], app);

    let side_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(11), Constraint::Min(4)])
        .split(main_chunks[1]);

    render_combatants(f, side_chunks[0], app);
    render_log(f, side_chunks[1], app);

    render_footer(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let status = if app.engine.state().is_finished() {
        "MATCH OVER"
    } else if app.engine.is_finished() {
        "END OF RECORDING"
    } else if app.paused {
        "PAUSED"
    } else {
        "RUNNING"
    };

    let title = format!(
        " Laser Arena Viewer | Step {}/{} | Round {} | {} | Speed: {}ms ",
        app.engine.step(),
        app.engine.recording().len(),
        app.engine.state().round(),
        status,
        app.speed_ms
    );

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

/// Cells covered by a beam, excluding the shooter's own cell.
fn beam_cells(origin: Position, end: Position) -> Vec<Position> {
    let mut cells = Vec::new();
    let (dr, dc) = ((end.row - origin.row).signum(), (end.col - origin.col).signum());
    let mut pos = origin;
    while pos != end {
        pos = Position::new(pos.row + dr, pos.col + dc);
        cells.push(pos);
    }
    cells
}

fn render_board(f: &mut Frame, area: Rect, app: &App) {
    let state = app.engine.state();
    let board = &state.board;

    let mut beam = Vec::new();
    let mut flashes = Vec::new();
    for effect in app.live_effects() {
        match effect.effect.kind {
            EffectKind::Beam => {
                beam.extend(beam_cells(effect.effect.origin, effect.effect.position));
            }
            EffectKind::HitFlash => flashes.push(effect.effect.position),
            EffectKind::HitShake { .. } | EffectKind::Sound { .. } => {}
        }
    }

    let mut lines: Vec<Line> = Vec::new();
    for row in 0..board.rows() {
        let mut spans = Vec::new();
        for col in 0..board.cols() {
            let pos = Position::new(row, col);
            let (ch, mut style) = match state.roster.combatant_at(pos) {
                Some(id) => (
                    id.label().to_string(),
                    Style::default().fg(combatant_color(id)).add_modifier(Modifier::BOLD),
                ),
                None => cell_to_char_style(board.tile_at(pos)),
            };
            if flashes.contains(&pos) {
                style = style.bg(Color::White);
            } else if beam.contains(&pos) {
                style = style.bg(Color::Red);
            }
            spans.push(Span::styled(ch, style));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
    }

    let board_widget =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Board "));

    f.render_widget(board_widget, area);
}

fn cell_to_char_style(cell: Option<Cell>) -> (String, Style) {
    match cell {
        Some(Cell::Block(Strength::Indestructible)) => {
            ("#".to_string(), Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        }
        Some(Cell::Block(Strength::Finite(n))) => (n.to_string(), Style::default().fg(Color::Gray)),
        Some(Cell::Empty) | None => (".".to_string(), Style::default().fg(Color::DarkGray)),
    }
}

fn render_combatants(f: &mut Frame, area: Rect, app: &App) {
    let controller = app.engine.controller();
    let mut lines = Vec::new();

    for combatant in controller.state().roster.iter() {
        let color = combatant_color(combatant.id);
        let marker = if combatant.alive && combatant.id == controller.active_id() {
            "> "
        } else {
            "  "
        };

        let mut spans = vec![
            Span::raw(marker),
            Span::styled(
                combatant.id.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ];
        if combatant.alive {
            spans.push(Span::raw(format!(
                "  HP {:>2}  shield {}  aim {}",
                combatant.hp, combatant.shield, combatant.aim
            )));
        } else {
            spans.push(Span::styled(" [ELIMINATED]", Style::default().fg(Color::DarkGray)));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(controller.status_line()));

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Combatants "))
        .wrap(Wrap { trim: false });

    f.render_widget(widget, area);
}

fn render_log(f: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = app
        .engine
        .controller()
        .log()
        .iter()
        .map(|entry| Line::from(entry.to_string()))
        .collect();

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Log "))
        .wrap(Wrap { trim: true });

    f.render_widget(widget, area);
}

fn combatant_color(id: CombatantId) -> Color {
    match id {
        CombatantId::Up => Color::Red,
        CombatantId::Left => Color::Blue,
        CombatantId::Down => Color::Green,
        CombatantId::Right => Color::Yellow,
    }
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let controls = if app.engine.is_finished() {
        " [q] Quit  [r] Restart  [←/→] Step "
    } else {
        " [q] Quit  [Space] Pause  [←/→] Step  [+/-] Speed  [r] Restart "
    };

    let footer = Paragraph::new(controls)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beam_cells() {
        let cells = beam_cells(Position::new(0, 5), Position::new(2, 5));
        assert_eq!(cells, vec![Position::new(1, 5), Position::new(2, 5)]);

        assert!(beam_cells(Position::new(5, 0), Position::new(5, 0)).is_empty());

        let cells = beam_cells(Position::new(5, 10), Position::new(5, 8));
        assert_eq!(cells, vec![Position::new(5, 9), Position::new(5, 8)]);
    }
}
