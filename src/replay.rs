//! Match recording and replay.
//!
//! Because matches are 100% deterministic, a recording is just the list of
//! commands submitted after the start. No state snapshots are stored: to view
//! step N, start a fresh match and re-submit the first N commands.
//!
//! # Time Travel
//!
//! - **Forward**: Submit the next recorded command
//! - **Backward**: Re-run from step 0 to (`step` - 1)
//! - **Jump to step N**: Re-run from step 0 to N

mod render;
mod text;

pub use render::render_ascii;
pub use text::render_report;

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::{Command, MatchController, MatchState, TurnOutcome};

/// Failure to save or load a recording.
#[derive(Debug, Error)]
pub enum RecordingError {
    /// File could not be read or written.
    #[error("recording I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// File contents are not a valid recording.
    #[error("recording is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Ordered commands submitted to one match after it started.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recording {
    /// Commands in submission order, including refused ones.
    pub commands: Vec<Command>,
}

impl Recording {
    /// Create a recording from a list of commands.
    #[must_use]
    pub fn new(commands: Vec<Command>) -> Self {
        Self { commands }
    }

    /// Append a command.
    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Number of recorded commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, RecordingError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid recording.
    pub fn from_json(json: &str) -> Result<Self, RecordingError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Save recording to a file as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if file operations fail.
    pub fn save(&self, path: &Path) -> Result<(), RecordingError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Load recording from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file operations fail or the format is invalid.
    pub fn load(path: &Path) -> Result<Self, RecordingError> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}

/// Meaningful lines of a command script with their 1-based line numbers.
///
/// Blank lines and lines starting with `#` are skipped; surrounding
/// whitespace is trimmed.
pub fn script_lines(script: &str) -> impl Iterator<Item = (usize, &str)> {
    script
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

/// Error type for replay operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReplayError {
    /// Step number out of bounds.
    #[error("step {requested} out of bounds (max: {max_step})")]
    StepOutOfBounds {
        /// Requested step.
        requested: usize,
        /// Last valid step (inclusive).
        max_step: usize,
    },
    /// Every recorded command has been applied.
    #[error("end of recording")]
    EndOfRecording,
}

/// Replay engine - steps through a recording deterministically.
///
/// Step `n` means the first `n` recorded commands have been submitted to a
/// freshly started match.
#[derive(Debug, Clone)]
pub struct ReplayEngine {
    recording: Recording,
    controller: MatchController,
    step: usize,
    last: Option<TurnOutcome>,
}

impl ReplayEngine {
    /// Create a new replay engine at step 0.
    #[must_use]
    pub fn new(recording: Recording) -> Self {
        Self {
            recording,
            controller: MatchController::started(),
            step: 0,
            last: None,
        }
    }

    /// Create a new replay engine at a specific step.
    ///
    /// # Errors
    ///
    /// Returns an error if `step` is past the end of the recording.
    pub fn new_at_step(recording: Recording, step: usize) -> Result<Self, ReplayError> {
        let mut engine = Self::new(recording);
        engine.goto_step(step)?;
        Ok(engine)
    }

    /// Get the recording.
    #[must_use]
    pub fn recording(&self) -> &Recording {
        &self.recording
    }

    /// Number of commands applied so far.
    #[must_use]
    pub fn step(&self) -> usize {
        self.step
    }

    /// Controller driving the replayed match.
    #[must_use]
    pub fn controller(&self) -> &MatchController {
        &self.controller
    }

    /// Current match state.
    #[must_use]
    pub fn state(&self) -> &MatchState {
        self.controller.state()
    }

    /// Outcome of the most recent step, if any.
    #[must_use]
    pub fn last_outcome(&self) -> Option<&TurnOutcome> {
        self.last.as_ref()
    }

    /// Check if every recorded command has been applied.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.step >= self.recording.len()
    }

    /// Submit the next recorded command.
    ///
    /// # Errors
    ///
    /// Returns an error if the recording is exhausted.
    pub fn step_forward(&mut self) -> Result<&TurnOutcome, ReplayError> {
        let command = *self
            .recording
            .commands
            .get(self.step)
            .ok_or(ReplayError::EndOfRecording)?;

        let outcome = self.controller.submit(command);
        self.step += 1;
        Ok(self.last.insert(outcome))
    }

    /// Step backward one command.
    ///
    /// This replays from step 0 to (`step` - 1).
    ///
    /// # Errors
    ///
    /// Returns an error if already at step 0.
    pub fn step_backward(&mut self) -> Result<(), ReplayError> {
        let Some(target) = self.step.checked_sub(1) else {
            return Err(ReplayError::StepOutOfBounds {
                requested: 0,
                max_step: self.recording.len(),
            });
        };
        self.goto_step(target)
    }

    /// Jump to a specific step by replaying from step 0.
    ///
    /// # Errors
    ///
    /// Returns an error if the step is past the end of the recording.
    pub fn goto_step(&mut self, target: usize) -> Result<(), ReplayError> {
        if target > self.recording.len() {
            return Err(ReplayError::StepOutOfBounds {
                requested: target,
                max_step: self.recording.len(),
            });
        }
        debug!("replaying to step {target}");

        self.controller = MatchController::started();
        self.step = 0;
        self.last = None;
        while self.step < target {
            self.step_forward()?;
        }
        Ok(())
    }

    /// Render current state to ASCII for terminal viewing.
    #[must_use]
    pub fn render_ascii(&self) -> String {
        render_ascii(&self.controller)
    }

    /// Render current state to a structured text report.
    #[must_use]
    pub fn render_report(&self) -> String {
        render_report(&self.controller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Action, CombatantId, Direction, MatchPhase};
    use tempfile::NamedTempFile;

    fn opening() -> Recording {
        Recording::new(vec![
            Command::new(CombatantId::Up, Action::Shoot, Direction::Down),
            Command::new(CombatantId::Left, Action::Move, Direction::Down),
            Command::new(CombatantId::Down, Action::Shield, Direction::Up),
        ])
    }

    #[test]
    fn test_recording_save_load() {
        let recording = opening();
        let temp_file = NamedTempFile::new().expect("create temp file");
        recording.save(temp_file.path()).expect("save recording");

        let loaded = Recording::load(temp_file.path()).expect("load recording");
        assert_eq!(loaded, recording);
    }

    #[test]
    fn test_recording_json_shape() {
        let json = opening().to_json().unwrap();
        assert!(json.contains("\"actor\": \"up\""));
        assert!(json.contains("\"action\": \"shoot\""));
    }

    #[test]
    fn test_load_rejects_garbage() {
        let temp_file = NamedTempFile::new().expect("create temp file");
        std::fs::write(temp_file.path(), "not json").unwrap();
        assert!(matches!(
            Recording::load(temp_file.path()),
            Err(RecordingError::Json(_))
        ));
        assert!(matches!(
            Recording::load(Path::new("/nonexistent/recording.json")),
            Err(RecordingError::Io(_))
        ));
    }

    #[test]
    fn test_script_lines_skip_comments() {
        let script = "# opening\nup shoot down\n\n  left move down  \n#done\n";
        let lines: Vec<_> = script_lines(script).collect();
        assert_eq!(lines, vec![(2, "up shoot down"), (4, "left move down")]);
    }

    #[test]
    fn test_step_forward_to_end() {
        let mut engine = ReplayEngine::new(opening());
        assert_eq!(engine.state().phase, MatchPhase::Playing);

        assert!(engine.step_forward().unwrap().consumed);
        assert_eq!(engine.state().turn.active_id(), CombatantId::Left);
        engine.step_forward().unwrap();
        engine.step_forward().unwrap();

        assert!(engine.is_finished());
        assert_eq!(engine.step_forward(), Err(ReplayError::EndOfRecording));
    }

    #[test]
    fn test_step_backward_matches_forward() {
        let mut engine = ReplayEngine::new(opening());
        engine.step_forward().unwrap();
        let after_one = engine.state().clone();
        engine.step_forward().unwrap();

        engine.step_backward().unwrap();
        assert_eq!(engine.step(), 1);
        assert_eq!(engine.state(), &after_one);

        engine.step_backward().unwrap();
        assert_eq!(
            engine.step_backward(),
            Err(ReplayError::StepOutOfBounds {
                requested: 0,
                max_step: 3
            })
        );
    }

    #[test]
    fn test_goto_step() {
        let mut engine = ReplayEngine::new(opening());
        engine.goto_step(3).unwrap();
        let at_end = engine.state().clone();

        let jumped = ReplayEngine::new_at_step(opening(), 3).unwrap();
        assert_eq!(jumped.state(), &at_end);

        assert!(engine.goto_step(4).is_err());
    }

    #[test]
    fn test_replay_error_display() {
        let err = ReplayError::StepOutOfBounds {
            requested: 15,
            max_step: 10,
        };
        assert!(format!("{err}").contains("15"));
        assert!(format!("{err}").contains("10"));
        assert!(format!("{}", ReplayError::EndOfRecording).contains("end"));
    }
}
