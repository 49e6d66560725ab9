//! Replay command implementation.

use super::output::{CommandTally, JsonMatchResult};
use super::{CliError, ReplayFormat};
use laser_arena::replay::{Recording, ReplayEngine, ReplayError};
use std::path::Path;

/// Execute the replay command.
///
/// # Errors
///
/// Returns an error if the recording cannot be loaded or the step is out of
/// range.
pub(crate) fn execute(
    recording_path: &Path,
    format: ReplayFormat,
    step: Option<usize>,
) -> Result<(), CliError> {
    let recording = Recording::load(recording_path)?;
    let target = step.unwrap_or(recording.len());
    if target > recording.len() {
        return Err(ReplayError::StepOutOfBounds {
            requested: target,
            max_step: recording.len(),
        }
        .into());
    }

    let mut engine = ReplayEngine::new(recording);
    let mut tally = CommandTally::default();
    let mut events = Vec::new();
    while engine.step() < target {
        let outcome = engine.step_forward()?;
        tally.record(outcome.consumed);
        events.extend_from_slice(&outcome.events);
    }

    match format {
        ReplayFormat::Text => {
            println!("Step {}/{}", engine.step(), engine.recording().len());
            print!("{}", engine.render_ascii());
        }
        ReplayFormat::Report => {
            println!("Step {}/{}", engine.step(), engine.recording().len());
            print!("{}", engine.render_report());
        }
        ReplayFormat::Json => {
            let json_result = JsonMatchResult::new(engine.controller(), tally, &events);
            println!("{}", serde_json::to_string_pretty(&json_result)?);
        }
    }

    Ok(())
}
