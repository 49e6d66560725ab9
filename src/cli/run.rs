//! Run command implementation.

use super::output::{format_text, CommandTally, JsonMatchResult};
use super::{CliError, OutputFormat};
use laser_arena::replay::{render_report, script_lines, Recording};
use laser_arena::MatchController;
use std::fs;
use std::path::{Path, PathBuf};

/// Execute the run command.
///
/// Every script line is submitted as text, so bad lines become refused
/// commands rather than errors. Only parsed commands are recorded.
///
/// # Errors
///
/// Returns an error if the script cannot be read or the recording cannot be
/// saved.
pub(crate) fn execute(
    script: &Path,
    format: OutputFormat,
    save: Option<PathBuf>,
    quiet: bool,
) -> Result<(), CliError> {
    let text = fs::read_to_string(script)
        .map_err(|e| CliError::new(format!("Failed to read {}: {e}", script.display())))?;

    let mut controller = MatchController::started();
    let mut recording = Recording::default();
    let mut tally = CommandTally::default();
    let mut events = Vec::new();

    let verbose = !quiet && format == OutputFormat::Text;
    if verbose {
        println!("Running {}...", script.display());
        println!();
    }

    for (line_no, line) in script_lines(&text) {
        if let Ok(command) = line.parse() {
            recording.push(command);
        }
        let outcome = controller.submit_text(line);
        tally.record(outcome.consumed);

        if verbose {
            for event in &outcome.events {
                println!("{line_no:>4}: {event}");
            }
        }
        events.extend(outcome.events);
    }

    if let Some(save_path) = save {
        recording
            .save(&save_path)
            .map_err(|e| CliError::new(format!("Failed to save recording: {e}")))?;
        if verbose {
            println!();
            println!("Recording saved to: {}", save_path.display());
        }
    }

    match format {
        OutputFormat::Text => {
            if verbose {
                println!();
            }
            print!("{}", format_text(&controller, tally));
        }
        OutputFormat::Json => {
            let json_result = JsonMatchResult::new(&controller, tally, &events);
            println!("{}", serde_json::to_string_pretty(&json_result)?);
        }
        OutputFormat::Report => {
            print!("{}", render_report(&controller));
        }
    }

    Ok(())
}
