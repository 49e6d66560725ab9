//! Script validation command implementation.

use super::CliError;
use laser_arena::replay::script_lines;
use laser_arena::Command;
use std::fs;
use std::path::Path;

/// Execute the validate command.
///
/// # Errors
///
/// Returns an error if the script cannot be read or any line fails to parse.
pub(crate) fn execute(script: &Path) -> Result<(), CliError> {
    let text = fs::read_to_string(script)
        .map_err(|e| CliError::new(format!("Failed to read {}: {e}", script.display())))?;

    println!("Validating: {}", script.display());
    println!();

    let mut total = 0usize;
    let mut bad = 0usize;
    for (line_no, line) in script_lines(&text) {
        total += 1;
        if let Err(e) = line.parse::<Command>() {
            bad += 1;
            println!("  line {line_no:>4}: {e}");
            println!("             {line}");
        }
    }

    println!();
    println!("Summary:");
    println!("  Commands:     {total}");
    println!("  Unparsable:   {bad}");

    if bad > 0 {
        return Err(CliError::new(format!("{bad} of {total} line(s) failed to parse")));
    }

    println!();
    println!("Validation successful!");

    Ok(())
}
