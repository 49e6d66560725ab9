//! Play command implementation - hot-seat match on stdin.

use super::CliError;
use laser_arena::replay::{render_ascii, Recording};
use laser_arena::{Command, MatchController};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const HELP: &str = "\
Commands:
  <actor> <action> <direction>   e.g. `up shoot down`, `b move right`
    actor:     up | left | down | right  (or A-D)
    action:    move | shield | shoot
    direction: up | left | down | right
  restart                        start a fresh match
  help                           show this help
  quit                           leave (saves the recording if --save was given)";

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if stdin/stdout fail or the recording cannot be saved.
pub(crate) fn execute(save: Option<PathBuf>) -> Result<(), CliError> {
    let mut controller = MatchController::started();
    let mut recording = Recording::default();

    println!("{HELP}");
    println!();
    print!("{}", render_ascii(&controller));

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("{}> ", controller.active_id());
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        match line {
            "" => continue,
            "quit" | "exit" | "q" => break,
            "help" | "?" => {
                println!("{HELP}");
                continue;
            }
            "restart" => {
                controller.start();
                recording = Recording::default();
                println!("{}", controller.log().latest().unwrap_or_default());
            }
            _ => {
                if let Ok(command) = line.parse::<Command>() {
                    recording.push(command);
                }
                let outcome = controller.submit_text(line);
                for event in outcome.events {
                    println!("{event}");
                }
            }
        }

        println!();
        print!("{}", render_ascii(&controller));
    }

    if let Some(save_path) = save {
        recording
            .save(&save_path)
            .map_err(|e| CliError::new(format!("Failed to save recording: {e}")))?;
        println!("Recording saved to: {}", save_path.display());
    }

    Ok(())
}
