//! Soak command implementation.

use super::output::{format_soak_csv, format_soak_text, JsonSoakResult, SoakStats};
use super::{CliError, SoakFormat};
use indicatif::{ProgressBar, ProgressStyle};
use laser_arena::soak::{run_soak, SoakConfig};
use rayon::prelude::*;
use std::time::Instant;

const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} matches ({per_sec})";

/// Execute the soak command.
///
/// # Errors
///
/// Returns an error if the progress bar cannot be built or any match
/// violated an invariant.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn execute(
    games: u64,
    seed: Option<u64>,
    threads: Option<usize>,
    max_commands: Option<u32>,
    format: SoakFormat,
    progress: bool,
) -> Result<(), CliError> {
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let base_seed = seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(42)
    });

    let mut config = SoakConfig::default();
    if let Some(m) = max_commands {
        config.max_commands = m;
    }

    let pb = if progress {
        let style = ProgressStyle::default_bar()
            .template(PROGRESS_TEMPLATE)
            .map_err(|e| CliError::new(format!("Bad progress template: {e}")))?
            .progress_chars("=>-");
        let pb = ProgressBar::new(games);
        pb.set_style(style);
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();

    // Each thread accumulates into its own SoakStats, then we merge at the end
    let stats = (0..games)
        .into_par_iter()
        .fold(SoakStats::default, |mut local_stats, i| {
            let match_seed = base_seed.wrapping_add(i);
            local_stats.add_result(&run_soak(match_seed, &config));
            if let Some(pb) = &pb {
                pb.inc(1);
            }
            local_stats
        })
        .reduce(SoakStats::default, |mut a, b| {
            a.merge(&b);
            a
        });

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();
    let games_per_sec = if duration.as_secs_f64() > 0.0 {
        stats.games_played as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    match format {
        SoakFormat::Text => {
            println!("Base seed: {base_seed}");
            println!();
            print!("{}", format_soak_text(&stats));
            println!();
            println!("Duration: {:.2}s ({:.0} matches/sec)", duration.as_secs_f64(), games_per_sec);
        }
        SoakFormat::Json => {
            let json_result = JsonSoakResult::from_stats(&stats);
            println!("{}", serde_json::to_string_pretty(&json_result)?);
        }
        SoakFormat::Csv => {
            print!("{}", format_soak_csv(&stats));
        }
    }

    if stats.failures.is_empty() {
        Ok(())
    } else {
        Err(CliError::new(format!(
            "{} of {} matches failed",
            stats.failures.len(),
            stats.games_played
        )))
    }
}
