//! AI Simulator CLI - plays synthetic-only werewolf rooms in memory.
//!
//! Every game goes through the same room controller a live server uses,
//! with timers off and each phase forced as soon as synthetic players
//! have had their turn.

mod metrics;
mod output;
mod simulator;
mod types;

use std::collections::BTreeMap;
use std::time::Instant;

use clap::Parser;
use metrics::{build_game_metrics, outcome_name, GameMetrics, MetricsContext};
use output::OutputWriter;
use simulator::Simulator;
use tracing::{info, warn};
use types::{ModeArg, OutputFormat, ProfileArg};
use werewolf_backend::domain::roles::GameMode;

#[derive(Parser)]
#[command(name = "ai-simulator")]
#[command(about = "In-memory werewolf simulator for synthetic player tuning")]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Role composition
    #[arg(long, default_value = "classic")]
    mode: ModeArg,

    /// Seats per game; raised to the mode's minimum if lower
    #[arg(long, default_value = "6")]
    players: usize,

    /// Profile for every seat (`mixed` rotates through all profiles)
    #[arg(long, default_value = "mixed")]
    profile: ProfileArg,

    /// Base seed (for deterministic runs); each game derives its own
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Show output summary and file paths
    #[arg(long)]
    show_output: bool,

    /// Output directory for results
    #[arg(long, default_value = "./simulation-results")]
    output_dir: String,

    /// Output format
    #[arg(long, default_value = "jsonl")]
    output_format: OutputFormat,

    /// Compress the detailed output file
    #[arg(long)]
    compress: bool,

    /// Emit logs as JSON, the way the backend does
    #[arg(long)]
    json_logs: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Silent by default, only show warnings/errors
    let filter = if args.verbose {
        "debug"
    } else if args.show_output {
        "info"
    } else {
        "warn"
    };
    if args.json_logs {
        werewolf_backend::telemetry::init_tracing_with(filter);
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let mode = GameMode::from(args.mode);
    let players = args.players.max(mode.minimum_players());
    if players != args.players {
        warn!(
            requested = args.players,
            players,
            %mode,
            "Raised player count to the mode minimum"
        );
    }
    let base_seed = args.seed.unwrap_or_else(rand::random);
    let profiles = (0..players).map(|seat| args.profile.for_seat(seat)).collect();
    let simulator = Simulator::new(mode, profiles, base_seed);

    if args.show_output {
        info!(games = args.games, %mode, players, profile = args.profile.name(), base_seed, "Starting simulator");
    }

    let mut output_writer =
        OutputWriter::new(&args.output_dir, &args.output_format, args.compress)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let start = Instant::now();
    let mut results = Vec::new();
    let mut errors = 0;

    for game_num in 1..=args.games {
        let game_start = Instant::now();
        match runtime.block_on(simulator.simulate_game(game_num)) {
            Ok(result) => {
                let ctx = MetricsContext {
                    game_id: game_num,
                    seed: base_seed,
                    mode: mode.as_str(),
                    profile: args.profile.name(),
                    total_games: args.games,
                    duration_ms: game_start.elapsed().as_secs_f64() * 1000.0,
                };
                let metrics = build_game_metrics(&ctx, &result);
                if let Err(e) = output_writer.write_game(&metrics) {
                    warn!("Failed to write metrics for game {}: {}", game_num, e);
                }
                if args.verbose {
                    info!(
                        game = game_num,
                        outcome = outcome_name(result.outcome),
                        rounds = result.rounds,
                        "Game completed"
                    );
                }
                results.push(metrics);
            }
            Err(e) => {
                errors += 1;
                warn!("Game {} failed: {}", game_num, e);
            }
        }
    }

    let elapsed = start.elapsed();
    let (detail_path, csv_path) = output_writer.output_paths();
    let (detail_path, csv_path) = (detail_path.to_path_buf(), csv_path.to_path_buf());
    output_writer.finish()?;

    if args.show_output {
        info!("Detailed results written to: {}", detail_path.display());
        info!("Summary CSV written to: {}", csv_path.display());
        print_summary(&results, errors, elapsed, args.games);
    }

    Ok(())
}

fn print_summary(results: &[GameMetrics], errors: u32, elapsed: std::time::Duration, total: u32) {
    println!("\n=== Simulation Summary ===");
    println!("Games completed: {}/{}", results.len(), total);
    if errors > 0 {
        println!("Errors: {}", errors);
    }
    println!("Total time: {:?}", elapsed);
    if results.is_empty() {
        return;
    }
    println!(
        "Average time per game: {:?}",
        elapsed / results.len() as u32
    );

    let mut outcomes: BTreeMap<&str, u32> = BTreeMap::new();
    let mut total_rounds = 0u64;
    // profile -> (seats played, seats won)
    let mut by_profile: BTreeMap<String, (u32, u32)> = BTreeMap::new();
    for game in results {
        *outcomes.entry(outcome_name(game.result.outcome)).or_default() += 1;
        total_rounds += u64::from(game.result.rounds);
        for player in &game.players {
            let entry = by_profile.entry(player.profile.clone()).or_default();
            entry.0 += 1;
            entry.1 += u32::from(player.won);
        }
    }

    println!(
        "Average rounds: {:.1}",
        total_rounds as f64 / results.len() as f64
    );

    println!("\n=== Outcomes ===");
    for (outcome, count) in &outcomes {
        let pct = (*count as f64 / results.len() as f64) * 100.0;
        println!("{outcome}: {count} ({pct:.1}%)");
    }

    println!("\n=== Results by Profile ===");
    for (profile, (seats, wins)) in &by_profile {
        let win_rate = (*wins as f64 / *seats as f64) * 100.0;
        println!("{profile}: seats={seats}, wins={wins} ({win_rate:.1}%)");
    }
}
