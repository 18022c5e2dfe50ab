//! Connect Four against a Monte Carlo tree search engine.
//!
//! `play` runs an interactive game on stdin/stdout with any mix of human and
//! computer players. `selfplay` runs computer-vs-computer games in parallel
//! and can save them as MessagePack records.

mod display;
mod driver;
mod human;
mod selfplay;

use std::io;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use connect4_mcts::{rng::clock_seed, Arena, Capacity, MctsConfig, DEFAULT_MEMORY_MB};
use driver::{Driver, Seat};
use selfplay::Summary;
use tracing::info;

/// Connect Four with a Monte Carlo tree search opponent.
#[derive(Parser)]
#[command(name = "connect4")]
#[command(about = "Play Connect Four against a Monte Carlo tree search engine")]
struct Cli {
    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game.
    Play {
        /// Who plays O (moves first).
        #[arg(long, value_enum, default_value_t = Seat::Human)]
        first: Seat,

        /// Who plays X.
        #[arg(long, value_enum, default_value_t = Seat::Computer)]
        second: Seat,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Play computer-vs-computer games.
    Selfplay {
        /// Number of games.
        #[arg(short, long, default_value = "10")]
        games: usize,

        #[command(flatten)]
        engine: EngineArgs,

        /// Directory for MessagePack game records.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Engine settings shared by both commands.
#[derive(Args)]
struct EngineArgs {
    /// Playouts per computer move.
    #[arg(short, long, default_value = "100000", value_parser = clap::value_parser!(u64).range(1..))]
    playouts: u64,

    /// Arena memory per engine, in MiB.
    #[arg(long, default_value_t = DEFAULT_MEMORY_MB)]
    memory_mb: usize,

    /// Random seed (defaults to the current time).
    #[arg(long)]
    seed: Option<u64>,
}

impl EngineArgs {
    fn config(&self) -> MctsConfig {
        let mut config = MctsConfig::default()
            .with_playouts(self.playouts as usize)
            .with_capacity(Capacity::megabytes(self.memory_mb));
        config.seed = self.seed;
        config
    }
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

/// Arena size in whole MiB, rounded up.
fn arena_megabytes(nodes: usize) -> usize {
    const MIB: usize = 1024 * 1024;
    (nodes * Arena::slot_bytes() + MIB - 1) / MIB
}

/// Run the play command.
fn cmd_play(first: Seat, second: Seat, engine: &EngineArgs) -> Result<()> {
    let mut driver = Driver::new([first, second], &engine.config())?;
    for (_, mcts) in driver.engines() {
        println!(
            "AI using {}MB ({} nodes)",
            arena_megabytes(mcts.capacity()),
            mcts.capacity()
        );
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let outcome = driver.play(&mut stdin.lock(), &mut stdout.lock())?;
    info!(%outcome, discs = driver.position().moves_played(), "Game over");

    Ok(())
}

/// Run the selfplay command.
fn cmd_selfplay(games: usize, engine: &EngineArgs, output: Option<PathBuf>) -> Result<()> {
    let config = engine.config();
    let seed = engine.seed.unwrap_or_else(clock_seed);

    println!(
        "Playing {} games with {} playouts/move, {}MB per engine",
        games, config.playouts, engine.memory_mb
    );
    println!("Seed: {}", seed);

    let start = Instant::now();
    let records = selfplay::play_games(games, &config, seed)?;
    let elapsed = start.elapsed();

    if let Some(dir) = &output {
        selfplay::write_records(&records, dir)?;
        println!("Files saved to: {:?}", dir);
    }

    let summary = Summary::from_records(&records);
    println!("\nCompleted in {:.2}s", elapsed.as_secs_f64());
    println!("Games played: {}", summary.games);
    println!("Average game length: {:.1} moves", summary.average_length());
    println!(
        "Outcomes: O wins: {}, X wins: {}, Draws: {}",
        summary.o_wins, summary.x_wins, summary.draws
    );

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Play {
            first,
            second,
            engine,
        } => cmd_play(first, second, &engine),

        Commands::Selfplay {
            games,
            engine,
            output,
        } => cmd_selfplay(games, &engine, output),
    }
}
