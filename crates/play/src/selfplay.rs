//! Computer-vs-computer games.
//!
//! Games run in parallel, one per rayon task, each with its own pair of
//! engines. A game's seed depends only on the base seed and its index, so
//! results do not depend on scheduling.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use connect4_core::{Outcome, Player};
use connect4_mcts::MctsConfig;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::driver::{Driver, Seat};

/// A finished game.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GameRecord {
    /// Columns played, 0-based, in order.
    pub moves: Vec<usize>,

    /// Winning side ('O' or 'X'), or None for a draw.
    pub winner: Option<char>,

    /// Seed, budget and arena size used for the game.
    pub metadata: HashMap<String, serde_json::Value>,
}

impl GameRecord {
    pub fn outcome(&self) -> Outcome {
        match self.winner {
            Some('O') => Outcome::Win(Player::O),
            Some(_) => Outcome::Win(Player::X),
            None => Outcome::Draw,
        }
    }
}

/// Win/draw counts over a batch of games.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub games: usize,
    pub o_wins: usize,
    pub x_wins: usize,
    pub draws: usize,
    pub total_moves: usize,
}

impl Summary {
    pub fn from_records(records: &[GameRecord]) -> Self {
        let mut summary = Summary {
            games: records.len(),
            ..Default::default()
        };
        for record in records {
            summary.total_moves += record.moves.len();
            match record.outcome() {
                Outcome::Win(Player::O) => summary.o_wins += 1,
                Outcome::Win(Player::X) => summary.x_wins += 1,
                Outcome::Draw => summary.draws += 1,
            }
        }
        summary
    }

    pub fn average_length(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_moves as f64 / self.games as f64
        }
    }
}

/// Seed of game `index` in a batch.
pub fn game_seed(base: u64, index: usize) -> u64 {
    base.wrapping_add(index as u64 * 1000)
}

/// Plays one computer-vs-computer game.
pub fn play_game(config: &MctsConfig, seed: u64) -> Result<GameRecord> {
    let config = config.clone().with_seed(seed);
    let mut driver = Driver::new([Seat::Computer, Seat::Computer], &config)?;

    let outcome = loop {
        let column = driver.computer_move()?;
        if let Some(outcome) = driver.commit(column)?.outcome() {
            break outcome;
        }
    };
    debug!(seed, moves = driver.moves().len(), %outcome, "Game finished");

    let mut metadata = HashMap::new();
    metadata.insert("seed".to_string(), serde_json::json!(seed));
    metadata.insert("playouts".to_string(), serde_json::json!(config.playouts));
    metadata.insert(
        "nodes".to_string(),
        serde_json::json!(driver.engines().map(|(_, e)| e.capacity()).max()),
    );

    Ok(GameRecord {
        moves: driver.moves().to_vec(),
        winner: outcome.winner().map(Player::symbol),
        metadata,
    })
}

/// Plays `games` games in parallel.
pub fn play_games(games: usize, config: &MctsConfig, base_seed: u64) -> Result<Vec<GameRecord>> {
    (0..games)
        .into_par_iter()
        .map(|i| play_game(config, game_seed(base_seed, i)))
        .collect()
}

/// Writes each record to `game_{index:06}.msgpack` under `dir`.
pub fn write_records(records: &[GameRecord], dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {:?}", dir))?;

    for (i, record) in records.iter().enumerate() {
        let filename = dir.join(format!("game_{:06}.msgpack", i));
        let file = File::create(&filename)
            .with_context(|| format!("Failed to create file: {:?}", filename))?;
        let mut writer = BufWriter::new(file);
        // Named fields keep the records readable as maps.
        rmp_serde::encode::write_named(&mut writer, record)
            .with_context(|| format!("Failed to serialize game {}", i))?;
    }

    Ok(())
}
