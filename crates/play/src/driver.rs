//! Game driver: seats, engines and the move loop.
//!
//! Each computer seat owns its own engine. Every committed move, whoever
//! made it, is passed to every engine so that all of them stay rooted at the
//! real position.

use std::io::{BufRead, Write};

use anyhow::{bail, Result};
use clap::ValueEnum;
use connect4_board::{winning_line, Bitboard, Placement, Player, Position};
use connect4_core::Outcome;
use connect4_mcts::{rng::clock_seed, Mcts, MctsConfig};
use tracing::{debug, info};

use crate::{display::render, human::read_column};

/// Who plays a side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Seat {
    Human,
    Computer,
}

/// One game in progress.
pub struct Driver {
    seats: [Seat; 2],
    engines: [Option<Mcts>; 2],
    position: Position,
    playouts: usize,
    moves: Vec<usize>,
    last: Option<Placement>,
}

impl Driver {
    /// Sets up a game, building one engine per computer seat.
    ///
    /// Without a configured seed, a base seed is taken from the clock. X's
    /// engine uses the base seed plus one.
    pub fn new(seats: [Seat; 2], config: &MctsConfig) -> Result<Self> {
        let base_seed = config.seed.unwrap_or_else(clock_seed);
        let mut engines = [None, None];
        for player in Player::ALL {
            if seats[player.index()] == Seat::Computer {
                let seed = base_seed.wrapping_add(player.index() as u64);
                let engine = Mcts::new(config.clone().with_seed(seed))?;
                info!(
                    player = %player,
                    seed,
                    nodes = engine.capacity(),
                    "Engine ready"
                );
                engines[player.index()] = Some(engine);
            }
        }

        Ok(Self {
            seats,
            engines,
            position: Position::new(),
            playouts: config.playouts,
            moves: Vec::new(),
            last: None,
        })
    }

    /// Engines with the side they play.
    pub fn engines(&self) -> impl Iterator<Item = (Player, &Mcts)> {
        Player::ALL
            .into_iter()
            .zip(self.engines.iter())
            .filter_map(|(player, engine)| engine.as_ref().map(|e| (player, e)))
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn to_move(&self) -> Player {
        self.position.turn()
    }

    pub fn seat(&self, player: Player) -> Seat {
        self.seats[player.index()]
    }

    /// Columns played so far, 0-based.
    pub fn moves(&self) -> &[usize] {
        &self.moves
    }

    /// How the game ended, if it has.
    pub fn outcome(&self) -> Option<Outcome> {
        self.last.and_then(|placement| placement.outcome())
    }

    /// The four cells that won the game, if it was won.
    pub fn winning_line(&self) -> Option<Bitboard> {
        let placement = self.last?;
        winning_line(self.position.occupied(placement.mover), placement.cell)
    }

    /// Asks the engine of the side to move for a column.
    ///
    /// # Errors
    /// Fails if the side to move has no engine or the search finds no move.
    pub fn computer_move(&mut self) -> Result<usize> {
        let player = self.to_move();
        let Some(engine) = self.engines[player.index()].as_mut() else {
            bail!("Player {} is not played by the computer", player);
        };
        match engine.run_many(self.playouts) {
            Some(column) => {
                debug!(player = %player, column, "Computer move");
                Ok(column)
            }
            None => bail!("Search found no move for player {}", player),
        }
    }

    /// Plays `column` for the side to move and advances every engine.
    ///
    /// # Errors
    /// Fails if the game is over or the column cannot be played.
    pub fn commit(&mut self, column: usize) -> Result<Placement> {
        if let Some(outcome) = self.outcome() {
            bail!("The game is over ({})", outcome);
        }
        self.position.check_column(column)?;

        let placement = self.position.play(column);
        for engine in self.engines.iter_mut().flatten() {
            let mirrored = engine.advance(column);
            debug_assert_eq!(mirrored, placement, "engine out of sync");
        }
        self.moves.push(column);
        self.last = Some(placement);
        Ok(placement)
    }

    /// Plays the game to the end, reading human moves from `input` and
    /// writing the board, prompts and result to `output`.
    pub fn play<R: BufRead, W: Write>(&mut self, input: &mut R, output: &mut W) -> Result<Outcome> {
        loop {
            write!(output, "\n{}", render(&self.position, None))?;

            let column = match self.seat(self.to_move()) {
                Seat::Human => read_column(&self.position, input, output)?,
                Seat::Computer => self.computer_move()?,
            };

            if let Some(outcome) = self.commit(column)?.outcome() {
                write!(output, "\n{}", render(&self.position, self.winning_line()))?;
                writeln!(output, "{}", outcome)?;
                output.flush()?;
                return Ok(outcome);
            }
        }
    }
}
