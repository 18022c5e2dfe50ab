//! Connect Four domain types.
//!
//! - Player: the two sides, indexed 0 and 1 so they can address per-side arrays
//! - GameResult: what a single placement did to the game
//! - Outcome: how a finished game (or a finished simulation) ended

use std::fmt;
use std::ops::Not;

/// One of the two sides.
///
/// `O` always moves first. The discriminant doubles as the index into
/// per-player arrays such as the two occupancy masks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Player {
    O = 0,
    X = 1,
}

impl Player {
    /// Both players in turn order.
    pub const ALL: [Player; 2] = [Player::O, Player::X];

    /// Returns the opposing player.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Player::O => Player::X,
            Player::X => Player::O,
        }
    }

    /// Returns the index (0 for O, 1 for X).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Disc character used when rendering the board.
    #[inline]
    pub const fn symbol(self) -> char {
        match self {
            Player::O => 'O',
            Player::X => 'X',
        }
    }
}

impl Not for Player {
    type Output = Player;

    #[inline]
    fn not(self) -> Player {
        self.opposite()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Result of checking the cell that was just played.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// The game goes on.
    Unresolved,
    /// The board is full and nobody has four in a row.
    Draw,
    /// The player who just moved completed a line.
    Win,
}

impl GameResult {
    /// Returns true if the game is over.
    #[inline]
    pub const fn is_decided(self) -> bool {
        !matches!(self, GameResult::Unresolved)
    }
}

/// How a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    Win(Player),
    Draw,
}

impl Outcome {
    /// Returns the winner, if any.
    #[inline]
    pub const fn winner(self) -> Option<Player> {
        match self {
            Outcome::Win(player) => Some(player),
            Outcome::Draw => None,
        }
    }

    /// Returns true if this outcome earns full credit for `mover` when it is
    /// backed up through a fully expanded node: a win by `mover`, or a draw.
    #[inline]
    pub fn credits(self, mover: Player) -> bool {
        match self {
            Outcome::Win(player) => player == mover,
            Outcome::Draw => true,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win(player) => write!(f, "player {} wins", player),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}
