//! Connect Four position: both sides' discs plus the side to move.

use crate::{
    check_result, is_legal, landing_slot, Bitboard, Cell, Columns, Connect4Error, GameResult,
    Outcome, Player, WIDTH,
};

/// What a single placement did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Cell the disc landed on.
    pub cell: Cell,
    /// Player who dropped the disc.
    pub mover: Player,
    /// Result of checking the new disc.
    pub result: GameResult,
}

impl Placement {
    /// The outcome this placement decided, if any.
    #[inline]
    pub fn outcome(&self) -> Option<Outcome> {
        match self.result {
            GameResult::Unresolved => None,
            GameResult::Draw => Some(Outcome::Draw),
            GameResult::Win => Some(Outcome::Win(self.mover)),
        }
    }
}

/// A Connect Four position.
///
/// Invariant: the two occupancy masks never share a cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Position {
    occupied: [Bitboard; 2],
    turn: Player,
}

impl Position {
    /// Empty board with O to move.
    pub const fn new() -> Self {
        Self {
            occupied: [Bitboard::EMPTY; 2],
            turn: Player::O,
        }
    }

    /// Builds a position from raw masks.
    ///
    /// # Panics
    /// Panics if the masks overlap or leave the board.
    pub fn from_masks(o: Bitboard, x: Bitboard, turn: Player) -> Self {
        assert!((o & x).is_empty(), "occupancy masks overlap: {:?}", o & x);
        assert!(
            Bitboard::FULL.contains_all(o | x),
            "occupancy masks leave the board"
        );
        Self {
            occupied: [o, x],
            turn,
        }
    }

    /// Discs of the given player.
    #[inline]
    pub const fn occupied(&self, player: Player) -> Bitboard {
        self.occupied[player as usize]
    }

    /// Discs of both players.
    #[inline]
    pub fn taken(&self) -> Bitboard {
        self.occupied[0] | self.occupied[1]
    }

    /// Side to move.
    #[inline]
    pub const fn turn(&self) -> Player {
        self.turn
    }

    /// Owner of a cell, if any.
    pub fn get(&self, cell: Cell) -> Option<Player> {
        Player::ALL
            .into_iter()
            .find(|&player| self.occupied(player).contains(cell))
    }

    /// Number of discs on the board.
    #[inline]
    pub fn moves_played(&self) -> u32 {
        self.taken().popcount()
    }

    /// Returns true if every cell is taken.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.taken() == Bitboard::FULL
    }

    #[inline]
    pub fn is_legal(&self, column: usize) -> bool {
        is_legal(self.taken(), column)
    }

    /// Playable columns in ascending order.
    pub fn legal_columns(&self) -> Columns {
        let taken = self.taken();
        (0..WIDTH).filter(|&col| is_legal(taken, col)).collect()
    }

    /// Validates a column for play, reporting why it cannot be used.
    pub fn check_column(&self, column: usize) -> Result<(), Connect4Error> {
        if column >= WIDTH {
            Err(Connect4Error::InvalidColumn(column))
        } else if !self.is_legal(column) {
            Err(Connect4Error::ColumnFull(column))
        } else {
            Ok(())
        }
    }

    /// Cell a disc dropped in `column` would land on.
    ///
    /// # Panics
    /// Panics if the column is out of range or full.
    #[inline]
    pub fn landing_cell(&self, column: usize) -> Cell {
        landing_slot(self.taken(), column)
    }

    /// Drops a disc for the side to move, checks the result and passes the
    /// turn.
    ///
    /// # Panics
    /// Panics if the column is out of range or full.
    pub fn play(&mut self, column: usize) -> Placement {
        let cell = self.landing_cell(column);
        let mover = self.turn;
        self.occupied[mover.index()].set(cell);
        let result = check_result(self.occupied(mover), self.occupied(!mover), cell);
        self.turn = !mover;
        Placement {
            cell,
            mover,
            result,
        }
    }

}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}
