//! Connect Four Core - shared domain types
//!
//! This crate provides the small vocabulary shared by the board, the search
//! engine and the command-line front end.
//!
//! # Types
//!
//! - [`Player`] - The two sides, `O` (moves first) and `X`
//! - [`GameResult`] - Result of checking a single placement
//! - [`Outcome`] - A decided game: a win for one side, or a draw

mod error;
mod types;

pub use error::{Connect4Error, Result};
pub use types::{GameResult, Outcome, Player};
