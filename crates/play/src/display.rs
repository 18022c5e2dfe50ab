//! Text rendering of the board.

use connect4_board::{Bitboard, Cell, Position, HEIGHT, WIDTH};

/// Renders the column header and the grid, top row first.
///
/// Discs inside `highlight` are drawn in lowercase.
pub fn render(position: &Position, highlight: Option<Bitboard>) -> String {
    let mut out = String::with_capacity((WIDTH * 2 + 1) * (HEIGHT + 1));

    for col in 1..=WIDTH {
        out.push_str(&col.to_string());
        out.push(' ');
    }
    out.push('\n');

    for row in 0..HEIGHT {
        for col in 0..WIDTH {
            let cell = Cell::new_unchecked((row * WIDTH + col) as u8);
            let symbol = match position.get(cell) {
                Some(player) if highlight.is_some_and(|line| line.contains(cell)) => {
                    player.symbol().to_ascii_lowercase()
                }
                Some(player) => player.symbol(),
                None => '.',
            };
            out.push(symbol);
            out.push(' ');
        }
        out.push('\n');
    }

    out
}
