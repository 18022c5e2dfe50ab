//! Reading a human player's move.

use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use connect4_board::Position;

/// Prompts until the player enters a playable 1-based column and returns it
/// 0-based.
///
/// Unparsable, out-of-range and full-column answers print `invalid move` and
/// prompt again.
///
/// # Errors
/// Fails on end of input or an I/O error.
pub fn read_column<R: BufRead, W: Write>(
    position: &Position,
    input: &mut R,
    output: &mut W,
) -> Result<usize> {
    let mut line = String::new();
    loop {
        write!(output, "\n> ")?;
        output.flush()?;

        line.clear();
        let read = input.read_line(&mut line).context("Failed to read move")?;
        if read == 0 {
            bail!("End of input while waiting for a move");
        }

        match parse_column(&line) {
            Some(column) if position.check_column(column).is_ok() => return Ok(column),
            _ => writeln!(output, "invalid move")?,
        }
    }
}

/// Parses a 1-based column number into a 0-based index.
fn parse_column(text: &str) -> Option<usize> {
    text.trim().parse::<usize>().ok()?.checked_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use connect4_board::HEIGHT;

    fn read(position: &Position, input: &str) -> (Result<usize>, String) {
        let mut reader = input.as_bytes();
        let mut output = Vec::new();
        let result = read_column(position, &mut reader, &mut output);
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_parse_column() {
        assert_eq!(parse_column("1\n"), Some(0));
        assert_eq!(parse_column("  7 "), Some(6));
        assert_eq!(parse_column("0"), None);
        assert_eq!(parse_column("-3"), None);
        assert_eq!(parse_column("x"), None);
    }

    #[test]
    fn test_reads_valid_column() {
        let (result, output) = read(&Position::new(), "4\n");
        assert_eq!(result.unwrap(), 3);
        assert_eq!(output, "\n> ");
    }

    #[test]
    fn test_reprompts_on_invalid_input() {
        let (result, output) = read(&Position::new(), "abc\n8\n0\n2\n");
        assert_eq!(result.unwrap(), 1);
        assert_eq!(output.matches("invalid move").count(), 3);
        assert_eq!(output.matches("> ").count(), 4);
    }

    #[test]
    fn test_rejects_full_column() {
        let mut pos = Position::new();
        for _ in 0..HEIGHT {
            pos.play(0);
        }
        let (result, output) = read(&pos, "1\n5\n");
        assert_eq!(result.unwrap(), 4);
        assert_eq!(output.matches("invalid move").count(), 1);
    }

    #[test]
    fn test_end_of_input_is_an_error() {
        let (result, _) = read(&Position::new(), "9\n");
        assert!(result.is_err());
    }
}
