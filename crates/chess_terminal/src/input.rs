//! Parsing of lines typed during a game.

use chess_rules::{Coordinate, MoveError, Promotion};
use thiserror::Error;

/// Words that resign the game for the side to move.
pub const RESIGN_TOKENS: [&str; 5] = ["resign", "surrender", "surr", "forfeit", "ff"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `e2 e4`, optionally with the promotion piece: `e7 e8 q`.
    Move {
        from: Coordinate,
        to: Coordinate,
        promotion: Option<Promotion>,
    },
    /// A lone piece name, answering the promotion prompt.
    Piece(Promotion),
    /// `moves e2`: list the legal destinations of a piece.
    Moves(Coordinate),
    Resign,
    Draw,
    Cancel,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("type a move like `e2 e4`, or `help`")]
    Empty,
    #[error(transparent)]
    Coordinate(#[from] MoveError),
    #[error("{0}")]
    Promotion(String),
    #[error("unrecognised input {0:?}: type `help` for the list of commands")]
    Unknown(String),
}

fn coordinate(token: &str) -> Result<Coordinate, InputError> {
    Ok(token.parse::<Coordinate>()?)
}

/// Parse one input line. Keywords are case-insensitive.
pub fn parse_command(line: &str) -> Result<Command, InputError> {
    let tokens: Vec<String> = line
        .split_whitespace()
        .map(|t| t.to_ascii_lowercase())
        .collect();
    let words: Vec<&str> = tokens.iter().map(String::as_str).collect();

    match words.as_slice() {
        [] => Err(InputError::Empty),
        [word] if RESIGN_TOKENS.contains(word) => Ok(Command::Resign),
        ["draw"] => Ok(Command::Draw),
        ["cancel"] => Ok(Command::Cancel),
        ["help" | "?"] => Ok(Command::Help),
        ["quit" | "exit"] => Ok(Command::Quit),
        ["moves", square] => Ok(Command::Moves(coordinate(square)?)),
        [from, to] => Ok(Command::Move {
            from: coordinate(from)?,
            to: coordinate(to)?,
            promotion: None,
        }),
        [from, to, piece] => Ok(Command::Move {
            from: coordinate(from)?,
            to: coordinate(to)?,
            promotion: Some(piece.parse().map_err(InputError::Promotion)?),
        }),
        [word] => match word.parse::<Promotion>() {
            Ok(piece) => Ok(Command::Piece(piece)),
            Err(_) => Err(InputError::Unknown(line.trim().to_string())),
        },
        _ => Err(InputError::Unknown(line.trim().to_string())),
    }
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod input_tests;
