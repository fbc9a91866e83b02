//! Legal-move enumeration.
//!
//! Every probe runs on a private clone of the board through the same
//! speculate-and-revert path the exposure guard uses, so callers only ever
//! lend a shared reference.

use tracing::trace;

use crate::board::Board;
use crate::movement::verify;
use crate::types::*;

fn candidates(board: &Board, color: Color) -> impl Iterator<Item = (Coordinate, Coordinate)> + '_ {
    board
        .pieces()
        .filter(move |(_, pc)| pc.color() == color)
        .flat_map(|(from, _)| {
            Coordinate::all()
                .filter(move |to| *to != from)
                .map(move |to| (from, to))
        })
}

/// Whether `color` has at least one legal move.
pub fn has_legal_move(board: &Board, color: Color) -> bool {
    let mut probe = board.clone();
    let found = candidates(board, color).find(|&(from, to)| verify(&mut probe, from, to).is_ok());
    match found {
        Some((from, to)) => {
            trace!(%color, %from, %to, "legal move found");
            true
        }
        None => {
            trace!(%color, "no legal move");
            false
        }
    }
}

/// Every legal `(from, to)` pair for `color`. A promotion appears once,
/// whichever piece is eventually chosen.
pub fn legal_moves(board: &Board, color: Color) -> Vec<(Coordinate, Coordinate)> {
    let mut probe = board.clone();
    candidates(board, color)
        .filter(|&(from, to)| verify(&mut probe, from, to).is_ok())
        .collect()
}

/// Legal destinations of the piece on `from`, for whichever side owns it.
pub fn legal_destinations(board: &Board, from: Coordinate) -> Vec<Coordinate> {
    if board.piece_at(from).is_none() {
        return Vec::new();
    }
    let mut probe = board.clone();
    Coordinate::all()
        .filter(|&to| to != from && verify(&mut probe, from, to).is_ok())
        .collect()
}

#[cfg(test)]
#[path = "legal_tests.rs"]
mod legal_tests;
