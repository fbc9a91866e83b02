//! Attack detection.
//!
//! A static test: could any enemy piece reach the square as a capture? It never
//! asks whether that capture would itself be legal, so it does not recurse into
//! the king-exposure guard.

use crate::board::Board;
use crate::movement::{geometry_ok, king_step};
use crate::types::*;

/// Whether `square` is attacked by any piece not of `defending` color.
pub fn is_attacked(board: &Board, square: Coordinate, defending: Color) -> bool {
    board
        .pieces()
        .filter(|(_, pc)| pc.color() != defending)
        .any(|(from, pc)| attacks(board, from, pc, square))
}

/// Whether `piece` standing on `from` attacks `target`.
pub fn attacks(board: &Board, from: Coordinate, piece: Piece, target: Coordinate) -> bool {
    match piece {
        // Pawns capture one square diagonally forward, which is not their move rule.
        Piece::Pawn { color, .. } => {
            let (dr, df) = from.delta(target);
            dr == color.pawn_direction() && df.abs() == 1
        }
        // Castling never captures, so only the one-square step counts.
        Piece::King { .. } => king_step(from, target),
        Piece::Knight { .. } | Piece::Bishop { .. } | Piece::Rook { .. } | Piece::Queen { .. } => {
            geometry_ok(board, from, target)
        }
    }
}

/// Every enemy piece attacking `square`, for check banners and tests.
pub fn attackers(board: &Board, square: Coordinate, defending: Color) -> Vec<Coordinate> {
    board
        .pieces()
        .filter(|(from, pc)| pc.color() != defending && attacks(board, *from, *pc, square))
        .map(|(from, _)| from)
        .collect()
}

/// Whether `color`'s king is currently attacked.
pub fn in_check(board: &Board, color: Color) -> bool {
    is_attacked(board, board.king_position(color), color)
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
