//! Move executor: the single entry point that turns a move request into a
//! board mutation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::Board;
use crate::error::MoveError;
use crate::movement::{apply, verify, CastleSide};
use crate::types::*;

/// Everything a successful [`execute`] did, in a form the controller can
/// record and the front end can report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub from: Coordinate,
    pub to: Coordinate,
    pub color: Color,
    pub piece: PieceKind,
    pub captured: Option<PieceKind>,
    pub castle: Option<CastleSide>,
    pub en_passant: bool,
    pub promotion: Option<Promotion>,
    /// Half-move clock after the move.
    pub half_move_clock: u32,
}

/// Whether moving the piece on `from` to `to` would be a promotion.
pub fn is_promotion(board: &Board, from: Coordinate, to: Coordinate) -> bool {
    matches!(
        board.piece_at(from),
        Some(Piece::Pawn { color, .. }) if to.rank() == color.promotion_rank()
    )
}

/// Validate and play `from -> to` for `side`.
///
/// A pawn reaching the last rank needs `promotion`; without one the move is
/// fully validated, the board is left untouched, and
/// [`MoveError::PromotionRequired`] is returned. A choice supplied for any
/// other move is ignored. On error the board is unchanged.
pub fn execute(
    board: &mut Board,
    side: Color,
    from: Coordinate,
    to: Coordinate,
    promotion: Option<Promotion>,
) -> Result<MoveOutcome, MoveError> {
    let piece = board
        .piece_at(from)
        .ok_or(MoveError::NoPieceAtSource(from))?;
    if piece.color() != side {
        return Err(MoveError::WrongSideToMove {
            square: from,
            owner: piece.color(),
            side_to_move: side,
        });
    }

    let promotion = if is_promotion(board, from, to) {
        match promotion {
            Some(choice) => Some(choice),
            None => {
                verify(board, from, to)?;
                return Err(MoveError::PromotionRequired);
            }
        }
    } else {
        None
    };

    let applied = apply(board, from, to)?;

    if let Some(choice) = promotion {
        board.put(to, choice.piece(side));
    }

    let double_step = piece.kind() == PieceKind::Pawn && from.delta(to).0.abs() == 2;
    board.set_en_passant_target(double_step.then_some(to));

    let outcome = MoveOutcome {
        from,
        to,
        color: side,
        piece: piece.kind(),
        captured: applied.captured.map(Piece::kind),
        castle: applied.castle,
        en_passant: applied.en_passant,
        promotion,
        half_move_clock: board.half_move_clock(),
    };
    debug!(
        %from,
        %to,
        color = %side,
        piece = %outcome.piece,
        captured = ?outcome.captured,
        castle = ?outcome.castle,
        en_passant = outcome.en_passant,
        promotion = ?outcome.promotion,
        half_move_clock = outcome.half_move_clock,
        "move applied"
    );
    Ok(outcome)
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod executor_tests;
