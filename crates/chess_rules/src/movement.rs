//! Per-piece movement rules.
//!
//! [`geometry_ok`] answers whether a move has the right shape for the piece and
//! the right occupancy along its path, ignoring whether it exposes the mover's
//! king. [`apply`] plays a move for real: geometry, then the exposure guard,
//! then the side effects (castling rook, en passant capture, `has_moved`
//! flags, half-move clock).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::attacks::is_attacked;
use crate::board::Board;
use crate::error::MoveError;
use crate::types::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

impl CastleSide {
    /// (rook from file, rook to file)
    pub fn rook_files(self) -> (u8, u8) {
        match self {
            CastleSide::KingSide => (7, 5),
            CastleSide::QueenSide => (0, 3),
        }
    }

    /// File the king lands on.
    pub fn king_file(self) -> u8 {
        match self {
            CastleSide::KingSide => 6,
            CastleSide::QueenSide => 2,
        }
    }

    /// File the king passes over on its way.
    fn crossed_file(self) -> u8 {
        match self {
            CastleSide::KingSide => 5,
            CastleSide::QueenSide => 3,
        }
    }

    /// Files strictly between king and rook, which must be empty.
    fn between_files(self) -> &'static [u8] {
        match self {
            CastleSide::KingSide => &[5, 6],
            CastleSide::QueenSide => &[1, 2, 3],
        }
    }
}

/// What [`apply`] did to the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Applied {
    /// The mover as it stood before the move.
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub castle: Option<CastleSide>,
    pub en_passant: bool,
}

/// Shape and occupancy legality of moving the piece on `from` to `to`.
///
/// Never considers whether the move would leave the mover's king attacked.
pub fn geometry_ok(board: &Board, from: Coordinate, to: Coordinate) -> bool {
    if from == to {
        return false;
    }
    let piece = match board.piece_at(from) {
        Some(p) => p,
        None => return false,
    };
    // Same-color block applies to every piece.
    if let Some(target) = board.piece_at(to) {
        if target.color() == piece.color() {
            return false;
        }
    }
    match piece {
        Piece::Pawn { color, has_moved } => pawn_geometry(board, from, to, color, has_moved),
        Piece::Knight { .. } => knight_jump(from, to),
        Piece::Bishop { .. } => is_diagonal(from, to) && path_clear(board, from, to),
        Piece::Rook { .. } => is_orthogonal(from, to) && path_clear(board, from, to),
        Piece::Queen { .. } => {
            (is_diagonal(from, to) || is_orthogonal(from, to)) && path_clear(board, from, to)
        }
        Piece::King { .. } => king_step(from, to) || castle_side(board, from, to).is_some(),
    }
}

fn pawn_geometry(
    board: &Board,
    from: Coordinate,
    to: Coordinate,
    color: Color,
    has_moved: bool,
) -> bool {
    let (dr, df) = from.delta(to);
    let dir = color.pawn_direction();
    let target = board.piece_at(to);

    if df == 0 {
        if dr == dir {
            return target.is_none();
        }
        if dr == 2 * dir && !has_moved {
            let mid_empty = from
                .offset(dir, 0)
                .is_some_and(|mid| board.piece_at(mid).is_none());
            return mid_empty && target.is_none();
        }
        return false;
    }

    if df.abs() == 1 && dr == dir {
        return match target {
            Some(t) => t.color() != color,
            None => board.en_passant_target().is_some_and(|ep| {
                ep.rank() == from.rank()
                    && ep.file() == to.file()
                    && board.piece_at(ep).map_or(true, |p| p.color() != color)
            }),
        };
    }

    false
}

fn knight_jump(from: Coordinate, to: Coordinate) -> bool {
    let (dr, df) = from.delta(to);
    matches!((dr.abs(), df.abs()), (1, 2) | (2, 1))
}

fn is_diagonal(from: Coordinate, to: Coordinate) -> bool {
    let (dr, df) = from.delta(to);
    dr != 0 && dr.abs() == df.abs()
}

fn is_orthogonal(from: Coordinate, to: Coordinate) -> bool {
    let (dr, df) = from.delta(to);
    (dr == 0) != (df == 0)
}

/// Chebyshev distance of exactly one.
pub(crate) fn king_step(from: Coordinate, to: Coordinate) -> bool {
    let (dr, df) = from.delta(to);
    dr.abs() <= 1 && df.abs() <= 1 && (dr, df) != (0, 0)
}

/// Every square strictly between `from` and `to` is empty. Only meaningful
/// for straight or diagonal lines.
pub(crate) fn path_clear(board: &Board, from: Coordinate, to: Coordinate) -> bool {
    let (dr, df) = from.delta(to);
    let (step_r, step_f) = (dr.signum(), df.signum());
    let mut cur = from;
    loop {
        cur = match cur.offset(step_r, step_f) {
            Some(next) => next,
            None => return false,
        };
        if cur == to {
            return true;
        }
        if board.piece_at(cur).is_some() {
            return false;
        }
    }
}

/// The castle `from -> to` describes, if it is currently allowed: unmoved king
/// on its home square, unmoved rook in the corner, empty squares between them,
/// and none of the king's start, crossed, or landing squares attacked.
pub fn castle_side(board: &Board, from: Coordinate, to: Coordinate) -> Option<CastleSide> {
    let color = match board.piece_at(from) {
        Some(Piece::King {
            color,
            has_moved: false,
        }) => color,
        _ => return None,
    };
    let home = color.home_rank();
    if from != Coordinate::at(home, 4) || to.rank() != home {
        return None;
    }
    let side = match to.file() {
        6 => CastleSide::KingSide,
        2 => CastleSide::QueenSide,
        _ => return None,
    };

    let (rook_file, _) = side.rook_files();
    match board.piece_at(Coordinate::at(home, rook_file)) {
        Some(Piece::Rook {
            color: rook_color,
            has_moved: false,
        }) if rook_color == color => {}
        _ => return None,
    }

    let blocked = side
        .between_files()
        .iter()
        .any(|&file| board.piece_at(Coordinate::at(home, file)).is_some());
    if blocked {
        return None;
    }

    let safe = [4, side.crossed_file(), side.king_file()]
        .iter()
        .all(|&file| !is_attacked(board, Coordinate::at(home, file), color));
    safe.then_some(side)
}

/// Whether `from -> to` is a pawn capturing en passant.
fn is_en_passant(board: &Board, piece: Piece, from: Coordinate, to: Coordinate) -> bool {
    matches!(piece, Piece::Pawn { .. })
        && from.file() != to.file()
        && board.piece_at(to).is_none()
}

/// An en passant capture must find an enemy pawn on the target square.
fn check_en_passant(board: &Board, piece: Piece) -> Result<(), MoveError> {
    let victim = board.en_passant_target().and_then(|t| board.piece_at(t));
    match victim {
        Some(Piece::Pawn { color, .. }) if color != piece.color() => Ok(()),
        _ => Err(MoveError::NoEnPassantTarget),
    }
}

fn illegal(piece: Piece, from: Coordinate, to: Coordinate) -> MoveError {
    MoveError::IllegalGeometry {
        piece: piece.kind(),
        from,
        to,
    }
}

/// Full legality of `from -> to` for whoever stands on `from`: geometry, then a
/// speculative play to make sure the mover's king is not left attacked. The
/// board is restored before returning, whatever the outcome.
pub fn verify(board: &mut Board, from: Coordinate, to: Coordinate) -> Result<(), MoveError> {
    let piece = board
        .piece_at(from)
        .ok_or(MoveError::NoPieceAtSource(from))?;
    if !geometry_ok(board, from, to) {
        return Err(illegal(piece, from, to));
    }
    if is_en_passant(board, piece, from, to) {
        check_en_passant(board, piece)?;
    }
    let probe = board
        .speculate(from, to)
        .ok_or(MoveError::NoPieceAtSource(from))?;
    if probe.exposes_king() {
        return Err(MoveError::KingExposed(piece.color()));
    }
    Ok(())
}

/// Play `from -> to` on the board: geometry, exposure guard, then side effects.
///
/// On error the board is unchanged. Promotion and the en passant target are
/// the executor's business, not handled here.
pub fn apply(board: &mut Board, from: Coordinate, to: Coordinate) -> Result<Applied, MoveError> {
    let piece = board
        .piece_at(from)
        .ok_or(MoveError::NoPieceAtSource(from))?;
    if !geometry_ok(board, from, to) {
        debug!(%from, %to, piece = %piece.kind(), "rejected: geometry");
        return Err(illegal(piece, from, to));
    }

    let castle = match piece {
        Piece::King { .. } => castle_side(board, from, to),
        _ => None,
    };
    let en_passant = is_en_passant(board, piece, from, to);
    if en_passant {
        check_en_passant(board, piece)?;
    }

    let probe = board
        .speculate(from, to)
        .ok_or(MoveError::NoPieceAtSource(from))?;
    if probe.exposes_king() {
        debug!(%from, %to, piece = %piece.kind(), "rejected: king exposed");
        return Err(MoveError::KingExposed(piece.color()));
    }
    let captured = probe.commit();

    board.put(to, piece.moved());
    if let Some(side) = castle {
        let home = piece.color().home_rank();
        let (rook_from, rook_to) = side.rook_files();
        if let Some(rook) = board.take(Coordinate::at(home, rook_from)) {
            board.put(Coordinate::at(home, rook_to), rook.moved());
        }
    }
    board.tick_half_move_clock(piece.kind() == PieceKind::Pawn || captured.is_some());

    Ok(Applied {
        piece,
        captured,
        castle,
        en_passant,
    })
}

#[cfg(test)]
#[path = "movement_tests.rs"]
mod movement_tests;
