//! Error types for the rules engine.
//!
//! Every error here is a local rejection: the board is left exactly as it was
//! before the rejected request, and the controller keeps running.

use thiserror::Error;

use crate::game::GameState;
use crate::types::{Color, Coordinate, PieceKind};

/// Why a move request was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    /// Text could not be read as a square (`a`-`h` followed by `1`-`8`),
    /// or a rank/file pair is outside the board.
    #[error("incorrect position {0:?}: it must be a letter (a-h) followed by a number (1-8)")]
    InvalidCoordinate(String),

    #[error("there is no piece on {0}")]
    NoPieceAtSource(Coordinate),

    #[error("the piece on {square} belongs to {owner}, but it is {side_to_move}'s turn")]
    WrongSideToMove {
        square: Coordinate,
        owner: Color,
        side_to_move: Color,
    },

    #[error("invalid move for {piece} from {from} to {to}")]
    IllegalGeometry {
        piece: PieceKind,
        from: Coordinate,
        to: Coordinate,
    },

    #[error("move would leave the {0} king in check")]
    KingExposed(Color),

    #[error("pawn reached the last rank: choose queen, rook, bishop or knight")]
    PromotionRequired,

    #[error("no piece to capture en passant")]
    NoEnPassantTarget,

    #[error("malformed piece color {0:?}: expected white or black")]
    MalformedPieceColor(String),
}

/// Rejections raised by the game controller on top of [`MoveError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error(transparent)]
    Move(#[from] MoveError),

    #[error("the game is over: {0}")]
    GameOver(GameState),

    #[error("a pawn promotion is waiting for a piece choice")]
    PromotionPending,

    #[error("there is no pawn waiting for promotion")]
    NoPendingPromotion,

    #[error("a draw offer is waiting for an answer")]
    DrawOfferPending,

    #[error("there is no draw offer to answer")]
    NoDrawOffer,
}

/// Malformed Forsyth-Edwards Notation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected at least 4 FEN fields, found {0}")]
    MissingFields(usize),

    #[error("expected 8 ranks in FEN placement, found {0}")]
    RankCount(usize),

    #[error("FEN rank {rank} does not describe exactly 8 files")]
    FileCount { rank: u8 },

    #[error("invalid piece letter {0:?} in FEN")]
    PieceLetter(char),

    #[error("invalid side to move in FEN: {0}")]
    SideToMove(#[source] MoveError),

    #[error("invalid castling field {0:?} in FEN")]
    Castling(String),

    #[error("invalid en passant field {0:?} in FEN")]
    EnPassant(String),

    /// Not a number, or past the point where the game is already drawn.
    #[error("invalid half-move clock {0:?} in FEN")]
    HalfMoveClock(String),

    /// The side that just moved left its own king attacked.
    #[error("the {0} king is in check but it is not {0}'s turn")]
    OpponentInCheck(Color),

    #[error("expected exactly one {color} king, found {count}")]
    KingCount { color: Color, count: usize },
}
