//! Forsyth-Edwards Notation import and export.
//!
//! The engine keeps castling eligibility on the pieces themselves (`has_moved`
//! on kings and rooks) and stores the en passant target as the square the
//! advancing pawn landed on. FEN stores castling as a separate field and the
//! en passant square as the square passed over, so both are translated here.

use crate::attacks::in_check;
use crate::board::Board;
use crate::error::{FenError, MoveError};
use crate::game::FIFTY_MOVE_LIMIT;
use crate::types::*;

/// Parse a FEN string into a board and the side to move.
///
/// The half-move clock defaults to 0 and may not exceed [`FIFTY_MOVE_LIMIT`];
/// the full-move number is ignored. Positions where the side that just moved
/// is still in check are rejected.
pub fn parse(fen: &str) -> Result<(Board, Color), FenError> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    if parts.len() < 4 {
        return Err(FenError::MissingFields(parts.len()));
    }
    let placement = parts[0];
    let side_part = parts[1];
    let castle_part = parts[2];
    let ep_part = parts[3];
    let clock_part = parts.get(4).copied().unwrap_or("0");

    let mut board = Board::empty();
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    let mut kings: [Vec<Coordinate>; 2] = [Vec::new(), Vec::new()];
    for (rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - rank_idx as u8; // FEN lists rank 8 .. 1
        let mut file: u8 = 0;
        for ch in rank_str.chars() {
            if let Some(d) = ch.to_digit(10) {
                file += d as u8;
            } else {
                let mut pc = Piece::from_char(ch).ok_or(FenError::PieceLetter(ch))?;
                if file > 7 {
                    return Err(FenError::FileCount { rank: rank + 1 });
                }
                let at = Coordinate::at(rank, file);
                match pc {
                    Piece::Pawn { color, .. } if rank != color.pawn_start_rank() => {
                        pc = pc.moved();
                    }
                    // Kings and rooks start as moved; the castling field clears the flag.
                    Piece::King { color, .. } => {
                        kings[color.idx()].push(at);
                        pc = pc.moved();
                    }
                    Piece::Rook { .. } => pc = pc.moved(),
                    _ => {}
                }
                board.put(at, pc);
                file += 1;
            }
            if file > 8 {
                return Err(FenError::FileCount { rank: rank + 1 });
            }
        }
        if file != 8 {
            return Err(FenError::FileCount { rank: rank + 1 });
        }
    }

    for color in [Color::White, Color::Black] {
        match kings[color.idx()].as_slice() {
            [at] => board.set_king_position(color, *at),
            other => {
                return Err(FenError::KingCount {
                    color,
                    count: other.len(),
                })
            }
        }
    }

    let side = match side_part {
        "w" => Color::White,
        "b" => Color::Black,
        _ => {
            return Err(FenError::SideToMove(MoveError::MalformedPieceColor(
                side_part.to_string(),
            )))
        }
    };
    if in_check(&board, side.other()) {
        return Err(FenError::OpponentInCheck(side.other()));
    }

    if castle_part != "-" {
        for c in castle_part.chars() {
            let (color, rook_file) = match c {
                'K' => (Color::White, 7),
                'Q' => (Color::White, 0),
                'k' => (Color::Black, 7),
                'q' => (Color::Black, 0),
                _ => return Err(FenError::Castling(castle_part.to_string())),
            };
            let home = color.home_rank();
            let king_at = Coordinate::at(home, 4);
            let rook_at = Coordinate::at(home, rook_file);
            match (board.piece_at(king_at), board.piece_at(rook_at)) {
                (Some(Piece::King { color: kc, .. }), Some(Piece::Rook { color: rc, .. }))
                    if kc == color && rc == color =>
                {
                    board.put(king_at, Piece::new(PieceKind::King, color));
                    board.put(rook_at, Piece::new(PieceKind::Rook, color));
                }
                _ => return Err(FenError::Castling(castle_part.to_string())),
            }
        }
    }

    if ep_part != "-" {
        let passed: Coordinate = ep_part
            .parse()
            .map_err(|_| FenError::EnPassant(ep_part.to_string()))?;
        // Rank 3 means a white pawn just landed on rank 4; rank 6 a black pawn on rank 5.
        let landed = match passed.rank() {
            2 => passed.offset(1, 0),
            5 => passed.offset(-1, 0),
            _ => None,
        }
        .ok_or_else(|| FenError::EnPassant(ep_part.to_string()))?;
        match board.piece_at(landed) {
            Some(Piece::Pawn { color, .. }) if color != side => {
                board.set_en_passant_target(Some(landed))
            }
            _ => return Err(FenError::EnPassant(ep_part.to_string())),
        }
    }

    let clock: u32 = clock_part
        .parse()
        .ok()
        .filter(|&clock| clock <= FIFTY_MOVE_LIMIT)
        .ok_or_else(|| FenError::HalfMoveClock(clock_part.to_string()))?;
    board.set_half_move_clock(clock);

    Ok((board, side))
}

/// Render `board` as FEN with `side` to move. The full-move number is always 1.
pub fn render(board: &Board, side: Color) -> String {
    let mut out = String::new();
    for rank in (0..8u8).rev() {
        let mut empty = 0;
        for file in 0..8u8 {
            match board.piece_at(Coordinate::at(rank, file)) {
                Some(pc) => {
                    if empty > 0 {
                        out.push_str(&empty.to_string());
                        empty = 0;
                    }
                    out.push(pc.to_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            out.push_str(&empty.to_string());
        }
        if rank > 0 {
            out.push('/');
        }
    }

    out.push(' ');
    out.push(match side {
        Color::White => 'w',
        Color::Black => 'b',
    });

    out.push(' ');
    let mut castling = String::new();
    for (color, file, letter) in [
        (Color::White, 7, 'K'),
        (Color::White, 0, 'Q'),
        (Color::Black, 7, 'k'),
        (Color::Black, 0, 'q'),
    ] {
        let home = color.home_rank();
        let king = board.piece_at(Coordinate::at(home, 4));
        let rook = board.piece_at(Coordinate::at(home, file));
        let unmoved = |pc: Option<Piece>, kind: PieceKind| {
            pc.is_some_and(|p| p.kind() == kind && p.color() == color && !p.has_moved())
        };
        if unmoved(king, PieceKind::King) && unmoved(rook, PieceKind::Rook) {
            castling.push(letter);
        }
    }
    if castling.is_empty() {
        castling.push('-');
    }
    out.push_str(&castling);

    out.push(' ');
    match board
        .en_passant_target()
        .and_then(|t| board.piece_at(t).map(|pc| (t, pc)))
    {
        Some((t, pc)) => match t.offset(-pc.color().pawn_direction(), 0) {
            Some(passed) => out.push_str(&passed.to_string()),
            None => out.push('-'),
        },
        None => out.push('-'),
    }

    out.push_str(&format!(" {} 1", board.half_move_clock()));
    out
}

impl Board {
    /// Board from FEN, ignoring the side-to-move field.
    pub fn from_fen(fen: &str) -> Result<Board, FenError> {
        parse(fen).map(|(board, _)| board)
    }

    pub fn to_fen(&self, side: Color) -> String {
        render(self, side)
    }
}

#[cfg(test)]
#[path = "fen_tests.rs"]
mod fen_tests;
