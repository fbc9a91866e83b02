//! Try a move, observe the result, and always put the board back.
//!
//! Both the king-exposure guard and legal-move enumeration go through
//! [`Speculation`]: the move is played on construction and reverted when the
//! guard is dropped, unless [`Speculation::commit`] is called first. Early
//! returns and `?` therefore cannot leave a half-played move behind.

use std::ops::Deref;

use crate::attacks::is_attacked;
use crate::board::Board;
use crate::types::*;

pub(crate) struct Speculation<'a> {
    board: &'a mut Board,
    from: Coordinate,
    to: Coordinate,
    moved: Piece,
    displaced: Option<Piece>,
    en_passant_capture: Option<(Coordinate, Piece)>,
    prior_king: Option<Coordinate>,
    committed: bool,
}

impl Board {
    /// Move the piece on `from` to `to` tentatively. Returns `None` when `from`
    /// is empty. Only piece placement, en passant removal and the tracked king
    /// position change; flags, clock and en passant target are left alone.
    pub(crate) fn speculate(&mut self, from: Coordinate, to: Coordinate) -> Option<Speculation<'_>> {
        let moved = self.piece_at(from)?;

        let en_passant_capture = match (moved, self.en_passant_target()) {
            (Piece::Pawn { .. }, Some(target))
                if from.file() != to.file()
                    && self.piece_at(to).is_none()
                    && target.rank() == from.rank()
                    && target.file() == to.file() =>
            {
                self.take(target).map(|captured| (target, captured))
            }
            _ => None,
        };

        self.take(from);
        let displaced = self.set_piece(to, Some(moved));

        let prior_king = match moved {
            Piece::King { color, .. } => {
                let prior = self.king_position(color);
                self.set_king_position(color, to);
                Some(prior)
            }
            _ => None,
        };

        Some(Speculation {
            board: self,
            from,
            to,
            moved,
            displaced,
            en_passant_capture,
            prior_king,
            committed: false,
        })
    }
}

impl Speculation<'_> {
    /// Whether the mover's own king is attacked in the speculative position.
    pub(crate) fn exposes_king(&self) -> bool {
        let color = self.moved.color();
        is_attacked(&*self.board, self.board.king_position(color), color)
    }

    pub(crate) fn captured(&self) -> Option<Piece> {
        self.displaced
            .or(self.en_passant_capture.map(|(_, captured)| captured))
    }

    /// Keep the move on the board. Returns the captured piece, if any.
    pub(crate) fn commit(mut self) -> Option<Piece> {
        self.committed = true;
        self.captured()
    }
}

impl Deref for Speculation<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        &*self.board
    }
}

impl Drop for Speculation<'_> {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        self.board.set_piece(self.to, self.displaced);
        self.board.set_piece(self.from, Some(self.moved));
        if let Some((at, captured)) = self.en_passant_capture {
            self.board.put(at, captured);
        }
        if let Some(prior) = self.prior_king {
            self.board.set_king_position(self.moved.color(), prior);
        }
    }
}

#[cfg(test)]
#[path = "speculate_tests.rs"]
mod speculate_tests;
