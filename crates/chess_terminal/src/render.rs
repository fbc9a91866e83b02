//! Text rendering of the board and game status.

use chess_rules::{Board, Color, Coordinate, Game, GameState, Piece, PieceKind, FIFTY_MOVE_LIMIT};

use crate::config::GlyphSet;

const FILE_LABELS: &str = "  a  b  c  d  e  f  g  h\n";

pub fn piece_glyph(piece: Piece, glyphs: GlyphSet) -> char {
    match glyphs {
        GlyphSet::Ascii => piece.to_char(),
        GlyphSet::Unicode => match (piece.color(), piece.kind()) {
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::Black, PieceKind::Pawn) => '♟',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::White, PieceKind::King) => '♔',
            (Color::Black, PieceKind::King) => '♚',
        },
    }
}

fn empty_glyph(at: Coordinate, glyphs: GlyphSet) -> char {
    match (glyphs, at.is_light()) {
        (GlyphSet::Unicode, false) => '■',
        (GlyphSet::Unicode, true) => '□',
        (GlyphSet::Ascii, false) => '#',
        (GlyphSet::Ascii, true) => '.',
    }
}

/// The board from white's side: rank 8 on top, file letters above and below.
pub fn render_board(board: &Board, glyphs: GlyphSet) -> String {
    let mut out = String::from(FILE_LABELS);
    for row in board.ranks().rev() {
        let rank = row[0].coord().rank() + 1;
        out.push_str(&format!("{rank} "));
        for square in row {
            let glyph = match square.piece() {
                Some(piece) => piece_glyph(piece, glyphs),
                None => empty_glyph(square.coord(), glyphs),
            };
            out.push(glyph);
            out.push_str("  ");
        }
        out.push('\n');
    }
    out.push_str(FILE_LABELS);
    out
}

fn capitalized(color: Color) -> &'static str {
    match color {
        Color::White => "White",
        Color::Black => "Black",
    }
}

/// Check and game-over banner, if the state calls for one.
pub fn status_banner(game: &Game) -> Option<String> {
    match game.state() {
        GameState::Ongoing | GameState::PromotionPending => None,
        GameState::Check => Some(format!(
            "{} king is under check!",
            capitalized(game.side_to_move())
        )),
        GameState::Stalemate => Some(format!(
            "{} is in stalemate! Game over.",
            capitalized(game.side_to_move())
        )),
        state => Some(format!("Game over: {state}.")),
    }
}

/// Warning shown once the half-move clock passes `threshold`.
pub fn fifty_move_warning(board: &Board, threshold: u32) -> Option<String> {
    let clock = board.half_move_clock();
    (clock > threshold && clock < FIFTY_MOVE_LIMIT).then(|| {
        format!(
            "Warning: {clock} half-moves without pawn movement or capture. \
             Game will be drawn automatically if it reaches {FIFTY_MOVE_LIMIT}."
        )
    })
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod render_tests;
