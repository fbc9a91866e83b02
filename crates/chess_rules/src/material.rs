use crate::board::Board;
use crate::types::*;

/// Whether either side could still deliver mate.
///
/// Any pawn, rook or queen is enough. Otherwise only bishops and knights
/// count: none or one is a dead draw, two bishops need opposite square
/// colors, any other pair or three or more minors is enough.
pub fn have_sufficient_material(board: &Board) -> bool {
    let mut minors: Vec<(Coordinate, PieceKind)> = Vec::new();
    for (at, pc) in board.pieces() {
        match pc.kind() {
            PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return true,
            PieceKind::Bishop | PieceKind::Knight => minors.push((at, pc.kind())),
            PieceKind::King => {}
        }
    }
    match minors.as_slice() {
        [] | [_] => false,
        [(a, PieceKind::Bishop), (b, PieceKind::Bishop)] => a.is_light() != b.is_light(),
        _ => true,
    }
}

#[cfg(test)]
#[path = "material_tests.rs"]
mod material_tests;
