use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MoveError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}
impl Color {
    pub fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
    pub fn idx(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }
    /// Rank delta of a single pawn step: +1 for white, -1 for black.
    pub fn pawn_direction(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
    pub fn home_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }
    pub fn pawn_start_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }
    /// The farthest rank, where pawns promote.
    pub fn promotion_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

impl FromStr for Color {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "white" | "w" => Ok(Color::White),
            "black" | "b" => Ok(Color::Black),
            _ => Err(MoveError::MalformedPieceColor(s.to_string())),
        }
    }
}

/// Piece kind without any per-piece state, used for reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A piece on the board.
///
/// Pawns, rooks and kings remember whether they have moved: it gates the
/// pawn's two-square advance and castling eligibility. A pawn's forward
/// direction is fixed by its color (see [`Color::pawn_direction`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Piece {
    /// Moves toward the opponent; the direction is derived from `color`.
    Pawn { color: Color, has_moved: bool },
    Knight { color: Color },
    Bishop { color: Color },
    Rook { color: Color, has_moved: bool },
    Queen { color: Color },
    King { color: Color, has_moved: bool },
}

impl Piece {
    /// A piece of `kind` that has not moved yet.
    pub fn new(kind: PieceKind, color: Color) -> Piece {
        match kind {
            PieceKind::Pawn => Piece::Pawn {
                color,
                has_moved: false,
            },
            PieceKind::Knight => Piece::Knight { color },
            PieceKind::Bishop => Piece::Bishop { color },
            PieceKind::Rook => Piece::Rook {
                color,
                has_moved: false,
            },
            PieceKind::Queen => Piece::Queen { color },
            PieceKind::King => Piece::King {
                color,
                has_moved: false,
            },
        }
    }

    pub fn color(self) -> Color {
        match self {
            Piece::Pawn { color, .. }
            | Piece::Knight { color }
            | Piece::Bishop { color }
            | Piece::Rook { color, .. }
            | Piece::Queen { color }
            | Piece::King { color, .. } => color,
        }
    }

    pub fn kind(self) -> PieceKind {
        match self {
            Piece::Pawn { .. } => PieceKind::Pawn,
            Piece::Knight { .. } => PieceKind::Knight,
            Piece::Bishop { .. } => PieceKind::Bishop,
            Piece::Rook { .. } => PieceKind::Rook,
            Piece::Queen { .. } => PieceKind::Queen,
            Piece::King { .. } => PieceKind::King,
        }
    }

    pub fn has_moved(self) -> bool {
        match self {
            Piece::Pawn { has_moved, .. }
            | Piece::Rook { has_moved, .. }
            | Piece::King { has_moved, .. } => has_moved,
            Piece::Knight { .. } | Piece::Bishop { .. } | Piece::Queen { .. } => false,
        }
    }

    /// The same piece with its `has_moved` flag set (a no-op for stateless kinds).
    pub fn moved(self) -> Piece {
        match self {
            Piece::Pawn { color, .. } => Piece::Pawn {
                color,
                has_moved: true,
            },
            Piece::Rook { color, .. } => Piece::Rook {
                color,
                has_moved: true,
            },
            Piece::King { color, .. } => Piece::King {
                color,
                has_moved: true,
            },
            other => other,
        }
    }

    /// FEN letter: uppercase for white, lowercase for black.
    pub fn to_char(self) -> char {
        let c = match self.kind() {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match self.color() {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    pub fn from_char(c: char) -> Option<Piece> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some(Piece::new(kind, color))
    }
}

/// The pieces a pawn may promote to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Promotion {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl Promotion {
    pub const ALL: [Promotion; 4] = [
        Promotion::Queen,
        Promotion::Rook,
        Promotion::Bishop,
        Promotion::Knight,
    ];

    pub fn kind(self) -> PieceKind {
        match self {
            Promotion::Queen => PieceKind::Queen,
            Promotion::Rook => PieceKind::Rook,
            Promotion::Bishop => PieceKind::Bishop,
            Promotion::Knight => PieceKind::Knight,
        }
    }

    /// The promoted piece. A promoted rook counts as moved and never castles.
    pub fn piece(self, color: Color) -> Piece {
        Piece::new(self.kind(), color).moved()
    }
}

impl fmt::Display for Promotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind().name())
    }
}

impl FromStr for Promotion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "q" | "queen" => Ok(Promotion::Queen),
            "r" | "rook" => Ok(Promotion::Rook),
            "b" | "bishop" => Ok(Promotion::Bishop),
            "n" | "knight" => Ok(Promotion::Knight),
            _ => Err(format!(
                "unknown promotion piece {s:?}: expected queen, rook, bishop or knight"
            )),
        }
    }
}

/// A square on the board as a (rank, file) pair, both in `0..8`.
///
/// Rank 0 is white's back rank, file 0 is the `a` file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    rank: u8,
    file: u8,
}

impl Coordinate {
    pub fn new(rank: u8, file: u8) -> Result<Coordinate, MoveError> {
        if rank > 7 || file > 7 {
            return Err(MoveError::InvalidCoordinate(format!(
                "rank {rank}, file {file}"
            )));
        }
        Ok(Coordinate { rank, file })
    }

    // Callers guarantee both values are already in 0..8.
    pub(crate) const fn at(rank: u8, file: u8) -> Coordinate {
        debug_assert!(rank < 8 && file < 8);
        Coordinate { rank, file }
    }

    pub fn rank(self) -> u8 {
        self.rank
    }

    pub fn file(self) -> u8 {
        self.file
    }

    /// The square `(rank + dr, file + df)`, if it is on the board.
    pub fn offset(self, dr: i8, df: i8) -> Option<Coordinate> {
        let rank = self.rank as i8 + dr;
        let file = self.file as i8 + df;
        if (0..8).contains(&rank) && (0..8).contains(&file) {
            Some(Coordinate::at(rank as u8, file as u8))
        } else {
            None
        }
    }

    /// Signed (rank, file) delta from `self` to `to`.
    pub fn delta(self, to: Coordinate) -> (i8, i8) {
        (
            to.rank as i8 - self.rank as i8,
            to.file as i8 - self.file as i8,
        )
    }

    /// Square color parity: light squares have odd `rank + file`.
    pub fn is_light(self) -> bool {
        (self.rank + self.file) % 2 == 1
    }

    /// All 64 squares, rank by rank from a1 to h8.
    pub fn all() -> impl Iterator<Item = Coordinate> {
        (0..8u8).flat_map(|rank| (0..8u8).map(move |file| Coordinate::at(rank, file)))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.file) as char;
        let rank = (b'1' + self.rank) as char;
        write!(f, "{file}{rank}")
    }
}

impl FromStr for Coordinate {
    type Err = MoveError;

    /// Parses `"e4"`-style squares, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        let invalid = || MoveError::InvalidCoordinate(s.to_string());
        if chars.len() != 2 {
            return Err(invalid());
        }
        let file = chars[0].to_ascii_lowercase();
        let rank = chars[1];
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return Err(invalid());
        }
        Ok(Coordinate::at(rank as u8 - b'1', file as u8 - b'a'))
    }
}

impl Serialize for Coordinate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Coordinate {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
