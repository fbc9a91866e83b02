use crate::types::*;

/// One cell of the 8x8 grid. The coordinate is fixed; only the occupant changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Square {
    coord: Coordinate,
    piece: Option<Piece>,
}

impl Square {
    pub fn coord(&self) -> Coordinate {
        self.coord
    }
    pub fn piece(&self) -> Option<Piece> {
        self.piece
    }
    pub fn is_empty(&self) -> bool {
        self.piece.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    squares: [[Square; 8]; 8], // [rank][file]
    // Square the last two-square pawn advance landed on; capturable en passant
    // on the next half-move only.
    en_passant_target: Option<Coordinate>,
    white_king: Coordinate,
    black_king: Coordinate,
    half_move_clock: u32,
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Board {
    /// Grid with every square empty. Callers must place both kings and set
    /// their positions before handing the board out.
    pub(crate) fn empty() -> Self {
        Board {
            squares: std::array::from_fn(|rank| {
                std::array::from_fn(|file| Square {
                    coord: Coordinate::at(rank as u8, file as u8),
                    piece: None,
                })
            }),
            en_passant_target: None,
            white_king: Coordinate::at(0, 4),
            black_king: Coordinate::at(7, 4),
            half_move_clock: 0,
        }
    }

    /// The standard opening array.
    pub fn standard() -> Self {
        let mut b = Board::empty();

        // Pawns
        for file in 0..8 {
            b.put(
                Coordinate::at(1, file),
                Piece::new(PieceKind::Pawn, Color::White),
            );
            b.put(
                Coordinate::at(6, file),
                Piece::new(PieceKind::Pawn, Color::Black),
            );
        }
        // Back ranks
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (file, &kind) in back.iter().enumerate() {
            b.put(Coordinate::at(0, file as u8), Piece::new(kind, Color::White));
            b.put(Coordinate::at(7, file as u8), Piece::new(kind, Color::Black));
        }
        b.white_king = Coordinate::at(0, 4);
        b.black_king = Coordinate::at(7, 4);
        b
    }

    pub fn square(&self, c: Coordinate) -> &Square {
        &self.squares[c.rank() as usize][c.file() as usize]
    }

    pub fn piece_at(&self, c: Coordinate) -> Option<Piece> {
        self.square(c).piece
    }

    /// Ranks from rank 1 to rank 8, each from the `a` file to the `h` file.
    pub fn ranks(&self) -> impl DoubleEndedIterator<Item = &[Square; 8]> {
        self.squares.iter()
    }

    /// Every occupied square with its piece.
    pub fn pieces(&self) -> impl Iterator<Item = (Coordinate, Piece)> + '_ {
        self.squares
            .iter()
            .flatten()
            .filter_map(|sq| sq.piece.map(|p| (sq.coord, p)))
    }

    pub fn king_position(&self, c: Color) -> Coordinate {
        match c {
            Color::White => self.white_king,
            Color::Black => self.black_king,
        }
    }

    pub fn en_passant_target(&self) -> Option<Coordinate> {
        self.en_passant_target
    }

    pub fn half_move_clock(&self) -> u32 {
        self.half_move_clock
    }

    /// Replace the occupant of `c`, returning the previous one.
    pub(crate) fn set_piece(&mut self, c: Coordinate, pc: Option<Piece>) -> Option<Piece> {
        let sq = &mut self.squares[c.rank() as usize][c.file() as usize];
        std::mem::replace(&mut sq.piece, pc)
    }

    pub(crate) fn put(&mut self, c: Coordinate, pc: Piece) {
        self.set_piece(c, Some(pc));
    }

    pub(crate) fn take(&mut self, c: Coordinate) -> Option<Piece> {
        self.set_piece(c, None)
    }

    pub(crate) fn set_king_position(&mut self, color: Color, c: Coordinate) {
        match color {
            Color::White => self.white_king = c,
            Color::Black => self.black_king = c,
        }
    }

    pub(crate) fn set_en_passant_target(&mut self, target: Option<Coordinate>) {
        self.en_passant_target = target;
    }

    pub(crate) fn set_half_move_clock(&mut self, clock: u32) {
        self.half_move_clock = clock;
    }

    /// Half-move clock bookkeeping: reset on a capture or pawn move, else count up.
    pub(crate) fn tick_half_move_clock(&mut self, reset: bool) {
        self.half_move_clock = if reset {
            0
        } else {
            self.half_move_clock.saturating_add(1)
        };
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
