//! Core value types: colors, piece kinds, pieces and board squares.
//!
//! A [`Square`] is addressed by `(row, col)`. Row 0 is Black's back rank
//! (rank 8, the top of the board as displayed) and column 0 is the `a` file.

use std::fmt;
use std::str::FromStr;

use crate::error::NotationError;

/// File names for algebraic notation
pub const FILE_NAMES: &[u8; 8] = b"abcdefgh";

/// Board dimension
pub const BOARD_SIZE: i8 = 8;

/// Side of a piece or player
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// The other side
    #[inline]
    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row holding this color's major pieces at the start
    #[inline]
    pub fn back_row(self) -> i8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Row holding this color's pawns at the start
    #[inline]
    pub fn pawn_row(self) -> i8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Row delta of a forward pawn step
    #[inline]
    pub fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Color::White => "White",
            Color::Black => "Black",
        })
    }
}

/// The six kinds of chess piece
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::King,
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Pawn,
    ];

    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// True for knights and bishops, the pieces that get development credit
    #[inline]
    pub fn is_minor(self) -> bool {
        matches!(self, PieceKind::Knight | PieceKind::Bishop)
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PieceKind::King => "King",
            PieceKind::Queen => "Queen",
            PieceKind::Rook => "Rook",
            PieceKind::Bishop => "Bishop",
            PieceKind::Knight => "Knight",
            PieceKind::Pawn => "Pawn",
        })
    }
}

/// A piece on the board.
///
/// `has_moved` is bookkeeping only: no rule reads it while castling and
/// en passant are unsupported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub has_moved: bool,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Self {
        Piece {
            kind,
            color,
            has_moved: false,
        }
    }

    /// Unicode chess glyph
    pub fn symbol(&self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceKind::King) => '♔',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::Black, PieceKind::King) => '♚',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Pawn) => '♟',
        }
    }

    /// FEN letter (uppercase for White)
    pub fn to_fen(&self) -> char {
        let c = match self.kind {
            PieceKind::King => 'k',
            PieceKind::Queen => 'q',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            PieceKind::Pawn => 'p',
        };
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Parse a FEN letter
    pub fn from_fen(c: char) -> Option<Self> {
        let kind = match c.to_ascii_lowercase() {
            'k' => PieceKind::King,
            'q' => PieceKind::Queen,
            'r' => PieceKind::Rook,
            'b' => PieceKind::Bishop,
            'n' => PieceKind::Knight,
            'p' => PieceKind::Pawn,
            _ => return None,
        };
        let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
        Some(Piece::new(kind, color))
    }
}

/// A board coordinate. May hold out-of-range values; check [`Square::is_valid`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Square {
    pub row: i8,
    pub col: i8,
}

impl Square {
    #[inline]
    pub const fn new(row: i8, col: i8) -> Self {
        Square { row, col }
    }

    /// Both components within 0..8
    #[inline]
    pub fn is_valid(&self) -> bool {
        (0..BOARD_SIZE).contains(&self.row) && (0..BOARD_SIZE).contains(&self.col)
    }

    /// Flat index 0..64, `None` when off the board
    #[inline]
    pub fn index(&self) -> Option<usize> {
        if self.is_valid() {
            Some(self.row as usize * 8 + self.col as usize)
        } else {
            None
        }
    }

    /// Inverse of [`Square::index`]
    #[inline]
    pub fn from_index(index: usize) -> Self {
        Square::new((index / 8) as i8, (index % 8) as i8)
    }

    /// Every square on the board, row by row from the top
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square::from_index)
    }

    /// Square offset by a row/column delta (may be invalid)
    #[inline]
    pub fn offset(&self, d_row: i8, d_col: i8) -> Self {
        Square::new(self.row + d_row, self.col + d_col)
    }

    /// Parse algebraic notation such as `"e4"`
    pub fn parse(notation: &str) -> Result<Self, NotationError> {
        let bytes = notation.as_bytes();
        if bytes.len() != 2 {
            return Err(NotationError::WrongLength(notation.to_string()));
        }

        let col = bytes[0] as i16 - b'a' as i16;
        let row = 8 - (bytes[1] as i16 - b'0' as i16);
        if !(0..8).contains(&col) || !(0..8).contains(&row) {
            return Err(NotationError::OutOfRange(notation.to_string()));
        }

        Ok(Square::new(row as i8, col as i8))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return f.write_str("invalid");
        }
        write!(
            f,
            "{}{}",
            FILE_NAMES[self.col as usize] as char,
            8 - self.row
        )
    }
}

impl FromStr for Square {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Square::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notation_round_trips_every_square() {
        for sq in Square::all() {
            let text = sq.to_string();
            assert_eq!(Square::parse(&text), Ok(sq), "round trip failed for {}", text);
        }
    }

    #[test]
    fn known_squares() {
        assert_eq!(Square::parse("e4").unwrap(), Square::new(4, 4));
        assert_eq!(Square::parse("a8").unwrap(), Square::new(0, 0));
        assert_eq!(Square::parse("h1").unwrap(), Square::new(7, 7));
        assert_eq!(Square::new(6, 4).to_string(), "e2");
    }

    #[test]
    fn rejects_bad_notation() {
        assert!(matches!(Square::parse("abc"), Err(NotationError::WrongLength(_))));
        assert!(matches!(Square::parse(""), Err(NotationError::WrongLength(_))));
        assert!(matches!(Square::parse("z9"), Err(NotationError::OutOfRange(_))));
        assert!(matches!(Square::parse("i1"), Err(NotationError::OutOfRange(_))));
        assert!(matches!(Square::parse("a0"), Err(NotationError::OutOfRange(_))));
        assert!(matches!(Square::parse("A1"), Err(NotationError::OutOfRange(_))));
    }

    #[test]
    fn invalid_square_displays_as_invalid() {
        assert_eq!(Square::new(8, 0).to_string(), "invalid");
        assert_eq!(Square::new(0, -1).index(), None);
    }

    #[test]
    fn fen_letters_round_trip() {
        for kind in PieceKind::ALL {
            for color in [Color::White, Color::Black] {
                let piece = Piece::new(kind, color);
                assert_eq!(Piece::from_fen(piece.to_fen()), Some(piece));
            }
        }
        assert_eq!(Piece::from_fen('x'), None);
    }
}
