//! Board representation
//!
//! An 8x8 grid of optional pieces stored row-major (index 0 = a8, 63 = h1).
//! Reads of an off-board square return nothing and writes are dropped, so a
//! bad coordinate can never touch memory outside the grid.

use std::fmt;

use crate::types::*;

/// Piece placement of the standard starting array, FEN style
pub const STARTING_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// A move is a value: an ordered pair of squares
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Move { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// Information needed to undo a relocation
#[derive(Clone, Copy, Debug)]
pub struct UndoInfo {
    pub moved_piece: Piece,
    pub captured_piece: Option<Piece>,
}

/// Chess board
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Board {
    /// Board with the standard starting array
    pub fn new() -> Self {
        let mut board = Board::empty();
        for (col, &kind) in BACK_RANK.iter().enumerate() {
            let col = col as i8;
            for color in [Color::White, Color::Black] {
                board.set(Square::new(color.back_row(), col), Some(Piece::new(kind, color)));
                board.set(
                    Square::new(color.pawn_row(), col),
                    Some(Piece::new(PieceKind::Pawn, color)),
                );
            }
        }
        board
    }

    /// Board with no pieces, for hand-built positions
    pub fn empty() -> Self {
        Board { squares: [None; 64] }
    }

    /// Build a board from the piece-placement field of a FEN string
    /// (rank 8 first). Returns `None` on malformed input.
    pub fn from_placement(placement: &str) -> Option<Self> {
        let mut board = Board::empty();
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return None;
        }

        for (row, rank) in ranks.iter().enumerate() {
            let mut col = 0i8;
            for c in rank.chars() {
                if let Some(skip) = c.to_digit(10) {
                    col += skip as i8;
                } else {
                    let piece = Piece::from_fen(c)?;
                    if col >= BOARD_SIZE {
                        return None;
                    }
                    board.set(Square::new(row as i8, col), Some(piece));
                    col += 1;
                }
                if col > BOARD_SIZE {
                    return None;
                }
            }
            if col != BOARD_SIZE {
                return None;
            }
        }

        Some(board)
    }

    /// Piece-placement field of FEN for this board
    pub fn placement(&self) -> String {
        let mut out = String::new();

        for row in 0..BOARD_SIZE {
            let mut empty_count = 0;
            for col in 0..BOARD_SIZE {
                match self.get(Square::new(row, col)) {
                    None => empty_count += 1,
                    Some(piece) => {
                        if empty_count > 0 {
                            out.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        out.push(piece.to_fen());
                    }
                }
            }
            if empty_count > 0 {
                out.push_str(&empty_count.to_string());
            }
            if row < BOARD_SIZE - 1 {
                out.push('/');
            }
        }

        out
    }

    /// Piece on `pos`, or `None` for an empty or off-board square
    #[inline]
    pub fn get(&self, pos: Square) -> Option<Piece> {
        pos.index().and_then(|i| self.squares[i])
    }

    /// Replace the contents of `pos`; ignored when `pos` is off the board
    #[inline]
    pub fn set(&mut self, pos: Square, piece: Option<Piece>) {
        if let Some(i) = pos.index() {
            self.squares[i] = piece;
        }
    }

    /// Relocate the piece on `from` to `to` and mark it as moved.
    ///
    /// This is a raw primitive: chess legality is not checked. Fails when
    /// either square is off the board or `from` is empty.
    pub fn move_piece(&mut self, from: Square, to: Square) -> bool {
        self.make_move(&Move::new(from, to)).is_some()
    }

    /// Relocate a piece, returning what is needed to restore the squares
    pub fn make_move(&mut self, mv: &Move) -> Option<UndoInfo> {
        let from_idx = mv.from.index()?;
        let to_idx = mv.to.index()?;
        let moved_piece = self.squares[from_idx]?;

        let undo = UndoInfo {
            moved_piece,
            captured_piece: self.squares[to_idx],
        };

        self.squares[from_idx] = None;
        self.squares[to_idx] = Some(Piece {
            has_moved: true,
            ..moved_piece
        });

        Some(undo)
    }

    /// Undo a relocation made by [`Board::make_move`]
    pub fn unmake_move(&mut self, mv: &Move, undo: &UndoInfo) {
        self.set(mv.to, undo.captured_piece);
        self.set(mv.from, Some(undo.moved_piece));
    }

    /// Occupied squares with their pieces
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.map(|piece| (Square::from_index(i), piece)))
    }

    /// Find the king of the specified color
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, p)| p.kind == PieceKind::King && p.color == color)
            .map(|(sq, _)| sq)
    }

    /// Render the board as text
    pub fn display(&self) -> String {
        let mut lines = Vec::new();
        lines.push("   a  b  c  d  e  f  g  h".to_string());
        lines.push("  ┌──┬──┬──┬──┬──┬──┬──┬──┐".to_string());

        for row in 0..BOARD_SIZE {
            let mut line = format!("{} │", 8 - row);
            for col in 0..BOARD_SIZE {
                match self.get(Square::new(row, col)) {
                    Some(piece) => {
                        line.push(piece.symbol());
                        line.push(' ');
                    }
                    None => line.push_str("  "),
                }
                line.push('│');
            }
            line.push_str(&format!(" {}", 8 - row));
            lines.push(line);
            if row < BOARD_SIZE - 1 {
                lines.push("  ├──┼──┼──┼──┼──┼──┼──┼──┤".to_string());
            }
        }

        lines.push("  └──┴──┴──┴──┴──┴──┴──┴──┘".to_string());
        lines.push("   a  b  c  d  e  f  g  h".to_string());
        lines.join("\n")
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.placement())
    }
}
