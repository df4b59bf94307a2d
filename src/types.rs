//! Shared value types: colors, piece types, board positions, and moves.
//!
//! These are the "glue" types named in spec.md §2 (the non-component ~5%):
//! color/piece enums, `Position` arithmetic, and the `Move` record that
//! flows between move generation, game-state update, and search.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Side to move, plus a `Neutral` sentinel meaning "no side to move" — used
/// to signal a drawn game (see [`crate::board::GameState::next_turn`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Color {
    White,
    Black,
    Neutral,
}

impl Color {
    /// Index into the two-element per-color arrays used by [`crate::board::BitboardSet`]
    /// and the piece lists. Only meaningful for `White`/`Black`.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
            Color::Neutral => panic!("Color::Neutral has no board index"),
        }
    }

    /// The other playing side. `Neutral` maps to itself — a drawn game stays
    /// drawn.
    #[must_use]
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
            Color::Neutral => Color::Neutral,
        }
    }
}

/// Piece kind, plus a `None` sentinel used for "no promotion" / "no piece"
/// contexts (e.g. [`Move::promotion`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
    None,
}

impl PieceType {
    /// Index into the six-element per-piece arrays in [`crate::board::BitboardSet`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            PieceType::Pawn => 0,
            PieceType::Knight => 1,
            PieceType::Bishop => 2,
            PieceType::Rook => 3,
            PieceType::Queen => 4,
            PieceType::King => 5,
            PieceType::None => panic!("PieceType::None has no board index"),
        }
    }

    /// Material value in pawns, per spec.md §4.5 ("canonical" piece values).
    /// Kings are never captured (the legality filter forbids it), so their
    /// value is irrelevant and fixed at 0 per the spec.
    #[must_use]
    pub fn value(self) -> i32 {
        match self {
            PieceType::Pawn => 1,
            PieceType::Knight | PieceType::Bishop => 3,
            PieceType::Rook => 5,
            PieceType::Queen => 9,
            PieceType::King | PieceType::None => 0,
        }
    }

    /// Parse a FEN piece letter (case gives color, which the caller already
    /// knows from `c.is_uppercase()`).
    #[must_use]
    pub fn from_fen_char(c: char) -> Option<PieceType> {
        match c.to_ascii_uppercase() {
            'P' => Some(PieceType::Pawn),
            'N' => Some(PieceType::Knight),
            'B' => Some(PieceType::Bishop),
            'R' => Some(PieceType::Rook),
            'Q' => Some(PieceType::Queen),
            'K' => Some(PieceType::King),
            _ => None,
        }
    }

    /// FEN piece letter for this piece, uppercase for White and lowercase
    /// for Black.
    #[must_use]
    pub fn to_fen_char(self, color: Color) -> char {
        let upper = match self {
            PieceType::Pawn => 'P',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
            PieceType::Rook => 'R',
            PieceType::Queen => 'Q',
            PieceType::King => 'K',
            PieceType::None => unreachable!("no FEN letter for PieceType::None"),
        };
        if color == Color::White {
            upper
        } else {
            upper.to_ascii_lowercase()
        }
    }
}

/// The four promotion choices a pawn may become, queen first (spec.md §4.3:
/// "promotion to queen is always available").
pub const PROMOTION_PIECES: [PieceType; 4] = [
    PieceType::Queen,
    PieceType::Rook,
    PieceType::Bishop,
    PieceType::Knight,
];

/// A board square. `x` is the file (0 = a, 7 = h). `y` is the rank measured
/// from Black's back rank: `y = 0` is rank 8, `y = 7` is rank 1 (spec.md §3).
///
/// Maps bijectively to a bit index via `y * 8 + x`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    pub x: u8,
    pub y: u8,
}

impl Position {
    #[must_use]
    pub fn new(x: u8, y: u8) -> Self {
        debug_assert!(x < 8 && y < 8, "position out of bounds: ({x}, {y})");
        Position { x, y }
    }

    /// The bit index `y * 8 + x` into a [`crate::bitboard::Bitboard`].
    #[must_use]
    pub fn index(self) -> u8 {
        self.y * 8 + self.x
    }

    #[must_use]
    pub fn from_index(index: u8) -> Self {
        Position {
            x: index % 8,
            y: index / 8,
        }
    }

    /// Convert to algebraic file/rank characters, per spec.md §6:
    /// `toFileAndRank(pos) = ('a' + x, '8' - y)`.
    #[must_use]
    pub fn to_file_rank(self) -> (char, char) {
        ((b'a' + self.x) as char, (b'8' - self.y) as char)
    }

    /// Parse algebraic notation such as `"e4"` into a [`Position`], inverting
    /// [`Position::to_file_rank`].
    #[must_use]
    pub fn from_algebraic(s: &str) -> Option<Position> {
        let mut chars = s.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }
        let x = file as u8 - b'a';
        let y = b'8' - rank as u8;
        Some(Position::new(x, y))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (file, rank) = self.to_file_rank();
        write!(f, "{file}{rank}")
    }
}

/// A single move: source square, destination square, and an optional
/// promotion piece (`PieceType::None` when the move does not promote).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move {
    pub source: Position,
    pub destination: Position,
    pub promotion: PieceType,
}

impl Move {
    #[must_use]
    pub fn new(source: Position, destination: Position) -> Self {
        Move {
            source,
            destination,
            promotion: PieceType::None,
        }
    }

    #[must_use]
    pub fn promoting(source: Position, destination: Position, promotion: PieceType) -> Self {
        Move {
            source,
            destination,
            promotion,
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.source, self.destination)?;
        if self.promotion != PieceType::None {
            let letter = self.promotion.to_fen_char(Color::Black);
            write!(f, "{letter}")?;
        }
        Ok(())
    }
}
