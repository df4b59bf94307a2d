//! Error types surfaced at the boundaries of the engine.

use std::fmt;

/// FEN parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// FEN string has too few whitespace-separated fields (needs at least 4).
    TooFewParts { found: usize },
    /// Invalid piece character in the piece-placement field.
    InvalidPiece { char: char },
    /// More than 8 ranks in the piece-placement field.
    TooManyRanks,
    /// A rank's runs of pieces/digits add up to more than 8 files.
    TooManyFiles { rank: usize, files: usize },
    /// Side-to-move field was not `w` or `b`.
    InvalidSideToMove { found: String },
    /// Castling field contained a character outside `KQkq-`.
    InvalidCastling { char: char },
    /// En passant field was not `-` or a valid algebraic square.
    InvalidEnPassant { found: String },
    /// Halfmove or fullmove counter failed to parse as a non-negative integer.
    InvalidCounter { found: String },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::TooFewParts { found } => {
                write!(f, "FEN must have at least 4 fields, found {found}")
            }
            FenError::InvalidPiece { char } => {
                write!(f, "invalid piece character '{char}' in FEN")
            }
            FenError::TooManyRanks => write!(f, "FEN piece placement has more than 8 ranks"),
            FenError::TooManyFiles { rank, files } => {
                write!(f, "rank {rank} describes {files} files, expected 8")
            }
            FenError::InvalidSideToMove { found } => {
                write!(f, "invalid side to move '{found}', expected 'w' or 'b'")
            }
            FenError::InvalidCastling { char } => {
                write!(f, "invalid castling character '{char}' in FEN")
            }
            FenError::InvalidEnPassant { found } => {
                write!(f, "invalid en passant square '{found}'")
            }
            FenError::InvalidCounter { found } => {
                write!(f, "invalid move counter '{found}'")
            }
        }
    }
}

impl std::error::Error for FenError {}

/// Failure applying a move to a [`crate::board::GameState`].
///
/// `NoPieceAtSource` indicates a caller bug (spec.md §7): the move generator
/// never produces a move without a piece on its source square, so this
/// variant should only ever be reachable via a hand-constructed [`crate::types::Move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateError {
    NoPieceAtSource,
}

impl fmt::Display for UpdateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateError::NoPieceAtSource => write!(f, "no piece at move source square"),
        }
    }
}

impl std::error::Error for UpdateError {}

/// A move submitted by an external caller that is not in the legal set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IllegalMove;

impl fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "move is not legal in the current position")
    }
}

impl std::error::Error for IllegalMove {}

/// Magic-table construction failed to find a collision-free magic number for
/// some square within the search budget. Fatal at startup (spec.md §7) — the
/// randomized search is reliable enough in practice that this should never
/// be observed outside of a broken RNG seed or a drastically shrunk search
/// budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MagicTableInitFailure {
    pub square: u8,
}

impl fmt::Display for MagicTableInitFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to find a magic number for square index {}",
            self.square
        )
    }
}

impl std::error::Error for MagicTableInitFailure {}
