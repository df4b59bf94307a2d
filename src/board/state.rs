//! `GameState`: the board plus every piece of auxiliary bookkeeping move
//! generation, update, and search need (spec.md §3).

use std::collections::VecDeque;

use super::bitboard_set::BitboardSet;
use crate::types::{Color, Move, PieceType, Position};

/// Capacity of the trailing move-history window. Large enough to detect the
/// engine's narrower-than-threefold repetition rule (spec.md §4.4 step 7)
/// and to look one ply back for en-passant eligibility.
pub const MOVE_HISTORY_CAPACITY: usize = 8;

/// A materialized `(Position, PieceType)` view of one piece. Redundant with
/// [`BitboardSet`] — kept in sync by [`crate::board::update`] — but cheaper
/// to iterate than popping bits when the caller wants "every piece of
/// color X", e.g. to find a king.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PieceNode {
    pub position: Position,
    pub piece: PieceType,
}

/// One ply of move history, enough to detect en passant eligibility and
/// drive the repetition check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveHistoryNode {
    pub source: Position,
    pub destination: Position,
    pub player: Color,
    pub piece_type: PieceType,
}

/// Which castles are still available to each side. Revoked permanently the
/// moment the relevant king or rook moves, or that rook is captured on its
/// home square (spec.md §4.4 steps 3–5).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    #[must_use]
    pub fn none() -> Self {
        CastlingRights {
            white_kingside: false,
            white_queenside: false,
            black_kingside: false,
            black_queenside: false,
        }
    }

    #[must_use]
    pub fn all() -> Self {
        CastlingRights {
            white_kingside: true,
            white_queenside: true,
            black_kingside: true,
            black_queenside: true,
        }
    }

    pub fn kingside(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_kingside,
            Color::Black => self.black_kingside,
            Color::Neutral => false,
        }
    }

    pub fn queenside(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_queenside,
            Color::Black => self.black_queenside,
            Color::Neutral => false,
        }
    }

    pub fn revoke_both(&mut self, color: Color) {
        match color {
            Color::White => {
                self.white_kingside = false;
                self.white_queenside = false;
            }
            Color::Black => {
                self.black_kingside = false;
                self.black_queenside = false;
            }
            Color::Neutral => {}
        }
    }

    pub fn revoke_kingside(&mut self, color: Color) {
        match color {
            Color::White => self.white_kingside = false,
            Color::Black => self.black_kingside = false,
            Color::Neutral => {}
        }
    }

    pub fn revoke_queenside(&mut self, color: Color) {
        match color {
            Color::White => self.white_queenside = false,
            Color::Black => self.black_queenside = false,
            Color::Neutral => {}
        }
    }
}

/// The full state of a game in progress (or finished).
///
/// Cloned frequently — search recurses on copies rather than
/// making/unmaking a single mutable state (spec.md §5) — so every field is
/// either fixed-size or a small `Vec`/`VecDeque` bounded by piece count or
/// [`MOVE_HISTORY_CAPACITY`].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub board: BitboardSet,
    pub white_pieces: Vec<PieceNode>,
    pub black_pieces: Vec<PieceNode>,
    pub move_history: VecDeque<MoveHistoryNode>,
    pub winner: Option<Color>,
    pub next_turn: Color,
    pub half_turn_count: u32,
    pub full_turn_count: u32,
    pub castling: CastlingRights,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// The standard chess starting position.
    #[must_use]
    pub fn new() -> Self {
        let mut board = BitboardSet::new();
        board.populate_standard();
        let mut state = GameState {
            board,
            white_pieces: Vec::with_capacity(16),
            black_pieces: Vec::with_capacity(16),
            move_history: VecDeque::with_capacity(MOVE_HISTORY_CAPACITY),
            winner: None,
            next_turn: Color::White,
            half_turn_count: 0,
            full_turn_count: 1,
            castling: CastlingRights::all(),
        };
        state.rebuild_piece_lists();
        state
    }

    /// An empty board with no side to move set up yet — used by FEN parsing
    /// to build a state piece by piece before rebuilding the piece lists.
    #[must_use]
    pub(crate) fn empty() -> Self {
        GameState {
            board: BitboardSet::new(),
            white_pieces: Vec::new(),
            black_pieces: Vec::new(),
            move_history: VecDeque::with_capacity(MOVE_HISTORY_CAPACITY),
            winner: None,
            next_turn: Color::White,
            half_turn_count: 0,
            full_turn_count: 1,
            castling: CastlingRights::none(),
        }
    }

    /// Recompute `white_pieces`/`black_pieces` from `board` by scanning
    /// every set bit. Used after bulk board construction (FEN parsing);
    /// normal move application maintains the lists incrementally instead.
    pub(crate) fn rebuild_piece_lists(&mut self) {
        self.white_pieces.clear();
        self.black_pieces.clear();
        let mut occ = self.board.occupancy_all();
        while !occ.is_empty() {
            let pos = occ.pop_lsb();
            if let Some((color, piece)) = self.board.piece_at(pos) {
                let node = PieceNode {
                    position: pos,
                    piece,
                };
                match color {
                    Color::White => self.white_pieces.push(node),
                    Color::Black => self.black_pieces.push(node),
                    Color::Neutral => unreachable!("pieces are never Neutral-colored"),
                }
            }
        }
    }

    pub(crate) fn pieces_mut(&mut self, color: Color) -> &mut Vec<PieceNode> {
        match color {
            Color::White => &mut self.white_pieces,
            Color::Black => &mut self.black_pieces,
            Color::Neutral => panic!("Neutral has no piece list"),
        }
    }

    pub(crate) fn pieces(&self, color: Color) -> &[PieceNode] {
        match color {
            Color::White => &self.white_pieces,
            Color::Black => &self.black_pieces,
            Color::Neutral => &[],
        }
    }

    /// The square occupied by `color`'s king. Panics if absent — every
    /// reachable legal state has exactly one king per side (spec.md §3,
    /// Invariant C).
    #[must_use]
    pub fn king_position(&self, color: Color) -> Position {
        self.pieces(color)
            .iter()
            .find(|node| node.piece == PieceType::King)
            .map(|node| node.position)
            .unwrap_or_else(|| panic!("{color:?} has no king on the board"))
    }

    /// Legal moves for `color` in this position (pseudo-legal generation
    /// followed by the king-safety filter, spec.md §4.3).
    #[must_use]
    pub fn legal_moves(&self, color: Color) -> Vec<Move> {
        super::movegen::legal_moves(self, color)
    }

    #[must_use]
    pub fn is_in_check(&self, color: Color) -> bool {
        super::movegen::is_in_check(self, color)
    }

    #[must_use]
    pub fn is_checkmate(&self, color: Color) -> bool {
        self.is_in_check(color) && self.legal_moves(color).is_empty()
    }

    #[must_use]
    pub fn is_stalemate(&self, color: Color) -> bool {
        !self.is_in_check(color) && self.legal_moves(color).is_empty()
    }

    /// Apply `mv` for `player` to a clone of this state, per spec.md §4.4.
    #[must_use = "apply returns a new state; it does not mutate self"]
    pub fn apply(
        &self,
        player: Color,
        mv: Move,
    ) -> Result<GameState, crate::error::UpdateError> {
        super::update::apply(self, player, mv)
    }
}
