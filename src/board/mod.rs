//! The board: raw piece placement (C1), move generation (C3), state update
//! (C4), and FEN interchange (spec.md §2–§4, §6).

mod bitboard_set;
mod fen;
mod movegen;
mod state;
mod update;

pub use bitboard_set::BitboardSet;
pub use fen::{from_fen, to_fen};
pub use movegen::{is_capture, is_square_attacked, legal_moves, perft, pseudo_legal_moves};
pub use state::{CastlingRights, GameState, MoveHistoryNode, PieceNode, MOVE_HISTORY_CAPACITY};

impl GameState {
    /// Parse a FEN string into a [`GameState`] (spec.md §6).
    pub fn from_fen(fen: &str) -> Result<GameState, crate::error::FenError> {
        fen::from_fen(fen)
    }

    /// Serialize to FEN (spec.md §6).
    #[must_use]
    pub fn to_fen(&self) -> String {
        fen::to_fen(self)
    }
}
