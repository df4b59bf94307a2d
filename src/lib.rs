//! A chess engine: bitboard move generation backed by magic-hashed sliding
//! attack tables, iterative-deepening negamax with alpha-beta pruning,
//! quiescence search, and a per-player history heuristic.
//!
//! # Example
//! ```
//! use negabit::board::GameState;
//! use negabit::types::Color;
//!
//! let mut state = GameState::new();
//! let moves = state.legal_moves(Color::White);
//! assert_eq!(moves.len(), 20);
//! ```

pub mod bitboard;
pub mod board;
pub mod error;
pub mod magic;
pub mod search;
pub mod types;
