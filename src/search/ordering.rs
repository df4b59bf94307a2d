//! Move ordering (spec.md §4.5, "Move ordering"): each candidate gets a
//! capture score and a history score; the larger of the two is its sort
//! key. Bounding the history score strictly below 2.0 (a pawn capture's
//! floor) guarantees history never outranks a real capture.

use crate::board::GameState;
use crate::types::{Color, Move, PieceType};

use super::constants::HISTORY_SQUASH_BASE;
use super::history::HistoryTable;

fn is_backward(mv: Move, color: Color) -> bool {
    match color {
        Color::White => mv.destination.y > mv.source.y,
        Color::Black => mv.destination.y < mv.source.y,
        Color::Neutral => false,
    }
}

fn captured_piece_value(state: &GameState, mv: Move) -> i32 {
    match state.board.piece_at(mv.destination) {
        Some((_, piece)) => piece.value(),
        // Destination is empty: either not a capture, or en passant, whose
        // victim is always a pawn.
        None => PieceType::Pawn.value(),
    }
}

fn capture_score(state: &GameState, mv: Move, color: Color) -> f64 {
    if crate::board::is_capture(state, mv) {
        f64::from(1 + captured_piece_value(state, mv))
    } else if is_backward(mv, color) {
        0.0
    } else {
        1.0
    }
}

/// `squash(v) = 1 / (1 + c^-v)`, bounded in `(0.5, 1)` for `v >= 0`, so
/// `1 + squash(v)` stays in `(1, 2)`.
fn squash(v: u32) -> f64 {
    1.0 / (1.0 + HISTORY_SQUASH_BASE.powi(-(v as i32)))
}

fn history_score(history: &HistoryTable, player: Color, mv: Move) -> f64 {
    1.0 + squash(history.get(player, mv))
}

/// Sort `moves` descending by `max(capture_score, history_score)`.
#[must_use]
pub fn order_moves(
    state: &GameState,
    player: Color,
    moves: Vec<Move>,
    history: &HistoryTable,
) -> Vec<Move> {
    let mut scored: Vec<(Move, f64)> = moves
        .into_iter()
        .map(|mv| {
            let key = capture_score(state, mv, player).max(history_score(history, player, mv));
            (mv, key)
        })
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.into_iter().map(|(mv, _)| mv).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::from_fen;
    use crate::types::Position;

    #[test]
    fn a_pawn_capture_always_outranks_a_fresh_history_entry() {
        let state = from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1").unwrap();
        let capture = Move::new(Position::new(4, 4), Position::new(3, 3));
        let quiet = Move::new(Position::new(4, 3), Position::new(4, 2));
        let history = HistoryTable::new();
        let ordered = order_moves(&state, Color::White, vec![quiet, capture], &history);
        assert_eq!(ordered[0], capture);
    }

    #[test]
    fn history_breaks_ties_between_equally_quiet_moves() {
        let state = GameState::new();
        let a = Move::new(Position::new(1, 6), Position::new(1, 5));
        let b = Move::new(Position::new(6, 6), Position::new(6, 5));
        let mut history = HistoryTable::new();
        history.add(Color::White, b, 25);
        let ordered = order_moves(&state, Color::White, vec![a, b], &history);
        assert_eq!(ordered[0], b);
    }

    #[test]
    fn squash_is_bounded_in_one_half_and_one() {
        assert!(squash(0) > 0.49 && squash(0) < 0.51);
        assert!(squash(1_000_000) < 1.0);
    }
}
