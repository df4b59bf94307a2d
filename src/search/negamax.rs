//! Iterative-deepening negamax with alpha-beta pruning and quiescence
//! extension (spec.md §4.5, component C5). The recursion is the literal
//! shape of the pseudocode in spec.md §4.5: at every depth (including
//! negative, quiescence-extended depths) it generates the full legal move
//! set, checks quiescence, and recurses — there is no captures-only move
//! set switch once depth drops to zero or below.

use crate::board::{is_capture, GameState};
use crate::types::{Color, Move};

use super::constants::{MATE_SCORE, MAX_QSEARCH_DEPTH, NEG_INFINITY, POS_INFINITY};
use super::eval::evaluate;
use super::history::HistoryTable;
use super::ordering::order_moves;

/// A position is quiet iff none of its legal moves is a capture (spec.md
/// §4.5, "Quiescence test").
fn is_quiescent(state: &GameState, moves: &[Move]) -> bool {
    moves.iter().all(|&mv| !is_capture(state, mv))
}

/// Negamax search from `state`, `player` to move, at `depth` plies
/// remaining (may be zero or negative — negative depths are the
/// quiescence extension). Returns the score from `player`'s perspective.
pub fn negamax(
    state: &GameState,
    player: Color,
    depth: i32,
    mut alpha: i32,
    beta: i32,
    history: &mut HistoryTable,
) -> i32 {
    let moves = state.legal_moves(player);
    if moves.is_empty() {
        return if state.is_in_check(player) {
            -MATE_SCORE
        } else {
            0
        };
    }
    if depth <= 0 && is_quiescent(state, &moves) {
        return evaluate(state, player);
    }
    if depth <= -MAX_QSEARCH_DEPTH {
        return evaluate(state, player);
    }

    let ordered = order_moves(state, player, moves, history);
    let mut best = NEG_INFINITY;
    let mut best_move = ordered[0];

    for mv in ordered {
        let next = match state.apply(player, mv) {
            Ok(next) => next,
            Err(_) => continue,
        };
        let score = -negamax(&next, player.opposite(), depth - 1, -beta, -alpha, history);
        if score > best {
            best = score;
            best_move = mv;
        }
        if best > alpha {
            alpha = best;
        }
        if alpha >= beta {
            break;
        }
    }

    if !is_capture(state, best_move) {
        history.add(player, best_move, depth * depth);
    }
    best
}

/// One root iteration: score every legal move with a full-window negamax
/// call and return the best move plus its score. `None` only when `state`
/// has no legal moves for `player` (checkmate/stalemate) — callers must
/// not invoke this on such a position (spec.md §4.5, "Callers of
/// `root_search` assume it returns some move from the initial set").
#[must_use]
pub fn root_search(
    state: &GameState,
    player: Color,
    depth: u32,
    history: &mut HistoryTable,
) -> Option<(Move, i32)> {
    let moves = state.legal_moves(player);
    if moves.is_empty() {
        return None;
    }
    let ordered = order_moves(state, player, moves, history);

    let mut best_score = NEG_INFINITY;
    let mut best_move = ordered[0];
    for mv in ordered {
        let next = state
            .apply(player, mv)
            .expect("legal_moves only returns moves that apply cleanly");
        let score = -negamax(
            &next,
            player.opposite(),
            depth as i32,
            NEG_INFINITY,
            POS_INFINITY,
            history,
        );
        if score > best_score {
            best_score = score;
            best_move = mv;
        }
    }
    Some((best_move, best_score))
}
