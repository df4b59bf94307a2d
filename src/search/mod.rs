//! Iterative-deepening negamax search (spec.md §4.5, component C5): the
//! entry point an external orchestrator calls to pick a move for a side
//! given a game state and a time budget (spec.md §6, "Agent interface").
//!
//! A [`Search`] owns the one piece of state that persists across a whole
//! game rather than a single call — the per-player history table (spec.md
//! §5: "The history tables live inside a Search session and belong to the
//! one agent that owns them").

mod constants;
mod eval;
mod history;
mod negamax;
mod ordering;

use std::time::{Duration, Instant};

use crate::board::GameState;
use crate::types::{Color, Move};

pub use constants::{
    CHECK_BONUS, DEFAULT_TIME_FRACTION, HISTORY_SQUASH_BASE, MATE_SCORE, MAX_ITERATIVE_DEPTH,
    MAX_QSEARCH_DEPTH,
};
pub use history::HistoryTable;

#[cfg(feature = "logging")]
fn log_iteration(depth: u32, score: i32, elapsed: Duration) {
    log::debug!(
        "iterative deepening: depth={depth} score={score} elapsed={elapsed:?}"
    );
}

#[cfg(not(feature = "logging"))]
fn log_iteration(_depth: u32, _score: i32, _elapsed: Duration) {}

/// A search session: the history table built up across calls to
/// [`Search::choose_move`] within one game. Cheap to construct — a fresh
/// `Search` is a reasonable choice for a one-off `choose_move` call too.
#[derive(Clone, Debug, Default)]
pub struct Search {
    history: HistoryTable,
}

impl Search {
    #[must_use]
    pub fn new() -> Self {
        Search {
            history: HistoryTable::new(),
        }
    }

    /// Choose a move for `player` in `state` within `budget` of remaining
    /// game time (spec.md §4.5, "Entry point").
    ///
    /// Runs iterative deepening, completing each depth's full root search
    /// before checking the clock, and stops once elapsed time exceeds
    /// `budget * `[`DEFAULT_TIME_FRACTION`]. Returns `None` if `player` has
    /// no legal moves — the orchestrator should read `state.winner` in
    /// that case (spec.md §7, `IllegalMove`/terminal handling is the
    /// caller's responsibility, not this function's).
    #[must_use]
    pub fn choose_move(&mut self, state: &GameState, player: Color, budget: Duration) -> Option<Move> {
        let legal = state.legal_moves(player);
        let mut best = *legal.first()?;

        let start = Instant::now();
        let time_limit = budget.mul_f64(DEFAULT_TIME_FRACTION);

        for depth in 0..=MAX_ITERATIVE_DEPTH {
            let Some((mv, score)) = negamax::root_search(state, player, depth, &mut self.history)
            else {
                break;
            };
            best = mv;
            let elapsed = start.elapsed();
            log_iteration(depth, score, elapsed);
            if elapsed > time_limit {
                break;
            }
        }

        Some(best)
    }
}
