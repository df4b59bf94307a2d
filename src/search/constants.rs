//! Tunable constants for search (spec.md §4.5), collected here instead of
//! sprinkled as magic numbers through the search code.

/// Bonus/penalty applied to [`super::eval::evaluate`] for giving/being in
/// check. Spec.md calls this "a small positive integer (e.g. 1)" and leaves
/// the exact value as a tunable constant.
pub const CHECK_BONUS: i32 = 1;

/// How far negamax may descend past depth 0 while a position stays
/// non-quiet (spec.md §4.5, "Quiescence test"). Depth reaching
/// `-MAX_QSEARCH_DEPTH` forces an evaluation regardless of quiescence.
pub const MAX_QSEARCH_DEPTH: i32 = 12;

/// Base of the logistic `squash` function used to fold the history table
/// into move ordering (spec.md §4.5, "History score"). Any constant `c > 1`
/// satisfies the spec; this value saturates slowly enough that a handful of
/// `depth * depth` increments still produce a useful ordering signal.
pub const HISTORY_SQUASH_BASE: f64 = 1.01;

/// Default fraction of the remaining-time budget spent per call to
/// [`super::choose_move`] (spec.md §4.5, "Time heuristic").
pub const DEFAULT_TIME_FRACTION: f64 = 0.01;

/// Score returned for the side to move being checkmated. Large enough to
/// dominate any material/check-bonus evaluation, small enough that
/// negating it at every recursion level never overflows `i32`.
pub const MATE_SCORE: i32 = 1_000_000;

/// Alpha-beta window bounds. Kept well below `i32::MAX` so repeated
/// negation (`-alpha`, `-beta`) across the recursion never overflows.
pub const NEG_INFINITY: i32 = -2_000_000;
pub const POS_INFINITY: i32 = 2_000_000;

/// Iterative deepening never searches past this depth, regardless of the
/// time budget — a practical safety valve the spec's `for depth = 0, 1,
/// 2, ...` loop does not itself bound. Comfortably beyond what quiescence
/// extension plus any realistic per-move time budget would reach.
pub const MAX_ITERATIVE_DEPTH: u32 = 64;
