//! Position evaluation (spec.md §4.5): symmetric material count from
//! `player`'s perspective, plus a bonus for giving check and a penalty for
//! being in check. No piece-square tables, mobility, or pawn-structure
//! terms — those belong to a fuller evaluation function the spec
//! deliberately does not ask for.

use crate::board::GameState;
use crate::types::{Color, PieceType};

use super::constants::CHECK_BONUS;

const PIECES: [PieceType; 6] = [
    PieceType::Pawn,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Rook,
    PieceType::Queen,
    PieceType::King,
];

/// Material balance plus the check bonus/penalty, from `player`'s point of
/// view. Positive favors `player`.
#[must_use]
pub fn evaluate(state: &GameState, player: Color) -> i32 {
    let opponent = player.opposite();
    let mut score = 0;
    for piece in PIECES {
        let ours = state.board.bitboard(player, piece).count() as i32;
        let theirs = state.board.bitboard(opponent, piece).count() as i32;
        score += (ours - theirs) * piece.value();
    }
    if state.is_in_check(opponent) {
        score += CHECK_BONUS;
    }
    if state.is_in_check(player) {
        score -= CHECK_BONUS;
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_is_materially_even() {
        let state = GameState::new();
        assert_eq!(evaluate(&state, Color::White), 0);
        assert_eq!(evaluate(&state, Color::Black), 0);
    }

    #[test]
    fn extra_queen_shows_up_as_a_nine_pawn_advantage() {
        let state = crate::board::from_fen("4k3/8/8/8/8/8/8/4KQ2 w - - 0 1").unwrap();
        assert_eq!(evaluate(&state, Color::White), PieceType::Queen.value());
        assert_eq!(evaluate(&state, Color::Black), -PieceType::Queen.value());
    }

    #[test]
    fn check_bonus_favors_the_side_giving_check() {
        let state = crate::board::from_fen("4k3/4Q3/4K3/8/8/8/8/8 b - - 0 1").unwrap();
        // Black is in check; White's evaluation from White's perspective
        // should include the bonus on top of the (zero) material balance.
        assert_eq!(evaluate(&state, Color::White), CHECK_BONUS);
        assert_eq!(evaluate(&state, Color::Black), -CHECK_BONUS);
    }
}
