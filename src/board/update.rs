//! Applying a move to a `GameState`, maintaining every invariant in one pass
//! (spec.md §4.4, component C4).

use crate::error::UpdateError;
use crate::types::{Color, Move, PieceType, Position};

use super::state::{GameState, MoveHistoryNode, PieceNode, MOVE_HISTORY_CAPACITY};

fn promotion_rank(color: Color) -> u8 {
    match color {
        Color::White => 0,
        Color::Black => 7,
        Color::Neutral => unreachable!("Neutral never has pawns"),
    }
}

fn find_piece_index(list: &[PieceNode], pos: Position) -> Option<usize> {
    list.iter().position(|n| n.position == pos)
}

fn remove_piece_from_list(state: &mut GameState, color: Color, pos: Position) {
    let list = state.pieces_mut(color);
    if let Some(idx) = find_piece_index(list, pos) {
        list.remove(idx);
    }
}

fn relocate_piece_in_list(state: &mut GameState, color: Color, from: Position, to: Position, piece: PieceType) {
    let list = state.pieces_mut(color);
    if let Some(idx) = find_piece_index(list, from) {
        list[idx] = PieceNode {
            position: to,
            piece,
        };
    }
}

/// Revoke `color`'s matching castling right if `pos` is one of its two rook
/// home squares — used both when that color's own rook moves (spec.md §4.4
/// step 4) and when an opposing rook captures it there (step 5).
fn revoke_right_if_home_rook_square(state: &mut GameState, color: Color, pos: Position) {
    let home_rank = match color {
        Color::White => 7,
        Color::Black => 0,
        Color::Neutral => return,
    };
    if pos.y != home_rank {
        return;
    }
    if pos.x == 0 {
        state.castling.revoke_queenside(color);
    } else if pos.x == 7 {
        state.castling.revoke_kingside(color);
    }
}

fn relocate_rook_for_castling(state: &mut GameState, color: Color, from: Position, to: Position) {
    state.board.clear_pos(from);
    state.board.add_piece(color, PieceType::Rook, to);
    relocate_piece_in_list(state, color, from, to, PieceType::Rook);
}

/// Apply `mv`, played by `player`, to a clone of `state`.
pub fn apply(state: &GameState, player: Color, mv: Move) -> Result<GameState, UpdateError> {
    let Move {
        source,
        destination,
        promotion,
    } = mv;

    // Step 1: locate the moving piece.
    let moving_piece = find_piece_index(state.pieces(player), source)
        .map(|idx| state.pieces(player)[idx].piece)
        .ok_or(UpdateError::NoPieceAtSource)?;

    let mut next = state.clone();
    let mut half_turn_reset = false;
    let mut new_piece_type = moving_piece;

    // Step 2: pawn special cases.
    if moving_piece == PieceType::Pawn {
        half_turn_reset = true;

        if source.x != destination.x && !state.board.is_occupied(destination) {
            // En passant: the captured pawn sits on the capturing pawn's
            // starting rank, same file as the destination.
            let captured_pos = Position::new(destination.x, source.y);
            next.board.clear_pos(captured_pos);
            remove_piece_from_list(&mut next, player.opposite(), captured_pos);
        }

        if destination.y == promotion_rank(player) {
            new_piece_type = if promotion == PieceType::None {
                PieceType::Queen
            } else {
                promotion
            };
        }
    }

    // Step 3: king special cases.
    if moving_piece == PieceType::King {
        if (i32::from(destination.x) - i32::from(source.x)).abs() > 1 {
            let rank = source.y;
            if destination.x > source.x {
                relocate_rook_for_castling(&mut next, player, Position::new(7, rank), Position::new(5, rank));
            } else {
                relocate_rook_for_castling(&mut next, player, Position::new(0, rank), Position::new(3, rank));
            }
        }
        next.castling.revoke_both(player);
    }

    // Step 4: rook special case.
    if moving_piece == PieceType::Rook {
        revoke_right_if_home_rook_square(&mut next, player, source);
    }

    // Step 5: capture detection and cleanup (pre-move occupancy).
    if let Some((_, captured_piece)) = state.board.piece_at(destination) {
        next.board.clear_pos(destination);
        remove_piece_from_list(&mut next, player.opposite(), destination);
        half_turn_reset = true;
        if captured_piece == PieceType::Rook {
            revoke_right_if_home_rook_square(&mut next, player.opposite(), destination);
        }
    }

    // Step 6: record history.
    next.move_history.push_back(MoveHistoryNode {
        source,
        destination,
        player,
        piece_type: moving_piece,
    });
    if next.move_history.len() > MOVE_HISTORY_CAPACITY {
        next.move_history.pop_front();
    }

    // Step 7: draw by repetition. This move's own halfmove increment/reset
    // has to happen here, before the threshold check, not with the rest of
    // the counters down in step 9. Otherwise the check sees the count as of
    // the previous move and the draw fires one ply late.
    if half_turn_reset {
        next.half_turn_count = 0;
    } else {
        next.half_turn_count += 1;
    }
    let is_repetition = next.move_history.len() >= MOVE_HISTORY_CAPACITY
        && next.half_turn_count >= 8
        && (0..4).all(|i| next.move_history[i] == next.move_history[i + 4]);

    // Step 8: move the piece itself — the single atomic board mutation.
    next.board.clear_pos(source);
    next.board.add_piece(player, new_piece_type, destination);
    relocate_piece_in_list(&mut next, player, source, destination, new_piece_type);

    // Step 9: turn & full-move counter, unless the repetition draw just fired.
    if is_repetition {
        next.winner = Some(Color::Neutral);
        next.next_turn = Color::Neutral;
    } else {
        next.next_turn = player.opposite();
        if next.next_turn == Color::White {
            next.full_turn_count += 1;
        }
    }

    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::fen::from_fen;

    #[test]
    fn en_passant_capture_removes_the_passed_pawn() {
        let state = GameState::new();
        let after_e4 = state
            .apply(Color::White, Move::new(Position::new(4, 6), Position::new(4, 4)))
            .unwrap();
        let after_d5 = after_e4
            .apply(Color::Black, Move::new(Position::new(3, 1), Position::new(3, 3)))
            .unwrap();
        let after_exd6 = after_d5
            .apply(Color::White, Move::new(Position::new(4, 4), Position::new(3, 3)))
            .unwrap();
        // The White pawn now sits where the Black pawn was (d5), and the
        // Black pawn list lost exactly one entry.
        assert_eq!(
            after_exd6.board.piece_at(Position::new(3, 3)),
            Some((Color::White, PieceType::Pawn))
        );
        assert_eq!(after_exd6.black_pieces.len(), 15);
    }

    #[test]
    fn castling_kingside_moves_the_rook_and_clears_rights() {
        let state = from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        let after = state
            .apply(Color::White, Move::new(Position::new(4, 7), Position::new(6, 7)))
            .unwrap();
        assert_eq!(
            after.board.piece_at(Position::new(5, 7)),
            Some((Color::White, PieceType::Rook))
        );
        assert_eq!(
            after.board.piece_at(Position::new(6, 7)),
            Some((Color::White, PieceType::King))
        );
        assert!(!after.castling.kingside(Color::White));
        assert!(!after.castling.queenside(Color::White));
    }

    #[test]
    fn capturing_a_rook_on_its_home_square_revokes_that_right() {
        let state = from_fen("r3k3/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let after = state
            .apply(Color::White, Move::new(Position::new(0, 7), Position::new(0, 0)))
            .unwrap();
        assert!(!after.castling.queenside(Color::Black));
    }

    #[test]
    fn pawn_move_resets_half_turn_count() {
        let state = GameState::new();
        let after = state
            .apply(Color::White, Move::new(Position::new(4, 6), Position::new(4, 4)))
            .unwrap();
        assert_eq!(after.half_turn_count, 0);
        assert_eq!(after.full_turn_count, 1);
    }

    #[test]
    fn no_piece_at_source_is_an_error() {
        let state = GameState::new();
        let result = state.apply(Color::White, Move::new(Position::new(4, 4), Position::new(4, 3)));
        assert!(matches!(result, Err(UpdateError::NoPieceAtSource)));
    }
}
