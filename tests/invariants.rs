//! Property-based invariants from spec.md §8: occupancy bookkeeping,
//! piece-list sync, legality, and FEN round-tripping, exercised over random
//! walks of legal moves the way `proptest` is used in the reference engine's
//! own `board/tests/proptest.rs`.

use negabit::board::GameState;
use negabit::types::Color;
use proptest::prelude::*;
use rand::prelude::*;

fn walk_strategy() -> impl Strategy<Value = (u64, usize)> {
    (any::<u64>(), 1..=40usize)
}

/// Occupancy invariants A–C (spec.md §3): every piece bitboard is a subset
/// of its color's occupancy, the two color-occupancy boards never overlap,
/// and their union is exactly `occupancy_all`.
fn assert_occupancy_invariants(state: &GameState) {
    use negabit::types::PieceType;

    let white = state.board.occupancy(Color::White);
    let black = state.board.occupancy(Color::Black);
    assert_eq!(white.0 & black.0, 0, "white/black occupancy overlap");
    assert_eq!(
        white.0 | black.0,
        state.board.occupancy_all().0,
        "occupancy_all is not the union of the two colors"
    );

    for color in [Color::White, Color::Black] {
        let mut union = 0u64;
        for piece in [
            PieceType::Pawn,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Rook,
            PieceType::Queen,
            PieceType::King,
        ] {
            union |= state.board.bitboard(color, piece).0;
        }
        assert_eq!(
            union,
            state.board.occupancy(color).0,
            "{color:?}'s piece boards don't add up to its occupancy"
        );
    }
}

/// The piece lists (used by `king_position` and search move ordering) agree
/// with the bitboards in both directions: same count, same squares.
fn assert_piece_lists_match_occupancy(state: &GameState) {
    for (color, pieces) in [
        (Color::White, &state.white_pieces),
        (Color::Black, &state.black_pieces),
    ] {
        assert_eq!(pieces.len() as u32, state.board.occupancy(color).count());
        for node in pieces {
            assert_eq!(
                state.board.piece_at(node.position),
                Some((color, node.piece))
            );
        }
    }
}

proptest! {
    /// Random legal-move walks never violate the occupancy/piece-list
    /// invariants, never let a side capture its own piece, and never leave
    /// the side that just moved in check.
    #[test]
    fn prop_random_walk_preserves_invariants((seed, num_moves) in walk_strategy()) {
        let mut state = GameState::new();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut player = Color::White;

        assert_occupancy_invariants(&state);
        assert_piece_lists_match_occupancy(&state);

        for _ in 0..num_moves {
            if state.winner.is_some() {
                break;
            }
            let moves = state.legal_moves(player);
            if moves.is_empty() {
                break;
            }

            for &mv in &moves {
                if let Some((color, _)) = state.board.piece_at(mv.destination) {
                    prop_assert_ne!(color, player, "legal move captures its own color's piece");
                }
            }

            let mv = moves[rng.gen_range(0..moves.len())];
            let next = state.apply(player, mv).expect("legal_moves only yields moves apply accepts");

            prop_assert!(
                !next.is_in_check(player),
                "legal move left the mover's own king in check"
            );

            assert_occupancy_invariants(&next);
            assert_piece_lists_match_occupancy(&next);

            player = player.opposite();
            state = next;
        }
    }

    /// FEN round-trips: parsing `state.to_fen()` back reproduces the same
    /// piece placement, side to move, castling rights, and move counters.
    #[test]
    fn prop_fen_roundtrip((seed, num_moves) in walk_strategy()) {
        let mut state = GameState::new();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut player = Color::White;

        for _ in 0..num_moves {
            if state.winner.is_some() {
                break;
            }
            let moves = state.legal_moves(player);
            if moves.is_empty() {
                break;
            }
            let mv = moves[rng.gen_range(0..moves.len())];
            state = state.apply(player, mv).unwrap();
            player = player.opposite();
        }

        let fen = state.to_fen();
        let restored = GameState::from_fen(&fen).unwrap();

        prop_assert_eq!(restored.to_fen(), fen);
        prop_assert_eq!(restored.next_turn, state.next_turn);
        prop_assert_eq!(restored.castling, state.castling);
        prop_assert_eq!(restored.half_turn_count, state.half_turn_count);
        prop_assert_eq!(restored.full_turn_count, state.full_turn_count);
        prop_assert_eq!(
            restored.board.occupancy_all().0,
            state.board.occupancy_all().0
        );
    }
}
