//! Move generation: pseudo-legal generation per piece type, then a
//! king-safety filter (spec.md §4.3, component C3).

use crate::bitboard::{shift_files, shift_ranks, Bitboard};
use crate::magic;
use crate::types::{Color, Move, PieceType, Position, PROMOTION_PIECES};

use super::state::GameState;

fn forward_dy(color: Color) -> i32 {
    match color {
        Color::White => -1,
        Color::Black => 1,
        Color::Neutral => 0,
    }
}

fn shift_forward(bb: Bitboard, color: Color) -> Bitboard {
    Bitboard(shift_ranks(bb.0, forward_dy(color)))
}

fn shift_forward_diagonal(bb: Bitboard, color: Color, dx: i32) -> Bitboard {
    Bitboard(shift_ranks(shift_files(bb.0, dx), forward_dy(color)))
}

fn start_rank_mask(color: Color) -> Bitboard {
    use crate::bitboard::RANKS;
    match color {
        Color::White => Bitboard(RANKS[6]),
        Color::Black => Bitboard(RANKS[1]),
        Color::Neutral => Bitboard::EMPTY,
    }
}

fn promotion_rank(color: Color) -> u8 {
    match color {
        Color::White => 0,
        Color::Black => 7,
        Color::Neutral => unreachable!("Neutral never has pawns"),
    }
}

/// The square a pawn capture would land on if the most recent move was an
/// opponent pawn double push, per spec.md §4.3's en-passant rule. `None` if
/// there is no such move (including an empty history).
pub(crate) fn en_passant_target(state: &GameState, color: Color) -> Option<Position> {
    let last = state.move_history.back()?;
    if last.player != color.opposite() || last.piece_type != PieceType::Pawn {
        return None;
    }
    let dy = i32::from(last.destination.y) - i32::from(last.source.y);
    if dy.abs() != 2 {
        return None;
    }
    let mid_y = ((i32::from(last.source.y) + i32::from(last.destination.y)) / 2) as u8;
    Some(Position::new(last.destination.x, mid_y))
}

fn push_move_with_promotions(moves: &mut Vec<Move>, source: Position, destination: Position, color: Color) {
    if destination.y == promotion_rank(color) {
        for promotion in PROMOTION_PIECES {
            moves.push(Move::promoting(source, destination, promotion));
        }
    } else {
        moves.push(Move::new(source, destination));
    }
}

fn drain_destinations(
    moves: &mut Vec<Move>,
    mut destinations: Bitboard,
    source_of: impl Fn(Position) -> Position,
    color: Color,
) {
    while !destinations.is_empty() {
        let dest = destinations.pop_lsb();
        push_move_with_promotions(moves, source_of(dest), dest, color);
    }
}

fn pawn_moves(state: &GameState, color: Color) -> Vec<Move> {
    let mut moves = Vec::new();
    let pawns = state.board.bitboard(color, PieceType::Pawn);
    let occ_all = state.board.occupancy_all();
    let empty = !occ_all;
    let dy = forward_dy(color);

    let single_push = shift_forward(pawns, color) & empty;
    drain_destinations(
        &mut moves,
        single_push,
        |dest| Position::new(dest.x, (i32::from(dest.y) - dy) as u8),
        color,
    );

    let mid_rank = shift_forward(start_rank_mask(color), color);
    let double_push = shift_forward(single_push & mid_rank, color) & empty;
    drain_destinations(
        &mut moves,
        double_push,
        |dest| Position::new(dest.x, (i32::from(dest.y) - 2 * dy) as u8),
        color,
    );

    let opponent_occ = state.board.occupancy(color.opposite());
    let ep_bb = en_passant_target(state, color)
        .map(Bitboard::from_position)
        .unwrap_or(Bitboard::EMPTY);
    let capture_targets = opponent_occ | ep_bb;

    for &dx in &[-1, 1] {
        let caps = shift_forward_diagonal(pawns, color, dx) & capture_targets;
        drain_destinations(
            &mut moves,
            caps,
            move |dest| Position::new((i32::from(dest.x) - dx) as u8, (i32::from(dest.y) - dy) as u8),
            color,
        );
    }

    moves
}

fn knight_moves(state: &GameState, color: Color) -> Vec<Move> {
    let mut moves = Vec::new();
    let own = state.board.occupancy(color);
    let mut knights = state.board.bitboard(color, PieceType::Knight);
    while !knights.is_empty() {
        let src = knights.pop_lsb();
        let mut dests = magic::knight_attacks(src) & !own;
        while !dests.is_empty() {
            moves.push(Move::new(src, dests.pop_lsb()));
        }
    }
    moves
}

fn king_leaper_moves(state: &GameState, color: Color) -> Vec<Move> {
    let mut moves = Vec::new();
    let own = state.board.occupancy(color);
    let mut kings = state.board.bitboard(color, PieceType::King);
    while !kings.is_empty() {
        let src = kings.pop_lsb();
        let mut dests = magic::king_attacks(src) & !own;
        while !dests.is_empty() {
            moves.push(Move::new(src, dests.pop_lsb()));
        }
    }
    moves
}

fn slider_moves(state: &GameState, color: Color, piece: PieceType) -> Vec<Move> {
    let mut moves = Vec::new();
    let own = state.board.occupancy(color);
    let occ_all = state.board.occupancy_all();
    let mut pieces_bb = state.board.bitboard(color, piece);
    while !pieces_bb.is_empty() {
        let src = pieces_bb.pop_lsb();
        let attacks = match piece {
            PieceType::Bishop => magic::bishop_attacks(src, occ_all),
            PieceType::Rook => magic::rook_attacks(src, occ_all),
            PieceType::Queen => magic::queen_attacks(src, occ_all),
            _ => unreachable!("slider_moves only handles bishop/rook/queen"),
        };
        let mut dests = attacks & !own;
        while !dests.is_empty() {
            moves.push(Move::new(src, dests.pop_lsb()));
        }
    }
    moves
}

fn rank_clear(state: &GameState, rank: u8, files: &[u8]) -> bool {
    files
        .iter()
        .all(|&x| !state.board.is_occupied(Position::new(x, rank)))
}

fn castling_moves(state: &GameState, color: Color) -> Vec<Move> {
    let mut moves = Vec::new();
    if color == Color::Neutral {
        return moves;
    }
    let king_pos = state.king_position(color);
    let rank = king_pos.y;
    let opponent = color.opposite();

    if state.castling.kingside(color)
        && rank_clear(state, rank, &[5, 6])
        && !is_square_attacked(state, king_pos, opponent)
        && !is_square_attacked(state, Position::new(5, rank), opponent)
        && !is_square_attacked(state, Position::new(6, rank), opponent)
    {
        moves.push(Move::new(king_pos, Position::new(6, rank)));
    }

    if state.castling.queenside(color)
        && rank_clear(state, rank, &[1, 2, 3])
        && !is_square_attacked(state, king_pos, opponent)
        && !is_square_attacked(state, Position::new(3, rank), opponent)
        && !is_square_attacked(state, Position::new(2, rank), opponent)
    {
        moves.push(Move::new(king_pos, Position::new(2, rank)));
    }

    moves
}

/// Every pseudo-legal move for `color`: obeys piece movement/capture rules
/// and castling preconditions, but does not yet filter for king safety.
#[must_use]
pub fn pseudo_legal_moves(state: &GameState, color: Color) -> Vec<Move> {
    let mut moves = pawn_moves(state, color);
    moves.extend(knight_moves(state, color));
    moves.extend(slider_moves(state, color, PieceType::Bishop));
    moves.extend(slider_moves(state, color, PieceType::Rook));
    moves.extend(slider_moves(state, color, PieceType::Queen));
    moves.extend(king_leaper_moves(state, color));
    moves.extend(castling_moves(state, color));
    moves
}

/// `pseudo_legal_moves` filtered to those that do not leave `color`'s own
/// king in check (spec.md §4.3, "Legality filter").
#[must_use]
pub fn legal_moves(state: &GameState, color: Color) -> Vec<Move> {
    pseudo_legal_moves(state, color)
        .into_iter()
        .filter(|&mv| match state.apply(color, mv) {
            Ok(next) => !is_square_attacked(&next, next.king_position(color), color.opposite()),
            Err(_) => false,
        })
        .collect()
}

/// Whether any `by_color` piece attacks `pos`, computed directly from the
/// attack tables rather than by generating moves.
#[must_use]
pub fn is_square_attacked(state: &GameState, pos: Position, by_color: Color) -> bool {
    let board = &state.board;
    let occ_all = board.occupancy_all();

    if (magic::knight_attacks(pos) & board.bitboard(by_color, PieceType::Knight))
        .count()
        > 0
    {
        return true;
    }
    if (magic::king_attacks(pos) & board.bitboard(by_color, PieceType::King)).count() > 0 {
        return true;
    }
    let diagonal_attackers =
        board.bitboard(by_color, PieceType::Bishop) | board.bitboard(by_color, PieceType::Queen);
    if (magic::bishop_attacks(pos, occ_all) & diagonal_attackers).count() > 0 {
        return true;
    }
    let orthogonal_attackers =
        board.bitboard(by_color, PieceType::Rook) | board.bitboard(by_color, PieceType::Queen);
    if (magic::rook_attacks(pos, occ_all) & orthogonal_attackers).count() > 0 {
        return true;
    }

    let pawns = board.bitboard(by_color, PieceType::Pawn);
    let pawn_attacks = shift_forward_diagonal(pawns, by_color, -1) | shift_forward_diagonal(pawns, by_color, 1);
    pawn_attacks.has(pos)
}

#[must_use]
pub fn is_in_check(state: &GameState, color: Color) -> bool {
    is_square_attacked(state, state.king_position(color), color.opposite())
}

/// Whether `mv`, played by `color` in `state`, is a capture — including en
/// passant (spec.md §4.5, "Quiescence test").
#[must_use]
pub fn is_capture(state: &GameState, mv: Move) -> bool {
    if state.board.is_occupied(mv.destination) {
        return true;
    }
    matches!(state.board.piece_at(mv.source), Some((_, PieceType::Pawn))) && mv.source.x != mv.destination.x
}

/// Count leaf positions reached by playing out every legal move to `depth`
/// ply. Useful for validating move generation against known node counts.
#[must_use]
pub fn perft(state: &GameState, color: Color, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = legal_moves(state, color);
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .into_iter()
        .map(|mv| match state.apply(color, mv) {
            Ok(next) => perft(&next, color.opposite(), depth - 1),
            Err(_) => 0,
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_has_twenty_legal_moves_for_white() {
        let state = GameState::new();
        assert_eq!(legal_moves(&state, Color::White).len(), 20);
    }

    #[test]
    fn knight_in_the_corner_has_exactly_two_destinations() {
        let state = crate::board::fen::from_fen("4k2N/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let knight_square = Position::new(7, 0);
        let moves: Vec<Position> = legal_moves(&state, Color::White)
            .into_iter()
            .filter(|mv| mv.source == knight_square)
            .map(|mv| mv.destination)
            .collect();
        assert_eq!(moves.len(), 2);
        assert!(moves.contains(&Position::new(6, 2)));
        assert!(moves.contains(&Position::new(5, 1)));
    }

    #[test]
    fn castling_kingside_is_blocked_while_in_check() {
        let state =
            crate::board::fen::from_fen("4k3/4r3/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        let king_moves: Vec<Position> = legal_moves(&state, Color::White)
            .into_iter()
            .filter(|mv| mv.source == Position::new(4, 7))
            .map(|mv| mv.destination)
            .collect();
        assert!(!king_moves.contains(&Position::new(6, 7)));
        assert!(!king_moves.contains(&Position::new(2, 7)));
    }

    #[test]
    fn perft_one_matches_legal_move_count() {
        let state = GameState::new();
        assert_eq!(perft(&state, Color::White, 1), 20);
    }

    #[test]
    fn perft_two_from_the_start_position_is_four_hundred() {
        let state = GameState::new();
        assert_eq!(perft(&state, Color::White, 2), 400);
    }
}
