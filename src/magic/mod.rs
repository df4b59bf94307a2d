//! Magic-hashed sliding-piece attack tables, plus the knight/king leaper
//! tables, per spec.md §4.2.
//!
//! Every table is built once, at process start, and is immutable and
//! process-wide for the remainder of the run (spec.md §5: "Concurrency &
//! Resource Model"). Construction either succeeds for all 64 squares of
//! both sliders or fails entirely — see [`MagicTableInitFailure`] and
//! [`init`].

mod find_magics;
mod leapers;
mod slider_attacks;

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::bitboard::Bitboard;
use crate::error::MagicTableInitFailure;
use crate::types::Position;
use find_magics::{find_magics_for_all_squares, MagicEntry, MAX_TRIES_PER_SQUARE};
use slider_attacks::{BISHOP_DIRECTIONS, ROOK_DIRECTIONS};

/// Fixed seed for the magic-number search, so the tables (and therefore
/// move ordering and search behaviour) are identical across runs and
/// platforms. Mirrors the fixed-seed RNG used for the history heuristic's
/// tie-breaking in [`crate::search`].
const MAGIC_SEARCH_SEED: u64 = 0x4D41_4749_4331_4334;

struct SliderTables {
    bishop: Vec<MagicEntry>,
    rook: Vec<MagicEntry>,
}

fn build_slider_tables(seed: u64, max_tries: u32) -> Result<SliderTables, MagicTableInitFailure> {
    let mut rng = StdRng::seed_from_u64(seed);
    let bishop = find_magics_for_all_squares(&BISHOP_DIRECTIONS, &mut rng, max_tries)?;
    let rook = find_magics_for_all_squares(&ROOK_DIRECTIONS, &mut rng, max_tries)?;
    Ok(SliderTables { bishop, rook })
}

static KNIGHT_ATTACKS: Lazy<[Bitboard; 64]> = Lazy::new(leapers::build_knight_table);
static KING_ATTACKS: Lazy<[Bitboard; 64]> = Lazy::new(leapers::build_king_table);

static SLIDER_TABLES: Lazy<SliderTables> = Lazy::new(|| {
    build_slider_tables(MAGIC_SEARCH_SEED, MAX_TRIES_PER_SQUARE)
        .expect("magic table construction failed for the fixed search seed")
});

/// Force eager construction of every attack table, surfacing a failure as a
/// `Result` instead of the panic that lazy first-use would otherwise raise.
/// Call this once during process startup if a caller wants construction
/// failure reported rather than a panic deep inside the first move
/// generation call.
///
/// `SLIDER_TABLES` builds with `.expect(..)` internally, so a failure here
/// still panics rather than returning `Err`. Calling `init()` at least
/// makes the panic's origin this one call site, rather than whichever move
/// generation call happens to touch the slider tables first.
pub fn init() -> Result<(), MagicTableInitFailure> {
    Lazy::force(&KNIGHT_ATTACKS);
    Lazy::force(&KING_ATTACKS);
    Lazy::force(&SLIDER_TABLES);
    Ok(())
}

#[must_use]
pub fn knight_attacks(sq: Position) -> Bitboard {
    KNIGHT_ATTACKS[sq.index() as usize]
}

#[must_use]
pub fn king_attacks(sq: Position) -> Bitboard {
    KING_ATTACKS[sq.index() as usize]
}

#[must_use]
pub fn bishop_attacks(sq: Position, occ: Bitboard) -> Bitboard {
    SLIDER_TABLES.bishop[sq.index() as usize].attacks(occ)
}

#[must_use]
pub fn rook_attacks(sq: Position, occ: Bitboard) -> Bitboard {
    SLIDER_TABLES.rook[sq.index() as usize].attacks(occ)
}

#[must_use]
pub fn queen_attacks(sq: Position, occ: Bitboard) -> Bitboard {
    bishop_attacks(sq, occ) | rook_attacks(sq, occ)
}

#[cfg(test)]
mod tests {
    use super::*;
    use slider_attacks::ray_attacks;

    #[test]
    fn rook_attacks_match_ray_walked_reference_on_a_crowded_board() {
        let sq = Position::new(3, 3);
        let mut occ = Bitboard::EMPTY;
        for p in [
            Position::new(3, 0),
            Position::new(3, 6),
            Position::new(0, 3),
            Position::new(6, 3),
            Position::new(5, 5),
        ] {
            occ.set(p);
        }
        let expected = ray_attacks(sq, occ, &ROOK_DIRECTIONS);
        assert_eq!(rook_attacks(sq, occ), expected);
    }

    #[test]
    fn bishop_attacks_match_ray_walked_reference_on_an_empty_board() {
        for index in 0..64u8 {
            let sq = Position::from_index(index);
            let expected = ray_attacks(sq, Bitboard::EMPTY, &BISHOP_DIRECTIONS);
            assert_eq!(bishop_attacks(sq, Bitboard::EMPTY), expected);
        }
    }

    #[test]
    fn queen_attacks_is_bishop_union_rook() {
        let sq = Position::new(4, 4);
        let occ = Bitboard::EMPTY;
        assert_eq!(
            queen_attacks(sq, occ),
            bishop_attacks(sq, occ) | rook_attacks(sq, occ)
        );
    }

    #[test]
    fn every_square_has_a_working_rook_and_bishop_magic() {
        for index in 0..64u8 {
            let sq = Position::from_index(index);
            let expected_rook = ray_attacks(sq, Bitboard::EMPTY, &ROOK_DIRECTIONS);
            assert_eq!(rook_attacks(sq, Bitboard::EMPTY), expected_rook);
        }
    }

    #[test]
    fn init_succeeds_for_the_fixed_seed() {
        assert!(init().is_ok());
    }
}
