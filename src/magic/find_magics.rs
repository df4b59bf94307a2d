//! Randomized search for collision-free magic numbers (spec.md §4.2).
//!
//! For each square, repeatedly draw a sparse random `u64` and test it
//! against every blocker subset for that square's mask. A magic is accepted
//! once every subset maps to an index that either hasn't been used yet this
//! attempt or was already mapped to the identical attack set — the "epoch"
//! trick below avoids re-zeroing the whole table between attempts.

use rand::rngs::StdRng;
use rand::RngCore;

use super::slider_attacks::{blocker_mask, ray_attacks};
use crate::bitboard::Bitboard;
use crate::error::MagicTableInitFailure;
use crate::types::Position;

/// A square's magic-hashed attack table: the relevant-occupancy mask, the
/// magic multiplier, the right-shift that turns the product into a table
/// index, and the table itself.
#[derive(Clone, Debug)]
pub struct MagicEntry {
    mask: Bitboard,
    magic: u64,
    shift: u32,
    table: Vec<Bitboard>,
}

impl MagicEntry {
    fn index(&self, occ: Bitboard) -> usize {
        let relevant = occ.0 & self.mask.0;
        (relevant.wrapping_mul(self.magic) >> self.shift) as usize
    }

    /// Look up the attack set for this square given the full-board
    /// occupancy. O(1): mask, multiply, shift, index.
    #[must_use]
    pub fn attacks(&self, occ: Bitboard) -> Bitboard {
        self.table[self.index(occ)]
    }
}

/// Default search budget per square. The randomized search converges in a
/// handful of attempts in practice; this bound only exists so a broken RNG
/// seed fails loudly instead of looping forever.
pub const MAX_TRIES_PER_SQUARE: u32 = 1_000_000;

fn sparse_random(rng: &mut StdRng) -> u64 {
    // ANDing three draws together keeps roughly one bit in eight set, which
    // in practice yields far fewer destructive collisions than a uniform
    // random magic.
    rng.next_u64() & rng.next_u64() & rng.next_u64()
}

/// Every subset of `mask`'s set bits, via the carry-rippler trick. Visits
/// all `2^popcount(mask)` subsets, `Bitboard::EMPTY` included.
fn subsets_of(mask: Bitboard) -> Vec<Bitboard> {
    let mut subsets = Vec::with_capacity(1usize << mask.count());
    let mut subset = 0u64;
    loop {
        subsets.push(Bitboard(subset));
        subset = subset.wrapping_sub(mask.0) & mask.0;
        if subset == 0 {
            break;
        }
    }
    subsets
}

fn find_magic_for_square(
    sq: Position,
    directions: &[(i32, i32); 4],
    rng: &mut StdRng,
    max_tries: u32,
) -> Result<MagicEntry, MagicTableInitFailure> {
    let mask = blocker_mask(sq, directions);
    let bits = mask.count();
    let shift = 64 - bits;
    let table_size = 1usize << bits;

    let subsets = subsets_of(mask);
    let true_attacks: Vec<Bitboard> = subsets
        .iter()
        .map(|&occ| ray_attacks(sq, occ, directions))
        .collect();

    let mut table = vec![Bitboard::EMPTY; table_size];
    let mut epoch = vec![0u32; table_size];

    for attempt in 1..=max_tries {
        let magic = sparse_random(rng);
        let mut collision = false;

        for (occ, attacks) in subsets.iter().zip(true_attacks.iter()) {
            let index = (occ.0 & mask.0).wrapping_mul(magic) >> shift;
            let index = index as usize;
            if epoch[index] < attempt {
                epoch[index] = attempt;
                table[index] = *attacks;
            } else if table[index] != *attacks {
                collision = true;
                break;
            }
        }

        if !collision {
            return Ok(MagicEntry {
                mask,
                magic,
                shift,
                table,
            });
        }
    }

    Err(MagicTableInitFailure { square: sq.index() })
}

/// Find magic numbers for all 64 squares over the given direction set
/// (bishop or rook rays), seeded deterministically so table construction is
/// reproducible across runs.
pub fn find_magics_for_all_squares(
    directions: &[(i32, i32); 4],
    rng: &mut StdRng,
    max_tries: u32,
) -> Result<Vec<MagicEntry>, MagicTableInitFailure> {
    (0..64)
        .map(|index| find_magic_for_square(Position::from_index(index), directions, rng, max_tries))
        .collect()
}
