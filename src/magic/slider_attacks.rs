//! Ray-walking attack generation for sliding pieces.
//!
//! These functions are the "slow but obviously correct" reference used only
//! while building the magic-hashed tables in [`crate::magic::find_magics`] —
//! the runtime query path never walks rays, it indexes straight into a
//! precomputed table (spec.md §4.2).

use crate::bitboard::Bitboard;
use crate::types::Position;

pub const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub const ROOK_DIRECTIONS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Every square reachable from `sq` walking in a straight line along
/// `(dx, dy)`, nearest first, stopping at the board edge.
fn ray_squares(sq: Position, dx: i32, dy: i32) -> Vec<Position> {
    let mut squares = Vec::new();
    let mut x = i32::from(sq.x) + dx;
    let mut y = i32::from(sq.y) + dy;
    while (0..8).contains(&x) && (0..8).contains(&y) {
        squares.push(Position::new(x as u8, y as u8));
        x += dx;
        y += dy;
    }
    squares
}

/// The blocker mask for a single ray: every square on the ray except the
/// last one. The final square always lies on the board's edge in that
/// direction, so whether it is occupied never changes which interior
/// squares block the slider — it is always reachable/attacked regardless.
fn ray_blocker_mask(sq: Position, dx: i32, dy: i32) -> Bitboard {
    let squares = ray_squares(sq, dx, dy);
    let mut bb = Bitboard::EMPTY;
    if squares.len() > 1 {
        for p in &squares[..squares.len() - 1] {
            bb.set(*p);
        }
    }
    bb
}

/// The relevant-occupancy mask for `sq` over the given direction set — the
/// union of each ray's blocker mask.
#[must_use]
pub fn blocker_mask(sq: Position, directions: &[(i32, i32); 4]) -> Bitboard {
    let mut bb = Bitboard::EMPTY;
    for &(dx, dy) in directions {
        bb |= ray_blocker_mask(sq, dx, dy);
    }
    bb
}

/// True attack set from `sq` given a full occupancy bitboard, computed by
/// walking each ray until (and including) the first blocker.
#[must_use]
pub fn ray_attacks(sq: Position, occ: Bitboard, directions: &[(i32, i32); 4]) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    for &(dx, dy) in directions {
        for p in ray_squares(sq, dx, dy) {
            attacks.set(p);
            if occ.has(p) {
                break;
            }
        }
    }
    attacks
}
