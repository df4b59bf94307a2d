//! The board's raw piece placement: twelve per-color-per-piece bitboards
//! plus their derived occupancy summaries (spec.md §4.1, component C1).

use crate::bitboard::Bitboard;
use crate::types::{Color, PieceType, Position};

/// Twelve bitboards — one per `(color, piece type)` pair — and the derived
/// per-color and combined occupancy summaries kept in step with them.
///
/// The derived fields are redundant with the twelve piece boards (they can
/// always be recomputed by OR-ing every piece board together), but every
/// query used by move generation wants them directly, so they're maintained
/// incrementally on every mutation rather than recomputed per call.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BitboardSet {
    pieces: [[Bitboard; 6]; 2],
    occupancy: [Bitboard; 2],
    occupancy_all: Bitboard,
}

impl Default for BitboardSet {
    fn default() -> Self {
        Self::new()
    }
}

impl BitboardSet {
    #[must_use]
    pub fn new() -> Self {
        BitboardSet {
            pieces: [[Bitboard::EMPTY; 6]; 2],
            occupancy: [Bitboard::EMPTY; 2],
            occupancy_all: Bitboard::EMPTY,
        }
    }

    /// The bitboard for one `(color, piece type)` pair.
    #[must_use]
    pub fn bitboard(&self, color: Color, piece: PieceType) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    /// Every square occupied by `color`, of any piece type.
    #[must_use]
    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.occupancy[color.index()]
    }

    /// Every occupied square, either color.
    #[must_use]
    pub fn occupancy_all(&self) -> Bitboard {
        self.occupancy_all
    }

    #[must_use]
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.occupancy_all.has(pos)
    }

    /// The piece occupying `pos`, if any.
    #[must_use]
    pub fn piece_at(&self, pos: Position) -> Option<(Color, PieceType)> {
        if !self.is_occupied(pos) {
            return None;
        }
        for color in [Color::White, Color::Black] {
            for piece in [
                PieceType::Pawn,
                PieceType::Knight,
                PieceType::Bishop,
                PieceType::Rook,
                PieceType::Queen,
                PieceType::King,
            ] {
                if self.bitboard(color, piece).has(pos) {
                    return Some((color, piece));
                }
            }
        }
        unreachable!("occupancy_all set but no piece board contains {pos:?}");
    }

    /// Place `piece` of `color` on `pos`, updating the derived occupancy
    /// boards. Does not check whether `pos` is already occupied — callers
    /// clear a square first if they mean to replace its occupant.
    pub fn add_piece(&mut self, color: Color, piece: PieceType, pos: Position) {
        self.pieces[color.index()][piece.index()].set(pos);
        self.occupancy[color.index()].set(pos);
        self.occupancy_all.set(pos);
    }

    /// Remove whatever piece occupies `pos`, if any, from every bitboard
    /// that could contain it.
    pub fn clear_pos(&mut self, pos: Position) {
        if let Some((color, piece)) = self.piece_at(pos) {
            self.pieces[color.index()][piece.index()].clear(pos);
            self.occupancy[color.index()].clear(pos);
            self.occupancy_all.clear(pos);
        }
    }

    /// Reset to an empty board.
    pub fn clear(&mut self) {
        *self = BitboardSet::new();
    }

    /// Populate with the standard chess starting position.
    pub fn populate_standard(&mut self) {
        self.clear();
        const BACK_RANK: [PieceType; 8] = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];
        for (x, piece) in BACK_RANK.into_iter().enumerate() {
            self.add_piece(Color::Black, piece, Position::new(x as u8, 0));
            self.add_piece(Color::White, piece, Position::new(x as u8, 7));
            self.add_piece(Color::Black, PieceType::Pawn, Position::new(x as u8, 1));
            self.add_piece(Color::White, PieceType::Pawn, Position::new(x as u8, 6));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_position_has_sixteen_pieces_per_side() {
        let mut set = BitboardSet::new();
        set.populate_standard();
        assert_eq!(set.occupancy(Color::White).count(), 16);
        assert_eq!(set.occupancy(Color::Black).count(), 16);
        assert_eq!(set.occupancy_all().count(), 32);
    }

    #[test]
    fn piece_at_reflects_the_back_rank() {
        let mut set = BitboardSet::new();
        set.populate_standard();
        assert_eq!(
            set.piece_at(Position::new(4, 7)),
            Some((Color::White, PieceType::King))
        );
        assert_eq!(
            set.piece_at(Position::new(0, 0)),
            Some((Color::Black, PieceType::Rook))
        );
        assert_eq!(set.piece_at(Position::new(4, 4)), None);
    }

    #[test]
    fn add_then_clear_restores_emptiness() {
        let mut set = BitboardSet::new();
        let pos = Position::new(3, 3);
        set.add_piece(Color::White, PieceType::Queen, pos);
        assert!(set.is_occupied(pos));
        set.clear_pos(pos);
        assert!(!set.is_occupied(pos));
        assert_eq!(set.occupancy_all().count(), 0);
    }

    #[test]
    fn add_piece_replacing_without_clearing_leaves_both_boards_set() {
        let mut set = BitboardSet::new();
        let pos = Position::new(3, 3);
        set.add_piece(Color::White, PieceType::Queen, pos);
        set.add_piece(Color::Black, PieceType::Rook, pos);
        // occupancy_all still has exactly one bit set, but two piece boards
        // disagree about who's there — callers must clear_pos first.
        assert_eq!(set.occupancy_all().count(), 1);
        assert!(set.bitboard(Color::White, PieceType::Queen).has(pos));
        assert!(set.bitboard(Color::Black, PieceType::Rook).has(pos));
    }
}
