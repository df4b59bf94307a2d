//! FEN (Forsyth–Edwards Notation) parsing and serialization, bit-exact per
//! spec.md §6.

use crate::error::FenError;
use crate::types::{Color, PieceType, Position};

use super::movegen::en_passant_target;
use super::state::{CastlingRights, GameState, MoveHistoryNode};

fn parse_piece_placement(state: &mut GameState, field: &str) -> Result<(), FenError> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::TooManyRanks);
    }
    for (rank_idx, rank_str) in ranks.iter().enumerate() {
        let y = rank_idx as u8;
        let mut x: u8 = 0;
        for c in rank_str.chars() {
            if let Some(digit) = c.to_digit(10) {
                x += digit as u8;
            } else {
                let piece = PieceType::from_fen_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                let color = if c.is_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                if x >= 8 {
                    return Err(FenError::TooManyFiles {
                        rank: rank_idx,
                        files: x as usize + 1,
                    });
                }
                state.board.add_piece(color, piece, Position::new(x, y));
                x += 1;
            }
        }
        if x != 8 {
            return Err(FenError::TooManyFiles {
                rank: rank_idx,
                files: x as usize,
            });
        }
    }
    Ok(())
}

fn parse_castling(field: &str) -> Result<CastlingRights, FenError> {
    let mut rights = CastlingRights::none();
    if field == "-" {
        return Ok(rights);
    }
    for c in field.chars() {
        match c {
            'K' => rights.white_kingside = true,
            'Q' => rights.white_queenside = true,
            'k' => rights.black_kingside = true,
            'q' => rights.black_queenside = true,
            other => return Err(FenError::InvalidCastling { char: other }),
        }
    }
    Ok(rights)
}

fn parse_counter(field: &str) -> Result<u32, FenError> {
    field
        .parse()
        .map_err(|_| FenError::InvalidCounter { found: field.to_string() })
}

/// Build the synthetic history entry that makes an en-passant target parsed
/// from FEN visible to move generation (spec.md §6). The mover is whoever
/// just moved — the opposite of the side to move now.
fn inject_en_passant_history(state: &mut GameState, target: Position) {
    let mover = state.next_turn.opposite();
    let dy: i32 = match mover {
        Color::White => -1,
        Color::Black => 1,
        Color::Neutral => 0,
    };
    let destination = Position::new(target.x, (i32::from(target.y) + dy) as u8);
    let source = Position::new(target.x, (i32::from(target.y) - dy) as u8);
    state.move_history.push_back(MoveHistoryNode {
        source,
        destination,
        player: mover,
        piece_type: PieceType::Pawn,
    });
}

/// Parse a FEN string into a [`GameState`].
pub fn from_fen(fen: &str) -> Result<GameState, FenError> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    if parts.len() < 4 {
        return Err(FenError::TooFewParts { found: parts.len() });
    }

    let mut state = GameState::empty();
    parse_piece_placement(&mut state, parts[0])?;

    state.next_turn = match parts[1] {
        "w" => Color::White,
        "b" => Color::Black,
        other => {
            return Err(FenError::InvalidSideToMove {
                found: other.to_string(),
            })
        }
    };

    state.castling = parse_castling(parts[2])?;

    state.half_turn_count = parts.get(4).map(|s| parse_counter(s)).transpose()?.unwrap_or(0);
    state.full_turn_count = parts.get(5).map(|s| parse_counter(s)).transpose()?.unwrap_or(1);

    state.rebuild_piece_lists();

    if parts[3] != "-" {
        let target = Position::from_algebraic(parts[3]).ok_or_else(|| FenError::InvalidEnPassant {
            found: parts[3].to_string(),
        })?;
        inject_en_passant_history(&mut state, target);
    }

    Ok(state)
}

/// Serialize a [`GameState`] to FEN.
#[must_use]
pub fn to_fen(state: &GameState) -> String {
    let mut placement = String::new();
    for y in 0..8u8 {
        let mut empty_run = 0u32;
        for x in 0..8u8 {
            let pos = Position::new(x, y);
            if let Some((color, piece)) = state.board.piece_at(pos) {
                if empty_run > 0 {
                    placement.push_str(&empty_run.to_string());
                    empty_run = 0;
                }
                placement.push(piece.to_fen_char(color));
            } else {
                empty_run += 1;
            }
        }
        if empty_run > 0 {
            placement.push_str(&empty_run.to_string());
        }
        if y != 7 {
            placement.push('/');
        }
    }

    let side = match state.next_turn {
        Color::White => "w",
        Color::Black => "b",
        Color::Neutral => "-",
    };

    let mut castling = String::new();
    if state.castling.white_kingside {
        castling.push('K');
    }
    if state.castling.white_queenside {
        castling.push('Q');
    }
    if state.castling.black_kingside {
        castling.push('k');
    }
    if state.castling.black_queenside {
        castling.push('q');
    }
    if castling.is_empty() {
        castling.push('-');
    }

    let en_passant = en_passant_target(state, state.next_turn)
        .map(|p| p.to_string())
        .unwrap_or_else(|| "-".to_string());

    format!(
        "{placement} {side} {castling} {en_passant} {} {}",
        state.half_turn_count, state.full_turn_count
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_round_trips() {
        const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        let state = from_fen(START).unwrap();
        assert_eq!(to_fen(&state), START);
    }

    #[test]
    fn new_matches_the_canonical_starting_fen() {
        let state = GameState::new();
        assert_eq!(
            to_fen(&state),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
        );
    }

    #[test]
    fn too_few_fields_is_an_error() {
        assert_eq!(from_fen("8/8/8/8/8/8/8/8"), Err(FenError::TooFewParts { found: 1 }));
    }

    #[test]
    fn invalid_piece_letter_is_an_error() {
        let fen = "rnbqkbnz/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        assert!(matches!(from_fen(fen), Err(FenError::InvalidPiece { char: 'z' })));
    }

    #[test]
    fn en_passant_square_round_trips_after_a_double_push() {
        let state = GameState::new();
        let after_e4 = state
            .apply(Color::White, crate::types::Move::new(Position::new(4, 6), Position::new(4, 4)))
            .unwrap();
        let fen = to_fen(&after_e4);
        assert!(fen.contains(" e3 "));
        let reparsed = from_fen(&fen).unwrap();
        assert_eq!(to_fen(&reparsed), fen);
    }
}
