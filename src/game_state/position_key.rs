//! Exact position keys for repetition tracking.
//!
//! A key packs the side to move and, for every square, empty or
//! `(owner, kind, endangered)` into 5 bits. Twelve squares share a `u64`
//! word, so three words hold the board and bit 60 of the first word holds
//! the side to move. Unlike a Zobrist hash the encoding is lossless, so two
//! keys are equal exactly when the positions are.

use serde::{Deserialize, Serialize};

use crate::game_state::game_state::GameState;
use crate::game_state::game_types::{Piece, Player, Square};

const BITS_PER_SQUARE: usize = 5;
const SQUARES_PER_WORD: usize = 12;
const SIDE_TO_MOVE_BIT: u64 = 1 << 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PositionKey([u64; 3]);

/// 0 for an empty square, otherwise `1..=28`.
#[inline]
fn square_code(piece: Option<Piece>) -> u64 {
    match piece {
        None => 0,
        Some(piece) => {
            let base = 1 + (piece.owner.index() * 7 + piece.kind.index()) as u64;
            if piece.endangered {
                base + 14
            } else {
                base
            }
        }
    }
}

/// Compute the key of the position currently held by `game_state`.
pub fn compute_position_key(game_state: &GameState) -> PositionKey {
    let mut words = [0u64; 3];

    for square in Square::all() {
        let index = square.index();
        let word = index / SQUARES_PER_WORD;
        let shift = (index % SQUARES_PER_WORD) * BITS_PER_SQUARE;
        words[word] |= square_code(game_state.piece_at(square)) << shift;
    }

    if game_state.active_player == Player::Black {
        words[0] |= SIDE_TO_MOVE_BIT;
    }

    PositionKey(words)
}

#[cfg(test)]
mod tests {
    use super::compute_position_key;
    use crate::game_state::game_state::{GameState, PieceSetup, PositionSetup};
    use crate::game_state::game_types::{PieceKind, Player};

    fn two_piece_setup(active: Player, endangered: bool) -> PositionSetup {
        PositionSetup {
            active_player: active,
            moves_without_event: None,
            pieces: vec![
                PieceSetup::new("c3", Player::White, PieceKind::Captain).with_endangered(endangered),
                PieceSetup::new("e5", Player::Black, PieceKind::Warden),
            ],
        }
    }

    #[test]
    fn starting_position_key_is_deterministic() {
        let a = GameState::new_game();
        let b = GameState::new_game();
        assert_eq!(compute_position_key(&a), compute_position_key(&b));
    }

    #[test]
    fn side_to_move_changes_key() {
        let w = GameState::from_setup(&two_piece_setup(Player::White, false));
        let b = GameState::from_setup(&two_piece_setup(Player::Black, false));
        assert_ne!(compute_position_key(&w), compute_position_key(&b));
    }

    #[test]
    fn endangered_flag_changes_key() {
        let calm = GameState::from_setup(&two_piece_setup(Player::White, false));
        let marked = GameState::from_setup(&two_piece_setup(Player::White, true));
        assert_ne!(compute_position_key(&calm), compute_position_key(&marked));
    }
}
