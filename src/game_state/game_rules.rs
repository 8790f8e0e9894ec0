//! Rule constants.
//!
//! Board size, draw thresholds and the fixed starting formation used to
//! initialize a new game.

use crate::game_state::game_types::{PieceKind, Player};

pub const BOARD_SIZE: usize = 6;

/// Occurrences of one position that end the game as a draw.
pub const REPETITION_LIMIT: usize = 3;

/// Half-moves without capture or isolation death that end the game as a draw.
pub const NO_EVENT_LIMIT: u32 = 100;

/// Starting formation as `(file, rank, kind)` from White's point of view.
/// Black mirrors it across the middle of the board.
pub const STARTING_FORMATION: [(u8, u8, PieceKind); 9] = [
    (0, 0, PieceKind::Blade),
    (1, 0, PieceKind::Warden),
    (2, 0, PieceKind::Captain),
    (3, 0, PieceKind::Rook),
    (4, 0, PieceKind::Warden),
    (5, 0, PieceKind::Blade),
    (1, 1, PieceKind::Skirmisher),
    (3, 1, PieceKind::Knight),
    (5, 1, PieceKind::Skirmisher),
];

/// Rank of a formation entry for the given side.
#[inline]
pub const fn formation_rank(player: Player, rank: u8) -> u8 {
    match player {
        Player::White => rank,
        Player::Black => (BOARD_SIZE as u8 - 1) - rank,
    }
}
