//! Move ordering for alpha-beta pruning.
//!
//! Captures of the most valuable piece first; ties go to the destination
//! closest to the board centre. The sort is stable, so generator order
//! decides among moves that are still equal.

use crate::game_state::game_state::GameState;
use crate::game_state::game_types::{Move, Square};
use crate::search::board_scoring::piece_value;

/// Value of the piece standing on the destination, 0 for quiet moves.
#[inline]
fn capture_value(game_state: &GameState, mv: Move) -> i32 {
    game_state
        .piece_at(mv.to)
        .map_or(0, |victim| piece_value(victim.kind))
}

/// Manhattan distance to the board centre (2.5, 2.5), doubled to stay integral.
#[inline]
fn doubled_center_distance(square: Square) -> i32 {
    (2 * i32::from(square.file()) - 5).abs() + (2 * i32::from(square.rank()) - 5).abs()
}

pub fn order_moves(game_state: &GameState, moves: &mut [Move]) {
    moves.sort_by_cached_key(|&mv| {
        (
            -capture_value(game_state, mv),
            doubled_center_distance(mv.to),
        )
    });
}
