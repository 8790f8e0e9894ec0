//! Isolation rules.
//!
//! A piece with no friendly piece on any of its 8 neighbouring squares is
//! isolated. After each move the mover's side first resolves pieces that
//! were already endangered (still isolated: they die together; otherwise
//! the mark is cleared), then marks the pieces that are isolated now. A side
//! with at most one piece is exempt from both steps.

use crate::game_state::game_state::GameState;
use crate::game_state::game_types::{Player, Square};
use crate::move_generation::move_execution::Death;
use crate::moves::piece_moves::ALL_DIRECTIONS;

/// Number of pieces of `player` on the 8 squares around `square`.
pub fn friendly_neighbors(game_state: &GameState, square: Square, player: Player) -> usize {
    ALL_DIRECTIONS
        .iter()
        .filter_map(|&(df, dr)| square.offset(df, dr))
        .filter(|&near| matches!(game_state.piece_at(near), Some(p) if p.owner == player))
        .count()
}

#[inline]
pub fn is_isolated(game_state: &GameState, square: Square, player: Player) -> bool {
    friendly_neighbors(game_state, square, player) == 0
}

/// Clear every endangered flag of `player` when the last-man exception applies.
/// Returns true if it applied.
fn apply_last_man_exception(game_state: &mut GameState, player: Player) -> bool {
    let own = game_state.pieces(player);
    if own.len() > 1 {
        return false;
    }
    for (square, _) in own {
        if let Some(piece) = game_state.piece_at_mut(square) {
            piece.endangered = false;
        }
    }
    true
}

/// Kill or release the pieces of `player` that were endangered before this move.
///
/// Every isolation test runs before any piece is removed.
pub fn resolve_endangered(game_state: &mut GameState, player: Player) -> Vec<Death> {
    if apply_last_man_exception(game_state, player) {
        return Vec::new();
    }

    let mut deaths = Vec::new();
    let mut released = Vec::new();
    for (square, piece) in game_state.pieces(player) {
        if !piece.endangered {
            continue;
        }
        if is_isolated(game_state, square, player) {
            deaths.push(Death {
                square,
                kind: piece.kind,
            });
        } else {
            released.push(square);
        }
    }

    for square in released {
        if let Some(piece) = game_state.piece_at_mut(square) {
            piece.endangered = false;
        }
    }

    for death in &deaths {
        if let Some(piece) = game_state.take_piece(death.square) {
            game_state.record_loss(piece);
        }
    }

    deaths
}

/// Recompute the endangered flag of every remaining piece of `player`.
/// Returns the squares that were not marked before.
pub fn mark_endangered(game_state: &mut GameState, player: Player) -> Vec<Square> {
    if apply_last_man_exception(game_state, player) {
        return Vec::new();
    }

    let mut newly_marked = Vec::new();
    for (square, piece) in game_state.pieces(player) {
        let isolated = is_isolated(game_state, square, player);
        if isolated && !piece.endangered {
            newly_marked.push(square);
        }
        if let Some(cell) = game_state.piece_at_mut(square) {
            cell.endangered = isolated;
        }
    }

    newly_marked
}
