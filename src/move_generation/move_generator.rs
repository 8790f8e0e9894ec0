//! Legal move generation.
//!
//! Destinations are recomputed from scratch on every call. Order is stable:
//! steps, the Skirmisher's forward step, slides, then leaps, each in table
//! order; pieces are visited file-major.

use crate::game_state::game_state::GameState;
use crate::game_state::game_types::{Move, Piece, Player, Square};
use crate::moves::piece_moves::{leap_deltas, slide_directions, special_forward_step, step_deltas};

/// Whether `piece` may end a move on `target` (empty or enemy-occupied).
#[inline]
fn can_land(game_state: &GameState, piece: Piece, target: Square) -> bool {
    game_state
        .piece_at(target)
        .map_or(true, |occupant| occupant.owner != piece.owner)
}

/// Legal destination squares for the piece on `square`; empty if none.
pub fn legal_destinations(game_state: &GameState, square: Square) -> Vec<Square> {
    let Some(piece) = game_state.piece_at(square) else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(16);

    for (df, dr) in step_deltas(piece.kind, piece.owner) {
        if let Some(target) = square.offset(df, dr) {
            if can_land(game_state, piece, target) {
                out.push(target);
            }
        }
    }

    if let Some((df, dr)) = special_forward_step(piece.kind, piece.owner) {
        if let Some(target) = square.offset(df, dr) {
            if can_land(game_state, piece, target) {
                out.push(target);
            }
        }
    }

    for &(df, dr) in slide_directions(piece.kind) {
        let mut cursor = square.offset(df, dr);
        while let Some(target) = cursor {
            match game_state.piece_at(target) {
                None => out.push(target),
                Some(occupant) => {
                    if occupant.owner != piece.owner {
                        out.push(target);
                    }
                    break;
                }
            }
            cursor = target.offset(df, dr);
        }
    }

    for &(df, dr) in leap_deltas(piece.kind) {
        if let Some(target) = square.offset(df, dr) {
            if can_land(game_state, piece, target) {
                out.push(target);
            }
        }
    }

    out
}

/// Every legal move of `player`.
pub fn all_legal_moves(game_state: &GameState, player: Player) -> Vec<Move> {
    let mut moves = Vec::with_capacity(48);
    for (from, _) in game_state.pieces(player) {
        moves.extend(
            legal_destinations(game_state, from)
                .into_iter()
                .map(|to| Move::new(from, to)),
        );
    }
    moves
}

/// Cheaper than `all_legal_moves(..).is_empty()`: stops at the first piece
/// with any legal destination.
pub fn has_legal_move(game_state: &GameState, player: Player) -> bool {
    game_state
        .pieces(player)
        .into_iter()
        .any(|(from, _)| !legal_destinations(game_state, from).is_empty())
}

impl GameState {
    pub fn legal_destinations(&self, square: Square) -> Vec<Square> {
        legal_destinations(self, square)
    }

    pub fn all_legal_moves(&self, player: Player) -> Vec<Move> {
        all_legal_moves(self, player)
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        legal_destinations(self, mv.from).contains(&mv.to)
    }
}
