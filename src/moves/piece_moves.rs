//! Movement tables for every piece kind.
//!
//! Offsets are `(Δfile, Δrank)`. Step tables depend on the side because
//! "forward" is +1 rank for White and -1 for Black.

use crate::game_state::game_types::{PieceKind, Player};

pub type Delta = (i8, i8);

pub const ALL_DIRECTIONS: [Delta; 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

pub const ORTHOGONAL: [Delta; 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
pub const HORIZONTAL: [Delta; 2] = [(1, 0), (-1, 0)];
pub const DIAGONAL: [Delta; 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

pub const KNIGHT_LEAPS: [Delta; 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Single-square steps (capture in place, no further travel).
pub fn step_deltas(kind: PieceKind, player: Player) -> Vec<Delta> {
    let fwd = player.forward();
    match kind {
        PieceKind::Captain => vec![
            (-1, -1),
            (0, -1),
            (1, -1),
            (-1, 0),
            (1, 0),
            (-1, 1),
            (0, 1),
            (1, 1),
        ],
        PieceKind::Warden => vec![(0, fwd), (0, -fwd), (-1, 0), (1, 0), (-1, -fwd), (1, -fwd)],
        PieceKind::Blade => vec![(0, fwd), (-1, fwd), (1, fwd), (-1, -fwd), (1, -fwd)],
        PieceKind::Breaker => DIAGONAL.to_vec(),
        PieceKind::Knight | PieceKind::Rook | PieceKind::Skirmisher => Vec::new(),
    }
}

/// Directions walked until the board edge or the first occupied square.
pub const fn slide_directions(kind: PieceKind) -> &'static [Delta] {
    match kind {
        PieceKind::Rook | PieceKind::Breaker => &ORTHOGONAL,
        PieceKind::Skirmisher => &HORIZONTAL,
        PieceKind::Captain | PieceKind::Warden | PieceKind::Blade | PieceKind::Knight => &[],
    }
}

/// Jumps that ignore anything standing in between.
pub const fn leap_deltas(kind: PieceKind) -> &'static [Delta] {
    match kind {
        PieceKind::Knight => &KNIGHT_LEAPS,
        _ => &[],
    }
}

/// The Skirmisher's extra one-square step straight ahead.
pub const fn special_forward_step(kind: PieceKind, player: Player) -> Option<Delta> {
    match kind {
        PieceKind::Skirmisher => Some((0, player.forward())),
        _ => None,
    }
}
