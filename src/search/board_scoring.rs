//! Pluggable board evaluation interfaces and baseline implementations.
//!
//! Search remains modular by delegating static position scoring to this trait,
//! allowing alternate heuristics to be swapped without altering search code.
//! Scores are always from White's perspective: positive favours White.

use crate::game_state::game_rules::BOARD_SIZE;
use crate::game_state::game_state::GameState;
use crate::game_state::game_types::*;
use crate::move_generation::isolation::friendly_neighbors;
use crate::moves::piece_moves::ALL_DIRECTIONS;

const NEIGHBOR_BONUS: i32 = 25;
const CENTRAL_RANK_BONUS: i32 = 15;
const SUPPORTED_ADVANCE_BONUS: i32 = 20;
const SKIRMISHER_ADVANCE_WEIGHT: i32 = 40;
const SKIRMISHER_FLANK_BONUS: i32 = 80;
const SINGLE_GROUP_BONUS: i32 = 50;
const SPLIT_GROUP_PENALTY: i32 = 40;

pub trait BoardScorer: Send + Sync {
    /// Score from White's perspective.
    fn score(&self, game_state: &GameState) -> i32;
}

#[inline]
pub const fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Skirmisher => 150,
        PieceKind::Blade => 280,
        PieceKind::Warden => 320,
        PieceKind::Captain => 380,
        PieceKind::Knight => 450,
        PieceKind::Rook => 500,
        PieceKind::Breaker => 750,
    }
}

/// Ranks advanced toward the enemy side, `0..=5`.
#[inline]
fn advancement(player: Player, square: Square) -> i32 {
    match player {
        Player::White => i32::from(square.rank()),
        Player::Black => (BOARD_SIZE as i32 - 1) - i32::from(square.rank()),
    }
}

/// Material only.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl BoardScorer for MaterialScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        Square::all()
            .filter_map(|square| game_state.piece_at(square))
            .map(|piece| piece.owner.sign() * piece_value(piece.kind))
            .sum()
    }
}

/// Full heuristic: material, endangerment, cohesion, advancement, Skirmisher
/// pressure and group connectivity.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardScorer;

impl StandardScorer {
    fn piece_score(game_state: &GameState, square: Square, piece: Piece) -> i32 {
        let value = piece_value(piece.kind);
        let mut score = value;

        if piece.endangered {
            score -= value * 2 / 5;
        }

        let neighbors = friendly_neighbors(game_state, square, piece.owner) as i32;
        score += neighbors * NEIGHBOR_BONUS;

        if (2..=3).contains(&square.rank()) {
            score += CENTRAL_RANK_BONUS;
        }

        let advance = advancement(piece.owner, square);
        if advance >= 3 && neighbors > 0 {
            score += SUPPORTED_ADVANCE_BONUS;
        }

        if piece.kind == PieceKind::Skirmisher {
            score += advance * SKIRMISHER_ADVANCE_WEIGHT;

            let is_enemy = |target: Option<Square>| {
                target
                    .and_then(|s| game_state.piece_at(s))
                    .is_some_and(|other| other.owner != piece.owner)
            };
            for df in [-1, 1] {
                if is_enemy(square.offset(df, 0)) {
                    score += SKIRMISHER_FLANK_BONUS;
                }
            }
            if is_enemy(square.offset(0, piece.owner.forward())) {
                score += SKIRMISHER_FLANK_BONUS;
            }
        }

        score
    }

    fn group_score(game_state: &GameState, player: Player) -> i32 {
        let groups = count_groups(game_state, player) as i32;
        if groups <= 1 {
            SINGLE_GROUP_BONUS
        } else {
            -(groups - 1) * SPLIT_GROUP_PENALTY
        }
    }
}

impl BoardScorer for StandardScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        let mut score = 0i32;

        for square in Square::all() {
            if let Some(piece) = game_state.piece_at(square) {
                score += piece.owner.sign() * Self::piece_score(game_state, square, piece);
            }
        }

        for player in [Player::White, Player::Black] {
            score += player.sign() * Self::group_score(game_state, player);
        }

        score
    }
}

/// Number of 8-connected components formed by `player`'s pieces.
pub fn count_groups(game_state: &GameState, player: Player) -> usize {
    let mut visited = [false; BOARD_SIZE * BOARD_SIZE];
    let mut groups = 0usize;
    let mut stack = Vec::with_capacity(BOARD_SIZE * BOARD_SIZE);

    for (start, _) in game_state.pieces(player) {
        if visited[start.index()] {
            continue;
        }

        groups += 1;
        visited[start.index()] = true;
        stack.push(start);

        while let Some(current) = stack.pop() {
            for &(df, dr) in &ALL_DIRECTIONS {
                let Some(near) = current.offset(df, dr) else {
                    continue;
                };
                if visited[near.index()] {
                    continue;
                }
                if matches!(game_state.piece_at(near), Some(p) if p.owner == player) {
                    visited[near.index()] = true;
                    stack.push(near);
                }
            }
        }
    }

    groups
}
