//! Depth-limited minimax with alpha-beta pruning.
//!
//! The search explores a private clone of the caller's state: each move is
//! applied with `explore_move` and undone by restoring a search snapshot.
//! Every root move is searched with a full window so that scores are exact;
//! all root moves sharing the best score are collected and one is picked
//! with the caller's random source.

use std::time::{Duration, Instant};

use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::debug;

use crate::game_state::game_state::GameState;
use crate::game_state::game_types::{Move, Outcome, Player};
use crate::move_generation::move_generator::all_legal_moves;
use crate::search::board_scoring::{BoardScorer, StandardScorer};
use crate::search::move_ordering::order_moves;

pub const WIN_SCORE: i32 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies to look ahead; values below 1 are treated as 1.
    pub depth: u8,
    /// Optional budget, checked between root moves only.
    pub movetime_ms: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            movetime_ms: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub best_score: i32,
    /// Root moves that share `best_score`, in search order.
    pub tied_moves: Vec<Move>,
    pub depth: u8,
    pub nodes: u64,
    pub root_moves_searched: usize,
    pub elapsed_ms: u64,
}

/// Pick a move for the side to move, or `None` when it has no legal move
/// (or the game is already over).
pub fn find_best_move<R: Rng + ?Sized>(
    game_state: &GameState,
    depth: u8,
    rng: &mut R,
) -> Option<Move> {
    let config = SearchConfig {
        depth,
        movetime_ms: None,
    };
    search_best_move(game_state, &StandardScorer, config, rng).best_move
}

pub fn search_best_move<S: BoardScorer, R: Rng + ?Sized>(
    game_state: &GameState,
    scorer: &S,
    config: SearchConfig,
    rng: &mut R,
) -> SearchResult {
    let started = Instant::now();
    let deadline = config
        .movetime_ms
        .map(|ms| started + Duration::from_millis(ms));
    let depth = config.depth.max(1);

    let mut result = SearchResult {
        depth,
        ..SearchResult::default()
    };

    if game_state.game_over {
        return result;
    }

    let mut sandbox = game_state.clone();
    let mut moves = all_legal_moves(&sandbox, sandbox.active_player);
    if moves.is_empty() {
        return result;
    }
    order_moves(&sandbox, &mut moves);

    let maximizing = sandbox.active_player == Player::White;
    let mut best_value = if maximizing { i32::MIN } else { i32::MAX };
    let mut best_moves = Vec::new();

    for mv in moves {
        if result.root_moves_searched > 0 && deadline.is_some_and(|d| Instant::now() >= d) {
            break;
        }

        let saved = sandbox.save_search_snapshot();
        sandbox.explore_move(mv);
        let value = minimax(
            &mut sandbox,
            scorer,
            depth - 1,
            i32::MIN,
            i32::MAX,
            !maximizing,
            &mut result.nodes,
        );
        sandbox.restore_search_snapshot(saved);
        result.root_moves_searched += 1;

        if (maximizing && value > best_value) || (!maximizing && value < best_value) {
            best_value = value;
            best_moves.clear();
            best_moves.push(mv);
        } else if value == best_value {
            best_moves.push(mv);
        }
    }

    result.best_score = best_value;
    result.best_move = best_moves.choose(rng).copied();
    result.tied_moves = best_moves;
    result.elapsed_ms = started.elapsed().as_millis() as u64;

    debug!(
        depth,
        nodes = result.nodes,
        score = result.best_score,
        ties = result.tied_moves.len(),
        elapsed_ms = result.elapsed_ms,
        "search finished"
    );

    result
}

fn terminal_score(game_state: &GameState, depth: u8) -> i32 {
    match game_state.winner {
        Some(Outcome::Win(Player::White)) => WIN_SCORE + i32::from(depth),
        Some(Outcome::Win(Player::Black)) => -WIN_SCORE - i32::from(depth),
        Some(Outcome::Draw) | None => 0,
    }
}

fn minimax<S: BoardScorer>(
    game_state: &mut GameState,
    scorer: &S,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    nodes: &mut u64,
) -> i32 {
    *nodes += 1;

    if game_state.game_over {
        return terminal_score(game_state, depth);
    }
    if depth == 0 {
        return scorer.score(game_state);
    }

    let mut moves = all_legal_moves(game_state, game_state.active_player);
    if moves.is_empty() {
        return if maximizing { -WIN_SCORE } else { WIN_SCORE };
    }
    order_moves(game_state, &mut moves);

    let mut best = if maximizing { i32::MIN } else { i32::MAX };
    for mv in moves {
        let saved = game_state.save_search_snapshot();
        game_state.explore_move(mv);
        let value = minimax(game_state, scorer, depth - 1, alpha, beta, !maximizing, nodes);
        game_state.restore_search_snapshot(saved);

        if maximizing {
            best = best.max(value);
            alpha = alpha.max(value);
        } else {
            best = best.min(value);
            beta = beta.min(value);
        }
        if beta <= alpha {
            break;
        }
    }

    best
}
