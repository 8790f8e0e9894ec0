//! Minimal head-to-head engine match harness for local testing.
//!
//! Runs two `Engine` implementations against each other with an optional
//! seeded random opening prefix, and aggregates series statistics.

use chrono::{DateTime, Utc};
use rand::prelude::IndexedRandom;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Instant;
use tracing::{debug, info};

use crate::engines::engine_trait::{Engine, GoParams};
use crate::errors::GameResult;
use crate::game_state::game_state::GameState;
use crate::game_state::game_types::{Outcome, Player, Termination};
use crate::utils::notation::move_notation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    WhiteWin(Termination),
    BlackWin(Termination),
    Draw(Termination),
    DrawMaxPlies,
}

impl MatchOutcome {
    fn from_game(game_state: &GameState) -> Option<Self> {
        let termination = game_state.termination?;
        match game_state.winner? {
            Outcome::Win(Player::White) => Some(Self::WhiteWin(termination)),
            Outcome::Win(Player::Black) => Some(Self::BlackWin(termination)),
            Outcome::Draw => Some(Self::Draw(termination)),
        }
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            Self::WhiteWin(_) => Some(Player::White),
            Self::BlackWin(_) => Some(Player::Black),
            Self::Draw(_) | Self::DrawMaxPlies => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MatchConfig {
    pub max_plies: u16,
    pub opening_min_plies: u8,
    pub opening_max_plies: u8,
    pub go_params: GoParams,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_plies: 300,
            opening_min_plies: 0,
            opening_max_plies: 4,
            go_params: GoParams::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub started_at: DateTime<Utc>,
    pub outcome: MatchOutcome,
    pub final_state: GameState,
    pub opening_moves: Vec<String>,
    pub played_moves: Vec<String>,
    pub white_move_count: u32,
    pub black_move_count: u32,
    pub white_total_time_ns: u128,
    pub black_total_time_ns: u128,
}

impl MatchResult {
    pub fn plies(&self) -> usize {
        self.opening_moves.len() + self.played_moves.len()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MatchSeriesConfig {
    pub games: u16,
    pub base_seed: u64,
    pub per_game: MatchConfig,
}

impl Default for MatchSeriesConfig {
    fn default() -> Self {
        Self {
            games: 4,
            base_seed: 0,
            per_game: MatchConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchSeriesStats {
    pub games: u16,
    pub player1_wins: u16,
    pub player2_wins: u16,
    pub draws: u16,
    pub outcomes: Vec<MatchOutcome>,
    pub player1_moves: u32,
    pub player2_moves: u32,
    pub player1_total_time_ns: u128,
    pub player2_total_time_ns: u128,
}

impl MatchSeriesStats {
    fn avg_ms(total_ns: u128, moves: u32) -> f64 {
        if moves == 0 {
            0.0
        } else {
            total_ns as f64 / f64::from(moves) / 1_000_000.0
        }
    }

    pub fn report(&self) -> String {
        format!(
            "games={} player1_wins={} player2_wins={} draws={} p1_avg_ms={:.3} p2_avg_ms={:.3}",
            self.games,
            self.player1_wins,
            self.player2_wins,
            self.draws,
            Self::avg_ms(self.player1_total_time_ns, self.player1_moves),
            Self::avg_ms(self.player2_total_time_ns, self.player2_moves),
        )
    }
}

/// Play a single seeded engine-vs-engine match from the starting formation.
///
/// `engine_white` is White, `engine_black` is Black.
pub fn play_engine_match(
    engine_white: &mut dyn Engine,
    engine_black: &mut dyn Engine,
    seed: u64,
    config: MatchConfig,
) -> GameResult<MatchResult> {
    play_match_internal(
        GameState::new_game(),
        engine_white,
        engine_black,
        seed,
        config,
        true,
    )
}

/// Play a match from a caller-provided state, without a random opening.
pub fn play_engine_match_from_state(
    engine_white: &mut dyn Engine,
    engine_black: &mut dyn Engine,
    start_state: GameState,
    config: MatchConfig,
) -> GameResult<MatchResult> {
    play_match_internal(start_state, engine_white, engine_black, 0, config, false)
}

fn apply_seeded_random_opening(
    state: &mut GameState,
    seed: u64,
    min_plies: u8,
    max_plies: u8,
) -> GameResult<Vec<String>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let plies = rng.random_range(min_plies..=max_plies.max(min_plies));
    let mut notations = Vec::with_capacity(usize::from(plies));

    for _ in 0..plies {
        if state.game_over {
            break;
        }
        let legal = state.all_legal_moves(state.active_player);
        let Some(&mv) = legal.choose(&mut rng) else {
            break;
        };
        let record = state.execute_move(mv)?;
        notations.push(move_notation(&record));
    }

    Ok(notations)
}

fn play_match_internal(
    mut state: GameState,
    engine_white: &mut dyn Engine,
    engine_black: &mut dyn Engine,
    seed: u64,
    config: MatchConfig,
    apply_random_opening: bool,
) -> GameResult<MatchResult> {
    let started_at = Utc::now();
    engine_white.new_game();
    engine_black.new_game();

    let opening_moves = if apply_random_opening {
        apply_seeded_random_opening(
            &mut state,
            seed,
            config.opening_min_plies,
            config.opening_max_plies,
        )?
    } else {
        Vec::new()
    };

    let mut result = MatchResult {
        started_at,
        outcome: MatchOutcome::DrawMaxPlies,
        final_state: GameState::default(),
        opening_moves,
        played_moves: Vec::new(),
        white_move_count: 0,
        black_move_count: 0,
        white_total_time_ns: 0,
        black_total_time_ns: 0,
    };

    for _ in 0..config.max_plies {
        if let Some(outcome) = MatchOutcome::from_game(&state) {
            result.outcome = outcome;
            break;
        }

        let mover = state.active_player;
        if state.all_legal_moves(mover).is_empty() {
            // Only reachable from a loaded position: the side that cannot
            // move loses, as after a stalemating move.
            result.outcome = match mover {
                Player::White => MatchOutcome::BlackWin(Termination::Stalemate),
                Player::Black => MatchOutcome::WhiteWin(Termination::Stalemate),
            };
            break;
        }

        let started = Instant::now();
        let out = match mover {
            Player::White => engine_white.choose_move(&state, &config.go_params)?,
            Player::Black => engine_black.choose_move(&state, &config.go_params)?,
        };
        let elapsed_ns = started.elapsed().as_nanos();

        match mover {
            Player::White => {
                result.white_move_count = result.white_move_count.saturating_add(1);
                result.white_total_time_ns = result.white_total_time_ns.saturating_add(elapsed_ns);
            }
            Player::Black => {
                result.black_move_count = result.black_move_count.saturating_add(1);
                result.black_total_time_ns = result.black_total_time_ns.saturating_add(elapsed_ns);
            }
        }

        let Some(chosen) = out.best_move else {
            break;
        };
        let record = state.execute_move(chosen)?;
        let notation = move_notation(&record);
        debug!(ply = state.move_count, %mover, notation = %notation, "match move");
        result.played_moves.push(notation);
    }

    if let Some(outcome) = MatchOutcome::from_game(&state) {
        result.outcome = outcome;
    }
    info!(outcome = ?result.outcome, plies = result.plies(), "match finished");
    result.final_state = state;
    Ok(result)
}

/// Play a series of matches and aggregate win/loss/draw statistics.
///
/// Player colours are randomised each game (deterministic from `base_seed`).
pub fn play_engine_match_series<F1, F2>(
    player1_factory: F1,
    player2_factory: F2,
    config: MatchSeriesConfig,
) -> GameResult<MatchSeriesStats>
where
    F1: Fn() -> Box<dyn Engine>,
    F2: Fn() -> Box<dyn Engine>,
{
    let mut stats = MatchSeriesStats {
        games: config.games,
        ..MatchSeriesStats::default()
    };
    let mut colour_rng = StdRng::seed_from_u64(config.base_seed ^ 0xA5A5_5A5A_0123_4567);

    for i in 0..config.games {
        let player1_is_white = colour_rng.random_bool(0.5);
        let seed = config.base_seed.wrapping_add(u64::from(i));
        let mut player1 = player1_factory();
        let mut player2 = player2_factory();

        let result = if player1_is_white {
            play_engine_match(player1.as_mut(), player2.as_mut(), seed, config.per_game)?
        } else {
            play_engine_match(player2.as_mut(), player1.as_mut(), seed, config.per_game)?
        };

        let (p1_moves, p1_ns, p2_moves, p2_ns) = if player1_is_white {
            (
                result.white_move_count,
                result.white_total_time_ns,
                result.black_move_count,
                result.black_total_time_ns,
            )
        } else {
            (
                result.black_move_count,
                result.black_total_time_ns,
                result.white_move_count,
                result.white_total_time_ns,
            )
        };
        stats.player1_moves = stats.player1_moves.saturating_add(p1_moves);
        stats.player2_moves = stats.player2_moves.saturating_add(p2_moves);
        stats.player1_total_time_ns = stats.player1_total_time_ns.saturating_add(p1_ns);
        stats.player2_total_time_ns = stats.player2_total_time_ns.saturating_add(p2_ns);

        match result.outcome.winner() {
            None => stats.draws += 1,
            Some(Player::White) if player1_is_white => stats.player1_wins += 1,
            Some(Player::Black) if !player1_is_white => stats.player1_wins += 1,
            Some(_) => stats.player2_wins += 1,
        }
        stats.outcomes.push(result.outcome);
    }

    Ok(stats)
}
