//! Alpha-beta minimax engine.
//!
//! Wraps `search_best_move` with a configurable default depth, a selectable
//! evaluator and an owned seeded random source for tie-breaking.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::errors::{GameError, GameResult};
use crate::game_state::game_state::GameState;
use crate::search::board_scoring::{MaterialScorer, StandardScorer};
use crate::search::minimax::{search_best_move, SearchConfig, SearchResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScorerKind {
    #[default]
    Standard,
    Material,
}

impl ScorerKind {
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "standard" => Some(Self::Standard),
            "material" => Some(Self::Material),
            _ => None,
        }
    }
}

pub struct MinimaxEngine {
    default_depth: u8,
    scorer_kind: ScorerKind,
    seed: Option<u64>,
    rng: StdRng,
}

impl MinimaxEngine {
    pub fn new(default_depth: u8) -> Self {
        Self::new_with_scorer(default_depth, ScorerKind::Standard)
    }

    pub fn new_with_scorer(default_depth: u8, scorer_kind: ScorerKind) -> Self {
        Self {
            default_depth: default_depth.max(1),
            scorer_kind,
            seed: None,
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.reseed(seed);
        self
    }

    fn reseed(&mut self, seed: u64) {
        self.seed = Some(seed);
        self.rng = StdRng::seed_from_u64(seed);
    }

    fn run_search(&mut self, game_state: &GameState, config: SearchConfig) -> SearchResult {
        match self.scorer_kind {
            ScorerKind::Standard => {
                search_best_move(game_state, &StandardScorer, config, &mut self.rng)
            }
            ScorerKind::Material => {
                search_best_move(game_state, &MaterialScorer, config, &mut self.rng)
            }
        }
    }
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new(SearchConfig::default().depth)
    }
}

impl Engine for MinimaxEngine {
    fn name(&self) -> &str {
        "Tethari Minimax"
    }

    /// A seeded engine replays the same tie-breaks every game.
    fn new_game(&mut self) {
        if let Some(seed) = self.seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
    }

    fn set_option(&mut self, name: &str, value: &str) -> GameResult<()> {
        if name.eq_ignore_ascii_case("Depth") {
            let parsed = value
                .trim()
                .parse::<u8>()
                .map_err(|_| GameError::EngineOption(format!("invalid Depth value '{value}'")))?;
            self.default_depth = parsed.max(1);
            return Ok(());
        }
        if name.eq_ignore_ascii_case("Seed") {
            let parsed = value
                .trim()
                .parse::<u64>()
                .map_err(|_| GameError::EngineOption(format!("invalid Seed value '{value}'")))?;
            self.reseed(parsed);
            return Ok(());
        }
        if name.eq_ignore_ascii_case("Scorer") {
            self.scorer_kind = ScorerKind::parse(value)
                .ok_or_else(|| GameError::EngineOption(format!("invalid Scorer value '{value}'")))?;
            return Ok(());
        }
        Err(GameError::EngineOption(format!("unknown option '{name}'")))
    }

    fn choose_move(
        &mut self,
        game_state: &GameState,
        params: &GoParams,
    ) -> GameResult<EngineOutput> {
        let config = SearchConfig {
            depth: params.depth.unwrap_or(self.default_depth),
            movetime_ms: params.movetime_ms,
        };
        let result = self.run_search(game_state, config);

        let mut out = EngineOutput {
            best_move: result.best_move,
            info_lines: Vec::new(),
        };
        out.info_lines.push(format!(
            "minimax_engine depth {} score {} nodes {} time_ms {}",
            result.depth, result.best_score, result.nodes, result.elapsed_ms
        ));
        out.info_lines.push(format!(
            "minimax_engine root_moves {} tied {} scorer {:?}",
            result.root_moves_searched,
            result.tied_moves.len(),
            self.scorer_kind
        ));
        Ok(out)
    }
}
