//! Random-move engine.
//!
//! Selects uniformly from legal moves and is primarily used for diagnostics,
//! integration testing, and as a weak sparring partner in engine matches.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::errors::{GameError, GameResult};
use crate::game_state::game_state::GameState;
use crate::move_generation::move_generator::all_legal_moves;

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "Tethari Random"
    }

    fn set_option(&mut self, name: &str, value: &str) -> GameResult<()> {
        if name.eq_ignore_ascii_case("Seed") {
            let seed = value
                .trim()
                .parse::<u64>()
                .map_err(|_| GameError::EngineOption(format!("invalid Seed value '{value}'")))?;
            self.rng = StdRng::seed_from_u64(seed);
            return Ok(());
        }
        Err(GameError::EngineOption(format!("unknown option '{name}'")))
    }

    fn choose_move(
        &mut self,
        game_state: &GameState,
        _params: &GoParams,
    ) -> GameResult<EngineOutput> {
        let mut out = EngineOutput::default();
        if game_state.game_over {
            return Ok(out);
        }

        let legal_moves = all_legal_moves(game_state, game_state.active_player);
        out.info_lines
            .push(format!("random_engine legal_moves {}", legal_moves.len()));

        out.best_move = legal_moves.choose(&mut self.rng).copied();
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::RandomEngine;
    use crate::engines::engine_trait::{Engine, GoParams};
    use crate::game_state::game_state::GameState;

    #[test]
    fn picks_a_legal_move() {
        let game = GameState::new_game();
        let mut engine = RandomEngine::with_seed(7);
        let out = engine
            .choose_move(&game, &GoParams::default())
            .expect("random engine should not fail");
        let mv = out.best_move.expect("start position has moves");
        assert!(game.is_legal(mv));
    }

    #[test]
    fn same_seed_same_choice() {
        let game = GameState::new_game();
        let mut a = RandomEngine::with_seed(11);
        let mut b = RandomEngine::new();
        b.set_option("Seed", "11").expect("seed option should parse");
        let params = GoParams::default();
        assert_eq!(
            a.choose_move(&game, &params).expect("a").best_move,
            b.choose_move(&game, &params).expect("b").best_move
        );
    }

    #[test]
    fn rejects_unknown_options() {
        let mut engine = RandomEngine::with_seed(1);
        assert!(engine.set_option("Depth", "3").is_err());
        assert!(engine.set_option("Seed", "abc").is_err());
    }
}
