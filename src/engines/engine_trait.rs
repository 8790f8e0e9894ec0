//! Engine abstraction layer used by the CLI and the match harness.
//!
//! Defines common input parameters and output payloads so different engine
//! strategies can be selected at runtime behind a single trait interface.

use crate::errors::{GameError, GameResult};
use crate::game_state::game_state::GameState;
use crate::game_state::game_types::Move;

#[derive(Debug, Clone, Copy, Default)]
pub struct GoParams {
    pub depth: Option<u8>,
    pub movetime_ms: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<Move>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn set_option(&mut self, name: &str, _value: &str) -> GameResult<()> {
        Err(GameError::EngineOption(format!(
            "{} has no option named {name}",
            self.name()
        )))
    }

    /// Pick a move for the side to move. `best_move` is `None` when the side
    /// to move has nothing legal or the game is over.
    fn choose_move(&mut self, game_state: &GameState, params: &GoParams)
        -> GameResult<EngineOutput>;
}
