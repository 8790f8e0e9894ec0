//! Crate root module declarations for the Tethari engine project.
//!
//! This file exposes all top-level subsystems (game state, move generation,
//! search, engines and utility helpers) so the binary, benches, and external
//! tooling can import stable module paths.

pub mod errors;

pub mod game_state {
    pub mod game_rules;
    pub mod game_state;
    pub mod game_types;
    pub mod position_key;
    pub mod snapshot;
}

pub mod moves {
    pub mod piece_moves;
}

pub mod move_generation {
    pub mod isolation;
    pub mod move_execution;
    pub mod move_generator;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod minimax;
    pub mod move_ordering;
}

pub mod engines {
    pub mod engine_minimax;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod utils {
    pub mod match_harness;
    pub mod move_log;
    pub mod notation;
    pub mod render_game_state;
}
