//! Error types shared by the rules engine, parsers and engines.
//!
//! Every condition here is local and recoverable: the caller gets the error
//! back and the game state is left untouched.

use thiserror::Error;

use crate::game_state::game_types::{Player, Square};

/// Represents all possible error types that can occur in the engine.
#[derive(Debug, Error)]
pub enum GameError {
    /// Coordinate text that is not `a1`..`f6`, or indices outside the board.
    #[error("invalid square: {0}")]
    InvalidSquare(String),

    /// A move token that is not of the form `c3-d4`, `c3xd4` or `c3:d4`.
    #[error("invalid move token: {0}")]
    InvalidMoveToken(String),

    /// The origin square of a move holds no piece.
    #[error("no piece on {0}")]
    EmptySquare(Square),

    /// The origin square holds a piece of the side that is not to move.
    #[error("piece on {square} belongs to {owner}, but {active} is to move")]
    WrongSide {
        square: Square,
        owner: Player,
        active: Player,
    },

    /// The destination is not in the generator's legal set for that origin.
    #[error("illegal move {from}-{to}")]
    IllegalMove { from: Square, to: Square },

    /// The game has already ended.
    #[error("game is over, no further moves are accepted")]
    GameOver,

    /// A position setup was structurally unusable.
    #[error("invalid position setup: {0}")]
    Position(String),

    /// An engine option name or value that the engine does not understand.
    #[error("invalid engine option: {0}")]
    EngineOption(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type GameResult<T> = Result<T, GameError>;
