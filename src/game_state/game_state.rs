//! Core game state representation.
//!
//! `GameState` owns the board, the turn and event counters, the repetition
//! history, both capture lists and the facts about the last completed move.
//! It is built only by [`GameState::new_game`] or a position load and is
//! afterwards changed only through move execution or snapshot restore.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::{GameError, GameResult};
use crate::game_state::game_rules::{formation_rank, BOARD_SIZE, STARTING_FORMATION};
use crate::game_state::game_types::*;
use crate::game_state::position_key::{compute_position_key, PositionKey};
use crate::move_generation::move_execution::{Death, MoveRecord};
use crate::utils::move_log::MoveLogEntry;

/// Board contents indexed `[file][rank]`.
pub type Board = [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE];

/// One entry of a position load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceSetup {
    pub square: String,
    pub player: Player,
    pub kind: PieceKind,
    #[serde(default)]
    pub endangered: bool,
}

impl PieceSetup {
    pub fn new(square: &str, player: Player, kind: PieceKind) -> Self {
        Self {
            square: square.to_owned(),
            player,
            kind,
            endangered: false,
        }
    }

    pub fn with_endangered(mut self, endangered: bool) -> Self {
        self.endangered = endangered;
        self
    }
}

/// Arbitrary starting position, typically loaded from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionSetup {
    #[serde(default = "default_active_player")]
    pub active_player: Player,
    #[serde(default)]
    pub moves_without_event: Option<u32>,
    pub pieces: Vec<PieceSetup>,
}

fn default_active_player() -> Player {
    Player::White
}

impl PositionSetup {
    /// Parse a setup, rejecting one with no piece on a valid square.
    pub fn from_json_str(json: &str) -> GameResult<Self> {
        let setup: Self = serde_json::from_str(json)?;
        if !setup
            .pieces
            .iter()
            .any(|entry| Square::from_algebraic(&entry.square).is_ok())
        {
            return Err(GameError::Position(
                "setup places no piece on a valid square".to_owned(),
            ));
        }
        Ok(setup)
    }
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub board: Board,
    pub active_player: Player,

    // --- Counters ---
    pub move_count: u32,
    pub moves_without_event: u32,

    // --- Repetition support ---
    pub position_history: Vec<PositionKey>,

    // --- Losses, per side that lost the piece ---
    pub captured_white: Vec<PieceKind>,
    pub captured_black: Vec<PieceKind>,

    // --- Result ---
    pub game_over: bool,
    pub winner: Option<Outcome>,
    pub termination: Option<Termination>,

    // --- Facts about the last completed move ---
    pub last_move: Option<MoveRecord>,
    pub last_deaths: Vec<Death>,
    pub last_endangered: Vec<Square>,

    pub move_log: Vec<MoveLogEntry>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}

impl GameState {
    fn blank(active_player: Player) -> Self {
        Self {
            board: [[None; BOARD_SIZE]; BOARD_SIZE],
            active_player,
            move_count: 0,
            moves_without_event: 0,
            position_history: Vec::new(),
            captured_white: Vec::new(),
            captured_black: Vec::new(),
            game_over: false,
            winner: None,
            termination: None,
            last_move: None,
            last_deaths: Vec::new(),
            last_endangered: Vec::new(),
            move_log: Vec::new(),
        }
    }

    /// Default starting formation, White to move.
    pub fn new_game() -> Self {
        let mut state = Self::blank(Player::White);
        for player in [Player::White, Player::Black] {
            for (file, rank, kind) in STARTING_FORMATION {
                if let Some(square) = Square::new(file, formation_rank(player, rank)) {
                    state.set_piece(square, Some(Piece::new(player, kind)));
                }
            }
        }
        state.position_history.push(state.position_key());
        state
    }

    /// Build a state from an arbitrary piece list.
    pub fn from_setup(setup: &PositionSetup) -> Self {
        let mut state = Self::blank(setup.active_player);
        for entry in &setup.pieces {
            match Square::from_algebraic(&entry.square) {
                Ok(square) => state.set_piece(
                    square,
                    Some(Piece {
                        owner: entry.player,
                        kind: entry.kind,
                        endangered: entry.endangered,
                    }),
                ),
                Err(err) => warn!(%err, "ignoring setup entry"),
            }
        }
        if let Some(count) = setup.moves_without_event {
            state.moves_without_event = count;
        }
        state.position_history.push(state.position_key());
        state
    }

    /// Reinitialize to the default starting formation.
    pub fn reset(&mut self) {
        *self = Self::new_game();
    }

    /// Replace the whole state with the given position.
    pub fn load_position(&mut self, setup: &PositionSetup) {
        *self = Self::from_setup(setup);
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square.file() as usize][square.rank() as usize]
    }

    #[inline]
    pub(crate) fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        self.board[square.file() as usize][square.rank() as usize] = piece;
    }

    #[inline]
    pub(crate) fn piece_at_mut(&mut self, square: Square) -> Option<&mut Piece> {
        self.board[square.file() as usize][square.rank() as usize].as_mut()
    }

    #[inline]
    pub(crate) fn take_piece(&mut self, square: Square) -> Option<Piece> {
        self.board[square.file() as usize][square.rank() as usize].take()
    }

    /// All pieces of `player`, file-major order.
    pub fn pieces(&self, player: Player) -> Vec<(Square, Piece)> {
        Square::all()
            .filter_map(|square| self.piece_at(square).map(|piece| (square, piece)))
            .filter(|(_, piece)| piece.owner == player)
            .collect()
    }

    pub fn piece_count(&self, player: Player) -> usize {
        Square::all()
            .filter(|&square| matches!(self.piece_at(square), Some(piece) if piece.owner == player))
            .count()
    }

    /// Kinds lost by `player`, in the order they were lost.
    pub fn lost_pieces(&self, player: Player) -> &[PieceKind] {
        match player {
            Player::White => &self.captured_white,
            Player::Black => &self.captured_black,
        }
    }

    pub(crate) fn record_loss(&mut self, piece: Piece) {
        match piece.owner {
            Player::White => self.captured_white.push(piece.kind),
            Player::Black => self.captured_black.push(piece.kind),
        }
    }

    #[inline]
    pub fn position_key(&self) -> PositionKey {
        compute_position_key(self)
    }

    /// Number of times `key` occurs in the repetition history.
    pub fn occurrences(&self, key: PositionKey) -> usize {
        self.position_history.iter().filter(|&&k| k == key).count()
    }
}
