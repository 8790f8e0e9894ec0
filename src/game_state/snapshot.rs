//! Reversible copies of a `GameState`.
//!
//! `SearchSnapshot` holds exactly what move execution can change, so the
//! search can explore a line and put everything back. `Snapshot` adds the
//! move log and last-move facts for callers that undo user-visible moves or
//! persist a game.

use serde::{Deserialize, Serialize};

use crate::game_state::game_state::{Board, GameState};
use crate::game_state::game_types::*;
use crate::game_state::position_key::PositionKey;
use crate::move_generation::move_execution::{Death, MoveRecord};
use crate::utils::move_log::MoveLogEntry;

/// Search-only snapshot: board, counters, history, losses and result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSnapshot {
    pub board: Board,
    pub active_player: Player,
    pub move_count: u32,
    pub moves_without_event: u32,
    pub position_history: Vec<PositionKey>,
    pub captured_white: Vec<PieceKind>,
    pub captured_black: Vec<PieceKind>,
    pub game_over: bool,
    pub winner: Option<Outcome>,
    pub termination: Option<Termination>,
}

/// Full snapshot, including bookkeeping that search does not touch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub core: SearchSnapshot,
    pub last_move: Option<MoveRecord>,
    pub last_deaths: Vec<Death>,
    pub last_endangered: Vec<Square>,
    pub move_log: Vec<MoveLogEntry>,
}

impl GameState {
    pub fn save_search_snapshot(&self) -> SearchSnapshot {
        SearchSnapshot {
            board: self.board,
            active_player: self.active_player,
            move_count: self.move_count,
            moves_without_event: self.moves_without_event,
            position_history: self.position_history.clone(),
            captured_white: self.captured_white.clone(),
            captured_black: self.captured_black.clone(),
            game_over: self.game_over,
            winner: self.winner,
            termination: self.termination,
        }
    }

    pub fn restore_search_snapshot(&mut self, snapshot: SearchSnapshot) {
        self.board = snapshot.board;
        self.active_player = snapshot.active_player;
        self.move_count = snapshot.move_count;
        self.moves_without_event = snapshot.moves_without_event;
        self.position_history = snapshot.position_history;
        self.captured_white = snapshot.captured_white;
        self.captured_black = snapshot.captured_black;
        self.game_over = snapshot.game_over;
        self.winner = snapshot.winner;
        self.termination = snapshot.termination;
    }

    pub fn save_snapshot(&self) -> Snapshot {
        Snapshot {
            core: self.save_search_snapshot(),
            last_move: self.last_move.clone(),
            last_deaths: self.last_deaths.clone(),
            last_endangered: self.last_endangered.clone(),
            move_log: self.move_log.clone(),
        }
    }

    pub fn restore_snapshot(&mut self, snapshot: Snapshot) {
        self.restore_search_snapshot(snapshot.core);
        self.last_move = snapshot.last_move;
        self.last_deaths = snapshot.last_deaths;
        self.last_endangered = snapshot.last_endangered;
        self.move_log = snapshot.move_log;
    }

    /// Rebuild a state from a persisted snapshot.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut state = GameState::new_game();
        state.restore_snapshot(snapshot);
        state
    }
}

#[cfg(test)]
mod tests {
    use super::Snapshot;
    use crate::game_state::game_state::GameState;
    use crate::utils::notation::parse_move_token;

    #[test]
    fn restore_undoes_executed_moves() {
        let mut game = GameState::new_game();
        let saved = game.save_snapshot();

        for token in ["b2-b3", "b5-b4", "b3xb4"] {
            let mv = parse_move_token(token).expect("token should parse");
            game.execute_move(mv).expect("scripted move should be legal");
        }
        assert_eq!(game.captured_black.len(), 1);
        assert_eq!(game.move_log.len(), 2);

        game.restore_snapshot(saved.clone());
        assert_eq!(game.save_snapshot(), saved);
        assert!(game.captured_black.is_empty());
        assert!(game.move_log.is_empty());
        assert!(game.last_move.is_none());
    }

    #[test]
    fn search_snapshot_leaves_log_alone() {
        let mut game = GameState::new_game();
        let mv = parse_move_token("b2-b3").expect("token should parse");
        game.execute_move(mv).expect("move should be legal");
        let log_before = game.move_log.clone();

        let saved = game.save_search_snapshot();
        let reply = parse_move_token("b5-b4").expect("token should parse");
        game.explore_move(reply);
        assert_eq!(game.move_count, 2);
        game.restore_search_snapshot(saved);

        assert_eq!(game.move_count, 1);
        assert_eq!(game.move_log, log_before);
    }

    #[test]
    fn snapshot_survives_json_round_trip() {
        let mut game = GameState::new_game();
        let mv = parse_move_token("d2-c4").expect("token should parse");
        game.execute_move(mv).expect("knight move should be legal");

        let json = serde_json::to_string(&game.save_snapshot()).expect("snapshot should serialize");
        let decoded: Snapshot = serde_json::from_str(&json).expect("snapshot should deserialize");
        let restored = GameState::from_snapshot(decoded);

        assert_eq!(restored.save_snapshot(), game.save_snapshot());
        assert_eq!(restored.position_key(), game.position_key());
    }
}
