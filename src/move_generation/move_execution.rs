//! Move execution.
//!
//! `execute_move` validates a request, applies it and updates the move log;
//! `explore_move` applies a generated move for search without validation or
//! log bookkeeping. Both run the same core, which performs, in order:
//! relocation and capture, promotion, isolation resolution, isolation
//! marking, counter updates and termination checks.

use serde::{Deserialize, Serialize};
use tracing::{info, trace};

use crate::errors::{GameError, GameResult};
use crate::game_state::game_rules::{NO_EVENT_LIMIT, REPETITION_LIMIT};
use crate::game_state::game_state::GameState;
use crate::game_state::game_types::*;
use crate::move_generation::isolation::{mark_endangered, resolve_endangered};
use crate::move_generation::move_generator::has_legal_move;
use crate::utils::move_log::record_in_log;
use crate::utils::notation::move_notation;

/// A piece removed from the board by isolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Death {
    pub square: Square,
    pub kind: PieceKind,
}

/// Structured facts about one executed move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub mv: Move,
    pub player: Player,
    /// Kind of the moving piece before any promotion.
    pub kind: PieceKind,
    pub captured: bool,
    pub captured_kind: Option<PieceKind>,
    pub promoted: bool,
    pub deaths: Vec<Death>,
    pub newly_endangered: Vec<Square>,
}

/// Check a move request against the rules without changing anything.
pub fn validate_move(game_state: &GameState, mv: Move) -> GameResult<()> {
    if game_state.game_over {
        return Err(GameError::GameOver);
    }

    let piece = game_state
        .piece_at(mv.from)
        .ok_or(GameError::EmptySquare(mv.from))?;

    if piece.owner != game_state.active_player {
        return Err(GameError::WrongSide {
            square: mv.from,
            owner: piece.owner,
            active: game_state.active_player,
        });
    }

    if !game_state.is_legal(mv) {
        return Err(GameError::IllegalMove {
            from: mv.from,
            to: mv.to,
        });
    }

    Ok(())
}

fn apply_move_core(game_state: &mut GameState, mv: Move) -> Option<MoveRecord> {
    let moving = game_state.take_piece(mv.from)?;
    let player = moving.owner;
    let opponent = player.opposite();

    // Relocate and capture.
    let target = game_state.take_piece(mv.to);
    game_state.set_piece(mv.to, Some(moving));
    if let Some(victim) = target {
        game_state.record_loss(victim);
    }
    let captured = target.is_some();

    // Promotion replaces the piece with a fresh, unmarked Breaker.
    let promoted = moving.kind == PieceKind::Skirmisher && captured;
    if promoted {
        game_state.set_piece(mv.to, Some(Piece::new(player, PieceKind::Breaker)));
    }

    // Resolve before marking.
    let deaths = resolve_endangered(game_state, player);
    let newly_endangered = mark_endangered(game_state, player);

    if captured || !deaths.is_empty() {
        game_state.moves_without_event = 0;
    } else {
        game_state.moves_without_event += 1;
    }
    game_state.move_count += 1;

    let record = MoveRecord {
        mv,
        player,
        kind: moving.kind,
        captured,
        captured_kind: target.map(|victim| victim.kind),
        promoted,
        deaths,
        newly_endangered,
    };

    check_termination(game_state, player, opponent);
    Some(record)
}

fn finish(game_state: &mut GameState, outcome: Outcome, termination: Termination) {
    game_state.game_over = true;
    game_state.winner = Some(outcome);
    game_state.termination = Some(termination);
}

fn check_termination(game_state: &mut GameState, mover: Player, opponent: Player) {
    if game_state.piece_count(opponent) == 0 {
        finish(game_state, Outcome::Win(mover), Termination::Elimination);
        return;
    }
    if game_state.piece_count(mover) == 0 {
        finish(game_state, Outcome::Win(opponent), Termination::Elimination);
        return;
    }

    game_state.active_player = opponent;
    let key = game_state.position_key();
    game_state.position_history.push(key);

    if game_state.occurrences(key) >= REPETITION_LIMIT {
        finish(game_state, Outcome::Draw, Termination::Repetition);
    } else if game_state.moves_without_event >= NO_EVENT_LIMIT {
        finish(game_state, Outcome::Draw, Termination::NoEventLimit);
    } else if !has_legal_move(game_state, opponent) {
        finish(game_state, Outcome::Win(mover), Termination::Stalemate);
    }
}

impl GameState {
    /// Validate and play `mv`, recording it in the move log.
    ///
    /// On error the state is unchanged.
    pub fn execute_move(&mut self, mv: Move) -> GameResult<MoveRecord> {
        validate_move(self, mv)?;
        let record = apply_move_core(self, mv).ok_or(GameError::EmptySquare(mv.from))?;

        self.last_move = Some(record.clone());
        self.last_deaths = record.deaths.clone();
        self.last_endangered = record.newly_endangered.clone();
        record_in_log(
            &mut self.move_log,
            record.player,
            self.move_count,
            move_notation(&record),
        );

        trace!(mv = %record.mv, player = %record.player, captured = record.captured, "move executed");
        if self.game_over {
            info!(winner = ?self.winner, termination = ?self.termination, moves = self.move_count, "game over");
        }

        Ok(record)
    }

    /// Apply a move produced by the move generator, for exploration only.
    ///
    /// No legality check and no log or last-move bookkeeping; pair with
    /// [`GameState::save_search_snapshot`] to undo. Returns `None` when the
    /// origin square is empty.
    pub fn explore_move(&mut self, mv: Move) -> Option<MoveRecord> {
        apply_move_core(self, mv)
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::GameError;
    use crate::game_state::game_state::{GameState, PieceSetup, PositionSetup};
    use crate::game_state::game_types::*;
    use crate::utils::notation::parse_move_token;

    fn sq(text: &str) -> Square {
        Square::from_algebraic(text).expect("test square should parse")
    }

    fn position(active: Player, pieces: &[(&str, Player, PieceKind)]) -> GameState {
        GameState::from_setup(&PositionSetup {
            active_player: active,
            moves_without_event: None,
            pieces: pieces
                .iter()
                .map(|&(s, p, k)| PieceSetup::new(s, p, k))
                .collect(),
        })
    }

    fn play(game: &mut GameState, tokens: &[&str]) {
        for token in tokens {
            let mv = parse_move_token(token).expect("scripted token should parse");
            game.execute_move(mv)
                .unwrap_or_else(|err| panic!("{token} should be playable: {err}"));
        }
    }

    fn pair_position() -> GameState {
        position(
            Player::White,
            &[
                ("b2", Player::White, PieceKind::Captain),
                ("c2", Player::White, PieceKind::Warden),
                ("e5", Player::Black, PieceKind::Captain),
                ("f5", Player::Black, PieceKind::Warden),
            ],
        )
    }

    fn rook_outpost_position() -> GameState {
        position(
            Player::White,
            &[
                ("c3", Player::White, PieceKind::Rook),
                ("c4", Player::White, PieceKind::Captain),
                ("d4", Player::White, PieceKind::Warden),
                ("e5", Player::Black, PieceKind::Captain),
                ("f5", Player::Black, PieceKind::Warden),
            ],
        )
    }

    #[test]
    fn skirmisher_capture_promotes_to_breaker() {
        let mut game = GameState::new_game();
        play(&mut game, &["b2-b3", "b5-b4"]);

        let record = game
            .execute_move(parse_move_token("b3xb4").expect("token should parse"))
            .expect("capture should be legal");

        let b4 = game.piece_at(sq("b4")).expect("b4 should be occupied");
        assert_eq!((b4.owner, b4.kind), (Player::White, PieceKind::Breaker));
        assert!(record.captured && record.promoted);
        assert_eq!(record.captured_kind, Some(PieceKind::Skirmisher));
        assert_eq!(game.captured_black, vec![PieceKind::Skirmisher]);
        assert!(game.captured_white.is_empty());
        assert_eq!(game.active_player, Player::Black);
        assert_eq!(game.moves_without_event, 0);
    }

    #[test]
    fn quiet_skirmisher_move_keeps_kind() {
        let mut game = GameState::new_game();
        let record = game
            .execute_move(parse_move_token("b2-a2").expect("token should parse"))
            .expect("glide should be legal");
        assert!(!record.promoted);
        assert_eq!(
            game.piece_at(sq("a2")).map(|p| p.kind),
            Some(PieceKind::Skirmisher)
        );
        assert_eq!(game.moves_without_event, 1);
    }

    #[test]
    fn standard_capture_records_loss_for_victim_side() {
        let mut game = position(
            Player::White,
            &[
                ("c3", Player::White, PieceKind::Captain),
                ("c4", Player::White, PieceKind::Warden),
                ("d4", Player::Black, PieceKind::Blade),
                ("e5", Player::Black, PieceKind::Warden),
            ],
        );
        play(&mut game, &["c3xd4", "e5-d5"]);
        let d4 = game.piece_at(sq("d4")).expect("d4 should be occupied");
        assert_eq!((d4.owner, d4.kind), (Player::White, PieceKind::Captain));
        assert!(game.piece_at(sq("c3")).is_none());
        assert_eq!(game.captured_black, vec![PieceKind::Blade]);
    }

    #[test]
    fn isolation_marks_without_immediate_death() {
        let mut game = position(
            Player::White,
            &[
                ("c3", Player::White, PieceKind::Rook),
                ("c4", Player::White, PieceKind::Warden),
                ("e5", Player::Black, PieceKind::Captain),
                ("f5", Player::Black, PieceKind::Warden),
            ],
        );
        play(&mut game, &["c3-f3"]);
        assert_eq!(game.last_endangered, vec![sq("c4"), sq("f3")]);
        play(&mut game, &["e5-e4"]);

        assert!(game.piece_at(sq("f3")).is_some_and(|p| p.endangered));
        assert!(game.piece_at(sq("c4")).is_some_and(|p| p.endangered));
        assert!(game.captured_white.is_empty());
    }

    #[test]
    fn rescue_clears_the_mark() {
        let mut game = rook_outpost_position();
        play(&mut game, &["c3-f3", "e5-e4", "d4-e3"]);

        let f3 = game.piece_at(sq("f3")).expect("rook should survive");
        assert!(!f3.endangered);
        assert!(game.captured_white.is_empty());
        assert!(game.last_deaths.is_empty());
        // The captain lost its partner to the rescue.
        assert_eq!(game.last_endangered, vec![sq("c4")]);
    }

    #[test]
    fn unresolved_isolation_dies_on_next_own_move() {
        let mut game = rook_outpost_position();
        play(&mut game, &["c3-f3", "e5-e4"]);
        assert!(game.piece_at(sq("f3")).is_some());

        let record = game
            .execute_move(parse_move_token("c4-c5").expect("token should parse"))
            .expect("captain step should be legal");

        assert!(game.piece_at(sq("f3")).is_none());
        assert_eq!(record.deaths.len(), 1);
        assert_eq!(record.deaths[0].square, sq("f3"));
        assert_eq!(game.captured_white, vec![PieceKind::Rook]);
        assert_eq!(game.piece_count(Player::White), 2);
        assert_eq!(game.moves_without_event, 0);
    }

    #[test]
    fn last_man_is_exempt() {
        let mut game = position(
            Player::White,
            &[
                ("c3", Player::White, PieceKind::Captain),
                ("e5", Player::Black, PieceKind::Captain),
                ("f5", Player::Black, PieceKind::Warden),
            ],
        );
        play(&mut game, &["c3-c4", "e5-e4", "c4-c5"]);
        assert!(game.piece_at(sq("c5")).is_some_and(|p| !p.endangered));
        assert!(!game.game_over);
    }

    #[test]
    fn double_isolation_death_eliminates_side() {
        let mut game = pair_position();
        play(&mut game, &["b2-a1", "e5-e4", "a1-a2"]);

        assert!(game.game_over);
        assert_eq!(game.winner, Some(Outcome::Win(Player::Black)));
        assert_eq!(game.termination, Some(Termination::Elimination));
        assert_eq!(game.piece_count(Player::White), 0);
        assert_eq!(game.captured_white.len(), 2);
        assert_eq!(game.last_deaths.len(), 2);
    }

    #[test]
    fn threefold_repetition_draws_on_the_crossing_move() {
        let mut game = pair_position();
        play(
            &mut game,
            &["b2-b3", "e5-e4", "b3-b2", "e4-e5", "b2-b3", "e5-e4", "b3-b2"],
        );
        assert!(!game.game_over);

        play(&mut game, &["e4-e5"]);
        assert!(game.game_over);
        assert_eq!(game.winner, Some(Outcome::Draw));
        assert_eq!(game.termination, Some(Termination::Repetition));
    }

    #[test]
    fn no_event_limit_draws_on_the_hundredth_quiet_move() {
        let mut game = GameState::from_setup(&PositionSetup {
            active_player: Player::White,
            moves_without_event: Some(99),
            pieces: vec![
                PieceSetup::new("c3", Player::White, PieceKind::Captain),
                PieceSetup::new("c4", Player::White, PieceKind::Warden),
                PieceSetup::new("e5", Player::Black, PieceKind::Captain),
                PieceSetup::new("f5", Player::Black, PieceKind::Warden),
            ],
        });
        play(&mut game, &["c3-d3"]);
        assert!(game.game_over);
        assert_eq!(game.winner, Some(Outcome::Draw));
        assert_eq!(game.termination, Some(Termination::NoEventLimit));
    }

    #[test]
    fn capturing_the_last_piece_wins_before_other_checks() {
        let mut game = GameState::from_setup(&PositionSetup {
            active_player: Player::White,
            moves_without_event: Some(99),
            pieces: vec![
                PieceSetup::new("c3", Player::White, PieceKind::Rook),
                PieceSetup::new("c2", Player::White, PieceKind::Captain),
                PieceSetup::new("c5", Player::Black, PieceKind::Warden),
            ],
        });
        play(&mut game, &["c3xc5"]);
        assert_eq!(game.winner, Some(Outcome::Win(Player::White)));
        assert_eq!(game.termination, Some(Termination::Elimination));
        assert_eq!(game.position_history.len(), 1);
    }

    #[test]
    fn side_without_moves_loses() {
        let mut pieces = vec![
            ("d4", Player::White, PieceKind::Captain),
            ("d5", Player::White, PieceKind::Warden),
        ];
        for file in ["a1", "b1", "c1", "d1", "e1", "f1"] {
            pieces.push((file, Player::Black, PieceKind::Skirmisher));
        }
        let mut game = position(Player::White, &pieces);
        play(&mut game, &["d4-e4"]);

        assert!(game.game_over);
        assert_eq!(game.winner, Some(Outcome::Win(Player::White)));
        assert_eq!(game.termination, Some(Termination::Stalemate));
    }

    #[test]
    fn invalid_requests_leave_state_untouched() {
        let mut game = GameState::new_game();
        let before = game.save_snapshot();

        let empty = game.execute_move(Move::new(sq("c3"), sq("c4")));
        assert!(matches!(empty, Err(GameError::EmptySquare(_))));

        let wrong_side = game.execute_move(Move::new(sq("b5"), sq("b4")));
        assert!(matches!(wrong_side, Err(GameError::WrongSide { .. })));

        let illegal = game.execute_move(Move::new(sq("d1"), sq("d3")));
        assert!(matches!(illegal, Err(GameError::IllegalMove { .. })));

        assert_eq!(game.save_snapshot(), before);
    }

    #[test]
    fn finished_game_rejects_moves() {
        let mut game = pair_position();
        play(&mut game, &["b2-a1", "e5-e4", "a1-a2"]);
        let result = game.execute_move(Move::new(sq("e4"), sq("e3")));
        assert!(matches!(result, Err(GameError::GameOver)));
    }

    #[test]
    fn mover_wins_when_both_sides_are_emptied() {
        let mut game = GameState::from_setup(&PositionSetup {
            active_player: Player::White,
            moves_without_event: None,
            pieces: vec![
                PieceSetup::new("a1", Player::White, PieceKind::Captain).with_endangered(true),
                PieceSetup::new("f6", Player::White, PieceKind::Rook).with_endangered(true),
                PieceSetup::new("f1", Player::Black, PieceKind::Warden),
            ],
        });
        play(&mut game, &["f6xf1"]);

        let record = game.last_move.clone().expect("move should be recorded");
        assert!(record.captured);
        assert_eq!(record.deaths.len(), 2);
        assert_eq!(game.piece_count(Player::White), 0);
        assert_eq!(game.piece_count(Player::Black), 0);
        assert!(game.game_over);
        assert_eq!(game.winner, Some(Outcome::Win(Player::White)));
        assert_eq!(game.termination, Some(Termination::Elimination));
    }

    #[test]
    fn executed_moves_are_logged_with_markers() {
        let mut game = rook_outpost_position();
        play(&mut game, &["c3-f3", "e5-e4", "c4-c5"]);

        assert_eq!(game.move_log.len(), 2);
        assert_eq!(game.move_log[0].white, "Rc3-f3 !f3");
        assert_eq!(game.move_log[0].black, "Ce5-e4");
        assert!(game.move_log[1].white.starts_with("Cc4-c5 †f3"));
    }

    #[test]
    fn explore_move_skips_bookkeeping() {
        let mut game = GameState::new_game();
        let mv = parse_move_token("b2-b3").expect("token should parse");
        let record = game.explore_move(mv).expect("origin should be occupied");
        assert_eq!(record.newly_endangered, vec![sq("b3")]);
        assert!(game.move_log.is_empty());
        assert!(game.last_move.is_none());
        assert_eq!(game.active_player, Player::Black);
    }
}
