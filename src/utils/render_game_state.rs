//! Terminal-oriented board renderer.
//!
//! White pieces print as upper-case kind letters, Black as lower-case;
//! endangered pieces get a trailing `!`.

use crate::game_state::game_rules::BOARD_SIZE;
use crate::game_state::game_state::GameState;
use crate::game_state::game_types::{Piece, Player, Square};

const FILE_HEADER: &str = "   a  b  c  d  e  f";

/// Render the board to a string for terminal output, rank 6 on top.
pub fn render_game_state(game_state: &GameState) -> String {
    let mut out = String::new();

    out.push_str(FILE_HEADER);
    out.push('\n');

    for rank in (0..BOARD_SIZE as u8).rev() {
        let label = char::from(b'1' + rank);
        out.push(label);
        out.push(' ');

        for file in 0..BOARD_SIZE as u8 {
            let cell = Square::new(file, rank).and_then(|square| game_state.piece_at(square));
            out.push_str(&cell_text(cell));
        }

        out.push(' ');
        out.push(label);
        out.push('\n');
    }

    out.push_str(FILE_HEADER);
    out
}

fn cell_text(piece: Option<Piece>) -> String {
    match piece {
        None => " · ".to_owned(),
        Some(piece) => {
            let letter = match piece.owner {
                Player::White => piece.kind.letter(),
                Player::Black => piece.kind.letter().to_ascii_lowercase(),
            };
            let mark = if piece.endangered { '!' } else { ' ' };
            format!(" {letter}{mark}")
        }
    }
}

/// One-line status summary for drivers.
pub fn render_status(game_state: &GameState) -> String {
    match game_state.winner {
        Some(outcome) => format!(
            "game over after {} moves: {:?} ({:?})",
            game_state.move_count, outcome, game_state.termination
        ),
        None => format!(
            "{} to move, move {}, quiet moves {}, losses white {} black {}",
            game_state.active_player,
            game_state.move_count + 1,
            game_state.moves_without_event,
            game_state.captured_white.len(),
            game_state.captured_black.len()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::render_game_state;
    use crate::game_state::game_state::GameState;

    #[test]
    fn start_position_renders_both_back_ranks() {
        let text = render_game_state(&GameState::new_game());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[1], "6  b  w  c  r  w  b  6");
        assert_eq!(lines[6], "1  B  W  C  R  W  B  1");
    }
}
