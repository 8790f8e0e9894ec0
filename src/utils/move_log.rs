//! Numbered move log, one row per White/Black pair.

use serde::{Deserialize, Serialize};

use crate::game_state::game_types::Player;

/// Placeholder for the White half of a row that opened with a Black move.
pub const SKIPPED_HALF: &str = "...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveLogEntry {
    pub number: u32,
    pub white: String,
    pub black: String,
}

/// Append `notation` for the move that brought the game to `move_count`.
///
/// Rows are numbered consecutively; the first row takes its number from
/// `move_count`.
pub fn record_in_log(log: &mut Vec<MoveLogEntry>, player: Player, move_count: u32, notation: String) {
    let number = log
        .last()
        .map_or(move_count.div_ceil(2), |last| last.number + 1);
    match player {
        Player::White => log.push(MoveLogEntry {
            number,
            white: notation,
            black: String::new(),
        }),
        Player::Black => match log.last_mut() {
            Some(last) if last.black.is_empty() => last.black = notation,
            _ => log.push(MoveLogEntry {
                number,
                white: SKIPPED_HALF.to_owned(),
                black: notation,
            }),
        },
    }
}

/// Render the log as `1. Sb2-b3 Sb5-b4` lines.
pub fn format_move_log(log: &[MoveLogEntry]) -> String {
    log.iter()
        .map(|entry| {
            if entry.black.is_empty() {
                format!("{}. {}", entry.number, entry.white)
            } else {
                format!("{}. {} {}", entry.number, entry.white, entry.black)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::{format_move_log, record_in_log, SKIPPED_HALF};
    use crate::game_state::game_types::Player;

    #[test]
    fn pairs_white_and_black_halves() {
        let mut log = Vec::new();
        record_in_log(&mut log, Player::White, 1, "Sb2-b3".to_owned());
        record_in_log(&mut log, Player::Black, 2, "Sb5-b4".to_owned());
        record_in_log(&mut log, Player::White, 3, "Sb3xb4=X".to_owned());

        assert_eq!(log.len(), 2);
        assert_eq!(log[1].number, 2);
        assert_eq!(
            format_move_log(&log),
            "1. Sb2-b3 Sb5-b4\n2. Sb3xb4=X"
        );
    }

    #[test]
    fn black_first_opens_a_row() {
        let mut log = Vec::new();
        record_in_log(&mut log, Player::Black, 1, "Ce5-e4".to_owned());
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].white, SKIPPED_HALF);
        assert_eq!(log[0].number, 1);
    }

    #[test]
    fn row_after_black_opening_is_numbered_next() {
        let mut log = Vec::new();
        record_in_log(&mut log, Player::Black, 1, "Ce5-e4".to_owned());
        record_in_log(&mut log, Player::White, 2, "Cc3-d3".to_owned());
        record_in_log(&mut log, Player::Black, 3, "Ce4-e5".to_owned());
        record_in_log(&mut log, Player::White, 4, "Cd3-c3".to_owned());

        assert_eq!(
            format_move_log(&log),
            "1. ... Ce5-e4\n2. Cc3-d3 Ce4-e5\n3. Cd3-c3"
        );
    }
}
