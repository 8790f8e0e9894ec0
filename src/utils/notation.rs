//! Move notation and move-token parsing.
//!
//! Notation: `<Kind><from><-|x><to>[=X][ †<square>]*[ !<square>]*`, where
//! `=X` marks a promotion, `†` an isolation death and `!` a newly endangered
//! piece. Tokens accepted from drivers are `c3-d4`, `c3xd4` or `c3:d4`.

use crate::errors::{GameError, GameResult};
use crate::game_state::game_types::{Move, PieceKind, Square};
use crate::move_generation::move_execution::MoveRecord;

/// Render a move record as log notation.
pub fn move_notation(record: &MoveRecord) -> String {
    let mut out = String::with_capacity(16);
    out.push(record.kind.letter());
    out.push_str(&record.mv.from.to_string());
    out.push(if record.captured { 'x' } else { '-' });
    out.push_str(&record.mv.to.to_string());

    if record.promoted {
        out.push('=');
        out.push(PieceKind::Breaker.letter());
    }
    for death in &record.deaths {
        out.push_str(" \u{2020}");
        out.push_str(&death.square.to_string());
    }
    for square in &record.newly_endangered {
        out.push_str(" !");
        out.push_str(&square.to_string());
    }

    out
}

/// Parse a single move token such as `c3-d4`, `C3 x D4` or `c3:d4`.
pub fn parse_move_token(token: &str) -> GameResult<Move> {
    let compact: String = token
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();

    let (from, to) = compact
        .split_once(&['-', 'x', ':'][..])
        .ok_or_else(|| GameError::InvalidMoveToken(token.to_owned()))?;

    let from = Square::from_algebraic(from)
        .map_err(|_| GameError::InvalidMoveToken(token.to_owned()))?;
    let to = Square::from_algebraic(to)
        .map_err(|_| GameError::InvalidMoveToken(token.to_owned()))?;

    Ok(Move::new(from, to))
}

/// Split a move list into tokens, dropping move numbers like `12.` or `3...`.
pub fn tokenize_moves(text: &str) -> Vec<&str> {
    text.split(|c: char| c.is_whitespace() || c == ',' || c == ';')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter(|token| !is_move_number(token))
        .collect()
}

fn is_move_number(token: &str) -> bool {
    let digits = token.trim_end_matches('.');
    let dots = token.len() - digits.len();
    (1..=3).contains(&dots) && !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}
