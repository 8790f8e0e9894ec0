//! Value types for the 6×6 board: sides, piece kinds, squares and moves.
//!
//! Pieces carry no identity beyond the square they occupy; everything here is
//! `Copy` and compared by value.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{GameError, GameResult};
use crate::game_state::game_rules::BOARD_SIZE;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    White,
    Black,
}

impl Player {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Player::White => 0,
            Player::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// Rank delta of one step "forward" for this side.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Player::White => 1,
            Player::Black => -1,
        }
    }

    /// +1 for White, -1 for Black. Scores are kept from White's perspective.
    #[inline]
    pub const fn sign(self) -> i32 {
        match self {
            Player::White => 1,
            Player::Black => -1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::White => f.write_str("white"),
            Player::Black => f.write_str("black"),
        }
    }
}

/// Piece kind. `Breaker` only ever appears through promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Captain,
    Warden,
    Blade,
    Knight,
    Rook,
    Skirmisher,
    Breaker,
}

pub const ALL_PIECE_KINDS: [PieceKind; 7] = [
    PieceKind::Captain,
    PieceKind::Warden,
    PieceKind::Blade,
    PieceKind::Knight,
    PieceKind::Rook,
    PieceKind::Skirmisher,
    PieceKind::Breaker,
];

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Captain => 0,
            PieceKind::Warden => 1,
            PieceKind::Blade => 2,
            PieceKind::Knight => 3,
            PieceKind::Rook => 4,
            PieceKind::Skirmisher => 5,
            PieceKind::Breaker => 6,
        }
    }

    /// Single-letter code used in move notation and position text.
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Captain => 'C',
            PieceKind::Warden => 'W',
            PieceKind::Blade => 'B',
            PieceKind::Knight => 'N',
            PieceKind::Rook => 'R',
            PieceKind::Skirmisher => 'S',
            PieceKind::Breaker => 'X',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        ALL_PIECE_KINDS
            .into_iter()
            .find(|kind| kind.letter() == letter.to_ascii_uppercase())
    }
}

/// A piece on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub owner: Player,
    pub kind: PieceKind,
    /// Isolated at the end of its side's last move and not yet resolved.
    pub endangered: bool,
}

impl Piece {
    #[inline]
    pub const fn new(owner: Player, kind: PieceKind) -> Self {
        Self {
            owner,
            kind,
            endangered: false,
        }
    }
}

/// Board coordinate. `file` 0..=5 maps to `a`..`f`, `rank` 0..=5 to `1`..`6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Build a square, or `None` when either index is off the board.
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Option<Self> {
        if (file as usize) < BOARD_SIZE && (rank as usize) < BOARD_SIZE {
            Some(Self { file, rank })
        } else {
            None
        }
    }

    #[inline]
    pub const fn file(self) -> u8 {
        self.file
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// Row-major index `0..36`, `a1 == 0`, `f6 == 35`.
    #[inline]
    pub const fn index(self) -> usize {
        self.rank as usize * BOARD_SIZE + self.file as usize
    }

    /// Square reached by moving `(df, dr)`, if it stays on the board.
    #[inline]
    pub fn offset(self, df: i8, dr: i8) -> Option<Self> {
        let file = self.file as i8 + df;
        let rank = self.rank as i8 + dr;
        if file < 0 || rank < 0 {
            return None;
        }
        Self::new(file as u8, rank as u8)
    }

    /// Iterate every board square, file-major (`a1, a2, .. a6, b1, ..`).
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE as u8)
            .flat_map(|file| (0..BOARD_SIZE as u8).map(move |rank| Square { file, rank }))
    }

    /// Parse coordinate text such as `c3` (case-insensitive).
    pub fn from_algebraic(text: &str) -> GameResult<Self> {
        let bytes = text.trim().as_bytes();
        if bytes.len() != 2 {
            return Err(GameError::InvalidSquare(text.to_owned()));
        }

        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'f').contains(&file) || !(b'1'..=b'6').contains(&rank) {
            return Err(GameError::InvalidSquare(text.to_owned()));
        }

        Ok(Self {
            file: file - b'a',
            rank: rank - b'1',
        })
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            char::from(b'a' + self.file),
            char::from(b'1' + self.rank)
        )
    }
}

/// An origin/destination pair. Legality is decided by the move generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// Final result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win(Player),
    Draw,
}

/// Why the game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// One side has no pieces left.
    Elimination,
    /// The side to move has no legal move and loses.
    Stalemate,
    /// Third occurrence of the same position.
    Repetition,
    /// Too many half-moves without capture or isolation death.
    NoEventLimit,
}
