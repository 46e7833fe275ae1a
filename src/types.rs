use std::fmt;

use serde::Serialize;

use crate::error::EngineError;

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// Side to move. Serialized as `1` (black) / `2` (white) for the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u8")]
pub enum Player {
    Black,
    White,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }
}

impl From<Player> for u8 {
    fn from(player: Player) -> Self {
        match player {
            Player::Black => 1,
            Player::White => 2,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Black => f.write_str("black"),
            Player::White => f.write_str("white"),
        }
    }
}

/// A board coordinate. Only constructible inside the 8x8 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    pub fn new(row: u8, col: u8) -> Result<Self, EngineError> {
        if row as usize >= BOARD_SIZE || col as usize >= BOARD_SIZE {
            return Err(EngineError::OutOfBounds { row, col });
        }
        Ok(Self { row, col })
    }

    /// Caller contract: `index < 64`.
    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(index < NUM_SQUARES, "square index out of range: {index}");
        Self {
            row: (index / BOARD_SIZE) as u8,
            col: (index % BOARD_SIZE) as u8,
        }
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }

    /// Row-major square index (0..=63).
    pub fn index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    pub(crate) fn bit(self) -> u64 {
        1u64 << self.index()
    }
}

/// Stone counts and flip-count sums, grouped by the colour currently on each square.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Score {
    pub black_count: u8,
    pub white_count: u8,
    pub black_flip_sum: u32,
    pub white_flip_sum: u32,
}

impl Score {
    pub fn count(&self, player: Player) -> u8 {
        match player {
            Player::Black => self.black_count,
            Player::White => self.white_count,
        }
    }

    pub fn flip_sum(&self, player: Player) -> u32 {
        match player {
            Player::Black => self.black_flip_sum,
            Player::White => self.white_flip_sum,
        }
    }
}

/// Public game state returned to the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    /// 0=empty, 1=black, 2=white, row-major.
    pub board: Vec<u8>,
    /// Flip count per square; 0 for empty squares.
    pub flip_counts: Vec<u16>,
    pub current_player: Player,
    pub score: Score,
    pub is_game_over: bool,
    /// `None` while the game runs, and on a draw once it is over.
    pub winner: Option<Player>,
    /// Contract:
    /// - `true` when the previous action was a pass.
    /// - `false` when the previous action was a normal move.
    pub is_pass: bool,
    /// Contract:
    /// - Normal move: squares flipped by it.
    /// - Pass: must be an empty list.
    pub flipped: Vec<Position>,
    pub legal_moves: Vec<Position>,
}

/// Collects the set bits of `mask` as positions in row-major order.
pub(crate) fn mask_to_positions(mask: u64) -> Vec<Position> {
    let mut bits = mask;
    let mut out = Vec::with_capacity(bits.count_ones() as usize);

    while bits != 0 {
        out.push(Position::from_index(bits.trailing_zeros() as usize));
        bits &= bits - 1;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_rejects_out_of_range_coordinates() {
        assert_eq!(
            Position::new(8, 0),
            Err(EngineError::OutOfBounds { row: 8, col: 0 })
        );
        assert_eq!(
            Position::new(3, 200),
            Err(EngineError::OutOfBounds { row: 3, col: 200 })
        );
        assert!(Position::new(7, 7).is_ok());
    }

    #[test]
    fn position_index_is_row_major() {
        let pos = Position::new(2, 3).unwrap();
        assert_eq!(pos.index(), 19);
        assert_eq!(Position::from_index(19), pos);
    }

    #[test]
    fn mask_to_positions_preserves_scan_order() {
        let mask = (1u64 << 44) | (1u64 << 19) | (1u64 << 26);
        let positions: Vec<usize> = mask_to_positions(mask).into_iter().map(Position::index).collect();

        assert_eq!(positions, vec![19, 26, 44]);
    }

    #[test]
    fn player_opponent_toggles() {
        assert_eq!(Player::Black.opponent(), Player::White);
        assert_eq!(Player::White.opponent(), Player::Black);
        assert_eq!(u8::from(Player::White), 2);
    }
}
