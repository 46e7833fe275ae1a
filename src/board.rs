use once_cell::sync::Lazy;

use crate::types::{BOARD_SIZE, NUM_SQUARES, Player, Position};

pub(crate) const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub(crate) const CORNERS: [usize; 4] = [0, 7, 56, 63];
pub(crate) const CORNER_MASK: u64 = bit(0) | bit(7) | bit(56) | bit(63);
pub(crate) const TOP_EDGE: u64 = 0x0000_0000_0000_00FF;
pub(crate) const BOTTOM_EDGE: u64 = 0xFF00_0000_0000_0000;
pub(crate) const LEFT_EDGE: u64 = 0x0101_0101_0101_0101;
pub(crate) const RIGHT_EDGE: u64 = 0x8080_8080_8080_8080;

/// Squares touching a corner in any of the eight directions (b1, a2, b2, ...).
pub(crate) static CORNER_ADJACENT: Lazy<u64> = Lazy::new(|| {
    let mut mask = 0u64;
    for corner in CORNERS {
        let (row, col) = pos_to_row_col(corner);
        for (dr, dc) in DIRECTIONS {
            let (r, c) = (row + dr, col + dc);
            if in_bounds(r, c) {
                mask |= bit((r as usize) * BOARD_SIZE + c as usize);
            }
        }
    }
    mask
});

/// Reversi board state represented by two bitboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    black: u64,
    white: u64,
}

impl Board {
    /// Creates the initial board:
    /// d4=white, e4=black, d5=black, e5=white.
    pub fn new() -> Self {
        Self {
            black: bit(28) | bit(35),
            white: bit(27) | bit(36),
        }
    }

    /// Builds a board from raw masks. Bit `row * 8 + col` marks a stone.
    /// Caller contract: the masks do not overlap.
    pub fn from_bitboards(black: u64, white: u64) -> Self {
        debug_assert_eq!(black & white, 0, "black and white masks overlap");
        Self { black, white }
    }

    pub fn stones(&self, player: Player) -> u64 {
        match player {
            Player::Black => self.black,
            Player::White => self.white,
        }
    }

    pub fn occupied(&self) -> u64 {
        self.black | self.white
    }

    pub fn cell(&self, pos: Position) -> Option<Player> {
        let square = pos.bit();
        if (self.black & square) != 0 {
            Some(Player::Black)
        } else if (self.white & square) != 0 {
            Some(Player::White)
        } else {
            None
        }
    }

    /// Returns legal move mask for the given side.
    pub fn legal_moves(&self, player: Player) -> u64 {
        let (me, opp) = self.sides(player);
        let occupied = me | opp;
        let mut legal = 0u64;

        for pos in 0..NUM_SQUARES {
            let move_bit = bit(pos);
            if (occupied & move_bit) != 0 {
                continue;
            }
            if Self::collect_flips(pos, me, opp) != 0 {
                legal |= move_bit;
            }
        }

        legal
    }

    /// Stones `player` would flip by playing at `pos`; 0 when the move is illegal.
    pub fn flips_for(&self, pos: Position, player: Player) -> u64 {
        let (me, opp) = self.sides(player);
        Self::collect_flips(pos.index(), me, opp)
    }

    /// Places one stone and flips captured stones.
    /// Returns flipped bit mask. Returns 0 when move is illegal.
    pub fn place(&mut self, pos: Position, player: Player) -> u64 {
        let (me, opp) = self.sides(player);

        let flips = Self::collect_flips(pos.index(), me, opp);
        if flips == 0 {
            return 0;
        }

        let next_me = me | pos.bit() | flips;
        let next_opp = opp & !flips;

        match player {
            Player::Black => {
                self.black = next_me;
                self.white = next_opp;
            }
            Player::White => {
                self.white = next_me;
                self.black = next_opp;
            }
        }

        flips
    }

    /// Returns `(black_count, white_count)`.
    pub fn count(&self) -> (u8, u8) {
        (self.black.count_ones() as u8, self.white.count_ones() as u8)
    }

    pub fn occupied_count(&self) -> u8 {
        self.occupied().count_ones() as u8
    }

    /// Returns the number of empty squares.
    pub fn empty_count(&self) -> u8 {
        NUM_SQUARES as u8 - self.occupied_count()
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=black, 2=white.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for (pos, cell) in board.iter_mut().enumerate() {
            let square = bit(pos);
            *cell = if (self.black & square) != 0 {
                1
            } else if (self.white & square) != 0 {
                2
            } else {
                0
            };
        }
        board
    }

    fn sides(&self, player: Player) -> (u64, u64) {
        match player {
            Player::Black => (self.black, self.white),
            Player::White => (self.white, self.black),
        }
    }

    /// Every run is measured against the board as it is before the move.
    fn collect_flips(pos: usize, me: u64, opp: u64) -> u64 {
        if pos >= NUM_SQUARES {
            return 0;
        }

        let move_bit = bit(pos);
        if ((me | opp) & move_bit) != 0 {
            return 0;
        }

        let (row, col) = pos_to_row_col(pos);
        let mut flips = 0u64;

        for (dr, dc) in DIRECTIONS {
            let mut r = row + dr;
            let mut c = col + dc;
            let mut line = 0u64;

            while in_bounds(r, c) {
                let square = bit((r as usize) * BOARD_SIZE + c as usize);
                if (opp & square) != 0 {
                    line |= square;
                } else {
                    if (me & square) != 0 {
                        flips |= line;
                    }
                    break;
                }

                r += dr;
                c += dc;
            }
        }

        flips
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) const fn bit(pos: usize) -> u64 {
    if pos < NUM_SQUARES { 1u64 << pos } else { 0 }
}

fn pos_to_row_col(pos: usize) -> (i32, i32) {
    ((pos / BOARD_SIZE) as i32, (pos % BOARD_SIZE) as i32)
}

fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idx(row: usize, col: usize) -> usize {
        row * BOARD_SIZE + col
    }

    fn at(row: u8, col: u8) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn t01_initial_black_legal_moves_are_four_expected_squares() {
        let board = Board::new();

        let expected = bit(idx(2, 3)) | bit(idx(3, 2)) | bit(idx(4, 5)) | bit(idx(5, 4)); // d3,c4,f5,e6

        assert_eq!(board.legal_moves(Player::Black), expected);
    }

    #[test]
    fn initial_cells_match_standard_setup() {
        let board = Board::new();

        assert_eq!(board.cell(at(3, 3)), Some(Player::White));
        assert_eq!(board.cell(at(4, 4)), Some(Player::White));
        assert_eq!(board.cell(at(3, 4)), Some(Player::Black));
        assert_eq!(board.cell(at(4, 3)), Some(Player::Black));
        assert_eq!(board.occupied_count(), 4);
    }

    #[test]
    fn place_flips_opponent_stones_and_updates_counts() {
        let mut board = Board::new();

        let flips = board.place(at(2, 3), Player::Black); // d3

        assert_eq!(flips, bit(idx(3, 3))); // d4
        assert_eq!(board.count(), (4, 1));
        assert_eq!(board.empty_count(), 59);

        let cells = board.to_array();
        assert_eq!(cells[idx(2, 3)], 1);
        assert_eq!(cells[idx(3, 3)], 1);
        assert_eq!(cells[idx(3, 4)], 1);
        assert_eq!(cells[idx(4, 3)], 1);
        assert_eq!(cells[idx(4, 4)], 2);
    }

    #[test]
    fn illegal_place_returns_zero_and_keeps_board_unchanged() {
        let mut board = Board::new();
        let before = board;

        let flips = board.place(at(0, 0), Player::Black);

        assert_eq!(flips, 0);
        assert_eq!(board, before);
    }

    #[test]
    fn run_ending_on_edge_without_own_stone_is_not_captured() {
        // Black at a1, white at b1..g1, h1 empty: playing h1 flips the row,
        // but a white run ending at the board edge flips nothing.
        let white_row = (1..7).fold(0u64, |acc, c| acc | bit(idx(0, c)));
        let board = Board::from_bitboards(bit(idx(0, 0)), white_row);

        assert_eq!(board.flips_for(at(0, 7), Player::Black), white_row);
        assert_eq!(board.flips_for(at(1, 7), Player::Black), 0);
    }

    #[test]
    fn only_runs_bounded_by_own_stone_are_flipped() {
        // White b2 sits between c3 and black a1; white d3 runs towards an
        // empty e3. Only b2 flips.
        let black = bit(idx(0, 0));
        let white = bit(idx(1, 1)) | bit(idx(2, 3));
        let mut board = Board::from_bitboards(black, white);

        let flips = board.place(at(2, 2), Player::Black);

        assert_eq!(flips, bit(idx(1, 1)));
        assert_eq!(board.cell(at(2, 3)), Some(Player::White));
    }

    #[test]
    fn corner_adjacent_mask_covers_twelve_squares() {
        let mask = *CORNER_ADJACENT;

        assert_eq!(mask.count_ones(), 12);
        assert_ne!(mask & bit(idx(1, 1)), 0);
        assert_ne!(mask & bit(idx(6, 7)), 0);
        assert_eq!(mask & CORNER_MASK, 0);
    }

    #[test]
    fn edge_masks_cover_board_border() {
        let border = TOP_EDGE | BOTTOM_EDGE | LEFT_EDGE | RIGHT_EDGE;

        assert_eq!(border.count_ones(), 28);
        assert_eq!(border & CORNER_MASK, CORNER_MASK);
    }
}
