use crate::board::Board;
use crate::ledger::FlipLedger;
use crate::types::{GameSnapshot, Player, Position, Score, mask_to_positions};

/// Complete engine state: board, flip ledger and turn bookkeeping.
///
/// The state is `Copy`; every copy owns its own board and ledger, so search
/// code explores hypothetical lines on copies without touching the live game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    ledger: FlipLedger,
    pub current_player: Player,
    pub is_game_over: bool,
    /// `None` while undecided and for a draw.
    pub winner: Option<Player>,
    /// `true` when the previous action was a pass.
    pub is_pass: bool,
    last_flips: u64,
}

impl GameState {
    pub fn new() -> Self {
        Self::from_board(Board::new(), Player::Black)
    }

    /// Starts from an arbitrary position with every flip counter at 0.
    pub fn from_board(board: Board, current_player: Player) -> Self {
        Self::from_parts(board, FlipLedger::new(), current_player)
    }

    pub fn from_parts(board: Board, ledger: FlipLedger, current_player: Player) -> Self {
        Self {
            board,
            ledger,
            current_player,
            is_game_over: false,
            winner: None,
            is_pass: false,
            last_flips: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn ledger(&self) -> &FlipLedger {
        &self.ledger
    }

    pub fn cell(&self, pos: Position) -> Option<Player> {
        self.board.cell(pos)
    }

    pub fn flip_count(&self, pos: Position) -> u16 {
        self.ledger.get(pos)
    }

    pub fn is_legal_move(&self, pos: Position, player: Player) -> bool {
        self.board.flips_for(pos, player) != 0
    }

    /// Legal moves for `player` in row-major order.
    pub fn legal_moves(&self, player: Player) -> Vec<Position> {
        mask_to_positions(self.board.legal_moves(player))
    }

    pub fn has_legal_move(&self, player: Player) -> bool {
        self.board.legal_moves(player) != 0
    }

    /// Plays `player` at `pos`. Returns `false` and leaves the state untouched
    /// when the move is illegal.
    pub fn apply_move(&mut self, pos: Position, player: Player) -> bool {
        let flips = self.board.place(pos, player);
        if flips == 0 {
            return false;
        }

        self.ledger.record_placement(pos);
        self.ledger.record_flips(flips);
        self.is_pass = false;
        self.last_flips = flips;
        true
    }

    pub fn switch_player(&mut self) {
        self.current_player = self.current_player.opponent();
    }

    /// Hands the turn over without a move.
    pub fn pass(&mut self) {
        self.is_pass = true;
        self.last_flips = 0;
        self.switch_player();
    }

    /// Returns `true` when neither side can move.
    ///
    /// Not a pure query: on a terminal position it sets `is_game_over` and
    /// decides `winner`.
    pub fn check_terminal(&mut self) -> bool {
        if self.has_legal_move(Player::Black) || self.has_legal_move(Player::White) {
            return false;
        }

        self.is_game_over = true;
        self.determine_winner();
        true
    }

    /// Larger flip-count sum wins; equal sums are a draw. Stone counts do not
    /// decide the game.
    pub fn determine_winner(&mut self) {
        let score = self.score();
        self.winner = match score.black_flip_sum.cmp(&score.white_flip_sum) {
            std::cmp::Ordering::Greater => Some(Player::Black),
            std::cmp::Ordering::Less => Some(Player::White),
            std::cmp::Ordering::Equal => None,
        };
    }

    /// End-of-turn bookkeeping: detect the end of the game, otherwise hand the
    /// turn to the other side.
    pub fn finish_turn(&mut self) {
        if !self.check_terminal() {
            self.switch_player();
        }
    }

    /// Flip sums follow the colour currently on each square, not the colour
    /// that originally placed it.
    pub fn score(&self) -> Score {
        let (black_count, white_count) = self.board.count();
        Score {
            black_count,
            white_count,
            black_flip_sum: self.ledger.sum_over(self.board.stones(Player::Black)),
            white_flip_sum: self.ledger.sum_over(self.board.stones(Player::White)),
        }
    }

    pub fn occupied_count(&self) -> u8 {
        self.board.occupied_count()
    }

    pub fn empty_count(&self) -> u8 {
        self.board.empty_count()
    }

    /// Squares flipped by the last move; empty after a pass.
    pub fn flipped(&self) -> Vec<Position> {
        mask_to_positions(self.last_flips)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let occupied = self.board.occupied();
        let flip_counts = self
            .ledger
            .as_slice()
            .iter()
            .enumerate()
            .map(|(idx, &count)| if (occupied & (1u64 << idx)) != 0 { count } else { 0 })
            .collect();

        GameSnapshot {
            board: self.board.to_array().to_vec(),
            flip_counts,
            current_player: self.current_player,
            score: self.score(),
            is_game_over: self.is_game_over,
            winner: self.winner,
            is_pass: self.is_pass,
            flipped: self.flipped(),
            legal_moves: if self.is_game_over {
                Vec::new()
            } else {
                self.legal_moves(self.current_player)
            },
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_BOARD: u64 = u64::MAX;

    fn at(row: u8, col: u8) -> Position {
        Position::new(row, col).unwrap()
    }

    fn bit(row: u8, col: u8) -> u64 {
        at(row, col).bit()
    }

    #[test]
    fn initial_state_is_correct() {
        let state = GameState::new();
        let score = state.score();

        assert_eq!(state.current_player, Player::Black);
        assert_eq!(score.black_count, 2);
        assert_eq!(score.white_count, 2);
        assert_eq!(score.black_flip_sum + score.white_flip_sum, 0);
        assert!(!state.is_game_over);
        assert!(state.winner.is_none());
        for pos in [at(3, 3), at(3, 4), at(4, 3), at(4, 4)] {
            assert_eq!(state.flip_count(pos), 0);
        }
        assert_eq!(state.legal_moves(Player::Black).len(), 4);
    }

    #[test]
    fn opening_d3_flips_d4_and_records_one_flip() {
        let mut state = GameState::new();

        assert!(state.apply_move(at(2, 3), Player::Black));
        let score = state.score();

        assert_eq!(score.black_count, 4);
        assert_eq!(score.white_count, 1);
        assert_eq!(state.cell(at(3, 3)), Some(Player::Black));
        assert_eq!(state.flip_count(at(3, 3)), 1);
        assert_eq!(state.flip_count(at(2, 3)), 0);
        assert_eq!(score.black_flip_sum, 1);
        assert_eq!(state.flipped(), vec![at(3, 3)]);
        // apply_move never changes the turn on its own
        assert_eq!(state.current_player, Player::Black);
    }

    #[test]
    fn t02_illegal_move_returns_false_and_keeps_state() {
        let mut state = GameState::new();
        let before = state;

        assert!(!state.apply_move(at(0, 0), Player::Black));
        assert!(!state.apply_move(at(3, 3), Player::Black));
        assert!(!state.apply_move(at(2, 3), Player::White));
        assert_eq!(state, before);
    }

    #[test]
    fn legal_moves_are_row_major_and_independently_legal() {
        let state = GameState::new();
        let moves = state.legal_moves(Player::White);

        assert_eq!(moves, vec![at(2, 4), at(3, 5), at(4, 2), at(5, 3)]);
        for mv in moves {
            assert!(state.cell(mv).is_none());
            assert!(state.is_legal_move(mv, Player::White));
        }
    }

    #[test]
    fn clone_does_not_alias_the_original() {
        let original = GameState::new();
        let mut copy = original.clone();

        assert!(copy.apply_move(at(2, 3), Player::Black));
        copy.switch_player();

        assert_eq!(original.cell(at(3, 3)), Some(Player::White));
        assert_eq!(original.flip_count(at(3, 3)), 0);
        assert_eq!(original.current_player, Player::Black);
        assert_ne!(copy, original);
    }

    #[test]
    fn flip_sum_follows_current_occupant() {
        // d4 is flipped to black, then back to white: its two flips now count
        // for white even though black flipped it first.
        let mut state = GameState::new();
        assert!(state.apply_move(at(2, 3), Player::Black)); // d3 flips d4
        assert!(state.apply_move(at(2, 2), Player::White)); // c3 flips d4 back

        assert_eq!(state.cell(at(3, 3)), Some(Player::White));
        assert_eq!(state.flip_count(at(3, 3)), 2);

        let score = state.score();
        assert_eq!(score.white_flip_sum, 2);
        assert_eq!(score.black_flip_sum, 0);
    }

    #[test]
    fn t03_pass_switches_turn_and_clears_flips() {
        let black = bit(0, 1);
        let white = FULL_BOARD ^ bit(0, 0) ^ black;
        let mut state = GameState::from_board(Board::from_bitboards(black, white), Player::Black);

        assert!(!state.has_legal_move(Player::Black));
        state.pass();

        assert_eq!(state.current_player, Player::White);
        assert!(state.is_pass);
        assert!(state.flipped().is_empty());
        assert!(!state.is_game_over);
        assert!(state.has_legal_move(Player::White));
    }

    #[test]
    fn check_terminal_is_false_while_a_side_can_move() {
        let black = bit(0, 1);
        let white = FULL_BOARD ^ bit(0, 0) ^ black;
        let mut state = GameState::from_board(Board::from_bitboards(black, white), Player::Black);

        assert!(!state.check_terminal());
        assert!(!state.is_game_over);
        assert!(state.winner.is_none());
    }

    #[test]
    fn t04_terminal_position_decides_winner_by_flip_sum() {
        // White owns more stones, black owns more flips: black wins.
        let black = bit(0, 1) | bit(0, 2);
        let white = FULL_BOARD ^ black ^ bit(7, 7);
        let mut ledger = FlipLedger::new();
        ledger.set(at(0, 1), 3);
        ledger.set(at(0, 2), 2);
        ledger.set(at(4, 4), 4);
        let mut state = GameState::from_parts(Board::from_bitboards(black, white), ledger, Player::White);
        // h8 is empty but no line through it reaches a black stone
        assert!(!state.has_legal_move(Player::Black));
        assert!(!state.has_legal_move(Player::White));

        assert!(state.check_terminal());

        assert!(state.is_game_over);
        assert_eq!(state.winner, Some(Player::Black));
    }

    #[test]
    fn larger_flip_sum_wins_without_opponent_flips() {
        let mut ledger = FlipLedger::new();
        ledger.set(at(1, 1), 2);
        let mut state = GameState::from_parts(Board::from_bitboards(FULL_BOARD, 0), ledger, Player::Black);
        state.determine_winner();

        assert_eq!(state.winner, Some(Player::Black));
    }

    #[test]
    fn equal_flip_sums_are_a_draw() {
        let white = bit(7, 7);
        let black = FULL_BOARD ^ white;
        let mut ledger = FlipLedger::new();
        ledger.set(at(1, 1), 2);
        ledger.set(at(7, 7), 2);
        let mut state = GameState::from_parts(Board::from_bitboards(black, white), ledger, Player::Black);

        assert!(state.check_terminal());
        assert!(state.is_game_over);
        assert_eq!(state.winner, None);
    }

    #[test]
    fn finish_turn_switches_only_while_the_game_continues() {
        let mut state = GameState::new();
        assert!(state.apply_move(at(2, 3), Player::Black));
        state.finish_turn();
        assert_eq!(state.current_player, Player::White);

        let black = bit(0, 1);
        let white = FULL_BOARD ^ bit(0, 0) ^ black;
        let mut state = GameState::from_board(Board::from_bitboards(black, white), Player::White);
        assert!(state.apply_move(at(0, 0), Player::White));
        state.finish_turn();

        assert!(state.is_game_over);
        assert_eq!(state.current_player, Player::White);
        assert_eq!(state.score().white_count, 64);
        assert_eq!(state.winner, Some(Player::White));
    }

    #[test]
    fn snapshot_reports_cells_counts_and_moves() {
        let mut state = GameState::new();
        assert!(state.apply_move(at(2, 3), Player::Black));
        state.finish_turn();

        let snapshot = state.snapshot();

        assert_eq!(snapshot.board[at(3, 3).index()], 1);
        assert_eq!(snapshot.flip_counts[at(3, 3).index()], 1);
        assert_eq!(snapshot.current_player, Player::White);
        assert_eq!(snapshot.score.black_count, 4);
        assert_eq!(snapshot.flipped, vec![at(3, 3)]);
        assert_eq!(snapshot.legal_moves, state.legal_moves(Player::White));
        assert!(!snapshot.is_pass);
    }
}
