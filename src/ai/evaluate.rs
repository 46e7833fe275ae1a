use crate::board::{BOTTOM_EDGE, Board, CORNER_MASK, LEFT_EDGE, RIGHT_EDGE, TOP_EDGE};
use crate::game::GameState;
use crate::types::{NUM_SQUARES, Player};

const FLIP_WEIGHT: i64 = 1000;
const LATE_FLIP_WEIGHT: i64 = 2000;
const POSITION_WEIGHT: i64 = 50;
const STABILITY_WEIGHT: i64 = 30;
const MOBILITY_WEIGHT: i64 = 15;
const POTENTIAL_MOBILITY_WEIGHT: i64 = 5;
const COUNT_WEIGHT: i64 = 5;

/// Flat mobility score when the opponent is forced to pass.
const FORCED_PASS_BONUS: i64 = 100;

#[rustfmt::skip]
const POSITION_WEIGHTS: [i64; NUM_SQUARES] = [
    100, -20,  10,   5,   5,  10, -20, 100,
    -20, -50,  -5,  -5,  -5,  -5, -50, -20,
     10,  -5,   5,   0,   0,   5,  -5,  10,
      5,  -5,   0,   0,   0,   0,  -5,   5,
      5,  -5,   0,   0,   0,   0,  -5,   5,
     10,  -5,   5,   0,   0,   5,  -5,  10,
    -20, -50,  -5,  -5,  -5,  -5, -50, -20,
    100, -20,  10,   5,   5,  10, -20, 100,
];

/// Evaluate from `player`'s perspective. Higher is better for `player`.
///
/// The flip-sum difference dominates every other term because it decides
/// the game.
pub fn evaluate_position(state: &GameState, player: Player) -> i64 {
    let board = state.board();
    let opponent = player.opponent();
    let score = state.score();

    let flip_diff = i64::from(score.flip_sum(player)) - i64::from(score.flip_sum(opponent));
    let count_diff = i64::from(score.count(player)) - i64::from(score.count(opponent));

    let player_moves = i64::from(board.legal_moves(player).count_ones());
    let opponent_moves = i64::from(board.legal_moves(opponent).count_ones());

    let flip_weight = if is_late_game(board) {
        LATE_FLIP_WEIGHT
    } else {
        FLIP_WEIGHT
    };

    flip_diff * flip_weight
        + position_value(board, player) * POSITION_WEIGHT
        + stability(board, player) * STABILITY_WEIGHT
        + mobility(player_moves, opponent_moves) * MOBILITY_WEIGHT
        + player_moves * POTENTIAL_MOBILITY_WEIGHT
        + count_diff * COUNT_WEIGHT
}

/// More than 70% of the board is occupied.
fn is_late_game(board: &Board) -> bool {
    usize::from(board.occupied_count()) * 10 > NUM_SQUARES * 7
}

fn position_value(board: &Board, player: Player) -> i64 {
    weight_sum(board.stones(player)) - weight_sum(board.stones(player.opponent()))
}

fn weight_sum(mask: u64) -> i64 {
    let mut bits = mask;
    let mut sum = 0i64;
    while bits != 0 {
        sum += POSITION_WEIGHTS[bits.trailing_zeros() as usize];
        bits &= bits - 1;
    }
    sum
}

/// Corners count +-10; each border line a stone of `player` lies on adds 2,
/// so corner stones also score twice on the edge term.
fn stability(board: &Board, player: Player) -> i64 {
    let mine = board.stones(player);
    let theirs = board.stones(player.opponent());

    let corners =
        10 * i64::from((mine & CORNER_MASK).count_ones()) - 10 * i64::from((theirs & CORNER_MASK).count_ones());
    let edges: u32 = [TOP_EDGE, BOTTOM_EDGE, LEFT_EDGE, RIGHT_EDGE]
        .iter()
        .map(|edge| (mine & edge).count_ones())
        .sum();

    corners + 2 * i64::from(edges)
}

fn mobility(player_moves: i64, opponent_moves: i64) -> i64 {
    if opponent_moves == 0 && player_moves > 0 {
        FORCED_PASS_BONUS
    } else {
        (player_moves - opponent_moves) * 2
    }
}
