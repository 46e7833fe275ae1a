//! Easy and medium tiers.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::game::GameState;
use crate::types::Position;

/// Uniformly random legal move for `state.current_player`.
pub fn random_move<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> Option<Position> {
    state.legal_moves(state.current_player).choose(rng).copied()
}

/// Move maximizing `2 * flip sum + stone count` for the mover right after
/// the move. Ties keep the earliest move in scan order.
pub fn greedy_move<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> Option<Position> {
    let mover = state.current_player;
    let moves = state.legal_moves(mover);
    if moves.is_empty() {
        return None;
    }

    let mut best_move = None;
    let mut best_score = -1i64;

    for &mv in &moves {
        let mut next = *state;
        if !next.apply_move(mv, mover) {
            continue;
        }
        let score = next.score();
        let move_score = 2 * i64::from(score.flip_sum(mover)) + i64::from(score.count(mover));
        if move_score > best_score {
            best_score = move_score;
            best_move = Some(mv);
        }
    }

    best_move.or_else(|| moves.choose(rng).copied())
}
