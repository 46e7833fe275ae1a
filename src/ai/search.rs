use std::time::Duration;

use serde::Serialize;
use web_time::Instant;

use crate::ai::config::SearchConfig;
use crate::ai::evaluate::evaluate_position;
use crate::board::{CORNER_ADJACENT, CORNER_MASK};
use crate::game::GameState;
use crate::types::{Player, Position};

/// Value of a finished game won by the searching side.
pub const WIN_SCORE: i64 = 1_000_000;
const MIN_SCORE: i64 = i64::MIN;
const MAX_SCORE: i64 = i64::MAX;

/// Game phase, decided by how full the board is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Opening,
    Midgame,
    Endgame,
}

impl Phase {
    pub fn of(state: &GameState, config: &SearchConfig) -> Self {
        if state.empty_count() <= config.endgame_empty_threshold {
            Phase::Endgame
        } else if state.occupied_count() >= config.midgame_min_stones {
            Phase::Midgame
        } else {
            Phase::Opening
        }
    }
}

/// Counters from the last search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    pub phase: Phase,
    pub depth: u8,
    pub nodes: u64,
    pub cutoffs: u64,
    pub elapsed: Duration,
}

impl Default for SearchStats {
    fn default() -> Self {
        Self {
            phase: Phase::Opening,
            depth: 0,
            nodes: 0,
            cutoffs: 0,
            elapsed: Duration::ZERO,
        }
    }
}

/// Hard-tier move search: phase routing, minimax with alpha-beta, and the
/// one-ply opening heuristic.
pub struct Searcher<'a> {
    config: &'a SearchConfig,
    stats: SearchStats,
}

impl<'a> Searcher<'a> {
    pub fn new(config: &'a SearchConfig) -> Self {
        Self {
            config,
            stats: SearchStats::default(),
        }
    }

    /// Best move for `state.current_player`, or `None` without legal moves.
    pub fn search(&mut self, state: &GameState) -> Option<Position> {
        let start_time = Instant::now();
        self.stats = SearchStats::default();

        let moves = state.legal_moves(state.current_player);
        if moves.is_empty() {
            return None;
        }

        let phase = Phase::of(state, self.config);
        self.stats.phase = phase;

        let best = match phase {
            Phase::Endgame => {
                let depth = self.config.endgame_depth(state.empty_count());
                self.minimax(state, &moves, depth)
            }
            Phase::Midgame => self.minimax(state, &moves, self.config.midgame_depth),
            Phase::Opening => opening_move(state, &moves),
        };

        self.stats.elapsed = start_time.elapsed();
        log::debug!(
            "search {:?} depth={} nodes={} cutoffs={} elapsed={:?} -> {:?}",
            self.stats.phase,
            self.stats.depth,
            self.stats.nodes,
            self.stats.cutoffs,
            self.stats.elapsed,
            best
        );

        best
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Root of the minimax search for `state.current_player`.
    ///
    /// Each root move is scored by an independent minimizing search with
    /// full bounds. Strictly better scores replace the best move, so ties go
    /// to the earliest move in `moves`.
    pub fn minimax(&mut self, state: &GameState, moves: &[Position], depth: u8) -> Option<Position> {
        let mover = state.current_player;
        self.stats.depth = depth;

        let mut best: Option<(Position, i64)> = None;
        for &mv in moves {
            let mut child = *state;
            if !child.apply_move(mv, mover) {
                continue;
            }
            child.switch_player();

            let value = self.minimax_value(&child, depth.saturating_sub(1), false, MIN_SCORE, MAX_SCORE, mover);
            if best.is_none_or(|(_, best_value)| value > best_value) {
                best = Some((mv, value));
            }
        }

        best.map(|(mv, _)| mv).or_else(|| moves.first().copied())
    }

    /// Minimax value of `game` for `mover`, the side that started the search.
    ///
    /// Maximizing nodes move for `mover`, minimizing nodes for its opponent.
    /// A side without moves passes and the search continues one ply shallower.
    pub fn minimax_value(
        &mut self,
        game: &GameState,
        depth: u8,
        maximizing: bool,
        alpha: i64,
        beta: i64,
        mover: Player,
    ) -> i64 {
        self.stats.nodes += 1;

        if game.is_game_over {
            return terminal_value(game, mover);
        }
        if depth == 0 {
            return evaluate_position(game, mover);
        }

        let side = if maximizing { mover } else { mover.opponent() };
        let mut bits = game.board().legal_moves(side);

        if bits == 0 {
            let mut next = *game;
            next.switch_player();
            next.check_terminal();
            return self.minimax_value(&next, depth - 1, !maximizing, alpha, beta, mover);
        }

        let mut alpha = alpha;
        let mut beta = beta;
        let mut best = if maximizing { MIN_SCORE } else { MAX_SCORE };

        while bits != 0 {
            let mv = Position::from_index(bits.trailing_zeros() as usize);
            bits &= bits - 1;

            let mut child = *game;
            if !child.apply_move(mv, side) {
                continue;
            }
            child.finish_turn();

            let value = self.minimax_value(&child, depth - 1, !maximizing, alpha, beta, mover);
            if maximizing {
                best = best.max(value);
                alpha = alpha.max(value);
            } else {
                best = best.min(value);
                beta = beta.min(value);
            }
            if beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }

        best
    }
}

/// One-ply heuristic used before the midgame.
///
/// A corner is taken at once. Otherwise squares touching a corner are avoided
/// unless nothing else is legal, and the remaining moves are ranked by the
/// static evaluation of the resulting position.
pub fn opening_move(state: &GameState, moves: &[Position]) -> Option<Position> {
    let mover = state.current_player;

    if let Some(&corner) = moves.iter().find(|mv| (mv.bit() & CORNER_MASK) != 0) {
        return Some(corner);
    }

    let adjacent = *CORNER_ADJACENT;
    let safe: Vec<Position> = moves
        .iter()
        .copied()
        .filter(|mv| (mv.bit() & adjacent) == 0)
        .collect();
    let candidates = if safe.is_empty() { moves } else { &safe };

    let mut best: Option<(Position, i64)> = None;
    for &mv in candidates {
        let mut next = *state;
        if !next.apply_move(mv, mover) {
            continue;
        }
        let score = evaluate_position(&next, mover);
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((mv, score));
        }
    }

    best.map(|(mv, _)| mv).or_else(|| candidates.first().copied())
}

fn terminal_value(game: &GameState, mover: Player) -> i64 {
    match game.winner {
        Some(winner) if winner == mover => WIN_SCORE,
        Some(_) => -WIN_SCORE,
        None => 0,
    }
}
