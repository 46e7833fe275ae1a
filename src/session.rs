use std::str::FromStr;

use serde::Serialize;

use crate::ai::{Difficulty, MoveSelector, Opponent};
use crate::error::EngineError;
use crate::game::GameState;
use crate::types::{GameSnapshot, Player, Position, Score};

/// The human's colour against the computer.
pub const HUMAN_PLAYER: Player = Player::Black;
/// The computer's colour.
pub const CPU_PLAYER: Player = Player::White;

/// Who controls White.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Two players sharing one board.
    #[default]
    Human,
    /// Human plays Black, the computer plays White.
    Cpu,
}

impl FromStr for GameMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "human" => Ok(GameMode::Human),
            "cpu" => Ok(GameMode::Cpu),
            other => Err(EngineError::UnknownMode(other.to_string())),
        }
    }
}

/// One game in progress plus the turn flow around it: human moves, computer
/// replies, and automatic passes.
pub struct GameSession {
    state: GameState,
    pub mode: GameMode,
    pub difficulty: Difficulty,
    selector: Box<dyn MoveSelector>,
}

impl GameSession {
    pub fn new(mode: GameMode, difficulty: Difficulty, selector: Box<dyn MoveSelector>) -> Self {
        Self {
            state: GameState::new(),
            mode,
            difficulty,
            selector,
        }
    }

    pub fn new_with_default_selector(mode: GameMode, difficulty: Difficulty) -> Self {
        Self::new(mode, difficulty, Box::new(Opponent::default()))
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn new_game(&mut self) {
        self.state = GameState::new();
        log::trace!("new game: mode={:?} difficulty={}", self.mode, self.difficulty);
    }

    /// Switching modes restarts the game.
    pub fn set_mode(&mut self, mode: GameMode) {
        self.mode = mode;
        self.new_game();
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Human move at `(row, col)` for the side to move.
    pub fn place(&mut self, row: u8, col: u8) -> Result<(), EngineError> {
        if self.state.is_game_over {
            return Err(EngineError::GameOver);
        }
        if self.mode == GameMode::Cpu && self.state.current_player != HUMAN_PLAYER {
            return Err(EngineError::NotYourTurn(HUMAN_PLAYER));
        }

        let pos = Position::new(row, col)?;
        let player = self.state.current_player;
        if !self.state.apply_move(pos, player) {
            return Err(EngineError::IllegalMove { row, col });
        }

        log::trace!("{player} plays ({row}, {col})");
        self.state.finish_turn();
        Ok(())
    }

    /// Lets the computer play White. Returns the move played, or `None` when
    /// White had to pass.
    pub fn cpu_move(&mut self) -> Result<Option<Position>, EngineError> {
        if self.state.is_game_over {
            return Err(EngineError::GameOver);
        }
        if !self.is_cpu_turn() {
            return Err(EngineError::NotYourTurn(CPU_PLAYER));
        }

        if !self.state.has_legal_move(CPU_PLAYER) {
            log::trace!("{CPU_PLAYER} has no move and passes");
            self.state.pass();
            self.state.check_terminal();
            return Ok(None);
        }

        let selected = self
            .selector
            .select_move(&self.state, self.difficulty)
            .ok_or(EngineError::MustMove(CPU_PLAYER))?;

        if !self.state.apply_move(selected, CPU_PLAYER) {
            return Err(EngineError::SelectorIllegalMove {
                row: selected.row(),
                col: selected.col(),
            });
        }

        log::trace!("{CPU_PLAYER} ({}) plays {selected:?}", self.difficulty);
        self.state.finish_turn();
        Ok(Some(selected))
    }

    /// Passes for a side to move that has no legal move.
    pub fn skip_turn(&mut self) -> Result<(), EngineError> {
        if self.state.is_game_over {
            return Err(EngineError::GameOver);
        }
        let player = self.state.current_player;
        if self.state.has_legal_move(player) {
            return Err(EngineError::MustMove(player));
        }

        log::trace!("{player} has no move and passes");
        self.state.pass();
        self.state.check_terminal();
        Ok(())
    }

    /// The side to move is stuck and the game is not over.
    pub fn needs_pass(&self) -> bool {
        !self.state.is_game_over && !self.state.has_legal_move(self.state.current_player)
    }

    pub fn is_cpu_turn(&self) -> bool {
        self.mode == GameMode::Cpu && !self.state.is_game_over && self.state.current_player == CPU_PLAYER
    }

    pub fn legal_moves(&self) -> Vec<Position> {
        self.state.legal_moves(self.state.current_player)
    }

    pub fn is_legal_move(&self, row: u8, col: u8) -> Result<bool, EngineError> {
        let pos = Position::new(row, col)?;
        Ok(self.state.is_legal_move(pos, self.state.current_player))
    }

    pub fn score(&self) -> Score {
        self.state.score()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    #[cfg(test)]
    fn set_state_for_test(&mut self, state: GameState) {
        self.state = state;
    }
}
