use crate::types::Player;

/// Errors raised by the session layer and by contract checks on coordinates.
///
/// Rule-level failures inside the engine are plain values (`apply_move`
/// returns `false`, `choose_move` returns `None`); this type covers what a
/// caller asked for that cannot be honoured.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("position out of bounds: ({row}, {col})")]
    OutOfBounds { row: u8, col: u8 },

    #[error("illegal move at ({row}, {col})")]
    IllegalMove { row: u8, col: u8 },

    #[error("game is already over")]
    GameOver,

    #[error("it is not {0}'s turn")]
    NotYourTurn(Player),

    #[error("{0} has a legal move and cannot pass")]
    MustMove(Player),

    #[error("move selector chose an illegal move at ({row}, {col})")]
    SelectorIllegalMove { row: u8, col: u8 },

    #[error("unknown difficulty: {0:?} (expected easy, medium or hard)")]
    UnknownDifficulty(String),

    #[error("unknown game mode: {0:?} (expected human or cpu)")]
    UnknownMode(String),
}
