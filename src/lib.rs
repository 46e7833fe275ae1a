use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod error;
pub mod game;
pub mod ledger;
pub mod session;
pub mod types;
pub mod wasm;

pub use ai::{Difficulty, MoveSelector, Opponent, SearchConfig, choose_move};
pub use board::Board;
pub use error::EngineError;
pub use game::GameState;
pub use ledger::FlipLedger;
pub use session::{GameMode, GameSession};
pub use types::{GameSnapshot, Player, Position, Score};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
