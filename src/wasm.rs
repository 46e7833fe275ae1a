//! WASM bindings for the browser page.
//!
//! The page renders from the snapshot returned by `state()` (or by the move
//! calls) and owns all timing: it decides when to call `cpuMove` and
//! `skipTurn`.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::ai::Difficulty;
use crate::session::{GameMode, GameSession};

/// JS-facing wrapper around one game session.
#[wasm_bindgen]
pub struct WasmGame {
    inner: GameSession,
}

#[wasm_bindgen]
impl WasmGame {
    /// `mode` is `"human"` or `"cpu"`, `difficulty` is `"easy"`, `"medium"` or `"hard"`.
    #[wasm_bindgen(constructor)]
    pub fn new(mode: &str, difficulty: &str) -> Result<WasmGame, JsError> {
        let mode: GameMode = mode.parse()?;
        let difficulty: Difficulty = difficulty.parse()?;
        Ok(WasmGame {
            inner: GameSession::new_with_default_selector(mode, difficulty),
        })
    }

    #[wasm_bindgen(js_name = newGame)]
    pub fn new_game(&mut self) -> Result<JsValue, JsError> {
        self.inner.new_game();
        self.state()
    }

    #[wasm_bindgen(js_name = setMode)]
    pub fn set_mode(&mut self, mode: &str) -> Result<JsValue, JsError> {
        self.inner.set_mode(mode.parse()?);
        self.state()
    }

    #[wasm_bindgen(js_name = setDifficulty)]
    pub fn set_difficulty(&mut self, difficulty: &str) -> Result<(), JsError> {
        self.inner.set_difficulty(difficulty.parse()?);
        Ok(())
    }

    /// Human move for the side to move. Returns the new state.
    pub fn place(&mut self, row: u8, col: u8) -> Result<JsValue, JsError> {
        self.inner.place(row, col)?;
        self.state()
    }

    /// Computer move (or pass) for White. Returns the new state.
    #[wasm_bindgen(js_name = cpuMove)]
    pub fn cpu_move(&mut self) -> Result<JsValue, JsError> {
        self.inner.cpu_move()?;
        self.state()
    }

    /// Pass for a side with no legal move. Returns the new state.
    #[wasm_bindgen(js_name = skipTurn)]
    pub fn skip_turn(&mut self) -> Result<JsValue, JsError> {
        self.inner.skip_turn()?;
        self.state()
    }

    #[wasm_bindgen(js_name = needsPass)]
    pub fn needs_pass(&self) -> bool {
        self.inner.needs_pass()
    }

    #[wasm_bindgen(js_name = isCpuTurn)]
    pub fn is_cpu_turn(&self) -> bool {
        self.inner.is_cpu_turn()
    }

    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.inner.state().is_game_over
    }

    /// Legal moves of the side to move as `[{ row, col }, ...]`.
    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.legal_moves())
    }

    #[wasm_bindgen(js_name = isLegalMove)]
    pub fn is_legal_move(&self, row: u8, col: u8) -> Result<bool, JsError> {
        Ok(self.inner.is_legal_move(row, col)?)
    }

    pub fn score(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.score())
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.snapshot())
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|err| JsError::new(&err.to_string()))
}
