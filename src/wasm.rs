//! WebAssembly bindings for the simulator.
//!
//! This module provides JavaScript-friendly wrappers around the player. A
//! page drives it by forwarding key presses and calling `tick` on a timer.

use wasm_bindgen::prelude::*;
use crate::config::SimulationConfig;
use crate::cellular::Grid;
use crate::playback::{Event, FrameSequence, Player};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// WebAssembly-friendly simulation wrapper.
#[wasm_bindgen]
pub struct WasmSimulation {
    player: Player,
}

#[wasm_bindgen]
impl WasmSimulation {
    /// Create a randomly seeded simulation from a JSON configuration.
    ///
    /// A `seed` in the configuration makes the initial grid reproducible.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<WasmSimulation, JsError> {
        Self::build(config_json, None)
    }

    /// Create a simulation from a JSON configuration and an explicit grid.
    #[wasm_bindgen]
    pub fn with_grid(config_json: &str, grid: &str) -> Result<WasmSimulation, JsError> {
        let grid = Grid::parse(grid).map_err(|e| JsError::new(&e.to_string()))?;
        Self::build(config_json, Some(grid))
    }

    fn build(config_json: &str, grid: Option<Grid>) -> Result<WasmSimulation, JsError> {
        let config = SimulationConfig::from_json(config_json)
            .map_err(|e| JsError::new(&e.to_string()))?;
        let seed = config.build_seed(grid)
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(Self {
            player: Player::new(FrameSequence::new(seed, config.steps)),
        })
    }

    /// Forward a key press. Returns the playback state afterwards.
    #[wasm_bindgen]
    pub fn press(&mut self, key: char) -> String {
        format!("{:?}", self.player.handle(Some(Event::from_key(key))))
    }

    /// Advance playback by one poll interval without input.
    #[wasm_bindgen]
    pub fn tick(&mut self) -> String {
        format!("{:?}", self.player.handle(None))
    }

    /// Jump to a frame; out-of-range frames are ignored.
    #[wasm_bindgen]
    pub fn seek(&mut self, frame: usize) {
        self.player.frames_mut().seek(frame);
    }

    /// Current frame index (0-based).
    #[wasm_bindgen]
    pub fn cursor(&self) -> usize {
        self.player.frames().cursor()
    }

    #[wasm_bindgen]
    pub fn num_frames(&self) -> usize {
        self.player.frames().num_frames()
    }

    /// Current grid as newline separated rows.
    #[wasm_bindgen]
    pub fn grid_text(&mut self) -> String {
        self.player.frames_mut().current().to_string()
    }

    /// Current grid as an array of row strings.
    #[wasm_bindgen]
    pub fn rows(&mut self) -> js_sys::Array {
        self.player
            .frames_mut()
            .current()
            .grid()
            .iter_rows()
            .map(|row| JsValue::from_str(&row.iter().collect::<String>()))
            .collect()
    }

    /// Current frame as JSON.
    #[wasm_bindgen]
    pub fn frame_json(&mut self) -> Result<String, JsError> {
        serde_json::to_string(self.player.frames_mut().current())
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Description of the allowed cells.
    #[wasm_bindgen]
    pub fn legend(&mut self) -> String {
        self.player.frames_mut().current().legend()
    }
}
