pub mod error;
pub mod math;
pub mod pathfinding;

use wasm_bindgen::prelude::*;
use glam::DVec2;
use crate::pathfinding::request::Pathfinder;

pub use crate::error::ConfigError;
pub use crate::math::WorldPoint;
pub use crate::pathfinding::{
    CancelToken, CellId, GridConfig, NavGrid, PathOutcome, PathResult, PathSearch, Terrain,
    TerrainClassifier, WorldConfig,
};

// --- WASM FACADE ---
// The grid is built once from a JSON world description and then answers
// path queries. Results cross the boundary as plain JS objects.
#[wasm_bindgen]
pub struct NavWorld {
    pathfinder: Pathfinder,
}

#[wasm_bindgen]
impl NavWorld {
    /// Builds the grid from a `WorldConfig` JSON document.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: String) -> Result<NavWorld, JsValue> {
        // Panic hook for better error logging in browser console
        console_error_panic_hook::set_once();

        let pathfinder =
            Pathfinder::from_json(&config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(NavWorld { pathfinder })
    }

    /// Returns `{ waypoints: [{x, y}, ...], success }`.
    pub fn find_path(&self, start_x: f64, start_y: f64, goal_x: f64, goal_y: f64) -> Result<JsValue, JsValue> {
        let outcome = self
            .pathfinder
            .find_path(DVec2::new(start_x, start_y), DVec2::new(goal_x, goal_y));
        serde_wasm_bindgen::to_value(&outcome).map_err(JsValue::from)
    }

    pub fn grid_width(&self) -> i32 {
        self.pathfinder.grid().width()
    }

    pub fn grid_height(&self) -> i32 {
        self.pathfinder.grid().height()
    }

    pub fn cell_count(&self) -> usize {
        self.pathfinder.grid().cell_count()
    }
}
