use crate::error::Result;
use crate::math::WorldPoint;
use crate::pathfinding::grid::{GridConfig, NavGrid};
use crate::pathfinding::search::{CancelToken, PathResult, PathSearch};
use crate::pathfinding::simplify::simplify_path;
use crate::pathfinding::terrain::{RegionClassifier, TerrainClassifier};
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Full world description: grid layout plus terrain.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorldConfig {
    pub grid: GridConfig,
    #[serde(default)]
    pub terrain: RegionClassifier,
}

impl WorldConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// What a steering agent receives: turning points toward the goal.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PathOutcome {
    pub waypoints: Vec<WorldPoint>,
    pub success: bool,
}

impl PathOutcome {
    pub fn failed() -> Self {
        Self::default()
    }

    pub fn points(&self) -> Vec<DVec2> {
        self.waypoints.iter().map(|&p| DVec2::from(p)).collect()
    }
}

/// Owns a grid and answers world-space path queries against it.
#[derive(Clone, Debug)]
pub struct Pathfinder {
    grid: NavGrid,
}

impl Pathfinder {
    pub fn new<T: TerrainClassifier + ?Sized>(config: GridConfig, terrain: &T) -> Result<Self> {
        Ok(Self {
            grid: NavGrid::new(config, terrain)?,
        })
    }

    pub fn from_world(config: WorldConfig) -> Result<Self> {
        let mut terrain = config.terrain;
        terrain.probe_radius.get_or_insert(config.grid.cell_radius);
        terrain.validate()?;
        Self::new(config.grid, &terrain)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_world(WorldConfig::from_json(json)?)
    }

    pub fn grid(&self) -> &NavGrid {
        &self.grid
    }

    /// Raw search between the cells containing `start` and `goal`.
    pub fn search(&self, start: DVec2, goal: DVec2) -> PathResult {
        self.begin(start, goal).into_result()
    }

    /// Creates a resumable search for callers that step it themselves.
    pub fn begin(&self, start: DVec2, goal: DVec2) -> PathSearch<'_> {
        PathSearch::new(
            &self.grid,
            self.grid.cell_from_world(start),
            self.grid.cell_from_world(goal),
        )
    }

    pub fn find_path(&self, start: DVec2, goal: DVec2) -> PathOutcome {
        self.outcome(&self.search(start, goal))
    }

    pub fn find_path_with_cancel(&self, start: DVec2, goal: DVec2, cancel: &CancelToken) -> PathOutcome {
        let mut search = self.begin(start, goal);
        search.run_with_cancel(cancel);
        self.outcome(&search.into_result())
    }

    /// Simplifies a finished search into waypoints.
    pub fn outcome(&self, result: &PathResult) -> PathOutcome {
        if !result.success() {
            return PathOutcome::failed();
        }
        PathOutcome {
            waypoints: simplify_path(&self.grid, &result.cells)
                .into_iter()
                .map(WorldPoint::from)
                .collect(),
            success: true,
        }
    }
}
