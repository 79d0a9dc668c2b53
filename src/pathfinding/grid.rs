use crate::error::{ConfigError, Result};
use crate::pathfinding::terrain::TerrainClassifier;
use glam::{DVec2, IVec2};
use log::debug;
use serde::{Deserialize, Serialize};

// ============================================================================
// Data Structures
// ============================================================================

/// Index of a cell in the grid's row-major cell array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId(pub usize);

/// One grid cell. Immutable once the grid is built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub coord: IVec2,
    /// World-space center of the cell.
    pub world: DVec2,
    pub walkable: bool,
    /// Added to the cost of every step that enters this cell.
    pub penalty: u32,
}

/// Largest grid `NavGrid::new` will allocate.
pub const MAX_CELLS: usize = 1 << 26;

/// Grid construction options.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct GridConfig {
    /// World-space center of the grid.
    pub origin: DVec2,
    /// World width (x) and height (y) covered by the grid.
    pub extent: DVec2,
    pub cell_radius: f64,
}

impl GridConfig {
    pub fn new(origin: DVec2, extent: DVec2, cell_radius: f64) -> Self {
        Self { origin, extent, cell_radius }
    }

    pub fn cell_diameter(&self) -> f64 {
        self.cell_radius * 2.0
    }

    /// Cells per axis: extent / diameter, rounded to nearest.
    ///
    /// Only meaningful for a config that passed [`validate`](Self::validate).
    pub fn dimensions(&self) -> IVec2 {
        let (w, h) = self.axis_cells();
        IVec2::new(w as i32, h as i32)
    }

    fn axis_cells(&self) -> (f64, f64) {
        let d = self.cell_diameter();
        ((self.extent.x / d).round(), (self.extent.y / d).round())
    }

    pub fn validate(&self) -> Result<()> {
        if !self.origin.is_finite() || !self.extent.is_finite() || !self.cell_radius.is_finite() {
            return Err(ConfigError::NonFinite);
        }
        if self.cell_radius <= 0.0 {
            return Err(ConfigError::NonPositiveRadius(self.cell_radius));
        }
        if self.extent.x <= 0.0 || self.extent.y <= 0.0 {
            return Err(ConfigError::DegenerateExtent(self.extent.x, self.extent.y));
        }
        let (w, h) = self.axis_cells();
        if w < 1.0 || h < 1.0 {
            return Err(ConfigError::EmptyGrid(self.extent.x, self.extent.y, self.cell_radius));
        }
        match (w as usize).checked_mul(h as usize) {
            Some(count) if count <= MAX_CELLS => Ok(()),
            _ => Err(ConfigError::TooLarge(w, h)),
        }
    }
}

// ============================================================================
// Grid Implementation
// ============================================================================

/// Uniform grid over a rectangular world area.
///
/// Built once from a [`GridConfig`] and a terrain classifier. Searches never
/// write to it; all per-search state lives in the search itself.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NavGrid {
    config: GridConfig,
    width: i32,
    height: i32,
    /// Row-major: index = y * width + x.
    cells: Vec<Cell>,
}

impl NavGrid {
    pub fn new<T: TerrainClassifier + ?Sized>(config: GridConfig, terrain: &T) -> Result<Self> {
        config.validate()?;

        let dims = config.dimensions();
        let diameter = config.cell_diameter();
        let bottom_left = config.origin - config.extent / 2.0;

        let mut cells = Vec::with_capacity(dims.x as usize * dims.y as usize);
        let mut blocked = 0usize;
        for y in 0..dims.y {
            for x in 0..dims.x {
                let world = bottom_left
                    + DVec2::new(
                        x as f64 * diameter + config.cell_radius,
                        y as f64 * diameter + config.cell_radius,
                    );
                let sample = terrain.classify(world);
                if !sample.walkable {
                    blocked += 1;
                }
                cells.push(Cell {
                    coord: IVec2::new(x, y),
                    world,
                    walkable: sample.walkable,
                    penalty: if sample.walkable { sample.penalty } else { 0 },
                });
            }
        }

        debug!(
            "[NavGrid] built {}x{} cells (diameter {:.3}), {} blocked",
            dims.x, dims.y, diameter, blocked
        );

        Ok(Self {
            config,
            width: dims.x,
            height: dims.y,
            cells,
        })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Total number of cells; also the most cells a search can ever queue.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.0]
    }

    pub fn in_bounds(&self, coord: IVec2) -> bool {
        coord.x >= 0 && coord.x < self.width && coord.y >= 0 && coord.y < self.height
    }

    pub fn id_at(&self, coord: IVec2) -> Option<CellId> {
        if self.in_bounds(coord) {
            Some(CellId((coord.y * self.width + coord.x) as usize))
        } else {
            None
        }
    }

    /// Resolves a world point to its containing cell.
    ///
    /// Points outside the grid are clamped to the nearest edge cell.
    pub fn cell_from_world(&self, pos: DVec2) -> CellId {
        let extent = self.config.extent;
        let local = pos - self.config.origin + extent / 2.0;
        let percent = (local / extent).clamp(DVec2::ZERO, DVec2::ONE);

        let x = (percent.x * self.width as f64).min((self.width - 1) as f64).floor() as i32;
        let y = (percent.y * self.height as f64).min((self.height - 1) as f64).floor() as i32;

        CellId((y * self.width + x) as usize)
    }

    pub fn world_from_cell(&self, id: CellId) -> DVec2 {
        self.cells[id.0].world
    }

    /// 8-connected in-bounds neighbors.
    ///
    /// Diagonals are included whenever they are in bounds, even if both
    /// orthogonal cells beside them are blocked.
    pub fn neighbors(&self, id: CellId) -> impl Iterator<Item = CellId> + '_ {
        let center = self.cells[id.0].coord;
        (-1..=1)
            .flat_map(|dx| (-1..=1).map(move |dy| IVec2::new(dx, dy)))
            .filter(|offset| *offset != IVec2::ZERO)
            .filter_map(move |offset| self.id_at(center + offset))
    }
}
