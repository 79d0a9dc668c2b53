//! Grid pathfinding: spatial index, indexed heap, A* search and waypoint
//! simplification.

pub mod grid;
pub mod heap;
pub mod request;
pub mod search;
pub mod simplify;
pub mod terrain;

pub use grid::{Cell, CellId, GridConfig, NavGrid};
pub use heap::{HeapSlots, IndexedHeap};
pub use request::{PathOutcome, Pathfinder, WorldConfig};
pub use search::{octile_distance, CancelToken, Cost, PathFailure, PathResult, PathSearch, SearchState};
pub use simplify::{simplify_cells, simplify_path};
pub use terrain::{PenaltyRegion, Rect, RegionClassifier, Terrain, TerrainClassifier};
