use crate::error::{ConfigError, Result};
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Walkability and extra traversal cost sampled at one point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Terrain {
    pub walkable: bool,
    pub penalty: u32,
}

impl Terrain {
    pub const OPEN: Terrain = Terrain { walkable: true, penalty: 0 };
    pub const BLOCKED: Terrain = Terrain { walkable: false, penalty: 0 };

    pub fn with_penalty(penalty: u32) -> Self {
        Self { walkable: true, penalty }
    }
}

/// Samples world geometry for grid construction.
/// Called once per cell center; results are cached by the grid.
pub trait TerrainClassifier {
    fn classify(&self, point: DVec2) -> Terrain;
}

impl<F> TerrainClassifier for F
where
    F: Fn(DVec2) -> Terrain,
{
    fn classify(&self, point: DVec2) -> Terrain {
        self(point)
    }
}

/// Axis-aligned box in world space. Corners are normalized so `min <= max`,
/// including when read from JSON.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(from = "Corners")]
pub struct Rect {
    pub min: DVec2,
    pub max: DVec2,
}

#[derive(Deserialize)]
struct Corners {
    min: DVec2,
    max: DVec2,
}

impl From<Corners> for Rect {
    fn from(c: Corners) -> Self {
        Rect::new(c.min, c.max)
    }
}

impl Rect {
    pub fn new(min: DVec2, max: DVec2) -> Self {
        Self { min: min.min(max), max: min.max(max) }
    }

    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Circle vs box overlap (closest point test).
    pub fn overlaps_circle(&self, center: DVec2, radius: f64) -> bool {
        let closest = center.clamp(self.min, self.max);
        closest.distance_squared(center) <= radius * radius
    }
}

/// A walkable surface that costs extra to cross (mud, sand, shallow water...).
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PenaltyRegion {
    pub area: Rect,
    pub penalty: u32,
}

/// Terrain built from obstacle boxes and weighted regions.
///
/// A point is blocked when the probe circle around it touches any obstacle.
/// Walkable points take the penalty of the first region containing them.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RegionClassifier {
    /// `None` means "use the grid's cell radius".
    #[serde(default)]
    pub probe_radius: Option<f64>,
    #[serde(default)]
    pub obstacles: Vec<Rect>,
    #[serde(default)]
    pub regions: Vec<PenaltyRegion>,
}

impl RegionClassifier {
    pub fn new(probe_radius: f64) -> Self {
        Self {
            probe_radius: Some(probe_radius),
            ..Default::default()
        }
    }

    pub fn with_obstacle(mut self, area: Rect) -> Self {
        self.obstacles.push(area);
        self
    }

    pub fn with_region(mut self, area: Rect, penalty: u32) -> Self {
        self.regions.push(PenaltyRegion { area, penalty });
        self
    }

    pub fn validate(&self) -> Result<()> {
        match self.probe_radius {
            Some(r) if !r.is_finite() || r < 0.0 => Err(ConfigError::InvalidProbeRadius(r)),
            _ => Ok(()),
        }
    }

    fn radius(&self) -> f64 {
        self.probe_radius.unwrap_or(0.0)
    }
}

impl TerrainClassifier for RegionClassifier {
    fn classify(&self, point: DVec2) -> Terrain {
        let radius = self.radius();
        if self.obstacles.iter().any(|o| o.overlaps_circle(point, radius)) {
            return Terrain::BLOCKED;
        }

        let penalty = self
            .regions
            .iter()
            .find(|r| r.area.contains(point))
            .map(|r| r.penalty)
            .unwrap_or(0);
        Terrain::with_penalty(penalty)
    }
}
