use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Waypoint as it crosses the Wasm boundary.
///
/// glam serializes `DVec2` as `[x, y]`; JS steering code wants `{ x, y }`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
}

impl WorldPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<DVec2> for WorldPoint {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<WorldPoint> for DVec2 {
    fn from(p: WorldPoint) -> Self {
        DVec2::new(p.x, p.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_named_fields() {
        let json = serde_json::to_string(&WorldPoint::from(DVec2::new(1.5, -2.0))).unwrap();
        assert_eq!(json, r#"{"x":1.5,"y":-2.0}"#);
    }
}
