use crate::pathfinding::grid::{CellId, NavGrid};
use glam::{DVec2, IVec2};

/// Reduces a start→goal cell path to its turning points.
///
/// Emits the cell where each straight run ends, plus the goal. The start cell
/// is never emitted, so a straight path collapses to just the goal.
pub fn simplify_cells(grid: &NavGrid, path: &[CellId]) -> Vec<CellId> {
    let mut waypoints = Vec::new();
    let mut prev_dir: Option<IVec2> = None;

    for pair in path.windows(2) {
        let dir = (grid.cell(pair[1]).coord - grid.cell(pair[0]).coord).signum();
        if let Some(prev) = prev_dir {
            if prev != dir {
                // pair[0] is where the previous run turned
                waypoints.push(pair[0]);
            }
        }
        prev_dir = Some(dir);
    }

    if let (Some(_), Some(&goal)) = (prev_dir, path.last()) {
        waypoints.push(goal);
    }
    waypoints
}

/// [`simplify_cells`] mapped to world-space cell centers.
pub fn simplify_path(grid: &NavGrid, path: &[CellId]) -> Vec<DVec2> {
    simplify_cells(grid, path)
        .into_iter()
        .map(|id| grid.world_from_cell(id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathfinding::grid::GridConfig;
    use crate::pathfinding::terrain::Terrain;

    fn grid() -> NavGrid {
        let open = |_: DVec2| Terrain::OPEN;
        NavGrid::new(GridConfig::new(DVec2::splat(4.0), DVec2::splat(8.0), 0.5), &open).unwrap()
    }

    fn cells(grid: &NavGrid, coords: &[(i32, i32)]) -> Vec<CellId> {
        coords
            .iter()
            .map(|&(x, y)| grid.id_at(IVec2::new(x, y)).unwrap())
            .collect()
    }

    #[test]
    fn test_straight_run_collapses_to_goal() {
        let grid = grid();
        let path = cells(&grid, &[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]);
        assert_eq!(simplify_cells(&grid, &path), cells(&grid, &[(4, 0)]));
        assert_eq!(simplify_path(&grid, &path), vec![DVec2::new(4.5, 0.5)]);
    }

    #[test]
    fn test_turns_are_kept() {
        let grid = grid();
        let path = cells(&grid, &[(0, 0), (1, 0), (2, 1), (3, 2), (4, 2), (5, 2)]);
        assert_eq!(
            simplify_cells(&grid, &path),
            cells(&grid, &[(1, 0), (3, 2), (5, 2)])
        );
    }

    #[test]
    fn test_single_step_and_trivial_paths() {
        let grid = grid();
        let step = cells(&grid, &[(2, 2), (3, 3)]);
        assert_eq!(simplify_cells(&grid, &step), cells(&grid, &[(3, 3)]));

        let single = cells(&grid, &[(2, 2)]);
        assert!(simplify_cells(&grid, &single).is_empty());
        assert!(simplify_cells(&grid, &[]).is_empty());
    }

    #[test]
    fn test_simplifying_twice_is_stable() {
        let grid = grid();
        let path = cells(
            &grid,
            &[(0, 0), (0, 1), (0, 2), (1, 3), (2, 4), (3, 4), (4, 4), (5, 3), (6, 2)],
        );
        let start = path[0];
        let once = simplify_cells(&grid, &path);

        let mut again_input = vec![start];
        again_input.extend_from_slice(&once);
        assert_eq!(simplify_cells(&grid, &again_input), once);
    }
}
