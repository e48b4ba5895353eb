//! Path reconstruction from predecessor tables.

use gridpath_core::{Grid, Point};

use crate::neighbors::step_cost;

/// Sentinel parent index meaning "no predecessor".
pub(crate) const NO_PARENT: usize = usize::MAX;

/// Walk `parent` back from `goal` to the root and return the chain in
/// start-to-goal order.
pub(crate) fn reconstruct(grid: &Grid, parent: &[usize], goal: usize) -> Vec<Point> {
    let mut path = Vec::new();
    let mut ci = goal;
    while ci != NO_PARENT {
        path.push(grid.point(ci));
        ci = parent[ci];
    }
    path.reverse();
    path
}

/// Expand a chain of jump points into a cell-by-cell path.
///
/// Consecutive jump points always lie on a shared row, column or 45° diagonal,
/// so each segment is a run of identical unit steps.
pub fn interpolate(jump_points: &[Point]) -> Vec<Point> {
    let Some((&first, rest)) = jump_points.split_first() else {
        return Vec::new();
    };
    let mut path = vec![first];
    let mut cur = first;
    for &next in rest {
        let dir = cur.dir_to(next);
        while cur != next {
            cur = cur + dir;
            path.push(cur);
        }
    }
    path
}

/// Sum of per-step costs: 1 per orthogonal step, √2 per diagonal step.
pub fn path_length(path: &[Point]) -> f64 {
    path.windows(2).map(|w| step_cost(w[1] - w[0])).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::SQRT_2;

    #[test]
    fn reconstruct_follows_parents() {
        let g = Grid::new(3, 1).unwrap();
        // 0 <- 1 <- 2
        let parent = vec![NO_PARENT, 0, 1];
        assert_eq!(
            reconstruct(&g, &parent, 2),
            vec![Point::new(0, 0), Point::new(1, 0), Point::new(2, 0)]
        );
        assert_eq!(reconstruct(&g, &parent, 0), vec![Point::new(0, 0)]);
    }

    #[test]
    fn interpolate_straight_and_diagonal() {
        let jps = [Point::new(0, 0), Point::new(3, 3), Point::new(3, 5)];
        let path = interpolate(&jps);
        assert_eq!(
            path,
            vec![
                Point::new(0, 0),
                Point::new(1, 1),
                Point::new(2, 2),
                Point::new(3, 3),
                Point::new(3, 4),
                Point::new(3, 5),
            ]
        );
        assert!((path_length(&path) - (3.0 * SQRT_2 + 2.0)).abs() < 1e-12);
    }

    #[test]
    fn interpolate_degenerate_inputs() {
        assert!(interpolate(&[]).is_empty());
        assert_eq!(interpolate(&[Point::new(4, 2)]), vec![Point::new(4, 2)]);
    }

    #[test]
    fn single_cell_path_has_zero_length() {
        assert_eq!(path_length(&[Point::new(1, 1)]), 0.0);
        assert_eq!(path_length(&[]), 0.0);
    }
}
