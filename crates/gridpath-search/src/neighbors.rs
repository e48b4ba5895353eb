use std::f64::consts::SQRT_2;
use std::fmt;

use gridpath_core::{Grid, Point};

/// Which moves a search may take from a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Movement {
    /// Orthogonal steps only (4 directions).
    Cardinal,
    /// Orthogonal and diagonal steps (8 directions).
    #[default]
    Diagonal,
}

impl Movement {
    /// `true` selects [`Movement::Diagonal`].
    #[inline]
    pub const fn from_diagonal(allow_diagonal: bool) -> Self {
        if allow_diagonal { Self::Diagonal } else { Self::Cardinal }
    }

    /// Whether diagonal steps are allowed.
    #[inline]
    pub const fn allows_diagonal(self) -> bool {
        matches!(self, Self::Diagonal)
    }
}

impl From<bool> for Movement {
    #[inline]
    fn from(allow_diagonal: bool) -> Self {
        Self::from_diagonal(allow_diagonal)
    }
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cardinal => f.write_str("cardinal"),
            Self::Diagonal => f.write_str("diagonal"),
        }
    }
}

/// Orthogonal unit steps.
pub(crate) const CARDINAL_DIRS: [Point; 4] = [
    Point::new(-1, 0),
    Point::new(1, 0),
    Point::new(0, -1),
    Point::new(0, 1),
];

/// Orthogonal then diagonal unit steps.
pub(crate) const ALL_DIRS: [Point; 8] = [
    Point::new(-1, 0),
    Point::new(1, 0),
    Point::new(0, -1),
    Point::new(0, 1),
    Point::new(-1, -1),
    Point::new(-1, 1),
    Point::new(1, -1),
    Point::new(1, 1),
];

/// Cost of a single step in direction `dir`.
#[inline]
pub fn step_cost(dir: Point) -> f64 {
    if dir.is_diagonal() { SQRT_2 } else { 1.0 }
}

/// Whether a single step from `from` along unit direction `dir` is legal.
///
/// The target must be inside the grid and free. A diagonal step is also
/// refused when both orthogonal cells flanking it are blocked, so a path never
/// squeezes through a solid corner.
#[inline]
pub fn can_step(grid: &Grid, from: Point, dir: Point) -> bool {
    if !grid.is_free(from + dir) {
        return false;
    }
    if dir.is_diagonal() {
        return grid.is_free(from.shift(dir.x, 0)) || grid.is_free(from.shift(0, dir.y));
    }
    true
}

/// Whether `to` is one legal step away from `from` under `movement`.
pub fn is_legal_step(grid: &Grid, from: Point, to: Point, movement: Movement) -> bool {
    if !from.is_adjacent(to) {
        return false;
    }
    let dir = to - from;
    if dir.is_diagonal() && !movement.allows_diagonal() {
        return false;
    }
    can_step(grid, from, dir)
}

/// Reusable neighbour buffer.
///
/// Produces the legal `(neighbour, step cost)` pairs of a cell under a
/// movement policy. Reusing one `Neighbors` for a whole search avoids an
/// allocation per expansion.
pub struct Neighbors {
    buf: Vec<(Point, f64)>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(8),
        }
    }

    /// Legal moves out of `p`. Orthogonal moves come first.
    pub fn of(&mut self, grid: &Grid, p: Point, movement: Movement) -> &[(Point, f64)] {
        self.buf.clear();
        let dirs: &[Point] = match movement {
            Movement::Cardinal => &CARDINAL_DIRS,
            Movement::Diagonal => &ALL_DIRS,
        };
        for &d in dirs {
            if can_step(grid, p, d) {
                self.buf.push((p + d, step_cost(d)));
            }
        }
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets(n: &[(Point, f64)]) -> Vec<Point> {
        let mut v: Vec<Point> = n.iter().map(|&(p, _)| p).collect();
        v.sort();
        v
    }

    #[test]
    fn open_interior_has_eight() {
        let g = Grid::new(3, 3).unwrap();
        let mut nb = Neighbors::new();
        let n = nb.of(&g, Point::new(1, 1), Movement::Diagonal);
        assert_eq!(n.len(), 8);
        let diag = n.iter().filter(|(_, c)| (*c - SQRT_2).abs() < 1e-12).count();
        assert_eq!(diag, 4);
        let n = nb.of(&g, Point::new(1, 1), Movement::Cardinal);
        assert_eq!(n.len(), 4);
        assert!(n.iter().all(|&(_, c)| c == 1.0));
    }

    #[test]
    fn corner_cell_is_clipped_by_bounds() {
        let g = Grid::new(3, 3).unwrap();
        let mut nb = Neighbors::new();
        let n = nb.of(&g, Point::new(0, 0), Movement::Diagonal);
        assert_eq!(
            targets(n),
            vec![Point::new(1, 0), Point::new(0, 1), Point::new(1, 1)]
        );
    }

    #[test]
    fn blocked_targets_are_skipped() {
        let g = Grid::from_ascii(
            "
            .#.
            ...
            ",
        )
        .unwrap();
        let mut nb = Neighbors::new();
        let n = nb.of(&g, Point::new(0, 1), Movement::Diagonal);
        assert_eq!(targets(n), vec![Point::new(0, 0), Point::new(1, 1)]);
    }

    #[test]
    fn diagonal_through_solid_corner_is_vetoed() {
        let g = Grid::from_ascii(
            "
            .#
            #.
            ",
        )
        .unwrap();
        let mut nb = Neighbors::new();
        assert!(nb.of(&g, Point::new(0, 0), Movement::Diagonal).is_empty());
        assert!(!is_legal_step(&g, Point::new(0, 0), Point::new(1, 1), Movement::Diagonal));
    }

    #[test]
    fn diagonal_past_single_obstacle_is_allowed() {
        let g = Grid::from_ascii(
            "
            .#
            ..
            ",
        )
        .unwrap();
        assert!(is_legal_step(&g, Point::new(0, 0), Point::new(1, 1), Movement::Diagonal));
        assert!(!is_legal_step(&g, Point::new(0, 0), Point::new(1, 1), Movement::Cardinal));
    }

    #[test]
    fn non_adjacent_step_is_illegal() {
        let g = Grid::new(4, 4).unwrap();
        assert!(!is_legal_step(&g, Point::new(0, 0), Point::new(2, 0), Movement::Diagonal));
        assert!(!is_legal_step(&g, Point::new(1, 1), Point::new(1, 1), Movement::Diagonal));
    }

    #[test]
    fn movement_from_flag() {
        assert_eq!(Movement::from(true), Movement::Diagonal);
        assert_eq!(Movement::from(false), Movement::Cardinal);
        assert!(!Movement::Cardinal.allows_diagonal());
    }
}
