//! Jump Point Search (JPS) on uniform-cost 8-directional grids.
//!
//! JPS is A* that only queues *jump points*: cells where a straight or
//! diagonal run must stop because it reached the goal, or because a
//! neighbour beside the run can only be reached optimally through that cell
//! (a *forced* neighbour). Cells between two jump points are never queued and
//! are filled back in when the path is rebuilt.
//!
//! Diagonal steps follow the same corner rule as the other drivers: a step
//! is refused only when both orthogonal cells beside it are blocked.

use gridpath_core::{Grid, Point};

use crate::config::Algorithm;
use crate::distance::octile;
use crate::error::{Result, SearchError};
use crate::neighbors::{ALL_DIRS, Movement, can_step};
use crate::path::{self, NO_PARENT};
use crate::progress::SearchControl;
use crate::result::PathFindingResult;
use crate::state::{self, Expand, SearchState};
use crate::traits::PathFinder;

/// Jump Point Search.
///
/// Returns paths of the same length as [`AStar`](crate::AStar) while
/// finalizing far fewer cells on open maps. Requires
/// [`Movement::Diagonal`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JumpPointSearch;

struct Jumper {
    dirs: Vec<Point>,
}

impl Expand for Jumper {
    fn estimate(&self, p: Point, goal: Point) -> f64 {
        octile(p, goal)
    }

    fn successors(
        &mut self,
        grid: &Grid,
        state: &SearchState,
        current: usize,
        goal: Point,
        out: &mut Vec<(Point, f64)>,
    ) {
        let cp = grid.point(current);
        self.dirs.clear();
        match state.parent[current] {
            NO_PARENT => self.dirs.extend_from_slice(&ALL_DIRS),
            parent => pruned_dirs(grid, cp, grid.point(parent).dir_to(cp), &mut self.dirs),
        }
        for &dir in self.dirs.iter() {
            if let Some(jp) = jump(grid, cp, dir, goal) {
                out.push((jp, octile(cp, jp)));
            }
        }
    }
}

impl PathFinder for JumpPointSearch {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Jps
    }

    fn search_with(
        &self,
        grid: &Grid,
        start: Point,
        goal: Point,
        movement: Movement,
        control: &mut SearchControl<'_>,
    ) -> Result<PathFindingResult> {
        if !movement.allows_diagonal() {
            return Err(SearchError::DiagonalRequired);
        }
        let mut expander = Jumper {
            dirs: Vec::with_capacity(8),
        };
        let outcome = state::best_first(grid, start, goal, &mut expander, control)?;
        Ok(outcome.into_result(grid, Algorithm::Jps, |chain| path::interpolate(&chain)))
    }
}

/// Directions worth exploring from `p` when it was entered travelling `d`.
///
/// Keeps the natural continuations of the run plus any forced neighbours.
/// Neighbours that the parent reaches at least as cheaply without passing
/// through `p` are dropped.
fn pruned_dirs(grid: &Grid, p: Point, d: Point, dirs: &mut Vec<Point>) {
    let free = |dx: i32, dy: i32| grid.is_free(p.shift(dx, dy));

    if d.is_diagonal() {
        let vertical = free(0, d.y);
        let horizontal = free(d.x, 0);
        if vertical {
            dirs.push(Point::new(0, d.y));
        }
        if horizontal {
            dirs.push(Point::new(d.x, 0));
        }
        if vertical || horizontal {
            dirs.push(d);
        }
        if !free(-d.x, 0) && vertical {
            dirs.push(Point::new(-d.x, d.y));
        }
        if !free(0, -d.y) && horizontal {
            dirs.push(Point::new(d.x, -d.y));
        }
    } else if d.x != 0 {
        if free(d.x, 0) {
            dirs.push(d);
            if !free(0, 1) {
                dirs.push(Point::new(d.x, 1));
            }
            if !free(0, -1) {
                dirs.push(Point::new(d.x, -1));
            }
        }
    } else if free(0, d.y) {
        dirs.push(d);
        if !free(1, 0) {
            dirs.push(Point::new(1, d.y));
        }
        if !free(-1, 0) {
            dirs.push(Point::new(-1, d.y));
        }
    }
}

/// Whether `p`, reached travelling `d`, has a forced neighbour: a cell beside
/// the run that is free while the cell between it and the run is blocked.
fn has_forced(grid: &Grid, p: Point, d: Point) -> bool {
    let free = |dx: i32, dy: i32| grid.is_free(p.shift(dx, dy));

    if d.is_diagonal() {
        (free(-d.x, d.y) && !free(-d.x, 0)) || (free(d.x, -d.y) && !free(0, -d.y))
    } else if d.x != 0 {
        (free(d.x, 1) && !free(0, 1)) || (free(d.x, -1) && !free(0, -1))
    } else {
        (free(1, d.y) && !free(1, 0)) || (free(-1, d.y) && !free(-1, 0))
    }
}

/// Run from `from` along `dir` and return the first jump point, or `None` if
/// the run hits an obstacle or the grid edge first.
///
/// Straight runs iterate. A diagonal run probes one straight run along each
/// of its axes at every step, so recursion never goes deeper than one level.
fn jump(grid: &Grid, from: Point, dir: Point, goal: Point) -> Option<Point> {
    let mut cur = from;
    loop {
        if !can_step(grid, cur, dir) {
            return None;
        }
        cur = cur + dir;
        if cur == goal || has_forced(grid, cur, dir) {
            return Some(cur);
        }
        if dir.is_diagonal()
            && (jump(grid, cur, Point::new(dir.x, 0), goal).is_some()
                || jump(grid, cur, Point::new(0, dir.y), goal).is_some())
        {
            return Some(cur);
        }
    }
}
