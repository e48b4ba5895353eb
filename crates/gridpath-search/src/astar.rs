use gridpath_core::{Grid, Point};

use crate::config::Algorithm;
use crate::distance::Heuristic;
use crate::error::Result;
use crate::neighbors::{Movement, Neighbors};
use crate::progress::SearchControl;
use crate::result::PathFindingResult;
use crate::state::{self, Expand, SearchState};
use crate::traits::PathFinder;

/// A* search.
///
/// Orders the frontier by `g + h`, where `h` defaults to the tightest
/// admissible estimate for the movement policy: Manhattan distance for
/// cardinal movement, octile distance for diagonal movement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AStar {
    heuristic: Option<Heuristic>,
}

impl AStar {
    /// A* with the default heuristic for each movement policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// A* with a fixed heuristic.
    ///
    /// The heuristic must never overestimate under the movement policy the
    /// search runs with; otherwise the path may be longer than optimal.
    pub fn with_heuristic(heuristic: Heuristic) -> Self {
        Self {
            heuristic: Some(heuristic),
        }
    }

    /// Heuristic used for `movement`.
    pub fn heuristic_for(&self, movement: Movement) -> Heuristic {
        self.heuristic
            .unwrap_or_else(|| Heuristic::for_movement(movement))
    }
}

struct Guided {
    movement: Movement,
    heuristic: Heuristic,
    nbuf: Neighbors,
}

impl Expand for Guided {
    fn estimate(&self, p: Point, goal: Point) -> f64 {
        self.heuristic.estimate(p, goal)
    }

    fn successors(
        &mut self,
        grid: &Grid,
        _state: &SearchState,
        current: usize,
        _goal: Point,
        out: &mut Vec<(Point, f64)>,
    ) {
        out.extend_from_slice(self.nbuf.of(grid, grid.point(current), self.movement));
    }
}

impl PathFinder for AStar {
    fn algorithm(&self) -> Algorithm {
        Algorithm::AStar
    }

    fn search_with(
        &self,
        grid: &Grid,
        start: Point,
        goal: Point,
        movement: Movement,
        control: &mut SearchControl<'_>,
    ) -> Result<PathFindingResult> {
        let mut expander = Guided {
            movement,
            heuristic: self.heuristic_for(movement),
            nbuf: Neighbors::new(),
        };
        let outcome = state::best_first(grid, start, goal, &mut expander, control)?;
        Ok(outcome.into_result(grid, Algorithm::AStar, |chain| chain))
    }
}
