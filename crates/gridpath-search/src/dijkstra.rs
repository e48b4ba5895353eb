use gridpath_core::{Grid, Point};

use crate::config::Algorithm;
use crate::error::Result;
use crate::neighbors::{Movement, Neighbors};
use crate::progress::SearchControl;
use crate::result::PathFindingResult;
use crate::state::{self, Expand, SearchState};
use crate::traits::PathFinder;

/// Uniform-cost search.
///
/// Expands cells in non-decreasing order of cost from the start, so the first
/// time the goal is finalized its cost is optimal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dijkstra;

struct Uniform {
    movement: Movement,
    nbuf: Neighbors,
}

impl Expand for Uniform {
    fn estimate(&self, _p: Point, _goal: Point) -> f64 {
        0.0
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

impl PathFinder for Dijkstra {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Dijkstra
    }

    fn search_with(
        &self,
        grid: &Grid,
        start: Point,
        goal: Point,
        movement: Movement,
        control: &mut SearchControl<'_>,
    ) -> Result<PathFindingResult> {
        let mut expander = Uniform {
            movement,
            nbuf: Neighbors::new(),
        };
        let outcome = state::best_first(grid, start, goal, &mut expander, control)?;
        Ok(outcome.into_result(grid, Algorithm::Dijkstra, |chain| chain))
    }
}
