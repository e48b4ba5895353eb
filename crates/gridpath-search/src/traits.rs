use gridpath_core::{Grid, Point};

use crate::config::Algorithm;
use crate::error::Result;
use crate::neighbors::Movement;
use crate::progress::SearchControl;
use crate::result::PathFindingResult;

/// A shortest-path algorithm over an obstacle grid.
///
/// Every implementation returns `[start]` immediately when `start == goal`,
/// returns a result without a path when the goal cannot be reached, and
/// never modifies the grid.
pub trait PathFinder {
    /// Which algorithm this is.
    fn algorithm(&self) -> Algorithm;

    /// Search with optional progress reporting, pacing and cancellation.
    fn search_with(
        &self,
        grid: &Grid,
        start: Point,
        goal: Point,
        movement: Movement,
        control: &mut SearchControl<'_>,
    ) -> Result<PathFindingResult>;

    /// Search without any observers.
    fn search(
        &self,
        grid: &Grid,
        start: Point,
        goal: Point,
        movement: Movement,
    ) -> Result<PathFindingResult> {
        self.search_with(grid, start, goal, movement, &mut SearchControl::new())
    }
}
