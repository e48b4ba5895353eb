use gridpath_core::Point;
use indexmap::IndexSet;

use crate::config::Algorithm;
use crate::path;

/// Outcome of a single search.
///
/// `visited` holds every finalized coordinate in the order it was settled.
/// `path` runs from start to goal inclusive, and is `None` when the goal is
/// unreachable.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathFindingResult {
    algorithm: Algorithm,
    visited: IndexSet<Point>,
    path: Option<Vec<Point>>,
}

impl PathFindingResult {
    pub(crate) fn new(
        algorithm: Algorithm,
        visited: IndexSet<Point>,
        path: Option<Vec<Point>>,
    ) -> Self {
        Self {
            algorithm,
            visited,
            path,
        }
    }

    /// Algorithm that produced this result.
    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Whether a path to the goal exists.
    #[inline]
    pub fn path_found(&self) -> bool {
        self.path.is_some()
    }

    /// Cell-by-cell path from start to goal.
    #[inline]
    pub fn path(&self) -> Option<&[Point]> {
        self.path.as_deref()
    }

    /// Consume the result, returning the path.
    pub fn into_path(self) -> Option<Vec<Point>> {
        self.path
    }

    /// Finalized coordinates, in settlement order.
    #[inline]
    pub fn visited(&self) -> &IndexSet<Point> {
        &self.visited
    }

    /// Sum of step costs along the path, 0 when there is none.
    pub fn path_length(&self) -> f64 {
        self.path.as_deref().map_or(0.0, path::path_length)
    }
}
