use std::fmt;

use gridpath_core::Point;
use thiserror::Error;

/// Convenient result alias for search calls.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Which end of a query an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Goal => f.write_str("goal"),
        }
    }
}

/// Errors returned by the search drivers.
///
/// An unreachable goal is not an error; it yields a result without a path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The start or goal lies outside the grid.
    #[error("{endpoint} {point} is outside the {width}x{height} grid")]
    OutOfBounds {
        endpoint: Endpoint,
        point: Point,
        width: usize,
        height: usize,
    },

    /// Jump Point Search was asked to run with orthogonal-only movement.
    #[error("jump point search requires diagonal movement")]
    DiagonalRequired,

    /// The caller cancelled the search.
    #[error("search cancelled")]
    Cancelled,
}

/// An algorithm name that [`Algorithm`](crate::Algorithm) does not recognise.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown algorithm {0:?} (expected dijkstra, astar or jps)")]
pub struct ParseAlgorithmError(pub String);
