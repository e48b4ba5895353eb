//! Shortest paths on 2D obstacle grids.
//!
//! Three interchangeable drivers answer single-source, single-target queries
//! on a [`Grid`](gridpath_core::Grid) of free and blocked cells:
//!
//! - **Dijkstra** uniform-cost search ([`Dijkstra`])
//! - **A\*** heuristic search ([`AStar`])
//! - **Jump Point Search** for diagonal movement ([`JumpPointSearch`])
//!
//! Orthogonal steps cost 1 and diagonal steps cost √2. A diagonal step is
//! refused when both orthogonal cells beside it are blocked. All drivers
//! report the same path length for the same query; they differ in how many
//! cells they finalize on the way.
//!
//! Every search returns a [`PathFindingResult`] with the finalized cells in
//! settlement order and, if one exists, the cell-by-cell path. A
//! [`SearchControl`] adds progress callbacks, pacing and cancellation for
//! visualisers.
//!
//! | Driver | Movement | Heuristic |
//! |---|---|---|
//! | [`Dijkstra`] | cardinal or diagonal | none |
//! | [`AStar`] | cardinal or diagonal | Manhattan / octile, or any [`Heuristic`] |
//! | [`JumpPointSearch`] | diagonal only | octile |
//!
//! ```
//! use gridpath_core::{Grid, Point};
//! use gridpath_search::{Algorithm, Movement};
//!
//! let grid = Grid::from_ascii(
//!     "
//!     ....
//!     .#..
//!     .#..
//!     ....
//!     ",
//! )
//! .unwrap();
//! let result = Algorithm::Jps
//!     .search(&grid, Point::new(0, 0), Point::new(3, 3), Movement::Diagonal)
//!     .unwrap();
//! assert_eq!(result.path().map(|p| p.len()), Some(5));
//! ```

mod astar;
mod config;
mod dijkstra;
mod distance;
mod error;
mod jps;
mod neighbors;
mod path;
mod progress;
mod result;
mod state;
mod traits;

pub use astar::AStar;
pub use config::{Algorithm, SearchConfig};
pub use dijkstra::Dijkstra;
pub use distance::{Heuristic, chebyshev, euclidean, manhattan, octile};
pub use error::{Endpoint, ParseAlgorithmError, Result, SearchError};
pub use jps::JumpPointSearch;
pub use neighbors::{Movement, Neighbors, can_step, is_legal_step, step_cost};
pub use path::{interpolate, path_length};
pub use progress::{
    CallbackInterval, CancelToken, ChannelHook, DEFAULT_CALLBACK_INTERVAL, Progress,
    ProgressEvent, ProgressHook, SearchControl, StepDelay, progress_channel,
};
pub use result::PathFindingResult;
pub use traits::PathFinder;
