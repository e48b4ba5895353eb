use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use gridpath_core::{Grid, Point};

use crate::astar::AStar;
use crate::dijkstra::Dijkstra;
use crate::error::{ParseAlgorithmError, Result};
use crate::jps::JumpPointSearch;
use crate::neighbors::Movement;
use crate::progress::{DEFAULT_CALLBACK_INTERVAL, ProgressHook, SearchControl};
use crate::result::PathFindingResult;
use crate::traits::PathFinder;

/// The search algorithms this crate provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Algorithm {
    /// Uniform-cost search, no heuristic.
    Dijkstra,
    /// A* with the default heuristic for the movement policy.
    #[default]
    AStar,
    /// Jump Point Search. Diagonal movement only.
    Jps,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Dijkstra, Algorithm::AStar, Algorithm::Jps];

    /// Run this algorithm without observers.
    pub fn search(
        self,
        grid: &Grid,
        start: Point,
        goal: Point,
        movement: Movement,
    ) -> Result<PathFindingResult> {
        self.search_with(grid, start, goal, movement, &mut SearchControl::new())
    }

    /// Run this algorithm with progress reporting, pacing and cancellation.
    pub fn search_with(
        self,
        grid: &Grid,
        start: Point,
        goal: Point,
        movement: Movement,
        control: &mut SearchControl<'_>,
    ) -> Result<PathFindingResult> {
        match self {
            Self::Dijkstra => Dijkstra.search_with(grid, start, goal, movement, control),
            Self::AStar => AStar::new().search_with(grid, start, goal, movement, control),
            Self::Jps => JumpPointSearch.search_with(grid, start, goal, movement, control),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dijkstra => f.write_str("dijkstra"),
            Self::AStar => f.write_str("astar"),
            Self::Jps => f.write_str("jps"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dijkstra" => Ok(Self::Dijkstra),
            "astar" | "a*" | "a-star" => Ok(Self::AStar),
            "jps" | "jump-point-search" | "jumppointsearch" => Ok(Self::Jps),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}

/// Everything needed to run a search apart from the grid and endpoints.
///
/// With the `serde` feature, missing fields fall back to their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    pub algorithm: Algorithm,
    pub allow_diagonal: bool,
    /// Minimum wall time between two progress callbacks. Zero reports every
    /// finalized cell.
    pub callback_interval: Duration,
    /// Target average time per finalized cell. Zero disables pacing.
    pub step_delay: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::AStar,
            allow_diagonal: true,
            callback_interval: DEFAULT_CALLBACK_INTERVAL,
            step_delay: Duration::ZERO,
        }
    }
}

impl SearchConfig {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            ..Self::default()
        }
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_diagonal(mut self, allow_diagonal: bool) -> Self {
        self.allow_diagonal = allow_diagonal;
        self
    }

    pub fn with_callback_interval(mut self, interval: Duration) -> Self {
        self.callback_interval = interval;
        self
    }

    pub fn with_step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = delay;
        self
    }

    /// Movement policy selected by `allow_diagonal`.
    #[inline]
    pub fn movement(&self) -> Movement {
        Movement::from_diagonal(self.allow_diagonal)
    }

    fn control<'h>(&self) -> SearchControl<'h> {
        SearchControl::new()
            .with_callback_interval(self.callback_interval)
            .with_step_delay(self.step_delay)
    }

    /// Run the configured search without a progress hook. Step delay still
    /// applies.
    pub fn run(&self, grid: &Grid, start: Point, goal: Point) -> Result<PathFindingResult> {
        let mut control = self.control();
        self.algorithm
            .search_with(grid, start, goal, self.movement(), &mut control)
    }

    /// Run the configured search, reporting progress to `hook`.
    pub fn run_with_hook(
        &self,
        grid: &Grid,
        start: Point,
        goal: Point,
        hook: &mut dyn ProgressHook,
    ) -> Result<PathFindingResult> {
        let mut control = self.control().with_hook(hook);
        self.algorithm
            .search_with(grid, start, goal, self.movement(), &mut control)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;
    use crate::progress::Progress;

    fn two_blocks() -> Grid {
        Grid::from_ascii(
            "
            ....
            .#..
            .#..
            ....
            ",
        )
        .unwrap()
    }

    #[test]
    fn names_round_trip() {
        for alg in Algorithm::ALL {
            assert_eq!(alg.to_string().parse::<Algorithm>(), Ok(alg));
        }
    }

    #[test]
    fn parse_accepts_aliases() {
        assert_eq!("A*".parse::<Algorithm>(), Ok(Algorithm::AStar));
        assert_eq!(" Dijkstra ".parse::<Algorithm>(), Ok(Algorithm::Dijkstra));
        assert_eq!("jump-point-search".parse::<Algorithm>(), Ok(Algorithm::Jps));
        let err = "bfs".parse::<Algorithm>().unwrap_err();
        assert_eq!(err, ParseAlgorithmError("bfs".into()));
        assert!(err.to_string().contains("bfs"));
    }

    #[test]
    fn dispatch_tags_result() {
        let g = two_blocks();
        for alg in Algorithm::ALL {
            let r = alg
                .search(&g, Point::new(0, 0), Point::new(3, 3), Movement::Diagonal)
                .unwrap();
            assert_eq!(r.algorithm(), alg);
            assert_eq!(r.path().map(<[Point]>::len), Some(5));
        }
    }

    #[test]
    fn default_config() {
        let c = SearchConfig::default();
        assert_eq!(c.algorithm, Algorithm::AStar);
        assert_eq!(c.movement(), Movement::Diagonal);
        assert_eq!(c.callback_interval, DEFAULT_CALLBACK_INTERVAL);
        assert!(c.step_delay.is_zero());
    }

    #[test]
    fn run_uses_configured_movement() {
        let g = two_blocks();
        let c = SearchConfig::new(Algorithm::Dijkstra).with_diagonal(false);
        let r = c.run(&g, Point::new(0, 0), Point::new(3, 3)).unwrap();
        assert_eq!(r.path().map(<[Point]>::len), Some(7));
        assert!((r.path_length() - 6.0).abs() < 1e-9);
    }

    #[test]
    fn jps_config_requires_diagonal() {
        let g = two_blocks();
        let c = SearchConfig::new(Algorithm::Jps).with_diagonal(false);
        assert_eq!(
            c.run(&g, Point::new(0, 0), Point::new(3, 3)),
            Err(SearchError::DiagonalRequired)
        );
    }

    #[test]
    fn run_with_hook_reports_progress() {
        let g = Grid::new(6, 6).unwrap();
        let mut currents = Vec::new();
        let mut hook = |p: &Progress<'_>| currents.push(p.current);
        let r = SearchConfig::new(Algorithm::Dijkstra)
            .with_callback_interval(Duration::ZERO)
            .run_with_hook(&g, Point::new(0, 0), Point::new(5, 5), &mut hook)
            .unwrap();
        assert_eq!(currents.len(), r.visited().len());
        assert_eq!(currents.first(), Some(&Point::new(0, 0)));
        assert_eq!(currents.last(), Some(&Point::new(5, 5)));
    }
}
