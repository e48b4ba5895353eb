//! Per-search side tables and the shared best-first loop.
//!
//! Coordinates stay plain values. Scores, predecessors and the finalized flag
//! live in dense vectors indexed by the grid's flat cell index, created fresh
//! for every search so concurrent searches never share state.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use gridpath_core::{Grid, Point};
use indexmap::IndexSet;

use crate::config::Algorithm;
use crate::error::{Endpoint, Result, SearchError};
use crate::path::{self, NO_PARENT};
use crate::progress::{Progress, SearchControl};
use crate::result::PathFindingResult;

/// `f64` with a total order, for use as a heap priority.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct FloatOrd(pub(crate) f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Open-list entry, ordered so `BinaryHeap` pops the smallest priority first.
///
/// Ties prefer the entry with the larger `g`, which is closer to the goal.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) priority: FloatOrd,
    pub(crate) g: FloatOrd,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| self.g.cmp(&other.g))
            .then_with(|| other.idx.cmp(&self.idx))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Scores and bookkeeping for one search.
pub(crate) struct SearchState {
    pub(crate) g: Vec<f64>,
    pub(crate) f: Vec<f64>,
    pub(crate) parent: Vec<usize>,
    pub(crate) closed: Vec<bool>,
    pub(crate) visited: IndexSet<Point>,
    open: BinaryHeap<NodeRef>,
}

impl SearchState {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            g: vec![f64::INFINITY; len],
            f: vec![f64::INFINITY; len],
            parent: vec![NO_PARENT; len],
            closed: vec![false; len],
            visited: IndexSet::new(),
            open: BinaryHeap::new(),
        }
    }

    /// Record a better route to `idx` and queue it. Older entries for the
    /// same cell stay in the heap and are discarded when popped.
    pub(crate) fn push(&mut self, idx: usize, g: f64, f: f64, parent: usize) {
        self.g[idx] = g;
        self.f[idx] = f;
        self.parent[idx] = parent;
        self.open.push(NodeRef {
            idx,
            priority: FloatOrd(f),
            g: FloatOrd(g),
        });
    }

    /// Pop the best cell that is not yet finalized.
    pub(crate) fn pop(&mut self) -> Option<usize> {
        while let Some(node) = self.open.pop() {
            if !self.closed[node.idx] {
                return Some(node.idx);
            }
        }
        None
    }

    /// Finalize `idx`. Its `g` never changes afterwards.
    pub(crate) fn close(&mut self, grid: &Grid, idx: usize) {
        self.closed[idx] = true;
        self.visited.insert(grid.point(idx));
    }

    /// Distinct open coordinates that are not yet finalized.
    pub(crate) fn frontier(&self, grid: &Grid) -> Vec<Point> {
        let mut seen = IndexSet::with_capacity(self.open.len());
        for node in self.open.iter() {
            if !self.closed[node.idx] {
                seen.insert(node.idx);
            }
        }
        seen.into_iter().map(|i| grid.point(i)).collect()
    }
}

/// How a driver scores and expands cells.
pub(crate) trait Expand {
    /// Lower bound on the remaining cost from `p` to `goal`.
    fn estimate(&self, p: Point, goal: Point) -> f64;

    /// Append `(successor, cost from current)` pairs for `current` to `out`.
    fn successors(
        &mut self,
        grid: &Grid,
        state: &SearchState,
        current: usize,
        goal: Point,
        out: &mut Vec<(Point, f64)>,
    );
}

/// Terminal state of the best-first loop.
pub(crate) enum Outcome {
    /// Goal finalized; predecessor chain is complete.
    Found(SearchState, usize),
    /// Frontier exhausted, or the query was trivially unreachable.
    Exhausted(SearchState),
    /// `start == goal`; nothing was expanded.
    Trivial(Point),
}

impl Outcome {
    /// Build the caller-facing result. `expand` turns the raw predecessor
    /// chain into a cell-by-cell path.
    pub(crate) fn into_result(
        self,
        grid: &Grid,
        algorithm: Algorithm,
        expand: impl FnOnce(Vec<Point>) -> Vec<Point>,
    ) -> PathFindingResult {
        let result = match self {
            Self::Trivial(p) => {
                PathFindingResult::new(algorithm, IndexSet::from([p]), Some(vec![p]))
            }
            Self::Found(state, goal) => {
                let chain = path::reconstruct(grid, &state.parent, goal);
                PathFindingResult::new(algorithm, state.visited, Some(expand(chain)))
            }
            Self::Exhausted(state) => PathFindingResult::new(algorithm, state.visited, None),
        };
        log::debug!(
            "{algorithm}: found={} visited={} length={:.5}",
            result.path_found(),
            result.visited().len(),
            result.path_length()
        );
        result
    }
}

/// Reject endpoints outside the grid.
pub(crate) fn validate(grid: &Grid, start: Point, goal: Point) -> Result<(usize, usize)> {
    let locate = |p: Point, endpoint: Endpoint| {
        grid.index(p).ok_or(SearchError::OutOfBounds {
            endpoint,
            point: p,
            width: grid.width(),
            height: grid.height(),
        })
    };
    Ok((locate(start, Endpoint::Start)?, locate(goal, Endpoint::Goal)?))
}

/// Run a best-first search from `start` to `goal`, ordering the open list by
/// `g + estimate`.
pub(crate) fn best_first<E: Expand>(
    grid: &Grid,
    start: Point,
    goal: Point,
    expander: &mut E,
    control: &mut SearchControl<'_>,
) -> Result<Outcome> {
    let (start_idx, goal_idx) = validate(grid, start, goal)?;
    if start_idx == goal_idx {
        return Ok(Outcome::Trivial(start));
    }

    let mut state = SearchState::new(grid.len());
    if grid.is_blocked(start) || grid.is_blocked(goal) {
        log::debug!("start {start} or goal {goal} is blocked");
        return Ok(Outcome::Exhausted(state));
    }

    control.begin();
    state.push(start_idx, 0.0, expander.estimate(start, goal), NO_PARENT);

    let mut succ = Vec::with_capacity(8);
    loop {
        control.check_cancelled()?;
        let Some(ci) = state.pop() else {
            break;
        };
        state.close(grid, ci);
        let cp = grid.point(ci);

        if control.tick() {
            let frontier = state.frontier(grid);
            let expanded = control.expanded();
            control.notify(&Progress {
                visited: &state.visited,
                frontier: &frontier,
                current: cp,
                expanded,
            });
        }

        if ci == goal_idx {
            return Ok(Outcome::Found(state, ci));
        }

        log::trace!("expand {cp} g={:.3}", state.g[ci]);
        succ.clear();
        expander.successors(grid, &state, ci, goal, &mut succ);

        let current_g = state.g[ci];
        for &(np, cost) in succ.iter() {
            let Some(ni) = grid.index(np) else {
                continue;
            };
            if state.closed[ni] {
                continue;
            }
            let tentative = current_g + cost;
            if tentative < state.g[ni] {
                let f = tentative + expander.estimate(np, goal);
                state.push(ni, tentative, f, ci);
            }
        }

        control.pace();
    }

    Ok(Outcome::Exhausted(state))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heap_pops_lowest_priority_first() {
        let mut heap = BinaryHeap::new();
        for (idx, f) in [(0, 3.0), (1, 1.5), (2, 2.0)] {
            heap.push(NodeRef {
                idx,
                priority: FloatOrd(f),
                g: FloatOrd(0.0),
            });
        }
        let order: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|n| n.idx)).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn ties_prefer_deeper_nodes() {
        let mut heap = BinaryHeap::new();
        heap.push(NodeRef {
            idx: 0,
            priority: FloatOrd(4.0),
            g: FloatOrd(1.0),
        });
        heap.push(NodeRef {
            idx: 1,
            priority: FloatOrd(4.0),
            g: FloatOrd(3.0),
        });
        assert_eq!(heap.pop().map(|n| n.idx), Some(1));
    }

    #[test]
    fn stale_entries_are_skipped() {
        let grid = Grid::new(3, 1).unwrap();
        let mut st = SearchState::new(grid.len());
        st.push(1, 5.0, 5.0, NO_PARENT);
        st.push(1, 2.0, 2.0, NO_PARENT);
        st.push(2, 3.0, 3.0, NO_PARENT);

        let first = st.pop().unwrap();
        assert_eq!(first, 1);
        st.close(&grid, first);
        assert_eq!(st.frontier(&grid), vec![Point::new(2, 0)]);

        assert_eq!(st.pop(), Some(2));
        st.close(&grid, 2);
        // The older entry for cell 1 is discarded.
        assert_eq!(st.pop(), None);
        assert_eq!(st.g[1], 2.0);
        assert_eq!(
            st.visited.iter().copied().collect::<Vec<_>>(),
            vec![Point::new(1, 0), Point::new(2, 0)]
        );
    }

    #[test]
    fn validate_reports_endpoint() {
        let grid = Grid::new(2, 2).unwrap();
        assert_eq!(validate(&grid, Point::new(1, 1), Point::new(0, 0)), Ok((3, 0)));
        assert_eq!(
            validate(&grid, Point::new(0, 0), Point::new(2, 0)),
            Err(SearchError::OutOfBounds {
                endpoint: Endpoint::Goal,
                point: Point::new(2, 0),
                width: 2,
                height: 2,
            })
        );
        assert!(matches!(
            validate(&grid, Point::new(-1, 0), Point::new(9, 9)),
            Err(SearchError::OutOfBounds {
                endpoint: Endpoint::Start,
                ..
            })
        ));
    }
}
