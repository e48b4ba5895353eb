//! The obstacle [`Grid`]: a dense rectangle of [`CellState`]s.
//!
//! Grids are plain owned values. Searches borrow them immutably, so the same
//! grid may be searched from several threads at once.

use crate::error::GridError;
use crate::geom::{Point, Range};

/// Whether a cell can be entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Free,
    Blocked,
}

impl CellState {
    /// Whether the cell can be entered.
    #[inline]
    pub const fn is_free(self) -> bool {
        matches!(self, Self::Free)
    }
}

/// `0` is free, anything else is an obstacle.
impl From<i32> for CellState {
    #[inline]
    fn from(v: i32) -> Self {
        if v == 0 { Self::Free } else { Self::Blocked }
    }
}

impl From<CellState> for i32 {
    #[inline]
    fn from(c: CellState) -> Self {
        match c {
            CellState::Free => 0,
            CellState::Blocked => 1,
        }
    }
}

/// A rectangular obstacle grid with fixed dimensions.
///
/// Width and height are always at least 1. Cells are stored row-major, so
/// the flat index of `(x, y)` is `y * width + x`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "GridData", into = "GridData")
)]
pub struct Grid {
    cells: Vec<CellState>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Create a grid of the given dimensions with every cell free.
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        check_dims(width, height)?;
        Ok(Self {
            cells: vec![CellState::Free; width * height],
            width,
            height,
        })
    }

    /// Build a grid from row-major raw values (`0` free, non-zero blocked).
    pub fn from_cells(width: usize, height: usize, cells: &[i32]) -> Result<Self, GridError> {
        check_dims(width, height)?;
        if cells.len() != width * height {
            return Err(GridError::CellCountMismatch {
                expected: width * height,
                actual: cells.len(),
            });
        }
        Ok(Self {
            cells: cells.iter().map(|&v| CellState::from(v)).collect(),
            width,
            height,
        })
    }

    /// Build a grid from a slice of rows, each indexed by `x`.
    pub fn from_rows<R: AsRef<[i32]>>(rows: &[R]) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        check_dims(width, height)?;
        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(GridError::RaggedRows {
                    row: y,
                    expected: width,
                    actual: row.len(),
                });
            }
            cells.extend(row.iter().map(|&v| CellState::from(v)));
        }
        Ok(Self {
            cells,
            width,
            height,
        })
    }

    /// Build a grid from a text picture: `#` is blocked, `.` or a space is
    /// free. Leading and trailing blank lines are ignored.
    pub fn from_ascii(s: &str) -> Result<Self, GridError> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim_end)
            .skip_while(|l| l.trim().is_empty())
            .collect();
        let end = lines
            .iter()
            .rposition(|l| !l.trim().is_empty())
            .map_or(0, |i| i + 1);
        let lines = &lines[..end];
        let indent = lines
            .iter()
            .map(|l| l.len() - l.trim_start().len())
            .min()
            .unwrap_or(0);

        let mut rows = Vec::with_capacity(lines.len());
        for (line, text) in lines.iter().enumerate() {
            let mut row = Vec::with_capacity(text.len());
            for (column, ch) in text[indent..].chars().enumerate() {
                let v = match ch {
                    '#' => 1,
                    '.' | ' ' => 0,
                    _ => return Err(GridError::InvalidAsciiCell { ch, line, column }),
                };
                row.push(v);
            }
            rows.push(row);
        }
        Self::from_rows(&rows)
    }

    /// The bounding range `[0, width) × [0, height)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width as i32, self.height as i32)
    }

    /// Width.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`; a grid has at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width && (p.y as usize) < self.height
    }

    /// Flat index of `p`, or `None` outside the grid.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        if self.contains(p) {
            Some(p.y as usize * self.width + p.x as usize)
        } else {
            None
        }
    }

    /// Point for a flat index produced by [`index`](Grid::index).
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        Point::new((idx % self.width) as i32, (idx / self.width) as i32)
    }

    /// State of the cell at `p`, or `None` outside the grid.
    #[inline]
    pub fn state(&self, p: Point) -> Option<CellState> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Whether `p` is inside the grid and free.
    #[inline]
    pub fn is_free(&self, p: Point) -> bool {
        self.state(p).is_some_and(CellState::is_free)
    }

    /// Whether `p` cannot be entered. Points outside the grid count as
    /// blocked.
    #[inline]
    pub fn is_blocked(&self, p: Point) -> bool {
        !self.is_free(p)
    }

    /// Set the cell at `p`. Returns `false` if `p` is outside the grid.
    pub fn set(&mut self, p: Point, state: CellState) -> bool {
        match self.index(p) {
            Some(i) => {
                self.cells[i] = state;
                true
            }
            None => false,
        }
    }

    /// Mark `p` as blocked.
    pub fn block(&mut self, p: Point) -> bool {
        self.set(p, CellState::Blocked)
    }

    /// Mark `p` as free.
    pub fn clear(&mut self, p: Point) -> bool {
        self.set(p, CellState::Free)
    }

    /// Iterator over all free points, row-major.
    pub fn free_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_free())
            .map(|(i, _)| self.point(i))
    }
}

fn check_dims(width: usize, height: usize) -> Result<(), GridError> {
    if width == 0 || height == 0 {
        return Err(GridError::EmptyGrid { width, height });
    }
    if width > i32::MAX as usize || height > i32::MAX as usize {
        return Err(GridError::TooLarge { width, height });
    }
    Ok(())
}

/// Serialized form of a [`Grid`]: dimensions plus raw row-major values.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct GridData {
    width: usize,
    height: usize,
    cells: Vec<i32>,
}

#[cfg(feature = "serde")]
impl From<Grid> for GridData {
    fn from(g: Grid) -> Self {
        Self {
            width: g.width,
            height: g.height,
            cells: g.cells.into_iter().map(i32::from).collect(),
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<GridData> for Grid {
    type Error = GridError;

    fn try_from(d: GridData) -> Result<Self, GridError> {
        Grid::from_cells(d.width, d.height, &d.cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_all_free() {
        let g = Grid::new(3, 2).unwrap();
        assert_eq!(g.len(), 6);
        assert_eq!(g.free_points().count(), 6);
        assert_eq!(g.bounds(), Range::new(0, 0, 3, 2));
    }

    #[test]
    fn zero_dimension_is_rejected() {
        assert_eq!(
            Grid::new(0, 5),
            Err(GridError::EmptyGrid {
                width: 0,
                height: 5
            })
        );
        assert!(Grid::from_rows::<Vec<i32>>(&[]).is_err());
    }

    #[test]
    fn from_cells_checks_length() {
        let err = Grid::from_cells(2, 2, &[0, 0, 0]).unwrap_err();
        assert_eq!(
            err,
            GridError::CellCountMismatch {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn nonzero_values_are_blocked() {
        let g = Grid::from_cells(3, 1, &[0, 7, -1]).unwrap();
        assert!(g.is_free(Point::new(0, 0)));
        assert!(g.is_blocked(Point::new(1, 0)));
        assert!(g.is_blocked(Point::new(2, 0)));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = Grid::from_rows(&[vec![0, 0], vec![0]]).unwrap_err();
        assert_eq!(
            err,
            GridError::RaggedRows {
                row: 1,
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn out_of_bounds_is_blocked() {
        let g = Grid::new(2, 2).unwrap();
        assert!(g.is_blocked(Point::new(-1, 0)));
        assert!(g.is_blocked(Point::new(2, 0)));
        assert_eq!(g.state(Point::new(0, 2)), None);
        assert_eq!(g.index(Point::new(0, -1)), None);
    }

    #[test]
    fn index_round_trips_through_point() {
        let g = Grid::new(5, 4).unwrap();
        for p in g.bounds() {
            let i = g.index(p).unwrap();
            assert_eq!(g.point(i), p);
        }
    }

    #[test]
    fn set_and_clear() {
        let mut g = Grid::new(2, 2).unwrap();
        assert!(g.block(Point::new(1, 1)));
        assert!(g.is_blocked(Point::new(1, 1)));
        assert!(g.clear(Point::new(1, 1)));
        assert!(g.is_free(Point::new(1, 1)));
        assert!(!g.block(Point::new(9, 9)));
    }

    #[test]
    fn ascii_picture() {
        let g = Grid::from_ascii(
            "
            ..#.
            .##.
            ....
            ",
        )
        .unwrap();
        assert_eq!((g.width(), g.height()), (4, 3));
        assert!(g.is_blocked(Point::new(2, 0)));
        assert!(g.is_blocked(Point::new(1, 1)));
        assert!(g.is_free(Point::new(3, 2)));
    }

    #[test]
    fn ascii_rejects_unknown_glyph() {
        let err = Grid::from_ascii("..\n.x").unwrap_err();
        assert_eq!(
            err,
            GridError::InvalidAsciiCell {
                ch: 'x',
                line: 1,
                column: 1
            }
        );
    }

    #[test]
    fn grid_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Grid>();
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let g = Grid::from_cells(2, 2, &[0, 1, 1, 0]).unwrap();
        let json = serde_json::to_string(&g).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(g, back);
    }

    #[test]
    fn invalid_grid_fails_to_deserialize() {
        let json = r#"{"width":0,"height":3,"cells":[]}"#;
        assert!(serde_json::from_str::<Grid>(json).is_err());
    }
}
