use thiserror::Error;

/// Errors raised while constructing a [`Grid`](crate::Grid).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Either dimension is zero.
    #[error("grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },

    /// A dimension does not fit in a coordinate.
    #[error("grid {width}x{height} exceeds the coordinate range")]
    TooLarge { width: usize, height: usize },

    /// The flat cell buffer does not match `width * height`.
    #[error("expected {expected} cells, got {actual}")]
    CellCountMismatch { expected: usize, actual: usize },

    /// A row differs in length from the first row.
    #[error("row {row} has {actual} cells, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A text picture contains a glyph other than `#`, `.` or space.
    #[error("unexpected {ch:?} at line {line}, column {column}")]
    InvalidAsciiCell { ch: char, line: usize, column: usize },
}
