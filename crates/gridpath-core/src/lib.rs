//! Core types for grid-based shortest-path search.
//!
//! This crate provides the values every search shares: [`Point`] cell
//! coordinates, [`Range`] rectangles, and the immutable obstacle [`Grid`].

pub mod error;
pub mod geom;
pub mod grid;

pub use error::GridError;
pub use geom::{Point, Range, RangeIter};
pub use grid::{CellState, Grid};
