//! Conway's Game of Life on a finite, resizable square grid.
//!
//! The grid has hard edges: coordinates outside it read as dead, so cells on
//! the border simply have fewer potential neighbors.

pub mod error;
pub mod grid;
pub mod patterns;
pub mod rules;

pub use error::GridError;
pub use grid::{Grid, TRow};
pub use patterns::{PATTERNS, Pattern};
pub use rules::should_live;
