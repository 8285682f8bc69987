// error.rs - Errors raised by grid construction and resizing

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("cannot shrink an empty grid")]
    EmptyGrid,

    #[error("grid is not square: row {row} has {len} cells, expected {rows}")]
    NotSquare { rows: usize, row: usize, len: usize },

    #[error("pattern '{pattern}' does not fit in a {size}x{size} grid")]
    PatternTooLarge { pattern: &'static str, size: usize },
}
