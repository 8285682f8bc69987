// grid.rs - Square Game of Life grid with hard edges

use rand::Rng;
use tracing::{debug, trace, warn};

use crate::error::GridError;
use crate::patterns::Pattern;
use crate::rules::should_live;

pub type TRow = Vec<bool>;

// Moore neighborhood offsets as (row, col)
const NEIGHBORS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1), (0, -1),
    (1, -1),  (1, 0),  (1, 1),  (0, 1),
];

/// A `size x size` grid of alive/dead cells.
///
/// Cells can only be changed by advancing a generation or by resizing; the
/// contents are otherwise read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<TRow>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SIZE)
    }
}

impl Grid {
    pub const DEFAULT_SIZE: usize = 15;

    /// Random grid, each cell alive with probability 1/2.
    pub fn new(size: usize) -> Self {
        Self::with_rng(size, &mut rand::rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        let cells = (0..size).map(|_| random_row(size, rng)).collect();
        Self { size, cells }
    }

    /// Build a grid from explicit rows. Every row must be as long as there are rows.
    pub fn from_rows(rows: Vec<TRow>) -> Result<Self, GridError> {
        let size = rows.len();
        if let Some((row, cells)) = rows.iter().enumerate().find(|(_, r)| r.len() != size) {
            return Err(GridError::NotSquare { rows: size, row, len: cells.len() });
        }
        Ok(Self { size, cells: rows })
    }

    /// All-dead grid with `pattern` placed in the middle.
    pub fn from_pattern(size: usize, pattern: &Pattern) -> Result<Self, GridError> {
        let (height, width) = pattern.extent();
        if height > size || width > size {
            return Err(GridError::PatternTooLarge { pattern: pattern.name, size });
        }

        let top = (size - height) / 2;
        let left = (size - width) / 2;
        let mut cells = vec![vec![false; size]; size];
        for &(row, col) in pattern.cells {
            cells[top + row][left + col] = true;
        }
        Ok(Self { size, cells })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Read-only view of the current generation, row-major.
    pub fn read(&self) -> &[TRow] {
        &self.cells
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&alive| alive).count()
    }

    /// State of a cell. Anything outside the grid, negative coordinates
    /// included, is dead.
    pub fn is_alive(&self, row: isize, column: isize) -> bool {
        self.position(row, column)
            .is_some_and(|(r, c)| self.cells[r][c])
    }

    /// Number of live cells among the 8 surrounding positions.
    pub fn live_neighbor_count(&self, row: isize, column: isize) -> u8 {
        let mut count = 0;
        for &(dr, dc) in &NEIGHBORS {
            if let (Some(r), Some(c)) = (row.checked_add(dr), column.checked_add(dc)) {
                if self.is_alive(r, c) { count += 1; }
            }
        }
        count
    }

    /// State of a cell in the next generation, computed from the current one.
    pub fn next_cell_state(&self, row: isize, column: isize) -> bool {
        should_live(self.is_alive(row, column), self.live_neighbor_count(row, column))
    }

    /// Replace the whole grid with the next generation.
    ///
    /// The new cells are built into a separate buffer and swapped in at the
    /// end, so every cell sees the same previous generation.
    pub fn advance_generation(&mut self) {
        let next: Vec<TRow> = (0..self.size)
            .map(|row| {
                (0..self.size)
                    .map(|col| self.next_cell_state(row as isize, col as isize))
                    .collect()
            })
            .collect();

        self.cells = next;
        trace!(size = self.size, "advanced generation");
    }

    /// Add one random column on the right and one random row at the bottom.
    pub fn grow(&mut self) {
        self.grow_with(&mut rand::rng());
    }

    pub fn grow_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for row in &mut self.cells {
            row.push(rng.random());
        }
        self.size += 1;
        self.cells.push(random_row(self.size, rng));
        debug!(size = self.size, "grid grown");
    }

    /// Drop the last row and column.
    ///
    /// Fails with [`GridError::EmptyGrid`] at size 0 and leaves the grid as is.
    pub fn shrink(&mut self) -> Result<(), GridError> {
        if self.size == 0 {
            warn!("refusing to shrink an empty grid");
            return Err(GridError::EmptyGrid);
        }

        self.size -= 1;
        self.cells.truncate(self.size);
        for row in &mut self.cells {
            row.truncate(self.size);
        }
        debug!(size = self.size, "grid shrunk");
        Ok(())
    }

    fn position(&self, row: isize, column: isize) -> Option<(usize, usize)> {
        let r = usize::try_from(row).ok()?;
        let c = usize::try_from(column).ok()?;
        (r < self.size && c < self.size).then_some((r, c))
    }
}

fn random_row<R: Rng + ?Sized>(len: usize, rng: &mut R) -> TRow {
    (0..len).map(|_| rng.random()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Parse rows of `#` (alive) and `.` (dead).
    fn parse(rows: &[&str]) -> Grid {
        let rows = rows.iter().map(|r| r.chars().map(|c| c == '#').collect()).collect();
        Grid::from_rows(rows).unwrap()
    }

    #[test]
    fn create_has_requested_shape() {
        for size in [0, 1, 4, 15, 20] {
            let grid = Grid::new(size);
            assert_eq!(grid.size(), size);
            assert_eq!(grid.read().len(), size);
            assert!(grid.read().iter().all(|row| row.len() == size));
        }
    }

    #[test]
    fn default_grid_is_fifteen_square() {
        let grid = Grid::default();
        assert_eq!(grid.size(), 15);
        assert_eq!(grid.read().len(), 15);
    }

    #[test]
    fn random_fill_is_roughly_even() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = Grid::with_rng(100, &mut rng);
        let ratio = grid.live_count() as f64 / 10_000.0;
        assert!((0.45..0.55).contains(&ratio), "live ratio {ratio}");
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        let err = Grid::from_rows(vec![vec![true, false], vec![true]]).unwrap_err();
        assert_eq!(err, GridError::NotSquare { rows: 2, row: 1, len: 1 });

        let err = Grid::from_rows(vec![vec![true, false, true]]).unwrap_err();
        assert_eq!(err, GridError::NotSquare { rows: 1, row: 0, len: 3 });
    }

    #[test]
    fn is_alive_reads_stored_cells() {
        let grid = Grid::new(6);
        for (r, row) in grid.read().iter().enumerate() {
            for (c, &cell) in row.iter().enumerate() {
                assert_eq!(grid.is_alive(r as isize, c as isize), cell);
            }
        }
    }

    #[test]
    fn out_of_range_is_dead() {
        let grid = parse(&["###", "###", "###"]);
        assert!(!grid.is_alive(-1, 0));
        assert!(!grid.is_alive(0, -1));
        assert!(!grid.is_alive(3, 0));
        assert!(!grid.is_alive(0, 3));
        assert!(!grid.is_alive(-1, -1));
        assert!(!grid.is_alive(isize::MIN, isize::MAX));
    }

    #[test]
    fn neighbor_count_stops_at_edges() {
        let grid = parse(&["###", "###", "###"]);
        assert_eq!(grid.live_neighbor_count(1, 1), 8);
        assert_eq!(grid.live_neighbor_count(0, 0), 3);
        assert_eq!(grid.live_neighbor_count(0, 1), 5);
        assert_eq!(grid.live_neighbor_count(2, 2), 3);
        assert_eq!(grid.live_neighbor_count(-1, -1), 1);
        assert_eq!(grid.live_neighbor_count(-2, 5), 0);
    }

    #[test]
    fn neighbor_count_ignores_the_cell_itself() {
        let grid = parse(&["...", ".#.", "..."]);
        assert_eq!(grid.live_neighbor_count(1, 1), 0);
        assert_eq!(grid.live_neighbor_count(0, 0), 1);
    }

    #[test]
    fn neighbor_count_survives_extreme_coordinates() {
        let grid = parse(&["##", "##"]);
        assert_eq!(grid.live_neighbor_count(isize::MAX, isize::MAX), 0);
        assert_eq!(grid.live_neighbor_count(isize::MIN, 0), 0);
    }

    #[test]
    fn dead_cell_with_three_neighbors_is_born() {
        let grid = parse(&["#.#", "...", ".#."]);
        assert!(!grid.is_alive(1, 1));
        assert_eq!(grid.live_neighbor_count(1, 1), 3);
        assert!(grid.next_cell_state(1, 1));
    }

    #[test]
    fn crowded_cell_dies() {
        let grid = parse(&["###", "##.", "..."]);
        assert_eq!(grid.live_neighbor_count(1, 1), 4);
        assert!(!grid.next_cell_state(1, 1));
    }

    #[test]
    fn next_cell_state_matches_rule() {
        let grid = Grid::new(8);
        for r in -1..=8 {
            for c in -1..=8 {
                let expected = should_live(grid.is_alive(r, c), grid.live_neighbor_count(r, c));
                assert_eq!(grid.next_cell_state(r, c), expected);
            }
        }
    }

    #[test]
    fn advance_uses_previous_generation_only() {
        let mut grid = parse(&[".....", "..#..", "..#..", "..#..", "....."]);
        grid.advance_generation();
        assert_eq!(grid, parse(&[".....", ".....", ".###.", ".....", "....."]));
        grid.advance_generation();
        assert_eq!(grid, parse(&[".....", "..#..", "..#..", "..#..", "....."]));
    }

    #[test]
    fn block_is_still_life() {
        let block = parse(&["....", ".##.", ".##.", "...."]);
        let mut grid = block.clone();
        grid.advance_generation();
        assert_eq!(grid, block);
    }

    #[test]
    fn advance_matches_precomputed_cell() {
        for _ in 0..20 {
            let mut grid = Grid::new(15);
            let expected = grid.next_cell_state(1, 1);
            grid.advance_generation();
            assert_eq!(grid.size(), 15);
            assert_eq!(grid.read()[1][1], expected);
        }
    }

    #[test]
    fn advance_on_empty_grid_is_noop() {
        let mut grid = Grid::new(0);
        grid.advance_generation();
        assert_eq!(grid.size(), 0);
        assert!(grid.read().is_empty());
    }

    #[test]
    fn corner_blob_dies_out_at_hard_edge() {
        // With wraparound the corners would feed each other.
        let mut grid = parse(&["#..#", "....", "....", "#..#"]);
        grid.advance_generation();
        assert_eq!(grid.live_count(), 0);
    }

    #[test]
    fn grow_keeps_existing_cells() {
        let mut grid = Grid::new(6);
        let before = grid.clone();
        grid.grow();

        assert_eq!(grid.size(), 7);
        assert_eq!(grid.read().len(), 7);
        assert!(grid.read().iter().all(|row| row.len() == 7));
        for r in 0..6 {
            assert_eq!(grid.read()[r][..6], before.read()[r][..]);
        }
    }

    #[test]
    fn grown_border_is_roughly_even() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut grid = Grid::from_rows(vec![vec![false; 50]; 50]).unwrap();
        for _ in 0..50 {
            grid.grow_with(&mut rng);
        }
        // 2s+1 new cells per step for s = 50..99
        let added = (50..100).map(|s| 2 * s + 1).sum::<usize>();
        let ratio = grid.live_count() as f64 / added as f64;
        assert!((0.45..0.55).contains(&ratio), "live ratio {ratio}");
    }

    #[test]
    fn grow_from_empty() {
        let mut grid = Grid::new(0);
        grid.grow();
        assert_eq!(grid.size(), 1);
        assert_eq!(grid.read(), &[vec![grid.is_alive(0, 0)]]);
    }

    #[test]
    fn shrink_drops_last_row_and_column() {
        let mut grid = parse(&["#..", ".#.", "###"]);
        grid.shrink().unwrap();
        assert_eq!(grid, parse(&["#.", ".#"]));
        assert!(!grid.is_alive(2, 2));
    }

    #[test]
    fn shrink_to_zero_then_refuse() {
        let mut grid = parse(&["#"]);
        assert_eq!(grid.shrink(), Ok(()));
        assert_eq!(grid.size(), 0);
        assert_eq!(grid.shrink(), Err(GridError::EmptyGrid));
        assert_eq!(grid.size(), 0);
        assert!(grid.read().is_empty());
    }

    #[test]
    fn grow_then_shrink_restores_block() {
        let mut grid = Grid::new(4);
        let original = grid.clone();

        grid.grow();
        assert_eq!(grid.size(), 5);
        for r in 0..4 {
            assert_eq!(grid.read()[r][..4], original.read()[r][..]);
        }

        grid.shrink().unwrap();
        assert_eq!(grid, original);
    }

    #[test]
    fn from_pattern_centres_cells() {
        let blinker = patterns::find("Blinker").unwrap();
        let grid = Grid::from_pattern(5, blinker).unwrap();
        assert_eq!(grid, parse(&[".....", ".....", ".###.", ".....", "....."]));
    }

    #[test]
    fn from_pattern_too_large() {
        let pulsar = patterns::find("Pulsar").unwrap();
        let err = Grid::from_pattern(12, pulsar).unwrap_err();
        assert_eq!(err, GridError::PatternTooLarge { pattern: "Pulsar", size: 12 });
        assert!(Grid::from_pattern(13, pulsar).is_ok());
    }

    #[test]
    fn pulsar_has_period_three() {
        let pulsar = patterns::find("Pulsar").unwrap();
        let start = Grid::from_pattern(17, pulsar).unwrap();
        let mut grid = start.clone();
        grid.advance_generation();
        assert_ne!(grid, start);
        grid.advance_generation();
        grid.advance_generation();
        assert_eq!(grid, start);
    }
}
