// app.rs - Simulation controls: run/stop, resize within bounds, reseed

use life::{Grid, GridError, Pattern};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::runtime::Handle;

use crate::config::AppConfig;
use crate::scheduler::{Scheduler, SharedGrid, lock_grid};

/// One grid plus the loop that animates it.
///
/// Size limits live here; the grid itself accepts any size.
pub struct Simulation {
    grid: SharedGrid,
    scheduler: Scheduler,
    min_size: usize,
    max_size: usize,
}

impl Simulation {
    pub fn new(handle: Handle, config: &AppConfig) -> Self {
        let interval = Duration::from_millis(config.tick_interval_ms);
        Self {
            grid: Arc::new(Mutex::new(Grid::new(config.initial_size))),
            scheduler: Scheduler::new(handle, interval),
            min_size: config.min_size,
            max_size: config.max_size,
        }
    }

    pub fn grid(&self) -> &SharedGrid {
        &self.grid
    }

    pub fn size(&self) -> usize {
        lock_grid(&self.grid).size()
    }

    pub fn generation(&self) -> u64 {
        self.scheduler.generation()
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn start<F>(&mut self, on_tick: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.scheduler.start(self.grid.clone(), on_tick);
    }

    pub fn stop(&mut self) {
        self.scheduler.stop();
    }

    pub fn toggle<F>(&mut self, on_tick: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        if self.is_running() {
            self.stop();
        } else {
            self.start(on_tick);
        }
    }

    pub fn can_grow(&self) -> bool {
        self.size() < self.max_size
    }

    pub fn can_shrink(&self) -> bool {
        self.size() > self.min_size
    }

    /// Grow by one unless already at the maximum size.
    pub fn grow(&self) -> bool {
        let mut grid = lock_grid(&self.grid);
        if grid.size() >= self.max_size {
            tracing::warn!("Maximum grid size ({}) reached", self.max_size);
            return false;
        }
        grid.grow();
        tracing::info!("Grid expanded to {}x{}", grid.size(), grid.size());
        true
    }

    /// Shrink by one unless already at the minimum size.
    pub fn shrink(&self) -> bool {
        let mut grid = lock_grid(&self.grid);
        if grid.size() <= self.min_size {
            tracing::warn!("Minimum grid size ({}) reached", self.min_size);
            return false;
        }
        match grid.shrink() {
            Ok(()) => {
                tracing::info!("Grid shrunk to {}x{}", grid.size(), grid.size());
                true
            }
            Err(e) => {
                tracing::warn!("Shrink refused: {}", e);
                false
            }
        }
    }

    /// Refill the grid at its current size and restart the generation count.
    pub fn randomize(&self) {
        let mut grid = lock_grid(&self.grid);
        *grid = Grid::new(grid.size());
        // Under the same lock as the ticks, so the count matches the grid
        self.scheduler.reset_generation();
        drop(grid);
        tracing::info!("Grid randomized");
    }

    /// Replace the grid with `pattern` centred at the current size.
    /// Stops the loop first so the pattern can be seen before it evolves.
    pub fn load_pattern(&mut self, pattern: &Pattern) -> Result<(), GridError> {
        let next = Grid::from_pattern(self.size(), pattern)?;
        self.stop();
        let mut grid = lock_grid(&self.grid);
        *grid = next;
        self.scheduler.reset_generation();
        drop(grid);
        tracing::info!("Loaded pattern {}", pattern.name);
        Ok(())
    }

    /// Generations per second.
    pub fn speed(&self) -> f32 {
        1.0 / self.scheduler.interval().as_secs_f32()
    }

    /// Ignored for non-positive or non-finite rates.
    pub fn set_speed(&mut self, gen_per_sec: f32) {
        if !(gen_per_sec.is_finite() && gen_per_sec > 0.0) {
            return;
        }
        if let Ok(interval) = Duration::try_from_secs_f32(1.0 / gen_per_sec) {
            self.scheduler.set_interval(interval);
        }
    }
}
