// scheduler.rs - Fixed-interval generation loop running on the tokio runtime
//
// The grid knows nothing about time. This loop owns the timing and advances
// a shared grid once per tick until it is stopped.

use life::Grid;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

pub type SharedGrid = Arc<Mutex<Grid>>;

type TickFn = Arc<dyn Fn() + Send + Sync>;

const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Lock the shared grid. A panic while holding the lock cannot leave a
/// half-built generation behind, so a poisoned lock is still usable.
pub fn lock_grid(grid: &SharedGrid) -> MutexGuard<'_, Grid> {
    grid.lock().unwrap_or_else(PoisonError::into_inner)
}

struct Running {
    task: JoinHandle<()>,
    // Set under the grid lock; the loop checks it under the same lock
    cancelled: Arc<AtomicBool>,
    grid: SharedGrid,
    on_tick: TickFn,
}

impl Running {
    fn cancel(self) -> (SharedGrid, TickFn) {
        {
            let _grid = lock_grid(&self.grid);
            self.cancelled.store(true, Ordering::SeqCst);
        }
        self.task.abort();
        (self.grid, self.on_tick)
    }
}

pub struct Scheduler {
    handle: Handle,
    interval: Duration,
    generation: Arc<AtomicU64>,
    running: Option<Running>,
}

impl Scheduler {
    pub fn new(handle: Handle, interval: Duration) -> Self {
        Self {
            handle,
            interval: interval.max(MIN_INTERVAL),
            generation: Arc::new(AtomicU64::new(0)),
            running: None,
        }
    }

    /// Start advancing `grid` every interval, calling `on_tick` after each
    /// generation. The first tick comes one full interval after the call.
    /// Does nothing if already running.
    pub fn start<F>(&mut self, grid: SharedGrid, on_tick: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        if self.is_running() {
            return;
        }
        self.spawn(grid, Arc::new(on_tick));
    }

    /// Cancel the loop. The grid is not advanced after this returns; a tick
    /// already holding the lock finishes first.
    ///
    /// Must not be called while holding [`lock_grid`] on the same grid.
    pub fn stop(&mut self) {
        if let Some(running) = self.running.take() {
            running.cancel();
            tracing::info!("Scheduler stopped at generation {}", self.generation());
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.as_ref().is_some_and(|r| !r.task.is_finished())
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Change the tick period. A running loop restarts with the new period.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval.max(MIN_INTERVAL);
        if let Some(running) = self.running.take() {
            let (grid, on_tick) = running.cancel();
            self.spawn(grid, on_tick);
        }
    }

    /// Generations advanced since creation or the last reset.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Zero the counter. Ticks bump it under the grid lock, so callers that
    /// replace the grid should reset while still holding that lock.
    pub fn reset_generation(&self) {
        self.generation.store(0, Ordering::SeqCst);
    }

    fn spawn(&mut self, grid: SharedGrid, on_tick: TickFn) {
        let cancelled = Arc::new(AtomicBool::new(false));
        let task = self.handle.spawn(run(
            grid.clone(),
            self.interval,
            self.generation.clone(),
            cancelled.clone(),
            on_tick.clone(),
        ));
        tracing::info!("Scheduler started, interval {:?}", self.interval);
        self.running = Some(Running { task, cancelled, grid, on_tick });
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run(
    grid: SharedGrid,
    period: Duration,
    generation: Arc<AtomicU64>,
    cancelled: Arc<AtomicBool>,
    on_tick: TickFn,
) {
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        {
            // No await while the lock is held; the whole replacement is one step.
            let mut grid = lock_grid(&grid);
            if cancelled.load(Ordering::SeqCst) {
                return;
            }
            grid.advance_generation();
            generation.fetch_add(1, Ordering::SeqCst);
        }
        on_tick();
    }
}
