//! Time management utilities
//!
//! Physics runs on its own fixed clock (30 Hz by default) while frames are
//! produced at whatever rate the host loop manages. [`FixedTimestep`] converts
//! variable frame deltas into a whole number of fixed ticks.

use std::time::{Duration, Instant};

/// Fixed-rate tick accumulator
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    tick_dt: f32,
    accumulator: f32,
    max_ticks_per_frame: u32,
    tick_count: u64,
}

impl FixedTimestep {
    /// Create a new accumulator ticking at `tick_rate_hz`
    ///
    /// `max_ticks_per_frame` bounds the catch-up work done for a single long
    /// frame; time beyond that is discarded.
    pub fn new(tick_rate_hz: f32, max_ticks_per_frame: u32) -> Self {
        Self {
            tick_dt: 1.0 / tick_rate_hz,
            accumulator: 0.0,
            max_ticks_per_frame,
            tick_count: 0,
        }
    }

    /// Feed a frame delta and return how many fixed ticks should run now
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if !frame_dt.is_finite() || frame_dt <= 0.0 {
            return 0;
        }

        self.accumulator += frame_dt;

        let mut ticks = 0;
        while self.accumulator >= self.tick_dt && ticks < self.max_ticks_per_frame {
            self.accumulator -= self.tick_dt;
            ticks += 1;
        }

        if self.accumulator >= self.tick_dt {
            log::debug!(
                "FixedTimestep: dropping {:.4}s of simulation time after {} ticks",
                self.accumulator,
                ticks
            );
            self.accumulator %= self.tick_dt;
        }

        self.tick_count += u64::from(ticks);
        ticks
    }

    /// Length of one fixed tick in seconds
    pub fn tick_dt(&self) -> f32 {
        self.tick_dt
    }

    /// Leftover time not yet consumed by a tick, as a fraction of a tick
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.tick_dt
    }

    /// Total ticks handed out so far
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

/// Simple stopwatch for measuring elapsed time
pub struct Stopwatch {
    start_time: Option<Instant>,
    elapsed: Duration,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    /// Create a new stopped stopwatch
    pub fn new() -> Self {
        Self {
            start_time: None,
            elapsed: Duration::ZERO,
        }
    }

    /// Create a new stopwatch and start it immediately
    pub fn start_new() -> Self {
        let mut stopwatch = Self::new();
        stopwatch.start();
        stopwatch
    }

    /// Start the stopwatch
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Stop the stopwatch and accumulate elapsed time
    pub fn stop(&mut self) {
        if let Some(start) = self.start_time {
            self.elapsed += start.elapsed();
            self.start_time = None;
        }
    }

    /// Get the elapsed time
    pub fn elapsed(&self) -> Duration {
        let current_elapsed = self.start_time.map_or(Duration::ZERO, |start| start.elapsed());
        self.elapsed + current_elapsed
    }

    /// Get the elapsed time in milliseconds
    pub fn elapsed_millis(&self) -> f32 {
        self.elapsed().as_secs_f32() * 1000.0
    }
}
