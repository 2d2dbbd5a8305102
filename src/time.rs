//! Fixed-timestep game clock using an accumulator pattern.
//!
//! `draw_web()` calls at ~60fps with variable delta. GameTime converts
//! that into whole game ticks so the economy advances at a steady rate no
//! matter how often the browser paints.

/// Most ticks a single frame may replay. A tab that was backgrounded for
/// an hour resumes with at most this much catch-up.
pub const MAX_CATCH_UP_TICKS: u32 = 60;

pub struct GameTime {
    ms_per_tick: f64,
    /// Milliseconds not yet consumed as ticks
    accumulator: f64,
    /// Total elapsed ticks since creation
    pub total_ticks: u64,
    /// Timestamp of the last update (ms), None before the first frame
    last_timestamp: Option<f64>,
}

impl GameTime {
    pub fn new(ms_per_tick: f64) -> Self {
        Self {
            ms_per_tick,
            accumulator: 0.0,
            total_ticks: 0,
            last_timestamp: None,
        }
    }

    /// Feed a wall-clock timestamp (`performance.now()`) and get back how
    /// many ticks to run this frame.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let max_delta = self.ms_per_tick * MAX_CATCH_UP_TICKS as f64;
        let delta = match self.last_timestamp {
            Some(prev) => (now_ms - prev).clamp(0.0, max_delta),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let ticks = ((self.accumulator / self.ms_per_tick) as u32).min(MAX_CATCH_UP_TICKS);
        self.accumulator -= ticks as f64 * self.ms_per_tick;
        self.total_ticks += ticks as u64;
        ticks
    }
}
