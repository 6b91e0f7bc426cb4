/// Fixed-step frame clock.
///
/// The host calls in once per display refresh with the real elapsed time;
/// the clock answers how many fixed ticks to simulate. Per-tick quantities
/// (e.g. "radians per step") therefore advance at the same real-time rate on
/// 60 Hz and 144 Hz displays alike.
pub struct FrameClock {
    /// Seconds per tick.
    step: f32,
    /// Real time not yet consumed by a tick.
    accumulator: f32,
    /// Upper bound on ticks per host frame (catch-up cap).
    max_steps: u32,
    /// Ticks run since creation.
    ticks: u64,
}

impl FrameClock {
    pub const DEFAULT_MAX_STEPS: u32 = 10;

    pub fn new(step: f32) -> Self {
        Self {
            step,
            accumulator: 0.0,
            max_steps: Self::DEFAULT_MAX_STEPS,
            ticks: 0,
        }
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    /// Add one host frame's elapsed seconds. Returns the number of ticks to run.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if !frame_dt.is_finite() || frame_dt <= 0.0 {
            return 0;
        }
        self.accumulator += frame_dt;
        let mut steps = (self.accumulator / self.step) as u32;
        if steps > self.max_steps {
            // Drop the backlog after a long stall (tab in background, debugger).
            steps = self.max_steps;
            self.accumulator = 0.0;
        } else {
            self.accumulator -= steps as f32 * self.step;
        }
        self.ticks += steps as u64;
        steps
    }

    /// Fraction of a tick left in the accumulator (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
