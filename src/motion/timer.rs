/// Progress timing for a single motion
///
/// Converts elapsed real time into clamped raw progress against a fixed
/// time budget, and maps it through an easing curve. A budget of zero is
/// not an error: it means the motion is already complete, so progress
/// reads 1 without ever dividing by zero.

use crate::easing::Easing;

#[derive(Debug, Clone, Default)]
pub struct ProgressTimer {
    budget: f64,
    elapsed: f64,
    active: bool,
    completed: bool,
    paused: bool,
}

impl ProgressTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer for a new motion. Starts paused; the caller must
    /// explicitly resume so configuration alone never causes movement.
    pub fn configure(&mut self, budget: f64) {
        self.budget = budget.max(0.0);
        self.elapsed = 0.0;
        self.active = true;
        self.completed = false;
        self.paused = true;
    }

    /// Advance by `dt` seconds. Returns true exactly once, on the tick
    /// where the exhausted budget deactivates the timer.
    ///
    /// Zero or negative `dt` advances nothing. Deactivation happens on the
    /// tick after `elapsed` reached the budget, so the final position is
    /// still produced by an active timer.
    pub fn advance(&mut self, dt: f64) -> bool {
        if !self.active {
            return false;
        }
        if self.elapsed < self.budget {
            if !self.paused && dt > 0.0 {
                self.elapsed = (self.elapsed + dt).clamp(0.0, self.budget);
            }
            false
        } else {
            self.active = false;
            self.completed = true;
            true
        }
    }

    /// Raw progress in [0, 1]; a zero budget reads as fully progressed.
    pub fn raw_progress(&self) -> f64 {
        if self.budget == 0.0 {
            1.0
        } else {
            (self.elapsed / self.budget).clamp(0.0, 1.0)
        }
    }

    /// Eased progress T.
    ///
    /// Reads 0 before any motion was configured, 1 after natural
    /// completion (so position queries freeze at the curve's end), and the
    /// eased raw progress while running.
    pub fn eased_progress(&self, easing: Easing) -> f64 {
        if self.completed {
            1.0
        } else if !self.active {
            0.0
        } else if self.budget == 0.0 {
            1.0
        } else {
            easing.apply(self.raw_progress())
        }
    }

    /// Directly override elapsed time, clamped into the valid range.
    pub fn set_elapsed(&mut self, elapsed: f64) {
        self.elapsed = elapsed.clamp(0.0, self.budget);
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Back to the unarmed state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn active(&self) -> bool {
        self.active
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn budget(&self) -> f64 {
        self.budget
    }
}
