use std::time::Instant;

use crate::engine::KeydownOutcome;

/// Running counts for the current run. Lives in memory only.
#[derive(Clone, Debug, Default)]
pub struct Tally {
    pub presses: usize,
    pub matches: usize,
    pub misses: usize,
    pub unmapped: usize,
    pub streak: usize,
    pub best_streak: usize,
    pub started_at: Option<Instant>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: &KeydownOutcome, now: Instant) {
        self.presses += 1;
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
        match outcome {
            KeydownOutcome::Unmapped => self.unmapped += 1,
            KeydownOutcome::NoTarget => {}
            KeydownOutcome::Missed { .. } => {
                self.misses += 1;
                self.streak = 0;
            }
            KeydownOutcome::Matched { .. } => {
                self.matches += 1;
                self.streak += 1;
                self.best_streak = self.best_streak.max(self.streak);
            }
        }
    }

    /// Share of target attempts that hit the target, in percent.
    pub fn accuracy(&self) -> f64 {
        let attempts = self.matches + self.misses;
        if attempts == 0 {
            return 100.0;
        }
        self.matches as f64 / attempts as f64 * 100.0
    }

    pub fn elapsed_secs(&self, now: Instant) -> f64 {
        match self.started_at {
            Some(start) => now.duration_since(start).as_secs_f64(),
            None => 0.0,
        }
    }

    /// Matched targets per minute.
    pub fn targets_per_minute(&self, now: Instant) -> f64 {
        let elapsed = self.elapsed_secs(now);
        if elapsed < 0.1 {
            return 0.0;
        }
        self.matches as f64 / (elapsed / 60.0)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
