//! Breathing oscillator: a slow sine cycle used to modulate visuals in
//! Internalized mode.

use std::f32::consts::TAU;

use crate::model::BreathState;

/// Default cycle length, in the same time unit as frame deltas.
pub const DEFAULT_PERIOD: f32 = 16.0;

/// Accumulates time and reports the breath state as a pure function of it.
#[derive(Debug, Clone, PartialEq)]
pub struct BreathOscillator {
    period: f32,
    elapsed: f32,
}

impl BreathOscillator {
    /// `period` must be positive; callers validate it through
    /// [`BreathConfig`](crate::config::BreathConfig).
    pub fn new(period: f32) -> Self {
        Self { period, elapsed: 0.0 }
    }

    /// Advance the cycle. Time is kept wrapped to one period so small
    /// deltas keep their precision over long sessions.
    pub fn update(&mut self, delta: f32) {
        self.elapsed = (self.elapsed + delta).rem_euclid(self.period);
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    /// Time into the current cycle.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn period(&self) -> f32 {
        self.period
    }

    pub fn state(&self) -> BreathState {
        let raw = self.elapsed.rem_euclid(self.period) / self.period;
        let angle = raw * TAU;
        BreathState {
            phase: angle.sin() * 0.5 + 0.5,
            derivative: angle.cos(),
            intensity: 1.0,
        }
    }
}

impl Default for BreathOscillator {
    fn default() -> Self {
        Self::new(DEFAULT_PERIOD)
    }
}
