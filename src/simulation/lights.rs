//! Traffic light timing
//!
//! Each intersection runs its own fixed-duration cycle
//! green -> yellow -> red -> green, driven only by ticks.

use super::types::LightState;

/// Ticks spent in green before turning yellow
pub const GREEN_DURATION: u32 = 30;

/// Ticks spent in yellow before turning red
pub const YELLOW_DURATION: u32 = 5;

/// Ticks spent in red before turning green
pub const RED_DURATION: u32 = 25;

/// Duration of each light state, in ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightTiming {
    pub green: u32,
    pub yellow: u32,
    pub red: u32,
}

impl Default for LightTiming {
    fn default() -> Self {
        Self {
            green: GREEN_DURATION,
            yellow: YELLOW_DURATION,
            red: RED_DURATION,
        }
    }
}

impl LightTiming {
    pub fn duration(&self, state: LightState) -> u32 {
        let ticks = match state {
            LightState::Green => self.green,
            LightState::Yellow => self.yellow,
            LightState::Red => self.red,
        };
        // A zero-length state would never be observed; hold it for one tick.
        ticks.max(1)
    }

    /// Length of one full cycle
    pub fn period(&self) -> u32 {
        self.duration(LightState::Green)
            + self.duration(LightState::Yellow)
            + self.duration(LightState::Red)
    }
}

/// Finite-state machine for one traffic light
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightCycle {
    state: LightState,
    elapsed: u32,
    timing: LightTiming,
}

impl Default for LightCycle {
    fn default() -> Self {
        Self::new()
    }
}

impl LightCycle {
    /// A cycle starting at green with the default 30/5/25 timing
    pub fn new() -> Self {
        Self::with_timing(LightTiming::default())
    }

    pub fn with_timing(timing: LightTiming) -> Self {
        Self {
            state: LightState::Green,
            elapsed: 0,
            timing,
        }
    }

    /// Advance one tick. Returns the new state if a transition happened.
    pub fn tick(&mut self) -> Option<LightState> {
        self.elapsed += 1;
        if self.elapsed >= self.timing.duration(self.state) {
            self.state = self.state.next();
            self.elapsed = 0;
            return Some(self.state);
        }
        None
    }

    pub fn state(&self) -> LightState {
        self.state
    }

    /// Ticks spent in the current state
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn timing(&self) -> LightTiming {
        self.timing
    }
}
