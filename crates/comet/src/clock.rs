//! Pausable, speed-scaled animation clock.

use std::time::{Duration, Instant};

use comet_core::AnimationSpeed;

/// Milliseconds of animation time, advanced from wall-clock deltas.
#[derive(Debug, Clone)]
pub struct AnimationClock {
    /// Wall-clock instant of the last update.
    last_update: Instant,
    /// Accumulated animation time.
    elapsed_ms: f64,
    /// Whether time is frozen.
    paused: bool,
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationClock {
    /// A running clock at zero.
    pub fn new() -> Self {
        Self {
            last_update: Instant::now(),
            elapsed_ms: 0.0,
            paused: false,
        }
    }

    /// Current animation time.
    pub fn now_ms(&self) -> u64 {
        self.elapsed_ms as u64
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Freeze or resume the clock.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Advance by the wall-clock time since the last update.
    pub fn update(&mut self, speed: AnimationSpeed) -> u64 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_update);
        self.last_update = now;
        self.advance(delta, speed)
    }

    /// Advance by `delta` of wall-clock time.
    pub fn advance(&mut self, delta: Duration, speed: AnimationSpeed) -> u64 {
        if !self.paused {
            self.elapsed_ms += delta.as_secs_f64() * 1000.0 * speed.playback_rate();
        }
        self.now_ms()
    }
}
