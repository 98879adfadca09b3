//! Closed numeric intervals used for randomized particle parameters.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A closed interval `[min, max]`.
///
/// Used for seconds (delays, durations, tick intervals) and for normalized
/// percent positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    /// Lower bound (inclusive).
    pub min: f32,
    /// Upper bound (inclusive).
    pub max: f32,
}

impl Interval {
    /// Create a range, ordering the endpoints.
    pub fn new(a: f32, b: f32) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// A degenerate range holding a single value.
    pub const fn fixed(value: f32) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Whether both ends are finite, non-negative and ordered.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min >= 0.0 && self.min <= self.max
    }

    /// Whether `value` lies in the closed interval.
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Sample a value uniformly from the closed interval.
    ///
    /// Never panics: an interval whose width is not finite yields its lower
    /// bound, or zero when that is not finite either.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        let lo = self.min.min(self.max);
        let hi = self.min.max(self.max);
        let width = hi - lo;
        if !width.is_finite() {
            return if lo.is_finite() { lo } else { 0.0 };
        }
        if width <= f32::EPSILON {
            return lo;
        }
        rng.gen_range(lo..=hi)
    }

    /// Sample a duration in milliseconds.
    pub fn sample_ms<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        (self.sample(rng) * 1000.0).round().max(0.0) as u64
    }
}
