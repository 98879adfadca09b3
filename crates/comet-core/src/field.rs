//! Particle field tunables.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Interval, TickPolicy};

/// Upper bound for `comet_count` and `star_count`.
pub const MAX_PARTICLES: usize = 10_000;

/// Problems found while validating a [`FieldConfig`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldConfigError {
    #[error("invalid range for `{field}`: [{min}, {max}]")]
    InvalidRange {
        field: &'static str,
        min: f32,
        max: f32,
    },
    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,
    #[error("max_age_secs must be a positive finite number, got {0}")]
    InvalidMaxAge(f32),
    #[error("`{field}` is {count}, at most {max} particles are allowed")]
    TooManyParticles {
        field: &'static str,
        count: usize,
        max: usize,
    },
}

/// Configuration for a particle field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// How the comet set is refreshed on each tick.
    pub policy: TickPolicy,
    /// Number of comets in the initial batch (and per regeneration).
    pub comet_count: usize,
    /// Number of ambient stars, generated once.
    pub star_count: usize,
    /// Age ceiling for spawn-and-prune.
    pub max_age_secs: f32,
    /// Comet animation cycle length.
    pub comet_duration: Interval,
    /// Delay before a comet becomes visible.
    pub comet_delay: Interval,
    /// Star twinkle period.
    pub star_duration: Interval,
    /// Star twinkle phase offset.
    pub star_delay: Interval,
    /// Interval between ticks, re-sampled after every tick.
    pub tick_interval: Interval,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self::regenerate()
    }
}

impl FieldConfig {
    /// Eight short-lived comets, fully regenerated every ten seconds.
    pub fn regenerate() -> Self {
        Self {
            policy: TickPolicy::Regenerate,
            comet_count: 8,
            star_count: 50,
            max_age_secs: 30.0,
            comet_duration: Interval::new(3.0, 7.0),
            comet_delay: Interval::new(0.0, 5.0),
            star_duration: Interval::new(2.0, 5.0),
            star_delay: Interval::new(0.0, 5.0),
            tick_interval: Interval::fixed(10.0),
        }
    }

    /// Slow comets trickling in from the edges every few seconds.
    pub fn spawn_and_prune() -> Self {
        Self {
            policy: TickPolicy::SpawnAndPrune,
            comet_duration: Interval::new(15.0, 25.0),
            comet_delay: Interval::new(0.0, 10.0),
            tick_interval: Interval::new(3.0, 5.0),
            ..Self::regenerate()
        }
    }

    /// The preset matching `policy`.
    pub fn preset(policy: TickPolicy) -> Self {
        match policy {
            TickPolicy::Regenerate => Self::regenerate(),
            TickPolicy::SpawnAndPrune => Self::spawn_and_prune(),
        }
    }

    /// Check the particle counts, every range and the age ceiling.
    pub fn validate(&self) -> Result<(), FieldConfigError> {
        for (field, count) in [
            ("comet_count", self.comet_count),
            ("star_count", self.star_count),
        ] {
            if count > MAX_PARTICLES {
                return Err(FieldConfigError::TooManyParticles {
                    field,
                    count,
                    max: MAX_PARTICLES,
                });
            }
        }
        let ranges = [
            ("comet_duration", self.comet_duration),
            ("comet_delay", self.comet_delay),
            ("star_duration", self.star_duration),
            ("star_delay", self.star_delay),
            ("tick_interval", self.tick_interval),
        ];
        for (field, range) in ranges {
            if !range.is_valid() {
                return Err(FieldConfigError::InvalidRange {
                    field,
                    min: range.min,
                    max: range.max,
                });
            }
        }
        if self.tick_interval.min <= 0.0 {
            return Err(FieldConfigError::ZeroTickInterval);
        }
        if !self.max_age_secs.is_finite() || self.max_age_secs <= 0.0 {
            return Err(FieldConfigError::InvalidMaxAge(self.max_age_secs));
        }
        Ok(())
    }
}
