//! Particle records and their random sampling.

use comet_core::{FieldConfig, Interval};
use rand::Rng;

/// Normalized position bounds, in percent of the drawing area.
pub const POSITION_RANGE: Interval = Interval {
    min: 0.0,
    max: 100.0,
};

/// What a particle is drawn as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    /// A streak that travels across the area, one pass per cycle.
    Comet,
    /// A fixed point that twinkles in place.
    Star,
}

/// One decorative element in the field.
///
/// Particles carry logical parameters only; the renderer turns them into cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Unique within the owning field.
    pub id: u64,
    pub kind: ParticleKind,
    /// Spawn x, percent of the area width.
    pub origin_x: f32,
    /// Spawn y, percent of the area height.
    pub origin_y: f32,
    /// Seconds after `born_ms` before the particle shows up.
    pub delay_secs: f32,
    /// Length of one animation cycle in seconds.
    pub duration_secs: f32,
    /// Animation clock time of creation.
    pub born_ms: u64,
}

impl Particle {
    /// Seconds since creation.
    pub fn age_secs(&self, now_ms: u64) -> f32 {
        now_ms.saturating_sub(self.born_ms) as f32 / 1000.0
    }

    /// Progress through the current animation cycle, in `[0, 1)`.
    ///
    /// `None` while the particle is still waiting out its delay.
    pub fn phase_at(&self, now_ms: u64) -> Option<f32> {
        let active = self.age_secs(now_ms) - self.delay_secs;
        if active < 0.0 || self.duration_secs <= 0.0 {
            return None;
        }
        Some((active % self.duration_secs) / self.duration_secs)
    }

    /// Whether the particle starts on the top or right edge.
    pub fn on_entry_edge(&self) -> bool {
        self.origin_y == POSITION_RANGE.min || self.origin_x == POSITION_RANGE.max
    }
}

/// Hands out ids and samples particles from a [`FieldConfig`].
#[derive(Debug, Default)]
pub(crate) struct ParticleFactory {
    next_id: u64,
}

impl ParticleFactory {
    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// A comet anywhere in the area with sampled delay and duration.
    pub fn comet<R: Rng + ?Sized>(
        &mut self,
        config: &FieldConfig,
        now_ms: u64,
        rng: &mut R,
    ) -> Particle {
        Particle {
            id: self.next_id(),
            kind: ParticleKind::Comet,
            origin_x: POSITION_RANGE.sample(rng),
            origin_y: POSITION_RANGE.sample(rng),
            delay_secs: config.comet_delay.sample(rng),
            duration_secs: config.comet_duration.sample(rng),
            born_ms: now_ms,
        }
    }

    /// A comet entering from the top or right edge with no delay.
    ///
    /// Comets travel down and to the left, so those are the edges they enter from.
    pub fn edge_comet<R: Rng + ?Sized>(
        &mut self,
        config: &FieldConfig,
        now_ms: u64,
        rng: &mut R,
    ) -> Particle {
        let along = POSITION_RANGE.sample(rng);
        let (origin_x, origin_y) = if rng.gen_bool(0.5) {
            (along, POSITION_RANGE.min)
        } else {
            (POSITION_RANGE.max, along)
        };
        Particle {
            id: self.next_id(),
            kind: ParticleKind::Comet,
            origin_x,
            origin_y,
            delay_secs: 0.0,
            duration_secs: config.comet_duration.sample(rng),
            born_ms: now_ms,
        }
    }

    /// An ambient star.
    pub fn star<R: Rng + ?Sized>(
        &mut self,
        config: &FieldConfig,
        now_ms: u64,
        rng: &mut R,
    ) -> Particle {
        Particle {
            id: self.next_id(),
            kind: ParticleKind::Star,
            origin_x: POSITION_RANGE.sample(rng),
            origin_y: POSITION_RANGE.sample(rng),
            delay_secs: config.star_delay.sample(rng),
            duration_secs: config.star_duration.sample(rng),
            born_ms: now_ms,
        }
    }
}
