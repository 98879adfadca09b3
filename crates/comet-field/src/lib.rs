//! Particle field animation for comet backgrounds.
//!
//! A [`ParticleAnimator`] owns a bounded set of comets and ambient stars and
//! refreshes it on a jittered schedule driven by the caller's clock. The set
//! is exposed as slices of immutable [`Particle`] records, which
//! [`FieldView`] paints into a terminal buffer.

mod animator;
mod chars;
mod color;
mod field;
mod particle;
mod render;
mod schedule;

pub use animator::ParticleAnimator;
pub use field::{ParticleField, TickOutcome};
pub use particle::{POSITION_RANGE, Particle, ParticleKind};
pub use render::FieldView;
pub use schedule::{ScheduleState, TickSchedule};
