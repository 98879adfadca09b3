//! Particle field animator: a field plus the schedule that refreshes it.

use comet_core::{FieldConfig, FieldConfigError};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, trace};

use crate::field::{ParticleField, TickOutcome};
use crate::particle::Particle;
use crate::schedule::TickSchedule;

/// Owns a [`ParticleField`] and keeps it refreshing on a schedule.
///
/// The schedule lives exactly as long as the animator. Dropping it cancels
/// the schedule, so there is no timer to leak.
#[derive(Debug)]
pub struct ParticleAnimator<R: Rng = StdRng> {
    field: ParticleField,
    schedule: TickSchedule,
    rng: R,
}

impl ParticleAnimator<StdRng> {
    /// An animator with a deterministic random source.
    pub fn seeded(config: FieldConfig, seed: u64) -> Result<Self, FieldConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    /// An animator seeded from the operating system.
    pub fn from_entropy(config: FieldConfig) -> Result<Self, FieldConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: Rng> ParticleAnimator<R> {
    /// A stopped animator with an empty field.
    ///
    /// Fails if `config` does not pass [`FieldConfig::validate`].
    pub fn with_rng(config: FieldConfig, rng: R) -> Result<Self, FieldConfigError> {
        Ok(Self {
            field: ParticleField::new(config)?,
            schedule: TickSchedule::new(),
            rng,
        })
    }

    /// Populate the initial batch and start the schedule.
    ///
    /// Calling this while active starts over with a fresh batch.
    pub fn initialize(&mut self, now_ms: u64) {
        self.field.populate(now_ms, &mut self.rng);
        let interval = self.field.config().tick_interval;
        self.schedule.start(now_ms, &interval, &mut self.rng);
        debug!(
            comets = self.field.comets().len(),
            stars = self.field.stars().len(),
            policy = self.field.config().policy.name(),
            next_tick_ms = ?self.schedule.next_due_ms(),
            "particle field initialized"
        );
    }

    /// Run a tick if one is due at `now_ms`.
    pub fn advance(&mut self, now_ms: u64) -> Option<TickOutcome> {
        let interval = self.field.config().tick_interval;
        if !self.schedule.poll(now_ms, &interval, &mut self.rng) {
            return None;
        }
        Some(self.run_tick(now_ms))
    }

    /// Run a tick immediately, keeping the schedule as it is.
    ///
    /// Does nothing once the animator is stopped.
    pub fn tick(&mut self, now_ms: u64) -> Option<TickOutcome> {
        if !self.schedule.is_active() {
            return None;
        }
        Some(self.run_tick(now_ms))
    }

    /// Cancel the schedule. Safe to call any number of times.
    ///
    /// Returns whether the schedule was running.
    pub fn shutdown(&mut self) -> bool {
        let was_active = self.schedule.cancel();
        if was_active {
            debug!(live = self.field.len(), "particle field stopped");
        }
        was_active
    }

    pub fn is_active(&self) -> bool {
        self.schedule.is_active()
    }

    /// When the next scheduled tick is due.
    pub fn next_tick_ms(&self) -> Option<u64> {
        self.schedule.next_due_ms()
    }

    pub fn config(&self) -> &FieldConfig {
        self.field.config()
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    /// Live comets, for rendering.
    pub fn comets(&self) -> &[Particle] {
        self.field.comets()
    }

    /// Ambient stars, for rendering.
    pub fn stars(&self) -> &[Particle] {
        self.field.stars()
    }

    fn run_tick(&mut self, now_ms: u64) -> TickOutcome {
        let outcome = self.field.tick(now_ms, &mut self.rng);
        trace!(
            now_ms,
            spawned = outcome.spawned,
            pruned = outcome.pruned,
            comets = self.field.comets().len(),
            "particle field tick"
        );
        outcome
    }
}

impl<R: Rng> Drop for ParticleAnimator<R> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use comet_core::{Interval, TickPolicy};

    #[test]
    fn test_new_animator_is_stopped() {
        let mut animator = ParticleAnimator::seeded(FieldConfig::default(), 1).unwrap();
        assert!(!animator.is_active());
        assert!(animator.comets().is_empty());
        assert_eq!(animator.advance(1_000_000), None);
        assert_eq!(animator.tick(0), None);
    }

    #[test]
    fn test_initialize_activates_and_populates() {
        let mut animator = ParticleAnimator::seeded(FieldConfig::default(), 1).unwrap();
        animator.initialize(0);
        assert!(animator.is_active());
        assert_eq!(animator.comets().len(), 8);
        assert_eq!(animator.stars().len(), 50);
        assert_eq!(animator.next_tick_ms(), Some(10_000));
    }

    #[test]
    fn test_advance_ticks_on_schedule() {
        let mut animator = ParticleAnimator::seeded(FieldConfig::regenerate(), 2).unwrap();
        animator.initialize(0);
        let first_ids: Vec<u64> = animator.comets().iter().map(|c| c.id).collect();

        assert_eq!(animator.advance(5_000), None);
        assert_eq!(
            animator.comets().iter().map(|c| c.id).collect::<Vec<_>>(),
            first_ids
        );

        let outcome = animator.advance(10_000).expect("tick due");
        assert_eq!(outcome.spawned, 8);
        assert_eq!(animator.comets().len(), 8);
        assert_eq!(animator.next_tick_ms(), Some(20_000));
    }

    #[test]
    fn test_spawn_and_prune_through_animator() {
        let config = FieldConfig::spawn_and_prune();
        assert_eq!(config.policy, TickPolicy::SpawnAndPrune);
        let ceiling = config.max_age_secs;
        let mut animator = ParticleAnimator::seeded(config, 3).unwrap();
        animator.initialize(0);

        let mut ticks = 0;
        for now in (0..=120_000).step_by(100) {
            if let Some(outcome) = animator.advance(now) {
                ticks += 1;
                assert_eq!(outcome.spawned, 1);
                assert!(animator.comets().iter().all(|c| c.age_secs(now) <= ceiling));
            }
        }
        // One tick every 3-5 seconds over two minutes.
        assert!((20..=40).contains(&ticks), "{ticks} ticks");
    }

    #[test]
    fn test_shutdown_freezes_live_set() {
        let mut animator = ParticleAnimator::seeded(FieldConfig::spawn_and_prune(), 4).unwrap();
        animator.initialize(0);
        animator.advance(5_000);
        assert!(animator.shutdown());

        let comets = animator.comets().to_vec();
        let stars = animator.stars().to_vec();
        for now in (5_000..=600_000).step_by(250) {
            assert_eq!(animator.advance(now), None);
        }
        assert_eq!(animator.tick(700_000), None);
        assert_eq!(animator.comets(), comets.as_slice());
        assert_eq!(animator.stars(), stars.as_slice());
    }

    #[test]
    fn test_shutdown_twice_is_harmless() {
        let mut animator = ParticleAnimator::seeded(FieldConfig::default(), 5).unwrap();
        animator.initialize(0);
        assert!(animator.shutdown());
        assert!(!animator.shutdown());
        assert!(!animator.is_active());
    }

    #[test]
    fn test_reinitialize_after_shutdown() {
        let mut animator = ParticleAnimator::seeded(FieldConfig::default(), 6).unwrap();
        animator.initialize(0);
        animator.shutdown();
        animator.initialize(50_000);
        assert!(animator.is_active());
        assert!(animator.comets().iter().all(|c| c.born_ms == 50_000));
        assert_eq!(animator.next_tick_ms(), Some(60_000));
    }

    #[test]
    fn test_forced_tick_keeps_schedule() {
        let mut animator = ParticleAnimator::seeded(FieldConfig::default(), 7).unwrap();
        animator.initialize(0);
        assert!(animator.tick(3_000).is_some());
        assert_eq!(animator.next_tick_ms(), Some(10_000));
        assert!(animator.comets().iter().all(|c| c.born_ms == 3_000));
    }

    #[test]
    fn test_invalid_config_is_rejected_at_construction() {
        let mut config = FieldConfig::default();
        config.comet_duration = Interval::fixed(f32::INFINITY);
        assert!(matches!(
            ParticleAnimator::seeded(config, 1),
            Err(FieldConfigError::InvalidRange {
                field: "comet_duration",
                ..
            })
        ));

        let mut config = FieldConfig::default();
        config.comet_count = usize::MAX;
        assert!(matches!(
            ParticleAnimator::seeded(config, 1),
            Err(FieldConfigError::TooManyParticles { .. })
        ));
    }
}
