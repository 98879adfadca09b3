//! The live particle set and its refresh policies.

use comet_core::{FieldConfig, FieldConfigError, TickPolicy};
use rand::Rng;

use crate::particle::{Particle, ParticleFactory};

/// What a single tick changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// Comets added by this tick.
    pub spawned: usize,
    /// Comets removed by this tick.
    pub pruned: usize,
}

/// Comets and ambient stars owned by one animator.
#[derive(Debug)]
pub struct ParticleField {
    config: FieldConfig,
    comets: Vec<Particle>,
    stars: Vec<Particle>,
    factory: ParticleFactory,
}

impl ParticleField {
    /// Create an empty field, rejecting a config that fails validation.
    pub fn new(config: FieldConfig) -> Result<Self, FieldConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            comets: Vec::new(),
            stars: Vec::new(),
            factory: ParticleFactory::default(),
        })
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Live comets, oldest first.
    pub fn comets(&self) -> &[Particle] {
        &self.comets
    }

    /// Ambient stars.
    pub fn stars(&self) -> &[Particle] {
        &self.stars
    }

    /// Total number of live particles.
    pub fn len(&self) -> usize {
        self.comets.len() + self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comets.is_empty() && self.stars.is_empty()
    }

    /// Replace everything with a fresh batch of comets and stars.
    pub fn populate<R: Rng + ?Sized>(&mut self, now_ms: u64, rng: &mut R) {
        self.regenerate_comets(now_ms, rng);
        self.stars.clear();
        for _ in 0..self.config.star_count {
            let star = self.factory.star(&self.config, now_ms, rng);
            self.stars.push(star);
        }
    }

    /// Apply the configured policy once.
    pub fn tick<R: Rng + ?Sized>(&mut self, now_ms: u64, rng: &mut R) -> TickOutcome {
        match self.config.policy {
            TickPolicy::Regenerate => {
                let pruned = self.comets.len();
                self.regenerate_comets(now_ms, rng);
                TickOutcome {
                    spawned: self.comets.len(),
                    pruned,
                }
            }
            TickPolicy::SpawnAndPrune => {
                let comet = self.factory.edge_comet(&self.config, now_ms, rng);
                self.comets.push(comet);
                let pruned = self.prune(now_ms);
                TickOutcome { spawned: 1, pruned }
            }
        }
    }

    /// Drop comets older than the age ceiling. Returns how many were removed.
    pub fn prune(&mut self, now_ms: u64) -> usize {
        let ceiling = self.config.max_age_secs;
        let before = self.comets.len();
        self.comets.retain(|c| c.age_secs(now_ms) <= ceiling);
        before - self.comets.len()
    }

    fn regenerate_comets<R: Rng + ?Sized>(&mut self, now_ms: u64, rng: &mut R) {
        self.comets.clear();
        for _ in 0..self.config.comet_count {
            let comet = self.factory.comet(&self.config, now_ms, rng);
            self.comets.push(comet);
        }
    }
}
