//! Simulation step pipeline
//!
//! Each step runs, strictly in order:
//! 1. Movement: every ant takes one step
//! 2. Work: every ant senses its cell, then picks up or drops
//! 3. Interactions: loaded ants react to neighbors, then cooldowns decay
//!
//! Cluster measurement is left to the caller's sampling cadence.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::core::types::Tick;
use crate::simulation::ground::Ground;
use crate::simulation::output::Sample;

/// Run one step on `ground`, returning the interactions it produced
pub fn run_simulation_step<R: Rng + ?Sized>(ground: &mut Ground, rng: &mut R) -> usize {
    ground.move_ants(rng);
    ground.assign_work(rng);
    ground.handle_interactions()
}

/// A ground paired with the generator that drives it
pub struct Simulation {
    pub ground: Ground,
    pub rng: ChaCha8Rng,
    pub current_tick: Tick,
}

impl Simulation {
    pub fn new(ground: Ground, seed: u64) -> Self {
        Self {
            ground,
            rng: ChaCha8Rng::seed_from_u64(seed),
            current_tick: 0,
        }
    }

    /// Build and populate a ground from `config`: objects first, then ants
    pub fn from_config(config: &SimulationConfig, seed: u64) -> Result<Self> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut ground = Ground::from_config(config)?;

        ground.add_objects(&config.object_density, &mut rng)?;
        for _ in 0..config.ant_count {
            ground.add_ant(config.memory_size, &mut rng)?;
        }

        tracing::debug!(
            "Set up {}x{} ground with {} ants and {} objects (seed {})",
            config.width,
            config.length,
            config.ant_count,
            ground.objects().len(),
            seed
        );

        Ok(Self {
            ground,
            rng,
            current_tick: 0,
        })
    }

    /// Advance one step
    pub fn step(&mut self) -> usize {
        let fired = run_simulation_step(&mut self.ground, &mut self.rng);
        self.current_tick += 1;
        fired
    }

    /// Advance `steps` steps, returning the interactions fired meanwhile
    pub fn run(&mut self, steps: u64) -> usize {
        (0..steps).map(|_| self.step()).sum()
    }

    /// Measure the ground, tagging the measurement with `iteration`
    pub fn sample(&self, iteration: Tick) -> Sample {
        Sample {
            iteration,
            average_cluster_size: self.ground.average_cluster_size(),
            interaction_count: self.ground.interaction_count(),
        }
    }
}
