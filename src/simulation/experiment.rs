//! Replicate runs of a single configuration
//!
//! Replicates share nothing: each builds its own ground and generator, so
//! they run in parallel without locks and results are collected only once
//! every run has finished.

use std::time::Instant;

use rayon::prelude::*;

use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::simulation::output::{ExperimentOutput, RunOutput};
use crate::simulation::tick::Simulation;

/// Seed used by replicate `run_index`
pub fn replicate_seed(config: &SimulationConfig, run_index: usize) -> u64 {
    config.seed.wrapping_add(run_index as u64)
}

/// Run one replicate, sampling every `sample_interval` steps (step 0 included)
pub fn run_experiment(config: &SimulationConfig, run_index: usize) -> Result<RunOutput> {
    let start = Instant::now();
    let seed = replicate_seed(config, run_index);
    let mut sim = Simulation::from_config(config, seed)?;
    let mut samples = Vec::new();

    for iteration in 0..config.iterations {
        sim.step();

        if iteration % config.sample_interval == 0 {
            let sample = sim.sample(iteration);
            tracing::info!(
                "T: {}, C: {}, Run: {}, Iter: {}/{}, Cluster: {:.4}, Interact: {}",
                config.similarity_threshold,
                config.cooldown_duration,
                run_index + 1,
                iteration,
                config.iterations,
                sample.average_cluster_size,
                sample.interaction_count
            );
            samples.push(sample);
        }
    }

    Ok(RunOutput {
        run: run_index,
        seed,
        similarity_threshold: config.similarity_threshold,
        cooldown_duration: config.cooldown_duration,
        samples,
        final_counts: sim.ground.count_objects(),
        simulation_time_ms: start.elapsed().as_millis() as u64,
    })
}

/// Run `config.runs` independent replicates in parallel
pub fn run_replicates(config: &SimulationConfig) -> Result<ExperimentOutput> {
    config.validate()?;
    let start = Instant::now();

    tracing::info!(
        "Running {} replicates on {} threads",
        config.runs,
        rayon::current_num_threads()
    );

    // PARALLEL: one ground and one generator per replicate
    let runs = (0..config.runs)
        .into_par_iter()
        .map(|run_index| run_experiment(config, run_index))
        .collect::<Result<Vec<_>>>()?;

    let output = ExperimentOutput {
        config: config.clone(),
        runs,
        simulation_time_ms: start.elapsed().as_millis() as u64,
    };
    tracing::info!("Finished in {}ms", output.simulation_time_ms);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_config() -> SimulationConfig {
        SimulationConfig {
            width: 15,
            length: 15,
            ant_count: 20,
            iterations: 101,
            sample_interval: 50,
            runs: 3,
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn test_sampling_cadence() {
        let run = run_experiment(&tiny_config(), 0).unwrap();
        let iterations: Vec<u64> = run.samples.iter().map(|s| s.iteration).collect();
        assert_eq!(iterations, vec![0, 50, 100]);
    }

    #[test]
    fn test_interaction_count_is_monotonic() {
        let config = SimulationConfig {
            sample_interval: 10,
            ..tiny_config()
        };
        let run = run_experiment(&config, 0).unwrap();
        assert!(run
            .samples
            .windows(2)
            .all(|w| w[0].interaction_count <= w[1].interaction_count));
    }

    #[test]
    fn test_replicates_are_reproducible_and_ordered() {
        let config = tiny_config();
        let first = run_replicates(&config).unwrap();
        let second = run_replicates(&config).unwrap();

        assert_eq!(first.runs.len(), 3);
        for (i, (a, b)) in first.runs.iter().zip(&second.runs).enumerate() {
            assert_eq!(a.run, i);
            assert_eq!(a.seed, 42 + i as u64);
            assert_eq!(a.samples, b.samples);
        }
    }

    #[test]
    fn test_replicate_matches_standalone_run() {
        let config = tiny_config();
        let all = run_replicates(&config).unwrap();
        let second = run_experiment(&config, 1).unwrap();
        assert_eq!(all.runs[1].samples, second.samples);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimulationConfig {
            sample_interval: 0,
            ..tiny_config()
        };
        assert!(run_replicates(&config).is_err());
    }
}
