//! Experiment output and serialization

use serde::{Deserialize, Serialize};

use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::core::types::Tick;
use crate::world::objects::ObjectCounts;

/// One periodic measurement
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub iteration: Tick,
    pub average_cluster_size: f64,
    pub interaction_count: u64,
}

/// Measurements of a single replicate
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunOutput {
    pub run: usize,
    pub seed: u64,
    pub similarity_threshold: u32,
    pub cooldown_duration: u32,
    pub samples: Vec<Sample>,
    pub final_counts: ObjectCounts,
    pub simulation_time_ms: u64,
}

impl RunOutput {
    pub fn last_sample(&self) -> Option<&Sample> {
        self.samples.last()
    }
}

/// All replicates of one configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExperimentOutput {
    pub config: SimulationConfig,
    pub runs: Vec<RunOutput>,
    pub simulation_time_ms: u64,
}

impl ExperimentOutput {
    /// Mean of each run's last cluster-size sample
    pub fn mean_final_cluster_size(&self) -> f64 {
        let finals: Vec<f64> = self
            .runs
            .iter()
            .filter_map(|r| r.last_sample().map(|s| s.average_cluster_size))
            .collect();
        if finals.is_empty() {
            return 0.0;
        }
        finals.iter().sum::<f64>() / finals.len() as f64
    }

    /// Mean of each run's final interaction count
    pub fn mean_interaction_count(&self) -> f64 {
        let finals: Vec<u64> = self
            .runs
            .iter()
            .filter_map(|r| r.last_sample().map(|s| s.interaction_count))
            .collect();
        if finals.is_empty() {
            return 0.0;
        }
        finals.iter().sum::<u64>() as f64 / finals.len() as f64
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self)?)
    }

    pub fn summary(&self) -> String {
        format!(
            "Ran {} x {} steps on {}x{} in {}ms (threshold {}, cooldown {})\nmean cluster size {:.3}, mean interactions {:.1}",
            self.runs.len(),
            self.config.iterations,
            self.config.width,
            self.config.length,
            self.simulation_time_ms,
            self.config.similarity_threshold,
            self.config.cooldown_duration,
            self.mean_final_cluster_size(),
            self.mean_interaction_count(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_with(samples: Vec<Sample>) -> RunOutput {
        RunOutput {
            run: 0,
            seed: 42,
            similarity_threshold: 0,
            cooldown_duration: 20,
            samples,
            final_counts: ObjectCounts::default(),
            simulation_time_ms: 1,
        }
    }

    #[test]
    fn test_means_use_last_sample() {
        let output = ExperimentOutput {
            config: SimulationConfig::default(),
            runs: vec![
                run_with(vec![
                    Sample { iteration: 0, average_cluster_size: 1.0, interaction_count: 0 },
                    Sample { iteration: 10, average_cluster_size: 3.0, interaction_count: 10 },
                ]),
                run_with(vec![Sample { iteration: 0, average_cluster_size: 5.0, interaction_count: 20 }]),
                run_with(vec![]),
            ],
            simulation_time_ms: 2,
        };
        assert_eq!(output.mean_final_cluster_size(), 4.0);
        assert_eq!(output.mean_interaction_count(), 15.0);
    }

    #[test]
    fn test_json_contains_samples() {
        let output = ExperimentOutput {
            config: SimulationConfig::default(),
            runs: vec![run_with(vec![Sample {
                iteration: 0,
                average_cluster_size: 1.5,
                interaction_count: 3,
            }])],
            simulation_time_ms: 0,
        };
        let json: serde_json::Value = serde_json::from_str(&output.to_json().unwrap()).unwrap();
        assert_eq!(json["runs"][0]["samples"][0]["interaction_count"], 3);
        assert_eq!(json["config"]["width"], 100);
    }

    #[test]
    fn test_json_errors_surface_as_serde_error() {
        fn reload(json: &str) -> Result<ExperimentOutput> {
            Ok(serde_json::from_str(json)?)
        }

        let output = ExperimentOutput {
            config: SimulationConfig::default(),
            runs: vec![run_with(vec![])],
            simulation_time_ms: 0,
        };
        let json = output.to_json().unwrap();
        assert_eq!(reload(&json).unwrap().runs.len(), 1);

        let truncated = &json[..json.len() / 2];
        assert!(matches!(
            reload(truncated),
            Err(crate::core::error::ColonyError::SerdeError(_))
        ));
    }
}
