//! Simulation engine: ground orchestration, step pipeline, and replicate runs

pub mod cluster;
pub mod experiment;
pub mod ground;
pub mod interaction;
pub mod output;
pub mod tick;

pub use experiment::{replicate_seed, run_experiment, run_replicates};
pub use ground::{neighbor_density, relu_range, Ground};
pub use output::{ExperimentOutput, RunOutput, Sample};
pub use tick::{run_simulation_step, Simulation};
