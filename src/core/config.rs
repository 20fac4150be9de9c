//! Simulation configuration with documented constants
//!
//! Every tunable of a single experiment lives here. Defaults mirror the
//! reference experiment (100x100 grid, 500 ants, 30001 steps).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{ColonyError, Result};
use crate::core::types::NUM_DIRECTIONS;
use crate::world::objects::ObjectDensity;

/// Configuration for one experiment configuration
///
/// Loaded from TOML with every field optional; missing fields take the
/// defaults below.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === GRID ===
    /// Grid width in cells (x axis)
    pub width: i32,

    /// Grid length in cells (y axis)
    pub length: i32,

    // === POPULATION ===
    /// Number of ants placed during setup
    pub ant_count: usize,

    /// Capacity of each ant's FIFO memory
    pub memory_size: usize,

    /// Record every visited cell per ant
    ///
    /// Costs one hash-set insert per ant per step. Off for experiments.
    pub record_paths: bool,

    // === MOVEMENT ===
    /// Base probability of each of the 8 headings relative to "straight on"
    ///
    /// Index 0 is "continue in the previous direction", index 4 is "turn
    /// back". The table is used as-is; it is not normalized by the engine.
    pub direction_weights: Vec<f64>,

    // === PICK / DROP ===
    /// `[low, high]` ramp mapping neighbor density to probability
    ///
    /// Density below `low` maps to 0, above `high` to 1.
    pub pick_drop_range: [f64; 2],

    /// Relative weight of each category when seeding the ground
    pub object_density: ObjectDensity,

    // === INTERACTION ===
    /// Matching memory entries another ant needs before an encounter counts
    pub similarity_threshold: u32,

    /// Steps an ant waits after an interaction before it may interact again
    pub cooldown_duration: u32,

    // === RUN ===
    /// Steps per run
    pub iterations: u64,

    /// Measure cluster size every this many steps
    pub sample_interval: u64,

    /// Base seed; replicate `i` runs with `seed + i`
    pub seed: u64,

    /// Independent replicates of this configuration
    pub runs: usize,
}

/// Reference heading weights before normalization
const REFERENCE_DIRECTION_WEIGHTS: [f64; NUM_DIRECTIONS] = [12.0, 5.0, 2.0, 1.0, 0.1, 1.0, 2.0, 5.0];

impl Default for SimulationConfig {
    fn default() -> Self {
        let total: f64 = REFERENCE_DIRECTION_WEIGHTS.iter().sum();

        Self {
            width: 100,
            length: 100,

            ant_count: 500,
            memory_size: 20,
            record_paths: false,

            direction_weights: REFERENCE_DIRECTION_WEIGHTS.iter().map(|w| w / total).collect(),

            pick_drop_range: [0.3, 0.7],
            object_density: ObjectDensity::default(),

            similarity_threshold: 0,
            cooldown_duration: 20,

            iterations: 30_001,
            sample_interval: 10_000,
            seed: 42,
            runs: 5,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document; absent keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        validate_dimensions(self.width, self.length)?;
        validate_direction_weights(&self.direction_weights)?;
        validate_pick_drop_range(self.pick_drop_range)?;
        self.object_density.validate()?;

        if self.memory_size == 0 {
            return Err(ColonyError::InvalidConfig("memory_size must be > 0".into()));
        }
        if self.sample_interval == 0 {
            return Err(ColonyError::InvalidConfig("sample_interval must be > 0".into()));
        }

        Ok(())
    }
}

pub(crate) fn validate_dimensions(width: i32, length: i32) -> Result<()> {
    if width <= 0 || length <= 0 {
        return Err(ColonyError::InvalidDimensions { width, length });
    }
    Ok(())
}

pub(crate) fn validate_direction_weights(weights: &[f64]) -> Result<()> {
    if weights.len() != NUM_DIRECTIONS {
        return Err(ColonyError::InvalidDirectionWeights(format!(
            "expected {} weights, got {}",
            NUM_DIRECTIONS,
            weights.len()
        )));
    }
    if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err(ColonyError::InvalidDirectionWeights(
            "weights must be finite and non-negative".into(),
        ));
    }
    if weights.iter().sum::<f64>() <= 0.0 {
        return Err(ColonyError::InvalidDirectionWeights("weights must sum to a positive value".into()));
    }
    Ok(())
}

pub(crate) fn validate_pick_drop_range([low, high]: [f64; 2]) -> Result<()> {
    if !low.is_finite() || !high.is_finite() || low > high {
        return Err(ColonyError::InvalidPickDropRange { low, high });
    }
    Ok(())
}
