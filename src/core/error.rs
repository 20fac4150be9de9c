use thiserror::Error;

#[derive(Error, Debug)]
pub enum ColonyError {
    #[error("Invalid grid dimensions: {width}x{length} (both must be > 0)")]
    InvalidDimensions { width: i32, length: i32 },

    #[error("Invalid direction weights: {0}")]
    InvalidDirectionWeights(String),

    #[error("Invalid pick/drop range: [{low}, {high}]")]
    InvalidPickDropRange { low: f64, high: f64 },

    #[error("Invalid object density: {0}")]
    InvalidDensity(String),

    #[error("Cell out of bounds: {0:?}")]
    OutOfBounds(crate::core::types::Cell),

    #[error("Topology is empty, no cell to choose from")]
    EmptyTopology,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ColonyError>;
