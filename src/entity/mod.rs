//! Ant agents and their movement model

pub mod ant;
pub mod movement;

pub use ant::{Ant, AntSnapshot};
pub use movement::{rotated_weights, DirectionSampler};
