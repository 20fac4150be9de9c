//! Ant Cluster - emergent sorting of objects by a colony of simple ants

pub mod core;
pub mod entity;
pub mod simulation;
pub mod spatial;
pub mod world;
