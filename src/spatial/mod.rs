//! Grid topology and spatial indexing

pub mod grid;
pub mod sparse_hash;
pub mod topology;

pub use grid::Grid;
pub use sparse_hash::SparseCellIndex;
pub use topology::{compute_neighbors, Topology};
