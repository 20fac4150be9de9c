//! Ground objects and occupancy

pub mod objects;

pub use objects::{
    GroundObject, GroundObjects, ObjectCategory, ObjectCounts, ObjectDensity, ObjectId,
    ObjectRegistry,
};
