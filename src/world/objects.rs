//! Ground objects: categories, handles, and the sparse occupancy map

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{ColonyError, Result};
use crate::core::types::Cell;

/// Closed set of object kinds, with a numeric code per kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ObjectCategory {
    #[default]
    None = 0,
    Food = 1,
    Waste = 2,
    Egg = 3,
}

impl ObjectCategory {
    pub const OBJECTS: [ObjectCategory; 3] =
        [ObjectCategory::Food, ObjectCategory::Waste, ObjectCategory::Egg];

    pub fn code(self) -> u8 {
        self as u8
    }

    /// True for Food, Waste and Egg
    pub fn is_object(self) -> bool {
        self != ObjectCategory::None
    }
}

/// Identity of a ground object, independent of its category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

/// Handle to a ground object
///
/// Equality is identity: two handles are equal only if they share an `ObjectId`.
/// Several cells may hold the same handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroundObject {
    pub id: ObjectId,
    pub category: ObjectCategory,
}

/// Hands out fresh object identities
#[derive(Debug, Default)]
pub struct ObjectRegistry {
    next_id: u32,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// New object of `category`; `None` for the "no object" category
    pub fn create(&mut self, category: ObjectCategory) -> Option<GroundObject> {
        if !category.is_object() {
            return None;
        }
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        Some(GroundObject { id, category })
    }

    pub fn created(&self) -> u32 {
        self.next_id
    }
}

/// Relative weight of each category when seeding the ground
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectDensity {
    pub none: f64,
    pub food: f64,
    pub waste: f64,
    pub egg: f64,
}

impl Default for ObjectDensity {
    fn default() -> Self {
        Self {
            none: 0.85,
            food: 0.05,
            waste: 0.05,
            egg: 0.05,
        }
    }
}

impl ObjectDensity {
    /// Weights paired with their categories, "none" first
    pub fn weights(&self) -> [(ObjectCategory, f64); 4] {
        [
            (ObjectCategory::None, self.none),
            (ObjectCategory::Food, self.food),
            (ObjectCategory::Waste, self.waste),
            (ObjectCategory::Egg, self.egg),
        ]
    }

    pub fn validate(&self) -> Result<()> {
        let weights = self.weights();
        if weights.iter().any(|(_, w)| !w.is_finite() || *w < 0.0) {
            return Err(ColonyError::InvalidDensity(
                "weights must be finite and non-negative".into(),
            ));
        }
        if weights.iter().map(|(_, w)| w).sum::<f64>() <= 0.0 {
            return Err(ColonyError::InvalidDensity("weights must sum to a positive value".into()));
        }
        Ok(())
    }
}

/// Per-category totals of objects lying on the ground
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectCounts {
    pub food: usize,
    pub waste: usize,
    pub egg: usize,
}

impl ObjectCounts {
    pub fn total(&self) -> usize {
        self.food + self.waste + self.egg
    }
}

/// Sparse occupancy: cells without an entry are empty
#[derive(Debug, Default)]
pub struct GroundObjects {
    cells: AHashMap<Cell, GroundObject>,
}

impl GroundObjects {
    pub fn new() -> Self {
        Self {
            cells: AHashMap::new(),
        }
    }

    /// Put an object on a cell, returning whatever was there
    pub fn place(&mut self, cell: Cell, object: GroundObject) -> Option<GroundObject> {
        self.cells.insert(cell, object)
    }

    /// Remove and return the object on a cell
    pub fn take(&mut self, cell: Cell) -> Option<GroundObject> {
        self.cells.remove(&cell)
    }

    #[inline]
    pub fn get(&self, cell: Cell) -> Option<GroundObject> {
        self.cells.get(&cell).copied()
    }

    /// Category on a cell, `None` category when empty
    #[inline]
    pub fn category_at(&self, cell: Cell) -> ObjectCategory {
        self.get(cell).map(|o| o.category).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Cell, GroundObject)> + '_ {
        self.cells.iter().map(|(c, o)| (*c, *o))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn counts(&self) -> ObjectCounts {
        let mut counts = ObjectCounts::default();
        for object in self.cells.values() {
            match object.category {
                ObjectCategory::Food => counts.food += 1,
                ObjectCategory::Waste => counts.waste += 1,
                ObjectCategory::Egg => counts.egg += 1,
                ObjectCategory::None => {}
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_codes() {
        assert_eq!(ObjectCategory::None.code(), 0);
        assert_eq!(ObjectCategory::Food.code(), 1);
        assert_eq!(ObjectCategory::Waste.code(), 2);
        assert_eq!(ObjectCategory::Egg.code(), 3);
    }

    #[test]
    fn test_registry_refuses_none() {
        let mut registry = ObjectRegistry::new();
        assert!(registry.create(ObjectCategory::None).is_none());
        assert_eq!(registry.created(), 0);
    }

    #[test]
    fn test_same_category_objects_are_distinct() {
        let mut registry = ObjectRegistry::new();
        let a = registry.create(ObjectCategory::Food).unwrap();
        let b = registry.create(ObjectCategory::Food).unwrap();
        assert_eq!(a.category, b.category);
        assert_ne!(a, b);
    }

    #[test]
    fn test_place_take() {
        let mut registry = ObjectRegistry::new();
        let egg = registry.create(ObjectCategory::Egg).unwrap();
        let mut ground = GroundObjects::new();

        assert_eq!(ground.place(Cell::new(1, 1), egg), None);
        assert_eq!(ground.get(Cell::new(1, 1)), Some(egg));
        assert_eq!(ground.category_at(Cell::new(1, 1)), ObjectCategory::Egg);
        assert_eq!(ground.category_at(Cell::new(0, 0)), ObjectCategory::None);

        assert_eq!(ground.take(Cell::new(1, 1)), Some(egg));
        assert!(ground.is_empty());
    }

    #[test]
    fn test_counts() {
        let mut registry = ObjectRegistry::new();
        let food = registry.create(ObjectCategory::Food).unwrap();
        let waste = registry.create(ObjectCategory::Waste).unwrap();
        let mut ground = GroundObjects::new();
        ground.place(Cell::new(0, 0), food);
        ground.place(Cell::new(0, 1), food);
        ground.place(Cell::new(0, 2), waste);

        let counts = ground.counts();
        assert_eq!(counts, ObjectCounts { food: 2, waste: 1, egg: 0 });
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_density_validation() {
        assert!(ObjectDensity::default().validate().is_ok());
        let negative = ObjectDensity {
            food: -0.1,
            ..ObjectDensity::default()
        };
        assert!(negative.validate().is_err());
        let zero = ObjectDensity {
            none: 0.0,
            food: 0.0,
            waste: 0.0,
            egg: 0.0,
        };
        assert!(zero.validate().is_err());
    }
}
