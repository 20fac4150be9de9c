//! Ant agent: position, heading, short memory, and a carried object

use std::collections::VecDeque;

use ahash::AHashSet;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::{Cell, Direction};
use crate::entity::movement::DirectionSampler;
use crate::spatial::topology::Topology;
use crate::world::objects::{GroundObject, ObjectCategory};

/// Read-only view of an ant for loggers and renderers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AntSnapshot {
    pub position: Cell,
    pub memory: Vec<u8>,
    pub carried: ObjectCategory,
    pub heading: Direction,
    pub interaction_cooldown: u32,
}

#[derive(Debug, Clone)]
pub struct Ant {
    position: Cell,
    prev_direction: Direction,
    /// Oldest category at the front
    memory: VecDeque<ObjectCategory>,
    memory_capacity: usize,
    load: Option<GroundObject>,
    interaction_cooldown: u32,
    record_path: bool,
    visited: AHashSet<Cell>,
}

impl Ant {
    /// Ant heading North with an empty memory
    pub fn new(position: Cell, memory_capacity: usize) -> Self {
        Self {
            position,
            prev_direction: Direction::North,
            memory: VecDeque::with_capacity(memory_capacity),
            memory_capacity,
            load: None,
            interaction_cooldown: 0,
            record_path: false,
            visited: AHashSet::new(),
        }
    }

    /// Ant with a uniformly random initial heading
    pub fn spawn<R: Rng + ?Sized>(position: Cell, memory_capacity: usize, rng: &mut R) -> Self {
        let mut ant = Self::new(position, memory_capacity);
        ant.prev_direction = Direction::from_index(rng.gen_range(0..Direction::ALL.len()));
        ant
    }

    /// Advance one cell.
    ///
    /// Interior cells use the inertia-weighted heading. Boundary cells pick a
    /// legal neighbor uniformly and infer the heading from the displacement.
    pub fn take_step<R: Rng + ?Sized>(
        &mut self,
        topology: &Topology,
        sampler: &DirectionSampler,
        rng: &mut R,
    ) {
        if !topology.contains(self.position) {
            return;
        }

        if topology.is_interior(self.position) {
            let heading = sampler.sample(self.prev_direction, rng);
            self.position = self.position.step(heading);
            self.prev_direction = heading;
        } else if let Some(&next) = topology.neighbors(self.position).choose(rng) {
            let (dx, dy) = (next.x - self.position.x, next.y - self.position.y);
            self.position = next;
            // Displacements outside the offset table keep the old heading
            if let Some(heading) = Direction::from_offset(dx, dy) {
                self.prev_direction = heading;
            }
        }

        if self.record_path {
            self.visited.insert(self.position);
        }
    }

    /// Remember a sensed category; "no object" is ignored
    pub fn update_memory(&mut self, seen: ObjectCategory) {
        if !seen.is_object() || self.memory_capacity == 0 {
            return;
        }
        while self.memory.len() >= self.memory_capacity {
            self.memory.pop_front();
        }
        self.memory.push_back(seen);
    }

    /// Occurrences of `category` in memory
    pub fn similarity(&self, category: ObjectCategory) -> usize {
        self.memory.iter().filter(|&&c| c == category).count()
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    pub fn prev_direction(&self) -> Direction {
        self.prev_direction
    }

    pub fn set_prev_direction(&mut self, direction: Direction) {
        self.prev_direction = direction;
    }

    pub fn load(&self) -> Option<GroundObject> {
        self.load
    }

    pub fn set_load(&mut self, load: Option<GroundObject>) {
        self.load = load;
    }

    /// Category carried, `None` category when empty-handed
    pub fn carried_category(&self) -> ObjectCategory {
        self.load.map(|o| o.category).unwrap_or_default()
    }

    pub fn interaction_cooldown(&self) -> u32 {
        self.interaction_cooldown
    }

    pub fn set_interaction_cooldown(&mut self, cooldown: u32) {
        self.interaction_cooldown = cooldown;
    }

    /// Count the cooldown down by one step, stopping at zero
    pub fn tick_cooldown(&mut self) {
        self.interaction_cooldown = self.interaction_cooldown.saturating_sub(1);
    }

    pub fn memory(&self) -> &VecDeque<ObjectCategory> {
        &self.memory
    }

    pub fn memory_codes(&self) -> Vec<u8> {
        self.memory.iter().map(|c| c.code()).collect()
    }

    /// Memory as "code," repeated, e.g. `"1,3,"`
    pub fn memory_string(&self) -> String {
        self.memory.iter().map(|c| format!("{},", c.code())).collect()
    }

    pub fn set_record_path(&mut self, record: bool) {
        self.record_path = record;
    }

    pub fn visited_positions(&self) -> &AHashSet<Cell> {
        &self.visited
    }

    pub fn snapshot(&self) -> AntSnapshot {
        AntSnapshot {
            position: self.position,
            memory: self.memory_codes(),
            carried: self.carried_category(),
            heading: self.prev_direction,
            interaction_cooldown: self.interaction_cooldown,
        }
    }
}
