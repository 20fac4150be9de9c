//! Ground: the grid, the objects lying on it, and the ants walking it
//!
//! One Ground per experiment run. Randomness is always passed in by the
//! caller so parallel runs never share a generator.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::core::config::{validate_pick_drop_range, SimulationConfig};
use crate::core::error::{ColonyError, Result};
use crate::core::types::Cell;
use crate::entity::ant::{Ant, AntSnapshot};
use crate::entity::movement::DirectionSampler;
use crate::spatial::sparse_hash::SparseCellIndex;
use crate::spatial::topology::Topology;
use crate::world::objects::{
    GroundObject, GroundObjects, ObjectCategory, ObjectCounts, ObjectDensity, ObjectRegistry,
};

/// Clamped linear ramp: 0 below `low`, 1 above `high`, linear in between
pub fn relu_range(x: f64, low: f64, high: f64) -> f64 {
    if x < low {
        0.0
    } else if x > high {
        1.0
    } else if high > low {
        (x - low) / (high - low)
    } else {
        // Degenerate ramp is a step at `low`
        1.0
    }
}

/// Fraction of `cell`'s legal neighbors holding an object of `category`
pub fn neighbor_density(
    topology: &Topology,
    objects: &GroundObjects,
    cell: Cell,
    category: ObjectCategory,
) -> f64 {
    let neighbors = topology.neighbors(cell);
    if neighbors.is_empty() {
        return 0.0;
    }
    let same = neighbors
        .iter()
        .filter(|&&n| objects.category_at(n) == category)
        .count();
    same as f64 / neighbors.len() as f64
}

pub struct Ground {
    pub(crate) topology: Topology,
    sampler: DirectionSampler,
    pick_drop_range: [f64; 2],
    pub(crate) similarity_threshold: u32,
    pub(crate) cooldown_duration: u32,
    pub(crate) objects: GroundObjects,
    registry: ObjectRegistry,
    pub(crate) agents: Vec<Ant>,
    pub(crate) ant_index: SparseCellIndex,
    pub(crate) interaction_counter: u64,
    record_paths: bool,
}

impl Ground {
    /// Build an empty ground; fails on non-positive dimensions or bad tables
    pub fn new(
        width: i32,
        length: i32,
        direction_weights: &[f64],
        pick_drop_range: [f64; 2],
        similarity_threshold: u32,
        cooldown_duration: u32,
    ) -> Result<Self> {
        let topology = Topology::new(width, length)?;
        let sampler = DirectionSampler::new(direction_weights)?;
        validate_pick_drop_range(pick_drop_range)?;

        Ok(Self {
            topology,
            sampler,
            pick_drop_range,
            similarity_threshold,
            cooldown_duration,
            objects: GroundObjects::new(),
            registry: ObjectRegistry::new(),
            agents: Vec::new(),
            ant_index: SparseCellIndex::new(),
            interaction_counter: 0,
            record_paths: false,
        })
    }

    /// Empty ground with the grid, tables and thresholds of `config`
    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        config.validate()?;
        let mut ground = Self::new(
            config.width,
            config.length,
            &config.direction_weights,
            config.pick_drop_range,
            config.similarity_threshold,
            config.cooldown_duration,
        )?;
        ground.record_paths = config.record_paths;
        Ok(ground)
    }

    // === SETUP ===

    pub fn set_record_paths(&mut self, record: bool) {
        self.record_paths = record;
    }

    /// Place a new ant on a random cell with a random heading
    pub fn add_ant<R: Rng + ?Sized>(&mut self, memory_size: usize, rng: &mut R) -> Result<()> {
        let position = self.topology.random_cell(rng)?;
        let mut ant = Ant::spawn(position, memory_size, rng);
        ant.set_record_path(self.record_paths);
        self.agents.push(ant);
        Ok(())
    }

    /// Add a pre-built ant, returning its index
    pub fn insert_ant(&mut self, ant: Ant) -> Result<usize> {
        if !self.topology.contains(ant.position()) {
            return Err(ColonyError::OutOfBounds(ant.position()));
        }
        self.agents.push(ant);
        Ok(self.agents.len() - 1)
    }

    /// Fresh object identity of `category`
    pub fn create_object(&mut self, category: ObjectCategory) -> Option<GroundObject> {
        self.registry.create(category)
    }

    /// Put an object on a cell, returning the previous occupant
    pub fn place_object(&mut self, cell: Cell, object: GroundObject) -> Result<Option<GroundObject>> {
        if !self.topology.contains(cell) {
            return Err(ColonyError::OutOfBounds(cell));
        }
        Ok(self.objects.place(cell, object))
    }

    /// Fill every cell by sampling the density table.
    ///
    /// One object per category is shared by every cell it is drawn for, so
    /// adjacent like objects form a single cluster. Returns the number of
    /// cells filled.
    pub fn add_objects<R: Rng + ?Sized>(&mut self, density: &ObjectDensity, rng: &mut R) -> Result<usize> {
        density.validate()?;
        let weights = density.weights();
        let dist = WeightedIndex::new(weights.iter().map(|(_, w)| *w))
            .map_err(|e| ColonyError::InvalidDensity(e.to_string()))?;
        let prototypes: Vec<Option<GroundObject>> = weights
            .iter()
            .map(|(category, _)| self.registry.create(*category))
            .collect();

        let mut placed = 0;
        let cells: Vec<Cell> = self.topology.cells().collect();
        for cell in cells {
            if let Some(object) = prototypes[dist.sample(rng)] {
                self.objects.place(cell, object);
                placed += 1;
            }
        }

        tracing::debug!("Placed {} objects on {} cells", placed, self.topology.cell_count());
        Ok(placed)
    }

    // === STEP STAGES ===

    /// Move every ant one cell
    pub fn move_ants<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let Ground {
            topology,
            sampler,
            agents,
            ..
        } = self;
        for ant in agents.iter_mut() {
            ant.take_step(topology, sampler, rng);
        }
    }

    /// Pick up and drop objects.
    ///
    /// Pick-up fires when the draw EXCEEDS the density ramp, so isolated
    /// objects are collected more readily than clustered ones. Drop fires
    /// when the draw is at most the ramp, so carried objects settle where
    /// like objects are dense.
    pub fn assign_work<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let Ground {
            topology,
            objects,
            agents,
            pick_drop_range,
            ..
        } = self;
        let [low, high] = *pick_drop_range;

        for ant in agents.iter_mut() {
            let pos = ant.position();
            let ground_object = objects.get(pos);

            ant.update_memory(ground_object.map(|o| o.category).unwrap_or_default());

            match ant.load() {
                None => {
                    let Some(object) = ground_object else {
                        continue;
                    };
                    let density = neighbor_density(topology, objects, pos, object.category);
                    let pick_prob = relu_range(density, low, high);
                    if rng.gen::<f64>() > pick_prob {
                        objects.take(pos);
                        ant.set_load(Some(object));
                        ant.update_memory(object.category);
                    }
                }
                Some(carried) => {
                    ant.update_memory(carried.category);

                    let density = neighbor_density(topology, objects, pos, carried.category);
                    let drop_prob = relu_range(density, low, high);
                    if rng.gen::<f64>() <= drop_prob {
                        // Empty cell: plain drop. Occupied cell: swap.
                        objects.place(pos, carried);
                        ant.set_load(ground_object);
                        ant.update_memory(carried.category);
                        if let Some(picked) = ground_object {
                            ant.update_memory(picked.category);
                        }
                    }
                }
            }
        }
    }

    // === INTROSPECTION ===

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn width(&self) -> usize {
        self.topology.width()
    }

    pub fn length(&self) -> usize {
        self.topology.length()
    }

    pub fn agents(&self) -> &[Ant] {
        &self.agents
    }

    pub fn snapshots(&self) -> Vec<AntSnapshot> {
        self.agents.iter().map(Ant::snapshot).collect()
    }

    pub fn objects(&self) -> &GroundObjects {
        &self.objects
    }

    pub fn object_at(&self, cell: Cell) -> Option<GroundObject> {
        self.objects.get(cell)
    }

    pub fn count_objects(&self) -> ObjectCounts {
        self.objects.counts()
    }

    /// Successful interactions since construction
    pub fn interaction_count(&self) -> u64 {
        self.interaction_counter
    }

    pub fn similarity_threshold(&self) -> u32 {
        self.similarity_threshold
    }

    pub fn cooldown_duration(&self) -> u32 {
        self.cooldown_duration
    }
}
