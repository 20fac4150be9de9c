//! Cluster-size metric
//!
//! A cluster is a maximal 8-connected set of cells holding the same object
//! handle. Identity matters, not category: two Food objects created
//! separately never join, even when adjacent.

use std::collections::VecDeque;

use crate::core::types::Cell;
use crate::simulation::ground::Ground;
use crate::spatial::grid::Grid;
use crate::world::objects::GroundObject;

impl Ground {
    /// Mean size of all clusters on the ground, 0 when there are none
    pub fn average_cluster_size(&self) -> f64 {
        let sizes = self.cluster_sizes();
        if sizes.is_empty() {
            return 0.0;
        }
        sizes.iter().sum::<usize>() as f64 / sizes.len() as f64
    }

    /// Size of every cluster, in seed order (x outer, y inner)
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut visited: Grid<bool> = Grid::new(self.width(), self.length());
        let mut queue: VecDeque<Cell> = VecDeque::new();
        let mut sizes = Vec::new();

        for cell in self.topology.cells() {
            if visited.get(cell).copied().unwrap_or(true) {
                continue;
            }
            let Some(target) = self.objects.get(cell).filter(|o| o.category.is_object()) else {
                visited.set(cell, true);
                continue;
            };

            let size = self.flood_cluster(cell, target, &mut visited, &mut queue);
            if size > 0 {
                sizes.push(size);
            }
        }

        sizes
    }

    /// Breadth-first walk over cells holding `target`, marking them visited
    fn flood_cluster(
        &self,
        start: Cell,
        target: GroundObject,
        visited: &mut Grid<bool>,
        queue: &mut VecDeque<Cell>,
    ) -> usize {
        let mut size = 0;
        queue.clear();
        visited.set(start, true);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            size += 1;
            for &neighbor in self.topology.neighbors(current) {
                if visited.get(neighbor).copied().unwrap_or(true) {
                    continue;
                }
                if self.objects.get(neighbor) == Some(target) {
                    visited.set(neighbor, true);
                    queue.push_back(neighbor);
                }
            }
        }

        size
    }
}
