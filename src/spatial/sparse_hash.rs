//! Sparse cell index for locating ants by position

use ahash::AHashMap;

use crate::core::types::Cell;
use crate::spatial::topology::Topology;

/// Maps each occupied cell to the indices of the ants standing on it
#[derive(Debug, Default)]
pub struct SparseCellIndex {
    cells: AHashMap<Cell, Vec<usize>>,
}

impl SparseCellIndex {
    pub fn new() -> Self {
        Self {
            cells: AHashMap::new(),
        }
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn insert(&mut self, index: usize, cell: Cell) {
        self.cells.entry(cell).or_default().push(index);
    }

    /// Indices on exactly this cell, in insertion order
    pub fn at(&self, cell: Cell) -> &[usize] {
        self.cells.get(&cell).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Indices on the legal neighbors of `cell`, neighbor order then insertion order
    pub fn query_neighbors<'a>(
        &'a self,
        topology: &'a Topology,
        cell: Cell,
    ) -> impl Iterator<Item = usize> + 'a {
        topology
            .neighbors(cell)
            .iter()
            .flat_map(move |n| self.at(*n).iter().copied())
    }

    /// Rebuild index from positions
    pub fn rebuild(&mut self, positions: impl Iterator<Item = (usize, Cell)>) {
        self.clear();
        for (index, cell) in positions {
            self.insert(index, cell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rebuild_and_lookup() {
        let mut index = SparseCellIndex::new();
        index.rebuild(
            [(0, Cell::new(1, 1)), (1, Cell::new(1, 1)), (2, Cell::new(2, 2))].into_iter(),
        );
        assert_eq!(index.at(Cell::new(1, 1)), &[0, 1]);
        assert_eq!(index.at(Cell::new(2, 2)), &[2]);
        assert!(index.at(Cell::new(0, 0)).is_empty());
    }

    #[test]
    fn test_query_neighbors_excludes_own_cell() {
        let topo = Topology::new(4, 4).unwrap();
        let mut index = SparseCellIndex::new();
        index.rebuild(
            [(0, Cell::new(1, 1)), (1, Cell::new(1, 2)), (2, Cell::new(3, 3)), (3, Cell::new(1, 0))]
                .into_iter(),
        );
        let found: Vec<usize> = index.query_neighbors(&topo, Cell::new(1, 1)).collect();
        // North (1,0) comes before South (1,2)
        assert_eq!(found, vec![3, 1]);
    }
}
