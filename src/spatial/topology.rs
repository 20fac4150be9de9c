//! Precomputed 8-neighborhood for every grid cell
//!
//! Built once per ground and never mutated. Neighbor lists keep the angular
//! order N, NE, E, SE, S, SW, W, NW with out-of-bounds offsets dropped, so
//! interior cells have 8 neighbors, edges 5 and corners 3.

use rand::Rng;

use crate::core::config::validate_dimensions;
use crate::core::error::{ColonyError, Result};
use crate::core::types::{Cell, Direction, NUM_DIRECTIONS};
use crate::spatial::grid::Grid;

/// Legal neighbor cells for every cell of a `width x length` grid
#[derive(Debug, Clone)]
pub struct Topology {
    neighbors: Grid<Vec<Cell>>,
}

impl Topology {
    /// Build the neighbor index, failing on non-positive dimensions
    pub fn new(width: i32, length: i32) -> Result<Self> {
        validate_dimensions(width, length)?;
        Ok(Self {
            neighbors: compute_neighbors(width as usize, length as usize),
        })
    }

    pub fn width(&self) -> usize {
        self.neighbors.width
    }

    pub fn length(&self) -> usize {
        self.neighbors.length
    }

    pub fn cell_count(&self) -> usize {
        self.neighbors.len()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.neighbors.contains(cell)
    }

    /// Neighbors of `cell`; empty for cells outside the grid
    #[inline]
    pub fn neighbors(&self, cell: Cell) -> &[Cell] {
        self.neighbors.get(cell).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True when the cell has all 8 neighbors
    #[inline]
    pub fn is_interior(&self, cell: Cell) -> bool {
        self.neighbors(cell).len() == NUM_DIRECTIONS
    }

    /// Every cell, column by column
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        self.neighbors.cells()
    }

    /// Uniformly random cell of the grid
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Cell> {
        if self.neighbors.is_empty() {
            return Err(ColonyError::EmptyTopology);
        }
        let index = rng.gen_range(0..self.neighbors.len());
        Ok(self.neighbors.cell_at(index))
    }
}

/// Neighbor lists for a `width x length` grid (zero-size grids yield an empty index)
pub fn compute_neighbors(width: usize, length: usize) -> Grid<Vec<Cell>> {
    let mut grid: Grid<Vec<Cell>> = Grid::new(width, length);
    let cells: Vec<Cell> = grid.cells().collect();

    for cell in cells {
        let neighbors: Vec<Cell> = Direction::ALL
            .iter()
            .map(|&dir| cell.step(dir))
            .filter(|n| {
                n.x >= 0 && n.y >= 0 && (n.x as usize) < width && (n.y as usize) < length
            })
            .collect();
        grid.set(cell, neighbors);
    }

    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_interior_edge_corner_counts() {
        let topo = Topology::new(5, 4).unwrap();
        assert_eq!(topo.neighbors(Cell::new(2, 2)).len(), 8);
        assert_eq!(topo.neighbors(Cell::new(0, 2)).len(), 5);
        assert_eq!(topo.neighbors(Cell::new(2, 0)).len(), 5);
        assert_eq!(topo.neighbors(Cell::new(4, 1)).len(), 5);
        assert_eq!(topo.neighbors(Cell::new(0, 0)).len(), 3);
        assert_eq!(topo.neighbors(Cell::new(4, 3)).len(), 3);
    }

    #[test]
    fn test_neighbor_order_is_clockwise_from_north() {
        let topo = Topology::new(3, 3).unwrap();
        let expected = vec![
            Cell::new(1, 0),
            Cell::new(2, 0),
            Cell::new(2, 1),
            Cell::new(2, 2),
            Cell::new(1, 2),
            Cell::new(0, 2),
            Cell::new(0, 1),
            Cell::new(0, 0),
        ];
        assert_eq!(topo.neighbors(Cell::new(1, 1)), expected.as_slice());
    }

    #[test]
    fn test_corner_neighbors() {
        let topo = Topology::new(3, 3).unwrap();
        // E, SE, S survive at the top-left corner
        assert_eq!(
            topo.neighbors(Cell::new(0, 0)),
            &[Cell::new(1, 0), Cell::new(1, 1), Cell::new(0, 1)]
        );
    }

    #[test]
    fn test_single_cell_grid_has_no_neighbors() {
        let topo = Topology::new(1, 1).unwrap();
        assert!(topo.neighbors(Cell::new(0, 0)).is_empty());
    }

    #[test]
    fn test_outside_cell_has_no_neighbors() {
        let topo = Topology::new(3, 3).unwrap();
        assert!(topo.neighbors(Cell::new(3, 0)).is_empty());
        assert!(topo.neighbors(Cell::new(-1, 1)).is_empty());
    }

    #[test]
    fn test_invalid_dimensions_fail_fast() {
        assert!(matches!(
            Topology::new(0, 5),
            Err(ColonyError::InvalidDimensions { width: 0, length: 5 })
        ));
        assert!(Topology::new(5, -1).is_err());
    }

    #[test]
    fn test_random_cell_on_empty_index_errors() {
        let topo = Topology {
            neighbors: compute_neighbors(0, 0),
        };
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        assert!(matches!(topo.random_cell(&mut rng), Err(ColonyError::EmptyTopology)));
    }

    #[test]
    fn test_random_cell_in_bounds() {
        let topo = Topology::new(7, 3).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..500 {
            let cell = topo.random_cell(&mut rng).unwrap();
            assert!(topo.contains(cell));
        }
    }
}
