//! Generic dense grid for per-cell data

use crate::core::types::Cell;

/// Row-major 2D grid storing one `T` per cell
#[derive(Debug, Clone)]
pub struct Grid<T: Clone + Default> {
    pub width: usize,
    pub length: usize,
    data: Vec<T>,
}

impl<T: Clone + Default> Grid<T> {
    pub fn new(width: usize, length: usize) -> Self {
        Self {
            width,
            length,
            data: vec![T::default(); width * length],
        }
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < self.width && (cell.y as usize) < self.length
    }

    #[inline]
    fn index_of(&self, cell: Cell) -> Option<usize> {
        if self.contains(cell) {
            Some(cell.y as usize * self.width + cell.x as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get(&self, cell: Cell) -> Option<&T> {
        self.index_of(cell).map(|i| &self.data[i])
    }

    #[inline]
    pub fn set(&mut self, cell: Cell, value: T) {
        if let Some(i) = self.index_of(cell) {
            self.data[i] = value;
        }
    }

    /// Cell for a flat row-major index
    #[inline]
    pub fn cell_at(&self, index: usize) -> Cell {
        Cell::new((index % self.width) as i32, (index / self.width) as i32)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// All cells, column by column (x outer, y inner)
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let length = self.length as i32;
        (0..self.width as i32).flat_map(move |x| (0..length).map(move |y| Cell::new(x, y)))
    }
}
