use serde::{Deserialize, Serialize};

/// Square bit matrix stored row-major, one `u8` (0 or 1) per cell.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Grid {
    size: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// All-zero grid with `size * size` cells.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![0; size * size],
        }
    }

    /// Builds a grid from row-major cells. Any non-zero value is stored as 1.
    /// Returns `None` when `cells.len() != size * size`.
    pub fn from_cells(size: usize, cells: Vec<u8>) -> Option<Self> {
        if cells.len() != size * size {
            return None;
        }
        let cells = cells.into_iter().map(|c| u8::from(c != 0)).collect();
        Some(Self { size, cells })
    }

    /// Builds a grid from equally sized rows. Returns `None` unless the rows form a square.
    pub fn from_rows(rows: &[&[u8]]) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return None;
        }
        Self::from_cells(size, rows.concat())
    }

    #[inline(always)]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline(always)]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    /// Whether signed coordinates fall inside the grid.
    pub fn contains(&self, row: i64, col: i64) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.size && (col as usize) < self.size
    }

    #[inline(always)]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[self.index(row, col)]
    }

    #[inline(always)]
    pub fn set(&mut self, row: usize, col: usize, bit: u8) {
        let idx = self.index(row, col);
        self.cells[idx] = bit & 1;
    }

    #[inline(always)]
    pub fn flip(&mut self, row: usize, col: usize) {
        let idx = self.index(row, col);
        self.cells[idx] ^= 1;
    }

    pub fn fill(&mut self, bit: u8) {
        self.cells.fill(bit & 1);
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Mutable row-major cells. Callers must only write 0 or 1.
    pub fn cells_mut(&mut self) -> &mut [u8] {
        &mut self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        // chunks(0) panics, so an empty grid yields no rows
        self.cells.chunks(self.size.max(1))
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    /// Count of differing cells. Grids of different size compare over the
    /// shorter buffer and count every extra cell as different.
    pub fn hamming_distance(&self, other: &Grid) -> usize {
        let common = self
            .cells
            .iter()
            .zip(other.cells.iter())
            .filter(|(a, b)| a != b)
            .count();
        common + self.cells.len().abs_diff(other.cells.len())
    }

    /// Renders live cells as `#` and dead cells as `.`, one line per row.
    pub fn to_string_art(&self) -> String {
        let mut out = String::with_capacity(self.len() + self.size);
        for row in self.rows() {
            for &cell in row {
                out.push(if cell != 0 { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty_of_life() {
        let grid = Grid::new(4);
        assert_eq!(grid.len(), 16);
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_from_cells_normalizes_bits() {
        let grid = Grid::from_cells(2, vec![0, 5, 1, 0]).unwrap();
        assert_eq!(grid.cells(), &[0, 1, 1, 0]);
        assert!(Grid::from_cells(2, vec![0, 1, 1]).is_none());
    }

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        assert!(Grid::from_rows(&[&[1, 0], &[0]]).is_none());
        let grid = Grid::from_rows(&[&[1, 0], &[0, 1]]).unwrap();
        assert_eq!(grid.get(0, 0), 1);
        assert_eq!(grid.get(1, 1), 1);
        assert_eq!(grid.get(0, 1), 0);
    }

    #[test]
    fn test_flip_and_hamming() {
        let a = Grid::new(3);
        let mut b = a.clone();
        b.flip(1, 2);
        b.flip(0, 0);
        assert_eq!(a.hamming_distance(&b), 2);
        b.flip(1, 2);
        assert_eq!(a.hamming_distance(&b), 1);
    }

    #[test]
    fn test_contains_signed_coordinates() {
        let grid = Grid::new(4);
        assert!(grid.contains(0, 3));
        assert!(!grid.contains(-1, 0));
        assert!(!grid.contains(0, 4));
    }

    #[test]
    fn test_string_art() {
        let grid = Grid::from_rows(&[&[1, 0], &[0, 1]]).unwrap();
        assert_eq!(grid.to_string_art(), "#.\n.#\n");
    }
}
