//! Golden-angle spiral seeding for the reversible automaton.

use pinecone_data::{Grid, SpiralPoint};

/// Deterministic phyllotaxis seeder. Runs once per automaton lifetime.
pub struct GeometrySeeder;

impl GeometrySeeder {
    /// Grid cells per unit of spiral radius is `grid_size / SCALE_DIVISOR`.
    pub const SCALE_DIVISOR: f64 = 20.0;

    /// The first `num_scales` florets, ages `0..num_scales`.
    pub fn spiral_points(num_scales: usize) -> Vec<SpiralPoint> {
        (0..num_scales)
            .map(|age| SpiralPoint::at_age(age as u32))
            .collect()
    }

    /// Seeds a fresh grid of side `grid_size` from `num_scales` florets.
    pub fn seed(grid_size: usize, num_scales: usize) -> Grid {
        Self::seed_from_points(grid_size, &Self::spiral_points(num_scales))
    }

    /// Maps florets onto an all-zero grid. Later florets overwrite earlier
    /// ones landing on the same cell; florets outside the grid are dropped.
    pub fn seed_from_points(grid_size: usize, points: &[SpiralPoint]) -> Grid {
        let mut grid = Grid::new(grid_size);
        for point in points {
            if let Some((row, col)) = Self::cell_for(grid_size, point) {
                grid.set(row, col, point.seed_bit());
            }
        }
        grid
    }

    /// Grid cell a floret lands on, truncating toward zero like an integer cast.
    pub fn cell_for(grid_size: usize, point: &SpiralPoint) -> Option<(usize, usize)> {
        let center = (grid_size / 2) as f64;
        let scale = grid_size as f64 / Self::SCALE_DIVISOR;
        let row = (center + point.x * scale) as i64;
        let col = (center + point.y * scale) as i64;
        if row >= 0 && col >= 0 && (row as usize) < grid_size && (col as usize) < grid_size {
            Some((row as usize, col as usize))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_deterministic() {
        let a = GeometrySeeder::seed(50, 89);
        let b = GeometrySeeder::seed(50, 89);
        assert_eq!(a, b);
        assert!(a.population() > 0);
    }

    #[test]
    fn test_origin_floret_lands_on_center() {
        let grid = GeometrySeeder::seed(10, 1);
        assert_eq!(grid.get(5, 5), 1);
        assert_eq!(grid.population(), 1);
    }

    #[test]
    fn test_zero_scales_leaves_grid_empty() {
        let grid = GeometrySeeder::seed(20, 0);
        assert_eq!(grid.population(), 0);
        assert_eq!(grid.size(), 20);
    }

    #[test]
    fn test_far_florets_are_dropped() {
        let outside = SpiralPoint {
            x: 100.0,
            y: 0.0,
            age: 0,
        };
        assert_eq!(GeometrySeeder::cell_for(10, &outside), None);

        // Radius 50 spans 250 cells on a 100 grid; most large ages fall off.
        let dropped = GeometrySeeder::spiral_points(10_000)
            .iter()
            .filter(|p| GeometrySeeder::cell_for(100, p).is_none())
            .count();
        assert!(dropped > 0);
    }

    #[test]
    fn test_point_count() {
        let points = GeometrySeeder::spiral_points(89);
        assert_eq!(points.len(), 89);
        assert_eq!(points.last().map(|p| p.age), Some(88));
    }
}
