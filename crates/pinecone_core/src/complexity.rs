//! Read-only statistics over a Margolus grid and its seeding spiral.

use pinecone_data::{golden_angle, ComplexityReport, Grid, SpiralPoint, FIBONACCI};
use std::f64::consts::PI;

/// Spiral pair reported when nothing was seeded or no pair brackets the age.
pub const DEFAULT_SPIRAL_COUNTS: (u32, u32) = (5, 8);

/// Florets considered when measuring pattern energy.
const ENERGY_WINDOW: usize = 50;

/// Stateless analyzer; every method is a pure function of its inputs.
pub struct ComplexityAnalyzer;

impl ComplexityAnalyzer {
    pub fn analyze(grid: &Grid, points: &[SpiralPoint]) -> ComplexityReport {
        let active_sites = grid.population();
        let total_sites = grid.len();
        let (spiral_count_a, spiral_count_b) = Self::spiral_counts(points);
        ComplexityReport {
            active_sites,
            total_sites,
            entropy: Self::binary_entropy(active_sites, total_sites),
            spiral_count_a,
            spiral_count_b,
            pattern_energy: Self::pattern_energy(points),
        }
    }

    /// Shannon entropy in bits of a cell being live. Zero for empty or uniform grids.
    pub fn binary_entropy(active: usize, total: usize) -> f64 {
        if active == 0 || active >= total {
            return 0.0;
        }
        let p = active as f64 / total as f64;
        -p * p.log2() - (1.0 - p) * (1.0 - p).log2()
    }

    /// Consecutive Fibonacci pair bracketing a tenth of the oldest floret's age.
    pub fn spiral_counts(points: &[SpiralPoint]) -> (u32, u32) {
        let Some(last) = points.last() else {
            return DEFAULT_SPIRAL_COUNTS;
        };
        let bucket = last.age as f64 / 10.0;
        FIBONACCI
            .windows(2)
            .find(|pair| pair[0] as f64 <= bucket && bucket < pair[1] as f64)
            .map(|pair| (pair[0], pair[1]))
            .unwrap_or(DEFAULT_SPIRAL_COUNTS)
    }

    /// How closely step bearings between consecutive florets track multiples
    /// of the golden angle, scaled into [0, 1].
    pub fn pattern_energy(points: &[SpiralPoint]) -> f64 {
        if points.len() < 2 {
            return 0.0;
        }
        let window = points.len().min(ENERGY_WINDOW);
        let golden = golden_angle();
        let deviations: Vec<f64> = points[..window]
            .windows(2)
            .enumerate()
            .map(|(i, pair)| {
                let bearing = (pair[1].y - pair[0].y).atan2(pair[1].x - pair[0].x);
                let target = (i as f64 * golden).rem_euclid(2.0 * PI);
                (bearing - target).abs()
            })
            .collect();
        let mean = deviations.iter().sum::<f64>() / deviations.len() as f64;
        (1.0 - mean / PI).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seeder::GeometrySeeder;

    #[test]
    fn test_entropy_edges() {
        assert_eq!(ComplexityAnalyzer::binary_entropy(0, 100), 0.0);
        assert_eq!(ComplexityAnalyzer::binary_entropy(100, 100), 0.0);
        assert!((ComplexityAnalyzer::binary_entropy(50, 100) - 1.0).abs() < 1e-12);
        assert_eq!(ComplexityAnalyzer::binary_entropy(0, 0), 0.0);
    }

    #[test]
    fn test_entropy_is_symmetric() {
        let low = ComplexityAnalyzer::binary_entropy(10, 100);
        let high = ComplexityAnalyzer::binary_entropy(90, 100);
        assert!((low - high).abs() < 1e-12);
        assert!(low > 0.0 && low < 1.0);
    }

    #[test]
    fn test_spiral_counts_for_89_scales() {
        // oldest age 88 -> bucket 8.8 -> (8, 13)
        let points = GeometrySeeder::spiral_points(89);
        assert_eq!(ComplexityAnalyzer::spiral_counts(&points), (8, 13));
    }

    #[test]
    fn test_spiral_counts_fallbacks() {
        assert_eq!(ComplexityAnalyzer::spiral_counts(&[]), DEFAULT_SPIRAL_COUNTS);
        // bucket 0.0 sits below every pair
        let one = GeometrySeeder::spiral_points(1);
        assert_eq!(ComplexityAnalyzer::spiral_counts(&one), DEFAULT_SPIRAL_COUNTS);
        // bucket 99.9 sits above the last pair
        let many = GeometrySeeder::spiral_points(1000);
        assert_eq!(ComplexityAnalyzer::spiral_counts(&many), DEFAULT_SPIRAL_COUNTS);
    }

    #[test]
    fn test_spiral_counts_small_bucket() {
        // oldest age 14 -> bucket 1.4 -> (1, 2)
        let points = GeometrySeeder::spiral_points(15);
        assert_eq!(ComplexityAnalyzer::spiral_counts(&points), (1, 2));
    }

    #[test]
    fn test_pattern_energy_bounds() {
        assert_eq!(ComplexityAnalyzer::pattern_energy(&[]), 0.0);
        let points = GeometrySeeder::spiral_points(89);
        let energy = ComplexityAnalyzer::pattern_energy(&points);
        assert!((0.0..=1.0).contains(&energy));
    }

    #[test]
    fn test_analyze_counts_sites() {
        let grid = GeometrySeeder::seed(50, 89);
        let points = GeometrySeeder::spiral_points(89);
        let report = ComplexityAnalyzer::analyze(&grid, &points);
        assert_eq!(report.total_sites, 2500);
        assert_eq!(report.active_sites, grid.population());
        assert!(report.entropy > 0.0);
    }
}
