use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Fibonacci numbers used to derive seed bits and spiral counts.
pub const FIBONACCI: [u32; 11] = [1, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89];

/// The golden angle `π(3 − √5)` in radians (~137.508°).
#[inline]
pub fn golden_angle() -> f64 {
    PI * (3.0 - 5.0_f64.sqrt())
}

/// One floret of a phyllotaxis spiral.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpiralPoint {
    pub x: f64,
    pub y: f64,
    pub age: u32,
}

impl SpiralPoint {
    /// Places the floret of the given age at `angle = age * golden`, `radius = sqrt(age) / 2`.
    pub fn at_age(age: u32) -> Self {
        let angle = age as f64 * golden_angle();
        let radius = (age as f64).sqrt() * 0.5;
        Self {
            x: radius * angle.cos(),
            y: radius * angle.sin(),
            age,
        }
    }

    /// Seed bit for this floret: 1 when the Fibonacci number at `age mod 11` is odd.
    pub fn seed_bit(&self) -> u8 {
        let fib = FIBONACCI[self.age as usize % FIBONACCI.len()];
        (fib % 2) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_golden_angle_degrees() {
        let phi = (1.0 + 5.0_f64.sqrt()) / 2.0;
        let expected = 360.0 / (phi * phi);
        assert!((golden_angle().to_degrees() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_origin_floret() {
        let p = SpiralPoint::at_age(0);
        assert_eq!(p.x, 0.0);
        assert_eq!(p.y, 0.0);
        assert_eq!(p.seed_bit(), 1);
    }

    #[test]
    fn test_seed_bit_follows_fibonacci_parity() {
        // 1 1 2 3 5 8 13 21 34 55 89
        let bits: Vec<u8> = (0..11).map(|a| SpiralPoint::at_age(a).seed_bit()).collect();
        assert_eq!(bits, vec![1, 1, 0, 1, 1, 0, 1, 1, 0, 1, 1]);
        assert_eq!(SpiralPoint::at_age(13).seed_bit(), 0);
    }
}
