//! Reversible Margolus block automaton seeded with golden-angle spiral geometry.
//!
//! Each step partitions the grid into disjoint 2x2 blocks anchored at the
//! current [`PartitionOffset`] and applies the [`Block`] rule to each. Forward
//! steps toggle the offset after the blocks are rewritten; reverse steps toggle
//! it first, so a reverse step always re-partitions exactly like the forward
//! step it undoes. No history is kept.

use crate::block::Block;
use crate::complexity::ComplexityAnalyzer;
use crate::error::{check_grid_size, AutomataError, Result};
use crate::seeder::GeometrySeeder;
use pinecone_data::{
    golden_angle, ComplexityReport, Grid, MargolusStats, PartitionOffset, SpiralPoint,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Margolus block rules of the Critters family are known to be computation
/// universal. This is a literature claim reported in stats, not something the
/// engine checks.
pub const CLAIMS_TURING_COMPLETE: bool = true;

/// Everything needed to put the automaton back into an earlier configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MargolusSnapshot {
    pub grid: Grid,
    pub partition_offset: PartitionOffset,
}

#[derive(Debug, Clone)]
pub struct MargolusEngine {
    grid: Grid,
    back_buffer: Grid,
    partition_offset: PartitionOffset,
    generation: i64,
    forward_steps: u64,
    reverse_steps: u64,
    reverse_mode: bool,
    num_scales: usize,
    spiral_points: Vec<SpiralPoint>,
    seeded: bool,
}

impl MargolusEngine {
    /// Creates an unseeded engine. Odd sizes are rounded up to the next even number.
    pub fn new(grid_size: usize, num_scales: usize) -> Result<Self> {
        check_grid_size(grid_size)?;
        let size = grid_size + grid_size % 2;
        Ok(Self {
            grid: Grid::new(size),
            back_buffer: Grid::new(size),
            partition_offset: PartitionOffset::Even,
            generation: 0,
            forward_steps: 0,
            reverse_steps: 0,
            reverse_mode: false,
            num_scales,
            spiral_points: Vec::new(),
            seeded: false,
        })
    }

    /// Creates an engine and seeds it immediately.
    pub fn seeded(grid_size: usize, num_scales: usize) -> Result<Self> {
        let mut engine = Self::new(grid_size, num_scales)?;
        engine.seed_geometry(num_scales);
        Ok(engine)
    }

    /// Writes the spiral pattern into the grid. Only the first call (or the
    /// first [`load_grid`](Self::load_grid)) has any effect; returns whether
    /// this call seeded.
    pub fn seed_geometry(&mut self, num_scales: usize) -> bool {
        if self.seeded {
            tracing::warn!(
                generation = self.generation,
                "Ignoring repeated geometry seed request"
            );
            return false;
        }
        let size = self.grid.size();
        self.spiral_points = GeometrySeeder::spiral_points(num_scales);
        self.grid = GeometrySeeder::seed_from_points(size, &self.spiral_points);
        self.num_scales = num_scales;
        self.seeded = true;
        tracing::info!(
            grid_size = size,
            num_scales = num_scales,
            active_cells = self.grid.population(),
            "Seeded spiral geometry"
        );
        true
    }

    /// Replaces the grid with explicit content and marks the engine as seeded.
    pub fn load_grid(&mut self, grid: Grid) -> Result<()> {
        self.check_size(&grid)?;
        self.grid = grid;
        self.seeded = true;
        Ok(())
    }

    /// Seeds lazily with the configured scale count, then applies one step.
    pub fn step(&mut self, reverse: bool) {
        if !self.seeded {
            self.seed_geometry(self.num_scales);
        }
        self.apply_step(reverse);
    }

    /// One step in the current [`reverse_mode`](Self::reverse_mode).
    pub fn tick(&mut self) {
        self.step(self.reverse_mode);
    }

    /// Applies the block rule over the active partition, forward or inverted.
    pub fn apply_step(&mut self, reverse: bool) {
        if reverse {
            self.partition_offset.toggle();
        }

        let n = self.grid.size();
        let off = self.partition_offset.as_usize();
        self.back_buffer.cells_mut().copy_from_slice(self.grid.cells());

        // Each chunk holds the two rows of one band of blocks. A trailing
        // single row (odd offset) has no blocks and keeps its copied cells.
        let source = &self.grid;
        self.back_buffer.cells_mut()[off * n..]
            .par_chunks_mut(2 * n)
            .enumerate()
            .filter(|(_, rows)| rows.len() == 2 * n)
            .for_each(|(band, rows)| {
                let top = off + 2 * band;
                for col in (off..n - 1).step_by(2) {
                    let block = Block([
                        source.get(top, col),
                        source.get(top, col + 1),
                        source.get(top + 1, col),
                        source.get(top + 1, col + 1),
                    ]);
                    let Block([a, b, c, d]) = block.apply_rule(reverse);
                    rows[col] = a;
                    rows[col + 1] = b;
                    rows[n + col] = c;
                    rows[n + col + 1] = d;
                }
            });

        std::mem::swap(&mut self.grid, &mut self.back_buffer);

        if reverse {
            self.generation -= 1;
            self.reverse_steps += 1;
        } else {
            self.partition_offset.toggle();
            self.generation += 1;
            self.forward_steps += 1;
        }

        tracing::debug!(
            generation = self.generation,
            reverse = reverse,
            partition_offset = self.partition_offset.as_usize(),
            "Margolus step"
        );
    }

    pub fn set_reverse_mode(&mut self, reverse: bool) {
        self.reverse_mode = reverse;
    }

    /// Runs `cycles` forward then `cycles` reverse steps on a copy and checks
    /// that grid and offset come back unchanged. Seeds the copy if needed.
    pub fn verify_reversibility(&self, cycles: usize) -> bool {
        let mut probe = self.clone();
        if !probe.seeded {
            probe.seed_geometry(probe.num_scales);
        }
        let original = probe.snapshot();
        for _ in 0..cycles {
            probe.apply_step(false);
        }
        for _ in 0..cycles {
            probe.apply_step(true);
        }
        probe.snapshot() == original
    }

    pub fn snapshot(&self) -> MargolusSnapshot {
        MargolusSnapshot {
            grid: self.grid.clone(),
            partition_offset: self.partition_offset,
        }
    }

    /// Puts grid and offset back and marks the engine as seeded; counters and
    /// generation are left alone.
    pub fn restore(&mut self, snapshot: MargolusSnapshot) -> Result<()> {
        self.check_size(&snapshot.grid)?;
        self.grid = snapshot.grid;
        self.partition_offset = snapshot.partition_offset;
        self.seeded = true;
        Ok(())
    }

    pub fn complexity(&self) -> ComplexityReport {
        ComplexityAnalyzer::analyze(&self.grid, &self.spiral_points)
    }

    pub fn stats(&self) -> MargolusStats {
        let report = self.complexity();
        MargolusStats {
            generation: self.generation,
            active_cells: report.active_sites,
            golden_angle_deg: golden_angle().to_degrees(),
            spiral_count_a: report.spiral_count_a,
            spiral_count_b: report.spiral_count_b,
            pattern_energy: report.pattern_energy,
            reverse_mode: self.reverse_mode,
            partition_offset: self.partition_offset.as_usize() as u8,
            entropy: report.entropy,
            active_gates: report.active_sites,
            total_gates: report.total_sites,
            turing_complete: CLAIMS_TURING_COMPLETE,
            reversible: true,
            total_scales: self.spiral_points.len(),
            forward_steps: self.forward_steps,
            reverse_steps: self.reverse_steps,
            computation_depth: self.forward_steps + self.reverse_steps,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn partition_offset(&self) -> PartitionOffset {
        self.partition_offset
    }

    pub fn generation(&self) -> i64 {
        self.generation
    }

    pub fn forward_steps(&self) -> u64 {
        self.forward_steps
    }

    pub fn reverse_steps(&self) -> u64 {
        self.reverse_steps
    }

    pub fn reverse_mode(&self) -> bool {
        self.reverse_mode
    }

    pub fn num_scales(&self) -> usize {
        self.num_scales
    }

    pub fn is_seeded(&self) -> bool {
        self.seeded
    }

    pub fn spiral_points(&self) -> &[SpiralPoint] {
        &self.spiral_points
    }

    fn check_size(&self, grid: &Grid) -> Result<()> {
        if grid.size() != self.grid.size() {
            return Err(AutomataError::SizeMismatch {
                expected: self.grid.size(),
                actual: grid.size(),
            });
        }
        Ok(())
    }
}
