//! Quad-redundant Game-of-Life automaton with per-cell majority voting.
//!
//! Four cores evolve the same rule independently. Every step injects random
//! bit flips, evolves each core, then votes cell by cell: a 3-of-4 or 4-of-4
//! majority overwrites the minority cores, while a 2-vs-2 split is recorded as
//! a fault and left untouched.

use crate::error::{check_fault_rate, check_grid_size, AutomataError, Result};
use pinecone_data::{Boundary, Consensus, Grid, QuadCoreStats, ResetPattern, StepReport};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

pub const CORE_COUNT: usize = 4;

/// Core pairs compared for the average Hamming distance.
const CORE_PAIRS: [(usize, usize); 6] = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];

/// Result of voting on one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vote {
    pub consensus: Consensus,
    /// True unless all four cores agree.
    pub fault_detected: bool,
}

/// Four-way majority vote. Two live and two dead cores yield [`Consensus::Tie`].
pub fn majority_vote(votes: [u8; CORE_COUNT]) -> Vote {
    let live = votes.iter().filter(|&&v| v != 0).count();
    match live {
        2 => Vote {
            consensus: Consensus::Tie,
            fault_detected: true,
        },
        n => Vote {
            consensus: Consensus::Resolved(u8::from(n > 2)),
            fault_detected: n != 0 && n != CORE_COUNT,
        },
    }
}

/// Conway B3/S23 for one cell.
#[inline(always)]
fn conway(alive: bool, neighbors: u8) -> u8 {
    match (alive, neighbors) {
        (true, 2) | (true, 3) | (false, 3) => 1,
        _ => 0,
    }
}

fn live_neighbors(grid: &Grid, row: usize, col: usize, boundary: Boundary) -> u8 {
    let n = grid.size() as i64;
    let mut count = 0u8;
    for dr in -1i64..=1 {
        for dc in -1i64..=1 {
            if dr == 0 && dc == 0 {
                continue;
            }
            let mut r = row as i64 + dr;
            let mut c = col as i64 + dc;
            if boundary == Boundary::Toroidal {
                r = r.rem_euclid(n);
                c = c.rem_euclid(n);
            } else if !grid.contains(r, c) {
                continue;
            }
            count += grid.get(r as usize, c as usize);
        }
    }
    count
}

/// One Game-of-Life generation of `grid` under the given boundary handling.
pub fn life_step(grid: &Grid, boundary: Boundary) -> Grid {
    let n = grid.size();
    let mut next = grid.clone();
    let range = match boundary {
        Boundary::FrozenEdge => 1..n.saturating_sub(1),
        Boundary::DeadEdge | Boundary::Toroidal => 0..n,
    };
    for row in range.clone() {
        for col in range.clone() {
            let neighbors = live_neighbors(grid, row, col, boundary);
            next.set(row, col, conway(grid.get(row, col) != 0, neighbors));
        }
    }
    next
}

/// Voted output. Tie cells carry core 0's bit for display but stay marked as ties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusGrid {
    cells: Vec<Consensus>,
    display: Grid,
}

impl ConsensusGrid {
    pub fn new(size: usize) -> Self {
        Self {
            cells: vec![Consensus::default(); size * size],
            display: Grid::new(size),
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Consensus {
        self.cells[self.display.index(row, col)]
    }

    pub fn is_tie(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == Consensus::Tie
    }

    /// Resolved bit, or core 0's bit where the vote tied.
    pub fn display_value(&self, row: usize, col: usize) -> u8 {
        self.display.get(row, col)
    }

    pub fn display(&self) -> &Grid {
        &self.display
    }

    pub fn tie_count(&self) -> usize {
        self.cells.iter().filter(|c| **c == Consensus::Tie).count()
    }

    fn record(&mut self, idx: usize, consensus: Consensus, fallback: u8) {
        self.cells[idx] = consensus;
        self.display.cells_mut()[idx] = consensus.bit().unwrap_or(fallback);
    }
}

#[derive(Debug, Clone)]
pub struct QuadCoreEngine {
    cores: [Grid; CORE_COUNT],
    fault_map: Vec<bool>,
    consensus: ConsensusGrid,
    generation: u64,
    total_faults_detected: u64,
    total_faults_corrected: u64,
    fault_injection_rate: f64,
    boundary: Boundary,
    rng: ChaCha8Rng,
}

impl QuadCoreEngine {
    /// Four identical all-zero cores with fault injection driven by `seed`.
    pub fn new(grid_size: usize, fault_injection_rate: f64, seed: u64) -> Result<Self> {
        Self::with_rng(
            grid_size,
            fault_injection_rate,
            ChaCha8Rng::seed_from_u64(seed),
        )
    }

    pub fn with_rng(grid_size: usize, fault_injection_rate: f64, rng: ChaCha8Rng) -> Result<Self> {
        check_grid_size(grid_size)?;
        check_fault_rate(fault_injection_rate)?;
        let mut engine = Self {
            cores: std::array::from_fn(|_| Grid::new(grid_size)),
            fault_map: vec![false; grid_size * grid_size],
            consensus: ConsensusGrid::new(grid_size),
            generation: 0,
            total_faults_detected: 0,
            total_faults_corrected: 0,
            fault_injection_rate,
            boundary: Boundary::default(),
            rng,
        };
        engine.refresh_consensus();
        Ok(engine)
    }

    #[must_use]
    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    /// Injects faults, evolves all cores, then votes and corrects.
    pub fn step(&mut self) -> StepReport {
        let flips = self.inject_faults();
        self.evolve_cores();
        let report = self.vote_and_correct();
        self.generation += 1;

        tracing::debug!(
            generation = self.generation,
            injected = flips,
            faults = report.faults,
            corrections = report.corrections,
            ties = report.ties,
            "Quad-core step"
        );
        report
    }

    /// Flips each cell of each core with probability `fault_injection_rate`.
    /// Cores are visited in order so the random stream is reproducible.
    pub fn inject_faults(&mut self) -> usize {
        if self.fault_injection_rate <= 0.0 {
            return 0;
        }
        let rate = self.fault_injection_rate;
        let mut flips = 0;
        for core in &mut self.cores {
            for cell in core.cells_mut() {
                if self.rng.gen::<f64>() < rate {
                    *cell ^= 1;
                    flips += 1;
                }
            }
        }
        flips
    }

    /// Evolves the four cores in parallel; returns once all four are done.
    pub fn evolve_cores(&mut self) {
        let boundary = self.boundary;
        self.cores
            .par_iter_mut()
            .for_each(|core| *core = life_step(core, boundary));
    }

    /// Votes on every cell, overwrites minority cores where a majority exists,
    /// and adds the outcome to the running totals.
    pub fn vote_and_correct(&mut self) -> StepReport {
        self.fault_map.fill(false);
        let mut report = StepReport::default();

        for idx in 0..self.fault_map.len() {
            let votes = self.votes_at(idx);
            let vote = majority_vote(votes);
            if vote.fault_detected {
                self.fault_map[idx] = true;
                report.faults += 1;
            }
            match vote.consensus {
                Consensus::Resolved(bit) => {
                    for core in &mut self.cores {
                        let cell = &mut core.cells_mut()[idx];
                        if *cell != bit {
                            *cell = bit;
                            report.corrections += 1;
                        }
                    }
                }
                Consensus::Tie => report.ties += 1,
            }
            self.consensus.record(idx, vote.consensus, votes[0]);
        }

        self.total_faults_detected += report.faults as u64;
        self.total_faults_corrected += report.corrections as u64;
        report
    }

    /// Reinitializes all four cores to the same pattern and zeroes every counter.
    pub fn reset(&mut self, pattern: ResetPattern) {
        let size = self.size();
        let mut base = Grid::new(size);
        match pattern {
            ResetPattern::Zero => {}
            ResetPattern::Random => {
                for cell in base.cells_mut() {
                    *cell = u8::from(self.rng.gen::<bool>());
                }
            }
            ResetPattern::Glider => {
                if size >= 5 {
                    for (row, col) in [(1, 2), (2, 3), (3, 1), (3, 2), (3, 3)] {
                        base.set(row, col, 1);
                    }
                }
            }
        }
        self.cores = std::array::from_fn(|_| base.clone());
        self.generation = 0;
        self.total_faults_detected = 0;
        self.total_faults_corrected = 0;
        self.fault_map.fill(false);
        self.refresh_consensus();

        tracing::info!(
            pattern = ?pattern,
            grid_size = size,
            active_cells = base.population(),
            "Quad-core reset"
        );
    }

    /// Gives every core its own random content. Counters are kept.
    pub fn randomize_independently(&mut self) {
        for core in &mut self.cores {
            for cell in core.cells_mut() {
                *cell = u8::from(self.rng.gen::<bool>());
            }
        }
        self.refresh_consensus();
    }

    /// Flips one bit in one core, outside the random injection stream.
    pub fn flip_cell(&mut self, core: usize, row: usize, col: usize) -> Result<()> {
        let size = self.size();
        let grid = self
            .cores
            .get_mut(core)
            .ok_or(AutomataError::InvalidCore(core))?;
        if row >= size || col >= size {
            return Err(AutomataError::CellOutOfBounds { row, col, size });
        }
        grid.flip(row, col);
        Ok(())
    }

    pub fn set_fault_rate(&mut self, rate: f64) -> Result<()> {
        check_fault_rate(rate)?;
        self.fault_injection_rate = rate;
        Ok(())
    }

    pub fn set_boundary(&mut self, boundary: Boundary) {
        self.boundary = boundary;
    }

    /// Percentage of cells where all four cores hold the same bit.
    pub fn core_agreement_pct(&self) -> f64 {
        let total = self.fault_map.len();
        if total == 0 {
            return 0.0;
        }
        let agreeing = (0..total)
            .filter(|&idx| {
                let votes = self.votes_at(idx);
                votes.iter().all(|&v| v == votes[0])
            })
            .count();
        100.0 * agreeing as f64 / total as f64
    }

    /// Corrections per detected fault relative to the three-core maximum, capped at 1.
    pub fn fault_tolerance_score(&self) -> f64 {
        if self.total_faults_detected == 0 {
            return 1.0;
        }
        let ratio = self.total_faults_corrected as f64 / (self.total_faults_detected * 3) as f64;
        ratio.min(1.0)
    }

    /// Mean normalized Hamming distance over the six core pairs, in [0, 1].
    pub fn avg_hamming_distance(&self) -> f64 {
        let total = self.fault_map.len();
        if total == 0 {
            return 0.0;
        }
        let sum: f64 = CORE_PAIRS
            .iter()
            .map(|&(a, b)| self.cores[a].hamming_distance(&self.cores[b]) as f64 / total as f64)
            .sum();
        sum / CORE_PAIRS.len() as f64
    }

    /// Cells flagged by the latest vote.
    pub fn current_faults(&self) -> usize {
        self.fault_map.iter().filter(|&&f| f).count()
    }

    pub fn stats(&self) -> QuadCoreStats {
        QuadCoreStats {
            generation: self.generation,
            active_cells: self.consensus.display().population(),
            fault_injection_rate_pct: self.fault_injection_rate * 100.0,
            total_faults_detected: self.total_faults_detected,
            total_faults_corrected: self.total_faults_corrected,
            core_agreement_pct: self.core_agreement_pct(),
            fault_tolerance_score: self.fault_tolerance_score(),
            avg_hamming_distance: self.avg_hamming_distance(),
            current_faults: self.current_faults(),
            unresolved_ties: self.consensus.tie_count(),
            grid_size: self.size(),
        }
    }

    pub fn cores(&self) -> &[Grid; CORE_COUNT] {
        &self.cores
    }

    pub fn core(&self, index: usize) -> Option<&Grid> {
        self.cores.get(index)
    }

    pub fn fault_map(&self) -> &[bool] {
        &self.fault_map
    }

    pub fn consensus(&self) -> &ConsensusGrid {
        &self.consensus
    }

    pub fn size(&self) -> usize {
        self.cores[0].size()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn total_faults_detected(&self) -> u64 {
        self.total_faults_detected
    }

    pub fn total_faults_corrected(&self) -> u64 {
        self.total_faults_corrected
    }

    pub fn fault_injection_rate(&self) -> f64 {
        self.fault_injection_rate
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    #[inline(always)]
    fn votes_at(&self, idx: usize) -> [u8; CORE_COUNT] {
        std::array::from_fn(|k| self.cores[k].cells()[idx])
    }

    /// Recomputes the consensus view without touching cores or counters.
    fn refresh_consensus(&mut self) {
        for idx in 0..self.fault_map.len() {
            let votes = self.votes_at(idx);
            self.consensus
                .record(idx, majority_vote(votes).consensus, votes[0]);
        }
    }
}
