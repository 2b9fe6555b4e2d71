//! Read-only snapshots handed to dashboards and reporting tools.

use serde::{Deserialize, Serialize};

/// Statistics derived from one Margolus grid by the complexity analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ComplexityReport {
    pub active_sites: usize,
    pub total_sites: usize,
    /// Binary Shannon entropy of the live-cell fraction, in bits.
    pub entropy: f64,
    pub spiral_count_a: u32,
    pub spiral_count_b: u32,
    /// Alignment of consecutive floret bearings to the golden angle, in [0, 1].
    pub pattern_energy: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MargolusStats {
    pub generation: i64,
    pub active_cells: usize,
    pub golden_angle_deg: f64,
    pub spiral_count_a: u32,
    pub spiral_count_b: u32,
    pub pattern_energy: f64,
    pub reverse_mode: bool,
    pub partition_offset: u8,
    pub entropy: f64,
    pub active_gates: usize,
    pub total_gates: usize,
    /// Literature claim for the Critters rule; not verified at runtime.
    pub turing_complete: bool,
    pub reversible: bool,
    pub total_scales: usize,
    pub forward_steps: u64,
    pub reverse_steps: u64,
    pub computation_depth: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuadCoreStats {
    pub generation: u64,
    pub active_cells: usize,
    pub fault_injection_rate_pct: f64,
    pub total_faults_detected: u64,
    pub total_faults_corrected: u64,
    pub core_agreement_pct: f64,
    pub fault_tolerance_score: f64,
    pub avg_hamming_distance: f64,
    pub current_faults: usize,
    pub unresolved_ties: usize,
    pub grid_size: usize,
}

/// Per-step outcome of the quad-core vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StepReport {
    /// Cells where the four cores did not all agree.
    pub faults: usize,
    /// Core cells overwritten to match a resolved majority.
    pub corrections: usize,
    /// Cells left unresolved by a 2-vs-2 split.
    pub ties: usize,
}
