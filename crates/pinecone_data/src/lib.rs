use serde::{Deserialize, Serialize};

pub mod data;

pub use data::grid::Grid;
pub use data::spiral::{golden_angle, SpiralPoint, FIBONACCI};
pub use data::stats::{ComplexityReport, MargolusStats, QuadCoreStats, StepReport};

/// Which 2x2 sub-lattice a Margolus step partitions on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PartitionOffset {
    /// Blocks anchored at even coordinates.
    #[default]
    Even,
    /// Blocks anchored at odd coordinates.
    Odd,
}

impl PartitionOffset {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            PartitionOffset::Even => PartitionOffset::Odd,
            PartitionOffset::Odd => PartitionOffset::Even,
        }
    }

    pub fn toggle(&mut self) {
        *self = self.toggled();
    }

    /// Row/column of the first block's top-left corner.
    #[inline(always)]
    pub fn as_usize(self) -> usize {
        match self {
            PartitionOffset::Even => 0,
            PartitionOffset::Odd => 1,
        }
    }
}

/// Outcome of a four-way majority vote on one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Consensus {
    /// Three or more cores agree on this bit.
    Resolved(u8),
    /// Two cores say 0 and two say 1.
    Tie,
}

impl Consensus {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Consensus::Resolved(_))
    }

    /// The agreed bit, or `None` for a tie.
    pub fn bit(&self) -> Option<u8> {
        match self {
            Consensus::Resolved(bit) => Some(*bit),
            Consensus::Tie => None,
        }
    }
}

impl Default for Consensus {
    fn default() -> Self {
        Consensus::Resolved(0)
    }
}

/// Baseline content written into all four redundant cores on reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ResetPattern {
    Zero,
    #[default]
    Random,
    /// Classic five-cell glider near the top-left corner.
    Glider,
}

/// How the Game-of-Life rule treats the grid border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Boundary {
    /// Border cells are never rewritten by the rule.
    #[default]
    FrozenEdge,
    /// Neighbors outside the grid count as dead.
    DeadEdge,
    /// Opposite edges are adjacent.
    Toroidal,
}
