//! The reversible 2x2 block rule ("Critters"-style).
//!
//! A block is classified by its popcount and rotated a quarter turn. Popcount
//! is invariant under rotation, so the reverse step classifies the rotated
//! block the same way and applies the opposite turn. That is the whole
//! bijection argument, and [`RULE_TABLE`] is the only place it is encoded.

use serde::{Deserialize, Serialize};

/// Popcount class of a 2x2 block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockClass {
    /// Popcount 4.
    AllActive = 0,
    /// Popcount 1 or 2.
    Sparse = 1,
    /// Popcount 0 or 3.
    Dense = 2,
}

impl BlockClass {
    pub fn from_popcount(popcount: u32) -> Self {
        match popcount {
            4 => BlockClass::AllActive,
            1 | 2 => BlockClass::Sparse,
            _ => BlockClass::Dense,
        }
    }

    /// Rotation this class receives in the given direction.
    #[inline]
    pub fn rotation(self, reverse: bool) -> Rotation {
        RULE_TABLE[self as usize][usize::from(reverse)]
    }
}

/// Quarter-turn permutation of the four block cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    Identity,
    Clockwise,
    CounterClockwise,
}

impl Rotation {
    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            Rotation::Identity => Rotation::Identity,
            Rotation::Clockwise => Rotation::CounterClockwise,
            Rotation::CounterClockwise => Rotation::Clockwise,
        }
    }
}

/// `[forward, reverse]` rotation per [`BlockClass`], indexed by discriminant.
pub const RULE_TABLE: [[Rotation; 2]; 3] = [
    [Rotation::Identity, Rotation::Identity],
    [Rotation::Clockwise, Rotation::CounterClockwise],
    [Rotation::CounterClockwise, Rotation::Clockwise],
];

/// Cells of a 2x2 block in reading order: `[top-left, top-right, bottom-left, bottom-right]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Block(pub [u8; 4]);

impl Block {
    /// Decodes the low four bits of `bits`, top-left first.
    pub fn from_bits(bits: u8) -> Self {
        Block([bits & 1, (bits >> 1) & 1, (bits >> 2) & 1, (bits >> 3) & 1])
    }

    pub fn to_bits(self) -> u8 {
        let [a, b, c, d] = self.0;
        a | (b << 1) | (c << 2) | (d << 3)
    }

    pub fn popcount(self) -> u32 {
        self.0.iter().map(|&c| u32::from(c)).sum()
    }

    pub fn class(self) -> BlockClass {
        BlockClass::from_popcount(self.popcount())
    }

    /// `[a b / c d]` turns into `[c a / d b]` clockwise and `[b d / a c]` counter-clockwise.
    #[must_use]
    pub fn rotate(self, rotation: Rotation) -> Self {
        let [a, b, c, d] = self.0;
        match rotation {
            Rotation::Identity => self,
            Rotation::Clockwise => Block([c, a, d, b]),
            Rotation::CounterClockwise => Block([b, d, a, c]),
        }
    }

    /// Applies the block rule forward, or its inverse when `reverse` is set.
    #[must_use]
    pub fn apply_rule(self, reverse: bool) -> Self {
        self.rotate(self.class().rotation(reverse))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_table_rows_are_mutual_inverses() {
        for class in [BlockClass::AllActive, BlockClass::Sparse, BlockClass::Dense] {
            assert_eq!(class.rotation(true), class.rotation(false).inverse());
        }
    }

    #[test]
    fn test_forward_then_reverse_is_identity_for_all_sixteen_blocks() {
        for bits in 0..16u8 {
            let block = Block::from_bits(bits);
            assert_eq!(block.apply_rule(false).apply_rule(true), block, "bits {bits:04b}");
            assert_eq!(block.apply_rule(true).apply_rule(false), block, "bits {bits:04b}");
        }
    }

    #[test]
    fn test_forward_rule_is_a_permutation_of_block_states() {
        let mut seen = [false; 16];
        for bits in 0..16u8 {
            let image = Block::from_bits(bits).apply_rule(false).to_bits();
            assert!(!seen[image as usize], "collision on {image:04b}");
            seen[image as usize] = true;
        }
    }

    #[test]
    fn test_full_block_is_fixed() {
        let full = Block([1, 1, 1, 1]);
        assert_eq!(full.class(), BlockClass::AllActive);
        assert_eq!(full.apply_rule(false), full);
        assert_eq!(full.apply_rule(true), full);
    }

    #[test]
    fn test_single_particle_rotates_clockwise() {
        // top-left -> top-right
        let block = Block([1, 0, 0, 0]);
        assert_eq!(block.apply_rule(false), Block([0, 1, 0, 0]));
        assert_eq!(block.apply_rule(true), Block([0, 0, 1, 0]));
    }

    #[test]
    fn test_four_quarter_turns_restore_block() {
        let block = Block([1, 0, 1, 1]);
        let turned = (0..4).fold(block, |b, _| b.rotate(Rotation::Clockwise));
        assert_eq!(turned, block);
    }

    #[test]
    fn test_popcount_classes() {
        assert_eq!(Block([0, 0, 0, 0]).class(), BlockClass::Dense);
        assert_eq!(Block([1, 1, 0, 0]).class(), BlockClass::Sparse);
        assert_eq!(Block([1, 1, 1, 0]).class(), BlockClass::Dense);
    }
}
