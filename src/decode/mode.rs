/// How parity bits are attached to the endpoints of a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParityBits {
    None,
    /// One bit per subset, shared by both endpoints of the subset.
    Shared,
    /// One bit per endpoint.
    Unique,
}

/// Bit layout of one of the eight BC7 modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ModeDescriptor {
    pub(crate) subsets: u8,
    pub(crate) partition_bits: u32,
    pub(crate) rotation_bits: u32,
    pub(crate) index_selection_bits: u32,
    pub(crate) color_bits: u32,
    pub(crate) alpha_bits: u32,
    pub(crate) parity: ParityBits,
    pub(crate) index_bits: u32,
    pub(crate) secondary_index_bits: u32,
}

impl ModeDescriptor {
    #[inline]
    pub(crate) const fn endpoint_count(&self) -> usize {
        self.subsets as usize * 2
    }

    #[inline]
    pub(crate) const fn parity_bit_count(&self) -> usize {
        match self.parity {
            ParityBits::None => 0,
            ParityBits::Shared => self.subsets as usize,
            ParityBits::Unique => self.endpoint_count(),
        }
    }

    /// Number of bits the layout occupies. Anchor texels store one index bit less.
    #[cfg(test)]
    pub(crate) const fn total_bits(&self, mode: u8) -> u32 {
        let endpoints = self.endpoint_count() as u32;
        let secondary = if self.secondary_index_bits > 0 {
            16 * self.secondary_index_bits - 1
        } else {
            0
        };

        (mode as u32 + 1)
            + self.partition_bits
            + self.rotation_bits
            + self.index_selection_bits
            + endpoints * (3 * self.color_bits + self.alpha_bits)
            + self.parity_bit_count() as u32
            + 16 * self.index_bits
            - self.subsets as u32
            + secondary
    }
}

#[rustfmt::skip]
static MODES: [ModeDescriptor; 8] = [
    ModeDescriptor { subsets: 3, partition_bits: 4, rotation_bits: 0, index_selection_bits: 0, color_bits: 4, alpha_bits: 0, parity: ParityBits::Unique, index_bits: 3, secondary_index_bits: 0 },
    ModeDescriptor { subsets: 2, partition_bits: 6, rotation_bits: 0, index_selection_bits: 0, color_bits: 6, alpha_bits: 0, parity: ParityBits::Shared, index_bits: 3, secondary_index_bits: 0 },
    ModeDescriptor { subsets: 3, partition_bits: 6, rotation_bits: 0, index_selection_bits: 0, color_bits: 5, alpha_bits: 0, parity: ParityBits::None,   index_bits: 2, secondary_index_bits: 0 },
    ModeDescriptor { subsets: 2, partition_bits: 6, rotation_bits: 0, index_selection_bits: 0, color_bits: 7, alpha_bits: 0, parity: ParityBits::Unique, index_bits: 2, secondary_index_bits: 0 },
    ModeDescriptor { subsets: 1, partition_bits: 0, rotation_bits: 2, index_selection_bits: 1, color_bits: 5, alpha_bits: 6, parity: ParityBits::None,   index_bits: 2, secondary_index_bits: 3 },
    ModeDescriptor { subsets: 1, partition_bits: 0, rotation_bits: 2, index_selection_bits: 0, color_bits: 7, alpha_bits: 8, parity: ParityBits::None,   index_bits: 2, secondary_index_bits: 2 },
    ModeDescriptor { subsets: 1, partition_bits: 0, rotation_bits: 0, index_selection_bits: 0, color_bits: 7, alpha_bits: 7, parity: ParityBits::Unique, index_bits: 4, secondary_index_bits: 0 },
    ModeDescriptor { subsets: 2, partition_bits: 6, rotation_bits: 0, index_selection_bits: 0, color_bits: 5, alpha_bits: 5, parity: ParityBits::Unique, index_bits: 2, secondary_index_bits: 0 },
];

/// One of the eight BC7 block modes.
#[derive(Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub struct Mode(u8);

impl Mode {
    /// Returns the mode of a block, or `None` for the reserved encoding in which none of the
    /// eight tag bits of the first byte is set.
    ///
    /// The mode is the position of the lowest set bit of the first byte.
    #[inline]
    pub const fn classify(block: &[u8; 16]) -> Option<Self> {
        match block[0] {
            0 => None,
            tag => Some(Self(tag.trailing_zeros() as u8)),
        }
    }

    /// Mode number in `0..8`.
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Number of subsets (1, 2 or 3) the block is partitioned into.
    #[inline]
    pub fn subset_count(self) -> u8 {
        self.descriptor().subsets
    }

    /// Whether the mode stores alpha endpoints. Modes without alpha decode as fully opaque.
    #[inline]
    pub fn has_alpha(self) -> bool {
        self.descriptor().alpha_bits > 0
    }

    #[inline]
    pub(crate) fn descriptor(self) -> &'static ModeDescriptor {
        &MODES[self.0 as usize]
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0b0000_0001, 0)]
    #[case(0b0000_0010, 1)]
    #[case(0b0000_0100, 2)]
    #[case(0b0000_1000, 3)]
    #[case(0b0001_0000, 4)]
    #[case(0b0010_0000, 5)]
    #[case(0b0100_0000, 6)]
    #[case(0b1000_0000, 7)]
    #[case(0b1111_1111, 0)]
    #[case(0b1010_1000, 3)]
    fn classify_uses_lowest_set_bit(#[case] tag: u8, #[case] expected: u8) {
        let mut block = [0xFFu8; 16];
        block[0] = tag;

        assert_eq!(Mode::classify(&block).map(Mode::index), Some(expected));
    }

    #[test]
    fn classify_reserved_tag() {
        let mut block = [0xFFu8; 16];
        block[0] = 0;

        assert_eq!(Mode::classify(&block), None);
    }

    #[rstest]
    fn every_layout_fills_the_block(#[values(0, 1, 2, 3, 4, 5, 6, 7)] mode: u8) {
        assert_eq!(MODES[mode as usize].total_bits(mode), 128);
    }

    #[test]
    fn alpha_modes() {
        let alpha: Vec<u8> = (0..8u8)
            .map(Mode)
            .filter(|mode| mode.has_alpha())
            .map(Mode::index)
            .collect();

        assert_eq!(alpha, [4, 5, 6, 7]);
    }
}
