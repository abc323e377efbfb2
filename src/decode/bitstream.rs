/// Read cursor over the 128 bits of a compressed block.
///
/// Bits are consumed starting at the least significant bit of the first byte. The cursor is a
/// plain value: every read returns the extracted field together with the advanced cursor and
/// leaves the original untouched, so a field read is a pure function of `(block, offset)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BitStream {
    bits: u128,
    offset: u32,
}

impl BitStream {
    /// Total number of bits in a block.
    pub(crate) const BLOCK_BITS: u32 = 128;

    /// Create a new bitstream positioned at the first bit of the block.
    #[inline]
    pub(crate) fn new(block: &[u8; 16]) -> Self {
        Self {
            bits: u128::from_le_bytes(*block),
            offset: 0,
        }
    }

    /// Number of bits consumed so far.
    #[inline]
    pub(crate) fn offset(self) -> u32 {
        self.offset
    }

    /// Skip `num_bits` without reading them.
    #[inline]
    pub(crate) fn skip(self, num_bits: u32) -> Self {
        debug_assert!(self.offset + num_bits <= Self::BLOCK_BITS);
        Self {
            bits: self.bits,
            offset: self.offset + num_bits,
        }
    }

    /// Read a field of up to 8 bits. Reading zero bits yields zero and does not advance.
    #[inline]
    pub(crate) fn read_bits(self, num_bits: u32) -> (u8, Self) {
        debug_assert!(num_bits <= 8);
        debug_assert!(self.offset + num_bits <= Self::BLOCK_BITS);

        let mask = (1u32 << num_bits) - 1;
        let shifted = self.bits.checked_shr(self.offset).unwrap_or(0);
        let value = (shifted as u32 & mask) as u8;

        (value, self.skip(num_bits))
    }

    #[inline]
    pub(crate) fn read_bit(self) -> (u8, Self) {
        self.read_bits(1)
    }
}
