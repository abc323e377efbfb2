/// Packs fields LSB first into a 128 bit block.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct BlockWriter {
    bits: u128,
    offset: u32,
}

impl BlockWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Writes the mode tag: `mode` zero bits followed by a one.
    pub(crate) fn mode(self, mode: u8) -> Self {
        self.write(mode as u32 + 1, 1 << mode)
    }

    pub(crate) fn write(self, num_bits: u32, value: u32) -> Self {
        assert!(self.offset + num_bits <= 128, "block overflow");
        assert!(num_bits == 32 || value < (1 << num_bits), "value too wide");

        Self {
            bits: self.bits | ((value as u128) << self.offset),
            offset: self.offset + num_bits,
        }
    }

    pub(crate) fn repeat(self, count: usize, num_bits: u32, value: u32) -> Self {
        (0..count).fold(self, |writer, _| writer.write(num_bits, value))
    }

    pub(crate) fn offset(&self) -> u32 {
        self.offset
    }

    pub(crate) fn finish(self) -> [u8; 16] {
        assert_eq!(self.offset, 128, "incomplete block");
        self.bits.to_le_bytes()
    }
}
