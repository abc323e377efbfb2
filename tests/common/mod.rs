#![allow(dead_code)]

/// Packs fields LSB first into a 128 bit block.
#[derive(Debug, Default, Clone, Copy)]
pub struct BlockWriter {
    bits: u128,
    offset: u32,
}

impl BlockWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes the mode tag: `mode` zero bits followed by a one.
    pub fn mode(self, mode: u8) -> Self {
        self.write(mode as u32 + 1, 1 << mode)
    }

    pub fn write(self, num_bits: u32, value: u32) -> Self {
        assert!(self.offset + num_bits <= 128, "block overflow");
        assert!(num_bits == 32 || value < (1 << num_bits), "value too wide");

        Self {
            bits: self.bits | ((value as u128) << self.offset),
            offset: self.offset + num_bits,
        }
    }

    pub fn repeat(self, count: usize, num_bits: u32, value: u32) -> Self {
        (0..count).fold(self, |writer, _| writer.write(num_bits, value))
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn finish(self) -> [u8; 16] {
        assert_eq!(self.offset, 128, "incomplete block");
        self.bits.to_le_bytes()
    }
}

/// A mode 6 block whose texels all decode to exactly `color`.
pub fn solid_block(color: [u8; 4]) -> [u8; 16] {
    let writer = color.iter().fold(BlockWriter::new().mode(6), |writer, &channel| {
        writer.repeat(2, 7, channel as u32 >> 1)
    });

    // Mode 6 parity bits apply to all channels, so the low bits must agree.
    let parity = color[0] & 1;
    assert!(color.iter().all(|channel| channel & 1 == parity));

    writer
        .repeat(2, 1, parity as u32)
        .write(3, 0)
        .repeat(15, 4, 0)
        .finish()
}

/// Deterministic pseudo random bytes.
pub fn noise(len: usize, seed: u64) -> Vec<u8> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 33) as u8
        })
        .collect()
}

/// Forces the mode tag of every block in `data` to `mode`.
pub fn with_mode(mut data: Vec<u8>, mode: u8) -> Vec<u8> {
    for block in data.chunks_exact_mut(16) {
        block[0] = (block[0] & (0xFF << mode)) | (1 << mode);
    }
    data
}
