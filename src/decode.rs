//! CPU based decoding.

mod bitstream;
mod block;
mod color;
mod fields;
mod mode;
mod tables;
#[cfg(test)]
mod test_util;

use bytemuck::cast_slice;
use log::{debug, trace};

pub use self::{
    block::{decode_block, BLOCK_BYTE_SIZE},
    mode::Mode,
};
use crate::{Bitmap, DecodeError, DecodeSettings, Rgba8};

/// Returns the byte size of the compressed blocks for an image of the given dimensions.
///
/// Width and height are rounded up to the nearest multiple of 4. Returns `None` if the size
/// does not fit in a `usize`.
pub const fn blocks_byte_size(width: u32, height: u32) -> Option<usize> {
    let blocks_wide = (width as usize).div_ceil(4);
    let blocks_tall = (height as usize).div_ceil(4);

    match blocks_wide.checked_mul(blocks_tall) {
        Some(blocks) => blocks.checked_mul(BLOCK_BYTE_SIZE),
        None => None,
    }
}

/// Validated sizes of a decode call.
#[derive(Copy, Clone, Debug)]
struct Layout {
    width: usize,
    height: usize,
    blocks_wide: usize,
    blocks_tall: usize,
    input_size: usize,
    output_size: usize,
}

impl Layout {
    fn new(width: u32, height: u32, input_len: usize) -> Result<Self, DecodeError> {
        let invalid = DecodeError::InvalidDimensions { width, height };

        if width == 0 || height == 0 {
            return Err(invalid);
        }

        let input_size = blocks_byte_size(width, height).ok_or(invalid)?;
        let output_size = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(4))
            .ok_or(invalid)?;

        if input_len < input_size {
            return Err(DecodeError::InsufficientData {
                needed: input_size,
                actual: input_len,
            });
        }

        Ok(Self {
            width: width as usize,
            height: height as usize,
            blocks_wide: (width as usize).div_ceil(4),
            blocks_tall: (height as usize).div_ceil(4),
            input_size,
            output_size,
        })
    }

    /// Bytes of one row of blocks in the input.
    fn block_row_size(&self) -> usize {
        self.blocks_wide * BLOCK_BYTE_SIZE
    }

    /// Bytes of the four output rows covered by one row of blocks.
    fn band_size(&self) -> usize {
        self.width * 4 * 4
    }
}

/// Decodes a BC7 image with default settings.
///
/// `data` holds `ceil(width / 4) * ceil(height / 4)` blocks of 16 bytes in raster order.
/// Bytes after the last block are ignored. The returned bitmap is cropped to exactly
/// `width * height` texels.
///
/// # Example
/// ```
/// use bc7_decode::decode;
///
/// // A single mode 6 block.
/// let block = [
///     0x40, 0xAF, 0xF6, 0x0B, 0xFD, 0x2E, 0xFF, 0xFF, 0x11, 0x71, 0x10, 0xA1, 0x21, 0xF2, 0x33,
///     0x73,
/// ];
///
/// let bitmap = decode(3, 2, &block).unwrap();
/// assert_eq!(bitmap.pixels().len(), 6);
/// assert_eq!(bitmap.pixel(0, 0).unwrap().to_array(), [0xBD, 0xBF, 0xBF, 0xFF]);
/// ```
pub fn decode(width: u32, height: u32, data: &[u8]) -> Result<Bitmap, DecodeError> {
    decode_with_settings(width, height, data, &DecodeSettings::default())
}

/// Decodes a BC7 image, see [`decode()`].
pub fn decode_with_settings(
    width: u32,
    height: u32,
    data: &[u8],
    settings: &DecodeSettings,
) -> Result<Bitmap, DecodeError> {
    let layout = Layout::new(width, height, data.len())?;

    let mut output = vec![0; layout.output_size];
    decode_blocks(&layout, data, &mut output, settings);

    Ok(Bitmap::from_raw(width, height, output))
}

/// Decodes a BC7 image into a caller provided RGBA8 buffer.
///
/// The first `width * height * 4` bytes of `output` receive the image in row-major order; any
/// remaining bytes are left untouched. Nothing is written if an error is returned.
pub fn decode_into(
    width: u32,
    height: u32,
    data: &[u8],
    output: &mut [u8],
    settings: &DecodeSettings,
) -> Result<(), DecodeError> {
    let layout = Layout::new(width, height, data.len())?;

    if output.len() < layout.output_size {
        return Err(DecodeError::OutputBufferTooSmall {
            needed: layout.output_size,
            actual: output.len(),
        });
    }

    decode_blocks(&layout, data, &mut output[..layout.output_size], settings);

    Ok(())
}

fn decode_blocks(layout: &Layout, data: &[u8], output: &mut [u8], settings: &DecodeSettings) {
    let input = &data[..layout.input_size];

    debug!(
        "decoding {}x{} image from {}x{} blocks into {} output bytes ({})",
        layout.width,
        layout.height,
        layout.blocks_wide,
        layout.blocks_tall,
        output.len(),
        if cfg!(feature = "rayon") {
            "parallel"
        } else {
            "sequential"
        }
    );

    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;

        input
            .par_chunks(layout.block_row_size())
            .zip(output.par_chunks_mut(layout.band_size()))
            .enumerate()
            .for_each(|(block_y, (blocks, band))| {
                decode_block_row(block_y, blocks, band, layout.width, settings);
            });
    }

    #[cfg(not(feature = "rayon"))]
    {
        input
            .chunks(layout.block_row_size())
            .zip(output.chunks_mut(layout.band_size()))
            .enumerate()
            .for_each(|(block_y, (blocks, band))| {
                decode_block_row(block_y, blocks, band, layout.width, settings);
            });
    }
}

/// Decodes one row of blocks into `band`, the up to four output rows it covers.
///
/// Texels right of `width` and below the band are discarded.
fn decode_block_row(
    block_y: usize,
    blocks: &[u8],
    band: &mut [u8],
    width: usize,
    settings: &DecodeSettings,
) {
    let row_pitch = width * 4;
    let rows = band.len() / row_pitch;
    let blocks: &[[u8; BLOCK_BYTE_SIZE]] = cast_slice(blocks);

    for (block_x, block) in blocks.iter().enumerate() {
        let texels = block::decode_defined_block(block).unwrap_or_else(|| {
            trace!("reserved block at ({block_x}, {block_y})");
            [settings.reserved_color; 16]
        });

        let x = block_x * 4;
        let columns = (width - x).min(4);

        for y in 0..rows {
            let source: &[Rgba8] = &texels[y * 4..y * 4 + columns];
            let offset = y * row_pitch + x * 4;
            band[offset..offset + columns * 4].copy_from_slice(cast_slice(source));
        }
    }
}
