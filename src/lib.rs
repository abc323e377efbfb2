//! # bc7_decode
//!
//! Bit-exact BC7 (BPTC) texture decoding on the CPU.
//!
//! BC7 stores every 4x4 texel tile in a 16 byte block. Each block selects one of eight modes,
//! which fix the number of subsets, the precision of the endpoints, the presence of parity bits,
//! alpha handling and the width of the interpolation indices. This crate turns a stream of such
//! blocks into a plain RGBA8 bitmap.
//!
//! ## Features
//!
//!  * All eight modes, including rotation and index selection
//!  * Reserved blocks decode to transparent black (configurable via [`DecodeSettings`])
//!  * Images whose dimensions are not a multiple of 4 are cropped
//!  * `rayon`: decode block rows in parallel
//!
//! ## Example
//!
//! ```
//! use bc7_decode::{blocks_byte_size, decode, DecodeError};
//!
//! let data = vec![0u8; blocks_byte_size(5, 5).unwrap()];
//! let bitmap = decode(5, 5, &data).unwrap();
//! assert_eq!(bitmap.as_bytes().len(), 5 * 5 * 4);
//!
//! assert!(matches!(
//!     decode(4, 4, &data[..15]),
//!     Err(DecodeError::InsufficientData { needed: 16, actual: 15 })
//! ));
//! ```
mod bitmap;
pub mod decode;
mod error;
mod settings;

pub use bitmap::{Bitmap, Rgba8};
pub use decode::{
    blocks_byte_size, decode, decode_block, decode_into, decode_with_settings, Mode,
    BLOCK_BYTE_SIZE,
};
pub use error::DecodeError;
pub use settings::DecodeSettings;
