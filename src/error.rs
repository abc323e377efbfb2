use thiserror::Error;

/// Errors that can occur when decoding an image.
///
/// All preconditions are checked before any block is decoded, so a failed call never produces
/// partial output.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum DecodeError {
    /// Width or height is zero, or the image is too large to address.
    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions {
        /// The requested width in pixels
        width: u32,
        /// The requested height in pixels
        height: u32,
    },

    /// The compressed data is shorter than the block grid requires.
    #[error("Insufficient data: need {needed} bytes, but only {actual} bytes available.")]
    InsufficientData {
        /// The required size in bytes
        needed: usize,
        /// The actual size in bytes
        actual: usize,
    },

    /// The output buffer cannot hold the decoded image.
    #[error("Output buffer too small: need {needed} bytes, but only {actual} bytes available.")]
    OutputBufferTooSmall {
        /// The required size in bytes
        needed: usize,
        /// The actual size in bytes
        actual: usize,
    },
}
