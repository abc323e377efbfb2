use super::{
    bitstream::BitStream,
    mode::{Mode, ModeDescriptor},
    tables::Partition,
};

pub(crate) const MAX_ENDPOINTS: usize = 6;

/// Raw fields of a block, as stored in the bitstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BlockFields {
    pub(crate) mode: Mode,
    pub(crate) partition: u8,
    pub(crate) rotation: u8,
    pub(crate) index_selection: u8,
    /// Endpoint channels in RGBA order at their stored precision. Endpoints `2 * s` and
    /// `2 * s + 1` are the low and high endpoint of subset `s`.
    pub(crate) endpoints: [[u8; 4]; MAX_ENDPOINTS],
    /// Parity bits in stream order, one per endpoint or one per subset depending on the mode.
    pub(crate) parity: [u8; MAX_ENDPOINTS],
    pub(crate) primary_indices: [u8; 16],
    /// Separate alpha indices of modes 4 and 5.
    pub(crate) secondary_indices: Option<[u8; 16]>,
}

/// Reads all fields of `block` using the layout of `mode`.
pub(crate) fn extract(block: &[u8; 16], mode: Mode) -> BlockFields {
    let layout = mode.descriptor();
    let stream = BitStream::new(block).skip(mode.index() as u32 + 1);

    let (partition, stream) = stream.read_bits(layout.partition_bits);
    let (rotation, stream) = stream.read_bits(layout.rotation_bits);
    let (index_selection, stream) = stream.read_bits(layout.index_selection_bits);
    let (endpoints, stream) = read_endpoints(stream, layout);
    let (parity, stream) = read_parity(stream, layout);

    let shape = Partition::lookup(layout.subsets, partition);
    let (primary_indices, stream) =
        read_indices(stream, layout.index_bits, |texel| shape.is_anchor(texel));

    let (secondary_indices, stream) = match layout.secondary_index_bits {
        0 => (None, stream),
        bits => {
            let (indices, stream) = read_indices(stream, bits, |texel| texel == 0);
            (Some(indices), stream)
        }
    };

    debug_assert_eq!(stream.offset(), BitStream::BLOCK_BITS);

    BlockFields {
        mode,
        partition,
        rotation,
        index_selection,
        endpoints,
        parity,
        primary_indices,
        secondary_indices,
    }
}

fn read_endpoints(
    mut stream: BitStream,
    layout: &ModeDescriptor,
) -> ([[u8; 4]; MAX_ENDPOINTS], BitStream) {
    let mut endpoints = [[0u8; 4]; MAX_ENDPOINTS];

    // Channel major: all red values first, then green, blue and alpha.
    for channel in 0..4 {
        let bits = if channel < 3 {
            layout.color_bits
        } else {
            layout.alpha_bits
        };

        for endpoint in endpoints.iter_mut().take(layout.endpoint_count()) {
            let (value, next) = stream.read_bits(bits);
            endpoint[channel] = value;
            stream = next;
        }
    }

    (endpoints, stream)
}

fn read_parity(
    mut stream: BitStream,
    layout: &ModeDescriptor,
) -> ([u8; MAX_ENDPOINTS], BitStream) {
    let mut parity = [0u8; MAX_ENDPOINTS];

    for bit in parity.iter_mut().take(layout.parity_bit_count()) {
        let (value, next) = stream.read_bit();
        *bit = value;
        stream = next;
    }

    (parity, stream)
}

fn read_indices(
    mut stream: BitStream,
    index_bits: u32,
    is_anchor: impl Fn(usize) -> bool,
) -> ([u8; 16], BitStream) {
    let mut indices = [0u8; 16];

    for (texel, index) in indices.iter_mut().enumerate() {
        // The most significant bit of an anchor index is implicitly zero.
        let bits = if is_anchor(texel) {
            index_bits - 1
        } else {
            index_bits
        };

        let (value, next) = stream.read_bits(bits);
        *index = value;
        stream = next;
    }

    (indices, stream)
}
