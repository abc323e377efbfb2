use super::{
    fields::{BlockFields, MAX_ENDPOINTS},
    mode::{ModeDescriptor, ParityBits},
    tables::{weights, Partition},
};
use crate::Rgba8;

/// Expands a `bits` wide channel to 8 bits by replicating its most significant bits into the
/// vacated low bits. Zero stays 0 and all ones becomes 255.
#[inline]
pub(crate) fn expand(value: u8, bits: u32) -> u8 {
    debug_assert!((4..=8).contains(&bits));
    let shifted = (value as u32) << (8 - bits);
    (shifted | (shifted >> bits)) as u8
}

#[inline]
pub(crate) fn interpolate(low: u8, high: u8, weight: u8) -> u8 {
    let weight = weight as u32;
    ((low as u32 * (64 - weight) + high as u32 * weight + 32) >> 6) as u8
}

/// Swaps alpha with the channel selected by `rotation` (1 = red, 2 = green, 3 = blue).
#[inline]
pub(crate) fn rotate(mut pixel: Rgba8, rotation: u8) -> Rgba8 {
    match rotation {
        1 => std::mem::swap(&mut pixel.a, &mut pixel.r),
        2 => std::mem::swap(&mut pixel.a, &mut pixel.g),
        3 => std::mem::swap(&mut pixel.a, &mut pixel.b),
        _ => {}
    }
    pixel
}

fn expand_channel(raw: u8, bits: u32, parity: Option<u8>) -> u8 {
    match (bits, parity) {
        (0, _) => u8::MAX,
        (bits, Some(parity)) => expand((raw << 1) | parity, bits + 1),
        (bits, None) => expand(raw, bits),
    }
}

/// Endpoints of all subsets at full 8 bit precision.
fn endpoint_colors(fields: &BlockFields, layout: &ModeDescriptor) -> [Rgba8; MAX_ENDPOINTS] {
    let mut colors = [Rgba8::TRANSPARENT_BLACK; MAX_ENDPOINTS];

    for (endpoint, color) in colors
        .iter_mut()
        .enumerate()
        .take(layout.endpoint_count())
    {
        let parity = match layout.parity {
            ParityBits::None => None,
            ParityBits::Shared => Some(fields.parity[endpoint / 2]),
            ParityBits::Unique => Some(fields.parity[endpoint]),
        };
        let [r, g, b, a] = fields.endpoints[endpoint];

        *color = Rgba8::new(
            expand_channel(r, layout.color_bits, parity),
            expand_channel(g, layout.color_bits, parity),
            expand_channel(b, layout.color_bits, parity),
            expand_channel(a, layout.alpha_bits, parity),
        );
    }

    colors
}

/// Turns the raw fields of a block into its 16 texels in row-major order.
pub(crate) fn reconstruct(fields: &BlockFields) -> [Rgba8; 16] {
    let layout = fields.mode.descriptor();
    let partition = Partition::lookup(layout.subsets, fields.partition);
    let endpoints = endpoint_colors(fields, layout);

    let primary = (&fields.primary_indices, weights(layout.index_bits));
    let (color_stream, alpha_stream) = match &fields.secondary_indices {
        None => (primary, primary),
        Some(secondary) => {
            let secondary = (secondary, weights(layout.secondary_index_bits));
            if fields.index_selection == 0 {
                (primary, secondary)
            } else {
                (secondary, primary)
            }
        }
    };

    let mut texels = [Rgba8::TRANSPARENT_BLACK; 16];

    for (texel, output) in texels.iter_mut().enumerate() {
        let subset = partition.subset(texel);
        let low = endpoints[subset * 2];
        let high = endpoints[subset * 2 + 1];

        let color_weight = color_stream.1[color_stream.0[texel] as usize];
        let alpha_weight = alpha_stream.1[alpha_stream.0[texel] as usize];

        let mut pixel = rotate(
            Rgba8::new(
                interpolate(low.r, high.r, color_weight),
                interpolate(low.g, high.g, color_weight),
                interpolate(low.b, high.b, color_weight),
                interpolate(low.a, high.a, alpha_weight),
            ),
            fields.rotation,
        );

        if layout.alpha_bits == 0 {
            pixel.a = u8::MAX;
        }

        *output = pixel;
    }

    texels
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::decode::{fields::extract, mode::Mode, test_util::BlockWriter};

    #[test]
    fn six_bit_expansion_keeps_extremes() {
        assert_eq!(expand(0, 6), 0);
        assert_eq!(expand(63, 6), 255);
    }

    #[rstest]
    fn expansion_keeps_extremes_at_every_width(#[values(4, 5, 6, 7, 8)] bits: u32) {
        let max = ((1u32 << bits) - 1) as u8;
        assert_eq!(expand(0, bits), 0);
        assert_eq!(expand(max, bits), 255);
    }

    #[rstest]
    fn expansion_is_monotonic(#[values(4, 5, 6, 7, 8)] bits: u32) {
        let expanded: Vec<u8> = (0..1u32 << bits).map(|v| expand(v as u8, bits)).collect();
        assert!(expanded.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn expansion_replicates_high_bits() {
        assert_eq!(expand(0b10000, 5), 0b1000_0100);
        assert_eq!(expand(0b101_0101, 7), 0b1010_1011);
        assert_eq!(expand(0xA7, 8), 0xA7);
    }

    #[test]
    fn parity_bit_is_lowest_bit_before_expansion() {
        // 6 stored bits plus parity expand as a 7 bit value.
        assert_eq!(expand_channel(0, 6, Some(1)), 2);
        assert_eq!(expand_channel(63, 6, Some(0)), 253);
        assert_eq!(expand_channel(63, 6, Some(1)), 255);
        assert_eq!(expand_channel(0, 0, Some(1)), 255);
    }

    #[rstest]
    #[case(0, 255, 0, 0)]
    #[case(0, 255, 64, 255)]
    #[case(0, 255, 32, 128)]
    #[case(10, 20, 21, 13)]
    #[case(200, 100, 43, 133)]
    fn interpolation_rounds_to_nearest(
        #[case] low: u8,
        #[case] high: u8,
        #[case] weight: u8,
        #[case] expected: u8,
    ) {
        assert_eq!(interpolate(low, high, weight), expected);
    }

    #[test]
    fn interpolation_between_equal_endpoints_is_constant() {
        for value in [0u8, 1, 127, 128, 254, 255] {
            for weight in 0..=64 {
                assert_eq!(interpolate(value, value, weight), value);
            }
        }
    }

    #[rstest]
    #[case(0, Rgba8::new(1, 2, 3, 4))]
    #[case(1, Rgba8::new(4, 2, 3, 1))]
    #[case(2, Rgba8::new(1, 4, 3, 2))]
    #[case(3, Rgba8::new(1, 2, 4, 3))]
    fn rotation_swaps_alpha(#[case] rotation: u8, #[case] expected: Rgba8) {
        assert_eq!(rotate(Rgba8::new(1, 2, 3, 4), rotation), expected);
    }

    #[test]
    fn modes_without_alpha_are_opaque() {
        for index in [0u8, 1, 2, 3] {
            let mut block = [0x5Au8; 16];
            block[0] = (0x5A << (index + 1)) | (1 << index);
            let mode = Mode::classify(&block).unwrap();
            assert_eq!(mode.index(), index);

            let texels = reconstruct(&extract(&block, mode));
            assert!(texels.iter().all(|texel| texel.a == 255));
        }
    }

    #[test]
    fn index_selection_swaps_streams() {
        // Mode 4, red endpoints 0 and 31, alpha endpoints 0 and 63.
        let build = |index_selection: u32| {
            BlockWriter::new()
                .mode(4)
                .write(2, 0)
                .write(1, index_selection)
                .write(5, 0)
                .write(5, 31)
                .repeat(4, 5, 0)
                .write(6, 0)
                .write(6, 63)
                .repeat(31, 1, 1)
                .repeat(47, 1, 0)
                .finish()
        };

        // Primary indices are 1 and 3 (2 bit), secondary indices are all 0 (3 bit).
        let block = build(0);
        let texels = reconstruct(&extract(&block, Mode::classify(&block).unwrap()));
        assert_eq!(texels[0], Rgba8::new(84, 0, 0, 0));
        assert_eq!(texels[1], Rgba8::new(255, 0, 0, 0));

        let block = build(1);
        let texels = reconstruct(&extract(&block, Mode::classify(&block).unwrap()));
        assert_eq!(texels[0], Rgba8::new(0, 0, 0, 84));
        assert_eq!(texels[1], Rgba8::new(0, 0, 0, 255));
    }
}
