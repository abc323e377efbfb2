use crate::Rgba8;

/// Decoding settings.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct DecodeSettings {
    pub(crate) reserved_color: Rgba8,
}

impl DecodeSettings {
    /// Default settings. Reserved blocks decode to transparent black.
    pub const fn new() -> Self {
        Self {
            reserved_color: Rgba8::TRANSPARENT_BLACK,
        }
    }

    /// Settings that paint reserved blocks opaque magenta, to make corrupted data visible.
    pub const fn highlight_reserved() -> Self {
        Self::new().with_reserved_color(Rgba8::new(255, 0, 255, 255))
    }

    /// Sets the color written for every texel of a reserved block.
    pub const fn with_reserved_color(self, reserved_color: Rgba8) -> Self {
        Self { reserved_color }
    }

    /// The color written for every texel of a reserved block.
    pub const fn reserved_color(&self) -> Rgba8 {
        self.reserved_color
    }
}

impl Default for DecodeSettings {
    fn default() -> Self {
        Self::new()
    }
}
