//! The fixed 32-colour palette.

/// An 8-bit RGB colour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Channels as `[r, g, b]`.
    #[must_use]
    pub fn channels(self) -> [u8; 3] {
        [self.0, self.1, self.2]
    }
}

/// Number of palette entries; colours repeat with this period.
pub const PALETTE_SIZE: usize = 32;

const COLORS: [Rgb; PALETTE_SIZE] = [
    Rgb(173, 216, 230), // light blue
    Rgb(0, 191, 255),
    Rgb(30, 144, 255),
    Rgb(0, 0, 255),
    Rgb(0, 0, 139),
    Rgb(72, 61, 139),
    Rgb(123, 104, 238),
    Rgb(138, 43, 226),
    Rgb(128, 0, 128),
    Rgb(218, 112, 214),
    Rgb(255, 0, 255),
    Rgb(255, 20, 147),
    Rgb(176, 48, 96),
    Rgb(220, 20, 60),
    Rgb(240, 128, 128),
    Rgb(255, 69, 0),
    Rgb(255, 165, 0),
    Rgb(244, 164, 96),
    Rgb(240, 230, 140),
    Rgb(128, 128, 0),
    Rgb(139, 69, 19),
    Rgb(255, 255, 0),
    Rgb(154, 205, 50),
    Rgb(124, 252, 0),
    Rgb(144, 238, 144),
    Rgb(143, 188, 143),
    Rgb(34, 139, 34),
    Rgb(0, 255, 127),
    Rgb(0, 255, 255),
    Rgb(0, 139, 139),
    Rgb(128, 128, 128),
    Rgb(255, 255, 255), // white
];

/// Maps values to colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    colors: &'static [Rgb; PALETTE_SIZE],
}

impl Default for Palette {
    fn default() -> Self {
        Self { colors: &COLORS }
    }
}

impl Palette {
    /// Palette index of a value: `v mod 32`, never negative.
    #[must_use]
    pub fn index_of(value: i64) -> usize {
        // rem_euclid(32) is in 0..32, so the cast is lossless.
        value.rem_euclid(PALETTE_SIZE as i64) as usize
    }

    /// Colour of a value.
    #[must_use]
    pub fn color_for(&self, value: i64) -> Rgb {
        self.colors[Self::index_of(value)]
    }

    /// All entries in index order.
    #[must_use]
    pub fn colors(&self) -> &[Rgb] {
        self.colors
    }
}
