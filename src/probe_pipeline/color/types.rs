//! Color value types

/// 8-bit RGB pixel value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

/// Integer HSV triple as written to exported tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Hsv {
    /// Hue in degrees, `0..360`
    pub h: u16,
    /// Saturation in percent, `0..=100`
    pub s: u8,
    /// Value in percent, `0..=100`
    pub v: u8,
}

impl Hsv {
    pub const fn new(h: u16, s: u8, v: u8) -> Self {
        Self { h, s, v }
    }
}

/// Per-channel arithmetic mean over a pixel region
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MeanRgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl MeanRgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}
