//! Raster data types

use crate::probe_pipeline::color::Rgb;
use crate::probe_pipeline::common::error::{ProbeError, Result};
use crate::probe_pipeline::raster::reader::Raster;

/// Pixel coordinate in the raster's own resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NativeCoord {
    pub x: u32,
    pub y: u32,
}

impl NativeCoord {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Fails with `OutOfBounds` unless the coordinate lies inside a
    /// `width` x `height` raster.
    pub fn check_within(self, width: u32, height: u32) -> Result<Self> {
        if self.x < width && self.y < height {
            Ok(self)
        } else {
            Err(ProbeError::OutOfBounds(self.x as i64, self.y as i64, width, height))
        }
    }
}

/// Owned 8-bit RGB raster
#[derive(Debug, Clone, PartialEq)]
pub struct RgbRaster {
    /// Width of the raster in pixels
    width: u32,
    /// Height of the raster in pixels
    height: u32,
    /// Interleaved pixel data [R, G, B, R, G, B, ...], row-major
    data: Vec<u8>,
}

impl RgbRaster {
    /// Wraps interleaved RGB8 data, checking that the buffer matches the
    /// dimensions.
    pub fn from_rgb8(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(ProbeError::InvalidParameter(format!(
                "RGB buffer holds {} bytes, {}x{} needs {}",
                data.len(),
                width,
                height,
                expected
            )));
        }
        Ok(Self { width, height, data })
    }

    /// A raster filled with one color.
    pub fn solid(width: u32, height: u32, color: Rgb) -> Self {
        let data = [color.r, color.g, color.b].repeat(width as usize * height as usize);
        Self { width, height, data }
    }

    /// Builds a raster by evaluating `f` at every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Rgb) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize * 3);
        for y in 0..height {
            for x in 0..width {
                let c = f(x, y);
                data.extend_from_slice(&[c.r, c.g, c.b]);
            }
        }
        Self { width, height, data }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl Raster for RgbRaster {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel_at(&self, x: u32, y: u32) -> Rgb {
        debug_assert!(x < self.width && y < self.height);
        let i = (y as usize * self.width as usize + x as usize) * 3;
        Rgb::new(self.data[i], self.data[i + 1], self.data[i + 2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgb8_rejects_short_buffer() {
        let result = RgbRaster::from_rgb8(2, 2, vec![0; 11]);
        assert!(matches!(result, Err(ProbeError::InvalidParameter(_))));
    }

    #[test]
    fn test_pixel_layout_is_row_major() {
        let raster = RgbRaster::from_fn(3, 2, |x, y| Rgb::new(x as u8, y as u8, 7));
        assert_eq!(raster.pixel_at(2, 1), Rgb::new(2, 1, 7));
        assert_eq!(raster.as_bytes()[3..6], [1, 0, 7]);
    }

    #[test]
    fn test_check_within() {
        assert!(NativeCoord::new(3, 3).check_within(4, 4).is_ok());
        assert!(matches!(
            NativeCoord::new(4, 0).check_within(4, 4),
            Err(ProbeError::OutOfBounds(4, 0, 4, 4))
        ));
    }
}
