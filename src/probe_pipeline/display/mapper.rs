use crate::probe_pipeline::common::error::{ProbeError, Result};
use crate::probe_pipeline::display::transform::{Anchor, DisplayCoord, DisplayTransform, Viewport};
use crate::probe_pipeline::raster::NativeCoord;

/// Maps between display coordinates and the native pixels of one raster.
///
/// Built once per raster load; holds the transform and the cached raster
/// dimensions, never the raster itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    transform: DisplayTransform,
    width: u32,
    height: u32,
}

impl CoordinateMapper {
    pub fn new(transform: DisplayTransform, width: u32, height: u32) -> Self {
        Self { transform, width, height }
    }

    /// Fits a raster of the given size into `viewport` and builds its mapper.
    pub fn fit(width: u32, height: u32, viewport: Viewport, anchor: Anchor) -> Result<Self> {
        let transform = DisplayTransform::fit(width, height, viewport, anchor)?;
        Ok(Self::new(transform, width, height))
    }

    pub fn transform(&self) -> &DisplayTransform {
        &self.transform
    }

    pub fn raster_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn to_display(&self, native: NativeCoord) -> DisplayCoord {
        let (ox, oy) = self.transform.offset();
        let scale = self.transform.scale();
        DisplayCoord::new(ox + native.x as f64 * scale, oy + native.y as f64 * scale)
    }

    /// Maps a display point to the native pixel under it.
    ///
    /// Points left of or above the raster are rejected before truncation, so
    /// `-0.5` never collapses onto pixel 0. A value within rounding error of a
    /// pixel edge lands on that edge, so `to_native(to_display(p)) == p` holds
    /// at any scale.
    pub fn to_native(&self, display: DisplayCoord) -> Result<NativeCoord> {
        let (ox, oy) = self.transform.offset();
        let scale = self.transform.scale();
        let x = snap_to_pixel((display.x - ox) / scale);
        let y = snap_to_pixel((display.y - oy) / scale);

        let out_of_bounds = || ProbeError::OutOfBounds(x.floor() as i64, y.floor() as i64, self.width, self.height);

        if !(x.is_finite() && y.is_finite()) || x < 0.0 || y < 0.0 {
            return Err(out_of_bounds());
        }

        let (nx, ny) = (x.trunc(), y.trunc());
        if nx >= self.width as f64 || ny >= self.height as f64 {
            return Err(out_of_bounds());
        }

        Ok(NativeCoord::new(nx as u32, ny as u32))
    }
}

/// Largest distance from a whole pixel still treated as float noise.
const PIXEL_EPSILON: f64 = 1e-6;

fn snap_to_pixel(v: f64) -> f64 {
    let nearest = v.round();
    if (v - nearest).abs() <= PIXEL_EPSILON { nearest } else { v }
}
