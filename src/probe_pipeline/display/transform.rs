//! Display transform types

use crate::probe_pipeline::common::error::{ProbeError, Result};

/// Point on the display surface, in viewport units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DisplayCoord {
    pub x: f64,
    pub y: f64,
}

impl DisplayCoord {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Where a scaled raster sits inside the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    /// Raster origin at the viewport origin
    TopLeft,
    /// Raster centered, leftover space split evenly on both sides
    #[default]
    Center,
}

/// Bounded drawing area the raster is fit into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Uniform scale plus offset placing a raster on the display surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayTransform {
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl DisplayTransform {
    pub fn new(scale: f64, offset_x: f64, offset_y: f64) -> Result<Self> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(ProbeError::InvalidParameter(format!(
                "display scale must be positive, got {}",
                scale
            )));
        }
        if !(offset_x.is_finite() && offset_y.is_finite()) {
            return Err(ProbeError::InvalidParameter(format!(
                "display offset must be finite, got ({}, {})",
                offset_x, offset_y
            )));
        }
        Ok(Self { scale, offset_x, offset_y })
    }

    /// Fits a `raster_width` x `raster_height` raster into `viewport`.
    ///
    /// The scale is `min(vw / rw, vh / rh, 1.0)`. With [`Anchor::Center`] the
    /// offset is half the unused viewport space, in whole display units.
    pub fn fit(raster_width: u32, raster_height: u32, viewport: Viewport, anchor: Anchor) -> Result<Self> {
        if raster_width == 0 || raster_height == 0 {
            return Err(ProbeError::InvalidParameter(format!(
                "cannot fit a {}x{} raster",
                raster_width, raster_height
            )));
        }
        if viewport.width == 0 || viewport.height == 0 {
            return Err(ProbeError::InvalidParameter(format!(
                "viewport {}x{} has no area",
                viewport.width, viewport.height
            )));
        }

        let scale = (viewport.width as f64 / raster_width as f64)
            .min(viewport.height as f64 / raster_height as f64)
            .min(1.0);

        let (offset_x, offset_y) = match anchor {
            Anchor::TopLeft => (0.0, 0.0),
            Anchor::Center => {
                let shown_w = (raster_width as f64 * scale) as i64;
                let shown_h = (raster_height as f64 * scale) as i64;
                (
                    ((viewport.width as i64 - shown_w) / 2) as f64,
                    ((viewport.height as i64 - shown_h) / 2) as f64,
                )
            }
        };

        Self::new(scale, offset_x, offset_y)
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn offset(&self) -> (f64, f64) {
        (self.offset_x, self.offset_y)
    }
}
