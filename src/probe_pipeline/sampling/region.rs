use crate::probe_pipeline::color::MeanRgb;
use crate::probe_pipeline::common::error::{ProbeError, Result};
use crate::probe_pipeline::raster::{NativeCoord, Raster};

/// Mean color of the square window `[c - h, c + h]` on both axes, where
/// `h = region_size / 2`.
///
/// The window is clipped to the raster, so a center near an edge averages a
/// smaller window instead of padding or wrapping. A zero `region_size`, or a
/// window lying entirely off the raster, is an `EmptyRegion` error.
pub fn average_region<R: Raster + ?Sized>(raster: &R, center: NativeCoord, region_size: u32) -> Result<MeanRgb> {
    let empty = || ProbeError::EmptyRegion {
        x: center.x,
        y: center.y,
        size: region_size,
    };

    if region_size == 0 || raster.width() == 0 || raster.height() == 0 {
        return Err(empty());
    }

    let half = (region_size / 2) as i64;
    let (cx, cy) = (center.x as i64, center.y as i64);
    let x0 = (cx - half).max(0);
    let x1 = (cx + half).min(raster.width() as i64 - 1);
    let y0 = (cy - half).max(0);
    let y1 = (cy + half).min(raster.height() as i64 - 1);

    if x0 > x1 || y0 > y1 {
        return Err(empty());
    }

    let (mut r, mut g, mut b) = (0u64, 0u64, 0u64);
    for y in y0..=y1 {
        for x in x0..=x1 {
            let px = raster.pixel_at(x as u32, y as u32);
            r += px.r as u64;
            g += px.g as u64;
            b += px.b as u64;
        }
    }

    let count = ((x1 - x0 + 1) * (y1 - y0 + 1)) as f64;
    Ok(MeanRgb::new(r as f64 / count, g as f64 / count, b as f64 / count))
}
