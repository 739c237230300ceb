use tracing::{debug, instrument};

use crate::probe_pipeline::color::rgb_to_hsv;
use crate::probe_pipeline::common::error::Result;
use crate::probe_pipeline::raster::Raster;
use crate::probe_pipeline::sampling::types::{LineProbe, SampleRecord, Series};

/// Samples the raster at evenly spaced steps along a line probe.
///
/// The step count is `max(|dx|, |dy|)`, or 1 when both endpoints coincide.
/// Step `i` sits at `t = i / (n - 1)`; its pixel is `start + i * (delta / (n - 1))`
/// truncated toward zero, with the last step pinned to `end`. The recorded
/// distance is `t` times the segment length, so it never decreases along the
/// series.
///
/// Both endpoints are checked against the raster before any pixel is read.
///
/// # Examples
///
/// ```
/// use chroma_probe_rs::probe_pipeline::color::Rgb;
/// use chroma_probe_rs::probe_pipeline::raster::{NativeCoord, RgbRaster};
/// use chroma_probe_rs::probe_pipeline::sampling::{sample_line, LineProbe};
///
/// let raster = RgbRaster::solid(4, 4, Rgb::new(10, 20, 30));
/// let probe = LineProbe::new(NativeCoord::new(0, 0), NativeCoord::new(3, 3));
/// let series = sample_line(&raster, &probe).unwrap();
/// assert_eq!(series.len(), 3);
/// ```
#[instrument(skip(raster), fields(width = raster.width(), height = raster.height()))]
pub fn sample_line<R: Raster + ?Sized>(raster: &R, probe: &LineProbe) -> Result<Series<SampleRecord>> {
    probe.check_within(raster.width(), raster.height())?;

    let (start, end) = (probe.start, probe.end);
    let steps = start.x.abs_diff(end.x).max(start.y.abs_diff(end.y)).max(1) as usize;
    let last = steps - 1;
    let length = probe.length();

    let (step_x, step_y) = if last == 0 {
        (0.0, 0.0)
    } else {
        (
            (end.x as f64 - start.x as f64) / last as f64,
            (end.y as f64 - start.y as f64) / last as f64,
        )
    };

    let records: Vec<SampleRecord> = (0..steps)
        .map(|i| {
            let (x, y, t) = if last == 0 {
                (start.x, start.y, 0.0)
            } else if i == last {
                (end.x, end.y, 1.0)
            } else {
                (
                    (start.x as f64 + i as f64 * step_x).trunc() as u32,
                    (start.y as f64 + i as f64 * step_y).trunc() as u32,
                    i as f64 / last as f64,
                )
            };
            let rgb = raster.pixel_at(x, y);
            SampleRecord {
                distance: t * length,
                x,
                y,
                rgb,
                hsv: rgb_to_hsv(rgb),
            }
        })
        .collect();

    debug!(samples = records.len(), length, "Line sampled");
    Ok(Series::from_records(records))
}
