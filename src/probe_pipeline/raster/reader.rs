use crate::probe_pipeline::color::Rgb;
use crate::probe_pipeline::common::error::Result;
use crate::probe_pipeline::raster::types::RgbRaster;

/// Read access to a single still raster.
///
/// `pixel_at` is only called with coordinates inside `[0, width) x [0, height)`;
/// callers check bounds first.
pub trait Raster {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn pixel_at(&self, x: u32, y: u32) -> Rgb;
}

/// A finite, randomly seekable sequence of frames.
///
/// Seeking and reading mutate the underlying handle, so reads take `&mut self`
/// and a sequence can never serve two sampling passes at once.
pub trait FrameSequence {
    type Frame: Raster;

    fn frame_count(&self) -> usize;

    /// Frame dimensions as `(width, height)`, cached when the sequence was opened.
    fn dimensions(&self) -> (u32, u32);

    /// Seeks to `index` and decodes that frame.
    ///
    /// Returns `ProbeError::DecodeFailure` when only this frame is unreadable and
    /// `ProbeError::SourceUnavailable` when the whole source is gone.
    fn seek_and_read(&mut self, index: usize) -> Result<Self::Frame>;
}

/// Decodes an encoded still image into an owned raster.
///
/// Undecodable input is reported as `ProbeError::ImageDecodeError`; frame
/// sources attach their frame index when they rewrap it.
pub trait RasterReader {
    fn read_raster(&self, data: &[u8]) -> Result<RgbRaster>;
}
