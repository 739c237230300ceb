use crate::probe_pipeline::common::error::{ProbeError, Result};
use crate::probe_pipeline::raster::reader::{FrameSequence, Raster};
use crate::probe_pipeline::raster::types::RgbRaster;

/// Frame sequence over rasters already held in memory.
#[derive(Debug, Clone)]
pub struct MemoryFrames {
    frames: Vec<RgbRaster>,
    width: u32,
    height: u32,
}

impl MemoryFrames {
    /// All frames must share the dimensions of the first one.
    pub fn new(frames: Vec<RgbRaster>) -> Result<Self> {
        let (width, height) = frames
            .first()
            .map(|f| (f.width(), f.height()))
            .unwrap_or((0, 0));

        if let Some((i, f)) = frames
            .iter()
            .enumerate()
            .find(|(_, f)| (f.width(), f.height()) != (width, height))
        {
            return Err(ProbeError::InvalidParameter(format!(
                "frame {} is {}x{}, expected {}x{}",
                i,
                f.width(),
                f.height(),
                width,
                height
            )));
        }

        Ok(Self { frames, width, height })
    }
}

impl FrameSequence for MemoryFrames {
    type Frame = RgbRaster;

    fn frame_count(&self) -> usize {
        self.frames.len()
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn seek_and_read(&mut self, index: usize) -> Result<RgbRaster> {
        self.frames.get(index).cloned().ok_or_else(|| {
            ProbeError::InvalidParameter(format!(
                "frame {} requested from a {}-frame sequence",
                index,
                self.frames.len()
            ))
        })
    }
}
