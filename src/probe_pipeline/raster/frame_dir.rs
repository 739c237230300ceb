//! Frame sequence backed by a directory of TIFF frames.
//!
//! Frames are ordered by file name. Every `seek_and_read` decodes the frame
//! file from disk; nothing is cached between reads.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::probe_pipeline::common::error::{ProbeError, Result};
use crate::probe_pipeline::raster::reader::{FrameSequence, Raster, RasterReader};
use crate::probe_pipeline::raster::tiff_reader::TiffRasterReader;
use crate::probe_pipeline::raster::types::RgbRaster;

const FRAME_EXTENSIONS: [&str; 2] = ["tif", "tiff"];

pub struct TiffFrameSequence {
    dir: PathBuf,
    frames: Vec<PathBuf>,
    width: u32,
    height: u32,
    reader: TiffRasterReader,
}

impl TiffFrameSequence {
    /// Opens `dir` and learns the frame dimensions from the first frame that
    /// decodes. Frames before it stay in the sequence and fail again on read.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();

        let entries = std::fs::read_dir(&dir).map_err(|e| {
            ProbeError::SourceUnavailable(format!("{}: {}", dir.display(), e))
        })?;

        let mut frames: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && is_frame_file(path))
            .collect();
        frames.sort();

        if frames.is_empty() {
            return Err(ProbeError::SourceUnavailable(format!(
                "{}: no TIFF frames found",
                dir.display()
            )));
        }

        let reader = TiffRasterReader;
        let (width, height) = frames
            .iter()
            .enumerate()
            .find_map(|(index, path)| match read_frame(&reader, path, index) {
                Ok(frame) => Some((frame.width(), frame.height())),
                Err(e) => {
                    warn!(error = %e, "Frame unreadable while probing dimensions");
                    None
                }
            })
            .ok_or_else(|| {
                ProbeError::SourceUnavailable(format!(
                    "{}: none of {} frames could be decoded",
                    dir.display(),
                    frames.len()
                ))
            })?;

        info!(
            dir = %dir.display(),
            frames = frames.len(),
            width,
            height,
            "Opened frame directory"
        );

        Ok(Self {
            dir,
            frames,
            width,
            height,
            reader,
        })
    }
}

impl FrameSequence for TiffFrameSequence {
    type Frame = RgbRaster;

    fn frame_count(&self) -> usize {
        self.frames.len()
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn seek_and_read(&mut self, index: usize) -> Result<RgbRaster> {
        let path = self.frames.get(index).ok_or_else(|| {
            ProbeError::InvalidParameter(format!(
                "frame {} requested from a {}-frame sequence",
                index,
                self.frames.len()
            ))
        })?;

        if !self.dir.is_dir() {
            return Err(ProbeError::SourceUnavailable(format!(
                "{}: directory no longer exists",
                self.dir.display()
            )));
        }

        let frame = read_frame(&self.reader, path, index)?;

        if (frame.width(), frame.height()) != (self.width, self.height) {
            return Err(ProbeError::DecodeFailure(
                index,
                format!(
                    "frame is {}x{}, sequence is {}x{}",
                    frame.width(),
                    frame.height(),
                    self.width,
                    self.height
                ),
            ));
        }

        Ok(frame)
    }
}

fn is_frame_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| FRAME_EXTENSIONS.iter().any(|f| ext.eq_ignore_ascii_case(f)))
        .unwrap_or(false)
}

fn read_frame(reader: &TiffRasterReader, path: &Path, index: usize) -> Result<RgbRaster> {
    debug!("Reading frame {} from {}", index, path.display());
    let bytes = std::fs::read(path)
        .map_err(|e| ProbeError::DecodeFailure(index, format!("{}: {}", path.display(), e)))?;
    reader.read_raster(&bytes).map_err(|e| match e {
        ProbeError::ImageDecodeError(reason) => ProbeError::DecodeFailure(index, reason),
        other => ProbeError::DecodeFailure(index, other.to_string()),
    })
}
