//! Probe and series types

use std::ops::Index;
use std::slice::Iter;

use crate::probe_pipeline::color::{Hsv, MeanRgb, Rgb};
use crate::probe_pipeline::common::error::{ProbeError, Result};
use crate::probe_pipeline::raster::NativeCoord;

/// Line segment between two native pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineProbe {
    pub start: NativeCoord,
    pub end: NativeCoord,
}

impl LineProbe {
    pub const fn new(start: NativeCoord, end: NativeCoord) -> Self {
        Self { start, end }
    }

    /// Rejects the probe if either endpoint falls outside the raster.
    pub fn check_within(&self, width: u32, height: u32) -> Result<()> {
        self.start.check_within(width, height)?;
        self.end.check_within(width, height)?;
        Ok(())
    }

    /// Euclidean length of the segment in native pixels.
    pub fn length(&self) -> f64 {
        let dx = self.end.x as f64 - self.start.x as f64;
        let dy = self.end.y as f64 - self.start.y as f64;
        dx.hypot(dy)
    }
}

/// Fixed point with a square averaging region around it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointProbe {
    center: NativeCoord,
    region_size: u32,
}

impl PointProbe {
    /// `region_size` is the side of the square window and must be positive
    /// and odd so the window is centered on the probe pixel.
    pub fn new(center: NativeCoord, region_size: u32) -> Result<Self> {
        if region_size == 0 {
            return Err(ProbeError::EmptyRegion {
                x: center.x,
                y: center.y,
                size: region_size,
            });
        }
        if region_size % 2 == 0 {
            return Err(ProbeError::InvalidParameter(format!(
                "region size must be odd, got {}",
                region_size
            )));
        }
        Ok(Self { center, region_size })
    }

    pub fn center(&self) -> NativeCoord {
        self.center
    }

    pub fn region_size(&self) -> u32 {
        self.region_size
    }
}

/// One sample along a line probe
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRecord {
    /// Distance from the probe start, in native pixels
    pub distance: f64,
    pub x: u32,
    pub y: u32,
    pub rgb: Rgb,
    pub hsv: Hsv,
}

/// Mean color of the probe region in one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRecord {
    pub frame_index: usize,
    pub mean_rgb: MeanRgb,
}

/// Ordered, immutable sampling output.
///
/// A series is produced whole by one sampling pass and never edited
/// afterwards; a new probe yields a new series.
#[derive(Debug, Clone, PartialEq)]
pub struct Series<R> {
    records: Vec<R>,
}

impl<R> Series<R> {
    pub(crate) fn from_records(records: Vec<R>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, R> {
        self.records.iter()
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }
}

impl<R> Default for Series<R> {
    fn default() -> Self {
        Self { records: Vec::new() }
    }
}

impl<R> Index<usize> for Series<R> {
    type Output = R;

    fn index(&self, index: usize) -> &R {
        &self.records[index]
    }
}

impl<'a, R> IntoIterator for &'a Series<R> {
    type Item = &'a R;
    type IntoIter = Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl Series<FrameRecord> {
    /// Looks a record up by frame index. Decode gaps mean position and frame
    /// index can differ.
    pub fn by_frame(&self, frame_index: usize) -> Option<&FrameRecord> {
        self.records
            .binary_search_by_key(&frame_index, |r| r.frame_index)
            .ok()
            .map(|i| &self.records[i])
    }

    pub fn frame_indices(&self) -> Vec<usize> {
        self.records.iter().map(|r| r.frame_index).collect()
    }
}
