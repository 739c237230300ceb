//! Raster access module
//!
//! The sampling code only sees rasters through the [`Raster`] and
//! [`FrameSequence`] traits. Decoding is delegated to external crates through
//! small adapters: TIFF stills via [`TiffRasterReader`] and directories of TIFF
//! frames via [`TiffFrameSequence`].

mod reader;
mod tiff_reader;
mod frame_dir;
mod memory;
pub mod types;

pub use reader::{FrameSequence, Raster, RasterReader};
pub use tiff_reader::TiffRasterReader;
pub use frame_dir::TiffFrameSequence;
pub use memory::MemoryFrames;
pub use types::{NativeCoord, RgbRaster};
