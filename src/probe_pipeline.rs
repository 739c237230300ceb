//! Color probe pipeline module
//!
//! Samples color along a line across a still raster, or around a fixed point
//! across every frame of a sequence, and exports the resulting series. Raster
//! decoding, rendering and plotting stay outside and are reached through the
//! traits in [`raster`] and [`export`].

pub mod color;
pub mod common;
pub mod config;
pub mod display;
pub mod export;
pub mod raster;
pub mod sampling;
pub mod session;

pub use common::{
    ProbeError,
    Result,
};

pub use color::{
    Hsv,
    MeanRgb,
    Rgb,
    hsv_to_rgb,
    rgb_to_hsv,
};

pub use config::{
    ProbeConfig,
    ProbeConfigBuilder,
};

pub use display::{
    Anchor,
    CoordinateMapper,
    DisplayCoord,
    DisplayTransform,
    Viewport,
};

pub use raster::{
    FrameSequence,
    MemoryFrames,
    NativeCoord,
    Raster,
    RasterReader,
    RgbRaster,
    TiffFrameSequence,
    TiffRasterReader,
};

pub use sampling::{
    CancellationToken,
    FrameRecord,
    LineProbe,
    LoggingProgress,
    NoProgress,
    PointProbe,
    ProgressSink,
    SampleRecord,
    Series,
    average_region,
    profile,
    sample_line,
};

pub use export::{
    Cell,
    CsvTableWriter,
    PlotConsumer,
    PlotData,
    PlotSelector,
    Table,
    TableRecord,
    TableWriter,
};

pub use session::{
    PickedColor,
    ProbeSeries,
    ProbeSession,
};
