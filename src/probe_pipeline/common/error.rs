use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Coordinate ({0}, {1}) is outside the {2}x{3} raster")]
    OutOfBounds(i64, i64, u32, u32),

    #[error("Sampling region of size {size} around ({x}, {y}) contains no pixels")]
    EmptyRegion { x: u32, y: u32, size: u32 },

    #[error("Failed to decode frame {0}: {1}")]
    DecodeFailure(usize, String),

    #[error("Failed to decode image: {0}")]
    ImageDecodeError(String),

    #[error("Raster source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Profiling cancelled after {0} of {1} frames")]
    Cancelled(usize, usize),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Failed to write output table: {0}")]
    OutputWriteError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ProbeError {
    /// Per-frame failures the temporal profiler absorbs instead of aborting.
    pub fn is_frame_local(&self) -> bool {
        matches!(self, ProbeError::DecodeFailure(..))
    }
}

pub type Result<T> = std::result::Result<T, ProbeError>;
