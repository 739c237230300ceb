//! Color sampling module
//!
//! Spatial sampling along a line probe and temporal sampling of a point probe
//! across every frame of a sequence. Each run produces a fresh, immutable
//! [`Series`].

mod line;
mod region;
mod temporal;
mod progress;
pub mod types;

pub use line::sample_line;
pub use region::average_region;
pub use temporal::profile;
pub use progress::{CancellationToken, LoggingProgress, NoProgress, ProgressSink};
pub use types::{FrameRecord, LineProbe, PointProbe, SampleRecord, Series};
