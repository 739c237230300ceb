//! Display coordinate mapping module
//!
//! A raster shown in a bounded viewport is scaled uniformly (never magnified)
//! and either centered or anchored at the top-left corner. This module maps
//! viewport coordinates back to native raster pixels and forward again.

mod mapper;
pub mod transform;

pub use mapper::CoordinateMapper;
pub use transform::{Anchor, DisplayCoord, DisplayTransform, Viewport};
