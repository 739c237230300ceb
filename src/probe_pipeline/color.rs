//! Color space conversion module
//!
//! RGB pixel types and the truncating RGB to HSV conversion used by every
//! exported line sample.

mod hsv;
pub mod types;

pub use hsv::{hsv_to_rgb, rgb_to_hsv};
pub use types::{Hsv, MeanRgb, Rgb};
