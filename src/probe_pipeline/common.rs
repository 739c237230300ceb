//! Common utilities module
//!
//! This module contains the error type shared across the probe pipeline.

pub mod error;

pub use error::{ProbeError, Result};
