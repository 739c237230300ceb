//! Probe session configuration

use crate::probe_pipeline::display::{Anchor, Viewport};

/// Configuration for a probe session
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Viewport the raster is fit into for display
    pub viewport: Viewport,
    /// Placement of the scaled raster inside the viewport
    pub anchor: Anchor,
    /// Default side length of the averaging window for point probes
    pub region_size: u32,
    /// Fixed number of decimals for exported floats, `None` for shortest form
    pub float_precision: Option<usize>,
    /// Column delimiter of exported tables
    pub delimiter: char,
    /// Granularity of logged progress, in percent
    pub progress_step_percent: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::new(600, 400),
            anchor: Anchor::Center,
            region_size: 5,
            float_precision: None,
            delimiter: ',',
            progress_step_percent: 10,
        }
    }
}

impl ProbeConfig {
    pub fn builder() -> ProbeConfigBuilder {
        ProbeConfigBuilder::default()
    }
}

/// Builder for ProbeConfig
#[derive(Default)]
pub struct ProbeConfigBuilder {
    viewport: Option<Viewport>,
    anchor: Option<Anchor>,
    region_size: Option<u32>,
    float_precision: Option<Option<usize>>,
    delimiter: Option<char>,
    progress_step_percent: Option<usize>,
}

impl ProbeConfigBuilder {
    pub fn viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport = Some(Viewport::new(width, height));
        self
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = Some(anchor);
        self
    }

    pub fn region_size(mut self, size: u32) -> Self {
        self.region_size = Some(size);
        self
    }

    pub fn float_precision(mut self, precision: Option<usize>) -> Self {
        self.float_precision = Some(precision);
        self
    }

    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    pub fn progress_step_percent(mut self, step: usize) -> Self {
        self.progress_step_percent = Some(step);
        self
    }

    pub fn build(self) -> ProbeConfig {
        let default = ProbeConfig::default();
        ProbeConfig {
            viewport: self.viewport.unwrap_or(default.viewport),
            anchor: self.anchor.unwrap_or(default.anchor),
            region_size: self.region_size.unwrap_or(default.region_size),
            float_precision: self.float_precision.unwrap_or(default.float_precision),
            delimiter: self.delimiter.unwrap_or(default.delimiter),
            progress_step_percent: self.progress_step_percent.unwrap_or(default.progress_step_percent),
        }
    }
}
