//! Plot data handed to an external renderer.
//!
//! Rendering is not done here. A [`PlotConsumer`] receives x values and one y
//! vector per channel, already selected from the series.

use crate::probe_pipeline::common::error::{ProbeError, Result};
use crate::probe_pipeline::sampling::{FrameRecord, SampleRecord, Series};

/// Which color channels to plot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotSelector {
    /// R, G, B (line samples) or mean R, G, B (frames)
    #[default]
    Rgb,
    /// H, S, V; line samples only
    Hsv,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotData {
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub x: Vec<f64>,
    /// `(channel name, values)`, one entry per plotted channel
    pub channels: Vec<(&'static str, Vec<f64>)>,
}

impl PlotData {
    /// Distance along the line against the selected channels.
    pub fn from_line(series: &Series<SampleRecord>, selector: PlotSelector) -> Self {
        let x = series.iter().map(|r| r.distance).collect();
        let (y_label, channels) = match selector {
            PlotSelector::Rgb => (
                "RGB",
                vec![
                    ("R", series.iter().map(|r| r.rgb.r as f64).collect()),
                    ("G", series.iter().map(|r| r.rgb.g as f64).collect()),
                    ("B", series.iter().map(|r| r.rgb.b as f64).collect()),
                ],
            ),
            PlotSelector::Hsv => (
                "HSV",
                vec![
                    ("H", series.iter().map(|r| r.hsv.h as f64).collect()),
                    ("S", series.iter().map(|r| r.hsv.s as f64).collect()),
                    ("V", series.iter().map(|r| r.hsv.v as f64).collect()),
                ],
            ),
        };

        Self {
            x_label: "distance",
            y_label,
            x,
            channels,
        }
    }

    /// Frame index against mean RGB. Only [`PlotSelector::Rgb`] applies to
    /// frame series.
    pub fn from_frames(series: &Series<FrameRecord>, selector: PlotSelector) -> Result<Self> {
        if selector != PlotSelector::Rgb {
            return Err(ProbeError::InvalidParameter(format!(
                "{:?} cannot be plotted for a frame series",
                selector
            )));
        }

        Ok(Self {
            x_label: "frameIndex",
            y_label: "mean RGB",
            x: series.iter().map(|r| r.frame_index as f64).collect(),
            channels: vec![
                ("R", series.iter().map(|r| r.mean_rgb.r).collect()),
                ("G", series.iter().map(|r| r.mean_rgb.g).collect()),
                ("B", series.iter().map(|r| r.mean_rgb.b).collect()),
            ],
        })
    }
}

/// Renders plot data. Implemented outside this crate.
pub trait PlotConsumer {
    fn render(&mut self, plot: &PlotData) -> Result<()>;
}
