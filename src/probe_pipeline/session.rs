//! Probe session
//!
//! Holds what used to be ambient UI state: the coordinate mapper of the loaded
//! raster and the most recent series. A series is only replaced after a
//! sampling pass succeeds, so a failed or cancelled probe leaves the previous
//! result intact.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{info, instrument};

use crate::probe_pipeline::color::{Hsv, Rgb, rgb_to_hsv};
use crate::probe_pipeline::common::error::{ProbeError, Result};
use crate::probe_pipeline::config::ProbeConfig;
use crate::probe_pipeline::display::{CoordinateMapper, DisplayCoord};
use crate::probe_pipeline::export::{self, CsvTableWriter, PlotConsumer, PlotData, PlotSelector, Table, TableWriter};
use crate::probe_pipeline::raster::{FrameSequence, NativeCoord, Raster};
use crate::probe_pipeline::sampling::{
    self, CancellationToken, FrameRecord, LineProbe, PointProbe, ProgressSink, SampleRecord, Series,
};

/// Result of the most recent probe
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeSeries {
    Line(Series<SampleRecord>),
    Frames(Series<FrameRecord>),
}

impl ProbeSeries {
    pub fn len(&self) -> usize {
        match self {
            ProbeSeries::Line(s) => s.len(),
            ProbeSeries::Frames(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_line(&self) -> Option<&Series<SampleRecord>> {
        match self {
            ProbeSeries::Line(s) => Some(s),
            ProbeSeries::Frames(_) => None,
        }
    }

    pub fn as_frames(&self) -> Option<&Series<FrameRecord>> {
        match self {
            ProbeSeries::Frames(s) => Some(s),
            ProbeSeries::Line(_) => None,
        }
    }

    pub fn to_table(&self) -> Table {
        match self {
            ProbeSeries::Line(s) => export::export(s),
            ProbeSeries::Frames(s) => export::export(s),
        }
    }

    pub fn plot_data(&self, selector: PlotSelector) -> Result<PlotData> {
        match self {
            ProbeSeries::Line(s) => Ok(PlotData::from_line(s, selector)),
            ProbeSeries::Frames(s) => PlotData::from_frames(s, selector),
        }
    }
}

/// Color under a single picked point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickedColor {
    pub coord: NativeCoord,
    pub rgb: Rgb,
    pub hsv: Hsv,
}

pub struct ProbeSession<W: TableWriter> {
    writer: W,
    config: ProbeConfig,
    mapper: Option<CoordinateMapper>,
    series: Option<ProbeSeries>,
}

impl ProbeSession<CsvTableWriter> {
    pub fn new(config: ProbeConfig) -> Self {
        let writer = CsvTableWriter::new(config.delimiter, config.float_precision);
        Self::with_custom(writer, config)
    }
}

impl<W: TableWriter> ProbeSession<W> {
    pub fn with_custom(writer: W, config: ProbeConfig) -> Self {
        Self {
            writer,
            config,
            mapper: None,
            series: None,
        }
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Fits a newly loaded raster into the configured viewport. Any series from
    /// the previous raster is dropped.
    pub fn load_raster<R: Raster + ?Sized>(&mut self, raster: &R) -> Result<&CoordinateMapper> {
        self.load_dimensions(raster.width(), raster.height())
    }

    /// Same as [`Self::load_raster`] for a frame sequence.
    pub fn load_frames<S: FrameSequence + ?Sized>(&mut self, frames: &S) -> Result<&CoordinateMapper> {
        let (width, height) = frames.dimensions();
        self.load_dimensions(width, height)
    }

    fn load_dimensions(&mut self, width: u32, height: u32) -> Result<&CoordinateMapper> {
        let mapper = CoordinateMapper::fit(width, height, self.config.viewport, self.config.anchor)?;
        info!(
            width,
            height,
            scale = mapper.transform().scale(),
            "Raster loaded, display scale {}%",
            (mapper.transform().scale() * 100.0) as u32
        );
        self.series = None;
        Ok(&*self.mapper.insert(mapper))
    }

    pub fn mapper(&self) -> Result<&CoordinateMapper> {
        self.mapper
            .as_ref()
            .ok_or_else(|| ProbeError::SourceUnavailable("no raster loaded".to_string()))
    }

    /// Builds a line probe from two display points.
    pub fn line_probe_at(&self, start: DisplayCoord, end: DisplayCoord) -> Result<LineProbe> {
        let mapper = self.mapper()?;
        Ok(LineProbe::new(mapper.to_native(start)?, mapper.to_native(end)?))
    }

    /// Builds a point probe from a display point, using the configured region
    /// size unless one is given.
    pub fn point_probe_at(&self, center: DisplayCoord, region_size: Option<u32>) -> Result<PointProbe> {
        let center = self.mapper()?.to_native(center)?;
        PointProbe::new(center, region_size.unwrap_or(self.config.region_size))
    }

    /// Reads the color under a display point.
    pub fn pick<R: Raster + ?Sized>(&self, raster: &R, at: DisplayCoord) -> Result<PickedColor> {
        let coord = self.mapper()?.to_native(at)?;
        self.pick_native(raster, coord)
    }

    /// Reads the color of a native pixel, without going through display space.
    pub fn pick_native<R: Raster + ?Sized>(&self, raster: &R, coord: NativeCoord) -> Result<PickedColor> {
        let coord = coord.check_within(raster.width(), raster.height())?;
        let rgb = raster.pixel_at(coord.x, coord.y);
        Ok(PickedColor {
            coord,
            rgb,
            hsv: rgb_to_hsv(rgb),
        })
    }

    /// Samples a line probe and makes the result the current series.
    #[instrument(skip(self, raster))]
    pub fn run_line<R: Raster + ?Sized>(&mut self, raster: &R, probe: &LineProbe) -> Result<&ProbeSeries> {
        let series = sampling::sample_line(raster, probe)?;
        info!(samples = series.len(), "Line probe complete");
        Ok(&*self.series.insert(ProbeSeries::Line(series)))
    }

    /// Profiles a point probe over all frames and makes the result the current
    /// series. The previous series survives errors and cancellation.
    #[instrument(skip(self, frames, progress, cancel))]
    pub fn run_profile<S: FrameSequence + ?Sized>(
        &mut self,
        frames: &mut S,
        probe: &PointProbe,
        progress: &mut dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> Result<&ProbeSeries> {
        let series = sampling::profile(frames, probe, progress, cancel)?;
        Ok(&*self.series.insert(ProbeSeries::Frames(series)))
    }

    pub fn series(&self) -> Option<&ProbeSeries> {
        self.series.as_ref()
    }

    /// Writes the current series through the session's table writer.
    pub fn export(&self, output: &mut dyn Write) -> Result<()> {
        let series = self.current()?;
        self.writer.write_table(&series.to_table(), output)
    }

    /// Creates (or truncates) `path` and writes the current series to it.
    pub fn export_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let series = self.current()?;
        let mut file = BufWriter::new(File::create(path.as_ref())?);
        self.writer.write_table(&series.to_table(), &mut file)?;
        file.flush()?;
        info!(output = %path.as_ref().display(), rows = series.len(), "Series written");
        Ok(())
    }

    /// Hands the current series to a plot consumer.
    pub fn plot(&self, selector: PlotSelector, consumer: &mut dyn PlotConsumer) -> Result<()> {
        let plot = self.current()?.plot_data(selector)?;
        consumer.render(&plot)
    }

    fn current(&self) -> Result<&ProbeSeries> {
        self.series
            .as_ref()
            .ok_or_else(|| ProbeError::InvalidParameter("no series has been sampled yet".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe_pipeline::display::Anchor;
    use crate::probe_pipeline::raster::{MemoryFrames, RgbRaster};
    use crate::probe_pipeline::sampling::NoProgress;

    fn session() -> ProbeSession<CsvTableWriter> {
        ProbeSession::new(ProbeConfig::builder().viewport(600, 400).anchor(Anchor::TopLeft).build())
    }

    fn gradient() -> RgbRaster {
        RgbRaster::from_fn(1200, 800, |x, y| Rgb::new((x % 256) as u8, (y % 256) as u8, 0))
    }

    #[derive(Default)]
    struct RecordingPlot {
        plots: Vec<PlotData>,
    }

    impl PlotConsumer for RecordingPlot {
        fn render(&mut self, plot: &PlotData) -> Result<()> {
            self.plots.push(plot.clone());
            Ok(())
        }
    }

    #[test]
    fn test_probe_requires_loaded_raster() {
        let session = session();
        let result = session.line_probe_at(DisplayCoord::new(0.0, 0.0), DisplayCoord::new(1.0, 1.0));
        assert!(matches!(result, Err(ProbeError::SourceUnavailable(_))));
    }

    #[test]
    fn test_display_points_map_to_native_line() {
        let raster = gradient();
        let mut session = session();
        assert_eq!(session.load_raster(&raster).unwrap().transform().scale(), 0.5);

        let probe = session
            .line_probe_at(DisplayCoord::new(10.0, 20.0), DisplayCoord::new(60.0, 20.0))
            .unwrap();
        assert_eq!(probe, LineProbe::new(NativeCoord::new(20, 40), NativeCoord::new(120, 40)));

        let series = session.run_line(&raster, &probe).unwrap();
        assert_eq!(series.len(), 100);
        assert_eq!(series.as_line().unwrap()[0].rgb, Rgb::new(20, 40, 0));
    }

    #[test]
    fn test_failed_probe_keeps_previous_series() {
        let raster = gradient();
        let mut session = session();
        session.load_raster(&raster).unwrap();

        let good = LineProbe::new(NativeCoord::new(0, 0), NativeCoord::new(10, 0));
        session.run_line(&raster, &good).unwrap();

        let bad = LineProbe::new(NativeCoord::new(0, 0), NativeCoord::new(5000, 0));
        assert!(session.run_line(&raster, &bad).is_err());
        assert_eq!(session.series().unwrap().len(), 10);
    }

    #[test]
    fn test_cancelled_profile_keeps_previous_series() {
        let frame = RgbRaster::solid(4, 4, Rgb::new(1, 2, 3));
        let mut frames = MemoryFrames::new(vec![frame; 6]).unwrap();
        let mut session = session();
        session.load_frames(&frames).unwrap();
        let probe = PointProbe::new(NativeCoord::new(1, 1), 3).unwrap();

        session
            .run_profile(&mut frames, &probe, &mut NoProgress, &CancellationToken::new())
            .unwrap();

        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = session.run_profile(&mut frames, &probe, &mut NoProgress, &cancel);
        assert!(matches!(result, Err(ProbeError::Cancelled(0, 6))));
        assert_eq!(session.series().unwrap().as_frames().unwrap().len(), 6);
    }

    #[test]
    fn test_loading_raster_clears_series() {
        let raster = gradient();
        let mut session = session();
        session.load_raster(&raster).unwrap();
        session
            .run_line(&raster, &LineProbe::new(NativeCoord::new(0, 0), NativeCoord::new(3, 0)))
            .unwrap();
        session.load_raster(&raster).unwrap();
        assert!(session.series().is_none());
    }

    #[test]
    fn test_pick_inside_and_outside() {
        let raster = gradient();
        let mut session = session();
        session.load_raster(&raster).unwrap();

        let picked = session.pick(&raster, DisplayCoord::new(5.5, 7.0)).unwrap();
        assert_eq!(picked.coord, NativeCoord::new(11, 14));
        assert_eq!(picked.rgb, Rgb::new(11, 14, 0));
        assert_eq!(picked.hsv, rgb_to_hsv(Rgb::new(11, 14, 0)));

        assert!(matches!(
            session.pick(&raster, DisplayCoord::new(610.0, 7.0)),
            Err(ProbeError::OutOfBounds(..))
        ));
    }

    #[test]
    fn test_pick_at_uneven_scale_hits_requested_pixel() {
        let raster = RgbRaster::from_fn(1234, 777, |x, y| Rgb::new((x % 256) as u8, (y % 256) as u8, 7));
        let mut session = ProbeSession::new(ProbeConfig::default());
        let mapper = *session.load_raster(&raster).unwrap();
        assert!(mapper.transform().scale() < 0.5);

        let target = NativeCoord::new(145, 10);
        let direct = session.pick_native(&raster, target).unwrap();
        assert_eq!(direct.coord, target);
        assert_eq!(direct.rgb, Rgb::new(145, 10, 7));

        let via_display = session.pick(&raster, mapper.to_display(target)).unwrap();
        assert_eq!(via_display, direct);

        assert!(matches!(
            session.pick_native(&raster, NativeCoord::new(1234, 0)),
            Err(ProbeError::OutOfBounds(1234, 0, 1234, 777))
        ));
    }

    #[test]
    fn test_export_to_file() {
        let raster = RgbRaster::solid(4, 4, Rgb::new(1, 2, 3));
        let mut session = session();
        session.load_raster(&raster).unwrap();
        session
            .run_line(&raster, &LineProbe::new(NativeCoord::new(0, 0), NativeCoord::new(1, 0)))
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("line.csv");
        session.export_to_file(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("distance,nativeX,nativeY,R,G,B,H,S,V\n"));
        assert_eq!(text.lines().count(), 2);

        let result = session.export_to_file(dir.path().join("missing").join("line.csv"));
        assert!(matches!(result, Err(ProbeError::IoError(_))));
    }

    #[test]
    fn test_export_and_plot_current_series() {
        let raster = RgbRaster::solid(4, 4, Rgb::new(10, 20, 30));
        let mut session = session();
        session.load_raster(&raster).unwrap();

        let mut out = Vec::new();
        assert!(matches!(session.export(&mut out), Err(ProbeError::InvalidParameter(_))));

        session
            .run_line(&raster, &LineProbe::new(NativeCoord::new(0, 0), NativeCoord::new(3, 3)))
            .unwrap();
        session.export(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "distance,nativeX,nativeY,R,G,B,H,S,V");
        assert_eq!(lines[1], "0,0,0,10,20,30,210,66,11");
        assert_eq!(lines.len(), 4);

        let mut plot = RecordingPlot::default();
        session.plot(PlotSelector::Rgb, &mut plot).unwrap();
        assert_eq!(plot.plots[0].x.len(), 3);
        assert_eq!(plot.plots[0].channels[1], ("G", vec![20.0, 20.0, 20.0]));
    }

    #[test]
    fn test_point_probe_uses_configured_region_size() {
        let raster = gradient();
        let mut session = session();
        session.load_raster(&raster).unwrap();
        let probe = session.point_probe_at(DisplayCoord::new(1.0, 1.0), None).unwrap();
        assert_eq!(probe.region_size(), 5);
        assert_eq!(probe.center(), NativeCoord::new(2, 2));
        assert!(session.point_probe_at(DisplayCoord::new(1.0, 1.0), Some(4)).is_err());
    }
}
