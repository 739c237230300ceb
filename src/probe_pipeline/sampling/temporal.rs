use tracing::{info, instrument, warn};

use crate::probe_pipeline::common::error::{ProbeError, Result};
use crate::probe_pipeline::raster::FrameSequence;
use crate::probe_pipeline::sampling::progress::{CancellationToken, ProgressSink};
use crate::probe_pipeline::sampling::region::average_region;
use crate::probe_pipeline::sampling::types::{FrameRecord, PointProbe, Series};

/// Averages the probe region in every frame of `frames`, in frame order.
///
/// Frames that fail to decode are left out of the series, so records must be
/// keyed by `frame_index` rather than by position. Any other error aborts the
/// pass. `cancel` is checked before each frame and `progress` is told after
/// each one; on cancellation the partial series is dropped and
/// `ProbeError::Cancelled` is returned.
#[instrument(
    skip(frames, progress, cancel),
    fields(center = ?probe.center(), region_size = probe.region_size(), frames = frames.frame_count())
)]
pub fn profile<S: FrameSequence + ?Sized>(
    frames: &mut S,
    probe: &PointProbe,
    progress: &mut dyn ProgressSink,
    cancel: &CancellationToken,
) -> Result<Series<FrameRecord>> {
    let (width, height) = frames.dimensions();
    probe.center().check_within(width, height)?;

    let total = frames.frame_count();
    info!("Starting temporal profile over {} frames", total);

    let mut records = Vec::with_capacity(total);
    let mut skipped = 0usize;

    for index in 0..total {
        if cancel.is_cancelled() {
            warn!(done = index, total, "Temporal profile cancelled");
            return Err(ProbeError::Cancelled(index, total));
        }

        match frames.seek_and_read(index) {
            Ok(frame) => {
                let mean_rgb = average_region(&frame, probe.center(), probe.region_size())?;
                records.push(FrameRecord {
                    frame_index: index,
                    mean_rgb,
                });
            }
            Err(e) if e.is_frame_local() => {
                skipped += 1;
                warn!(frame = index, error = %e, "Skipping unreadable frame");
            }
            Err(e) => return Err(e),
        }

        progress.on_progress(index + 1, total);
    }

    info!(records = records.len(), skipped, "Temporal profile complete");
    Ok(Series::from_records(records))
}
