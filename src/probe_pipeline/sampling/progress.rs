use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::info;

/// Receives progress of a long sampling pass.
pub trait ProgressSink {
    /// Called after each frame is processed.
    ///
    /// # Arguments
    ///
    /// * `done` - Number of frames processed so far
    /// * `total` - Total number of frames in the pass
    fn on_progress(&mut self, done: usize, total: usize);
}

impl<F: FnMut(usize, usize)> ProgressSink for F {
    fn on_progress(&mut self, done: usize, total: usize) {
        self(done, total);
    }
}

/// Discards progress updates.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_progress(&mut self, _done: usize, _total: usize) {}
}

/// Logs progress every `step_percent` percent, and once at completion.
#[derive(Debug, Clone)]
pub struct LoggingProgress {
    step_percent: usize,
    next_percent: usize,
}

impl LoggingProgress {
    pub fn new(step_percent: usize) -> Self {
        let step_percent = step_percent.clamp(1, 100);
        Self {
            step_percent,
            next_percent: step_percent,
        }
    }
}

impl Default for LoggingProgress {
    fn default() -> Self {
        Self::new(10)
    }
}

impl LoggingProgress {
    /// Percent to report for this update, if a step boundary was crossed or the
    /// pass just finished.
    pub fn due(&mut self, done: usize, total: usize) -> Option<usize> {
        if total == 0 {
            return None;
        }
        let percent = done * 100 / total;
        if percent < self.next_percent && done != total {
            return None;
        }
        while self.next_percent <= percent {
            self.next_percent += self.step_percent;
        }
        Some(percent)
    }
}

impl ProgressSink for LoggingProgress {
    fn on_progress(&mut self, done: usize, total: usize) {
        if let Some(percent) = self.due(done, total) {
            info!(done, total, "Progress: {}%", percent);
        }
    }
}

/// Shared flag used to cancel a running profile from another thread.
///
/// The profiler checks it once per frame.
#[derive(Debug, Default, Clone)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emitted(step_percent: usize, total: usize) -> Vec<usize> {
        let mut progress = LoggingProgress::new(step_percent);
        (1..=total).filter_map(|done| progress.due(done, total)).collect()
    }

    #[test]
    fn test_short_pass_reports_every_crossed_step() {
        // 7 frames: every frame crosses at least one 10% boundary
        assert_eq!(emitted(10, 7), vec![14, 28, 42, 57, 71, 85, 100]);
    }

    #[test]
    fn test_long_pass_reports_once_per_step() {
        assert_eq!(emitted(10, 1000), (1..=10).map(|i| i * 10).collect::<Vec<_>>());
    }

    #[test]
    fn test_step_is_clamped() {
        assert_eq!(emitted(0, 1000), (1..=100).collect::<Vec<_>>());
        assert_eq!(emitted(250, 1000), vec![100]);
    }

    #[test]
    fn test_completion_always_reported() {
        // 3 frames at 50% steps: 33% is below the first step, 66% crosses it
        assert_eq!(emitted(50, 3), vec![66, 100]);
    }

    #[test]
    fn test_empty_pass_reports_nothing() {
        let mut progress = LoggingProgress::default();
        assert_eq!(progress.due(0, 0), None);
    }

    #[test]
    fn test_cancellation_token_is_shared() {
        let token = CancellationToken::new();
        let other = token.clone();
        assert!(!token.is_cancelled());
        other.cancel();
        assert!(token.is_cancelled());
    }
}
