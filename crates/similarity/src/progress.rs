//! Progress reporting for long similarity builds.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use tracing::info;

/// Receives progress of a similarity build.
///
/// Called from rayon worker threads when the build runs in parallel.
pub trait ProgressObserver: Send + Sync {
    fn on_start(&self, _sentences: usize, _total_pairs: u64) {}

    /// `percent` is a multiple of the configured step, rounded down.
    fn on_progress(&self, percent: u32, compared: u64, total_pairs: u64);

    fn on_finish(&self, _entries: usize, _zero_count: u64) {}
}

/// Default observer: one `tracing` event per report.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgress;

impl ProgressObserver for TracingProgress {
    fn on_start(&self, sentences: usize, total_pairs: u64) {
        info!(sentences, total_pairs, "similarity_build_started");
    }

    fn on_progress(&self, percent: u32, compared: u64, total_pairs: u64) {
        info!(percent, compared, total_pairs, "similarity_build_progress");
    }

    fn on_finish(&self, entries: usize, zero_count: u64) {
        info!(entries, zero_count, "similarity_build_compared");
    }
}

/// Observer that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentProgress;

impl ProgressObserver for SilentProgress {
    fn on_progress(&self, _percent: u32, _compared: u64, _total_pairs: u64) {}
}

/// Turns per-row pair counts into step-sized progress reports.
pub(crate) struct ProgressTracker<'o> {
    observer: &'o dyn ProgressObserver,
    total_pairs: u64,
    step_percent: u32,
    compared: AtomicU64,
    reported: AtomicU32,
}

impl<'o> ProgressTracker<'o> {
    pub(crate) fn new(observer: &'o dyn ProgressObserver, total_pairs: u64, step: f64) -> Self {
        let step_percent = ((step * 100.0).round() as u32).max(1);
        Self {
            observer,
            total_pairs,
            step_percent,
            compared: AtomicU64::new(0),
            reported: AtomicU32::new(0),
        }
    }

    pub(crate) fn start(&self, sentences: usize) {
        self.observer.on_start(sentences, self.total_pairs);
        self.observer.on_progress(0, 0, self.total_pairs);
    }

    /// Records `pairs` more comparisons and reports each step boundary crossed.
    pub(crate) fn advance(&self, pairs: u64) {
        if pairs == 0 || self.total_pairs == 0 {
            return;
        }
        let compared = self.compared.fetch_add(pairs, Ordering::Relaxed) + pairs;
        let percent = (compared.saturating_mul(100) / self.total_pairs) as u32;
        let mark = percent - percent % self.step_percent;
        let previous = self.reported.fetch_max(mark, Ordering::Relaxed);
        if mark > previous {
            self.observer.on_progress(mark, compared, self.total_pairs);
        }
    }

    pub(crate) fn finish(&self, entries: usize, zero_count: u64) {
        self.observer.on_finish(entries, zero_count);
    }
}
