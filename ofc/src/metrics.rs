use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

/// Tracks work distribution across pipeline workers.
///
/// Workers update the counters through a shared borrow.
#[derive(Debug, Default)]
pub struct PipelineMetrics {
    chunks_dispatched: AtomicU64,
    chunks_completed: AtomicU64,
    domains_evaluated: AtomicU64,
    domains_retained: AtomicU64,
}

impl PipelineMetrics {
    /// Creates a new PipelineMetrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a chunk handed to the worker pool
    pub fn record_dispatch(&self, chunk_index: usize, chunk_len: usize) {
        let total = self.chunks_dispatched.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(
            "Dispatched chunk {} ({} domains), {} dispatched so far",
            chunk_index, chunk_len, total
        );
    }

    /// Records a chunk a worker has finished
    pub fn record_chunk(&self, evaluated: u64, retained: u64) {
        self.chunks_completed.fetch_add(1, Ordering::Relaxed);
        self.domains_evaluated
            .fetch_add(evaluated, Ordering::Relaxed);
        self.domains_retained.fetch_add(retained, Ordering::Relaxed);
    }

    /// Gets current statistics
    pub fn get_stats(&self) -> PipelineStats {
        PipelineStats {
            chunks_dispatched: self.chunks_dispatched.load(Ordering::Relaxed),
            chunks_completed: self.chunks_completed.load(Ordering::Relaxed),
            domains_evaluated: self.domains_evaluated.load(Ordering::Relaxed),
            domains_retained: self.domains_retained.load(Ordering::Relaxed),
        }
    }

    /// Resets every counter to zero
    pub fn reset(&self) {
        self.chunks_dispatched.store(0, Ordering::Relaxed);
        self.chunks_completed.store(0, Ordering::Relaxed);
        self.domains_evaluated.store(0, Ordering::Relaxed);
        self.domains_retained.store(0, Ordering::Relaxed);
    }

    /// Logs current statistics
    pub fn log_stats(&self) {
        let stats = self.get_stats();
        info!(
            "Pipeline stats:\n\
             Chunks dispatched/completed: {}/{}\n\
             Domains evaluated: {}\n\
             Domains retained: {}",
            stats.chunks_dispatched,
            stats.chunks_completed,
            stats.domains_evaluated,
            stats.domains_retained
        );
    }
}

/// Snapshot of pipeline counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineStats {
    pub chunks_dispatched: u64,
    pub chunks_completed: u64,
    pub domains_evaluated: u64,
    pub domains_retained: u64,
}
