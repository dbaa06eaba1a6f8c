use std::sync::Mutex;
use tracing::info;

use crate::filters::Decision;
use crate::results::FilterOutput;

/// Receives the per-domain classification trace.
///
/// `report` is called from worker threads, concurrently and in no particular
/// order, so implementations must be `Sync`. `finish` is called once, on the
/// consumer thread, after every verdict has been collected.
pub trait Reporter: Sync {
    fn report(&self, domain: &str, decision: &Decision);

    fn finish(&self, _output: &FilterOutput) {}
}

/// Reports through `tracing` only
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, domain: &str, decision: &Decision) {
        match decision {
            Decision::RemovedByDeny { rule } => {
                info!("{}: {} (rule '{}')", decision.label(), domain, rule)
            }
            _ => info!("{}: {}", decision.label(), domain),
        }
    }

    fn finish(&self, output: &FilterOutput) {
        info!(
            "Processing complete: {} retained, {} removed of {} domains",
            output.retained_count(),
            output.removed_count(),
            output.domains_processed
        );
    }
}

/// Discards the trace
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&self, _domain: &str, _decision: &Decision) {}
}

/// Keeps every trace entry in memory, mostly useful for tests and embedding
#[derive(Debug, Default)]
pub struct CollectingReporter {
    entries: Mutex<Vec<(String, Decision)>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the collected entries, in the order they were reported
    pub fn into_entries(self) -> Vec<(String, Decision)> {
        self.entries
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Reporter for CollectingReporter {
    fn report(&self, domain: &str, decision: &Decision) {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.push((domain.to_string(), decision.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_reporter() {
        let reporter = CollectingReporter::new();
        reporter.report("a.com", &Decision::Retained);
        reporter.report("b.com", &Decision::RemovedNotAllowed);

        let entries = reporter.into_entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], ("a.com".to_string(), Decision::Retained));
        assert_eq!(
            entries[1],
            ("b.com".to_string(), Decision::RemovedNotAllowed)
        );
    }

    #[test]
    fn test_reporters_are_shareable_across_threads() {
        let reporter = CollectingReporter::new();

        std::thread::scope(|s| {
            for i in 0..4 {
                let reporter = &reporter;
                s.spawn(move || {
                    for j in 0..25 {
                        reporter.report(&format!("{}-{}.com", i, j), &Decision::Retained);
                    }
                });
            }
        });

        assert_eq!(reporter.into_entries().len(), 100);
    }

    #[test]
    fn test_null_and_tracing_reporters_accept_all_decisions() {
        let decisions = [
            Decision::Retained,
            Decision::RemovedByDeny {
                rule: "*.example.com".to_string(),
            },
            Decision::RemovedNotAllowed,
        ];
        for decision in &decisions {
            NullReporter.report("x.example.com", decision);
            TracingReporter.report("x.example.com", decision);
        }
        TracingReporter.finish(&FilterOutput::new());
    }
}
