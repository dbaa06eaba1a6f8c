use crossbeam::channel::{unbounded, Sender};
use rayon::ThreadPoolBuilder;
use std::num::NonZeroUsize;
use tracing::{debug, info};

use crate::config::FilterConfig;
use crate::errors::FilterResult;
use crate::filters::{classify, Decision};
use crate::metrics::PipelineMetrics;
use crate::report::Reporter;
use crate::results::FilterOutput;
use crate::rules::RuleSet;

/// One domain's verdict, sent from a worker to the consumer
#[derive(Debug)]
struct Verdict {
    domain: String,
    decision: Decision,
}

/// Size of each contiguous chunk when splitting `len` items across
/// `workers`. Never zero, so an empty input yields zero chunks.
pub fn chunk_size(len: usize, workers: NonZeroUsize) -> usize {
    len.div_ceil(workers.get()).max(1)
}

/// Splits items into at most `workers` contiguous, non-overlapping chunks;
/// only the last one may be shorter.
pub fn partition<T>(items: &[T], workers: NonZeroUsize) -> std::slice::Chunks<'_, T> {
    items.chunks(chunk_size(items.len(), workers))
}

/// Applies allow/deny rules to a domain list with a fixed pool of workers
#[derive(Debug)]
pub struct FilterPipeline {
    worker_count: NonZeroUsize,
    metrics: PipelineMetrics,
}

impl FilterPipeline {
    /// Creates a new FilterPipeline with the given worker count
    pub fn new(worker_count: NonZeroUsize) -> Self {
        Self {
            worker_count,
            metrics: PipelineMetrics::new(),
        }
    }

    /// Creates a FilterPipeline sized from configuration
    pub fn from_config(config: &FilterConfig) -> Self {
        Self::new(config.worker_count)
    }

    pub fn worker_count(&self) -> NonZeroUsize {
        self.worker_count
    }

    /// Gets the metrics of the most recent run
    pub fn metrics(&self) -> &PipelineMetrics {
        &self.metrics
    }

    /// Filters `domains`, reporting every decision to `reporter`.
    ///
    /// The retained domains come back in no particular order.
    pub fn run<R>(
        &self,
        domains: &[String],
        allow: &RuleSet,
        deny: &RuleSet,
        reporter: &R,
    ) -> FilterResult<FilterOutput>
    where
        R: Reporter + ?Sized,
    {
        info!(
            "Filtering {} domains with {} workers ({} allow rules, {} deny rules, {} wildcards)",
            domains.len(),
            self.worker_count,
            allow.len(),
            deny.len(),
            deny.mode()
        );
        self.metrics.reset();

        let pool = ThreadPoolBuilder::new()
            .num_threads(self.worker_count.get())
            .thread_name(|i| format!("ofc-worker-{}", i))
            .build()?;

        let (results, collector) = unbounded::<Verdict>();
        let metrics = &self.metrics;

        let output = pool.in_place_scope(|scope| {
            for (index, chunk) in partition(domains, self.worker_count).enumerate() {
                let results = results.clone();
                metrics.record_dispatch(index, chunk.len());
                scope.spawn(move |_| {
                    filter_chunk(chunk, allow, deny, reporter, &results, metrics);
                });
            }
            // Workers hold the remaining senders; the drain below ends when
            // the last of them finishes its chunk.
            drop(results);

            let mut output = FilterOutput::new();
            for verdict in collector.iter() {
                output.record(verdict.domain, &verdict.decision);
            }
            output
        });

        reporter.finish(&output);
        self.metrics.log_stats();
        info!(
            "Filtering complete. Retained {} of {} domains",
            output.retained_count(),
            output.domains_processed
        );

        Ok(output)
    }
}

fn filter_chunk<R>(
    chunk: &[String],
    allow: &RuleSet,
    deny: &RuleSet,
    reporter: &R,
    results: &Sender<Verdict>,
    metrics: &PipelineMetrics,
) where
    R: Reporter + ?Sized,
{
    let mut retained = 0u64;
    for domain in chunk {
        let decision = classify(domain, allow, deny);
        reporter.report(domain, &decision);
        if decision.is_retained() {
            retained += 1;
        }

        // The collector is held by the scope owner until every worker is
        // done, so the channel is never disconnected here
        let _ = results.send(Verdict {
            domain: domain.clone(),
            decision,
        });
    }
    debug!("Worker finished chunk of {} domains", chunk.len());
    metrics.record_chunk(chunk.len() as u64, retained);
}
