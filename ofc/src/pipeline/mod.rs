/// This module implements the concurrent filter pipeline.
///
/// # Fan-out / Fan-in
///
/// The input is cut into at most `worker_count` contiguous chunks. Each chunk
/// becomes one task on a dedicated rayon pool; tasks run to completion on
/// their own and share the allow/deny rule sets by plain reference, since
/// nothing mutates them after construction.
///
/// ```text
///              ┌─ chunk 0 ─ worker ─┐
/// domains ─────┼─ chunk 1 ─ worker ─┼──> channel ──> consumer ──> FilterOutput
///              └─ chunk N ─ worker ─┘
/// ```
///
/// Every worker owns a clone of the channel's sender and reports each verdict
/// through it. The calling thread is the single consumer: it drains the
/// channel until the last worker drops its sender, which only happens once
/// every chunk has been fully evaluated. Workers never touch the output.
///
/// # Ordering
///
/// None. Retained domains arrive in whatever interleaving the chunks finish
/// in. The *set* of retained domains is identical for any worker count.
///
/// # Errors
///
/// Matching cannot fail. The only error a run can produce is failing to build
/// the worker pool, which happens before any work is dispatched.
pub mod engine;

pub use engine::{chunk_size, partition, FilterPipeline};
