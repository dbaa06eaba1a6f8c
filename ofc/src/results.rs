/// This module implements the aggregated outcome of a filter run.
///
/// `FilterOutput` is owned by exactly one consumer: the pipeline's draining
/// thread. Workers never see it; they hand their verdicts over a channel and
/// the consumer records them one at a time, so no locking is needed here.
///
/// # Ordering
///
/// `retained` holds the surviving domains in the order their verdicts arrived,
/// which depends on how the worker chunks interleaved. It is a multiset of the
/// input, not a subsequence in input order. Compare results as sets:
///
/// ```rust,ignore
/// let got: HashSet<_> = output.retained.iter().collect();
/// ```
use crate::filters::Decision;

/// Represents the complete result of filtering one domain list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOutput {
    /// Domains that survived both checks, in arrival order
    pub retained: Vec<String>,
    /// Total number of domains evaluated
    pub domains_processed: usize,
    /// Domains removed because a deny rule matched
    pub removed_by_deny: usize,
    /// Domains removed because the allow-list did not admit them
    pub removed_not_allowed: usize,
}

impl FilterOutput {
    /// Creates a new empty output
    pub fn new() -> Self {
        Default::default()
    }

    /// Records the verdict for one domain
    pub fn record(&mut self, domain: String, decision: &Decision) {
        self.domains_processed += 1;
        match decision {
            Decision::Retained => self.retained.push(domain),
            Decision::RemovedByDeny { .. } => self.removed_by_deny += 1,
            Decision::RemovedNotAllowed => self.removed_not_allowed += 1,
        }
    }

    pub fn retained_count(&self) -> usize {
        self.retained.len()
    }

    pub fn removed_count(&self) -> usize {
        self.removed_by_deny + self.removed_not_allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_output_new() {
        let output = FilterOutput::new();
        assert!(output.retained.is_empty());
        assert_eq!(output.domains_processed, 0);
        assert_eq!(output.removed_count(), 0);
    }

    #[test]
    fn test_filter_output_record() {
        let mut output = FilterOutput::new();

        output.record("a.com".to_string(), &Decision::Retained);
        output.record(
            "b.example.com".to_string(),
            &Decision::RemovedByDeny {
                rule: "*.example.com".to_string(),
            },
        );
        output.record("c.org".to_string(), &Decision::RemovedNotAllowed);
        output.record("d.com".to_string(), &Decision::Retained);

        assert_eq!(output.domains_processed, 4);
        assert_eq!(output.retained, vec!["a.com", "d.com"]);
        assert_eq!(output.removed_by_deny, 1);
        assert_eq!(output.removed_not_allowed, 1);
        assert_eq!(output.retained_count() + output.removed_count(), 4);
    }
}
