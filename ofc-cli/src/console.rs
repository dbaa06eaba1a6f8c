use colored::Colorize;
use ofc::{Decision, FilterOutput, Reporter, RuleSet};

/// Prints one colored line per domain to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&self, domain: &str, decision: &Decision) {
        println!("{}", trace_line(domain, decision));
    }
}

/// Formats the trace line for a single domain
pub fn trace_line(domain: &str, decision: &Decision) -> String {
    let line = format!("{}: {}", decision.label(), domain);
    match decision {
        Decision::Retained => line.green().to_string(),
        Decision::RemovedByDeny { .. } | Decision::RemovedNotAllowed => line.red().to_string(),
    }
}

/// Formats the deny rules listed before filtering starts
pub fn rule_listing(deny: &RuleSet) -> String {
    let mut listing = String::from("Disallowed rules:");
    for rule in deny.iter() {
        listing.push_str("\n- ");
        listing.push_str(&rule.to_string());
    }
    listing
}

/// Formats the end-of-run summary
pub fn summary_line(output: &FilterOutput) -> String {
    format!(
        "Processing complete! {} retained, {} removed ({} disallowed, {} not allowed)",
        output.retained_count(),
        output.removed_count(),
        output.removed_by_deny,
        output.removed_not_allowed
    )
    .green()
    .to_string()
}
