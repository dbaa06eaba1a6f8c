pub mod config;
pub mod errors;
pub mod filters;
pub mod lines;
pub mod metrics;
pub mod pipeline;
pub mod report;
pub mod results;
pub mod rules;

pub use config::FilterConfig;
pub use errors::{FilterError, FilterResult};
pub use filters::{classify, is_allowed, is_disallowed, Decision};
pub use pipeline::FilterPipeline;
pub use report::Reporter;
pub use results::FilterOutput;
pub use rules::{match_rule, Rule, RuleSet, WildcardMode};
