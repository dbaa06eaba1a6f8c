/// This module implements the per-domain decision policy.
///
/// # Policy
///
/// A domain is retained iff it is *not* disallowed and it *is* allowed:
///
/// 1. **Deny first** - any matching deny rule removes the domain, even when an
///    allow rule matches too.
/// 2. **Allow second** - an empty allow-list is open; a non-empty one admits
///    only domains matching at least one rule.
///
/// ```rust,ignore
/// let allow = RuleSet::from_comma_list("*.example.com", WildcardMode::Strict);
/// let deny = RuleSet::new(["internal.example.com"], WildcardMode::Strict);
///
/// assert_eq!(classify("www.example.com", &allow, &deny), Decision::Retained);
/// assert!(classify("internal.example.com", &allow, &deny).is_removed());
/// ```
///
/// Like the rule matcher, these are plain functions over borrowed rule sets,
/// so any number of workers can call them concurrently.
use std::fmt;

use crate::rules::RuleSet;

/// Outcome of running one domain through the policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Survived both checks
    Retained,
    /// Matched a deny rule; carries the first matching rule
    RemovedByDeny { rule: String },
    /// Allow-list is non-empty and nothing in it matched
    RemovedNotAllowed,
}

impl Decision {
    pub fn is_retained(&self) -> bool {
        matches!(self, Decision::Retained)
    }

    pub fn is_removed(&self) -> bool {
        !self.is_retained()
    }

    /// Short label used by console and log output
    pub fn label(&self) -> &'static str {
        match self {
            Decision::Retained => "Retained",
            Decision::RemovedByDeny { .. } => "Removed (Disallowed)",
            Decision::RemovedNotAllowed => "Removed (Not Allowed)",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// True when the allow-list is empty or any of its rules match
pub fn is_allowed(domain: &str, allow: &RuleSet) -> bool {
    allow.is_empty() || allow.matches_any(domain)
}

/// True when any deny rule matches; an empty deny-list disallows nothing
pub fn is_disallowed(domain: &str, deny: &RuleSet) -> bool {
    deny.matches_any(domain)
}

/// Applies the deny-then-allow policy to a single domain
pub fn classify(domain: &str, allow: &RuleSet, deny: &RuleSet) -> Decision {
    if let Some(rule) = deny.first_match(domain) {
        return Decision::RemovedByDeny {
            rule: rule.text().to_string(),
        };
    }
    if !is_allowed(domain, allow) {
        return Decision::RemovedNotAllowed;
    }
    Decision::Retained
}

/// Determines if a domain should appear in the output
pub fn should_retain(domain: &str, allow: &RuleSet, deny: &RuleSet) -> bool {
    !is_disallowed(domain, deny) && is_allowed(domain, allow)
}
