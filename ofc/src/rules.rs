use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::trace;

use crate::errors::{FilterError, FilterResult};

/// How a `*.suffix` rule draws its boundary.
///
/// Two historical tools disagree here: one strips only the `*` and keeps the
/// dot, the other strips `*.` entirely. The difference shows up for the apex
/// domain and for lookalikes:
///
/// | domain            | `Strict` (`.example.com`) | `Loose` (`example.com`) |
/// |-------------------|---------------------------|-------------------------|
/// | `sub.example.com` | match                     | match                   |
/// | `example.com`     | no match                  | match                   |
/// | `xexample.com`    | no match                  | match                   |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WildcardMode {
    /// Suffix keeps the leading dot; only true subdomains match
    #[default]
    Strict,
    /// Suffix drops the leading dot; the apex and lookalikes match too
    Loose,
}

impl WildcardMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WildcardMode::Strict => "strict",
            WildcardMode::Loose => "loose",
        }
    }
}

impl FromStr for WildcardMode {
    type Err = FilterError;

    fn from_str(s: &str) -> FilterResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(WildcardMode::Strict),
            "loose" => Ok(WildcardMode::Loose),
            other => Err(FilterError::config_error(format!(
                "Unknown wildcard mode: {} (expected strict or loose)",
                other
            ))),
        }
    }
}

impl fmt::Display for WildcardMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Matching strategy derived from the shape of a rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleKind {
    /// Literal comparison
    Exact,
    /// `*.example.com`: domain must end with `suffix`
    Subdomain { suffix: String },
    /// `admin/*`: domain must equal `base` or start with `base/`
    Path { base: String },
}

/// A single parsed rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    text: String,
    kind: RuleKind,
}

impl Rule {
    /// Parses a raw rule line. Never fails: anything that is not a recognised
    /// wildcard shape becomes an exact rule.
    pub fn parse(raw: &str, mode: WildcardMode) -> Self {
        let text = raw.trim();

        let kind = if text.starts_with("*.") {
            let suffix = match mode {
                WildcardMode::Strict => &text[1..],
                WildcardMode::Loose => &text[2..],
            };
            RuleKind::Subdomain {
                suffix: suffix.to_string(),
            }
        } else if let Some(base) = text.strip_suffix("/*") {
            RuleKind::Path {
                base: base.to_string(),
            }
        } else {
            RuleKind::Exact
        };

        Self {
            text: text.to_string(),
            kind,
        }
    }

    /// The trimmed rule text as written
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> &RuleKind {
        &self.kind
    }

    /// Checks a domain against this rule. The domain is compared as-is.
    pub fn matches(&self, domain: &str) -> bool {
        match &self.kind {
            RuleKind::Exact => domain == self.text,
            RuleKind::Subdomain { suffix } => domain.ends_with(suffix.as_str()),
            RuleKind::Path { base } => {
                domain == base
                    || domain
                        .strip_prefix(base.as_str())
                        .is_some_and(|rest| rest.starts_with('/'))
            }
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Checks a domain against a raw rule string
pub fn match_rule(domain: &str, rule: &str, mode: WildcardMode) -> bool {
    Rule::parse(rule, mode).matches(domain)
}

/// An ordered collection of rules, parsed once and shared read-only by all
/// workers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
    mode: WildcardMode,
}

impl RuleSet {
    /// Creates a RuleSet from raw rule lines
    pub fn new<I, S>(rules: I, mode: WildcardMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            rules: rules
                .into_iter()
                .map(|r| Rule::parse(r.as_ref(), mode))
                .collect(),
            mode,
        }
    }

    /// Creates an empty RuleSet
    pub fn empty(mode: WildcardMode) -> Self {
        Self {
            rules: Vec::new(),
            mode,
        }
    }

    /// Parses an inline comma-separated list such as `a.com,*.b.com`.
    /// An empty string yields an empty set.
    pub fn from_comma_list(list: &str, mode: WildcardMode) -> Self {
        if list.is_empty() {
            return Self::empty(mode);
        }
        Self::new(list.split(','), mode)
    }

    pub fn mode(&self) -> WildcardMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Returns the first rule, in order, that matches the domain
    pub fn first_match(&self, domain: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| {
            let hit = rule.matches(domain);
            trace!("Checking domain '{}' against rule '{}': {}", domain, rule, hit);
            hit
        })
    }

    /// Whether any rule matches the domain
    pub fn matches_any(&self, domain: &str) -> bool {
        self.first_match(domain).is_some()
    }
}
