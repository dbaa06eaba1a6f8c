use config::{Config as ConfigBuilder, File};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::errors::FilterResult;
use crate::rules::WildcardMode;

/// Default number of pipeline workers
pub const DEFAULT_WORKER_COUNT: usize = 4;

/// Configuration for a filter run.
///
/// # Configuration Locations
///
/// Loaded from these locations, later ones overriding earlier ones:
/// 1. Global `$HOME/.config/ofc/config.yaml`
/// 2. Local `.ofc.yaml` in the current directory
/// 3. Custom config file specified via `--config` (must exist)
///
/// Command-line flags are merged on top with `merge_with_cli`.
///
/// # Configuration Format
///
/// ```yaml
/// # Inline allow rules; empty means everything is allowed
/// allow_rules:
///   - "*.example.com"
///
/// # Files with one deny rule per line
/// deny_files:
///   - "out-of-scope.txt"
///
/// # Number of concurrent workers
/// worker_count: 4
///
/// # Boundary for "*.suffix" rules: strict keeps the dot, loose drops it
/// wildcard_mode: strict
///
/// # Log level (trace, debug, info, warn, error)
/// log_level: "warn"
///
/// # Suppress the per-domain console trace
/// quiet: false
/// ```
///
/// Every field has a default, so an empty or absent file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Inline allow rules
    #[serde(default)]
    pub allow_rules: Vec<String>,

    /// Files holding deny rules, one per line
    #[serde(default)]
    pub deny_files: Vec<PathBuf>,

    /// Number of chunks and worker threads
    #[serde(default = "default_worker_count")]
    pub worker_count: NonZeroUsize,

    /// Boundary mode for subdomain wildcards
    #[serde(default)]
    pub wildcard_mode: WildcardMode,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Suppress per-domain trace output
    #[serde(default)]
    pub quiet: bool,
}

fn default_worker_count() -> NonZeroUsize {
    NonZeroUsize::new(DEFAULT_WORKER_COUNT).unwrap_or(NonZeroUsize::MIN)
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            allow_rules: Vec::new(),
            deny_files: Vec::new(),
            worker_count: default_worker_count(),
            wildcard_mode: WildcardMode::default(),
            log_level: default_log_level(),
            quiet: false,
        }
    }
}

impl FilterConfig {
    /// Loads configuration from the default locations plus an optional
    /// explicit file
    pub fn load_from(config_path: Option<&Path>) -> FilterResult<Self> {
        let mut builder = ConfigBuilder::builder();

        let defaults = [
            dirs::config_dir().map(|p| p.join("ofc/config.yaml")),
            Some(PathBuf::from(".ofc.yaml")),
        ];
        for path in defaults.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        // An explicitly requested file is required
        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        }

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Merges CLI arguments with configuration file values
    pub fn merge_with_cli(mut self, cli_config: FilterConfig) -> Self {
        // CLI values take precedence over config file values
        if !cli_config.allow_rules.is_empty() {
            self.allow_rules = cli_config.allow_rules;
        }
        if !cli_config.deny_files.is_empty() {
            self.deny_files = cli_config.deny_files;
        }
        if cli_config.worker_count != default_worker_count() {
            self.worker_count = cli_config.worker_count;
        }
        if cli_config.wildcard_mode != WildcardMode::default() {
            self.wildcard_mode = cli_config.wildcard_mode;
        }
        if cli_config.log_level != default_log_level() {
            self.log_level = cli_config.log_level;
        }
        if cli_config.quiet {
            self.quiet = true;
        }
        self
    }
}
