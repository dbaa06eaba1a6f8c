mod console;

use anyhow::{Context, Result};
use clap::Parser;
use console::{rule_listing, summary_line, ConsoleReporter};
use ofc::{
    lines::{read_lines, read_rules, write_lines},
    report::TracingReporter,
    FilterConfig, FilterPipeline, Reporter, RuleSet, WildcardMode,
};
use std::{ffi::OsString, num::NonZeroUsize, path::PathBuf};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: ofc -IL <subdomains_file> [-a <allowed_domains>] [-d <disallowed_file>] [-s <out_of_scope_file>] -o <output_file>";

#[derive(Parser, Debug)]
#[command(name = "ofc", author, version, about, long_about = None)]
struct Cli {
    /// Path to the subdomains file (also accepted as -IL)
    #[arg(short = 'i', long = "input")]
    input: Option<OsString>,

    /// Path to the output file
    #[arg(short = 'o', long = "output")]
    output: Option<OsString>,

    /// Allowed domains (comma-separated)
    #[arg(short = 'a', long = "allow")]
    allow: Option<String>,

    /// File of disallowed domain rules, one per line
    #[arg(short = 'd', long = "deny")]
    deny: Vec<PathBuf>,

    /// File of out-of-scope rules, one per line (same as --deny)
    #[arg(short = 's', long = "scope")]
    scope: Vec<PathBuf>,

    /// Boundary for "*.suffix" rules (strict|loose)
    #[arg(short = 'm', long = "wildcard")]
    wildcard: Option<String>,

    /// Number of workers
    #[arg(short = 'j', long = "workers")]
    workers: Option<NonZeroUsize>,

    /// Configuration file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Only print the summary, not every domain
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    run(normalize_args(std::env::args_os()))
}

/// Rewrites the two-letter `-IL` flag, which clap cannot express as a short
/// option, into `--input`.
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| match arg.to_str() {
            Some("-IL") | Some("--IL") => OsString::from("--input"),
            Some(s) if s.starts_with("-IL=") || s.starts_with("--IL=") => {
                let value = s.split_once('=').map(|(_, v)| v).unwrap_or_default();
                OsString::from(format!("--input={}", value))
            }
            _ => arg,
        })
        .collect()
}

fn run(args: Vec<OsString>) -> Result<()> {
    let cli = Cli::parse_from(args);

    let (input, output) = match (required_path(&cli.input), required_path(&cli.output)) {
        (Some(input), Some(output)) => (input, output),
        _ => {
            println!("{}", USAGE);
            return Ok(());
        }
    };

    let wildcard_mode = cli
        .wildcard
        .as_deref()
        .map(str::parse::<WildcardMode>)
        .transpose()?;

    let cli_config = FilterConfig {
        deny_files: cli.deny.iter().chain(cli.scope.iter()).cloned().collect(),
        quiet: cli.quiet,
        ..FilterConfig::default()
    };

    let mut config = FilterConfig::load_from(cli.config.as_deref())
        .context("Error loading configuration")?
        .merge_with_cli(cli_config);
    // Explicit flags win even when they spell out the default, and an
    // explicit empty -a clears the configured allow rules
    if let Some(list) = cli.allow.as_deref() {
        config.allow_rules = allow_list(list);
    }
    if let Some(workers) = cli.workers {
        config.worker_count = workers;
    }
    if let Some(mode) = wildcard_mode {
        config.wildcard_mode = mode;
    }

    init_tracing(&config.log_level);

    let domains = read_lines(&input).context("Error reading subdomains file")?;
    let allow = RuleSet::new(&config.allow_rules, config.wildcard_mode);
    let deny = read_rules(config.deny_files.as_slice(), config.wildcard_mode)
        .context("Error reading disallowed domains file")?;

    // Quiet runs still leave the trace in the info-level log
    let reporter: &dyn Reporter = if config.quiet {
        &TracingReporter
    } else {
        println!("{}", rule_listing(&deny));
        &ConsoleReporter
    };

    let pipeline = FilterPipeline::from_config(&config);
    let result = pipeline.run(&domains, &allow, &deny, reporter)?;

    write_lines(&output, &result.retained).context("Error writing output file")?;

    println!("\n{}", summary_line(&result));
    Ok(())
}

/// An empty path counts as not given
fn required_path(arg: &Option<OsString>) -> Option<PathBuf> {
    arg.as_ref().filter(|p| !p.is_empty()).map(PathBuf::from)
}

/// Splits the inline `-a` list; an empty string means no allow rules
fn allow_list(list: &str) -> Vec<String> {
    if list.is_empty() {
        return Vec::new();
    }
    list.split(',').map(String::from).collect()
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    // A subscriber may already be installed when embedded; keep it
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
