//! Clone policy flags shared by `clone` and `config`

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use clap::Args;
use fleetclone_core::{resolve, CliOverrides, CloneOptions, Config, Resolved, Toggle};

/// Flags that override the clone policy from the config file and environment
#[derive(Args, Debug, Default)]
pub struct PolicyArgs {
    /// Clone bare mirrors (default)
    #[arg(long, conflicts_with = "no_mirror")]
    mirror: bool,

    /// Clone working copies instead of mirrors
    #[arg(long)]
    no_mirror: bool,

    /// Shallow clone depth (working copies only)
    #[arg(long)]
    depth: Option<u32>,

    /// Branch to check out (working copies only)
    #[arg(short, long)]
    branch: Option<String>,

    /// Retries after a transient failure
    #[arg(long)]
    max_retries: Option<u32>,

    /// First retry delay, e.g. "2s"
    #[arg(long, value_parser = humantime::parse_duration)]
    backoff_base: Option<Duration>,

    /// Upper bound on the retry delay, e.g. "30s"
    #[arg(long, value_parser = humantime::parse_duration)]
    backoff_max: Option<Duration>,

    /// Number of clones to run at once
    #[arg(short = 'j', long)]
    concurrency: Option<usize>,

    /// Time limit for a single clone attempt, e.g. "10m"
    #[arg(long, value_parser = humantime::parse_duration)]
    clone_timeout: Option<Duration>,

    /// Reject depth/branch in mirror mode instead of ignoring them
    #[arg(long, conflicts_with = "no_strict")]
    strict: bool,

    /// Ignore depth/branch in mirror mode with a warning (default)
    #[arg(long)]
    no_strict: bool,
}

impl PolicyArgs {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            mirror: Toggle::from_flags(self.mirror, self.no_mirror),
            depth: self.depth,
            branch: self.branch.clone(),
            max_retries: self.max_retries,
            backoff_base: self.backoff_base,
            backoff_max: self.backoff_max,
            concurrency: self.concurrency,
            clone_timeout: self.clone_timeout,
            strict: Toggle::from_flags(self.strict, self.no_strict),
        }
    }
}

/// Load the config file (explicit or default) and resolve the clone policy
pub fn load_and_resolve(config_path: Option<&Path>, args: &PolicyArgs) -> anyhow::Result<(Config, Resolved)> {
    let config = match config_path {
        Some(path) => Some(Config::load_from_file(path)?),
        None => Config::load()?,
    };

    let env = CloneOptions::from_env().context("Failed to read FLEETCLONE_* environment")?;
    let resolved = resolve(
        &CloneOptions::defaults(),
        config.as_ref().map(|c| &c.clone),
        Some(&env),
        &args.overrides(),
    )?;

    Ok((config.unwrap_or_default(), resolved))
}

/// Print resolver warnings to stderr
pub fn print_warnings(resolved: &Resolved) {
    for warning in &resolved.warnings {
        eprintln!("warning: {}", warning);
    }
}
