//! Clone command - discover repositories and clone them concurrently

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, ValueEnum};
use fleetclone_core::{
    AggregateResult, CloneEvent, GitCloner, Orchestrator, SourceConfig, SourceKind, Toggle,
};
use fleetclone_hosts::discovery_for;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::policy::{load_and_resolve, print_warnings, PolicyArgs};

/// Exit code for a run interrupted with Ctrl-C
const EXIT_CANCELLED: u8 = 130;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum SourceArg {
    Gerrit,
    Github,
}

impl From<SourceArg> for SourceKind {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Gerrit => SourceKind::Gerrit,
            SourceArg::Github => SourceKind::GitHub,
        }
    }
}

/// Discover repositories on a host and clone them all
#[derive(Args, Debug)]
pub struct CloneArgs {
    /// Host type
    #[arg(short, long, value_enum)]
    source: Option<SourceArg>,

    /// Host name, optionally with SSH port (gerrit.example.org:29418)
    #[arg(long)]
    host: Option<String>,

    /// GitHub organization
    #[arg(long)]
    org: Option<String>,

    /// SSH user for Gerrit clone URLs
    #[arg(long)]
    ssh_user: Option<String>,

    /// Clone over HTTPS instead of SSH
    #[arg(long, conflicts_with = "no_https")]
    https: bool,

    /// Clone over SSH even if the config file says HTTPS
    #[arg(long)]
    no_https: bool,

    /// Skip archived / read-only repositories
    #[arg(long, conflicts_with = "no_skip_archived")]
    skip_archived: bool,

    /// Include archived / read-only repositories
    #[arg(long)]
    no_skip_archived: bool,

    /// Directory to clone into (default: ./<host>)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Write the run result as JSON to this file
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// List what would be cloned without cloning
    #[arg(long)]
    dry_run: bool,

    #[command(flatten)]
    policy: PolicyArgs,
}

impl CloneArgs {
    /// Apply command line source settings over the config file's
    fn source(&self, mut source: SourceConfig) -> SourceConfig {
        if let Some(kind) = self.source {
            source.kind = kind.into();
        }
        if let Some(host) = &self.host {
            source.host = Some(host.clone());
        }
        if let Some(org) = &self.org {
            source.org = Some(org.clone());
        }
        if let Some(user) = &self.ssh_user {
            source.ssh_user = Some(user.clone());
        }
        if let Some(dir) = &self.output_dir {
            source.output_dir = Some(dir.clone());
        }
        if let Some(https) = Toggle::from_flags(self.https, self.no_https).value() {
            source.https = https;
        }
        if let Some(skip) = Toggle::from_flags(self.skip_archived, self.no_skip_archived).value() {
            source.skip_archived = skip;
        }
        source
    }

    /// Execute the clone command
    pub async fn execute(&self, config_path: Option<&Path>) -> anyhow::Result<ExitCode> {
        let (config, resolved) = load_and_resolve(config_path, &self.policy)?;
        print_warnings(&resolved);

        let source = self.source(config.source);
        if source.kind == SourceKind::Gerrit && source.host.is_none() {
            anyhow::bail!("No host given; pass --host or set [source] host in the config file");
        }

        let discovery = discovery_for(&source)?;
        let descriptors = discovery
            .discover()
            .await
            .with_context(|| format!("Failed to list repositories from {}", discovery.kind()))?;

        if descriptors.is_empty() {
            println!("No repositories found.");
            return Ok(ExitCode::SUCCESS);
        }

        if self.dry_run {
            println!("Would clone {} repositories:", descriptors.len());
            for repo in &descriptors {
                println!("  {} <- {}", repo.destination.display(), repo.source_url);
            }
            return Ok(ExitCode::SUCCESS);
        }

        let total = descriptors.len();
        info!(total, concurrency = resolved.policy.concurrency(), "Starting clone run");

        let cancel = CancellationToken::new();
        let (tx, rx) = mpsc::unbounded_channel();
        let orchestrator = Orchestrator::new(resolved.policy, Arc::new(GitCloner::new()))
            .with_cancellation(cancel.clone())
            .with_events(tx);

        let signal = tokio::spawn({
            let cancel = cancel.clone();
            async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    eprintln!("Interrupted, cancelling remaining clones...");
                    cancel.cancel();
                }
            }
        });
        let printer = tokio::spawn(print_progress(rx, total));

        let result = orchestrator.run(descriptors).await;
        drop(orchestrator);
        signal.abort();
        if let Err(e) = printer.await {
            warn!(error = %e, "Progress printer stopped unexpectedly");
        }
        let result = result?;

        print_summary(&result);

        if let Some(path) = &self.manifest {
            write_manifest(path, &result)?;
            println!("Manifest written to {}", path.display());
        }

        Ok(ExitCode::from(exit_code(&result, cancel.is_cancelled())))
    }
}

async fn print_progress(mut rx: mpsc::UnboundedReceiver<CloneEvent>, total: usize) {
    let mut done = 0usize;
    while let Some(event) = rx.recv().await {
        match event {
            CloneEvent::Started { name, attempt } if attempt > 1 => {
                println!("  ... {} (attempt {})", name, attempt);
            }
            CloneEvent::Started { .. } => {}
            CloneEvent::Retrying {
                name,
                attempt,
                delay,
                failure,
            } => {
                println!(
                    "  retry {} after attempt {} in {}: {}",
                    name,
                    attempt,
                    humantime::format_duration(delay),
                    failure
                );
            }
            CloneEvent::Finished(result) => {
                done += 1;
                let marker = if result.kind.is_failure() { "x" } else { "+" };
                println!("[{}/{}] {} {} ({})", done, total, marker, result.name, result.kind.label());
            }
        }
    }
}

fn print_summary(result: &AggregateResult) {
    let width = result
        .results
        .iter()
        .map(|r| r.name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    println!();
    println!("{:<width$}  {:<26}  {:>8}  DETAIL", "NAME", "RESULT", "ATTEMPTS");
    for entry in &result.results {
        let detail = entry.detail.as_deref().unwrap_or("");
        println!(
            "{:<width$}  {:<26}  {:>8}  {}",
            entry.name,
            entry.kind.label(),
            entry.attempts,
            detail.lines().next().unwrap_or("")
        );
    }

    let counts = &result.counts;
    println!();
    println!(
        "Total: {}  succeeded: {} (retried: {})  skipped: {}  failed: {} (cancelled: {})",
        counts.total,
        counts.succeeded,
        counts.retried,
        counts.skipped,
        counts.failed,
        counts.cancelled
    );
}

fn write_manifest(path: &Path, result: &AggregateResult) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write manifest {}", path.display()))
}

/// 0 when nothing failed, 130 when the run was cancelled, 1 otherwise
fn exit_code(result: &AggregateResult, interrupted: bool) -> u8 {
    if interrupted || result.was_cancelled() {
        EXIT_CANCELLED
    } else if result.all_succeeded() {
        0
    } else {
        1
    }
}
