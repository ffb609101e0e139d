//! Running `git clone` for a single repository

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::repo::{current_branch, inspect_destination, Destination};
use crate::descriptor::RepoDescriptor;
use crate::orchestrator::{CloneOutcome, Cloner};
use crate::policy::ClonePolicy;
use crate::retry::FailureKind;
use crate::task::CloneFailure;

/// stderr fragments of connection-level problems
const NETWORK_PATTERNS: &[&str] = &[
    "connection timeout",
    "connection timed out",
    "connect to host",
    "connection refused",
    "connection reset",
    "broken pipe",
    "network is unreachable",
    "temporary failure in name resolution",
    "could not resolve hostname",
    "could not resolve host",
    "name or service not known",
    "early eof",
    "the remote end hung up unexpectedly",
    "transfer closed",
    "rpc failed",
    "kex_exchange_identification",
];

/// stderr fragments of server-side or packing hiccups
const TRANSIENT_PATTERNS: &[&str] = &[
    "fetch-pack: unable to spawn",
    "service temporarily unavailable",
    "502 bad gateway",
    "503 service unavailable",
    "504 gateway timeout",
    "pack-objects died",
    "index-pack failed",
    "protocol error: bad pack header",
];

/// stderr fragments that no retry will fix, whatever else the output says
const REJECTED_PATTERNS: &[&str] = &[
    "permission denied",
    "authentication failed",
    "access denied",
    "repository not found",
    "does not exist",
    "fatal: repository",
    "host key verification failed",
    "invalid credentials",
    "bad credentials",
];

/// Generic transport trailer git prints after any SSH failure
const REMOTE_UNREADABLE: &str = "could not read from remote repository";

/// Failures whose partial clone is left on disk for inspection
const KEEP_ON_FAILURE_PATTERNS: &[&str] = &[
    "permission denied",
    "authentication failed",
    "access denied",
    "host key verification failed",
];

/// Classify `git clone` error output
///
/// Auth and not-found rejections win over everything else, since such
/// failures often also mention the remote hanging up. Network and transient
/// patterns come next, ahead of the generic "could not read from remote
/// repository" trailer. Unknown errors are treated as permanent.
pub fn classify_error(stderr: &str) -> FailureKind {
    let lower = stderr.to_lowercase();
    let matches = |patterns: &[&str]| patterns.iter().any(|p| lower.contains(p));

    if lower.trim().is_empty() {
        FailureKind::PermanentExit
    } else if matches(REJECTED_PATTERNS) {
        FailureKind::Rejected
    } else if matches(NETWORK_PATTERNS) {
        FailureKind::Network
    } else if matches(TRANSIENT_PATTERNS) {
        FailureKind::TransientExit
    } else if lower.contains(REMOTE_UNREADABLE) {
        FailureKind::Rejected
    } else {
        FailureKind::PermanentExit
    }
}

/// Whether a failed clone's destination should be removed
pub fn should_cleanup(stderr: &str) -> bool {
    let lower = stderr.to_lowercase();
    !KEEP_ON_FAILURE_PATTERNS.iter().any(|p| lower.contains(p))
}

/// Turn `git clone` error output into a readable explanation
pub fn diagnose(stderr: &str, name: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        return "clone failed with no error output".to_string();
    }

    let lower = trimmed.to_lowercase();
    let hint = if lower.contains("permission denied") && lower.contains("publickey") {
        Some("SSH authentication failed; check that your key is loaded and authorized")
    } else if lower.contains("host key verification failed") {
        Some("SSH host key verification failed; add the host to known_hosts")
    } else if lower.contains("could not resolve host") || lower.contains("name or service not known")
    {
        Some("DNS resolution failed; check the host name and network")
    } else if lower.contains("connection refused") {
        Some("connection refused; check the port and that the service is running")
    } else if lower.contains("repository not found") || lower.contains("does not exist") {
        Some("repository not found or not accessible")
    } else if lower.contains("timed out") || lower.contains("timeout") {
        Some("connection timed out; consider raising clone_timeout")
    } else {
        None
    };

    match hint {
        Some(hint) => format!("{}: {} ({})", name, hint, last_line(trimmed)),
        None => format!("{}: {}", name, last_line(trimmed)),
    }
}

fn last_line(text: &str) -> &str {
    text.lines().rev().find(|l| !l.trim().is_empty()).unwrap_or(text).trim()
}

/// Arguments passed to `git` for one clone
pub fn clone_args(repo: &RepoDescriptor, policy: &ClonePolicy) -> Vec<String> {
    let mut args = vec![
        "clone".to_string(),
        "--no-hardlinks".to_string(),
        "--quiet".to_string(),
    ];

    if policy.mirror() {
        args.push("--mirror".to_string());
    } else {
        if let Some(depth) = policy.depth() {
            args.push("--depth".to_string());
            args.push(depth.to_string());
        }
        if let Some(branch) = policy.branch() {
            args.push("--branch".to_string());
            args.push(branch.to_string());
        }
    }

    args.push(repo.source_url.clone());
    args.push(repo.destination.to_string_lossy().into_owned());
    args
}

/// [`Cloner`] backed by the `git` command line tool
#[derive(Debug, Clone)]
pub struct GitCloner {
    git_path: String,
}

impl GitCloner {
    pub fn new() -> Self {
        Self {
            git_path: "git".to_string(),
        }
    }

    /// Use a custom path to the git executable
    pub fn with_git_path(mut self, path: impl Into<String>) -> Self {
        self.git_path = path.into();
        self
    }

    fn build_command(&self, repo: &RepoDescriptor, policy: &ClonePolicy) -> Command {
        let mut cmd = Command::new(&self.git_path);
        cmd.args(clone_args(repo, policy))
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

impl Default for GitCloner {
    fn default() -> Self {
        Self::new()
    }
}

async fn remove_partial(path: &Path) {
    if let Err(e) = tokio::fs::remove_dir_all(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!(path = %path.display(), error = %e, "Failed to remove partial clone");
        }
    }
}

#[async_trait]
impl Cloner for GitCloner {
    async fn execute(
        &self,
        repo: &RepoDescriptor,
        policy: &ClonePolicy,
        cancel: &CancellationToken,
    ) -> CloneOutcome {
        let dest = repo.destination.as_path();

        let created = match inspect_destination(dest) {
            Ok(Destination::Repository) => {
                let note = match current_branch(dest) {
                    Ok(Some(branch)) => format!("already cloned (on {})", branch),
                    _ => "already cloned".to_string(),
                };
                return CloneOutcome::Skipped(note);
            }
            Ok(Destination::Occupied(reason)) => {
                return CloneOutcome::failure(FailureKind::DestinationConflict, reason);
            }
            Ok(Destination::EmptyDir) => false,
            Ok(Destination::Missing) => true,
            Err(e) => {
                return CloneOutcome::failure(
                    FailureKind::Configuration,
                    format!("cannot inspect {}: {}", dest.display(), e),
                );
            }
        };

        if let Some(parent) = dest.parent() {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                return CloneOutcome::failure(
                    FailureKind::Configuration,
                    format!("failed to create {}: {}", parent.display(), e),
                );
            }
        }

        debug!(repo = %repo.name, url = %repo.source_url, dest = %dest.display(), "Running git clone");

        let child = match self.build_command(repo, policy).spawn() {
            Ok(child) => child,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return CloneOutcome::failure(
                    FailureKind::Configuration,
                    format!("git executable not found at '{}'", self.git_path),
                );
            }
            Err(e) => {
                return CloneOutcome::failure(
                    FailureKind::Configuration,
                    format!("failed to run git clone: {}", e),
                );
            }
        };

        let output = tokio::select! {
            output = child.wait_with_output() => output,
            _ = cancel.cancelled() => {
                if created {
                    remove_partial(dest).await;
                }
                return CloneOutcome::Failure(CloneFailure::cancelled());
            }
            _ = tokio::time::sleep(policy.clone_timeout()) => {
                if created {
                    remove_partial(dest).await;
                }
                return CloneOutcome::failure(
                    FailureKind::Timeout,
                    format!(
                        "git clone exceeded {}",
                        humantime::format_duration(policy.clone_timeout())
                    ),
                );
            }
        };

        let output = match output {
            Ok(output) => output,
            Err(e) => {
                return CloneOutcome::failure(
                    FailureKind::TransientExit,
                    format!("failed waiting for git clone: {}", e),
                );
            }
        };

        if output.status.success() {
            return CloneOutcome::Success;
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let kind = classify_error(&stderr);
        if created && should_cleanup(&stderr) {
            remove_partial(dest).await;
        }

        CloneOutcome::failure(kind, diagnose(&stderr, &repo.name))
    }
}
