//! Per-repository clone task state machine
//!
//! ```text
//! Pending -> Running -> Succeeded
//!                    -> FailedRetryable -> Pending
//!                    -> FailedTerminal
//! ```
//!
//! Cancellation moves any non-terminal task straight to `FailedTerminal`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::{RepoResult, ResultKind};
use crate::descriptor::RepoDescriptor;
use crate::retry::FailureKind;

/// Lifecycle status of a clone task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Waiting in the queue
    #[default]
    Pending,
    /// Held by a worker, clone in progress
    Running,
    /// Clone finished (or was already present)
    Succeeded,
    /// Last attempt failed, another one is scheduled
    FailedRetryable,
    /// No further attempts will be made
    FailedTerminal,
}

impl TaskStatus {
    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Succeeded | TaskStatus::FailedTerminal)
    }

    /// Whether moving from `self` to `next` is a legal transition
    pub fn can_transition_to(&self, next: TaskStatus) -> bool {
        use TaskStatus::*;
        matches!(
            (self, next),
            (Pending, Running)
                | (Running, Succeeded)
                | (Running, FailedRetryable)
                | (Running, FailedTerminal)
                | (FailedRetryable, Pending)
                | (Pending, FailedTerminal)
                | (FailedRetryable, FailedTerminal)
        )
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Running => "running",
            TaskStatus::Succeeded => "succeeded",
            TaskStatus::FailedRetryable => "failed (retrying)",
            TaskStatus::FailedTerminal => "failed",
        };
        f.write_str(s)
    }
}

/// A failed attempt as reported by the clone collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloneFailure {
    pub kind: FailureKind,
    pub detail: String,
}

impl CloneFailure {
    pub fn new(kind: FailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    pub fn cancelled() -> Self {
        Self::new(FailureKind::Cancelled, "cancelled")
    }
}

impl std::fmt::Display for CloneFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.detail)
    }
}

/// The mutable execution record for one repository
///
/// A task is owned by exactly one party at a time: the queue, a worker, or a
/// pending backoff timer. It is moved between them, never shared.
#[derive(Debug)]
pub struct CloneTask {
    repo: Arc<RepoDescriptor>,
    status: TaskStatus,
    attempts: u32,
    last_error: Option<CloneFailure>,
    note: Option<String>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
}

impl CloneTask {
    pub fn new(repo: Arc<RepoDescriptor>) -> Self {
        Self {
            repo,
            status: TaskStatus::Pending,
            attempts: 0,
            last_error: None,
            note: None,
            started_at: None,
            finished_at: None,
        }
    }

    pub fn repo(&self) -> &Arc<RepoDescriptor> {
        &self.repo
    }

    pub fn name(&self) -> &str {
        &self.repo.name
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    /// Number of attempts started so far
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn last_error(&self) -> Option<&CloneFailure> {
        self.last_error.as_ref()
    }

    fn transition(&mut self, next: TaskStatus) {
        debug_assert!(
            self.status.can_transition_to(next),
            "invalid task transition {:?} -> {:?}",
            self.status,
            next
        );
        tracing::trace!(repo = %self.repo.name, from = ?self.status, to = ?next, "Task transition");
        self.status = next;
        if next.is_terminal() {
            self.finished_at = Some(Utc::now());
        }
    }

    /// Begin a new attempt
    pub fn start(&mut self) {
        self.transition(TaskStatus::Running);
        self.attempts += 1;
        self.started_at.get_or_insert_with(Utc::now);
    }

    /// Zero-based index of the attempt currently running or last run
    pub fn attempt_index(&self) -> u32 {
        self.attempts.saturating_sub(1)
    }

    pub fn succeed(&mut self) {
        self.transition(TaskStatus::Succeeded);
    }

    /// Finish without cloning because the destination is already usable
    pub fn skip(&mut self, reason: impl Into<String>) {
        self.note = Some(reason.into());
        self.transition(TaskStatus::Succeeded);
    }

    /// Record a failed attempt that will be retried
    pub fn fail_retryable(&mut self, failure: CloneFailure) {
        self.last_error = Some(failure);
        self.transition(TaskStatus::FailedRetryable);
    }

    /// Record a failure after which no attempt follows
    pub fn fail_terminal(&mut self, failure: CloneFailure) {
        self.last_error = Some(failure);
        self.transition(TaskStatus::FailedTerminal);
    }

    /// Put a retryable task back in line
    pub fn requeue(&mut self) {
        self.transition(TaskStatus::Pending);
    }

    /// Abandon the task because the run is being cancelled
    pub fn cancel(&mut self) {
        self.fail_terminal(CloneFailure::cancelled());
    }

    fn result_kind(&self) -> ResultKind {
        match (self.status, &self.last_error) {
            (TaskStatus::Succeeded, _) if self.note.is_some() => ResultKind::Skipped,
            (TaskStatus::Succeeded, _) if self.attempts > 1 => ResultKind::RetriedThenSucceeded,
            (TaskStatus::Succeeded, _) => ResultKind::Succeeded,
            (_, Some(failure)) if failure.kind == FailureKind::Cancelled => ResultKind::Cancelled,
            (_, Some(failure)) if failure.kind.is_retryable() && self.attempts > 1 => {
                ResultKind::FailedAfterRetries
            }
            _ => ResultKind::FailedPermanently,
        }
    }

    /// Fold a terminal task into its result entry
    pub fn into_result(self) -> RepoResult {
        debug_assert!(self.status.is_terminal());
        let kind = self.result_kind();
        let duration = match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => (end - start).to_std().ok(),
            _ => None,
        };
        let detail = self
            .note
            .or_else(|| self.last_error.as_ref().map(|e| e.detail.clone()));

        RepoResult {
            name: self.repo.name.clone(),
            status: self.status,
            kind,
            attempts: self.attempts,
            failure: self.last_error.map(|e| e.kind),
            detail,
            started_at: self.started_at,
            finished_at: self.finished_at,
            duration,
        }
    }
}
