//! Collection of terminal outcomes across all workers

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::warn;

use crate::retry::FailureKind;
use crate::task::TaskStatus;

/// How a repository ended up, as reported to users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    /// Cloned on the first attempt
    Succeeded,
    /// Cloned after one or more transient failures
    RetriedThenSucceeded,
    /// Destination already held a repository
    Skipped,
    /// Transient failures exhausted the retry budget
    FailedAfterRetries,
    /// Failed with a non-retryable error, or on its only allowed attempt
    FailedPermanently,
    /// Abandoned because the run was cancelled
    Cancelled,
}

impl ResultKind {
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            ResultKind::FailedAfterRetries | ResultKind::FailedPermanently | ResultKind::Cancelled
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            ResultKind::Succeeded => "ok",
            ResultKind::RetriedThenSucceeded => "ok (retried)",
            ResultKind::Skipped => "skipped",
            ResultKind::FailedAfterRetries => "failed (retries exhausted)",
            ResultKind::FailedPermanently => "failed",
            ResultKind::Cancelled => "cancelled",
        }
    }
}

/// Terminal record for one repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoResult {
    pub name: String,
    pub status: TaskStatus,
    pub kind: ResultKind,
    /// Attempts actually started
    pub attempts: u32,
    /// Kind of the last failure, if any
    pub failure: Option<FailureKind>,
    /// Diagnostic text (last error or skip reason)
    pub detail: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(default, with = "humantime_serde")]
    pub duration: Option<Duration>,
}

/// Per-kind counts over an aggregate result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    pub total: usize,
    /// Includes retried-then-succeeded
    pub succeeded: usize,
    pub retried: usize,
    pub skipped: usize,
    /// Includes cancelled
    pub failed: usize,
    pub cancelled: usize,
}

/// Final report of a run, ordered like the input descriptor list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub results: Vec<RepoResult>,
    pub counts: Counts,
}

impl AggregateResult {
    fn from_results(results: Vec<RepoResult>) -> Self {
        let mut counts = Counts {
            total: results.len(),
            ..Counts::default()
        };

        for result in &results {
            match result.kind {
                ResultKind::Succeeded => counts.succeeded += 1,
                ResultKind::RetriedThenSucceeded => {
                    counts.succeeded += 1;
                    counts.retried += 1;
                }
                ResultKind::Skipped => counts.skipped += 1,
                ResultKind::FailedAfterRetries | ResultKind::FailedPermanently => {
                    counts.failed += 1
                }
                ResultKind::Cancelled => {
                    counts.failed += 1;
                    counts.cancelled += 1;
                }
            }
        }

        Self { results, counts }
    }

    /// True when no repository ended in a failure kind
    pub fn all_succeeded(&self) -> bool {
        self.results.iter().all(|r| !r.kind.is_failure())
    }

    pub fn was_cancelled(&self) -> bool {
        self.counts.cancelled > 0
    }

    pub fn get(&self, name: &str) -> Option<&RepoResult> {
        self.results.iter().find(|r| r.name == name)
    }

    pub fn failures(&self) -> impl Iterator<Item = &RepoResult> {
        self.results.iter().filter(|r| r.kind.is_failure())
    }
}

/// Thread-safe accumulator of terminal results
///
/// `record` may be called concurrently from any worker. `summarize` is only
/// meaningful once every descriptor has reached a terminal status; earlier calls
/// return whatever has been recorded so far.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    order: Vec<String>,
    results: Mutex<HashMap<String, RepoResult>>,
}

impl ResultAggregator {
    /// Create an aggregator that reports in the order of `names`
    pub fn new(names: impl IntoIterator<Item = String>) -> Self {
        let order: Vec<String> = names.into_iter().collect();
        Self {
            results: Mutex::new(HashMap::with_capacity(order.len())),
            order,
        }
    }

    /// Store the terminal result for one repository
    ///
    /// Returns `false` and keeps the earlier entry if the name was already
    /// recorded.
    pub async fn record(&self, result: RepoResult) -> bool {
        let mut results = self.results.lock().await;
        if results.contains_key(&result.name) {
            warn!(repo = %result.name, "Ignoring duplicate terminal result");
            return false;
        }
        results.insert(result.name.clone(), result);
        true
    }

    /// Number of results recorded so far
    pub async fn len(&self) -> usize {
        self.results.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Build the aggregate result in descriptor order
    pub async fn summarize(&self) -> AggregateResult {
        let mut recorded = self.results.lock().await.clone();
        let results = self
            .order
            .iter()
            .filter_map(|name| recorded.remove(name))
            .collect();
        AggregateResult::from_results(results)
    }
}
