//! Concurrent clone orchestration
//!
//! A fixed pool of workers pulls [`CloneTask`]s from one shared queue, hands
//! each attempt to a [`Cloner`], and either finalizes the task or schedules a
//! delayed requeue. Backoff waits run on their own timer tasks, so a worker is
//! never parked while other repositories are ready.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::aggregate::{AggregateResult, RepoResult, ResultAggregator};
use crate::descriptor::{ensure_unique_names, RepoDescriptor};
use crate::policy::ClonePolicy;
use crate::retry::{FailureKind, RetryDecision, RetryPolicy};
use crate::task::{CloneFailure, CloneTask};
use crate::Result;

/// How long a cancelled attempt may take to wind down before it is aborted
const ABORT_GRACE: Duration = Duration::from_secs(5);

/// What a single clone attempt produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloneOutcome {
    /// The repository was cloned
    Success,
    /// Nothing to do; the destination already holds the repository
    Skipped(String),
    /// The attempt failed
    Failure(CloneFailure),
}

impl CloneOutcome {
    pub fn failure(kind: FailureKind, detail: impl Into<String>) -> Self {
        CloneOutcome::Failure(CloneFailure::new(kind, detail))
    }
}

/// Performs one clone attempt for one repository
///
/// Implementations own all argument construction for the underlying tool.
/// They should stop promptly once `cancel` fires; the orchestrator also aborts
/// attempts that outlive the policy's clone timeout.
#[async_trait]
pub trait Cloner: Send + Sync {
    async fn execute(
        &self,
        repo: &RepoDescriptor,
        policy: &ClonePolicy,
        cancel: &CancellationToken,
    ) -> CloneOutcome;
}

/// Progress notifications emitted while a run is in flight
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloneEvent {
    /// An attempt began
    Started { name: String, attempt: u32 },
    /// An attempt failed and will be retried after `delay`
    Retrying {
        name: String,
        attempt: u32,
        delay: Duration,
        failure: CloneFailure,
    },
    /// The repository reached a terminal status
    Finished(RepoResult),
}

/// Drives a full run: one task per descriptor, bounded concurrency
pub struct Orchestrator {
    policy: Arc<ClonePolicy>,
    cloner: Arc<dyn Cloner>,
    cancel: CancellationToken,
    events: Option<mpsc::UnboundedSender<CloneEvent>>,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("policy", &self.policy)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}

impl Orchestrator {
    /// Create an orchestrator for a resolved policy
    pub fn new(policy: ClonePolicy, cloner: Arc<dyn Cloner>) -> Self {
        Self {
            policy: Arc::new(policy),
            cloner,
            cancel: CancellationToken::new(),
            events: None,
        }
    }

    /// Use an externally owned cancellation token
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Stream progress events to `events`
    pub fn with_events(mut self, events: mpsc::UnboundedSender<CloneEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// Token that cancels the run when triggered
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn policy(&self) -> &ClonePolicy {
        &self.policy
    }

    /// Clone every descriptor and return once all of them are terminal
    ///
    /// Fails only when descriptor names are not unique; this is checked
    /// before any clone starts. If the run is cancelled, pending repositories
    /// are reported as cancelled and the partial result is returned.
    pub async fn run(&self, descriptors: Vec<RepoDescriptor>) -> Result<AggregateResult> {
        ensure_unique_names(&descriptors)?;

        let aggregator = ResultAggregator::new(descriptors.iter().map(|d| d.name.clone()));
        let total = descriptors.len();
        if total == 0 {
            return Ok(aggregator.summarize().await);
        }

        let (sender, receiver) = mpsc::unbounded_channel();
        for descriptor in descriptors {
            // The receiver is alive, so sending cannot fail here.
            let _ = sender.send(CloneTask::new(Arc::new(descriptor)));
        }

        let shared = Arc::new(Shared {
            policy: Arc::clone(&self.policy),
            retry: self.policy.retry_policy(),
            cloner: Arc::clone(&self.cloner),
            cancel: self.cancel.clone(),
            events: self.events.clone(),
            aggregator,
            queue: Mutex::new(receiver),
            requeue: Mutex::new(Some(sender)),
            remaining: AtomicUsize::new(total),
        });

        let workers = self.policy.concurrency().get();
        info!(repos = total, workers, "Starting clone run");

        let mut pool = JoinSet::new();
        for id in 0..workers {
            pool.spawn(worker_loop(Arc::clone(&shared), id));
        }

        while let Some(joined) = pool.join_next().await {
            if let Err(e) = joined {
                error!(error = %e, "Clone worker terminated abnormally");
            }
        }

        let summary = shared.aggregator.summarize().await;
        info!(
            succeeded = summary.counts.succeeded,
            skipped = summary.counts.skipped,
            failed = summary.counts.failed,
            cancelled = summary.counts.cancelled,
            "Clone run finished"
        );
        Ok(summary)
    }
}

/// State shared by all workers of one run
struct Shared {
    policy: Arc<ClonePolicy>,
    retry: RetryPolicy,
    cloner: Arc<dyn Cloner>,
    cancel: CancellationToken,
    events: Option<mpsc::UnboundedSender<CloneEvent>>,
    aggregator: ResultAggregator,
    queue: Mutex<mpsc::UnboundedReceiver<CloneTask>>,
    /// Dropped once every task is terminal, which closes the queue
    requeue: Mutex<Option<mpsc::UnboundedSender<CloneTask>>>,
    remaining: AtomicUsize,
}

impl Shared {
    fn emit(&self, event: CloneEvent) {
        if let Some(ref events) = self.events {
            let _ = events.send(event);
        }
    }

    async fn next_task(&self) -> Option<CloneTask> {
        self.queue.lock().await.recv().await
    }

    /// Run one attempt under the clone timeout and the run's cancellation
    async fn attempt(&self, task: &CloneTask) -> CloneOutcome {
        let cloner = Arc::clone(&self.cloner);
        let policy = Arc::clone(&self.policy);
        let repo = Arc::clone(task.repo());
        let attempt_cancel = self.cancel.child_token();
        let token = attempt_cancel.clone();

        let mut handle =
            tokio::spawn(async move { cloner.execute(&repo, &policy, &token).await });

        let timeout = self.policy.clone_timeout();
        let timed_out = tokio::select! {
            biased;
            joined = &mut handle => {
                return match joined {
                    Ok(outcome) => outcome,
                    Err(e) => CloneOutcome::failure(
                        FailureKind::PermanentExit,
                        format!("clone attempt aborted: {}", e),
                    ),
                };
            }
            _ = self.cancel.cancelled() => false,
            _ = tokio::time::sleep(timeout) => true,
        };

        // Let the collaborator clean up before it is torn down
        attempt_cancel.cancel();
        if tokio::time::timeout(ABORT_GRACE, &mut handle).await.is_err() {
            debug!(repo = %task.name(), "Clone attempt ignored cancellation, aborting");
            handle.abort();
        }

        if timed_out {
            CloneOutcome::failure(
                FailureKind::Timeout,
                format!("clone exceeded {}", humantime::format_duration(timeout)),
            )
        } else {
            CloneOutcome::Failure(CloneFailure::cancelled())
        }
    }

    /// Hand a retryable task to a timer that puts it back on the queue
    async fn schedule_retry(&self, mut task: CloneTask, delay: Duration) {
        let sender = self.requeue.lock().await.clone();
        let Some(sender) = sender else {
            error!(repo = %task.name(), "Work queue closed with a task still pending");
            task.cancel();
            self.finalize(task).await;
            return;
        };

        let cancel = self.cancel.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = cancel.cancelled() => {}
            }
            task.requeue();
            if sender.send(task).is_err() {
                error!("Work queue receiver dropped before retry");
            }
        });
    }

    async fn finalize(&self, task: CloneTask) {
        let result = task.into_result();

        if result.kind.is_failure() {
            warn!(
                repo = %result.name,
                attempts = result.attempts,
                kind = result.kind.label(),
                detail = result.detail.as_deref().unwrap_or(""),
                "Repository failed"
            );
        } else {
            info!(
                repo = %result.name,
                attempts = result.attempts,
                kind = result.kind.label(),
                "Repository done"
            );
        }

        self.aggregator.record(result.clone()).await;
        self.emit(CloneEvent::Finished(result));

        if self.remaining.fetch_sub(1, Ordering::AcqRel) == 1 {
            debug!("All repositories terminal, closing work queue");
            self.requeue.lock().await.take();
        }
    }
}

async fn worker_loop(shared: Arc<Shared>, id: usize) {
    debug!(worker = id, "Clone worker started");

    while let Some(mut task) = shared.next_task().await {
        if shared.cancel.is_cancelled() {
            task.cancel();
            shared.finalize(task).await;
            continue;
        }

        task.start();
        shared.emit(CloneEvent::Started {
            name: task.name().to_string(),
            attempt: task.attempts(),
        });
        debug!(worker = id, repo = %task.name(), attempt = task.attempts(), "Cloning");

        match shared.attempt(&task).await {
            CloneOutcome::Success => {
                task.succeed();
                shared.finalize(task).await;
            }
            CloneOutcome::Skipped(reason) => {
                task.skip(reason);
                shared.finalize(task).await;
            }
            CloneOutcome::Failure(failure) => {
                match shared.retry.decide(task.attempt_index(), failure.kind) {
                    RetryDecision::Retry { after } => {
                        warn!(
                            repo = %task.name(),
                            attempt = task.attempts(),
                            delay = ?after,
                            error = %failure,
                            "Clone failed, retrying"
                        );
                        shared.emit(CloneEvent::Retrying {
                            name: task.name().to_string(),
                            attempt: task.attempts(),
                            delay: after,
                            failure: failure.clone(),
                        });
                        task.fail_retryable(failure);
                        shared.schedule_retry(task, after).await;
                    }
                    RetryDecision::Stop => {
                        task.fail_terminal(failure);
                        shared.finalize(task).await;
                    }
                }
            }
        }
    }

    debug!(worker = id, "Clone worker exiting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::ResultKind;
    use crate::config::{resolve, CliOverrides, CloneOptions};
    use crate::task::TaskStatus;
    use crate::Error;
    use std::collections::HashMap;
    use std::sync::Mutex as StdMutex;

    fn policy(max_retries: u32, concurrency: usize) -> ClonePolicy {
        let cli = CliOverrides {
            max_retries: Some(max_retries),
            concurrency: Some(concurrency),
            backoff_base: Some(Duration::from_secs(1)),
            backoff_max: Some(Duration::from_secs(8)),
            clone_timeout: Some(Duration::from_secs(5)),
            ..Default::default()
        };
        resolve(&CloneOptions::defaults(), None, None, &cli)
            .unwrap()
            .policy
    }

    fn repos(count: usize) -> Vec<RepoDescriptor> {
        (0..count)
            .map(|i| {
                RepoDescriptor::new(
                    format!("repo-{i}"),
                    format!("https://example.org/repo-{i}"),
                    format!("/tmp/fleet/repo-{i}"),
                )
            })
            .collect()
    }

    /// Returns scripted outcomes per repository; the last one repeats.
    #[derive(Default)]
    struct ScriptedCloner {
        scripts: StdMutex<HashMap<String, Vec<CloneOutcome>>>,
        calls: StdMutex<HashMap<String, u32>>,
        active: AtomicUsize,
        max_active: AtomicUsize,
    }

    impl ScriptedCloner {
        fn script(self, name: &str, outcomes: Vec<CloneOutcome>) -> Self {
            self.scripts
                .lock()
                .unwrap()
                .insert(name.to_string(), outcomes);
            self
        }

        fn calls(&self, name: &str) -> u32 {
            self.calls.lock().unwrap().get(name).copied().unwrap_or(0)
        }

        fn total_calls(&self) -> u32 {
            self.calls.lock().unwrap().values().sum()
        }
    }

    #[async_trait]
    impl Cloner for ScriptedCloner {
        async fn execute(
            &self,
            repo: &RepoDescriptor,
            _policy: &ClonePolicy,
            _cancel: &CancellationToken,
        ) -> CloneOutcome {
            *self
                .calls
                .lock()
                .unwrap()
                .entry(repo.name.clone())
                .or_default() += 1;

            let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_active.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            self.active.fetch_sub(1, Ordering::SeqCst);

            let mut scripts = self.scripts.lock().unwrap();
            match scripts.get_mut(&repo.name) {
                Some(outcomes) if outcomes.len() > 1 => outcomes.remove(0),
                Some(outcomes) => outcomes[0].clone(),
                None => CloneOutcome::Success,
            }
        }
    }

    fn orchestrator(policy: ClonePolicy, cloner: &Arc<ScriptedCloner>) -> Orchestrator {
        Orchestrator::new(policy, Arc::clone(cloner) as Arc<dyn Cloner>)
    }

    fn drain(mut rx: mpsc::UnboundedReceiver<CloneEvent>) -> Vec<CloneEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_run_returns_immediately() {
        let cloner = Arc::new(ScriptedCloner::default());
        let result = orchestrator(policy(3, 4), &cloner)
            .run(Vec::new())
            .await
            .unwrap();

        assert!(result.results.is_empty());
        assert!(result.all_succeeded());
        assert_eq!(cloner.total_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_names_fail_before_cloning() {
        let cloner = Arc::new(ScriptedCloner::default());
        let descriptors = vec![
            RepoDescriptor::new("a", "https://example.org/a", "/tmp/a"),
            RepoDescriptor::new("a", "https://example.org/a2", "/tmp/a2"),
        ];

        let err = orchestrator(policy(3, 2), &cloner)
            .run(descriptors)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::DuplicateRepository(ref name) if name == "a"));
        assert_eq!(cloner.total_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_every_descriptor_gets_one_result() {
        let cloner = Arc::new(ScriptedCloner::default());
        let result = orchestrator(policy(3, 3), &cloner)
            .run(repos(20))
            .await
            .unwrap();

        assert_eq!(result.results.len(), 20);
        for (i, entry) in result.results.iter().enumerate() {
            assert_eq!(entry.name, format!("repo-{i}"));
            assert_eq!(entry.status, TaskStatus::Succeeded);
            assert_eq!(entry.attempts, 1);
        }
        assert!(result.all_succeeded());
        assert_eq!(cloner.total_calls(), 20);
        assert!(cloner.max_active.load(Ordering::SeqCst) <= 3);
        assert!(cloner.max_active.load(Ordering::SeqCst) >= 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_more_workers_than_repositories() {
        let cloner = Arc::new(ScriptedCloner::default());
        let result = orchestrator(policy(0, 8), &cloner)
            .run(repos(2))
            .await
            .unwrap();

        assert_eq!(result.counts.succeeded, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_failure_without_retry_budget() {
        let cloner = Arc::new(ScriptedCloner::default().script(
            "repo-0",
            vec![CloneOutcome::failure(FailureKind::Network, "early eof")],
        ));

        let result = orchestrator(policy(0, 1), &cloner)
            .run(repos(1))
            .await
            .unwrap();

        let entry = result.get("repo-0").unwrap();
        assert_eq!(entry.attempts, 1);
        assert_eq!(entry.kind, ResultKind::FailedPermanently);
        assert_eq!(entry.failure, Some(FailureKind::Network));
        assert_eq!(cloner.calls("repo-0"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_failure_exhausts_retries() {
        let cloner = Arc::new(ScriptedCloner::default().script(
            "repo-0",
            vec![CloneOutcome::failure(FailureKind::Network, "early eof")],
        ));
        let (tx, rx) = mpsc::unbounded_channel();

        let result = orchestrator(policy(3, 2), &cloner)
            .with_events(tx)
            .run(repos(2))
            .await
            .unwrap();

        let entry = result.get("repo-0").unwrap();
        assert_eq!(entry.status, TaskStatus::FailedTerminal);
        assert_eq!(entry.kind, ResultKind::FailedAfterRetries);
        assert_eq!(entry.attempts, 4);
        assert_eq!(entry.failure, Some(FailureKind::Network));
        assert_eq!(cloner.calls("repo-0"), 4);
        assert_eq!(result.get("repo-1").unwrap().kind, ResultKind::Succeeded);
        assert!(!result.all_succeeded());

        let delays: Vec<u64> = drain(rx)
            .into_iter()
            .filter_map(|event| match event {
                CloneEvent::Retrying { name, delay, .. } if name == "repo-0" => {
                    Some(delay.as_secs())
                }
                _ => None,
            })
            .collect();
        assert_eq!(delays, vec![1, 2, 4]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_permanent_failure_is_not_retried() {
        let cloner = Arc::new(ScriptedCloner::default().script(
            "repo-0",
            vec![CloneOutcome::failure(
                FailureKind::DestinationConflict,
                "destination exists and is not a git repository",
            )],
        ));

        let result = orchestrator(policy(5, 1), &cloner)
            .run(repos(1))
            .await
            .unwrap();

        let entry = result.get("repo-0").unwrap();
        assert_eq!(entry.status, TaskStatus::FailedTerminal);
        assert_eq!(entry.kind, ResultKind::FailedPermanently);
        assert_eq!(entry.attempts, 1);
        assert_eq!(cloner.calls("repo-0"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_then_success_and_skip() {
        let cloner = Arc::new(
            ScriptedCloner::default()
                .script(
                    "repo-0",
                    vec![
                        CloneOutcome::failure(FailureKind::TransientExit, "503"),
                        CloneOutcome::Success,
                    ],
                )
                .script(
                    "repo-1",
                    vec![CloneOutcome::Skipped("already cloned".to_string())],
                ),
        );

        let result = orchestrator(policy(2, 2), &cloner)
            .run(repos(2))
            .await
            .unwrap();

        let retried = result.get("repo-0").unwrap();
        assert_eq!(retried.kind, ResultKind::RetriedThenSucceeded);
        assert_eq!(retried.attempts, 2);
        assert_eq!(result.get("repo-1").unwrap().kind, ResultKind::Skipped);
        assert_eq!(result.counts.retried, 1);
        assert_eq!(result.counts.skipped, 1);
        assert!(result.all_succeeded());
    }

    struct SlowCloner;

    #[async_trait]
    impl Cloner for SlowCloner {
        async fn execute(
            &self,
            _repo: &RepoDescriptor,
            _policy: &ClonePolicy,
            _cancel: &CancellationToken,
        ) -> CloneOutcome {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            CloneOutcome::Success
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_counts_as_transient_failure() {
        let result = Orchestrator::new(policy(1, 1), Arc::new(SlowCloner))
            .run(repos(1))
            .await
            .unwrap();

        let entry = result.get("repo-0").unwrap();
        assert_eq!(entry.failure, Some(FailureKind::Timeout));
        assert_eq!(entry.kind, ResultKind::FailedAfterRetries);
        assert_eq!(entry.attempts, 2);
    }

    struct PanickingCloner;

    #[async_trait]
    impl Cloner for PanickingCloner {
        async fn execute(
            &self,
            _repo: &RepoDescriptor,
            _policy: &ClonePolicy,
            _cancel: &CancellationToken,
        ) -> CloneOutcome {
            panic!("collaborator bug");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_panicking_collaborator_does_not_hang_run() {
        let result = Orchestrator::new(policy(3, 2), Arc::new(PanickingCloner))
            .run(repos(3))
            .await
            .unwrap();

        assert_eq!(result.counts.failed, 3);
        assert!(result
            .results
            .iter()
            .all(|r| r.kind == ResultKind::FailedPermanently && r.attempts == 1));
    }

    /// Succeeds for the first `successes` calls, cancels the run on the last
    /// of them, and blocks every later call until cancellation.
    struct CancellingCloner {
        successes: usize,
        calls: AtomicUsize,
        run_token: CancellationToken,
    }

    #[async_trait]
    impl Cloner for CancellingCloner {
        async fn execute(
            &self,
            _repo: &RepoDescriptor,
            _policy: &ClonePolicy,
            cancel: &CancellationToken,
        ) -> CloneOutcome {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call + 1 < self.successes {
                return CloneOutcome::Success;
            }
            if call + 1 == self.successes {
                self.run_token.cancel();
                return CloneOutcome::Success;
            }
            cancel.cancelled().await;
            CloneOutcome::Failure(CloneFailure::cancelled())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_returns_partial_result() {
        let run_token = CancellationToken::new();
        let cloner = Arc::new(CancellingCloner {
            successes: 3,
            calls: AtomicUsize::new(0),
            run_token: run_token.clone(),
        });

        let orchestrator =
            Orchestrator::new(policy(3, 2), cloner).with_cancellation(run_token);

        let result = tokio::time::timeout(Duration::from_secs(60), orchestrator.run(repos(10)))
            .await
            .expect("run must not hang after cancellation")
            .unwrap();

        assert_eq!(result.results.len(), 10);
        assert_eq!(result.counts.succeeded, 3);
        assert_eq!(result.counts.cancelled, 7);
        assert!(result.was_cancelled());
        assert!(result
            .failures()
            .all(|r| r.status == TaskStatus::FailedTerminal
                && r.detail.as_deref() == Some("cancelled")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_before_run_cancels_everything() {
        let cloner = Arc::new(ScriptedCloner::default());
        let orchestrator = orchestrator(policy(3, 2), &cloner);
        orchestrator.cancellation_token().cancel();

        let result = orchestrator.run(repos(4)).await.unwrap();
        assert_eq!(result.counts.cancelled, 4);
        assert_eq!(cloner.total_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_backoff_drains_retry() {
        let cloner = Arc::new(ScriptedCloner::default().script(
            "repo-0",
            vec![CloneOutcome::failure(FailureKind::Network, "reset")],
        ));
        let orchestrator = orchestrator(policy(5, 1), &cloner);
        let token = orchestrator.cancellation_token();

        let (tx, mut rx) = mpsc::unbounded_channel();
        let orchestrator = orchestrator.with_events(tx);
        let canceller = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                if matches!(event, CloneEvent::Retrying { .. }) {
                    token.cancel();
                }
            }
        });

        let result = orchestrator.run(repos(1)).await.unwrap();
        drop(orchestrator);
        canceller.await.unwrap();

        let entry = result.get("repo-0").unwrap();
        assert_eq!(entry.kind, ResultKind::Cancelled);
        assert_eq!(entry.attempts, 1);
        assert_eq!(cloner.calls("repo-0"), 1);
    }
}
