//! Retry decisions for failed clone attempts

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Why a clone attempt failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The clone could not be configured (bad arguments, missing tool)
    Configuration,
    /// Destination exists and is not a usable repository
    DestinationConflict,
    /// Authentication, permissions, or repository not found
    Rejected,
    /// Network-level failure reported by the clone tool
    Network,
    /// The attempt exceeded the per-clone timeout
    Timeout,
    /// Non-zero exit whose output looks transient
    TransientExit,
    /// Non-zero exit with no sign of a transient cause
    PermanentExit,
    /// The run was cancelled while the attempt was pending or in flight
    Cancelled,
}

impl FailureKind {
    /// Whether another attempt could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            FailureKind::Network | FailureKind::Timeout | FailureKind::TransientExit
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Configuration => "configuration",
            FailureKind::DestinationConflict => "destination conflict",
            FailureKind::Rejected => "rejected",
            FailureKind::Network => "network",
            FailureKind::Timeout => "timeout",
            FailureKind::TransientExit => "transient exit",
            FailureKind::PermanentExit => "permanent exit",
            FailureKind::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of evaluating a failed attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Requeue the task after the given delay
    Retry { after: Duration },
    /// The failure is terminal
    Stop,
}

impl RetryDecision {
    pub fn is_retry(&self) -> bool {
        matches!(self, RetryDecision::Retry { .. })
    }
}

/// Retry shape: how many retries and how the backoff grows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    backoff_base: Duration,
    backoff_max: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, backoff_base: Duration, backoff_max: Duration) -> Self {
        Self {
            max_retries,
            backoff_base,
            backoff_max,
        }
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Delay before the retry that follows failed attempt `attempt` (zero-based)
    ///
    /// `min(backoff_base * 2^attempt, backoff_max)`, saturating instead of
    /// overflowing for large attempt numbers.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        2u32.checked_pow(attempt)
            .and_then(|factor| self.backoff_base.checked_mul(factor))
            .map_or(self.backoff_max, |delay| delay.min(self.backoff_max))
    }

    /// Decide what to do after attempt `attempt` (zero-based) failed with `kind`
    pub fn decide(&self, attempt: u32, kind: FailureKind) -> RetryDecision {
        if !kind.is_retryable() || attempt >= self.max_retries {
            return RetryDecision::Stop;
        }

        RetryDecision::Retry {
            after: self.backoff_delay(attempt),
        }
    }
}
