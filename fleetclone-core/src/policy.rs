//! The resolved clone policy shared by every repository in a run

use std::num::{NonZeroU32, NonZeroUsize};
use std::time::Duration;

use serde::Serialize;

use crate::retry::RetryPolicy;

/// Validated clone options governing an entire run
///
/// A `ClonePolicy` is only produced by [`crate::config::resolve`], so holding
/// one means every field constraint has already been checked. It is never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClonePolicy {
    mirror: bool,
    depth: Option<NonZeroU32>,
    branch: Option<String>,
    max_retries: u32,
    #[serde(with = "humantime_serde")]
    backoff_base: Duration,
    #[serde(with = "humantime_serde")]
    backoff_max: Duration,
    concurrency: NonZeroUsize,
    #[serde(with = "humantime_serde")]
    clone_timeout: Duration,
}

impl ClonePolicy {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        mirror: bool,
        depth: Option<NonZeroU32>,
        branch: Option<String>,
        max_retries: u32,
        backoff_base: Duration,
        backoff_max: Duration,
        concurrency: NonZeroUsize,
        clone_timeout: Duration,
    ) -> Self {
        debug_assert!(!mirror || (depth.is_none() && branch.is_none()));
        Self {
            mirror,
            depth,
            branch,
            max_retries,
            backoff_base,
            backoff_max,
            concurrency,
            clone_timeout,
        }
    }

    /// Full-metadata bare clone (`true`) or working-copy clone (`false`)
    pub fn mirror(&self) -> bool {
        self.mirror
    }

    /// Shallow clone depth; always `None` in mirror mode
    pub fn depth(&self) -> Option<NonZeroU32> {
        self.depth
    }

    /// Branch to check out; always `None` in mirror mode
    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn backoff_base(&self) -> Duration {
        self.backoff_base
    }

    pub fn backoff_max(&self) -> Duration {
        self.backoff_max
    }

    /// Maximum number of clones running at once
    pub fn concurrency(&self) -> NonZeroUsize {
        self.concurrency
    }

    /// Upper bound for a single clone attempt
    pub fn clone_timeout(&self) -> Duration {
        self.clone_timeout
    }

    /// The retry shape of this policy
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, self.backoff_base, self.backoff_max)
    }
}

impl std::fmt::Display for ClonePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "  mode: {}",
            if self.mirror { "mirror" } else { "working copy" }
        )?;
        writeln!(
            f,
            "  depth: {}",
            self.depth
                .map(|d| d.to_string())
                .unwrap_or_else(|| "(full)".to_string())
        )?;
        writeln!(f, "  branch: {}", self.branch.as_deref().unwrap_or("(default)"))?;
        writeln!(f, "  max_retries: {}", self.max_retries)?;
        writeln!(
            f,
            "  backoff: {} .. {}",
            humantime::format_duration(self.backoff_base),
            humantime::format_duration(self.backoff_max)
        )?;
        writeln!(f, "  concurrency: {}", self.concurrency)?;
        write!(
            f,
            "  clone_timeout: {}",
            humantime::format_duration(self.clone_timeout)
        )
    }
}
