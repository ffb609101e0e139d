//! fleetclone core - resolve a clone policy and clone many repositories at once
//!
//! The two halves are the layered configuration resolver ([`config`]) and the
//! concurrent clone orchestrator ([`orchestrator`]). Everything else supports
//! one of them.

pub mod aggregate;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod git;
pub mod orchestrator;
pub mod policy;
pub mod retry;
pub mod task;

pub use aggregate::{AggregateResult, Counts, RepoResult, ResultAggregator, ResultKind};
pub use config::{
    resolve, validate, CliOverrides, CloneOptions, Config, PolicyWarning, Resolved,
    SourceConfig, SourceKind, Toggle, ENV_PREFIX,
};
pub use descriptor::{ensure_unique_names, RepoDescriptor};
pub use error::{Error, Result};
pub use git::GitCloner;
pub use orchestrator::{CloneEvent, CloneOutcome, Cloner, Orchestrator};
pub use policy::ClonePolicy;
pub use retry::{FailureKind, RetryDecision, RetryPolicy};
pub use task::{CloneFailure, CloneTask, TaskStatus};
