//! Git operations for fleetclone
//!
//! Clones run through the `git` command line tool so that the user's SSH
//! agent, credential helpers and config apply. Destination checks use git2.

mod clone;
mod repo;

pub use clone::{classify_error, clone_args, diagnose, should_cleanup, GitCloner};
pub use repo::{current_branch, inspect_destination, is_git_repository, Destination};
