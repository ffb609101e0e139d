//! fleetclone hosts - list the repositories a code-review host serves
//!
//! Each host type implements [`Discovery`] and hands back a finished,
//! name-sorted list of [`RepoDescriptor`]s for the orchestrator.

mod error;
mod gerrit;
mod github;

use std::path::PathBuf;

use async_trait::async_trait;
use fleetclone_core::{RepoDescriptor, SourceConfig, SourceKind};

pub use error::{Error, Result};
pub use gerrit::{parse_projects, GerritDiscovery, GerritProject, DEFAULT_GERRIT_SSH_PORT};
pub use github::GitHubDiscovery;

/// A source of repositories to clone
#[async_trait]
pub trait Discovery: Send + Sync {
    /// Short host type name for logs ("github", "gerrit")
    fn kind(&self) -> &'static str;

    /// List every repository to clone, sorted by name
    async fn discover(&self) -> Result<Vec<RepoDescriptor>>;
}

/// Split `host[:port]` into its parts
pub fn split_host(host: &str) -> Result<(String, Option<u16>)> {
    let host = host.trim();
    if host.is_empty() {
        return Err(Error::Parse("host must not be empty".to_string()));
    }
    if host.contains("://") || host.contains('/') {
        return Err(Error::Parse(format!(
            "host should be a bare name, optionally with a port: {}",
            host
        )));
    }

    match host.rsplit_once(':') {
        Some((name, port)) => {
            let port = port
                .parse::<u16>()
                .map_err(|_| Error::Parse(format!("Invalid port in host: {}", host)))?;
            Ok((name.to_string(), Some(port)))
        }
        None => Ok((host.to_string(), None)),
    }
}

/// Default clone root for a host: `./<host>` without the port
pub fn default_output_dir(host: &str) -> PathBuf {
    let name = host.split(':').next().unwrap_or(host);
    PathBuf::from(".").join(name)
}

/// Build the discovery client described by a `[source]` table
pub fn discovery_for(source: &SourceConfig) -> Result<Box<dyn Discovery>> {
    let host = source.host.as_deref().unwrap_or(match source.kind {
        SourceKind::GitHub => "github.com",
        SourceKind::Gerrit => "",
    });
    let output_dir = source
        .output_dir
        .clone()
        .unwrap_or_else(|| default_output_dir(host));

    match source.kind {
        SourceKind::Gerrit => {
            let mut discovery = GerritDiscovery::new(host, output_dir)?
                .with_https(source.https)
                .with_skip_read_only(source.skip_archived);
            if let Some(user) = &source.ssh_user {
                discovery = discovery.with_ssh_user(user);
            }
            Ok(Box::new(discovery))
        }
        SourceKind::GitHub => {
            let org = source.org.as_deref().ok_or_else(|| {
                Error::Other("GitHub discovery requires an organization (--org)".to_string())
            })?;
            let discovery = GitHubDiscovery::new(host, org, output_dir)?
                .with_https(source.https)
                .with_skip_archived(source.skip_archived);
            Ok(Box::new(discovery))
        }
    }
}

/// Sort descriptors by name, the order every discovery returns
pub(crate) fn sort_by_name(descriptors: &mut [RepoDescriptor]) {
    descriptors.sort_by(|a, b| a.name.cmp(&b.name));
}
