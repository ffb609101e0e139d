//! GitHub organization listing using octocrab

use std::path::PathBuf;

use async_trait::async_trait;
use fleetclone_core::RepoDescriptor;
use octocrab::Octocrab;
use tracing::{debug, info};

use crate::{sort_by_name, split_host, Discovery, Error, Result};

/// The fields of a GitHub repository that discovery cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RemoteRepo {
    pub name: String,
    pub archived: bool,
    pub https_url: Option<String>,
    pub ssh_url: Option<String>,
}

impl From<octocrab::models::Repository> for RemoteRepo {
    fn from(repo: octocrab::models::Repository) -> Self {
        Self {
            name: repo.name,
            archived: repo.archived.unwrap_or(false),
            https_url: repo.clone_url.map(|u| u.to_string()),
            ssh_url: repo.ssh_url,
        }
    }
}

/// Lists the repositories of one GitHub organization
pub struct GitHubDiscovery {
    client: Octocrab,
    host: String,
    org: String,
    https: bool,
    skip_archived: bool,
    output_dir: PathBuf,
}

impl GitHubDiscovery {
    /// Create a discovery client for `org` on `host`
    ///
    /// The token is read from `GITHUB_TOKEN` when set; without one only public
    /// repositories are visible and rate limits are tight. Hosts other than
    /// `github.com` are treated as GitHub Enterprise.
    pub fn new(host: &str, org: &str, output_dir: impl Into<PathBuf>) -> Result<Self> {
        let (host, _) = split_host(host)?;
        let org = org.trim();
        if org.is_empty() {
            return Err(Error::Other("GitHub organization must not be empty".to_string()));
        }

        let mut builder = Octocrab::builder();
        if let Some(token) = std::env::var("GITHUB_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty())
        {
            builder = builder.personal_token(token);
        } else {
            debug!("GITHUB_TOKEN not set, listing anonymously");
        }
        if host != "github.com" {
            builder = builder.base_uri(format!("https://{}/api/v3/", host))?;
        }

        let client = builder
            .build()
            .map_err(|e| Error::Auth(format!("Failed to create GitHub client: {}", e)))?;

        info!(host = %host, org = %org, "Created GitHub client");

        Ok(Self {
            client,
            host,
            org: org.to_string(),
            https: false,
            skip_archived: false,
            output_dir: output_dir.into(),
        })
    }

    /// Clone over HTTPS instead of SSH
    pub fn with_https(mut self, https: bool) -> Self {
        self.https = https;
        self
    }

    pub fn with_skip_archived(mut self, skip: bool) -> Self {
        self.skip_archived = skip;
        self
    }

    /// Get the organization name
    pub fn org(&self) -> &str {
        &self.org
    }

    pub(crate) fn clone_url(&self, repo: &RemoteRepo) -> String {
        if self.https {
            repo.https_url
                .clone()
                .unwrap_or_else(|| format!("https://{}/{}/{}.git", self.host, self.org, repo.name))
        } else {
            repo.ssh_url
                .clone()
                .unwrap_or_else(|| format!("git@{}:{}/{}.git", self.host, self.org, repo.name))
        }
    }

    pub(crate) fn descriptors(&self, repos: Vec<RemoteRepo>) -> Vec<RepoDescriptor> {
        let mut descriptors: Vec<RepoDescriptor> = repos
            .into_iter()
            .filter(|repo| {
                if self.skip_archived && repo.archived {
                    debug!(repo = %repo.name, "Skipping archived repository");
                    return false;
                }
                true
            })
            .map(|repo| {
                RepoDescriptor::new(
                    repo.name.clone(),
                    self.clone_url(&repo),
                    self.output_dir.join(&repo.name),
                )
            })
            .collect();

        sort_by_name(&mut descriptors);
        descriptors
    }
}

impl std::fmt::Debug for GitHubDiscovery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubDiscovery")
            .field("host", &self.host)
            .field("org", &self.org)
            .field("https", &self.https)
            .field("skip_archived", &self.skip_archived)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Discovery for GitHubDiscovery {
    fn kind(&self) -> &'static str {
        "github"
    }

    async fn discover(&self) -> Result<Vec<RepoDescriptor>> {
        debug!(org = %self.org, "Listing organization repositories");

        let first_page = self
            .client
            .orgs(&self.org)
            .list_repos()
            .per_page(100)
            .send()
            .await
            .map_err(|e| match e {
                octocrab::Error::GitHub { ref source, .. }
                    if source.message.contains("Bad credentials") =>
                {
                    Error::Auth("Invalid GitHub token".to_string())
                }
                other => Error::Api(other),
            })?;

        let repos: Vec<RemoteRepo> = self
            .client
            .all_pages(first_page)
            .await?
            .into_iter()
            .map(RemoteRepo::from)
            .collect();

        let total = repos.len();
        let descriptors = self.descriptors(repos);

        info!(org = %self.org, total, selected = descriptors.len(), "Discovered GitHub repositories");
        Ok(descriptors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn remote(name: &str, archived: bool) -> RemoteRepo {
        RemoteRepo {
            name: name.to_string(),
            archived,
            https_url: Some(format!("https://github.com/org/{name}.git")),
            ssh_url: Some(format!("git@github.com:org/{name}.git")),
        }
    }

    #[tokio::test]
    async fn test_descriptors_use_ssh_by_default() {
        let discovery = GitHubDiscovery::new("github.com", "org", "/srv/gh").unwrap();
        let descriptors = discovery.descriptors(vec![remote("zeta", false), remote("alpha", false)]);

        let names: Vec<_> = descriptors.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
        assert_eq!(descriptors[0].source_url, "git@github.com:org/alpha.git");
        assert_eq!(descriptors[0].destination, Path::new("/srv/gh/alpha"));
    }

    #[tokio::test]
    async fn test_descriptors_https_and_archived() {
        let discovery = GitHubDiscovery::new("github.com", "org", "/srv/gh")
            .unwrap()
            .with_https(true)
            .with_skip_archived(true);
        let descriptors = discovery.descriptors(vec![remote("live", false), remote("old", true)]);

        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].source_url, "https://github.com/org/live.git");
    }

    #[tokio::test]
    async fn test_clone_url_fallback() {
        let discovery = GitHubDiscovery::new("ghe.example.com", "platform", "/srv").unwrap();
        let repo = RemoteRepo {
            name: "api".to_string(),
            archived: false,
            https_url: None,
            ssh_url: None,
        };
        assert_eq!(discovery.clone_url(&repo), "git@ghe.example.com:platform/api.git");
        let discovery = discovery.with_https(true);
        assert_eq!(
            discovery.clone_url(&repo),
            "https://ghe.example.com/platform/api.git"
        );
    }

    #[test]
    fn test_empty_org_rejected() {
        assert!(GitHubDiscovery::new("github.com", "  ", "/srv").is_err());
    }
}
