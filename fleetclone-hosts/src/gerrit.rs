//! Gerrit project listing over the REST API

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use fleetclone_core::RepoDescriptor;
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

use crate::{sort_by_name, split_host, Discovery, Error, Result};

/// Port Gerrit's SSH daemon listens on unless configured otherwise
pub const DEFAULT_GERRIT_SSH_PORT: u16 = 29418;

/// Gerrit prefixes JSON responses with this to defeat XSSI
const XSSI_PREFIX: &str = ")]}'";

/// One entry of the `/projects/` response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GerritProject {
    #[serde(default)]
    pub id: Option<String>,
    /// `ACTIVE`, `READ_ONLY` or `HIDDEN`
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl GerritProject {
    fn state(&self) -> &str {
        self.state.as_deref().unwrap_or("ACTIVE")
    }
}

/// Parse a `/projects/` response body into a name-keyed map
pub fn parse_projects(body: &str) -> Result<BTreeMap<String, GerritProject>> {
    let body = body.trim_start();
    let json = body.strip_prefix(XSSI_PREFIX).unwrap_or(body);
    serde_json::from_str(json)
        .map_err(|e| Error::Parse(format!("Failed to parse Gerrit project list: {}", e)))
}

/// Validate an http(s) base URL and drop its trailing slash
fn parse_base_url(raw: &str) -> Result<String> {
    let url = Url::parse(raw.trim())?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(Error::Parse(format!(
            "Gerrit base URL must be http(s) with a host: {}",
            raw
        )));
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}

/// Lists projects from a Gerrit server
#[derive(Debug, Clone)]
pub struct GerritDiscovery {
    client: reqwest::Client,
    host: String,
    ssh_port: u16,
    base_url: String,
    ssh_user: Option<String>,
    https: bool,
    skip_read_only: bool,
    output_dir: PathBuf,
}

impl GerritDiscovery {
    /// Create a discovery client for `host[:ssh_port]`
    pub fn new(host: &str, output_dir: impl Into<PathBuf>) -> Result<Self> {
        let (name, port) = split_host(host)?;
        let base_url = parse_base_url(&format!("https://{}", name))?;
        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
            host: name,
            ssh_port: port.unwrap_or(DEFAULT_GERRIT_SSH_PORT),
            ssh_user: None,
            https: false,
            skip_read_only: false,
            output_dir: output_dir.into(),
        })
    }

    /// Override the REST base URL (default `https://<host>`)
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    pub fn with_ssh_user(mut self, user: impl Into<String>) -> Self {
        self.ssh_user = Some(user.into());
        self
    }

    /// Clone over HTTPS from the base URL instead of SSH
    pub fn with_https(mut self, https: bool) -> Self {
        self.https = https;
        self
    }

    pub fn with_skip_read_only(mut self, skip: bool) -> Self {
        self.skip_read_only = skip;
        self
    }

    /// Clone URL for a project
    pub fn clone_url(&self, project: &str) -> String {
        if self.https {
            format!("{}/{}", self.base_url, project)
        } else {
            match &self.ssh_user {
                Some(user) => format!("ssh://{}@{}:{}/{}", user, self.host, self.ssh_port, project),
                None => format!("ssh://{}:{}/{}", self.host, self.ssh_port, project),
            }
        }
    }

    /// Turn a parsed project map into descriptors
    pub fn descriptors(&self, projects: BTreeMap<String, GerritProject>) -> Vec<RepoDescriptor> {
        let mut descriptors: Vec<RepoDescriptor> = projects
            .into_iter()
            .filter(|(name, project)| match project.state() {
                "HIDDEN" => {
                    debug!(project = %name, "Skipping hidden project");
                    false
                }
                "READ_ONLY" if self.skip_read_only => {
                    debug!(project = %name, "Skipping read-only project");
                    false
                }
                _ => true,
            })
            .map(|(name, _)| {
                let destination = self.output_dir.join(&name);
                RepoDescriptor::new(name.clone(), self.clone_url(&name), destination)
            })
            .collect();

        sort_by_name(&mut descriptors);
        descriptors
    }
}

#[async_trait]
impl Discovery for GerritDiscovery {
    fn kind(&self) -> &'static str {
        "gerrit"
    }

    async fn discover(&self) -> Result<Vec<RepoDescriptor>> {
        let url = format!("{}/projects/?d", self.base_url);
        debug!(url = %url, "Listing Gerrit projects");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(Error::Auth(format!(
                "Gerrit refused the project listing ({})",
                status
            )));
        }
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response".to_string());
            return Err(Error::Other(format!(
                "Gerrit project listing failed with status {}: {}",
                status, text
            )));
        }

        let body = response.text().await?;
        let projects = parse_projects(&body)?;
        let total = projects.len();
        let descriptors = self.descriptors(projects);

        info!(host = %self.host, total, selected = descriptors.len(), "Discovered Gerrit projects");
        Ok(descriptors)
    }
}
