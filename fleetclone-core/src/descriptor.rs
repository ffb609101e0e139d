//! Repository descriptors produced by discovery

use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One repository to clone
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoDescriptor {
    /// Name of the repository, unique within a run
    pub name: String,
    /// URL handed to the clone tool
    pub source_url: String,
    /// Where the clone is written
    pub destination: PathBuf,
}

impl RepoDescriptor {
    pub fn new(
        name: impl Into<String>,
        source_url: impl Into<String>,
        destination: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            source_url: source_url.into(),
            destination: destination.into(),
        }
    }
}

/// Fail on the first name that appears more than once
pub fn ensure_unique_names(descriptors: &[RepoDescriptor]) -> Result<()> {
    let mut seen = HashSet::with_capacity(descriptors.len());
    for descriptor in descriptors {
        if !seen.insert(descriptor.name.as_str()) {
            return Err(Error::DuplicateRepository(descriptor.name.clone()));
        }
    }
    Ok(())
}
