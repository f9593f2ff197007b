use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Line added to a requirements file to trigger an editable install of the
/// project itself. It is not a dependency and must not reach the resolver.
pub const EDITABLE_INSTALL_MARKER: &str = "-e .";

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("failed to read requirements file: {0}")]
    Io(#[from] io::Error),
}

/// Return the list of requirements from `file_path`.
///
/// Newlines are stripped, blank lines are skipped, and every line equal to
/// [`EDITABLE_INSTALL_MARKER`] is excluded.
pub fn read_requirements(file_path: &Path) -> Result<Vec<String>, ManifestError> {
    let content = fs::read_to_string(file_path)?;

    Ok(content
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty() && *line != EDITABLE_INSTALL_MARKER)
        .map(str::to_string)
        .collect())
}

/// Project packaging descriptor: package metadata plus the dependency list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectManifest {
    pub name: String,
    pub version: String,
    pub author: String,
    pub requires: Vec<String>,
}

impl ProjectManifest {
    /// Build the descriptor from compile-time package metadata and the
    /// requirements file at `requirements_path`.
    pub fn load(requirements_path: &Path) -> Result<Self, ManifestError> {
        Ok(ProjectManifest {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            author: env!("CARGO_PKG_AUTHORS").to_string(),
            requires: read_requirements(requirements_path)?,
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
