use {
    crate::types::Version,
    anyhow::{Context, Result},
    log::debug,
    std::{
        fs,
        path::{Path, PathBuf},
    },
};

/// Source of the version being released.
pub trait VersionStore {
    fn current_version(&self) -> Result<Version>;
}

/// Reads `{"major": M, "minor": N, "build": B}` from a JSON file.
#[derive(Debug, Clone)]
pub struct JsonVersionStore {
    path: PathBuf,
}

impl JsonVersionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl VersionStore for JsonVersionStore {
    fn current_version(&self) -> Result<Version> {
        debug!("reading version from {}", self.path.display());
        let content = fs::read_to_string(&self.path)
            .context(format!("failed to read {}", self.path.display()))?;
        let version = serde_json::from_str::<Version>(&content)
            .context(format!("failed to parse {}", self.path.display()))?;
        Ok(version)
    }
}
