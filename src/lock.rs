//! `huggingface.lock.yaml` checks.
//!
//! The lock file pins the Hub artifacts a build may download. A run started
//! with a lock file refuses to proceed unless both the model and the dataset it
//! is about to use are pinned there.
//!
//! ```yaml
//! models:
//!   - id: TinyLlama/TinyLlama-1.1B-Chat-v1.0
//!     revision: fe8a4ea1ffedaf415f4da2f062534de366a451e6
//! datasets:
//!   - id: open_platypus
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::CompressionConfig;
use crate::error::{CompressError, Result};

/// A pinned Hub artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockEntry {
    /// Repository or dataset identifier.
    #[serde(alias = "name", alias = "repo_id")]
    pub id: String,

    /// Pinned revision, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
}

/// Parsed lock file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HuggingfaceLock {
    /// Pinned models.
    #[serde(default)]
    pub models: Vec<LockEntry>,

    /// Pinned datasets.
    #[serde(default)]
    pub datasets: Vec<LockEntry>,
}

impl HuggingfaceLock {
    /// Load a lock file from disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a lock file from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Look up a pinned model.
    #[must_use]
    pub fn model(&self, id: &str) -> Option<&LockEntry> {
        self.models.iter().find(|entry| entry.id == id)
    }

    /// Look up a pinned dataset.
    #[must_use]
    pub fn dataset(&self, id: &str) -> Option<&LockEntry> {
        self.datasets.iter().find(|entry| entry.id == id)
    }

    /// Reject a configuration whose model or dataset is not pinned.
    pub fn verify(&self, config: &CompressionConfig) -> Result<()> {
        let model = self.model(config.model()).ok_or_else(|| {
            CompressError::Lock(format!("model {} is not pinned", config.model()))
        })?;
        let dataset = self.dataset(config.dataset()).ok_or_else(|| {
            CompressError::Lock(format!("dataset {} is not pinned", config.dataset()))
        })?;

        tracing::debug!(
            model = %model.id,
            model_revision = ?model.revision,
            dataset = %dataset.id,
            "lock file pins model and dataset"
        );
        Ok(())
    }
}
