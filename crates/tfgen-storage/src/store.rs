//! Generation directories on local disk
//!
//! Directory names only have second granularity: two generations within the
//! same second share (and overwrite into) one directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tfgen_core::clock::{full_timestamp, generation_id};
use tfgen_core::{ClassifiedBundle, Clock, SystemClock};
use tracing::{debug, info};

use crate::Result;
use crate::metadata::GenerationMetadata;

/// Result of materializing one bundle
#[derive(Debug, Clone, Serialize)]
pub struct SavedArtifact {
    pub path: PathBuf,
    pub generation_id: String,
    pub files: Vec<String>,
}

/// Writes classified bundles under an output root
pub struct ArtifactStore {
    root: PathBuf,
    clock: Arc<dyn Clock>,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_clock(root, Arc::new(SystemClock))
    }

    pub fn with_clock(root: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        Self {
            root: root.into(),
            clock,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write every non-empty role plus `metadata.json` and `README.md`
    pub async fn save(&self, bundle: &ClassifiedBundle, prompt: &str) -> Result<SavedArtifact> {
        let now = self.clock.now();
        let id = generation_id(now)?;
        let dir = self.root.join(format!("terraform_{}", id));

        tokio::fs::create_dir_all(&dir).await?;

        for (role, content) in bundle.iter() {
            if content.is_empty() {
                continue;
            }
            let path = dir.join(role.file_name());
            debug!("Writing {} ({} bytes)", path.display(), content.len());
            tokio::fs::write(&path, content).await?;
        }

        let metadata = GenerationMetadata {
            prompt: prompt.to_string(),
            timestamp: id.clone(),
            files: bundle.file_names(),
        };
        let json = serde_json::to_string_pretty(&metadata)?;
        tokio::fs::write(dir.join("metadata.json"), json).await?;

        let readme = metadata.render_readme(&full_timestamp(now)?);
        tokio::fs::write(dir.join("README.md"), readme).await?;

        info!("Saved {} file(s) to {}", metadata.files.len(), dir.display());

        Ok(SavedArtifact {
            path: dir,
            generation_id: id,
            files: metadata.files,
        })
    }
}
