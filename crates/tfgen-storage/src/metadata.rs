//! Per-generation metadata and README

use serde::{Deserialize, Serialize};

/// Contents of `metadata.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationMetadata {
    pub prompt: String,
    /// Generation identifier (`YYYYMMDD_HHMMSS`)
    pub timestamp: String,
    pub files: Vec<String>,
}

impl GenerationMetadata {
    pub fn render_readme(&self, generated_at: &str) -> String {
        let files = self
            .files
            .iter()
            .map(|f| format!("- {}", f))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "# Generated Terraform Configuration\n\n\
             ## Prompt\n{prompt}\n\n\
             ## Generated Files\n{files}\n\n\
             ## Usage\n```bash\nterraform init\nterraform plan\nterraform apply\n```\n\n\
             ## Generated\n{generated_at}\n",
            prompt = self.prompt,
            files = files,
            generated_at = generated_at,
        )
    }
}
