use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tfgen_core::{ClassifiedBundle, PublishResult};
use tfgen_storage::SavedArtifact;

pub const DEFAULT_LOCATION: &str = "eastus";
pub const DEFAULT_DESCRIPTION: &str = "Infrastructure deployment";

fn default_location() -> String {
    DEFAULT_LOCATION.to_string()
}

fn default_description() -> String {
    DEFAULT_DESCRIPTION.to_string()
}

fn default_create_pr() -> bool {
    true
}

/// Prompt to send to the completion service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: String,

    #[serde(default = "default_location")]
    pub location: String,

    #[serde(default)]
    pub resource_group_name: String,

    #[serde(default = "default_create_pr")]
    pub create_pr: bool,
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            location: default_location(),
            resource_group_name: String::new(),
            create_pr: default_create_pr(),
        }
    }
}

/// Code produced elsewhere, to be classified, saved and published
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishCodeRequest {
    #[serde(default)]
    pub terraform_code: String,

    #[serde(default = "default_description")]
    pub description: String,

    #[serde(default = "default_location")]
    pub location: String,

    #[serde(default = "default_create_pr")]
    pub create_pr: bool,
}

impl PublishCodeRequest {
    pub fn new(terraform_code: impl Into<String>) -> Self {
        Self {
            terraform_code: terraform_code.into(),
            description: default_description(),
            location: default_location(),
            create_pr: default_create_pr(),
        }
    }
}

/// What a generation or pre-generated publish produced
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    /// Raw completion reply; absent for pre-generated code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terraform_code: Option<String>,
    pub files: ClassifiedBundle,
    pub saved_path: PathBuf,
    pub pr_url: Option<String>,
    pub pr_number: Option<u64>,
    pub branch_name: Option<String>,
    /// Full publish outcome; absent when no pull request was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish: Option<PublishResult>,
    pub message: String,
}

impl GenerationReport {
    pub(crate) fn new(
        terraform_code: Option<String>,
        files: ClassifiedBundle,
        saved: SavedArtifact,
        publish: Option<PublishResult>,
        message: String,
    ) -> Self {
        let pr = publish.as_ref().and_then(PublishResult::published);
        Self {
            pr_url: pr.map(|pr| pr.pr_url.clone()),
            pr_number: pr.map(|pr| pr.pr_number),
            branch_name: pr.map(|pr| pr.branch_name.clone()),
            terraform_code,
            files,
            saved_path: saved.path,
            publish,
            message,
        }
    }

    pub fn is_published(&self) -> bool {
        self.publish
            .as_ref()
            .is_some_and(PublishResult::is_published)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub azure_openai_configured: bool,
    pub github_configured: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_defaults() {
        let req: GenerateRequest =
            serde_json::from_str(r#"{"prompt": "Create a VM"}"#).unwrap();

        assert_eq!(req.prompt, "Create a VM");
        assert_eq!(req.location, "eastus");
        assert_eq!(req.resource_group_name, "");
        assert!(req.create_pr);
    }

    #[test]
    fn test_publish_code_request_defaults() {
        let req: PublishCodeRequest =
            serde_json::from_str(r#"{"terraform_code": "locals {}", "create_pr": false}"#)
                .unwrap();

        assert_eq!(req.description, "Infrastructure deployment");
        assert_eq!(req.location, "eastus");
        assert!(!req.create_pr);
    }

    #[test]
    fn test_missing_prompt_deserializes_empty() {
        let req: GenerateRequest = serde_json::from_str("{}").unwrap();
        assert!(req.prompt.is_empty());
    }
}
