//! Request orchestration for tfgen
//!
//! Composes completion, extraction, materialization and publishing into the
//! four operations the service exposes.

pub mod request;

use std::sync::Arc;

use tfgen_config::{Capabilities, Config};
use tfgen_core::{
    ClassifiedBundle, Error, PublishRequest, PublishResult, Result, StatusRecord, Template,
    extract_blocks,
};
use tfgen_github::{Publisher, StatusReporter};
use tfgen_llm::{AzureOpenAiClient, CompletionService, TERRAFORM_SYSTEM_PROMPT, enhance_prompt};
use tfgen_storage::ArtifactStore;
use tracing::{info, warn};

pub use request::{GenerateRequest, GenerationReport, HealthReport, PublishCodeRequest};

const OPENAI_NOT_CONFIGURED: &str =
    "Azure OpenAI is not configured. Set AZURE_OPENAI_ENDPOINT and AZURE_OPENAI_API_KEY.";

pub struct Orchestrator {
    completion: Option<Arc<dyn CompletionService>>,
    store: ArtifactStore,
    publisher: Publisher,
    status: StatusReporter,
}

impl Orchestrator {
    /// Wire up the real services; the completion client is only built when configured
    pub fn from_config(config: &Config) -> Result<Self> {
        let completion: Option<Arc<dyn CompletionService>> = if config.openai.is_configured() {
            Some(Arc::new(AzureOpenAiClient::from_config(&config.openai)?))
        } else {
            None
        };

        Ok(Self::new(
            completion,
            ArtifactStore::new(config.output_directory.clone()),
            Publisher::new(config.github.clone()),
            StatusReporter::new(config.github.clone()),
        ))
    }

    pub fn new(
        completion: Option<Arc<dyn CompletionService>>,
        store: ArtifactStore,
        publisher: Publisher,
        status: StatusReporter,
    ) -> Self {
        Self {
            completion,
            store,
            publisher,
            status,
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            completion: self.completion.is_some(),
            hosting: self.publisher.is_configured(),
        }
    }

    /// Prompt → completion → files on disk → optional pull request.
    ///
    /// Only the completion call is fatal; a failed publish is reported in the
    /// returned `GenerationReport`.
    pub async fn generate_from_prompt(&self, request: &GenerateRequest) -> Result<GenerationReport> {
        if request.prompt.trim().is_empty() {
            return Err(Error::Validation("Prompt is required".to_string()));
        }
        let completion = self
            .completion
            .as_ref()
            .ok_or_else(|| Error::Configuration(OPENAI_NOT_CONFIGURED.to_string()))?;

        info!(
            "Generation request ({} chars, location: {})",
            request.prompt.len(),
            request.location
        );

        // 1. Complete
        let user_message = enhance_prompt(
            &request.prompt,
            &request.location,
            Some(&request.resource_group_name),
        );
        let reply = completion
            .complete(TERRAFORM_SYSTEM_PROMPT, &user_message)
            .await?;

        // 2. Classify
        let files = extract_blocks(&reply);

        // 3. Materialize
        let saved = self.store.save(&files, &request.prompt).await?;

        // 4. Publish
        let publish = self
            .publish_if_requested(request.create_pr, &request.prompt, &request.location, &files)
            .await;

        let published = publish.as_ref().is_some_and(PublishResult::is_published);
        let message = if published {
            "✅ Terraform code generated and PR created for review."
        } else {
            "✅ Terraform code generated successfully."
        };

        Ok(GenerationReport::new(
            Some(reply),
            files,
            saved,
            publish,
            message.to_string(),
        ))
    }

    /// Classify, save and optionally publish code produced elsewhere
    pub async fn publish_pregenerated(
        &self,
        request: &PublishCodeRequest,
    ) -> Result<GenerationReport> {
        if request.terraform_code.trim().is_empty() {
            return Err(Error::Validation(
                "terraform_code is required. Copilot Studio should generate the Terraform code."
                    .to_string(),
            ));
        }

        info!(
            "Pre-generated publish request ({} chars, location: {})",
            request.terraform_code.len(),
            request.location
        );

        let files = extract_blocks(&request.terraform_code);
        let saved = self.store.save(&files, &request.description).await?;

        let publish = self
            .publish_if_requested(
                request.create_pr,
                &request.description,
                &request.location,
                &files,
            )
            .await;

        let message = match &publish {
            Some(PublishResult::Published(_)) => {
                "✅ Terraform code committed and PR created for review.".to_string()
            }
            Some(PublishResult::Failed { reason, .. }) => {
                format!("✅ Terraform code saved successfully. (GitHub: {})", reason)
            }
            None => "✅ Terraform code saved successfully.".to_string(),
        };

        Ok(GenerationReport::new(None, files, saved, publish, message))
    }

    pub async fn query_status(&self, pr_number: u64) -> Result<StatusRecord> {
        self.status.query(pr_number).await
    }

    pub fn list_templates(&self) -> &'static [Template] {
        tfgen_core::list_templates()
    }

    pub fn health(&self) -> HealthReport {
        let capabilities = self.capabilities();
        HealthReport {
            status: "healthy",
            service: "tfgen",
            version: env!("CARGO_PKG_VERSION"),
            description: "Terraform from prompts or pre-generated code, published as pull requests",
            azure_openai_configured: capabilities.completion,
            github_configured: capabilities.hosting,
        }
    }

    async fn publish_if_requested(
        &self,
        create_pr: bool,
        description: &str,
        location: &str,
        files: &ClassifiedBundle,
    ) -> Option<PublishResult> {
        if !create_pr {
            return None;
        }

        let request = PublishRequest::new(description, location, files.clone());
        let result = self.publisher.publish(&request).await;
        if let Some(reason) = result.failure_reason() {
            warn!("Pull request not created: {}", reason);
        }
        Some(result)
    }
}
