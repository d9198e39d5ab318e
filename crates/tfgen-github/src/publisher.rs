//! Branch + files + pull request workflow
//!
//! The base branch lookup and the pull request creation are enforced. Branch
//! creation and file uploads are not: their outcome is recorded as
//! [`BestEffort`] and the workflow moves on. A branch name that already exists
//! therefore receives the uploads on top of whatever it already contains.

use std::sync::Arc;

use tfgen_config::GitHubConfig;
use tfgen_core::clock::branch_stamp;
use tfgen_core::{
    BestEffort, Clock, Error, PublishRequest, PublishResult, PublishedPr, Result, Role,
    SystemClock, UploadAttempt,
};
use tracing::{info, warn};

use crate::client::{CreatePull, GitHubClient, NewPullRequest};

/// Pull requests always target this branch
pub const BASE_BRANCH: &str = "main";

const TITLE_PREFIX: &str = "🤖 Copilot: ";
const TITLE_MAX_CHARS: usize = 60;

/// Pull request title: prefix plus the first 60 characters of the description
pub fn pr_title(description: &str) -> String {
    let mut chars = description.chars();
    let head: String = chars.by_ref().take(TITLE_MAX_CHARS).collect();
    let ellipsis = if chars.next().is_some() { "..." } else { "" };
    format!("{}{}{}", TITLE_PREFIX, head, ellipsis)
}

pub fn pr_body(description: &str) -> String {
    format!(
        "## Terraform Infrastructure Request\n\n**Prompt:** {}\n\n---\n\n*Generated by Copilot Terraform Agent*",
        description
    )
}

/// `deployments/<branch with / replaced by ->/<role>.tf`
pub fn deployment_path(branch: &str, role: Role) -> String {
    format!("deployments/{}/{}", branch.replace('/', "-"), role.file_name())
}

pub struct Publisher {
    config: GitHubConfig,
    clock: Arc<dyn Clock>,
}

impl Publisher {
    pub fn new(config: GitHubConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: GitHubConfig, clock: Arc<dyn Clock>) -> Self {
        Self { config, clock }
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// Run the workflow; every failure comes back as `PublishResult::Failed`
    pub async fn publish(&self, request: &PublishRequest) -> PublishResult {
        let client = match GitHubClient::from_config(&self.config) {
            Ok(client) => client,
            Err(e) => {
                warn!("Skipping publish: {}", e);
                return e.into();
            }
        };

        match self.run(&client, request).await {
            Ok(pr) => {
                info!("PR created: {}", pr.pr_url);
                PublishResult::Published(pr)
            }
            Err(e) => {
                warn!("Publish to {} failed: {}", client.repo(), e);
                e.into()
            }
        }
    }

    async fn run(&self, client: &GitHubClient, request: &PublishRequest) -> Result<PublishedPr> {
        let base_sha = client
            .branch_head(BASE_BRANCH)
            .await?
            .ok_or_else(|| Error::RemoteCall("Failed to get main branch".to_string()))?;

        let branch_name = match &request.branch_name {
            Some(name) => name.clone(),
            None => format!("terraform/copilot-{}", branch_stamp(self.clock.now())?),
        };
        info!(
            "Publishing to {} on branch {} (location: {})",
            client.repo(),
            branch_name,
            request.location
        );

        let branch_creation = client.create_branch(&branch_name, &base_sha).await?;
        if let BestEffort::Attempted { detail } = &branch_creation {
            warn!("Branch creation not confirmed, continuing: {}", detail);
        }

        let mut uploads = Vec::new();
        for role in request.bundle.non_empty_roles() {
            let path = deployment_path(&branch_name, role);
            let message = format!("Add {}", role.file_name());
            let outcome = client
                .put_file(&path, request.bundle.get(role), &message, &branch_name)
                .await?;
            if let BestEffort::Attempted { detail } = &outcome {
                warn!("Upload of {} not confirmed, continuing: {}", path, detail);
            }
            uploads.push(UploadAttempt { path, outcome });
        }

        let title = pr_title(&request.description);
        let body = pr_body(&request.description);
        let pull = NewPullRequest {
            title: &title,
            body: &body,
            head: &branch_name,
            base: BASE_BRANCH,
        };

        match client.create_pull_request(&pull).await? {
            CreatePull::Created(pr) => Ok(PublishedPr {
                branch_name,
                pr_url: pr.html_url.unwrap_or_default(),
                pr_number: pr.number,
                branch_creation,
                uploads,
            }),
            CreatePull::Rejected { body, .. } => {
                Err(Error::RemoteCall(format!("Failed to create PR: {}", body)))
            }
        }
    }
}
