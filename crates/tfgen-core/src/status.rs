//! Deployment status projection of a pull request

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentStatus {
    Deployed,
    Cancelled,
    PendingReview,
}

impl DeploymentStatus {
    /// Merged wins over state; a closed, unmerged PR is cancelled; anything
    /// else is still waiting on review.
    pub fn classify(merged: bool, state: &str) -> Self {
        if merged {
            DeploymentStatus::Deployed
        } else if state == "closed" {
            DeploymentStatus::Cancelled
        } else {
            DeploymentStatus::PendingReview
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            DeploymentStatus::Deployed => "✅ Infrastructure has been deployed.",
            DeploymentStatus::Cancelled => "❌ PR was closed without merging.",
            DeploymentStatus::PendingReview => "⏳ PR is awaiting review and approval.",
        }
    }
}

/// Read-only view of a pull request, computed fresh on every query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusRecord {
    pub pr_number: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pr_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub state: String,
    pub merged: bool,
    pub deployment_status: DeploymentStatus,
    pub message: String,
}

impl StatusRecord {
    pub fn new(
        pr_number: u64,
        state: String,
        merged: bool,
        pr_url: Option<String>,
        title: Option<String>,
    ) -> Self {
        let deployment_status = DeploymentStatus::classify(merged, &state);
        Self {
            pr_number,
            pr_url,
            title,
            state,
            merged,
            deployment_status,
            message: deployment_status.message().to_string(),
        }
    }
}
