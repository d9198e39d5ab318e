//! Publish request / result domain model

use serde::{Deserialize, Serialize};

use crate::bundle::ClassifiedBundle;
use crate::error::{Error, ErrorKind};

/// Content to push as a branch plus pull request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishRequest {
    pub description: String,
    pub location: String,
    pub bundle: ClassifiedBundle,
    /// Generated from the clock when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_name: Option<String>,
}

impl PublishRequest {
    pub fn new(
        description: impl Into<String>,
        location: impl Into<String>,
        bundle: ClassifiedBundle,
    ) -> Self {
        Self {
            description: description.into(),
            location: location.into(),
            bundle,
            branch_name: None,
        }
    }

    pub fn with_branch_name(mut self, branch_name: impl Into<String>) -> Self {
        self.branch_name = Some(branch_name.into());
        self
    }
}

/// Outcome of a remote call whose status is deliberately not enforced.
///
/// Branch creation and file uploads continue regardless of the response; this
/// records whether the remote acknowledged the call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BestEffort {
    Confirmed,
    Attempted { detail: String },
}

impl BestEffort {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, BestEffort::Confirmed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadAttempt {
    pub path: String,
    #[serde(flatten)]
    pub outcome: BestEffort,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedPr {
    pub branch_name: String,
    pub pr_url: String,
    pub pr_number: u64,
    pub branch_creation: BestEffort,
    pub uploads: Vec<UploadAttempt>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PublishResult {
    Published(PublishedPr),
    Failed { kind: ErrorKind, reason: String },
}

impl PublishResult {
    pub fn published(&self) -> Option<&PublishedPr> {
        match self {
            PublishResult::Published(pr) => Some(pr),
            PublishResult::Failed { .. } => None,
        }
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            PublishResult::Published(_) => None,
            PublishResult::Failed { reason, .. } => Some(reason.as_str()),
        }
    }

    pub fn is_published(&self) -> bool {
        self.published().is_some()
    }
}

impl From<Error> for PublishResult {
    fn from(err: Error) -> Self {
        PublishResult::Failed {
            kind: err.kind(),
            reason: err.to_string(),
        }
    }
}
