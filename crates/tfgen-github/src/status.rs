use tfgen_config::GitHubConfig;
use tfgen_core::{Error, Result, StatusRecord};
use tracing::debug;

use crate::client::GitHubClient;

/// Projects a pull request onto a deployment status
pub struct StatusReporter {
    config: GitHubConfig,
}

impl StatusReporter {
    pub fn new(config: GitHubConfig) -> Self {
        Self { config }
    }

    pub async fn query(&self, pr_number: u64) -> Result<StatusRecord> {
        let client = GitHubClient::from_config(&self.config)?;

        let pr = client
            .get_pull_request(pr_number)
            .await?
            .ok_or_else(|| Error::NotFound("PR not found".to_string()))?;
        debug!("PR #{} state={} merged={}", pr.number, pr.state, pr.merged);

        Ok(StatusRecord::new(
            pr_number,
            pr.state,
            pr.merged,
            pr.html_url,
            pr.title,
        ))
    }
}
