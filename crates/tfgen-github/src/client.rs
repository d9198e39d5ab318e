use std::time::Duration;

use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};
use tfgen_config::GitHubConfig;
use tfgen_core::{BestEffort, Error, Result};
use tracing::debug;

use crate::repo::RepoId;

#[derive(Debug, Deserialize)]
struct GitRef {
    object: GitObject,
}

#[derive(Debug, Deserialize)]
struct GitObject {
    sha: String,
}

#[derive(Debug, Serialize)]
struct CreateRef<'a> {
    #[serde(rename = "ref")]
    git_ref: String,
    sha: &'a str,
}

#[derive(Debug, Serialize)]
struct PutContents<'a> {
    message: &'a str,
    content: String,
    branch: &'a str,
}

#[derive(Debug, Serialize)]
pub struct NewPullRequest<'a> {
    pub title: &'a str,
    pub body: &'a str,
    pub head: &'a str,
    pub base: &'a str,
}

/// Subset of the pull request resource that tfgen reads
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub merged: bool,
    #[serde(default)]
    pub title: Option<String>,
}

/// Response to a pull request creation
#[derive(Debug)]
pub enum CreatePull {
    Created(PullRequest),
    Rejected { status: u16, body: String },
}

/// REST client scoped to one repository
pub struct GitHubClient {
    http: reqwest::Client,
    api_base: String,
    repo: RepoId,
}

fn transport(err: reqwest::Error) -> Error {
    Error::RemoteCall(err.to_string())
}

impl GitHubClient {
    /// Build a client; fails with a configuration error when token or
    /// repository are missing or the repository URL cannot be parsed
    pub fn from_config(config: &GitHubConfig) -> Result<Self> {
        if !config.is_configured() {
            return Err(Error::Configuration("GitHub not configured".to_string()));
        }
        let token = config.token.as_deref().unwrap_or_default();
        let repo = RepoId::parse(config.repo_url.as_deref().unwrap_or_default())?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
            .map_err(|_| Error::Configuration("GitHub token is not a valid header value".into()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );

        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("tfgen/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers);
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| Error::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            repo,
        })
    }

    pub fn repo(&self) -> &RepoId {
        &self.repo
    }

    fn url(&self, tail: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.api_base, self.repo.owner, self.repo.name, tail
        )
    }

    /// Head commit of `branch`, or `None` if the lookup did not return 200
    pub async fn branch_head(&self, branch: &str) -> Result<Option<String>> {
        let url = self.url(&format!("git/ref/heads/{}", branch));
        debug!("GET {}", url);

        let response = self.http.get(&url).send().await.map_err(transport)?;
        if response.status() != StatusCode::OK {
            debug!("Branch lookup returned {}", response.status());
            return Ok(None);
        }

        let git_ref: GitRef = response.json().await.map_err(transport)?;
        Ok(Some(git_ref.object.sha))
    }

    /// Create `refs/heads/<branch>` at `sha`; the response status is recorded, not enforced
    pub async fn create_branch(&self, branch: &str, sha: &str) -> Result<BestEffort> {
        let url = self.url("git/refs");
        debug!("POST {} ({})", url, branch);

        let response = self
            .http
            .post(&url)
            .json(&CreateRef {
                git_ref: format!("refs/heads/{}", branch),
                sha,
            })
            .send()
            .await
            .map_err(transport)?;

        Ok(best_effort(response).await)
    }

    /// Create or update a file on `branch`; the response status is recorded, not enforced
    pub async fn put_file(
        &self,
        path: &str,
        content: &str,
        message: &str,
        branch: &str,
    ) -> Result<BestEffort> {
        let url = self.url(&format!("contents/{}", path));
        debug!("PUT {}", url);

        let response = self
            .http
            .put(&url)
            .json(&PutContents {
                message,
                content: STANDARD.encode(content.as_bytes()),
                branch,
            })
            .send()
            .await
            .map_err(transport)?;

        Ok(best_effort(response).await)
    }

    pub async fn create_pull_request(&self, pull: &NewPullRequest<'_>) -> Result<CreatePull> {
        let url = self.url("pulls");
        debug!("POST {} ({} -> {})", url, pull.head, pull.base);

        let response = self.http.post(&url).json(pull).send().await.map_err(transport)?;
        let status = response.status();
        if status == StatusCode::CREATED {
            let pr: PullRequest = response.json().await.map_err(transport)?;
            Ok(CreatePull::Created(pr))
        } else {
            let body = response.text().await.map_err(transport)?;
            Ok(CreatePull::Rejected {
                status: status.as_u16(),
                body,
            })
        }
    }

    /// Pull request by number, or `None` if the lookup did not return 200
    pub async fn get_pull_request(&self, number: u64) -> Result<Option<PullRequest>> {
        let url = self.url(&format!("pulls/{}", number));
        debug!("GET {}", url);

        let response = self.http.get(&url).send().await.map_err(transport)?;
        if response.status() != StatusCode::OK {
            return Ok(None);
        }

        let pr: PullRequest = response.json().await.map_err(transport)?;
        Ok(Some(pr))
    }
}

async fn best_effort(response: Response) -> BestEffort {
    let status = response.status();
    if status.is_success() {
        return BestEffort::Confirmed;
    }
    let body = response.text().await.unwrap_or_default();
    BestEffort::Attempted {
        detail: format!("HTTP {}: {}", status.as_u16(), body),
    }
}
