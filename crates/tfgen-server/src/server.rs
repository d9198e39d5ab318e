use axum::{
    Json, Router,
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use std::sync::Arc;
use tfgen_core::{Error, Template};
use tfgen_engine::{GenerateRequest, HealthReport, Orchestrator, PublishCodeRequest};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::response::{Success, error_response};

pub struct ApiServer;

#[derive(Clone)]
struct AppState {
    orchestrator: Arc<Orchestrator>,
}

#[derive(Serialize)]
struct TemplateList {
    templates: &'static [Template],
}

impl ApiServer {
    pub async fn serve(orchestrator: Arc<Orchestrator>, host: &str, port: u16) -> anyhow::Result<()> {
        let app = router(orchestrator);

        let addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&addr).await?;

        info!("API server listening on {}", addr);

        axum::serve(listener, app).await?;

        Ok(())
    }
}

pub fn router(orchestrator: Arc<Orchestrator>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(api_health))
        .route("/api/generate", post(api_generate))
        .route("/api/copilot/generate", post(api_copilot_generate))
        .route("/api/copilot/status/:pr_number", get(api_copilot_status))
        .route("/api/templates", get(api_templates))
        .layer(cors)
        .with_state(AppState { orchestrator })
}

/// GET /api/health
async fn api_health(State(state): State<AppState>) -> Json<HealthReport> {
    Json(state.orchestrator.health())
}

/// POST /api/generate - prompt → completion → files → optional PR
///
/// A missing or malformed body is treated as an empty prompt.
async fn api_generate(
    State(state): State<AppState>,
    payload: Option<Json<GenerateRequest>>,
) -> Response {
    let request = payload
        .map(|Json(req)| req)
        .unwrap_or_else(|| GenerateRequest::new(""));

    match state.orchestrator.generate_from_prompt(&request).await {
        Ok(report) => Success::new(report).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/copilot/generate - pre-generated code → files → optional PR
async fn api_copilot_generate(
    State(state): State<AppState>,
    payload: Option<Json<PublishCodeRequest>>,
) -> Response {
    let request = payload
        .map(|Json(req)| req)
        .unwrap_or_else(|| PublishCodeRequest::new(""));

    match state.orchestrator.publish_pregenerated(&request).await {
        Ok(report) => Success::new(report).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/copilot/status/:pr_number
async fn api_copilot_status(
    State(state): State<AppState>,
    Path(pr_number): Path<String>,
) -> Response {
    let Ok(pr_number) = pr_number.parse::<u64>() else {
        return error_response(Error::Validation(format!(
            "Invalid PR number: {}",
            pr_number
        )));
    };

    match state.orchestrator.query_status(pr_number).await {
        Ok(record) => Success::new(record).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/templates
async fn api_templates(State(state): State<AppState>) -> Response {
    Success::new(TemplateList {
        templates: state.orchestrator.list_templates(),
    })
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use tfgen_config::GitHubConfig;
    use tfgen_github::{Publisher, StatusReporter};
    use tfgen_storage::ArtifactStore;
    use tower::ServiceExt;
    use wiremock::{Mock, MockServer, ResponseTemplate, matchers::method};

    fn test_router(root: &std::path::Path, github: GitHubConfig) -> Router {
        let orchestrator = Orchestrator::new(
            None,
            ArtifactStore::new(root),
            Publisher::new(github.clone()),
            StatusReporter::new(github),
        );
        router(Arc::new(orchestrator))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let temp = tempfile::tempdir().unwrap();
        let app = test_router(temp.path(), GitHubConfig::default());

        let (status, body) = send(app, get_request("/api/health")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["azure_openai_configured"], false);
        assert_eq!(body["github_configured"], false);
    }

    #[tokio::test]
    async fn test_templates() {
        let temp = tempfile::tempdir().unwrap();
        let app = test_router(temp.path(), GitHubConfig::default());

        let (status, body) = send(app, get_request("/api/templates")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["templates"].as_array().unwrap().len(), 6);
        assert_eq!(body["templates"][0]["id"], "storage");
    }

    #[tokio::test]
    async fn test_generate_without_body_is_bad_request() {
        let temp = tempfile::tempdir().unwrap();
        let app = test_router(temp.path(), GitHubConfig::default());

        let request = Request::builder()
            .method("POST")
            .uri("/api/generate")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            serde_json::json!({"success": false, "error": "Prompt is required"})
        );
    }

    #[tokio::test]
    async fn test_generate_without_completion_service_is_server_error() {
        let temp = tempfile::tempdir().unwrap();
        let app = test_router(temp.path(), GitHubConfig::default());

        let (status, body) = send(
            app,
            post_json("/api/generate", serde_json::json!({"prompt": "Create a VM"})),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert!(
            body["error"]
                .as_str()
                .unwrap()
                .starts_with("Azure OpenAI is not configured")
        );
    }

    #[tokio::test]
    async fn test_copilot_generate_saves_without_pr() {
        let temp = tempfile::tempdir().unwrap();
        let app = test_router(temp.path(), GitHubConfig::default());

        let (status, body) = send(
            app,
            post_json(
                "/api/copilot/generate",
                serde_json::json!({
                    "terraform_code": "```hcl\noutput \"x\" {\n  value = 1\n}\n```",
                    "create_pr": false
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["files"]["outputs"], "output \"x\" {\n  value = 1\n}");
        assert_eq!(body["files"]["main"], "");
        assert!(body["pr_url"].is_null());
        assert_eq!(body["message"], "✅ Terraform code saved successfully.");
    }

    #[tokio::test]
    async fn test_copilot_generate_requires_code() {
        let temp = tempfile::tempdir().unwrap();
        let app = test_router(temp.path(), GitHubConfig::default());

        let (status, body) = send(
            app,
            post_json("/api/copilot/generate", serde_json::json!({"description": "x"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_status_rejects_non_numeric_pr() {
        let temp = tempfile::tempdir().unwrap();
        let app = test_router(temp.path(), GitHubConfig::default());

        let (status, body) = send(app, get_request("/api/copilot/status/abc")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid PR number: abc");
    }

    #[tokio::test]
    async fn test_status_unknown_pr_is_not_found() {
        let temp = tempfile::tempdir().unwrap();
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let github = GitHubConfig {
            token: Some("ghp_test".into()),
            repo_url: Some("https://github.com/acme/infra".into()),
            api_base: server.uri(),
            request_timeout_secs: None,
        };
        let app = test_router(temp.path(), github);

        let (status, body) = send(app, get_request("/api/copilot/status/41")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            serde_json::json!({"success": false, "error": "PR not found"})
        );
    }

    #[tokio::test]
    async fn test_status_reports_deployment() {
        let temp = tempfile::tempdir().unwrap();
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "number": 8,
                "state": "closed",
                "merged": false,
                "html_url": "https://github.com/acme/infra/pull/8"
            })))
            .mount(&server)
            .await;

        let github = GitHubConfig {
            token: Some("ghp_test".into()),
            repo_url: Some("https://github.com/acme/infra".into()),
            api_base: server.uri(),
            request_timeout_secs: None,
        };
        let app = test_router(temp.path(), github);

        let (status, body) = send(app, get_request("/api/copilot/status/8")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["pr_number"], 8);
        assert_eq!(body["deployment_status"], "cancelled");
        assert_eq!(body["message"], "❌ PR was closed without merging.");
    }
}
