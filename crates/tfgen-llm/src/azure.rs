use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tfgen_config::OpenAiConfig;
use tfgen_core::{Error, Result};
use tracing::{debug, info};

use crate::service::CompletionService;

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat completions against an Azure OpenAI deployment
pub struct AzureOpenAiClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    deployment: String,
    api_version: String,
    temperature: f64,
    max_tokens: u32,
}

impl AzureOpenAiClient {
    /// Build a client; fails with a configuration error when endpoint or key is missing
    pub fn from_config(config: &OpenAiConfig) -> Result<Self> {
        if !config.is_configured() {
            return Err(Error::Configuration(
                "Azure OpenAI is not configured. Set AZURE_OPENAI_ENDPOINT and AZURE_OPENAI_API_KEY."
                    .to_string(),
            ));
        }
        let endpoint = config.endpoint.as_deref().unwrap_or_default();
        let api_key = config.api_key.as_deref().unwrap_or_default();

        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("tfgen/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| Error::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            deployment: config.deployment.clone(),
            api_version: config.api_version.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions",
            self.endpoint, self.deployment
        )
    }
}

#[async_trait]
impl CompletionService for AzureOpenAiClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let body = ChatCompletionRequest {
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        info!("Requesting completion from deployment {}", self.deployment);

        let response = self
            .client
            .post(self.completions_url())
            .query(&[("api-version", self.api_version.as_str())])
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::RemoteCall(format!("Completion request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Error::RemoteCall(format!(
                "Completion service returned HTTP {}: {}",
                status.as_u16(),
                text
            )));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::RemoteCall(format!("Failed to read completion: {}", e)))?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::RemoteCall("Completion contained no choices".to_string()))?;
        let content = choice
            .message
            .content
            .ok_or_else(|| Error::RemoteCall("Completion contained no content".to_string()))?;

        debug!("Completion returned {} chars", content.len());
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_partial_json, header, method, path, query_param},
    };

    fn config_for(server: &MockServer) -> OpenAiConfig {
        OpenAiConfig {
            endpoint: Some(format!("{}/", server.uri())),
            api_key: Some("test-key".to_string()),
            ..OpenAiConfig::default()
        }
    }

    #[test]
    fn test_unconfigured_is_configuration_error() {
        let result = AzureOpenAiClient::from_config(&OpenAiConfig::default());
        assert!(matches!(result, Err(Error::Configuration(_))));

        let half = OpenAiConfig {
            endpoint: Some("https://example.openai.azure.com".into()),
            ..OpenAiConfig::default()
        };
        assert!(matches!(
            AzureOpenAiClient::from_config(&half),
            Err(Error::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/openai/deployments/gpt-4o/chat/completions"))
            .and(query_param("api-version", "2024-08-01-preview"))
            .and(header("api-key", "test-key"))
            .and(body_partial_json(serde_json::json!({
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "make a vnet"}
                ],
                "max_tokens": 4000
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [
                    {"message": {"role": "assistant", "content": "```hcl\nlocals {}\n```"}}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = AzureOpenAiClient::from_config(&config_for(&server)).unwrap();
        let reply = client.complete("sys", "make a vnet").await.unwrap();

        assert_eq!(reply, "```hcl\nlocals {}\n```");
    }

    #[tokio::test]
    async fn test_http_error_is_remote_call_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let client = AzureOpenAiClient::from_config(&config_for(&server)).unwrap();
        let err = client.complete("sys", "user").await.unwrap_err();

        assert!(matches!(err, Error::RemoteCall(_)));
        assert!(err.to_string().contains("429"));
    }

    #[tokio::test]
    async fn test_empty_choices_is_remote_call_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
            )
            .mount(&server)
            .await;

        let client = AzureOpenAiClient::from_config(&config_for(&server)).unwrap();
        let err = client.complete("sys", "user").await.unwrap_err();

        assert!(matches!(err, Error::RemoteCall(_)));
        assert_eq!(err.to_string(), "Completion contained no choices");
    }

    #[tokio::test]
    async fn test_null_content_is_remote_call_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": null}}]
            })))
            .mount(&server)
            .await;

        let client = AzureOpenAiClient::from_config(&config_for(&server)).unwrap();
        let err = client.complete("sys", "user").await.unwrap_err();

        assert!(matches!(err, Error::RemoteCall(_)));
        assert_eq!(err.to_string(), "Completion contained no content");
    }
}
