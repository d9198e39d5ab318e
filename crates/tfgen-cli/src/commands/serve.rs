use anyhow::Result;
use std::sync::Arc;
use tfgen_engine::Orchestrator;
use tfgen_server::ApiServer;
use tracing::{info, warn};

fn describe(configured: bool) -> &'static str {
    if configured { "configured" } else { "not configured" }
}

pub async fn handle(orchestrator: Arc<Orchestrator>, host: &str, port: u16) -> Result<()> {
    let capabilities = orchestrator.capabilities();

    println!("Starting tfgen API on {}:{}", host, port);
    info!("Azure OpenAI: {}", describe(capabilities.completion));
    info!("GitHub: {}", describe(capabilities.hosting));
    if !capabilities.completion {
        warn!("/api/generate will fail until AZURE_OPENAI_ENDPOINT and AZURE_OPENAI_API_KEY are set");
    }

    ApiServer::serve(orchestrator, host, port).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_capability() {
        assert_eq!(describe(true), "configured");
        assert_eq!(describe(false), "not configured");
    }
}
