use anyhow::Result;
use tfgen_engine::{GenerateRequest, Orchestrator};

pub async fn handle(
    orchestrator: &Orchestrator,
    prompt: String,
    location: String,
    resource_group: Option<String>,
    create_pr: bool,
    json: bool,
) -> Result<()> {
    let request = GenerateRequest {
        prompt,
        location,
        resource_group_name: resource_group.unwrap_or_default(),
        create_pr,
    };

    let report = orchestrator.generate_from_prompt(&request).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        super::print_report(&report);
    }

    Ok(())
}
