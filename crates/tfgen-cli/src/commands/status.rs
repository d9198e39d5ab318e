use anyhow::Result;
use tfgen_engine::Orchestrator;

pub async fn handle(orchestrator: &Orchestrator, pr_number: u64, json: bool) -> Result<()> {
    let record = orchestrator.query_status(pr_number).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    println!("PR #{}", record.pr_number);
    if let Some(title) = &record.title {
        println!("  Title: {}", title);
    }
    if let Some(url) = &record.pr_url {
        println!("  URL: {}", url);
    }
    println!("  State: {} (merged: {})", record.state, record.merged);
    println!("  {}", record.message);

    Ok(())
}
