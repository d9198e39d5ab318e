use anyhow::Result;
use tfgen_engine::Orchestrator;

pub fn handle(orchestrator: &Orchestrator, json: bool) -> Result<()> {
    let templates = orchestrator.list_templates();

    if json {
        println!("{}", serde_json::to_string_pretty(templates)?);
        return Ok(());
    }

    println!("Templates:");
    for template in templates {
        println!("  {} - {}", template.id, template.name);
        println!("    {}", template.description);
        println!("    Prompt: {}", template.prompt);
    }

    Ok(())
}
