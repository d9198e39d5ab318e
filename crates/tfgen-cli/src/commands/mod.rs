pub mod completions;
pub mod generate;
pub mod publish;
pub mod serve;
pub mod status;
pub mod templates;

use anyhow::Result;
use std::path::Path;
use tfgen_config::Config;
use tfgen_core::PublishResult;
use tfgen_engine::GenerationReport;

/// Config file (explicit path or platform default), then environment overrides
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let mut config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    config.apply_env()?;
    Ok(config)
}

/// Human-readable summary shared by `generate` and `publish`
pub fn print_report(report: &GenerationReport) {
    println!("{}", report.message);
    println!("  Saved to: {}", report.saved_path.display());

    println!("  Files:");
    for file in report.files.file_names() {
        println!("    {}", file);
    }

    match &report.publish {
        Some(PublishResult::Published(pr)) => {
            println!("  PR #{}: {}", pr.pr_number, pr.pr_url);
            println!("  Branch: {}", pr.branch_name);
            if !pr.branch_creation.is_confirmed() {
                println!("  ⚠ Branch may already have existed");
            }
            let unconfirmed = pr.uploads.iter().filter(|u| !u.outcome.is_confirmed()).count();
            if unconfirmed > 0 {
                println!("  ⚠ {} upload(s) not confirmed", unconfirmed);
            }
        }
        Some(PublishResult::Failed { reason, .. }) => {
            println!("  PR not created: {}", reason);
        }
        None => {}
    }
}
