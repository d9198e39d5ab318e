use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use tfgen_engine::request::{DEFAULT_DESCRIPTION, DEFAULT_LOCATION};

#[derive(Parser)]
#[command(name = "tfgen")]
#[command(about = "Generate Terraform and publish it as pull requests", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: platform config directory)
    #[arg(long, global = true, env = "TFGEN_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<u16>,
    },

    /// Generate Terraform from a natural-language prompt
    Generate {
        /// What to build, e.g. "Create a storage account with a blob container"
        prompt: String,

        /// Azure region passed to the model
        #[arg(long, default_value = DEFAULT_LOCATION)]
        location: String,

        /// Resource group name passed to the model
        #[arg(long)]
        resource_group: Option<String>,

        /// Save locally without opening a pull request
        #[arg(long)]
        no_pr: bool,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Classify, save and publish Terraform produced elsewhere
    Publish {
        /// File with the code (fenced blocks or plain HCL); "-" reads stdin
        file: PathBuf,

        /// Pull request description
        #[arg(long, default_value = DEFAULT_DESCRIPTION)]
        description: String,

        #[arg(long, default_value = DEFAULT_LOCATION)]
        location: String,

        /// Save locally without opening a pull request
        #[arg(long)]
        no_pr: bool,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the deployment status of a pull request
    Status {
        /// Pull request number
        pr_number: u64,

        #[arg(long)]
        json: bool,
    },

    /// List starter prompt templates
    Templates {
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::try_parse_from(["tfgen", "generate", "Create a VM"]).unwrap();
        match cli.command {
            Commands::Generate {
                prompt,
                location,
                resource_group,
                no_pr,
                json,
            } => {
                assert_eq!(prompt, "Create a VM");
                assert_eq!(location, "eastus");
                assert!(resource_group.is_none());
                assert!(!no_pr);
                assert!(!json);
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["tfgen", "status", "12", "--config", "/tmp/tfgen.toml"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/tfgen.toml")));
        assert!(matches!(cli.command, Commands::Status { pr_number: 12, .. }));
    }
}
