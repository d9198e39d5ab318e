use anyhow::{Context, Result};
use std::path::Path;
use tfgen_engine::{Orchestrator, PublishCodeRequest};
use tokio::io::{AsyncRead, AsyncReadExt};

pub async fn handle(
    orchestrator: &Orchestrator,
    file: &Path,
    description: String,
    location: String,
    create_pr: bool,
    json: bool,
) -> Result<()> {
    let terraform_code = read_code(file).await?;

    let request = PublishCodeRequest {
        terraform_code,
        description,
        location,
        create_pr,
    };

    let report = orchestrator.publish_pregenerated(&request).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        super::print_report(&report);
    }

    Ok(())
}

/// Read the code from `file`, or from stdin when `file` is `-`
async fn read_code(file: &Path) -> Result<String> {
    if file == Path::new("-") {
        read_all(tokio::io::stdin())
            .await
            .context("Failed to read stdin")
    } else {
        tokio::fs::read_to_string(file)
            .await
            .with_context(|| format!("Failed to read {}", file.display()))
    }
}

async fn read_all<R: AsyncRead + Unpin>(mut reader: R) -> std::io::Result<String> {
    let mut content = String::new();
    reader.read_to_string(&mut content).await?;
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_all_from_async_reader() {
        let input: &[u8] = b"```hcl\nlocals {}\n```\n";
        let content = read_all(input).await.unwrap();
        assert_eq!(content, "```hcl\nlocals {}\n```\n");
    }

    #[tokio::test]
    async fn test_read_code_from_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("main.tf");
        std::fs::write(&path, "resource \"x\" \"y\" {}").unwrap();

        assert_eq!(read_code(&path).await.unwrap(), "resource \"x\" \"y\" {}");
    }

    #[tokio::test]
    async fn test_read_code_missing_file_names_path() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("absent.tf");

        let err = read_code(&path).await.unwrap_err();
        assert!(err.to_string().contains("absent.tf"));
    }
}
