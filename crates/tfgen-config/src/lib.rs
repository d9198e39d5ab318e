use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Service configuration for tfgen
///
/// Loaded from `config.toml`, then overridden by environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_output_directory")]
    pub output_directory: PathBuf,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub openai: OpenAiConfig,

    #[serde(default)]
    pub github: GitHubConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// Azure OpenAI completion endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_deployment")]
    pub deployment: String,

    #[serde(default = "default_api_version")]
    pub api_version: String,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// No timeout unless set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

/// GitHub repository that receives generated code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// e.g. `https://github.com/owner/repo.git`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,

    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// No timeout unless set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

/// Which external services are usable with the current configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub completion: bool,
    pub hosting: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_directory: default_output_directory(),
            server: ServerConfig::default(),
            openai: OpenAiConfig::default(),
            github: GitHubConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            deployment: default_deployment(),
            api_version: default_api_version(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            request_timeout_secs: None,
        }
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            repo_url: None,
            api_base: default_api_base(),
            request_timeout_secs: None,
        }
    }
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("generated_terraform")
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5001
}

fn default_deployment() -> String {
    "gpt-4o".to_string()
}

fn default_api_version() -> String {
    "2024-08-01-preview".to_string()
}

fn default_temperature() -> f64 {
    0.3
}

fn default_max_tokens() -> u32 {
    4000
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

fn is_set(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

impl OpenAiConfig {
    /// Endpoint and key are both required
    pub fn is_configured(&self) -> bool {
        is_set(&self.endpoint) && is_set(&self.api_key)
    }
}

impl GitHubConfig {
    /// Token and repository URL are both required
    pub fn is_configured(&self) -> bool {
        is_set(&self.token) && is_set(&self.repo_url)
    }
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from `path`, writing a default file there if missing
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(&config)?;
            std::fs::write(path, content)?;
            Ok(config)
        }
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "tfgen", "tfgen") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.tfgen/config.toml")
        }
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) -> anyhow::Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup; empty values are ignored
    pub fn apply_overrides<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("AZURE_OPENAI_ENDPOINT") {
            self.openai.endpoint = Some(v);
        }
        if let Some(v) = get("AZURE_OPENAI_API_KEY") {
            self.openai.api_key = Some(v);
        }
        if let Some(v) = get("AZURE_OPENAI_DEPLOYMENT") {
            self.openai.deployment = v;
        }
        if let Some(v) = get("AZURE_OPENAI_API_VERSION") {
            self.openai.api_version = v;
        }
        if let Some(v) = get("GITHUB_TOKEN") {
            self.github.token = Some(v);
        }
        if let Some(v) = get("GITHUB_REPO_URL") {
            self.github.repo_url = Some(v);
        }
        if let Some(v) = get("GITHUB_API_URL") {
            self.github.api_base = v;
        }
        if let Some(v) = get("OUTPUT_DIRECTORY") {
            self.output_directory = PathBuf::from(v);
        }
        if let Some(v) = get("TFGEN_HOST") {
            self.server.host = v;
        }
        if let Some(v) = get("TFGEN_PORT") {
            self.server.port = v
                .trim()
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("Invalid TFGEN_PORT '{}': {}", v, e))?;
        }

        Ok(())
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            completion: self.openai.is_configured(),
            hosting: self.github.is_configured(),
        }
    }
}
