use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use tfgen_core::{Error, Result};

/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static REPO_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://[^/]+/([^/]+)/([^/]+?)(?:\.git)?(?:/.*)?$").unwrap()
});

/// Owner and name of a hosted repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

impl RepoId {
    pub fn parse(url: &str) -> Result<Self> {
        let caps = REPO_URL_RE
            .captures(url.trim())
            .ok_or_else(|| Error::Configuration(format!("Invalid GitHub repo URL: {}", url)))?;

        Ok(Self {
            owner: caps[1].to_string(),
            name: caps[2].to_string(),
        })
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_and_git_suffix() {
        let plain = RepoId::parse("https://github.com/acme/infra").unwrap();
        assert_eq!(plain.owner, "acme");
        assert_eq!(plain.name, "infra");

        let git = RepoId::parse("https://github.com/acme/infra.git").unwrap();
        assert_eq!(git, plain);
        assert_eq!(git.to_string(), "acme/infra");
    }

    #[test]
    fn test_parse_other_host_and_trailing_path() {
        let repo = RepoId::parse("https://ghe.example.com/platform/terraform-live/tree/main")
            .unwrap();
        assert_eq!(repo.owner, "platform");
        assert_eq!(repo.name, "terraform-live");
    }

    #[test]
    fn test_parse_rejects_non_https() {
        assert!(matches!(
            RepoId::parse("git@github.com:acme/infra.git"),
            Err(Error::Configuration(_))
        ));
        assert!(RepoId::parse("https://github.com/acme").is_err());
    }
}
