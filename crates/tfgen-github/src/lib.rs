//! GitHub publishing for tfgen
//!
//! This crate provides:
//! - Repository identity parsing (`https://<host>/<owner>/<repo>[.git]`)
//! - A thin REST client over refs, contents and pulls
//! - `Publisher`: branch + files + pull request
//! - `StatusReporter`: pull request → deployment status

pub mod client;
pub mod publisher;
pub mod repo;
pub mod status;

pub use client::GitHubClient;
pub use publisher::{Publisher, pr_body, pr_title};
pub use repo::RepoId;
pub use status::StatusReporter;
