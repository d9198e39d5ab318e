//! LLM completion client for tfgen
//!
//! This crate provides:
//! - `CompletionService` trait (system + user message → reply text)
//! - Azure OpenAI chat completions client
//! - The Terraform system prompt and prompt enrichment

pub mod azure;
pub mod prompt;
pub mod service;

pub use azure::AzureOpenAiClient;
pub use prompt::{TERRAFORM_SYSTEM_PROMPT, enhance_prompt};
pub use service::CompletionService;
