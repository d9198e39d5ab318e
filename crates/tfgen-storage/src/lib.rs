//! Storage layer for tfgen
//!
//! This crate provides:
//! - Generation directories (`terraform_<YYYYMMDD_HHMMSS>`)
//! - `<role>.tf` files, `metadata.json` and `README.md` per generation

pub mod error;
pub mod metadata;
pub mod store;

pub use error::{Result, StorageError};
pub use metadata::GenerationMetadata;
pub use store::{ArtifactStore, SavedArtifact};
