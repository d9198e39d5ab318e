//! Core domain models and logic for tfgen
//!
//! This crate contains:
//! - Domain models (ClassifiedBundle, PublishRequest, StatusRecord, Template)
//! - Block extractor (fenced code → file roles)
//! - Clock abstraction for timestamp-derived identifiers

pub mod bundle;
pub mod clock;
pub mod error;
pub mod extract;
pub mod publish;
pub mod status;
pub mod template;

pub use bundle::{ClassifiedBundle, Role};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{Error, ErrorKind, Result};
pub use extract::extract_blocks;
pub use publish::{BestEffort, PublishRequest, PublishResult, PublishedPr, UploadAttempt};
pub use status::{DeploymentStatus, StatusRecord};
pub use template::{Template, list_templates};
