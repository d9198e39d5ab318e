//! JSON-over-HTTP surface for tfgen

pub mod response;
pub mod server;

pub use server::{ApiServer, router};
