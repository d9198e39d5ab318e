use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    RemoteCall(String),

    #[error("{0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Timestamp formatting error: {0}")]
    Timestamp(#[from] time::error::Format),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Coarse classification of an [`Error`], used in structured responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Configuration,
    RemoteCall,
    NotFound,
    Internal,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::Configuration(_) => ErrorKind::Configuration,
            Error::RemoteCall(_) => ErrorKind::RemoteCall,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::Io(_) | Error::Serialization(_) | Error::Timestamp(_) | Error::Other(_) => {
                ErrorKind::Internal
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
