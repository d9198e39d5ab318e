//! Error types for tfgen-storage

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] tfgen_core::Error),
}

impl From<StorageError> for tfgen_core::Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Io(e) => tfgen_core::Error::Io(e),
            StorageError::Serialization(e) => tfgen_core::Error::Serialization(e),
            StorageError::Core(e) => e,
        }
    }
}
