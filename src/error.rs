use thiserror::Error;

use crate::domain::entities::kind::EntityKind;
use crate::domain::entities::record::ValidationError;
use crate::usecase::ports::storage::StorageError;

/// Errors surfaced by stores and services.
#[derive(Error, Debug)]
pub enum CrmError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("stored data under '{key}' is corrupt: {source}")]
    Corrupt {
        key: String,
        source: serde_json::Error,
    },

    #[error("failed to serialize '{key}': {source}")]
    Serialize {
        key: String,
        source: serde_json::Error,
    },

    #[error("invalid record: {0}")]
    InvalidRecord(serde_json::Error),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("{kind} record not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("import failed: {0}")]
    Import(String),

    #[error("export failed: {0}")]
    Export(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CrmError>;
