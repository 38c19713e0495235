use thiserror::Error;
use uuid::Uuid;

use crate::pointer::PointerError;

#[derive(Error, Debug)]
pub enum DocrefError {
    #[error("Record not found: {0}")]
    RecordNotFound(Uuid),
    #[error("Record is deleted: {0}")]
    RecordDeleted(Uuid),
    #[error("Pointer error: {0}")]
    Pointer(#[from] PointerError),
    #[error("No URI set at '{0}'")]
    UnresolvedUri(String),
    #[error("Value at '{0}' is not a string URI")]
    InvalidUriValue(String),
    #[error("No backend registered for scheme '{0}'")]
    UnknownScheme(String),
    #[error("Read-only backend: cannot {0}")]
    ReadOnly(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Store error: {0}")]
    Store(String),
    #[error("Api error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, DocrefError>;
