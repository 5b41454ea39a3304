//! Errors surfaced by the inventory handlers.

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, ValidationError};
use crate::ports::{DatasetStoreError, SummarySinkError};

/// Errors from inventory commands and queries.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("No inventory dataset has been loaded")]
    DatasetNotLoaded,

    #[error("No run summary has been published")]
    SummaryNotFound,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl InventoryError {
    /// Wire error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            InventoryError::DatasetNotLoaded => ErrorCode::DatasetNotLoaded,
            InventoryError::SummaryNotFound => ErrorCode::SummaryNotFound,
            InventoryError::Validation(err) => err.code(),
            InventoryError::Storage(_) => ErrorCode::StorageError,
        }
    }
}

impl From<DatasetStoreError> for InventoryError {
    fn from(err: DatasetStoreError) -> Self {
        match err {
            DatasetStoreError::NotLoaded => InventoryError::DatasetNotLoaded,
            DatasetStoreError::Storage(msg) => InventoryError::Storage(msg),
        }
    }
}

impl From<SummarySinkError> for InventoryError {
    fn from(err: SummarySinkError) -> Self {
        match err {
            SummarySinkError::NotFound => InventoryError::SummaryNotFound,
            other => InventoryError::Storage(other.to_string()),
        }
    }
}
