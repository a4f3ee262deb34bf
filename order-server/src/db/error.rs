use shared::error::{AppError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("data file is not a valid document: {0}")]
    Corrupted(#[source] serde_json::Error),

    #[error("failed to serialize document: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("document version is {found}, write expected {expected}")]
    Conflict { expected: u64, found: u64 },
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict { expected, found } => AppError::new(ErrorCode::StoreConflict)
                .with_detail("expectedVersion", expected)
                .with_detail("currentVersion", found),
            StoreError::Corrupted(e) => {
                AppError::with_message(ErrorCode::StorageCorrupted, e.to_string())
            }
            StoreError::Io(_) | StoreError::Serialize(_) => AppError::storage(err.to_string()),
        }
    }
}
