use thiserror::Error;

/// Errors reported by a [`StorageClient`](crate::ports::StorageClient) implementation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorageClientError {
    #[error("HTTP error: {status} - {message}")]
    Http { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("No lifecycle configuration for bucket: {bucket}")]
    NoLifecycleConfiguration { bucket: String },

    #[error("Bucket not found: {bucket}")]
    BucketNotFound { bucket: String },

    #[error("Failed to parse XML response: {0}")]
    Xml(String),

    #[error("{0}")]
    Other(String),
}

/// Result type for storage client operations
pub type StorageClientResult<T> = Result<T, StorageClientError>;
