// Storage client implementations
pub mod http_storage_client;
pub mod in_memory_storage_client;

// Response decoding
mod xml;

// Re-export key types
pub use http_storage_client::{HttpClientConfig, HttpStorageClient};
pub use in_memory_storage_client::InMemoryStorageClient;
