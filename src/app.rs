use std::sync::Arc;
use std::time::Duration;

use crate::{
    adapters::outbound::storage::{
        http_storage_client::DEFAULT_TIMEOUT_SECS, HttpClientConfig, HttpStorageClient,
        InMemoryStorageClient,
    },
    ports::storage::StorageClient,
    services::DEFAULT_S3_ENDPOINT,
};

/// Public endpoint used when the `s3` backend is selected without `S3_ENDPOINT`
pub const DEFAULT_S3_SERVICE_URL: &str = "https://s3.amazonaws.com";

/// Configuration for the application
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage_backend: StorageBackend,
    /// Domain appended to bare bucket hosts
    pub endpoint_domain: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_backend: StorageBackend::InMemory,
            endpoint_domain: DEFAULT_S3_ENDPOINT.to_string(),
        }
    }
}

/// Storage client backend configuration
#[derive(Debug, Clone)]
pub enum StorageBackend {
    InMemory,
    Http(HttpClientConfig),
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage_backend = match lookup("STORAGE_BACKEND").as_deref() {
            None | Some("memory") => StorageBackend::InMemory,
            Some(kind @ ("s3" | "minio" | "http")) => {
                let endpoint = match (lookup("S3_ENDPOINT"), kind) {
                    (Some(endpoint), _) => endpoint,
                    (None, "s3") => DEFAULT_S3_SERVICE_URL.to_string(),
                    (None, _) => {
                        return Err(AppError::Configuration {
                            message: "S3_ENDPOINT environment variable required".to_string(),
                        })
                    }
                };

                let timeout_secs = match lookup("S3_TIMEOUT_SECS") {
                    Some(value) => value.parse::<u64>().map_err(|_| AppError::Configuration {
                        message: format!("S3_TIMEOUT_SECS must be a number of seconds: {}", value),
                    })?,
                    None => DEFAULT_TIMEOUT_SECS,
                };

                StorageBackend::Http(HttpClientConfig {
                    endpoint,
                    access_key: lookup("S3_ACCESS_KEY"),
                    secret_key: lookup("S3_SECRET_KEY"),
                    timeout: Duration::from_secs(timeout_secs),
                })
            }
            Some(other) => {
                return Err(AppError::Configuration {
                    message: format!("Unknown storage backend: {}", other),
                })
            }
        };

        let endpoint_domain =
            lookup("S3_ENDPOINT_DOMAIN").unwrap_or_else(|| DEFAULT_S3_ENDPOINT.to_string());

        Ok(Self {
            storage_backend,
            endpoint_domain,
        })
    }
}

/// Builder wiring a storage client from configuration
pub struct AppBuilder {
    config: AppConfig,
}

impl AppBuilder {
    /// Create a new application builder
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    /// Configure the application with custom settings
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Configure storage backend
    pub fn with_storage_backend(mut self, backend: StorageBackend) -> Self {
        self.config.storage_backend = backend;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Build the storage client
    pub fn build(self) -> Result<Arc<dyn StorageClient>, AppError> {
        match self.config.storage_backend {
            StorageBackend::InMemory => Ok(Arc::new(InMemoryStorageClient::new())),
            StorageBackend::Http(config) => {
                let client = HttpStorageClient::new(config).map_err(|e| AppError::StorageInit {
                    message: e.to_string(),
                })?;
                Ok(Arc::new(client))
            }
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Storage initialization error: {message}")]
    StorageInit { message: String },
}

/// Create a storage client from environment variables
pub fn create_client_from_env() -> Result<Arc<dyn StorageClient>, AppError> {
    let config = AppConfig::from_env()?;
    AppBuilder::new().with_config(config).build()
}
