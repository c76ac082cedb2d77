pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export key types for convenience

// Domain types - value objects, models and errors
pub use domain::{
    // Value objects
    BucketName,
    Credentials,
    DomainValidationError,
    // Models
    LifecycleCheck,
    LifecycleConfiguration,
    LifecycleRule,
    Region,
    RuleStatus,
    S3Location,
    // Errors
    StorageClientError,
    StorageUri,
    UriParseError,
};

// Port types - interfaces for external systems
pub use ports::StorageClient;

// Operations
pub use services::{
    add_default_endpoint_to_url, add_endpoint_to_url,
    check_that_bucket_has_object_lifecycle_configuration, create_s3_uri, fix_s3_url,
    get_region_for_redshift_cluster, get_region_for_s3_bucket, inspect_bucket_lifecycle,
    join_urls, make_temp_path, redact_uri, remove_credentials_from_uri, DEFAULT_S3_ENDPOINT,
};

// Application configuration
pub use app::{create_client_from_env, AppBuilder, AppConfig, AppError, StorageBackend};

// Adapter types - infrastructure implementations
pub use adapters::outbound::storage::{HttpClientConfig, HttpStorageClient, InMemoryStorageClient};

// Public facade for easy construction
pub mod prelude {
    pub use crate::{
        add_endpoint_to_url, check_that_bucket_has_object_lifecycle_configuration, fix_s3_url,
        get_region_for_redshift_cluster, join_urls, make_temp_path, remove_credentials_from_uri,
        AppBuilder, BucketName, InMemoryStorageClient, LifecycleRule, Region, RuleStatus,
        StorageClient, StorageUri,
    };
}
