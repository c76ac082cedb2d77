use crate::domain::{
    errors::StorageClientResult, models::LifecycleConfiguration, value_objects::BucketName,
};
use async_trait::async_trait;

/// Port for the bucket metadata lookups the utilities delegate.
///
/// Implementations own transport concerns: retries, rate limiting and
/// timeouts happen there, never in the callers.
#[async_trait]
pub trait StorageClient: Send + Sync + 'static {
    /// Fetch the lifecycle rules configured on a bucket
    async fn get_bucket_lifecycle_configuration(
        &self,
        bucket: &BucketName,
    ) -> StorageClientResult<LifecycleConfiguration>;

    /// Fetch the raw location constraint of a bucket (may be empty)
    async fn get_bucket_location(&self, bucket: &BucketName) -> StorageClientResult<String>;
}
