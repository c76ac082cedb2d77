use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    domain::{
        errors::{StorageClientError, StorageClientResult},
        models::{LifecycleConfiguration, LifecycleRule},
        value_objects::BucketName,
    },
    ports::storage::StorageClient,
};

/// In-memory implementation of StorageClient for testing and development
#[derive(Clone, Default)]
pub struct InMemoryStorageClient {
    data: Arc<RwLock<ClientData>>,
    lookups: Arc<AtomicUsize>,
}

#[derive(Default)]
struct ClientData {
    // Map of bucket name -> lifecycle rules
    configurations: HashMap<String, Vec<LifecycleRule>>,
    // Map of bucket name -> location constraint
    locations: HashMap<String, String>,
    // When set, every lookup fails with this error
    failure: Option<StorageClientError>,
}

impl InMemoryStorageClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the lifecycle rules of a bucket
    pub async fn put_lifecycle_configuration(
        &self,
        bucket: &BucketName,
        rules: Vec<LifecycleRule>,
    ) {
        let mut data = self.data.write().await;
        data.configurations.insert(bucket.as_str().to_string(), rules);
    }

    pub async fn delete_lifecycle_configuration(&self, bucket: &BucketName) {
        let mut data = self.data.write().await;
        data.configurations.remove(bucket.as_str());
    }

    pub async fn put_bucket_location(&self, bucket: &BucketName, constraint: impl Into<String>) {
        let mut data = self.data.write().await;
        data.locations
            .insert(bucket.as_str().to_string(), constraint.into());
    }

    /// Make every subsequent lookup fail with `error`
    pub async fn fail_with(&self, error: StorageClientError) {
        let mut data = self.data.write().await;
        data.failure = Some(error);
    }

    pub async fn clear_failure(&self) {
        let mut data = self.data.write().await;
        data.failure = None;
    }

    /// Number of lookups served so far, failed ones included
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StorageClient for InMemoryStorageClient {
    async fn get_bucket_lifecycle_configuration(
        &self,
        bucket: &BucketName,
    ) -> StorageClientResult<LifecycleConfiguration> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let data = self.data.read().await;

        if let Some(failure) = &data.failure {
            return Err(failure.clone());
        }

        match data.configurations.get(bucket.as_str()) {
            Some(rules) => Ok(LifecycleConfiguration::with_rules(
                bucket.clone(),
                rules.clone(),
            )),
            None => Err(StorageClientError::NoLifecycleConfiguration {
                bucket: bucket.to_string(),
            }),
        }
    }

    async fn get_bucket_location(&self, bucket: &BucketName) -> StorageClientResult<String> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let data = self.data.read().await;

        if let Some(failure) = &data.failure {
            return Err(failure.clone());
        }

        if let Some(constraint) = data.locations.get(bucket.as_str()) {
            return Ok(constraint.clone());
        }

        // Known buckets without an explicit location live in the classic region
        if data.configurations.contains_key(bucket.as_str()) {
            return Ok(String::new());
        }

        Err(StorageClientError::BucketNotFound {
            bucket: bucket.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::RuleStatus;

    fn bucket() -> BucketName {
        BucketName::new("test-bucket".to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_lifecycle_round_trip() {
        let client = InMemoryStorageClient::new();
        let rules = vec![LifecycleRule {
            id: Some("rule".to_string()),
            status: RuleStatus::Enabled,
            ..Default::default()
        }];

        client.put_lifecycle_configuration(&bucket(), rules.clone()).await;
        let config = client
            .get_bucket_lifecycle_configuration(&bucket())
            .await
            .unwrap();

        assert_eq!(config.bucket, bucket());
        assert_eq!(config.rules, rules);
        assert_eq!(client.lookup_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_configuration() {
        let client = InMemoryStorageClient::new();
        let result = client.get_bucket_lifecycle_configuration(&bucket()).await;
        assert!(matches!(
            result,
            Err(StorageClientError::NoLifecycleConfiguration { .. })
        ));

        client.put_lifecycle_configuration(&bucket(), Vec::new()).await;
        client.delete_lifecycle_configuration(&bucket()).await;
        assert!(client
            .get_bucket_lifecycle_configuration(&bucket())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_failure_mode() {
        let client = InMemoryStorageClient::new();
        client.put_lifecycle_configuration(&bucket(), Vec::new()).await;
        client
            .fail_with(StorageClientError::Transport("connection reset".to_string()))
            .await;

        assert!(client
            .get_bucket_lifecycle_configuration(&bucket())
            .await
            .is_err());
        assert!(client.get_bucket_location(&bucket()).await.is_err());

        client.clear_failure().await;
        assert!(client
            .get_bucket_lifecycle_configuration(&bucket())
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_locations() {
        let client = InMemoryStorageClient::new();
        assert!(matches!(
            client.get_bucket_location(&bucket()).await,
            Err(StorageClientError::BucketNotFound { .. })
        ));

        client.put_lifecycle_configuration(&bucket(), Vec::new()).await;
        assert_eq!(client.get_bucket_location(&bucket()).await.unwrap(), "");

        client.put_bucket_location(&bucket(), "eu-west-1").await;
        assert_eq!(
            client.get_bucket_location(&bucket()).await.unwrap(),
            "eu-west-1"
        );
    }
}
