//! Advisory check that temporary files under a storage path get cleaned up.

use tracing::{debug, warn};

use crate::{
    domain::models::LifecycleCheck, ports::storage::StorageClient,
    services::uri_utils::{create_s3_uri, redact_uri},
};

/// Inspect the lifecycle configuration of the bucket behind `uri`.
///
/// Performs exactly one lookup through `client`. Every failure, whether the URI
/// does not name a bucket or the lookup errors, becomes
/// [`LifecycleCheck::Unavailable`].
pub async fn inspect_bucket_lifecycle<C>(uri: &str, client: &C) -> LifecycleCheck
where
    C: StorageClient + ?Sized,
{
    let location = match create_s3_uri(uri) {
        Ok(location) => location,
        Err(e) => {
            return LifecycleCheck::Unavailable {
                reason: e.to_string(),
            }
        }
    };

    let config = match client
        .get_bucket_lifecycle_configuration(&location.bucket)
        .await
    {
        Ok(config) => config,
        Err(e) => {
            return LifecycleCheck::Unavailable {
                reason: e.to_string(),
            }
        }
    };

    match config.covering_rule(&location.key) {
        Some(rule) => LifecycleCheck::Covered {
            bucket: location.bucket,
            rule_id: rule.id.clone(),
            expires_objects: rule.expires_objects(),
        },
        None => LifecycleCheck::Uncovered {
            bucket: location.bucket,
        },
    }
}

/// Check, for advisory purposes, that the bucket behind `uri` cleans up temp files.
///
/// Returns `true` once the lifecycle configuration has been read, logging a
/// warning when no enabled rule covers the path. Returns `false` when the
/// configuration could not be read at all; errors are never propagated.
pub async fn check_that_bucket_has_object_lifecycle_configuration<C>(
    uri: &str,
    client: &C,
) -> bool
where
    C: StorageClient + ?Sized,
{
    let safe_uri = redact_uri(uri).unwrap_or_else(|_| "<unparseable uri>".to_string());

    match inspect_bucket_lifecycle(uri, client).await {
        LifecycleCheck::Covered {
            bucket,
            rule_id,
            expires_objects,
        } => {
            debug!(
                bucket = %bucket,
                uri = %safe_uri,
                rule_id = rule_id.as_deref().unwrap_or(""),
                expires_objects,
                "Found lifecycle rule covering temporary directory"
            );
            true
        }
        LifecycleCheck::Uncovered { bucket } => {
            warn!(
                bucket = %bucket,
                uri = %safe_uri,
                "The S3 bucket {} does not have an object lifecycle configuration to ensure \
                 cleanup of temporary files. Consider configuring the temporary directory to \
                 point to a bucket with an object lifecycle policy that automatically deletes \
                 files after an expiration period.",
                bucket
            );
            true
        }
        LifecycleCheck::Unavailable { reason } => {
            warn!(
                uri = %safe_uri,
                reason = %reason,
                "An error occurred while trying to read the S3 bucket lifecycle configuration"
            );
            false
        }
    }
}
