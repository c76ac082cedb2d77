use tracing::{debug, warn};

use crate::{
    domain::value_objects::{BucketName, Region},
    ports::storage::StorageClient,
};

/// Extract the region from a cluster JDBC URL or bare hostname.
///
/// Only hosts of the form
/// `<identifier>.<unique-id>.<region>.redshift.amazonaws.com` yield a region;
/// everything else is `None`. No lookup is performed.
pub fn get_region_for_redshift_cluster(url_or_host: &str) -> Option<Region> {
    let host = host_of(url_or_host.trim()).to_ascii_lowercase();
    let labels: Vec<&str> = host.split('.').collect();

    match labels.as_slice() {
        [identifier, unique_id, region, "redshift", "amazonaws", "com"]
            if !identifier.is_empty() && !unique_id.is_empty() =>
        {
            Region::new(*region).ok()
        }
        _ => None,
    }
}

/// Host part of `jdbc:<scheme>://host:port/db`, `<scheme>://host` or `host:port`
fn host_of(url: &str) -> &str {
    let without_jdbc = url.strip_prefix("jdbc:").unwrap_or(url);
    let authority = match without_jdbc.find("://") {
        Some(idx) => &without_jdbc[idx + 3..],
        None => without_jdbc,
    };
    let end = authority.find([':', '/', '?', ';']).unwrap_or(authority.len());
    &authority[..end]
}

/// Ask the storage service which region a bucket lives in.
///
/// Failures are logged and reported as an unknown region.
pub async fn get_region_for_s3_bucket<C>(bucket: &BucketName, client: &C) -> Option<Region>
where
    C: StorageClient + ?Sized,
{
    match client.get_bucket_location(bucket).await {
        Ok(constraint) => {
            let region = Region::from_location_constraint(&constraint);
            debug!(bucket = %bucket, region = %region, "Resolved S3 bucket region");
            Some(region)
        }
        Err(e) => {
            warn!(
                bucket = %bucket,
                error = %e,
                "An error occurred while trying to determine the S3 bucket's region"
            );
            None
        }
    }
}
