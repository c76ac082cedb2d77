use super::BucketName;

/// Bucket and key addressed by an S3 URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Location {
    pub bucket: BucketName,
    /// Object key or prefix, without a leading `/`. Empty for the bucket root.
    pub key: String,
}
