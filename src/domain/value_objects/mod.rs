mod bucket_name;
mod region;
mod s3_location;
mod storage_uri;

pub use bucket_name::BucketName;
pub use region::Region;
pub use s3_location::S3Location;
pub use storage_uri::{Credentials, StorageUri};
