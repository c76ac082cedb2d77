pub mod lifecycle_check;
pub mod region;
pub mod uri_utils;

pub use lifecycle_check::{
    check_that_bucket_has_object_lifecycle_configuration, inspect_bucket_lifecycle,
};
pub use region::{get_region_for_redshift_cluster, get_region_for_s3_bucket};
pub use uri_utils::{
    add_default_endpoint_to_url, add_endpoint_to_url, create_s3_uri, fix_s3_url, join_urls,
    make_temp_path, redact_uri, remove_credentials_from_uri, DEFAULT_S3_ENDPOINT,
};
