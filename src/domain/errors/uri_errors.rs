use thiserror::Error;

use super::ValidationError;

/// Errors raised when a string cannot be used as a storage URI.
///
/// Every variant carries the offending input with any `user:pass@` segment
/// scrubbed, so these errors can be logged as-is.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UriParseError {
    #[error("Invalid URI '{uri}': {source}")]
    Malformed {
        uri: String,
        #[source]
        source: url::ParseError,
    },

    #[error("URI has no host: {uri}")]
    MissingHost { uri: String },

    #[error("Could not get bucket from S3 URI: {uri}")]
    MissingBucket { uri: String },

    #[error("Invalid bucket in S3 URI '{uri}': {source}")]
    InvalidBucket {
        uri: String,
        #[source]
        source: ValidationError,
    },
}

impl UriParseError {
    pub(crate) fn malformed(uri: &str, source: url::ParseError) -> Self {
        UriParseError::Malformed {
            uri: scrub_user_info(uri),
            source,
        }
    }

    pub(crate) fn missing_host(uri: &str) -> Self {
        UriParseError::MissingHost {
            uri: scrub_user_info(uri),
        }
    }

    pub(crate) fn missing_bucket(uri: &str) -> Self {
        UriParseError::MissingBucket {
            uri: scrub_user_info(uri),
        }
    }

    pub(crate) fn invalid_bucket(uri: &str, source: ValidationError) -> Self {
        UriParseError::InvalidBucket {
            uri: scrub_user_info(uri),
            source,
        }
    }
}

/// Drop the user-info of a raw URI string that may not parse.
///
/// Secret keys may contain `/`, so the authority cannot be assumed to end at
/// the first `/`. When an `@` appears after a `/` and the text before that
/// `/` reads like `access_key:secret`, everything up to the last `@` before
/// the next `/` is treated as user-info.
pub(crate) fn scrub_user_info(uri: &str) -> String {
    let Some(scheme_end) = uri.find("://") else {
        return uri.to_string();
    };
    let authority_start = scheme_end + 3;
    let rest = &uri[authority_start..];
    let head = &rest[..rest.find(['?', '#']).unwrap_or(rest.len())];

    let Some(first_at) = head.find('@') else {
        return uri.to_string();
    };
    let first_slash = head.find('/').unwrap_or(head.len());

    if first_slash < first_at && !looks_like_user_info(&head[..first_slash]) {
        return uri.to_string();
    }

    let user_info_end = head[first_at..]
        .find('/')
        .map_or(head.len(), |idx| first_at + idx);
    let cut = head[..user_info_end].rfind('@').unwrap_or(first_at);

    format!("{}{}", &uri[..authority_start], &rest[cut + 1..])
}

// `host:port` has a numeric tail; `access_key:secret` does not.
fn looks_like_user_info(segment: &str) -> bool {
    match segment.split_once(':') {
        Some((_, tail)) => tail.is_empty() || !tail.chars().all(|c| c.is_ascii_digit()),
        None => false,
    }
}
