use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::domain::errors::UriParseError;

/// User-info embedded in a storage URI as `access_key[:secret_key]@`
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Credentials {
    access_key: String,
    secret_key: Option<String>,
}

impl Credentials {
    pub fn new(access_key: impl Into<String>, secret_key: Option<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key,
        }
    }

    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    pub fn secret_key(&self) -> Option<&str> {
        self.secret_key.as_deref()
    }
}

// Never print the secret, not even in debug output.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field(
                "secret_key",
                &self.secret_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// A parsed storage URI of the form `scheme://[credentials@]host[:port]/path`.
///
/// Components are kept as parsed so that rendering the value back with
/// [`Display`](fmt::Display) reproduces scheme, host and path exactly. The
/// `Display` form includes credentials; use [`StorageUri::to_safe_string`] for
/// anything that ends up in a log line or error message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageUri {
    scheme: String,
    credentials: Option<Credentials>,
    host: String,
    port: Option<u16>,
    path: String,
    query: Option<String>,
    fragment: Option<String>,
}

impl StorageUri {
    /// Parse a URI that must at least carry a scheme and a host.
    ///
    /// The `url` crate only validates the input. Components are copied from
    /// the text as written: no dot-segment removal, no percent-encoding, no
    /// dropping of default ports.
    pub fn parse(input: &str) -> Result<Self, UriParseError> {
        let url = Url::parse(input).map_err(|e| UriParseError::malformed(input, e))?;
        if url.host_str().map_or(true, str::is_empty) {
            return Err(UriParseError::missing_host(input));
        }

        let raw = input.trim_matches(|c: char| c <= ' ');
        let Some(scheme_end) = raw.find("://") else {
            return Err(UriParseError::missing_host(input));
        };
        let scheme = &raw[..scheme_end];
        let rest = &raw[scheme_end + 3..];

        let (rest, fragment) = match rest.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment)),
            None => (rest, None),
        };
        let (rest, query) = match rest.split_once('?') {
            Some((rest, query)) => (rest, Some(query)),
            None => (rest, None),
        };
        let (authority, path) = rest.split_at(rest.find('/').unwrap_or(rest.len()));

        let (user_info, host_port) = match authority.rfind('@') {
            Some(at) => (&authority[..at], &authority[at + 1..]),
            None => ("", authority),
        };
        let (host, port) = split_host_port(host_port);
        if host.is_empty() {
            return Err(UriParseError::missing_host(input));
        }

        let port = match port {
            Some(port) if !port.is_empty() => Some(
                port.parse::<u16>()
                    .map_err(|_| UriParseError::malformed(input, url::ParseError::InvalidPort))?,
            ),
            _ => None,
        };

        let credentials = if user_info.is_empty() {
            None
        } else {
            Some(match user_info.split_once(':') {
                Some((access_key, secret_key)) => {
                    Credentials::new(access_key, Some(secret_key.to_string()))
                }
                None => Credentials::new(user_info, None),
            })
        };

        Ok(Self {
            scheme: scheme.to_string(),
            credentials,
            host: host.to_string(),
            port,
            path: path.to_string(),
            query: query.map(str::to_string),
            fragment: fragment.map(str::to_string),
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Copy of this URI with the user-info removed
    pub fn without_credentials(&self) -> Self {
        Self {
            credentials: None,
            ..self.clone()
        }
    }

    /// Copy of this URI with a different host.
    ///
    /// The result is re-parsed so an unusable host surfaces as an error here
    /// rather than further down the pipeline.
    pub fn with_host(&self, host: &str) -> Result<Self, UriParseError> {
        let candidate = Self {
            host: host.to_string(),
            ..self.clone()
        };
        Self::parse(&candidate.to_string())
    }

    /// Rendering without credentials, suitable for logs and error messages
    pub fn to_safe_string(&self) -> String {
        self.without_credentials().to_string()
    }
}

/// Split `host[:port]`, keeping bracketed IPv6 hosts intact
fn split_host_port(host_port: &str) -> (&str, Option<&str>) {
    let host_end = if host_port.starts_with('[') {
        host_port.find(']').map_or(host_port.len(), |idx| idx + 1)
    } else {
        host_port.find(':').unwrap_or(host_port.len())
    };
    let (host, tail) = host_port.split_at(host_end);
    (host, tail.strip_prefix(':'))
}

impl fmt::Display for StorageUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://", self.scheme)?;
        if let Some(credentials) = &self.credentials {
            write!(f, "{}", credentials.access_key)?;
            if let Some(secret) = &credentials.secret_key {
                write!(f, ":{}", secret)?;
            }
            write!(f, "@")?;
        }
        write!(f, "{}", self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{}", port)?;
        }
        write!(f, "{}", self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{}", query)?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{}", fragment)?;
        }
        Ok(())
    }
}

impl FromStr for StorageUri {
    type Err = UriParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
