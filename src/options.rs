//! Options that configure a [`Client`] before it issues requests.
//!
//! Options are applied in order. The first failing option stops the
//! sequence; options applied before it stay in effect.

use crate::client::Client;
use crate::error::DbError;
use log::info;
use reqwest::Client as HttpClient;
use std::borrow::Cow;
use std::fmt;
use url::Url;

/// Base URL of the Deutsche Bank sandbox, without the version segment.
pub const DEFAULT_URL: &str = "https://simulator-api.db.com/gw/dbapi/";

pub const DEFAULT_VERSION: Version = Version::V1;

/// API version segment inserted between the base URL and a resource path.
///
/// Any string is accepted; no check is made that the server knows it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version(Cow<'static, str>);

impl Version {
    pub const V1: Version = Version(Cow::Borrowed("v1"));

    pub fn new(tag: impl Into<String>) -> Self {
        Version(Cow::Owned(tag.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The tag as a path segment, without surrounding slashes.
    pub(crate) fn segment(&self) -> &str {
        self.0.trim_matches('/')
    }
}

impl Default for Version {
    fn default() -> Self {
        DEFAULT_VERSION
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Version {
    fn from(value: &str) -> Self {
        Version::new(value)
    }
}

impl From<String> for Version {
    fn from(value: String) -> Self {
        Version::new(value)
    }
}

/// A single configuration change for a [`Client`].
#[derive(Debug, Clone)]
pub enum ClientOption {
    Transport(Option<HttpClient>),
    Token(String),
    BaseUrl(String),
    Version(Version),
}

/// Use a custom HTTP client, e.g. one with its own timeouts or proxy.
/// Passing `None` fails with [`DbError::InvalidTransport`].
pub fn set_transport(http: impl Into<Option<HttpClient>>) -> ClientOption {
    ClientOption::Transport(http.into())
}

/// Set the bearer token. An empty token clears authentication.
pub fn set_token(token: impl Into<String>) -> ClientOption {
    ClientOption::Token(token.into())
}

/// Point the client at another base URL (tests, proxies).
pub fn set_url(url: impl Into<String>) -> ClientOption {
    ClientOption::BaseUrl(url.into())
}

pub fn set_version(version: impl Into<Version>) -> ClientOption {
    ClientOption::Version(version.into())
}

impl ClientOption {
    pub(crate) fn apply(self, client: &mut Client) -> Result<(), DbError> {
        match self {
            ClientOption::Transport(http) => {
                client.http = http.ok_or(DbError::InvalidTransport)?;
            }
            ClientOption::Token(token) => client.auth.set_token(token),
            ClientOption::BaseUrl(raw) => {
                client.base_url = parse_base_url(&raw)?;
                info!("Updated DB API base URL to {}", client.base_url);
            }
            ClientOption::Version(version) => client.version = version,
        }
        Ok(())
    }
}

/// Parse a base URL and make sure it ends in exactly one `/`.
///
/// Resource paths are appended to the URL, so it may not carry a query or
/// fragment.
pub(crate) fn parse_base_url(raw: &str) -> Result<Url, DbError> {
    let invalid = || DbError::InvalidUrl {
        url: raw.to_string(),
    };
    if raw.is_empty() {
        return Err(invalid());
    }
    let mut url = Url::parse(raw).map_err(|_| invalid())?;
    if url.cannot_be_a_base() || url.query().is_some() || url.fragment().is_some() {
        return Err(invalid());
    }
    let path = format!("{}/", url.path().trim_end_matches('/'));
    url.set_path(&path);
    Ok(url)
}
