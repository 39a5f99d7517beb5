use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("invalid transport: no http client supplied")]
    InvalidTransport,

    #[error("invalid base url: {url:?}")]
    InvalidUrl { url: String },

    #[error("malformed request path {0:?}: first path segment cannot contain a colon")]
    MalformedPath(String),

    #[error("url error: {0}")]
    Url(#[from] url::ParseError),

    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("invalid header value: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to write response body: {0}")]
    Io(#[from] std::io::Error),
}

impl DbError {
    /// Status code of the rejected call, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            DbError::Api(err) => Some(err.status),
            DbError::Http(err) => err.status(),
            _ => None,
        }
    }
}

/// The API answered with a status outside of 200-299.
#[derive(Debug, Clone, Error)]
#[error("API call to {url} failed: {status}")]
pub struct ApiError {
    url: Url,
    status: StatusCode,
}

impl ApiError {
    pub fn new(url: Url, status: StatusCode) -> Self {
        Self { url, status }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self.status,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        )
    }
}
