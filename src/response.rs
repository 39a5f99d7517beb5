//! What a call hands back: the response metadata, the decoded body and the
//! ways a body can be consumed.

use crate::error::DbError;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use std::io::Write;
use std::marker::PhantomData;
use url::Url;

/// Metadata of an HTTP response from the API.
#[derive(Debug, Clone)]
pub struct Response {
    url: Url,
    status: StatusCode,
    headers: HeaderMap,
}

impl Response {
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

impl From<&reqwest::Response> for Response {
    fn from(response: &reqwest::Response) -> Self {
        Self {
            url: response.url().clone(),
            status: response.status(),
            headers: response.headers().clone(),
        }
    }
}

/// Result of a single API call.
///
/// The response is kept even when the call failed, so callers can inspect
/// the status and headers of a rejected request. It is `None` only when no
/// response was received (request construction or transport failure).
#[derive(Debug)]
#[must_use]
pub struct Outcome<T> {
    response: Option<Response>,
    result: Result<T, DbError>,
}

impl<T> Outcome<T> {
    pub(crate) fn new(response: Option<Response>, result: Result<T, DbError>) -> Self {
        Self { response, result }
    }

    pub(crate) fn failed(err: DbError) -> Self {
        Self::new(None, Err(err))
    }

    pub fn response(&self) -> Option<&Response> {
        self.response.as_ref()
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.response.as_ref().map(Response::status)
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn value(&self) -> Option<&T> {
        self.result.as_ref().ok()
    }

    pub fn error(&self) -> Option<&DbError> {
        self.result.as_ref().err()
    }

    pub fn into_result(self) -> Result<T, DbError> {
        self.result
    }

    pub fn into_parts(self) -> (Result<T, DbError>, Option<Response>) {
        (self.result, self.response)
    }
}

/// Where the body of a successful response goes.
///
/// The body is fed in chunks as it arrives; `finish` runs once the body is
/// exhausted.
pub trait Destination {
    type Output;

    fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), DbError>;

    fn finish(self) -> Result<Self::Output, DbError>;
}

/// Buffers the whole body and decodes it as JSON.
#[derive(Debug)]
pub struct Json<T> {
    buf: Vec<u8>,
    target: PhantomData<fn() -> T>,
}

impl<T> Json<T> {
    pub fn new() -> Self {
        Self {
            buf: Vec::new(),
            target: PhantomData,
        }
    }
}

impl<T> Default for Json<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DeserializeOwned> Destination for Json<T> {
    type Output = T;

    fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), DbError> {
        self.buf.extend_from_slice(chunk);
        Ok(())
    }

    fn finish(self) -> Result<T, DbError> {
        serde_json::from_slice(&self.buf).map_err(DbError::Decode)
    }
}

/// Copies the raw body into a writer without decoding it.
#[derive(Debug)]
pub struct Raw<W>(pub W);

impl<W: Write> Destination for Raw<W> {
    type Output = W;

    fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), DbError> {
        self.0.write_all(chunk)?;
        Ok(())
    }

    fn finish(mut self) -> Result<W, DbError> {
        self.0.flush()?;
        Ok(self.0)
    }
}

/// Reads and drops the body.
#[derive(Debug, Default, Clone, Copy)]
pub struct Discard;

impl Destination for Discard {
    type Output = ();

    fn write_chunk(&mut self, _chunk: &[u8]) -> Result<(), DbError> {
        Ok(())
    }

    fn finish(self) -> Result<(), DbError> {
        Ok(())
    }
}
