use crate::auth::Authentication;
use crate::error::{ApiError, DbError};
use crate::models::{Account, Address, Transaction, UserInfo};
use crate::options::{ClientOption, DEFAULT_URL, DEFAULT_VERSION, Version, parse_base_url};
use crate::response::{Destination, Discard, Outcome, Response};
use crate::services::Service;
use log::{Level, debug, info, log_enabled};
use reqwest::header::{self, HeaderValue};
use reqwest::{Body, Client as HttpClient, Method, Request, StatusCode};
use serde::Serialize;
use std::time::Duration;
use url::Url;

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("dbapi-rs/", env!("CARGO_PKG_VERSION"));

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the Deutsche Bank sandbox API.
///
/// Configure it once with [`ClientOption`]s, then read resources through
/// [`Client::accounts`], [`Client::addresses`], [`Client::transactions`] and
/// [`Client::user_info`].
#[derive(Debug, Clone)]
pub struct Client {
    pub(crate) http: HttpClient,
    pub(crate) base_url: Url,
    pub(crate) version: Version,
    pub(crate) auth: Authentication,
}

impl Client {
    /// Create a client with default settings, then apply `options` in order.
    pub fn new<I>(options: I) -> Result<Self, DbError>
    where
        I: IntoIterator<Item = ClientOption>,
    {
        let options: Vec<ClientOption> = options.into_iter().collect();
        // The default transport is only built when no usable one is supplied.
        let supplied = options.iter().find_map(|option| match option {
            ClientOption::Transport(Some(http)) => Some(http.clone()),
            _ => None,
        });
        let http = match supplied {
            Some(http) => http,
            None => HttpClient::builder().timeout(DEFAULT_TIMEOUT).build()?,
        };
        let mut client = Self {
            http,
            base_url: parse_base_url(DEFAULT_URL)?,
            version: DEFAULT_VERSION,
            auth: Authentication::default(),
        };
        client.apply(options)?;

        info!(
            "Initialized DB API client for {}{}",
            client.base_url, client.version
        );
        Ok(client)
    }

    /// Apply further options. Stops at the first failing option; the ones
    /// before it stay applied.
    pub fn apply<I>(&mut self, options: I) -> Result<(), DbError>
    where
        I: IntoIterator<Item = ClientOption>,
    {
        options.into_iter().try_for_each(|option| option.apply(self))
    }

    pub fn transport(&self) -> &HttpClient {
        &self.http
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn authentication(&self) -> &Authentication {
        &self.auth
    }

    /// The `/cashAccounts` resource.
    pub fn accounts(&self) -> Service<'_, Account> {
        Service::new(self)
    }

    /// The `/addresses` resource.
    pub fn addresses(&self) -> Service<'_, Address> {
        Service::new(self)
    }

    /// The `/transactions` resource.
    pub fn transactions(&self) -> Service<'_, Transaction> {
        Service::new(self)
    }

    /// The `/userInfo` resource.
    pub fn user_info(&self) -> Service<'_, UserInfo> {
        Service::new(self)
    }

    /// Build a request for `path`, relative to base URL and version.
    ///
    /// A leading `/` on `path` is ignored. If `body` is given it is JSON
    /// encoded as the payload; without it the request has no body at all.
    pub fn new_request<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Request, DbError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.build_url(path)?;
        let payload = body.map(encode_body).transpose()?;

        let mut request = Request::new(method, url);
        let headers = request.headers_mut();
        if let Some(bearer) = self.auth.bearer() {
            let mut value = HeaderValue::from_str(&bearer)?;
            value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, value);
        }
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));

        if let Some(payload) = payload {
            headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
            *request.body_mut() = Some(Body::from(payload));
        }
        Ok(request)
    }

    /// Send `request` and hand a successful body to `destination`.
    ///
    /// Responses outside 200-299 fail with [`DbError::Api`]; their body is
    /// drained but never given to `destination`.
    pub async fn execute<D>(&self, request: Request, destination: D) -> Outcome<D::Output>
    where
        D: Destination,
    {
        let url = request.url().clone();
        debug!("{} request to {}", request.method(), url);

        let mut response = match self.http.execute(request).await {
            Ok(response) => response,
            Err(err) => return Outcome::failed(err.into()),
        };
        let wrapper = Response::from(&response);
        debug!("Received status {}", wrapper.status());

        if let Err(err) = check_response(&url, wrapper.status()) {
            if log_enabled!(Level::Debug) {
                if let Ok(body) = response.text().await {
                    debug!("Error body from {}: {}", url, body);
                }
            } else {
                let _ = drain_into(&mut response, Discard).await;
            }
            return Outcome::new(Some(wrapper), Err(err));
        }

        let result = drain_into(&mut response, destination).await;
        Outcome::new(Some(wrapper), result)
    }

    /// [`Client::new_request`] followed by [`Client::execute`].
    pub async fn call<B, D>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        destination: D,
    ) -> Outcome<D::Output>
    where
        B: Serialize + ?Sized,
        D: Destination,
    {
        match self.new_request(method, path, body) {
            Ok(request) => self.execute(request, destination).await,
            Err(err) => Outcome::failed(err),
        }
    }

    fn build_url(&self, path: &str) -> Result<Url, DbError> {
        let relative = path.trim_start_matches('/');
        let first_segment = relative.split(['/', '?', '#']).next().unwrap_or_default();
        if first_segment.contains(':') {
            return Err(DbError::MalformedPath(path.to_string()));
        }

        // base_url always ends in '/'
        let mut composed = String::from(self.base_url.as_str());
        let version = self.version.segment();
        if !version.is_empty() {
            composed.push_str(version);
            composed.push('/');
        }
        composed.push_str(relative);
        Ok(Url::parse(&composed)?)
    }
}

/// Classify a status: 200-299 is success, everything else an API error.
pub fn check_response(url: &Url, status: StatusCode) -> Result<(), DbError> {
    if status.is_success() {
        return Ok(());
    }
    Err(ApiError::new(url.clone(), status).into())
}

fn encode_body<B: Serialize + ?Sized>(body: &B) -> Result<Vec<u8>, DbError> {
    let mut payload = serde_json::to_vec(body).map_err(DbError::Encode)?;
    payload.push(b'\n');
    Ok(payload)
}

// Reads the body to the end even if the destination gave up early.
async fn drain_into<D: Destination>(
    response: &mut reqwest::Response,
    mut destination: D,
) -> Result<D::Output, DbError> {
    let mut failure = None;
    while let Some(chunk) = response.chunk().await? {
        if failure.is_none() {
            failure = destination.write_chunk(&chunk).err();
        }
    }
    match failure {
        Some(err) => Err(err),
        None => destination.finish(),
    }
}
