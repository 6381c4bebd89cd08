//! HTTP transport for the deployments API
//!
//! [`DeploymentApi`] owns the connection pool, base URL and credentials.
//! Operations build requests through it and hand the response to
//! [`DeploymentApi::send`], which maps non-2xx replies onto [`ApiError`]
//! and decodes successful bodies into the requested model.
//!
//! Timeouts are configured once on the underlying client. Nothing here
//! retries; callers own their retry policy.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, trace};
use url::Url;

use crate::error::{ApiError, CoreError, Result};

/// User agent sent with every request
const DEFAULT_USER_AGENT: &str = concat!("deployctl/", env!("CARGO_PKG_VERSION"));

/// Default API endpoint
pub const DEFAULT_HOST: &str = "https://api.elastic-cloud.com";

/// Path prefix of the versioned API
const API_PREFIX: &str = "/api/v1";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Response header names carrying resource bookkeeping on writes
pub const HEADER_RESOURCE_CREATED: &str = "x-cloud-resource-created";
pub const HEADER_RESOURCE_LAST_MODIFIED: &str = "x-cloud-resource-last-modified";
pub const HEADER_RESOURCE_VERSION: &str = "x-cloud-resource-version";

/// Bookkeeping headers returned by write operations. Exposed, not interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceHeaders {
    pub created: Option<String>,
    pub last_modified: Option<String>,
    pub version: Option<String>,
}

impl ResourceHeaders {
    fn from_headers(headers: &HeaderMap) -> Self {
        let get = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        Self {
            created: get(HEADER_RESOURCE_CREATED),
            last_modified: get(HEADER_RESOURCE_LAST_MODIFIED),
            version: get(HEADER_RESOURCE_VERSION),
        }
    }
}

/// Decoded successful response
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub status: reqwest::StatusCode,
    pub headers: ResourceHeaders,
    pub body: T,
}

/// Authentication scheme for the API
#[derive(Debug, Clone)]
enum Credentials {
    None,
    ApiKey(String),
    Basic { username: String, password: String },
}

/// Handle to the deployments API
///
/// Cheap to clone; clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct DeploymentApi {
    base_url: String,
    client: ReqwestClient,
}

impl DeploymentApi {
    /// Start building a client
    #[must_use]
    pub fn builder() -> DeploymentApiBuilder {
        DeploymentApiBuilder::default()
    }

    /// Base URL including the versioned API prefix
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an API path such as `/deployments`
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start a request against an API path
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        trace!(%method, %url, "building request");
        self.client.request(method, url)
    }

    /// Send a request and decode its body
    pub(crate) async fn send<T>(&self, request: RequestBuilder) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        let response = request.send().await?;
        let status = response.status();
        let headers = ResourceHeaders::from_headers(response.headers());
        let text = response.text().await?;
        debug!(status = status.as_u16(), "received API response");

        if status.is_client_error() || status.is_server_error() {
            return Err(ApiError::from_body(status, &text).into());
        }

        // Some endpoints answer with an empty body; let the target type decide
        let payload = if text.trim().is_empty() { "null" } else { &text };
        let body = serde_json::from_str::<T>(payload).map_err(|e| CoreError::Decode {
            message: e.to_string(),
            body: text.clone(),
        })?;

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }

    /// Send a request and keep only the decoded body
    pub(crate) async fn send_body<T>(&self, request: RequestBuilder) -> Result<T>
    where
        T: DeserializeOwned,
    {
        Ok(self.send(request).await?.body)
    }
}

/// Builder for [`DeploymentApi`]
#[derive(Debug, Clone)]
pub struct DeploymentApiBuilder {
    host: String,
    credentials: Credentials,
    user_agent: String,
    timeout: Duration,
    insecure: bool,
}

impl Default for DeploymentApiBuilder {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            credentials: Credentials::None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            insecure: false,
        }
    }
}

impl DeploymentApiBuilder {
    /// API host, e.g. `https://api.elastic-cloud.com`
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Authenticate with an API key
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.credentials = Credentials::ApiKey(key.into());
        self
    }

    /// Authenticate with username and password
    #[must_use]
    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Credentials::Basic {
            username: username.into(),
            password: password.into(),
        };
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Skip TLS certificate verification
    #[must_use]
    pub fn insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    pub fn build(self) -> Result<DeploymentApi> {
        let host = Url::parse(&self.host)
            .map_err(|e| CoreError::InvalidInput(format!("invalid host {:?}: {}", self.host, e)))?;
        if !matches!(host.scheme(), "http" | "https") {
            return Err(CoreError::InvalidInput(format!(
                "invalid host {:?}: scheme must be http or https",
                self.host
            )));
        }

        let mut headers = HeaderMap::new();
        match &self.credentials {
            Credentials::None => {}
            Credentials::ApiKey(key) => {
                let value = HeaderValue::from_str(&format!("ApiKey {}", key))
                    .map_err(|_| CoreError::InvalidInput("api key contains invalid characters".into()))?;
                headers.insert(AUTHORIZATION, sensitive(value));
            }
            Credentials::Basic { username, password } => {
                let token = basic_token(username, password);
                let value = HeaderValue::from_str(&format!("Basic {}", token))
                    .map_err(|_| CoreError::InvalidInput("credentials contain invalid characters".into()))?;
                headers.insert(AUTHORIZATION, sensitive(value));
            }
        }

        let client = ReqwestClient::builder()
            .user_agent(self.user_agent)
            .timeout(self.timeout)
            .default_headers(headers)
            .danger_accept_invalid_certs(self.insecure)
            .build()?;

        let base_url = format!("{}{}", self.host.trim_end_matches('/'), API_PREFIX);
        debug!(%base_url, "deployments API client created");

        Ok(DeploymentApi { base_url, client })
    }
}

fn sensitive(mut value: HeaderValue) -> HeaderValue {
    value.set_sensitive(true);
    value
}

/// RFC 7617 token for the `Authorization: Basic` header
fn basic_token(username: &str, password: &str) -> String {
    STANDARD.encode(format!("{}:{}", username, password))
}

/// Percent-encode a caller supplied path segment
pub(crate) fn segment(value: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(value)
}
