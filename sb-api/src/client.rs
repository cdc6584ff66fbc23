//! HTTP client for the StayBook backend REST API.
//!
//! One `ApiClient` is built at startup and cloned into every consumer; clones
//! share the connection pool. Each call runs the request interceptor, sends
//! with the effective timeout and hands the outcome to the response
//! interceptor before decoding the envelope.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use sb_core::constants;
use sb_core::endpoint::{BuildMode, EndpointConfig};
use sb_core::error::{SbError, SbResult};
use sb_models::TokenStore;

use crate::error::{ApiError, ApiResult};
use crate::interceptor::{RequestInterceptor, ResponseInterceptor, TransportOutcome};
use crate::response::ApiEnvelope;

/// Per-request options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    /// Query parameters, appended in order.
    pub query: Vec<(String, String)>,
    /// Overrides the configured timeout.
    pub timeout: Option<Duration>,
    /// Send without the stored bearer token.
    pub skip_auth: bool,
}

impl RequestOptions {
    /// Options for an unauthenticated call.
    pub fn anonymous() -> Self {
        Self {
            skip_auth: true,
            ..Self::default()
        }
    }

    pub fn with_query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// How the `Authorization` header is set on one request.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Auth<'a> {
    /// Whatever the token store holds.
    Stored,
    Anonymous,
    /// A token captured earlier, e.g. before the store was cleared.
    Bearer(&'a str),
}

/// HTTP client for the backend.
#[derive(Clone, Debug)]
pub struct ApiClient {
    inner: Client,
    endpoint: EndpointConfig,
    tokens: TokenStore,
    request_interceptor: RequestInterceptor,
    response_interceptor: ResponseInterceptor,
}

impl ApiClient {
    /// Create a client for a resolved endpoint.
    pub fn new(endpoint: EndpointConfig, tokens: TokenStore, build_mode: BuildMode) -> SbResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let inner = Client::builder()
            .default_headers(headers)
            .connect_timeout(Duration::from_millis(constants::CONNECT_TIMEOUT_MS))
            .pool_max_idle_per_host(5)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(30))
            .build()
            .map_err(|e| SbError::Http(format!("failed to build HTTP client: {e}")))?;

        debug!(
            "API client ready: base_url={} timeout={}ms",
            endpoint.base_url,
            endpoint.timeout.as_millis()
        );

        Ok(Self {
            inner,
            endpoint,
            request_interceptor: RequestInterceptor::new(tokens.clone()),
            response_interceptor: ResponseInterceptor::new(tokens.clone(), build_mode),
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.endpoint.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.endpoint.timeout
    }

    /// Token store the client authenticates from.
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    fn build_request(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
        options: &RequestOptions,
        auth: Auth<'_>,
    ) -> RequestBuilder {
        let url = self.endpoint.url(path);
        let timeout = options.timeout.unwrap_or(self.endpoint.timeout);
        let mut builder = self.inner.request(method, url).timeout(timeout);
        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }
        if let Some(b) = body {
            builder = builder.json(b);
        }
        match auth {
            Auth::Stored => self.request_interceptor.apply(builder),
            Auth::Anonymous => builder,
            Auth::Bearer(token) => builder.bearer_auth(token),
        }
    }

    /// Send one request and classify the outcome. No retry.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
        options: &RequestOptions,
        auth: Auth<'_>,
    ) -> ApiResult<(u16, String)> {
        debug!("{} {}", method, path);
        let builder = self.build_request(method, path, body, options, auth);

        let outcome = match builder.send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                match response.text().await {
                    Ok(body) => TransportOutcome::Response { status, body },
                    Err(e) => TransportOutcome::from_error(&e),
                }
            }
            Err(e) => TransportOutcome::from_error(&e),
        };

        self.response_interceptor.classify(outcome)
    }

    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
        options: &RequestOptions,
        auth: Auth<'_>,
    ) -> ApiResult<ApiEnvelope<T>> {
        let (status, text) = self.execute(method, path, body, options, auth).await?;
        decode_envelope(status, &text)
    }

    // --- Public HTTP methods ---

    /// Issue a request and decode the envelope.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
        options: &RequestOptions,
    ) -> ApiResult<ApiEnvelope<T>> {
        let auth = if options.skip_auth { Auth::Anonymous } else { Auth::Stored };
        self.send(method, path, body, options, auth).await
    }

    /// Convenience: authenticated GET.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<ApiEnvelope<T>> {
        self.request(Method::GET, path, None, &RequestOptions::default())
            .await
    }

    /// Convenience: GET with options (query, timeout, auth).
    pub async fn get_json_with<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> ApiResult<ApiEnvelope<T>> {
        self.request(Method::GET, path, None, options).await
    }

    /// Convenience: POST a serializable body.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        options: &RequestOptions,
    ) -> ApiResult<ApiEnvelope<T>> {
        let body = to_body(body)?;
        self.request(Method::POST, path, Some(&body), options).await
    }

    /// Convenience: authenticated PUT of a serializable body.
    pub async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<ApiEnvelope<T>> {
        let body = to_body(body)?;
        self.request(Method::PUT, path, Some(&body), &RequestOptions::default())
            .await
    }

    /// Check `GET /health`. True only on HTTP 200; never errors.
    pub async fn health_check(&self) -> bool {
        let options = RequestOptions::anonymous()
            .with_timeout(Duration::from_millis(constants::HEALTH_CHECK_TIMEOUT_MS));
        let builder = self.build_request(Method::GET, "/health", None, &options, Auth::Anonymous);
        match builder.send().await {
            Ok(response) => {
                let ok = response.status().as_u16() == 200;
                debug!("health check: status={}", response.status());
                ok
            }
            Err(e) => {
                debug!("health check failed: {}", e);
                false
            }
        }
    }
}

fn to_body<B: Serialize + ?Sized>(body: &B) -> ApiResult<serde_json::Value> {
    serde_json::to_value(body)
        .map_err(|e| ApiError::unknown(format!("failed to encode request body: {e}")))
}

/// Decode a 2xx body into an envelope. An empty body is an empty envelope.
fn decode_envelope<T: DeserializeOwned>(status: u16, body: &str) -> ApiResult<ApiEnvelope<T>> {
    if body.trim().is_empty() {
        return Ok(ApiEnvelope::empty(status));
    }
    serde_json::from_str(body).map_err(|e| ApiError::Unknown {
        status: Some(status),
        message: format!("Unexpected response format: {e}"),
    })
}
