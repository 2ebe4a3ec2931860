use crate::errors::ApiClientError;
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use std::time::Duration;

/// A single outgoing call, built fresh for every operation.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Endpoint path relative to the API root, e.g. `validate_bic/BFSWDE33BER`.
    pub path: String,
    /// API root followed by `path`.
    pub url: String,
    pub headers: HeaderMap,
}

#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

/// The HTTP capability the client sends its requests through.
///
/// Implementations report connection level failures as errors and hand back
/// every completed exchange, whatever its status, as a [`RawResponse`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiClientError>;
}

pub struct HttpTransport {
    http_client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, ApiClientError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiClientError::HttpClientBuildFailed)?;

        Ok(HttpTransport { http_client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiClientError> {
        let response = self
            .http_client
            .request(request.method, &request.url)
            .headers(request.headers)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    ApiClientError::NetworkIssue(e)
                } else {
                    ApiClientError::RequestFailed(e)
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                ApiClientError::NetworkIssue(e)
            } else {
                ApiClientError::RequestFailed(e)
            }
        })?;

        Ok(RawResponse { status, body })
    }
}
