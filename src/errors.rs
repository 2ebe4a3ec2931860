use reqwest::header::InvalidHeaderValue;
use reqwest::StatusCode;
use serde_json::{json, Map, Value};
use thiserror::Error;
use url::ParseError as UrlParseError;

/// Error code placed in every synthesized error result.
pub const ERROR_CODE_FALLBACK: u16 = 9999;

/// Decoded JSON object returned by every operation of the client.
pub type ApiResponse = Map<String, Value>;

#[derive(Error, Debug)]
pub enum ApiClientError {
    #[error("Configuration Error: Invalid base URL: {0}")]
    BaseUrlInvalid(#[from] UrlParseError),

    #[error("Configuration Error: Failed to build HTTP client: {0}")]
    HttpClientBuildFailed(reqwest::Error),

    #[error("Request Error: Invalid authorization header: {0}")]
    InvalidAuthHeader(#[from] InvalidHeaderValue),

    #[error("Request Error: Failed to build or send the request: {0}")]
    RequestFailed(reqwest::Error),

    #[error("Network Error: Connection or timeout issue: {0}")]
    NetworkIssue(reqwest::Error),

    #[error("HTTP Error: Server responded with status {status}: {body}")]
    HttpError {
        // Server responded with non-2xx
        status: StatusCode,
        body: String,
    },

    #[error("Response Error: Failed to deserialize response body: {source}. Body snippet: '{body_snippet}'")]
    DeserializationFailed {
        source: serde_json::Error,
        body_snippet: String,
    },

    #[error("Unexpected Error: {0}")]
    Unexpected(String),
}

impl ApiClientError {
    /// Structured body carried by an HTTP error response, if it decodes to a JSON object.
    pub fn structured_body(&self) -> Option<ApiResponse> {
        match self {
            ApiClientError::HttpError { body, .. } => serde_json::from_str::<ApiResponse>(body).ok(),
            _ => None,
        }
    }

    /// Converts the failure into the mapping handed back to callers.
    ///
    /// A server error payload is passed through as-is; anything else becomes
    /// `{"message": <description>, "errorCode": 9999}`.
    pub fn into_error_result(self) -> ApiResponse {
        if let Some(body) = self.structured_body() {
            return body;
        }

        let mut result = Map::new();
        result.insert("message".to_string(), Value::String(self.to_string()));
        result.insert("errorCode".to_string(), json!(ERROR_CODE_FALLBACK));
        result
    }
}

/// Keeps error messages readable when the server answers with a large page.
pub(crate) fn body_snippet(body: &str) -> String {
    const MAX_CHARS: usize = 200;

    if body.chars().count() > MAX_CHARS {
        let truncated: String = body.chars().take(MAX_CHARS).collect();
        format!("{}...", truncated)
    } else {
        body.to_string()
    }
}
