use crate::config::ClientConfig;
use crate::endpoints;
use crate::errors::{body_snippet, ApiClientError, ApiResponse};
use crate::transport::{ApiRequest, HttpTransport, RawResponse, Transport};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Method;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// Client for the IBANTEST REST API.
///
/// Every operation issues exactly one authenticated GET and always yields a
/// mapping: the decoded response body on success, an error result otherwise
/// (see [`ApiClientError::into_error_result`]).
pub struct ApiClient {
    config: ClientConfig,
    api_root: String,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ApiClientError> {
        let transport = HttpTransport::new(config.timeout)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Builds a client that sends its requests through `transport`.
    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ApiClientError> {
        let api_root = config.api_root();
        Url::parse(&api_root).map_err(ApiClientError::BaseUrlInvalid)?;

        Ok(ApiClient {
            config,
            api_root,
            transport,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    /// Replaces the bearer token used by every following call.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.config.token = token.into();
    }

    pub async fn get_remaining_credits(&self) -> ApiResponse {
        self.execute(endpoints::CREDITS.to_string()).await
    }

    pub async fn validate_iban(&self, iban: &str) -> ApiResponse {
        let path = endpoints::validate_iban(iban, self.config.path_encoding);
        self.execute(path).await
    }

    pub async fn calculate_iban(
        &self,
        country: &str,
        bank_code: &str,
        account: &str,
        check_digit: Option<&str>,
    ) -> ApiResponse {
        let path = endpoints::calculate_iban(
            country,
            bank_code,
            account,
            check_digit,
            self.config.path_encoding,
        );
        self.execute(path).await
    }

    pub async fn validate_bic(&self, bic: &str) -> ApiResponse {
        let path = endpoints::validate_bic(bic, self.config.path_encoding);
        self.execute(path).await
    }

    pub async fn find_bank(&self, country: &str, bank_code: &str) -> ApiResponse {
        let path = endpoints::find_bank(country, bank_code, self.config.path_encoding);
        self.execute(path).await
    }

    /// Sends a GET for `path` and returns the typed outcome, without
    /// converting failures into an error result.
    pub async fn request(&self, path: &str) -> Result<ApiResponse, ApiClientError> {
        let request = self.build_request(path)?;
        debug!(path = %request.path, "sending request");

        let response = self.transport.send(request).await?;
        debug!(path, status = %response.status, "received response");

        self.handle_response(response)
    }

    async fn execute(&self, path: String) -> ApiResponse {
        match self.request(&path).await {
            Ok(body) => body,
            Err(err) => {
                warn!(path = %path, error = %err, "request failed, returning error result");
                err.into_error_result()
            }
        }
    }

    fn build_request(&self, path: &str) -> Result<ApiRequest, ApiClientError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", self.config.token))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        Ok(ApiRequest {
            method: Method::GET,
            path: path.to_string(),
            url: format!("{}{}", self.api_root, path),
            headers,
        })
    }

    fn handle_response(&self, response: RawResponse) -> Result<ApiResponse, ApiClientError> {
        let status = response.status;

        if status.is_success() {
            serde_json::from_str::<ApiResponse>(&response.body).map_err(|source| {
                ApiClientError::DeserializationFailed {
                    source,
                    body_snippet: body_snippet(&response.body),
                }
            })
        } else if status.is_redirection() {
            Err(ApiClientError::Unexpected(format!(
                "Redirection error: {}",
                status
            )))
        } else {
            Err(ApiClientError::HttpError {
                status,
                body: response.body,
            })
        }
    }
}
