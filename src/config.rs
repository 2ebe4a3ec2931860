use serde::Deserialize;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.ibantest.com";
pub const DEFAULT_API_VERSION: &str = "v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const ENV_API_URL: &str = "IBANTEST_API_URL";
pub const ENV_API_VERSION: &str = "IBANTEST_API_VERSION";
pub const ENV_TOKEN: &str = "IBANTEST_TOKEN";

/// How caller-supplied values are placed into endpoint paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathEncoding {
    /// Values are joined with `/` exactly as given. A value containing `/`
    /// or other reserved characters changes the resulting path.
    #[default]
    Verbatim,
    /// Each value is percent-encoded as a single path segment.
    PercentEncode,
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_version: String,
    pub token: String,
    pub timeout: Duration,
    pub path_encoding: PathEncoding,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: DEFAULT_API_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            token: String::new(),
            timeout: DEFAULT_TIMEOUT,
            path_encoding: PathEncoding::Verbatim,
        }
    }
}

impl ClientConfig {
    /// Defaults overlaid with `IBANTEST_API_URL`, `IBANTEST_API_VERSION` and
    /// `IBANTEST_TOKEN` when they are set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ClientConfig::default();
        if let Some(base_url) = lookup(ENV_API_URL) {
            config.base_url = base_url;
        }
        if let Some(api_version) = lookup(ENV_API_VERSION) {
            config.api_version = api_version;
        }
        if let Some(token) = lookup(ENV_TOKEN) {
            config.token = token;
        }
        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_path_encoding(mut self, path_encoding: PathEncoding) -> Self {
        self.path_encoding = path_encoding;
        self
    }

    /// Root every endpoint path is appended to: `{base_url}/{api_version}/`.
    pub fn api_root(&self) -> String {
        format!("{}/{}/", self.base_url, self.api_version)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("path_encoding", &self.path_encoding)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_point_at_public_api() {
        let config = ClientConfig::default();

        assert_eq!(config.api_root(), "https://api.ibantest.com/v1/");
        assert_eq!(config.token, "");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.path_encoding, PathEncoding::Verbatim);
    }

    #[test]
    fn api_root_joins_base_and_version() {
        let config = ClientConfig::default()
            .with_base_url("http://localhost:8080")
            .with_api_version("v2");

        assert_eq!(config.api_root(), "http://localhost:8080/v2/");
    }

    #[test]
    fn lookup_overrides_only_present_keys() {
        let vars: HashMap<&str, &str> =
            HashMap::from([(ENV_TOKEN, "secret"), (ENV_API_VERSION, "v3")]);

        let config = ClientConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert_eq!(config.api_version, "v3");
        assert_eq!(config.token, "secret");
    }

    #[test]
    fn debug_output_hides_token() {
        let config = ClientConfig::default().with_token("top-secret");

        let rendered = format!("{:?}", config);

        assert!(!rendered.contains("top-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn deserializes_partial_config() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"token": "abc", "path_encoding": "percent_encode"}"#)
                .unwrap();

        assert_eq!(config.token, "abc");
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert_eq!(config.path_encoding, PathEncoding::PercentEncode);
    }
}
