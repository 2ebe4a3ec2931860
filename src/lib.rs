// Declare modules within this crate
pub mod client;
pub mod config;
pub mod endpoints;
pub mod errors;
pub mod transport;

// Re-export the main components for users of this crate
pub use client::ApiClient;
pub use config::{ClientConfig, PathEncoding};
pub use errors::{ApiClientError, ApiResponse, ERROR_CODE_FALLBACK};
pub use transport::{ApiRequest, HttpTransport, RawResponse, Transport};
