use thiserror::Error;

/// Failures surfaced by the catalog and order calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorefrontError {
    /// Network, transport or body-decoding failure.
    #[error("request to {endpoint} failed: {message}")]
    Fetch { endpoint: String, message: String },
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },
}

impl StorefrontError {
    pub(crate) fn fetch(endpoint: &str, err: impl std::fmt::Display) -> Self {
        Self::Fetch {
            endpoint: endpoint.to_string(),
            message: err.to_string(),
        }
    }
}
