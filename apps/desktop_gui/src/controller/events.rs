//! Backend results delivered to the UI thread.

use client_core::{StorefrontError, SubmissionOutcome};
use shared::domain::Product;

#[derive(Debug)]
pub enum UiEvent {
    CatalogLoaded(Result<Vec<Product>, StorefrontError>),
    OrderSettled(SubmissionOutcome),
    BackendUnavailable(String),
}

/// One-line, user-facing explanation of a failed request.
pub fn describe_failure(err: &StorefrontError) -> String {
    match err {
        StorefrontError::Http { status } => format!("server answered HTTP {status}"),
        StorefrontError::Fetch { message, .. } => {
            let lower = message.to_ascii_lowercase();
            if lower.contains("connect")
                || lower.contains("connection refused")
                || lower.contains("dns")
                || lower.contains("timed out")
            {
                "server unreachable; check the URL and network".to_string()
            } else if lower.contains("decod") || lower.contains("json") {
                "server sent an unreadable response".to_string()
            } else {
                message.clone()
            }
        }
    }
}
