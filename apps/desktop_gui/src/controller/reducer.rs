//! Folds backend events into the session and the status line.

use client_core::{StorefrontSession, SubmissionOutcome};

use crate::controller::events::{describe_failure, UiEvent};

pub fn reduce(session: &mut StorefrontSession, status: &mut String, event: UiEvent) {
    match event {
        UiEvent::CatalogLoaded(result) => {
            match &result {
                Ok(_) => status.clear(),
                Err(err) => *status = format!("Could not load products: {}", describe_failure(err)),
            }
            session.apply_catalog(result);
        }
        UiEvent::OrderSettled(outcome) => {
            *status = match &outcome {
                SubmissionOutcome::Accepted(body) => body
                    .get("id")
                    .and_then(serde_json::Value::as_str)
                    .map(|id| format!("Order {id} placed"))
                    .unwrap_or_else(|| "Order placed".to_string()),
                SubmissionOutcome::Failed(err) => {
                    format!("Order failed: {}", describe_failure(err))
                }
            };
            session.apply_submission(outcome);
        }
        UiEvent::BackendUnavailable(message) => *status = message,
    }
}
