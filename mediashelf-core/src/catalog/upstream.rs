use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::warn;

use super::CatalogError;

/// Send a catalog request and decode a successful JSON body.
///
/// Non-success statuses become [`CatalogError::Upstream`] carrying the
/// upstream's own message when the body has one, else the status line.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    provider: &'static str,
    request: RequestBuilder,
) -> Result<T, CatalogError> {
    // Request URLs carry the API key in the query string; keep them out of
    // logs and response bodies.
    let response = request.send().await.map_err(|err| {
        let err = err.without_url();
        warn!(provider, error = %err, "catalog request failed");
        CatalogError::Upstream {
            provider,
            status: err.status().map(|status| status.as_u16()),
            message: format!("{provider} request failed: {err}"),
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = failure_message(provider, status, &body);
        warn!(provider, status = status.as_u16(), %message, "catalog search rejected");
        return Err(CatalogError::Upstream {
            provider,
            status: Some(status.as_u16()),
            message,
        });
    }

    response.json::<T>().await.map_err(|err| {
        CatalogError::Internal(format!(
            "{provider} returned an unreadable search payload: {}",
            err.without_url()
        ))
    })
}

fn failure_message(provider: &str, status: StatusCode, body: &str) -> String {
    match upstream_message(body) {
        Some(detail) => format!("{provider} search failed: {detail}"),
        None => format!("{provider} search failed: {status}"),
    }
}

/// Error text embedded in an upstream error body.
///
/// Google reports `{"error": {"message": ..}}`, TMDB reports
/// `{"status_message": ..}`.
fn upstream_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let candidates = [
        value.pointer("/error/message"),
        value.get("status_message"),
        value.get("error"),
    ];
    candidates
        .into_iter()
        .flatten()
        .filter_map(serde_json::Value::as_str)
        .map(str::trim)
        .find(|message| !message.is_empty())
        .map(str::to_string)
}
