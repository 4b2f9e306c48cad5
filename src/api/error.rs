use thiserror::Error;

/// Failure taxonomy for backend calls. The server distinguishes a single
/// `message`/`detail` string from a per-field `errors` map on validation
/// failures; both end up as one display string here.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("unexpected response shape: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Extract a user-facing message from an error body.
///
/// Tries `message`, then `detail`, then joins the values of a per-field
/// `errors` map with newlines (the signup validation shape). Falls back to
/// the raw body, or a generic status line when the body is empty.
pub fn error_message(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("message").and_then(|v| v.as_str()) {
            return message.to_string();
        }
        if let Some(detail) = value.get("detail").and_then(|v| v.as_str()) {
            return detail.to_string();
        }
        if let Some(errors) = value.get("errors").and_then(|v| v.as_object()) {
            let joined: Vec<String> = errors
                .values()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect();
            if !joined.is_empty() {
                return joined.join("\n");
            }
        }
    }
    if body.trim().is_empty() {
        format!("Request failed with status {}", status)
    } else {
        body.trim().to_string()
    }
}
