//! JSON response envelopes.

use serde::Serialize;

/// Success envelope wrapping the affected record.
#[derive(Debug, Clone, Serialize)]
pub struct ApiEnvelope<T> {
    /// Outcome marker, always `"ok"` for this type.
    pub status: &'static str,
    /// Human-readable summary.
    pub message: String,
    /// Affected record or records.
    pub data: T,
}

impl<T> ApiEnvelope<T> {
    /// Wraps `data` in a success envelope.
    #[must_use]
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            status: "ok",
            message: message.into(),
            data,
        }
    }
}

/// Error envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorBody {
    /// Outcome marker, always `"error"`.
    pub status: &'static str,
    /// Human-readable reason.
    pub message: String,
    /// Identifier the request referred to, when there was one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}
