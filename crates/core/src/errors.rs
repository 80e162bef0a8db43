use thiserror::Error;

/// Unified error type for the entire coin-dashboard-core library.
/// Every public fallible function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Configuration ───────────────────────────────────────────────
    #[error("Configuration error: {0}")]
    Config(String),

    // ── API / Network ───────────────────────────────────────────────
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error ({endpoint}, status {status}): {message}")]
    Api {
        endpoint: String,
        status: u16,
        message: String,
    },

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── Upload ──────────────────────────────────────────────────────
    #[error("Upload failed: {0}")]
    Upload(String),

    // ── Business Logic ──────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("An upload is already in progress")]
    UploadInProgress,
}

impl CoreError {
    /// Whether the error was raised locally, before any request was sent.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            CoreError::ValidationError(_) | CoreError::UploadInProgress | CoreError::Config(_)
        )
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Never log the query string of the request URL.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        if e.is_decode() {
            CoreError::Deserialization(sanitized)
        } else {
            CoreError::Network(sanitized)
        }
    }
}
