use thiserror::Error;

/// Top-level error type for the `vellum-api` crate.
///
/// Covers every failure mode of a single HTTP exchange with the platform.
/// `vellum-core` classifies these into reconciler-level errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Invalid API key (rejected by the platform with HTTP 401).
    #[error("Invalid API key")]
    InvalidApiKey,

    /// The API key cannot be carried in an HTTP header.
    #[error("Invalid API key header value: {0}")]
    InvalidApiKeyHeader(String),

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Platform API ────────────────────────────────────────────────
    /// Non-success response from the platform, with the raw body kept verbatim.
    #[error("Vellum API error (HTTP {status}): {message}")]
    Api {
        status: u16,
        message: String,
        body: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Platform ────────────────────────────────────────────────────
    /// The platform exposes no endpoint for this operation.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(&'static str),
}

impl Error {
    /// HTTP status carried by this error, if the platform answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::InvalidApiKey => Some(401),
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if this is a transient error a caller may retry.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Raw response body, when the platform returned one.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Api { body, .. } | Self::Deserialization { body, .. } => Some(body),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: u16) -> Error {
        Error::Api {
            status,
            message: "boom".into(),
            body: r#"{"detail":"boom"}"#.into(),
        }
    }

    #[test]
    fn classifies_by_status() {
        assert!(api(404).is_not_found());
        assert!(!api(400).is_not_found());
        assert!(api(500).is_transient());
        assert!(api(503).is_transient());
        assert!(!api(409).is_transient());
        assert!(Error::Timeout { timeout_secs: 5 }.is_transient());
        assert_eq!(Error::InvalidApiKey.status(), Some(401));
        assert_eq!(Error::Tls("x".into()).status(), None);
    }

    #[test]
    fn body_is_kept_verbatim() {
        assert_eq!(api(400).body(), Some(r#"{"detail":"boom"}"#));
        assert_eq!(Error::InvalidApiKey.body(), None);
    }
}
