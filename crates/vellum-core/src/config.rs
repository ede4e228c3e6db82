// ── Runtime client configuration ──
//
// Describes how to reach the platform. Built by the host (or
// `vellum-config`) and handed in; core never reads files or the
// environment itself.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// Immutable settings for one provider instance.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Platform URL (defaults to `https://api.vellum.ai`).
    pub base_url: Url,
    pub api_key: SecretString,
    /// Per-request timeout.
    pub timeout: Duration,
}
