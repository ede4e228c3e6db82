// ── Core error types ──
//
// Reconciler-level errors. Transport failures arrive as `vellum_api::Error`
// and are classified here by HTTP status; hosts only ever see these
// variants, rendered as diagnostics.

use thiserror::Error;

use crate::codec::CodecError;

/// Actionable category of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum ErrorClass {
    Configuration,
    RemoteValidation,
    NotFound,
    Authorization,
    Transient,
    Integrity,
}

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Configuration errors ─────────────────────────────────────────
    #[error(transparent)]
    InvalidEnumValue(#[from] CodecError),

    #[error("Invalid value for '{attribute}': {message}")]
    Validation { attribute: String, message: String },

    #[error("Cannot read {resource} data source with multiple unique identifiers")]
    AmbiguousLookup { resource: &'static str },

    #[error("Cannot read {resource} data source without a unique identifier")]
    MissingLookup { resource: &'static str },

    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Remote errors ────────────────────────────────────────────────
    #[error("Request rejected by Vellum (HTTP {status}): {body}")]
    RemoteValidation { status: u16, body: String },

    #[error("{resource} not found: {identifier}")]
    NotFound {
        resource: String,
        identifier: String,
    },

    #[error("Access denied (HTTP {status}): {message}")]
    Forbidden { status: u16, message: String },

    #[error("Vellum server error (HTTP {status}): {message}")]
    Server { status: u16, message: String },

    #[error("Cannot reach Vellum: {reason}")]
    Transport { reason: String },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Operation cancelled before the remote call completed")]
    Cancelled,

    // ── Integrity errors ─────────────────────────────────────────────
    #[error("Vellum returned a {resource} without required field '{field}'")]
    DataIntegrity {
        resource: &'static str,
        field: &'static str,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn validation(attribute: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            attribute: attribute.into(),
            message: message.into(),
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidEnumValue(_)
            | Self::Validation { .. }
            | Self::AmbiguousLookup { .. }
            | Self::MissingLookup { .. }
            | Self::Config { .. } => ErrorClass::Configuration,
            Self::RemoteValidation { .. } => ErrorClass::RemoteValidation,
            Self::NotFound { .. } => ErrorClass::NotFound,
            Self::Forbidden { .. } => ErrorClass::Authorization,
            Self::Server { .. }
            | Self::Transport { .. }
            | Self::Timeout { .. }
            | Self::Cancelled => ErrorClass::Transient,
            Self::DataIntegrity { .. } | Self::Internal(_) => ErrorClass::Integrity,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Attribute path the error points at, when there is one.
    pub fn attribute(&self) -> Option<&str> {
        match self {
            Self::Validation { attribute, .. } => Some(attribute),
            Self::InvalidEnumValue(err) => Some(match err.kind {
                crate::codec::EnumKind::EntityStatus => "status",
                crate::codec::EnumKind::Environment => "environment",
                crate::codec::EnumKind::Visibility => "visibility",
                crate::codec::EnumKind::HostedBy => "hosted_by",
                crate::codec::EnumKind::ModelDeveloper => "developed_by",
                crate::codec::EnumKind::ModelFamily => "family",
                crate::codec::EnumKind::ModelFeature => "exec_config.features",
            }),
            Self::AmbiguousLookup { .. } | Self::MissingLookup { .. } => Some("id"),
            _ => None,
        }
    }

    /// What the author can do about it.
    pub fn hint(&self) -> String {
        match self {
            Self::AmbiguousLookup { resource } => format!(
                "Either an 'id' or 'name' is required to read a {resource} data source, \
                 but both were set"
            ),
            Self::MissingLookup { resource } => {
                format!("Either an 'id' or 'name' is required to read a {resource} data source")
            }
            Self::InvalidEnumValue(_) | Self::Validation { .. } | Self::Config { .. } => {
                "Fix the configuration and run again.".into()
            }
            Self::RemoteValidation { .. } => {
                "Vellum rejected the request body; \
                 adjust the configuration to satisfy the error above."
                    .into()
            }
            Self::NotFound { .. } => {
                "The object no longer exists in Vellum. Refresh state, or re-create it.".into()
            }
            Self::Forbidden { .. } => {
                "Check that VELLUM_API_KEY (or the provider api_key) is valid \
                 and has access to this workspace."
                    .into()
            }
            Self::Server { .. } | Self::Transport { .. } | Self::Timeout { .. } => {
                "The failure may be temporary. \
                 Nothing was retried; run again once Vellum is reachable."
                    .into()
            }
            Self::Cancelled => {
                "The remote object may or may not have changed. Refresh state before running again."
                    .into()
            }
            Self::DataIntegrity { .. } | Self::Internal(_) => {
                "Please report this issue to the provider developers.".into()
            }
        }
    }

    /// Fill in which object a not-found error refers to.
    #[must_use]
    pub fn for_resource(self, resource: &str, identifier: &str) -> Self {
        match self {
            Self::NotFound { .. } => Self::NotFound {
                resource: resource.to_owned(),
                identifier: identifier.to_owned(),
            },
            other => other,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<vellum_api::Error> for CoreError {
    fn from(err: vellum_api::Error) -> Self {
        match err {
            vellum_api::Error::InvalidApiKey => CoreError::Forbidden {
                status: 401,
                message: "Invalid API key".into(),
            },
            vellum_api::Error::InvalidApiKeyHeader(message) => CoreError::Config {
                message: format!("API key cannot be sent as a header: {message}"),
            },
            vellum_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else {
                    CoreError::Transport {
                        reason: e.to_string(),
                    }
                }
            }
            vellum_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid base URL: {e}"),
            },
            vellum_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            vellum_api::Error::Tls(reason) => CoreError::Transport { reason },
            vellum_api::Error::Api {
                status,
                message,
                body,
            } => match status {
                401 | 403 => CoreError::Forbidden { status, message },
                404 => CoreError::NotFound {
                    resource: "object".into(),
                    identifier: message,
                },
                500.. => CoreError::Server { status, message },
                _ => CoreError::RemoteValidation {
                    status,
                    body: if body.is_empty() { message } else { body },
                },
            },
            vellum_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
            vellum_api::Error::UnsupportedOperation(op) => {
                CoreError::Internal(format!("Vellum has no endpoint to {op}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: u16, body: &str) -> vellum_api::Error {
        vellum_api::Error::Api {
            status,
            message: "detail".into(),
            body: body.into(),
        }
    }

    #[test]
    fn classifies_remote_statuses() {
        let cases = [
            (400, ErrorClass::RemoteValidation),
            (409, ErrorClass::RemoteValidation),
            (403, ErrorClass::Authorization),
            (404, ErrorClass::NotFound),
            (500, ErrorClass::Transient),
            (502, ErrorClass::Transient),
        ];
        for (status, class) in cases {
            assert_eq!(CoreError::from(api(status, "{}")).class(), class, "HTTP {status}");
        }
        assert_eq!(
            CoreError::from(vellum_api::Error::InvalidApiKey).class(),
            ErrorClass::Authorization
        );
        assert_eq!(
            CoreError::from(vellum_api::Error::Timeout { timeout_secs: 30 }).class(),
            ErrorClass::Transient
        );
    }

    #[test]
    fn remote_validation_keeps_body_verbatim() {
        let err = CoreError::from(api(400, r#"{"name":["taken"]}"#));
        match err {
            CoreError::RemoteValidation { status, body } => {
                assert_eq!(status, 400);
                assert_eq!(body, r#"{"name":["taken"]}"#);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn for_resource_only_rewrites_not_found() {
        let err = CoreError::from(api(404, "")).for_resource("document index", "idx-1");
        assert_eq!(err.to_string(), "document index not found: idx-1");

        let err = CoreError::Cancelled.for_resource("document index", "idx-1");
        assert!(matches!(err, CoreError::Cancelled));
    }

    #[test]
    fn lookup_errors_carry_remediation() {
        let err = CoreError::AmbiguousLookup {
            resource: "document index",
        };
        assert_eq!(err.class(), ErrorClass::Configuration);
        assert_eq!(
            err.to_string(),
            "Cannot read document index data source with multiple unique identifiers"
        );
        assert!(err.hint().ends_with("but both were set"));
    }
}
