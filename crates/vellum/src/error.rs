//! CLI error types with miette diagnostics.

use miette::Diagnostic;
use thiserror::Error;

use vellum_config::ConfigError;
use vellum_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONFIG: i32 = 3;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Configuration ────────────────────────────────────────────────
    #[error("An API key is required to use the vellum provider")]
    #[diagnostic(
        code(vellum::no_api_key),
        help(
            "Set VELLUM_API_KEY, pass --api-key, or add api_key to {path}"
        )
    )]
    MissingApiKey { path: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(vellum::config), help("{hint}"))]
    Config { message: String, hint: &'static str },

    // ── Input ────────────────────────────────────────────────────────
    #[error("Unknown {kind} type '{name}'")]
    #[diagnostic(code(vellum::unknown_type), help("Available types: {available}"))]
    UnknownType {
        kind: &'static str,
        name: String,
        available: String,
    },

    #[error("Cannot read {path}")]
    #[diagnostic(code(vellum::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid document in {path}: {message}")]
    #[diagnostic(code(vellum::document), help("Documents must be JSON or YAML objects."))]
    Document { path: String, message: String },

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(vellum::render))]
    Render(String),

    // ── Outcome ──────────────────────────────────────────────────────
    #[error("{count} error diagnostic(s) reported")]
    #[diagnostic(code(vellum::failed))]
    Failed { count: usize },

    #[error(transparent)]
    #[diagnostic(code(vellum::core))]
    Core(#[from] CoreError),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingApiKey { .. } | Self::Config { .. } => exit_code::CONFIG,
            Self::UnknownType { .. } | Self::Document { .. } | Self::Io { .. } => {
                exit_code::USAGE
            }
            Self::Render(_) | Self::Failed { .. } | Self::Core(_) => exit_code::GENERAL,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::MissingApiKey => Self::MissingApiKey {
                path: vellum_config::config_path().display().to_string(),
            },
            other => Self::Config {
                hint: other.hint(),
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_uses_config_exit_code() {
        let err = CliError::from(ConfigError::MissingApiKey);
        assert_eq!(err.exit_code(), exit_code::CONFIG);
        assert!(matches!(err, CliError::MissingApiKey { .. }));
    }

    #[test]
    fn reported_failures_use_general_exit_code() {
        assert_eq!(CliError::Failed { count: 2 }.exit_code(), exit_code::GENERAL);
        assert_eq!(
            CliError::from(CoreError::Cancelled).exit_code(),
            exit_code::GENERAL
        );
    }
}
