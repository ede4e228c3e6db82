//! Settings for Vellum tools.
//!
//! Layered loading (defaults, optional TOML file, `VELLUM_*` environment),
//! API key resolution, and translation to `vellum_core::ClientConfig`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use vellum_core::ClientConfig;

/// Environment variable that carries the API key.
pub const API_KEY_ENV: &str = "VELLUM_API_KEY";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("An API key is required to use the vellum provider")]
    MissingApiKey,

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl ConfigError {
    /// Remediation shown next to the error.
    pub fn hint(&self) -> &'static str {
        match self {
            Self::MissingApiKey => {
                "You must set a VELLUM_API_KEY or specify an api_key in the provider configuration"
            }
            Self::Validation { .. } => {
                "Check the value in your config file or VELLUM_* environment"
            }
            Self::Figment(_) => "Check that the config file is valid TOML",
        }
    }
}

// ── Settings ────────────────────────────────────────────────────────

/// Host-level settings for one provider instance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    /// Provider-block API key. `VELLUM_API_KEY` takes precedence.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.vellum.ai".into()
}

fn default_timeout() -> u64 {
    30
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("ai", "vellum", "vellum").map_or_else(
        || PathBuf::from(".vellum").join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Loading ─────────────────────────────────────────────────────────

fn figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Settings::default()))
        .merge(Toml::file(path))
        // The key is resolved separately so the file value stays the host value.
        .merge(Env::prefixed("VELLUM_").ignore(&["api_key"]))
}

/// Load settings from `path` (or the platform config path) plus environment.
///
/// A missing file is not an error.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);
    let settings: Settings = figment(&path).extract()?;
    Ok(settings)
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the API key: the environment value wins when present and
/// non-empty, then the host value. Neither is fatal.
pub fn resolve_api_key<F>(host_value: Option<&str>, env: F) -> Result<SecretString, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = env(API_KEY_ENV).filter(|k| !k.is_empty()) {
        return Ok(SecretString::from(key));
    }

    host_value
        .filter(|k| !k.is_empty())
        .map(|k| SecretString::from(k.to_owned()))
        .ok_or(ConfigError::MissingApiKey)
}

/// Look up a variable in the process environment.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

impl Settings {
    /// Build the immutable client configuration handed to the provider.
    pub fn into_client_config<F>(self, env: F) -> Result<ClientConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url: url::Url = self.base_url.parse().map_err(|_| ConfigError::Validation {
            field: "base_url".into(),
            reason: format!("invalid URL: {}", self.base_url),
        })?;
        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation {
                field: "timeout_secs".into(),
                reason: "must be at least 1 second".into(),
            });
        }

        let api_key = resolve_api_key(self.api_key.as_deref(), env)?;

        Ok(ClientConfig {
            base_url,
            api_key,
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env_key(name: &str) -> Option<String> {
        (name == API_KEY_ENV).then(|| "from-env".to_owned())
    }

    #[test]
    fn environment_key_wins_over_host_value() {
        let key = resolve_api_key(Some("from-host"), env_key).unwrap();
        assert_eq!(key.expose_secret(), "from-env");
    }

    #[test]
    fn host_value_used_when_environment_absent() {
        let key = resolve_api_key(Some("from-host"), no_env).unwrap();
        assert_eq!(key.expose_secret(), "from-host");

        let key = resolve_api_key(Some("from-host"), |_| Some(String::new())).unwrap();
        assert_eq!(key.expose_secret(), "from-host");
    }

    #[test]
    fn missing_key_is_fatal() {
        let err = resolve_api_key(None, no_env).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));

        let err = resolve_api_key(Some(""), no_env).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
        assert!(err.hint().contains("VELLUM_API_KEY"));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = figment(&dir.path().join("absent.toml")).extract::<Settings>();
        let settings = settings.unwrap();
        assert_eq!(settings.base_url, "https://api.vellum.ai");
        assert_eq!(settings.timeout_secs, 30);
    }

    #[test]
    fn file_values_override_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "api_key = \"sk-file\"\nbase_url = \"https://vellum.internal\"\ntimeout_secs = 5"
        )
        .unwrap();

        let settings: Settings = Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(file.path()))
            .extract()
            .unwrap();

        assert_eq!(
            settings,
            Settings {
                api_key: Some("sk-file".into()),
                base_url: "https://vellum.internal".into(),
                timeout_secs: 5,
            }
        );
    }

    #[test]
    fn client_config_carries_resolved_values() {
        let settings = Settings {
            api_key: Some("sk-file".into()),
            base_url: "https://vellum.internal".into(),
            timeout_secs: 12,
        };
        let config = settings.into_client_config(no_env).unwrap();
        assert_eq!(config.base_url.as_str(), "https://vellum.internal/");
        assert_eq!(config.timeout, Duration::from_secs(12));
        assert_eq!(config.api_key.expose_secret(), "sk-file");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let settings = Settings {
            base_url: "not a url".into(),
            ..Settings::default()
        };
        let err = settings.into_client_config(env_key).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "base_url"));
    }
}
