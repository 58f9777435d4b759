//! Application configuration.
//!
//! Settings come from `./assistant.ron` (or the path given as the first
//! argument); the credential only ever comes from the environment.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use assistant_engine::{AnalyzeSettings, DEFAULT_ENDPOINT};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

pub const CONFIG_FILENAME: &str = "assistant.ron";
pub const TOKEN_ENV: &str = "ASSISTANT_API_TOKEN";
pub const ENDPOINT_ENV: &str = "ASSISTANT_ENDPOINT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid ticket_base_url {value:?}: {message}")]
    TicketUrl { value: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: String,
    pub ticket_base_url: String,
    pub default_subject_id: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: Option<u64>,
    pub log_to_terminal: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            ticket_base_url: "http://127.0.0.1:3000/tickets/new".to_string(),
            default_subject_id: "u123".to_string(),
            connect_timeout_secs: 10,
            request_timeout_secs: None,
            log_to_terminal: false,
        }
    }
}

impl AppConfig {
    /// Loads `path`, or `./assistant.ron` when no path is given.
    ///
    /// A missing default file means defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let path = PathBuf::from(CONFIG_FILENAME);
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&content).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    pub fn ticket_base(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.ticket_base_url).map_err(|err| ConfigError::TicketUrl {
            value: self.ticket_base_url.clone(),
            message: err.to_string(),
        })
    }
}

/// File settings plus what the environment contributes.
#[derive(Clone)]
pub struct RuntimeConfig {
    pub file: AppConfig,
    pub bearer_token: Option<String>,
}

impl RuntimeConfig {
    /// `env` is a variable lookup, normally `std::env::var(..).ok()`.
    pub fn resolve(mut file: AppConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(endpoint) = env(ENDPOINT_ENV).filter(|v| !v.trim().is_empty()) {
            file.endpoint = endpoint.trim().to_string();
        }
        let bearer_token = env(TOKEN_ENV).filter(|v| !v.trim().is_empty());
        Self { file, bearer_token }
    }

    pub fn analyze_settings(&self) -> AnalyzeSettings {
        AnalyzeSettings {
            endpoint: self.file.endpoint.clone(),
            bearer_token: self.bearer_token.clone(),
            connect_timeout: Duration::from_secs(self.file.connect_timeout_secs),
            request_timeout: self.file.request_timeout_secs.map(Duration::from_secs),
        }
    }
}

impl fmt::Debug for RuntimeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeConfig")
            .field("file", &self.file)
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::Duration;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("assistant.ron");
        fs::write(
            &path,
            r#"(endpoint: "https://support.example.edu/api/ai/analyze", request_timeout_secs: Some(90))"#,
        )
        .unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.endpoint, "https://support.example.edu/api/ai/analyze");
        assert_eq!(config.request_timeout_secs, Some(90));
        assert_eq!(config.default_subject_id, "u123");
        assert!(!config.log_to_terminal);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let err = AppConfig::load(Some(&temp.path().join("nope.ron"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("assistant.ron");
        fs::write(&path, "(endpoint: 42").unwrap();
        let err = AppConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn environment_supplies_token_and_endpoint() {
        let runtime = RuntimeConfig::resolve(AppConfig::default(), |key| match key {
            TOKEN_ENV => Some("s3cret".to_string()),
            ENDPOINT_ENV => Some(" http://10.0.0.5/api/ai/analyze ".to_string()),
            _ => None,
        });
        let settings = runtime.analyze_settings();
        assert_eq!(settings.bearer_token.as_deref(), Some("s3cret"));
        assert_eq!(settings.endpoint, "http://10.0.0.5/api/ai/analyze");
        assert_eq!(settings.connect_timeout, Duration::from_secs(10));
        assert_eq!(settings.request_timeout, None);
        assert!(!format!("{runtime:?}").contains("s3cret"));
    }

    #[test]
    fn blank_token_is_ignored() {
        let runtime = RuntimeConfig::resolve(AppConfig::default(), |key| {
            (key == TOKEN_ENV).then(|| "   ".to_string())
        });
        assert_eq!(runtime.bearer_token, None);
    }

    #[test]
    fn ticket_base_must_be_absolute() {
        let config = AppConfig {
            ticket_base_url: "/tickets/new".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(
            config.ticket_base(),
            Err(ConfigError::TicketUrl { .. })
        ));
        assert_eq!(
            AppConfig::default().ticket_base().unwrap().path(),
            "/tickets/new"
        );
    }
}
