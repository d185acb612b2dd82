//! Startup configuration: an optional RON file plus the API key from the
//! environment.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use studio_engine::{ServiceSettings, SimulationSettings};
use thiserror::Error;

use super::logging::LogDestination;

pub const CONFIG_ENV: &str = "NANOSTUDIO_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "nanostudio.ron";
const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub image_model: String,
    pub text_model: String,
    pub request_timeout_secs: u64,
    pub simulation_tick_ms: u64,
    pub output_dir: PathBuf,
    pub log: LogDestination,
}

impl Default for AppConfig {
    fn default() -> Self {
        let service = ServiceSettings::default();
        Self {
            base_url: service.base_url,
            image_model: service.image_model,
            text_model: service.text_model,
            request_timeout_secs: service.request_timeout.as_secs(),
            simulation_tick_ms: SimulationSettings::default().tick.as_millis() as u64,
            output_dir: PathBuf::from("output"),
            log: LogDestination::default(),
        }
    }
}

impl AppConfig {
    /// Loads `$NANOSTUDIO_CONFIG`, else `./nanostudio.ron`. A missing file
    /// means defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::parse(path, &text)
    }

    fn parse(path: &Path, text: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if config.request_timeout_secs == 0 {
            return Err(ConfigError::Zero("request_timeout_secs"));
        }
        if config.simulation_tick_ms == 0 {
            return Err(ConfigError::Zero("simulation_tick_ms"));
        }
        Ok(config)
    }

    pub fn service_settings(&self, api_key: Option<String>) -> ServiceSettings {
        ServiceSettings {
            base_url: self.base_url.clone(),
            api_key,
            image_model: self.image_model.clone(),
            text_model: self.text_model.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..ServiceSettings::default()
        }
    }

    pub fn simulation(&self) -> SimulationSettings {
        SimulationSettings {
            tick: Duration::from_millis(self.simulation_tick_ms),
        }
    }
}

/// API key from `GEMINI_API_KEY`, falling back to `API_KEY`. Blank values
/// count as unset.
pub fn api_key_from_env() -> Option<String> {
    resolve_api_key(|name| std::env::var(name).ok())
}

fn resolve_api_key(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    API_KEY_VARS
        .into_iter()
        .filter_map(|name| lookup(name))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = AppConfig::load_from(&temp.path().join("absent.ron")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.simulation_tick_ms, 400);
        assert_eq!(config.log, LogDestination::File);
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nanostudio.ron");
        fs::write(
            &path,
            r#"(
                text_model: "gemini-2.5-pro",
                simulation_tick_ms: 50,
                output_dir: "exports",
                log: Both,
            )"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.text_model, "gemini-2.5-pro");
        assert_eq!(config.image_model, "gemini-2.5-flash-image");
        assert_eq!(config.simulation().tick, Duration::from_millis(50));
        assert_eq!(config.output_dir, PathBuf::from("exports"));
        assert_eq!(config.log, LogDestination::Both);
    }

    #[test]
    fn malformed_or_zero_values_are_rejected() {
        let path = Path::new("nanostudio.ron");
        assert!(matches!(
            AppConfig::parse(path, "(request_timeout_secs: \"soon\")"),
            Err(ConfigError::Parse { .. })
        ));
        assert!(matches!(
            AppConfig::parse(path, "(simulation_tick_ms: 0)"),
            Err(ConfigError::Zero("simulation_tick_ms"))
        ));
    }

    #[test]
    fn api_key_prefers_gemini_variable_and_skips_blanks() {
        let env: HashMap<&str, &str> = [("GEMINI_API_KEY", "  "), ("API_KEY", "fallback")].into();
        let key = resolve_api_key(|name| env.get(name).map(|v| v.to_string()));
        assert_eq!(key.as_deref(), Some("fallback"));

        let env: HashMap<&str, &str> = [("GEMINI_API_KEY", "primary"), ("API_KEY", "other")].into();
        let key = resolve_api_key(|name| env.get(name).map(|v| v.to_string()));
        assert_eq!(key.as_deref(), Some("primary"));

        assert_eq!(resolve_api_key(|_| None), None);
    }

    #[test]
    fn service_settings_carry_key_and_timeout() {
        let config = AppConfig {
            request_timeout_secs: 30,
            ..AppConfig::default()
        };
        let settings = config.service_settings(Some("k".into()));
        assert_eq!(settings.api_key.as_deref(), Some("k"));
        assert_eq!(settings.request_timeout, Duration::from_secs(30));
        assert_eq!(settings.base_url, config.base_url);
    }
}
