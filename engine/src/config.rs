//! Configuration loading.
//!
//! `~/.nebula/config.toml` is optional; every field has a sensible default
//! and the Gemini key falls back to the `GEMINI_API_KEY` environment
//! variable.

use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use nebula_providers::{ApiConfig, ApiKey, DEFAULT_MODEL};

#[derive(Debug, Default, Deserialize)]
pub struct NebulaConfig {
    pub app: Option<AppConfig>,
    pub api_keys: Option<ApiKeys>,
}

#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Gemini model override for the AI solver.
    pub model: Option<String>,
    /// Use ASCII-only glyphs for badges and spinners.
    #[serde(default)]
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
    /// Show the scientific key row on startup.
    #[serde(default)]
    pub scientific: bool,
}

#[derive(Default, Deserialize)]
pub struct ApiKeys {
    pub google: Option<String>,
}

// Manual Debug impl to prevent leaking API keys in logs.
impl std::fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let google = if self.google.is_some() {
            "[REDACTED]"
        } else {
            "None"
        };
        f.debug_struct("ApiKeys").field("google", &google).finish()
    }
}

impl NebulaConfig {
    /// `~/.nebula/config.toml`, if a home directory can be resolved.
    #[must_use]
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".nebula").join("config.toml"))
    }

    /// Load the config file. `Ok(None)` when the file does not exist.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = Self::path() else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve the solver API configuration: config key first, then the
    /// provider env var. `None` when no key is available; the AI mode then
    /// degrades to an inline error placeholder instead of a request.
    #[must_use]
    pub fn api_config(&self) -> Option<ApiConfig> {
        let key = self
            .api_keys
            .as_ref()
            .and_then(|keys| keys.google.clone())
            .or_else(|| env::var("GEMINI_API_KEY").ok())
            .filter(|key| !key.trim().is_empty())?;

        let model = self
            .app
            .as_ref()
            .and_then(|app| app.model.clone())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Some(ApiConfig::new(ApiKey::new(key), model))
    }
}

/// Resolved presentation options, handed to the App and the TUI.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppOptions {
    pub ascii_only: bool,
    pub high_contrast: bool,
    pub scientific: bool,
}

impl AppOptions {
    #[must_use]
    pub fn from_config(config: Option<&NebulaConfig>) -> Self {
        let app = config.and_then(|cfg| cfg.app.as_ref());
        Self {
            ascii_only: app.is_some_and(|a| a.ascii_only),
            high_contrast: app.is_some_and(|a| a.high_contrast),
            scientific: app.is_some_and(|a| a.scientific),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::{AppOptions, NebulaConfig};

    #[test]
    fn parses_full_config() {
        let raw = r#"
            [app]
            model = "gemini-2.5-pro"
            ascii_only = true
            scientific = true

            [api_keys]
            google = "secret"
        "#;
        let config: NebulaConfig = toml::from_str(raw).unwrap();
        let app = config.app.as_ref().unwrap();
        assert_eq!(app.model.as_deref(), Some("gemini-2.5-pro"));
        assert!(app.ascii_only);
        assert!(!app.high_contrast);

        let options = AppOptions::from_config(Some(&config));
        assert!(options.scientific);
    }

    #[test]
    fn empty_config_is_valid() {
        let config: NebulaConfig = toml::from_str("").unwrap();
        assert!(config.app.is_none());
        assert!(config.api_keys.is_none());
    }

    #[test]
    fn load_from_reports_parse_errors_with_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not [valid toml").unwrap();
        let path = file.path().to_path_buf();
        let err = NebulaConfig::load_from(&path).unwrap_err();
        assert_eq!(err.path(), &path);
    }

    #[test]
    fn debug_redacts_api_key() {
        let config: NebulaConfig = toml::from_str("[api_keys]\ngoogle = \"secret\"").unwrap();
        let debug = format!("{:?}", config.api_keys.unwrap());
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn configured_key_resolves_api_config() {
        let config: NebulaConfig = toml::from_str("[api_keys]\ngoogle = \"secret\"").unwrap();
        let api = config.api_config().unwrap();
        assert_eq!(api.model(), super::DEFAULT_MODEL);
    }
}
