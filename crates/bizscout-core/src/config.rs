use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
///
/// This gets loaded from config file, env vars, and CLI args.
/// Priority: CLI > Env > File > Defaults (like a sensible person would do)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl Config {
    /// Load config from the given path (or the default location), then layer
    /// environment overrides on top. A missing file just means defaults.
    pub fn load(path: Option<&Path>) -> crate::Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        let mut config = if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            toml::from_str(&contents)
                .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?
        } else {
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// The one hard startup requirement: no API key, no server.
    pub fn require_api_key(&self) -> crate::Result<String> {
        self.api.api_key.clone().ok_or_else(|| {
            crate::Error::Config(
                "No API key found. Set YELP_API_KEY (or api.api_key in the config file)".into(),
            )
        })
    }

    fn apply_overrides<F>(&mut self, get: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = get("YELP_API_KEY") {
            self.api.api_key = Some(key);
        }
        if let Some(path) = get("BIZSCOUT_DB_PATH") {
            self.store.db_path = path;
        }
        if let Some(bind) = get("BIZSCOUT_BIND") {
            self.server.bind = bind;
        }
    }

    /// Get the config file path
    /// Uses XDG on Linux/macOS, AppData on Windows
    fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::Config("Could not find config directory".into()))?
            .join("bizscout");

        Ok(config_dir.join("config.toml"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Business-data API key (Bearer token)
    pub api_key: Option<String>,

    /// API base URL (override for tests or mirrors)
    #[serde(default = "default_api_url")]
    pub base_url: String,
}

fn default_api_url() -> String {
    "https://api.yelp.com/v3".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_api_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the SQLite file
    #[serde(default = "default_db_path")]
    pub db_path: String,
}

fn default_db_path() -> String {
    "bizscout.db".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP server binds to
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.store.db_path, "bizscout.db");
        assert_eq!(config.server.bind, "127.0.0.1:8080");
        assert!(config.api.api_key.is_none());
    }

    #[test]
    fn test_missing_api_key_is_a_config_error() {
        let config = Config::default();
        let err = config.require_api_key().unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_env_override_wins_over_file_value() {
        let mut config: Config = toml::from_str(
            r#"
            [api]
            api_key = "from-file"
            "#,
        )
        .unwrap();

        config.apply_overrides(|key| match key {
            "YELP_API_KEY" => Some("from-env".to_string()),
            _ => None,
        });

        assert_eq!(config.require_api_key().unwrap(), "from-env");
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let config: Config = toml::from_str(
            r#"
            [store]
            db_path = "/tmp/custom.db"
            "#,
        )
        .unwrap();

        assert_eq!(config.store.db_path, "/tmp/custom.db");
        assert_eq!(config.server.bind, "127.0.0.1:8080");
        assert_eq!(config.api.base_url, "https://api.yelp.com/v3");
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("db_path"));
        assert!(toml.contains("bind"));
    }
}
