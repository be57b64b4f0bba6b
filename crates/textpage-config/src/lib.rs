use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where history and blog data are stored.
    pub data_dir: PathBuf,
    /// `local` or `remote`.
    pub default_mode: String,
    /// Author name used for published blog posts.
    pub author: String,
    pub remote: RemoteConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("~/.local/share/textpage"),
            default_mode: "local".to_string(),
            author: "Editor".to_string(),
            remote: RemoteConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub base_url: String,
    pub model: String,
    /// Name of the environment variable holding the API key. The key itself
    /// never goes in the config file.
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.deepseek.com".to_string(),
            model: "deepseek-chat".to_string(),
            api_key_env: "TEXTPAGE_API_KEY".to_string(),
            timeout_secs: 60,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the data directory
        config.data_dir = Self::expand_path(&config.data_dir).unwrap_or(config.data_dir);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// The config file if there is one, otherwise the defaults with the data
    /// directory expanded.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        Ok(Self::load()?.unwrap_or_else(Self::expanded_default))
    }

    pub fn expanded_default() -> Self {
        let mut config = Self::default();
        config.data_dir = Self::expand_path(&config.data_dir).unwrap_or(config.data_dir);
        config
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/textpage");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Reads the remote API key from the configured environment variable.
    /// Unset or blank reads as `None`.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.remote.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/textpage/config.toml"));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.default_mode, "local");
        assert_eq!(config.author, "Editor");
        assert_eq!(config.remote.base_url, "https://api.deepseek.com");
        assert_eq!(config.remote.model, "deepseek-chat");
        assert_eq!(config.remote.api_key_env, "TEXTPAGE_API_KEY");
        assert_eq!(config.remote.timeout_secs, 60);
    }

    #[test]
    fn test_expanded_default_has_no_tilde() {
        let config = Config::expanded_default();
        let data_dir = config.data_dir.to_string_lossy();
        assert!(!data_dir.starts_with('~'));
        assert!(data_dir.ends_with(".local/share/textpage"));
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let original = Config {
            data_dir: PathBuf::from("/tmp/textpage-data"),
            default_mode: "remote".to_string(),
            ..Config::default()
        };

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
author = "Sam"

[remote]
model = "other-model"
"#,
        )
        .unwrap();

        assert_eq!(config.author, "Sam");
        assert_eq!(config.default_mode, "local");
        assert_eq!(config.remote.model, "other-model");
        assert_eq!(config.remote.timeout_secs, 60);
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("TEXTPAGE_TEST_ROOT", "/test/env/path");
        }

        let path = PathBuf::from("$TEXTPAGE_TEST_ROOT/data");
        let expanded = Config::expand_path(&path).unwrap();
        assert_eq!(expanded, PathBuf::from("/test/env/path/data"));

        unsafe {
            env::remove_var("TEXTPAGE_TEST_ROOT");
        }
    }

    #[test]
    fn test_expand_path_with_absolute_path() {
        let path = PathBuf::from("/absolute/path");
        let expanded = Config::expand_path(&path).unwrap();

        assert_eq!(expanded, path);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_invalid_toml_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "author = [unclosed").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let test_config = Config {
            data_dir: PathBuf::from("/tmp/textpage-data"),
            author: "Robin".to_string(),
            ..Config::default()
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_data_dir_with_tilde_in_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "data_dir = \"~/textpage/data\"\n").unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();
        let data_dir = config.data_dir.to_string_lossy();
        assert!(!data_dir.starts_with('~'));
        assert!(data_dir.ends_with("textpage/data"));
    }

    #[test]
    fn test_api_key_from_named_env_var() {
        let mut config = Config::default();
        config.remote.api_key_env = "TEXTPAGE_TEST_KEY_VAR".to_string();
        assert_eq!(config.api_key(), None);

        unsafe {
            env::set_var("TEXTPAGE_TEST_KEY_VAR", "sk-123");
        }
        assert_eq!(config.api_key().as_deref(), Some("sk-123"));

        unsafe {
            env::set_var("TEXTPAGE_TEST_KEY_VAR", "  ");
        }
        assert_eq!(config.api_key(), None);

        unsafe {
            env::remove_var("TEXTPAGE_TEST_KEY_VAR");
        }
    }
}
