use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    Read {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    Parse {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fallback tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
    pub title: TitleConfig,
    pub page: PageConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            title: TitleConfig::default(),
            page: PageConfig::default(),
        }
    }
}

/// Which level 1 heading names the page when a document has several.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitlePolicy {
    First,
    #[default]
    Last,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct TitleConfig {
    pub policy: TitlePolicy,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct PageConfig {
    /// HTML template with `{{ Title }}` and `{{ Content }}` placeholders.
    /// Relative paths resolve against the config file's directory.
    pub template: Option<PathBuf>,
}

impl Config {
    /// The configuration bundled with the binary.
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file.
    pub fn try_load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            config_path: path.to_path_buf(),
            source,
        })?;

        let mut config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            config_path: path.to_path_buf(),
            source,
        })?;

        if let (Some(template), Some(dir)) = (&config.page.template, path.parent()) {
            if template.is_relative() {
                config.page.template = Some(dir.join(template));
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn compiled_default_matches_default() {
        let config = Config::compiled_default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.title.policy, TitlePolicy::Last);
        assert!(config.page.template.is_none());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mdhtml.toml");
        fs::write(&path, "[title]\npolicy = \"first\"\n").unwrap();

        let config = Config::try_load(&path).unwrap();
        assert_eq!(config.title.policy, TitlePolicy::First);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn template_is_relative_to_config_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mdhtml.toml");
        fs::write(&path, "[page]\ntemplate = \"template.html\"\n").unwrap();

        let config = Config::try_load(&path).unwrap();
        assert_eq!(config.page.template, Some(dir.path().join("template.html")));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let err = Config::try_load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn unknown_policy_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mdhtml.toml");
        fs::write(&path, "[title]\npolicy = \"middle\"\n").unwrap();

        let err = Config::try_load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("mdhtml.toml"));
    }
}
