//! Configuration for Luma sites.
//!
//! A site is described by a `luma.yaml` document:
//!
//! ```yaml
//! name: My Library
//! favicon: static/favicon.ico
//! release_version: ${LUMA_RELEASE_VERSION:-}
//! navigation:
//!   - type: page
//!     title: Introduction
//!     path: intro.md
//! socials:
//!   - platform: github
//!     url: https://github.com/example/mylib
//! server:
//!   port: 3000
//! ```
//!
//! When no path is given the file is discovered in the current directory or
//! one of its parents. CLI overrides are applied via [`CliSettings`].

mod expand;

use std::path::{Path, PathBuf};

use luma_navigation::{NavigationItem, flatten};
use serde::{Deserialize, Serialize};

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "luma.yaml";

/// Default pages directory, relative to the configuration file.
const DEFAULT_PAGES_DIR: &str = "pages";

/// CLI settings that override configuration file values.
///
/// Only `Some` fields override the loaded config.
#[derive(Debug, Clone, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override the pages directory.
    pub pages_dir: Option<PathBuf>,
    /// Override the release version used for image paths.
    pub release_version: Option<String>,
}

/// A social account link shown in the site header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Social {
    /// Platform identifier (`github`, `discord`, ...).
    pub platform: String,
    /// Profile URL.
    pub url: String,
}

/// Preview server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 3000,
        }
    }
}

/// Site configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site name, used as the document title.
    pub name: String,
    /// Favicon path relative to the configuration file.
    pub favicon: Option<String>,
    /// Navigation tree.
    pub navigation: Vec<NavigationItem>,
    /// Social links.
    pub socials: Vec<Social>,
    /// Release version local images are published under.
    pub release_version: Option<String>,
    /// Preview server settings.
    pub server: ServerConfig,
    /// Pages directory as written in the file.
    #[serde(rename = "pages_dir", skip_serializing_if = "Option::is_none")]
    pages_dir_raw: Option<String>,

    /// Resolved pages directory (set after loading).
    #[serde(skip)]
    pub pages_dir: PathBuf,
    /// Directory containing the configuration file (set after loading).
    #[serde(skip)]
    pub root_dir: PathBuf,
    /// Path to the config file, when loaded from one.
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field name (e.g. `release_version`).
        field: String,
        /// What went wrong.
        message: String,
    },
}

impl Config {
    /// Load configuration with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `luma.yaml` in the current directory and its parents.
    ///
    /// The loaded configuration is validated after CLI settings are applied.
    ///
    /// # Errors
    ///
    /// Returns error if no file is found, reading or parsing fails, or
    /// validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let path = match config_path {
            Some(path) if path.exists() => path.to_path_buf(),
            Some(path) => return Err(ConfigError::NotFound(path.to_path_buf())),
            None => Self::discover_config()
                .ok_or_else(|| ConfigError::NotFound(PathBuf::from(CONFIG_FILENAME)))?,
        };

        let content = std::fs::read_to_string(&path)?;
        let root_dir = path.parent().unwrap_or(Path::new("."));
        let mut config = Self::from_yaml(&content, root_dir)?;
        config.config_path = Some(path.clone());

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        tracing::debug!(path = %path.display(), items = config.navigation.len(), "Loaded configuration");
        Ok(config)
    }

    /// Parse configuration text, resolving paths against `root_dir`.
    ///
    /// Environment references are expanded but nothing is checked on disk;
    /// call [`Config::validate`] for that.
    ///
    /// # Errors
    ///
    /// Returns error if the YAML is malformed or an environment reference
    /// cannot be expanded.
    pub fn from_yaml(content: &str, root_dir: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = if content.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(content)?
        };
        config.expand_env_vars()?;
        config.resolve_paths(root_dir);
        Ok(config)
    }

    /// Search for the config file in the current directory and its parents.
    #[must_use]
    pub fn discover_config() -> Option<PathBuf> {
        let cwd = std::env::current_dir().ok()?;
        Self::discover_from(&cwd)
    }

    /// Search for the config file in `start` and its parents.
    #[must_use]
    pub fn discover_from(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.is_file())
    }

    /// Release version with empty values treated as unset.
    #[must_use]
    pub fn release_version(&self) -> Option<&str> {
        self.release_version
            .as_deref()
            .filter(|version| !version.is_empty())
    }

    /// Path of a page's markdown file.
    #[must_use]
    pub fn page_file(&self, source_path: &str) -> PathBuf {
        self.pages_dir.join(source_path.trim_start_matches('/'))
    }

    /// Validate configuration values against the filesystem.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Validation("name cannot be empty".to_owned()));
        }
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }
        if let Some(favicon) = &self.favicon
            && !self.root_dir.join(favicon).exists()
        {
            return Err(ConfigError::Validation(format!(
                "Your config specifies a favicon at '{favicon}', but the file doesn't exist"
            )));
        }
        for entry in flatten(&self.navigation) {
            self.validate_page(entry.source_path)?;
        }
        Ok(())
    }

    fn validate_page(&self, path: &str) -> Result<(), ConfigError> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return Ok(());
        }
        if !self.page_file(path).exists() {
            return Err(ConfigError::Validation(format!(
                "Your config references a page at '{path}', but the file doesn't exist"
            )));
        }
        if !path.ends_with(".md") {
            return Err(ConfigError::Validation(format!(
                "Your config references a page at '{path}', but the file isn't a Markdown file"
            )));
        }
        Ok(())
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(pages_dir) = &settings.pages_dir {
            self.pages_dir.clone_from(pages_dir);
        }
        if let Some(version) = &settings.release_version {
            self.release_version = Some(version.clone());
        }
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(version) = &self.release_version {
            self.release_version = Some(expand::expand_env(version, "release_version")?);
        }
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;
        Ok(())
    }

    fn resolve_paths(&mut self, root_dir: &Path) {
        self.root_dir = root_dir.to_path_buf();
        self.pages_dir = root_dir.join(self.pages_dir_raw.as_deref().unwrap_or(DEFAULT_PAGES_DIR));
    }
}
