//! Configuration management for nbstage.
//!
//! Parses `nbstage.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories. Credentials can
//! also be picked up from `CONFLUENCE_USERNAME` / `CONFLUENCE_PASSWORD`
//! environment variables.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "nbstage.toml";

/// Environment variable holding the Confluence username.
pub const USERNAME_ENV: &str = "CONFLUENCE_USERNAME";

/// Environment variable holding the Confluence password.
pub const PASSWORD_ENV: &str = "CONFLUENCE_PASSWORD";

/// Basic auth credentials for the Confluence server.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    /// Confluence username.
    pub username: String,
    /// Confluence password or API token.
    pub password: String,
}

impl Credentials {
    /// Create credentials from explicit values.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Read credentials from the environment.
    ///
    /// Returns `None` unless both `CONFLUENCE_USERNAME` and
    /// `CONFLUENCE_PASSWORD` are set.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let username = std::env::var(USERNAME_ENV).ok()?;
        let password = std::env::var(PASSWORD_ENV).ok()?;
        Some(Self { username, password })
    }
}

/// Options controlling a single publish run.
///
/// Pure input: the publisher never mutates these.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PublishOptions {
    /// Insert a table of contents macro at the top of the page.
    pub generate_toc: bool,
    /// Attach the source document to the page and link it from the footer.
    pub attach_source: bool,
    /// Include the base stylesheet on the page.
    pub include_stylesheet: bool,
    /// Include math rendering support on the page.
    pub include_math: bool,
    /// Additional labels to add to the page, in order.
    pub extra_labels: Vec<String>,
}

impl Default for PublishOptions {
    fn default() -> Self {
        Self {
            generate_toc: true,
            attach_source: true,
            include_stylesheet: true,
            include_math: false,
            extra_labels: Vec::new(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Confluence credentials.
    pub confluence: Option<Credentials>,
    /// Publish options.
    pub publish: PublishOptions,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

impl Config {
    /// Load configuration from file.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise,
    /// searches for `nbstage.toml` in the current directory and parents,
    /// falling back to defaults when nothing is found.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit `config_path` doesn't exist or
    /// parsing fails.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)
        } else {
            Ok(Self::default())
        }
    }

    /// Search for a config file in the current directory and parents.
    #[must_use]
    pub fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Resolve credentials: config file first, then environment.
    #[must_use]
    pub fn credentials(&self) -> Option<Credentials> {
        self.confluence.clone().or_else(Credentials::from_env)
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }
}
