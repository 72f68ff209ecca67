//! Configuration for the card vault binaries.
//!
//! Loaded from TOML. Every key is optional and falls back to a default.
//!
//! ```toml
//! export_path = "my_cards.txt"
//! email = "me@example.com"
//! log_level = "info"
//!
//! [email_transport]
//! enabled = true
//! latency_ms = 800
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{fmt, io};

use crate::export::DEFAULT_EXPORT_FILE;

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "CARD_VAULT_CONFIG";

/// Config file looked up in the working directory.
pub const CONFIG_FILENAME: &str = "card_vault.toml";

/// Default log filter.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default simulated email latency.
pub const DEFAULT_EMAIL_LATENCY_MS: u64 = 800;

/// Configuration loading errors
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read config file
    Io(io::Error),
    /// Failed to parse TOML
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read config: {e}"),
            Self::Parse(e) => write!(f, "failed to parse config: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        Self::Parse(err)
    }
}

/// Email transport settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EmailTransportConfig {
    /// When false, email destinations fall back to the export file.
    pub enabled: bool,
    /// Simulated network latency in milliseconds.
    pub latency_ms: u64,
}

impl Default for EmailTransportConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            latency_ms: DEFAULT_EMAIL_LATENCY_MS,
        }
    }
}

impl EmailTransportConfig {
    /// Latency as a [`Duration`].
    #[inline]
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    /// File that saved cards are appended to.
    pub export_path: PathBuf,
    /// Default email destination, if any.
    pub email: Option<String>,
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Email transport settings.
    pub email_transport: EmailTransportConfig,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            export_path: PathBuf::from(DEFAULT_EXPORT_FILE),
            email: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            email_transport: EmailTransportConfig::default(),
        }
    }
}

impl VaultConfig {
    /// Parses configuration from a TOML string.
    ///
    /// # Example
    ///
    /// ```
    /// use card_vault::config::VaultConfig;
    ///
    /// let config = VaultConfig::from_toml_str("export_path = \"cards.txt\"").unwrap();
    /// assert_eq!(config.export_path.to_str(), Some("cards.txt"));
    /// assert!(!config.email_transport.enabled);
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Reads configuration from `path`.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Resolves and loads the configuration.
    ///
    /// An explicit path must exist. Otherwise `CARD_VAULT_CONFIG` and then
    /// `card_vault.toml` are tried, and defaults are used if neither exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }

        let env_path = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        for path in search_paths(env_path) {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }
}

/// Candidate config files in priority order.
fn search_paths(env_path: Option<PathBuf>) -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(2);
    if let Some(path) = env_path {
        paths.push(path);
    }
    paths.push(PathBuf::from(CONFIG_FILENAME));
    paths
}
