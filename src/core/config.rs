//! Host configuration
//!
//! TOML configuration file parsing and loading, including default config
//! file discovery in the platform configuration directory. Command line
//! switches override configuration values during startup.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Result of loading the host configuration file.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("the specified configuration file does not exist: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read configuration file {}: {cause}", path.display())]
    Io { path: PathBuf, cause: String },

    #[error("failed to parse configuration file {}: {cause}", path.display())]
    Parse { path: PathBuf, cause: String },
}

/// Top-level host configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub mode: ModeConfig,
    pub extensions: ExtensionsConfig,
    pub logging: LoggingConfig,
}

/// Runtime mode toggles, combined into the active mode mask at startup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModeConfig {
    pub production: bool,
    pub development: bool,
    pub plugin_dev: bool,
}

impl Default for ModeConfig {
    fn default() -> Self {
        Self {
            production: true,
            development: false,
            plugin_dev: false,
        }
    }
}

/// Where extensions are discovered and which names are filtered out.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtensionsConfig {
    /// Directory scanned for extension libraries. When unset, the platform
    /// configuration directory is used.
    pub dir: Option<PathBuf>,
    /// Namespace prefix for qualified extension names.
    pub namespace: String,
    /// Extension names (final segment) excluded from discovery.
    pub exclude: Vec<String>,
}

impl Default for ExtensionsConfig {
    fn default() -> Self {
        Self {
            dir: None,
            namespace: "modrelay.extensions".to_string(),
            exclude: Vec::new(),
        }
    }
}

impl ExtensionsConfig {
    /// The directory to scan, falling back to the platform default.
    pub fn resolved_dir(&self) -> PathBuf {
        if let Some(dir) = &self.dir {
            return dir.clone();
        }
        default_extension_dir()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<String>,
    pub file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from `explicit` if given, otherwise from the
    /// default location when present. An explicitly specified file that does
    /// not exist is an error; a missing default file yields the defaults.
    pub async fn load(explicit: Option<PathBuf>) -> ConfigResult<Config> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound { path });
                }
                path
            }
            None => match default_config_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Config::default()),
            },
        };

        Self::load_file(&path).await
    }

    async fn load_file(path: &Path) -> ConfigResult<Config> {
        let contents =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|e| ConfigError::Io {
                    path: path.to_path_buf(),
                    cause: e.to_string(),
                })?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            cause: e.to_string(),
        })
    }
}

/// Default configuration file location (platform config directory).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("ModRelay").join("modrelay.toml"))
}

/// Default extension directory (platform config directory, with a local
/// fallback for environments without one).
pub fn default_extension_dir() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("ModRelay").join("extensions");
    }
    PathBuf::from("./extensions")
}
