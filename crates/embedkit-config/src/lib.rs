//! Configuration management for embedkit.
//!
//! Parses `embedkit.toml` with serde and discovers it in the current
//! directory or any parent. CLI settings are applied during load via
//! [`CliSettings`].
//!
//! ```toml
//! [http]
//! timeout_secs = 10
//! user_agent = "my-cms/1.0"
//!
//! [cache]
//! enabled = true
//! ttl_secs = 600
//!
//! [providers.mixcloud]
//! discovery_url = "${MIXCLOUD_OEMBED:-http://www.mixcloud.com/oembed/}"
//!
//! [providers.soundcloud]
//! enabled = false
//! ```
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` expands to the value of VAR, errors if unset
//! - `${VAR:-default}` expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `http.user_agent`
//! - `providers.<name>.discovery_url`

mod expand;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "embedkit.toml";

const MAX_TIMEOUT_SECS: u64 = 300;

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override HTTP timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Override cache enabled flag.
    pub cache_enabled: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub http: HttpConfig,
    pub cache: CacheConfig,
    pub providers: ProvidersConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Outbound HTTP settings for discovery lookups.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Global request timeout in seconds.
    pub timeout_secs: u64,
    /// `User-Agent` header; the library default when unset.
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: None,
        }
    }
}

impl HttpConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Lookup cache settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Whether successful lookups are cached in memory.
    pub enabled: bool,
    /// How long a cached lookup stays valid.
    pub ttl_secs: u64,
    /// Maximum number of cached lookups.
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            ttl_secs: 300,
            max_entries: 256,
        }
    }
}

impl CacheConfig {
    #[must_use]
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// Per-provider settings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub mixcloud: ProviderConfig,
    pub soundcloud: ProviderConfig,
}

impl ProvidersConfig {
    /// Settings for a provider type name, if it is a known provider.
    pub fn get(&self, type_name: &str) -> Option<&ProviderConfig> {
        match type_name {
            "mixcloud" => Some(&self.mixcloud),
            "soundcloud" => Some(&self.soundcloud),
            _ => None,
        }
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = (&'static str, &mut ProviderConfig)> {
        [
            ("mixcloud", &mut self.mixcloud),
            ("soundcloud", &mut self.soundcloud),
        ]
        .into_iter()
    }
}

/// Settings for one provider.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Whether the provider is registered at all.
    pub enabled: bool,
    /// Replacement oEmbed discovery endpoint.
    pub discovery_url: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            discovery_url: None,
        }
    }
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
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`http.user_agent`").
        field: String,
        /// Error message (e.g., "${`EMBEDKIT_UA`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `embedkit.toml` in the current directory and its parents, falling
    /// back to defaults when none exists.
    ///
    /// CLI settings take precedence over file values and are validated along
    /// with them.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or a value is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let discovered;
        let path = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                Some(path)
            }
            None => {
                discovered = std::env::current_dir()
                    .ok()
                    .and_then(|cwd| Self::discover_config(&cwd));
                discovered.as_deref()
            }
        };

        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }
        config.validate()?;

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(timeout_secs) = settings.timeout_secs {
            self.http.timeout_secs = timeout_secs;
        }
        if let Some(cache_enabled) = settings.cache_enabled {
            self.cache.enabled = cache_enabled;
        }
    }

    /// Search for the config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
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

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_http()?;
        self.validate_cache()?;
        self.validate_providers()?;
        Ok(())
    }

    fn validate_http(&self) -> Result<(), ConfigError> {
        let timeout = self.http.timeout_secs;
        if timeout == 0 {
            return Err(ConfigError::Validation(
                "http.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        if timeout > MAX_TIMEOUT_SECS {
            return Err(ConfigError::Validation(format!(
                "http.timeout_secs cannot exceed {MAX_TIMEOUT_SECS}"
            )));
        }
        if let Some(ref user_agent) = self.http.user_agent {
            require_non_empty(user_agent, "http.user_agent")?;
        }
        Ok(())
    }

    fn validate_cache(&self) -> Result<(), ConfigError> {
        // Limits only matter when the cache is in use
        if !self.cache.enabled {
            return Ok(());
        }
        if self.cache.ttl_secs == 0 {
            return Err(ConfigError::Validation(
                "cache.ttl_secs must be greater than 0".to_owned(),
            ));
        }
        if self.cache.max_entries == 0 {
            return Err(ConfigError::Validation(
                "cache.max_entries must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_providers(&self) -> Result<(), ConfigError> {
        for (name, provider) in [
            ("mixcloud", &self.providers.mixcloud),
            ("soundcloud", &self.providers.soundcloud),
        ] {
            if let Some(ref url) = provider.discovery_url {
                let field = format!("providers.{name}.discovery_url");
                require_non_empty(url, &field)?;
                require_http_url(url, &field)?;
            }
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref user_agent) = self.http.user_agent {
            self.http.user_agent = Some(expand::expand_env(user_agent, "http.user_agent")?);
        }

        for (name, provider) in self.providers.iter_mut() {
            if let Some(ref url) = provider.discovery_url {
                let field = format!("providers.{name}.discovery_url");
                provider.discovery_url = Some(expand::expand_env(url, &field)?);
            }
        }

        Ok(())
    }
}
