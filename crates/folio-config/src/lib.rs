//! Configuration management for Folio.
//!
//! Parses `folio.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [render]
//! fallback_alt = "Portfolio image"
//!
//! [render.routes]
//! article = "/articles"
//! project = "/work"
//!
//! [embed.hosts]
//! "music.youtube.com" = "youtube"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override fallback alt text for images.
    pub fallback_alt: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "folio.toml";

/// Document type routed by default.
const DEFAULT_ROUTE: (&str, &str) = ("article", "/articles");

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rendering configuration.
    pub render: RenderConfig,
    /// Embed configuration.
    pub embed: EmbedConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Alt text for images without their own.
    pub fallback_alt: Option<String>,
    /// Document type to path prefix. Entries extend the built-in routes.
    #[serde(deserialize_with = "with_default_routes")]
    pub routes: BTreeMap<String, String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fallback_alt: None,
            routes: default_routes(),
        }
    }
}

fn default_routes() -> BTreeMap<String, String> {
    let (document_type, prefix) = DEFAULT_ROUTE;
    BTreeMap::from([(document_type.to_owned(), prefix.to_owned())])
}

fn with_default_routes<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut routes = default_routes();
    routes.extend(BTreeMap::<String, String>::deserialize(deserializer)?);
    Ok(routes)
}

/// Embed configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EmbedConfig {
    /// Extra video hosts mapped to a provider name
    /// (`youtube`, `youtube-short` or `vimeo`).
    pub hosts: BTreeMap<String, String>,
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
}

/// Require a string field to be non-blank.
fn require_non_blank(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a route prefix to be an absolute path without a trailing slash.
fn require_route_prefix(prefix: &str, field: &str) -> Result<(), ConfigError> {
    if !prefix.starts_with('/') {
        return Err(ConfigError::Validation(format!("{field} must start with /")));
    }
    if prefix.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "{field} must not end with /"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `folio.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, or if reading,
    /// parsing or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(fallback_alt) = &settings.fallback_alt {
            self.render.fallback_alt = Some(fallback_alt.clone());
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
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

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_render()?;
        self.validate_embed()?;
        Ok(())
    }

    fn validate_render(&self) -> Result<(), ConfigError> {
        if let Some(alt) = &self.render.fallback_alt {
            require_non_blank(alt, "render.fallback_alt")?;
        }
        for (document_type, prefix) in &self.render.routes {
            require_non_blank(document_type, "render.routes key")?;
            require_route_prefix(prefix, &format!("render.routes.{document_type}"))?;
        }
        Ok(())
    }

    fn validate_embed(&self) -> Result<(), ConfigError> {
        for (host, provider) in &self.embed.hosts {
            require_non_blank(host, "embed.hosts key")?;
            require_non_blank(provider, &format!("embed.hosts.{host}"))?;
        }
        Ok(())
    }
}
