//! Configuration loading and resolution
//!
//! Settings are resolved in priority order:
//! 1. Command-line argument (highest priority; clap also maps env vars here)
//! 2. TOML config file
//! 3. Compiled default (fallback)
//!
//! The TOML file itself is located from an explicit path, then the
//! `MAPGAL_CONFIG` environment variable, then the platform config directory,
//! then `/etc/mapgal/config.toml`. A missing file is not an error.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::render::{ImageLocator, DEFAULT_IMAGE_EXTENSION, DEFAULT_IMAGE_PREFIX};
use crate::source::DatasetSource;
use crate::vocabulary::FilterOrder;
use crate::{Error, Result};

pub const CONFIG_ENV_VAR: &str = "MAPGAL_CONFIG";
pub const DEFAULT_DATASET: &str = "maps.csv";
pub const DEFAULT_PORT: u16 = 5790;
pub const DEFAULT_BIND: &str = "127.0.0.1";

/// Contents of config.toml; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Dataset path or http(s) URL
    #[serde(default)]
    pub dataset: Option<String>,

    #[serde(default)]
    pub port: Option<u16>,

    #[serde(default)]
    pub bind: Option<String>,

    /// Directory holding thumbnail images, served under `image_prefix`
    #[serde(default)]
    pub image_dir: Option<PathBuf>,

    #[serde(default)]
    pub image_prefix: Option<String>,

    #[serde(default)]
    pub image_extension: Option<String>,

    /// Replaces the built-in canonical filter order
    #[serde(default)]
    pub filter_order: Option<FilterOrder>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid TOML: {}", e)))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }
}

/// Find the config file to use, if any
///
/// An explicit path is returned even if it does not exist so that the
/// caller reports it; implicit locations are only returned when present.
pub fn locate_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    let user_config = dirs::config_dir().map(|d| d.join("mapgal").join("config.toml"));
    let system_config = PathBuf::from("/etc/mapgal/config.toml");

    user_config
        .into_iter()
        .chain(std::iter::once(system_config))
        .find(|p| p.exists())
}

/// Values supplied on the command line (or through clap's env fallbacks)
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config: Option<PathBuf>,
    pub dataset: Option<String>,
    pub port: Option<u16>,
    pub bind: Option<String>,
    pub image_dir: Option<PathBuf>,
}

/// Fully resolved gallery configuration
#[derive(Debug, Clone)]
pub struct GalleryConfig {
    pub dataset: DatasetSource,
    pub port: u16,
    pub bind: String,
    pub image_dir: Option<PathBuf>,
    pub locator: ImageLocator,
    pub filter_order: FilterOrder,
    pub log_level: String,
    /// Config file the values came from, if any
    pub config_file: Option<PathBuf>,
}

impl GalleryConfig {
    /// Merge command-line values over a TOML config over defaults
    pub fn resolve(cli: CliOverrides, file: TomlConfig) -> Result<Self> {
        let dataset = cli
            .dataset
            .or(file.dataset)
            .unwrap_or_else(|| DEFAULT_DATASET.to_string())
            .parse()?;

        let locator = ImageLocator::new(
            file.image_prefix
                .unwrap_or_else(|| DEFAULT_IMAGE_PREFIX.to_string()),
            file.image_extension
                .unwrap_or_else(|| DEFAULT_IMAGE_EXTENSION.to_string()),
        );

        let filter_order = file.filter_order.unwrap_or_default();
        if filter_order.is_empty() {
            return Err(Error::Config("filter_order must list at least one label".to_string()));
        }

        Ok(Self {
            dataset,
            port: cli.port.or(file.port).unwrap_or(DEFAULT_PORT),
            bind: cli
                .bind
                .or(file.bind)
                .unwrap_or_else(|| DEFAULT_BIND.to_string()),
            image_dir: cli.image_dir.or(file.image_dir),
            locator,
            filter_order,
            log_level: file.logging.level,
            config_file: None,
        })
    }

    /// Locate and read the config file, then resolve
    ///
    /// A missing implicit config file yields defaults (`config_file` is
    /// `None`); an unreadable or invalid file is an error.
    pub fn load(cli: CliOverrides) -> Result<Self> {
        let path = locate_config_file(cli.config.as_deref());
        let file = match &path {
            Some(path) => TomlConfig::load(path)?,
            None => TomlConfig::default(),
        };
        let mut config = Self::resolve(cli, file)?;
        config.config_file = path;
        Ok(config)
    }

    /// URL path the image directory is served under, if it is a local path
    pub fn image_route(&self) -> Option<String> {
        let prefix = self.locator.prefix.trim_matches('/');
        if prefix.is_empty() || prefix.contains("://") {
            return None;
        }
        Some(format!("/{}", prefix))
    }
}
