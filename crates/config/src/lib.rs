//! Configuration models and loaders for the Geodesic Explorer.

use std::fs::File;
use std::path::Path;

use geodesic_core::constants::DEFAULT_BASE_URL;
use geodesic_core::{OrbitParameters, Variant};
use geodesic_sampling::{DEFAULT_MAX_POINTS, DEFAULT_PADDING};
use serde::Deserialize;
use thiserror::Error;

/// Complete explorer configuration. Every section is optional.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ExplorerConfig {
    pub backend: BackendConfig,
    pub render: RenderConfig,
    /// Initial controls of the standard (Schwarzschild) session.
    pub standard: OrbitParameters,
    /// Initial controls of the noncommutative session.
    pub noncommutative: OrbitParameters,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            render: RenderConfig::default(),
            standard: OrbitParameters::default_for(Variant::Standard),
            noncommutative: OrbitParameters::default_for(Variant::Noncommutative),
        }
    }
}

impl ExplorerConfig {
    pub fn parameters(&self, variant: Variant) -> &OrbitParameters {
        match variant {
            Variant::Standard => &self.standard,
            Variant::Noncommutative => &self.noncommutative,
        }
    }
}

/// Where the simulation service lives.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    /// Per-request timeout; absent means wait indefinitely.
    pub timeout_secs: Option<f64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

/// Chart sizing and trajectory reduction settings.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    pub max_points: usize,
    pub padding: f64,
    pub width: u32,
    pub height: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_points: DEFAULT_MAX_POINTS,
            padding: DEFAULT_PADDING,
            width: 900,
            height: 900,
        }
    }
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Load an explorer configuration from a `.toml` file or a YAML document.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ExplorerConfig, ConfigError> {
    let path = path.as_ref();
    let config: ExplorerConfig = if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)?
    } else {
        let reader = File::open(path)?;
        serde_yaml::from_reader(reader)?
    };
    validate(&config)?;
    Ok(config)
}

/// Load `path` when given, otherwise fall back to built-in defaults.
pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<ExplorerConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(ExplorerConfig::default()),
    }
}

fn validate(config: &ExplorerConfig) -> Result<(), ConfigError> {
    if config.backend.base_url.trim().is_empty() {
        return Err(ConfigError::Invalid("backend.base_url is empty".to_string()));
    }
    if let Some(timeout) = config.backend.timeout_secs {
        if !(timeout > 0.0 && timeout.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "backend.timeout_secs must be positive (got {timeout})"
            )));
        }
    }
    if config.render.max_points == 0 {
        return Err(ConfigError::Invalid(
            "render.max_points must be at least 1".to_string(),
        ));
    }
    if !(config.render.padding >= 0.0 && config.render.padding.is_finite()) {
        return Err(ConfigError::Invalid(format!(
            "render.padding must be a non-negative number (got {})",
            config.render.padding
        )));
    }
    Ok(())
}
