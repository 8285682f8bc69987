// config.rs - Startup settings, read from an optional TOML file

use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Grid size at startup
    pub initial_size: usize,
    /// Shrink is refused at or below this size
    pub min_size: usize,
    /// Grow is refused at or above this size
    pub max_size: usize,
    /// Time between generations while running
    pub tick_interval_ms: u64,
    pub live_color: [u8; 3],
    pub dead_color: [u8; 3],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            initial_size: 20,
            min_size: 2,
            max_size: 40,
            tick_interval_ms: 500,
            live_color: [0, 200, 0],
            dead_color: [40, 40, 40],
        }
    }
}

impl AppConfig {
    /// `~/.config/conway/config.toml` on Linux, the platform equivalent elsewhere.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("conway").join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the default path. A missing file gives the defaults
    /// quietly; an unreadable or invalid one is logged first.
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }

        match Self::load(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Ignoring config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_size == 0 {
            return Err(ConfigError::Invalid("min_size must be at least 1".into()));
        }
        if !(self.min_size..=self.max_size).contains(&self.initial_size) {
            return Err(ConfigError::Invalid(format!(
                "initial_size {} is outside {}..={}",
                self.initial_size, self.min_size, self.max_size
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid("tick_interval_ms must be positive".into()));
        }
        Ok(())
    }
}
