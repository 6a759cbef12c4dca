use conveyor::ConveyorLevel;
use conveyor::carousel::CarouselParams;
use conveyor::ring::{DEFAULT_MAX_TICKS, DEFAULT_STEP};
use conveyor::ticker::DEFAULT_INTERVAL;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Geometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            x: 20,
            y: 20,
            width: 740,
            height: 182,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub enabled: bool,
    pub interval_ms: u64,
    pub step: u32,
    pub max_ticks: u32,
    pub seed: Option<u64>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ms: DEFAULT_INTERVAL.as_millis() as u64,
            step: DEFAULT_STEP,
            max_ticks: DEFAULT_MAX_TICKS,
            seed: Some(0),
        }
    }
}

impl AnimationConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub buckets: usize,
    pub level: ConveyorLevel,
    pub geometry: Geometry,
    pub animation: AnimationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            buckets: 400,
            level: ConveyorLevel::Upper,
            geometry: Geometry::default(),
            animation: AnimationConfig::default(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Config {
    /// Rejects values that cannot produce a carousel before any widget exists.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.buckets == 0 {
            return Err(ConfigError::InvalidArgument(
                "bucket count must be positive".into(),
            ));
        }
        if self.geometry.width == 0 || self.geometry.height == 0 {
            return Err(ConfigError::InvalidArgument(format!(
                "geometry {}x{} is empty",
                self.geometry.width, self.geometry.height
            )));
        }
        if self.animation.step == 0 {
            return Err(ConfigError::InvalidArgument(
                "animation step must be positive".into(),
            ));
        }
        if self.animation.interval_ms == 0 {
            return Err(ConfigError::InvalidArgument(
                "animation interval must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn carousel_params(&self) -> CarouselParams {
        CarouselParams {
            width: self.geometry.width,
            height: self.geometry.height,
            nb_buckets: self.buckets,
            level: self.level,
            step: self.animation.step,
            max_ticks: self.animation.max_ticks,
            seed: self.animation.seed,
        }
    }
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "conveyor", "carousel").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Reads `path` (if it exists) with `CAROUSEL_*` environment overrides on top.
pub fn load_from(path: &std::path::Path) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix("CAROUSEL")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: Config = s.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

/// Loads the user configuration. Defaults are used only when the platform has
/// no config directory; a missing file also yields defaults, a broken one fails.
pub fn load_config() -> Result<Config, ConfigError> {
    match get_config_path() {
        Ok(path) => load_from(&path),
        Err(ConfigError::ConfigDirNotFound) => {
            log::warn!("No config directory, using default configuration");
            Ok(Config::default())
        }
        Err(e) => Err(e),
    }
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}
