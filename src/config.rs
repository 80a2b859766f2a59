use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

const MAX_RECENT_DATASETS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub appearance: AppearanceConfig,
    #[serde(default)]
    pub annotation: AnnotationConfig,
    #[serde(default)]
    pub dataset: DatasetConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppearanceConfig {
    /// Border width of drawn boxes, in screen pixels.
    #[serde(default = "default_box_thickness")]
    pub box_thickness: u32,
    #[serde(default = "default_true")]
    pub show_crosshair: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationConfig {
    /// Smallest accepted box side, in image pixels.
    #[serde(default = "default_min_box_size")]
    pub min_box_size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DatasetConfig {
    #[serde(default)]
    pub recent_datasets: Vec<String>,
}

// Default value functions
fn default_box_thickness() -> u32 {
    2
}

fn default_min_box_size() -> u32 {
    10
}

fn default_true() -> bool {
    true
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            box_thickness: default_box_thickness(),
            show_crosshair: true,
        }
    }
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            min_box_size: default_min_box_size(),
        }
    }
}

/// Get the path to the config file
pub fn config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "yolo-annotator")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Parse config text. Missing sections and fields take their defaults.
pub fn parse_config(content: &str) -> Result<AppConfig> {
    toml::from_str(content).map_err(|e| Error::Config(format!("failed to parse config: {e}")))
}

/// Load configuration from `path`, or return defaults if it is missing or unreadable.
pub fn load_config_from(path: &Path) -> AppConfig {
    if !path.exists() {
        return AppConfig::default();
    }
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content).unwrap_or_else(|e| {
            log::warn!("{e} ({}). Using defaults.", path.display());
            AppConfig::default()
        }),
        Err(e) => {
            log::warn!("Failed to read config file {}: {e}. Using defaults.", path.display());
            AppConfig::default()
        }
    }
}

/// Load configuration from the platform config directory.
pub fn load_config() -> AppConfig {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            log::warn!("No config directory available; using defaults.");
            AppConfig::default()
        }
    }
}

pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let toml = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("failed to serialize config: {e}")))?;

    std::fs::write(path, toml).map_err(|e| Error::io(path, e))
}

/// Save configuration to the platform config directory.
pub fn save_config(config: &AppConfig) -> Result<()> {
    let path = config_path()
        .ok_or_else(|| Error::Config("no config directory available".to_string()))?;
    save_config_to(config, &path)
}

/// Add a dataset path to recent datasets list
pub fn add_recent_dataset(config: &mut AppConfig, path: String) {
    // Remove if already in list
    config.dataset.recent_datasets.retain(|p| p != &path);

    // Add to front
    config.dataset.recent_datasets.insert(0, path);

    config.dataset.recent_datasets.truncate(MAX_RECENT_DATASETS);
}
