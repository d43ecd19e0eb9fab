/// Application configuration
///
/// Read once at startup from the user's config directory:
/// - Linux: ~/.config/imagenet-classifier/config.json
/// - macOS: ~/Library/Application Support/imagenet-classifier/config.json
/// - Windows: %APPDATA%\imagenet-classifier\config.json
///
/// A missing file means "use the defaults"; every field is optional.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{ClassifierError, Result};

const APP_DIR: &str = "imagenet-classifier";
const CONFIG_FILE: &str = "config.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// ResNet-50 (or compatible) network exported to ONNX
    pub model_path: PathBuf,
    /// One category name per line, line i = output class i
    pub labels_path: PathBuf,
    /// Square side of the network input
    pub input_size: u32,
    /// Shorter-side resize applied before the center crop (whole-image mode)
    pub resize_shorter_side: u32,
    /// Directory the file dialog opens in
    pub dialog_directory: Option<PathBuf>,
    /// Grid text prefilled in the grid window
    pub default_grid: String,
    /// Source image preview box in the single-image window
    pub simple_preview_size: u32,
    /// Source image preview box in the grid window
    pub grid_preview_size: u32,
    /// Current cell preview box in the grid window
    pub tile_preview_size: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("resnet50.onnx"),
            labels_path: PathBuf::from("imagenet_classes.txt"),
            input_size: 224,
            resize_shorter_side: 256,
            dialog_directory: None,
            default_grid: "3x3".to_string(),
            simple_preview_size: 224,
            grid_preview_size: 400,
            tile_preview_size: 200,
        }
    }
}

impl AppConfig {
    /// Load the config from the standard location, falling back to defaults
    /// when no file exists yet
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            Some(path) => {
                info!("⚙️  No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Load the config from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| ClassifierError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        info!("⚙️  Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ClassifierError::config(format!("invalid config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Convert to a JSON string
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ClassifierError::config(format!("cannot serialize config: {}", e)))
    }

    /// Where the config file lives, if the platform has a config directory
    pub fn config_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push(APP_DIR);
        path.push(CONFIG_FILE);
        Some(path)
    }

    fn validate(&self) -> Result<()> {
        if self.input_size == 0 {
            return Err(ClassifierError::config("input_size must be positive"));
        }
        if self.resize_shorter_side < self.input_size {
            return Err(ClassifierError::config(format!(
                "resize_shorter_side ({}) must be at least input_size ({})",
                self.resize_shorter_side, self.input_size
            )));
        }
        Ok(())
    }
}
