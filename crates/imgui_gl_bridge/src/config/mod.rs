//! Configuration system

use std::path::Path;

pub use serde::{Deserialize, Serialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        // Try different formats
        match extension(path) {
            Some("toml") => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Some("ron") => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Save configuration to file
    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match extension(path) {
            Some("toml") => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            Some("ron") => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A field holds a value the bridge cannot use
    #[error("Invalid value for {field}: {reason}")]
    Invalid {
        /// Offending field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// How mouse button presses reach the GUI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MouseInputMode {
    /// Presses are latched until the next frame and OR-ed with live polling
    #[default]
    Buffered,
    /// Press and release events write the button state directly
    Immediate,
}

/// Sampling filter for the font atlas texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextureFilter {
    /// Bilinear filtering
    #[default]
    Linear,
    /// Point sampling
    Nearest,
}

/// Bridge configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Version directive prepended to both GUI shaders
    pub glsl_version: String,

    /// Mouse button handling strategy
    pub mouse_input: MouseInputMode,

    /// Font atlas texture filter
    pub font_filter: TextureFilter,

    /// Bounds-check every draw list before touching device state
    pub validate_draw_data: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            glsl_version: "#version 130".to_string(),
            mouse_input: MouseInputMode::Buffered,
            font_filter: TextureFilter::Linear,
            validate_draw_data: false,
        }
    }
}

impl BridgeConfig {
    /// Check values that would only fail later, on the device
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.glsl_version.trim_start().starts_with("#version") {
            return Err(ConfigError::Invalid {
                field: "glsl_version",
                reason: format!("expected a #version directive, got {:?}", self.glsl_version),
            });
        }
        Ok(())
    }
}

impl Config for BridgeConfig {}
