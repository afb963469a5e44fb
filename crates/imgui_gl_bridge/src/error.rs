//! Bridge error types

use thiserror::Error;

use crate::config::ConfigError;
use crate::gui::DrawDataError;
use crate::render::{DeviceError, ShaderStage};

/// Errors surfaced by the GUI bridge
#[derive(Error, Debug)]
pub enum BridgeError {
    /// A shader stage failed to compile
    ///
    /// Fatal for device object creation: there is no fallback pipeline, so the
    /// host must report this before attempting to render a frame.
    #[error("{stage:?} shader compilation failed: {log}")]
    ShaderCompilation {
        /// Stage that failed
        stage: ShaderStage,
        /// Driver info log
        log: String,
    },

    /// The GUI program failed to link
    #[error("Shader program link failed: {0}")]
    ProgramLink(String),

    /// A required attribute or uniform is not active in the linked program
    #[error("Shader location '{0}' not found in GUI program")]
    MissingLocation(&'static str),

    /// A device resource could not be created
    #[error("Device error: {0}")]
    Device(#[from] DeviceError),

    /// Draw data rejected by the optional validation pass
    #[error("Malformed draw data: {0}")]
    MalformedDrawData(#[from] DrawDataError),

    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for bridge operations
pub type BridgeResult<T> = Result<T, BridgeError>;
