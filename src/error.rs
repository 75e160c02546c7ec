use thiserror::Error;

/// Errors raised while (re)allocating the raster surface
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SurfaceError {
    #[error("Invalid surface dimensions: {width}x{height} logical pixels")]
    InvalidDimensions { width: f32, height: f32 },

    #[error("Invalid device pixel ratio: {0}")]
    InvalidPixelRatio(f32),
}

/// Errors raised while loading a surface configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
