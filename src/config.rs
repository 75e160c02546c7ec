use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Thresholds used by the paint bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillConfig {
    /// Pixels darker than this (mean of r, g, b) count as ink
    pub ink_brightness: f32,
    /// ...but only when more opaque than this
    pub ink_alpha: u8,
    /// Max RGB distance from the seed color for a pixel to be filled
    pub tolerance: f32,
    /// RGB distance under which a pixel already counts as the fill color
    pub target_match: f32,
    /// Upper brightness bound for anti-aliasing halo pixels
    pub halo_brightness: f32,
    /// Filled neighbours (of 8) needed to absorb a halo pixel
    pub halo_neighbors: usize,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            ink_brightness: 60.0,
            ink_alpha: 128,
            tolerance: 35.0,
            target_match: 5.0,
            halo_brightness: 200.0,
            halo_neighbors: 4,
        }
    }
}

/// Per-canvas configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Background color as a hex string
    pub background: String,
    /// Maximum number of undo snapshots kept
    pub history_depth: usize,
    /// Pointer moves closer than this to the last sample are dropped
    pub min_point_distance: f32,
    pub fill: FillConfig,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            history_depth: 20,
            min_point_distance: 2.0,
            fill: FillConfig::default(),
        }
    }
}

impl SurfaceConfig {
    /// Parse from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_depth == 0 {
            return Err(ConfigError::Invalid("history_depth must be at least 1".into()));
        }
        if !self.min_point_distance.is_finite() || self.min_point_distance < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "min_point_distance must be a finite non-negative number, got {}",
                self.min_point_distance
            )));
        }
        let fill = &self.fill;
        for (name, value) in [
            ("fill.ink_brightness", fill.ink_brightness),
            ("fill.tolerance", fill.tolerance),
            ("fill.target_match", fill.target_match),
            ("fill.halo_brightness", fill.halo_brightness),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!("{name} must be finite and >= 0")));
            }
        }
        Ok(())
    }
}
