use serde::{Deserialize, Serialize};

mod recorder;
pub use recorder::{RecorderState, StrokeRecorder};

/// The tools a gesture can use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ToolKind {
    #[default]
    Pen,
    Bucket,
}

impl ToolKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pen => "Pen",
            Self::Bucket => "Bucket",
        }
    }
}

/// Current drawing configuration, owned by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolState {
    pub tool: ToolKind,
    /// Hex color string, passed through uninterpreted
    pub color: String,
    /// Pen width in logical pixels
    pub size: f32,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            tool: ToolKind::Pen,
            color: "#000000".to_string(),
            size: 5.0,
        }
    }
}
