#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod config;
pub mod document;
pub mod error;
pub mod event;
pub mod fill;
pub mod geometry;
pub mod history;
pub mod raster;
pub mod renderer;
pub mod stroke;
pub mod surface;
pub mod tools;
pub mod util;

pub use app::DoodleApp;
pub use config::{FillConfig, SurfaceConfig};
pub use document::StrokeList;
pub use error::{ConfigError, SurfaceError};
pub use event::{EventHandler, SurfaceEvent};
pub use fill::FillOutcome;
pub use geometry::{PathElement, Smoothing};
pub use history::SnapshotHistory;
pub use raster::RasterSurface;
pub use stroke::{Stroke, StrokePoint};
pub use surface::{CanvasId, SurfaceController};
pub use tools::{ToolKind, ToolState};
